use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::transaction::{OperationKind, RawTransaction, SignedTransaction};
use crate::execution::errors::Result;
use crate::logging::{log_failure, log_signed};
use crate::wallet::{Account, TransactionSigner};

/// Trading key pair issued by the exchange, as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingKeyPair {
    pub public_key_x: String,
    pub public_key_y: String,
    pub secret_key: String,
}

/// Unsigned account registration returned by the exchange protocol.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpsert {
    pub raw_transaction: RawTransaction,
    pub key_pair: TradingKeyPair,
}

/// Signed registration plus the key pair, handed back to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountUpdate {
    pub signed_transaction: SignedTransaction,
    pub key_pair: TradingKeyPair,
}

/// Exchange-side transaction construction. Amounts are passed through as
/// the caller wrote them; the protocol does its own scaling.
#[async_trait]
pub trait ExchangeProtocol: Send + Sync {
    async fn deposit(
        &self,
        account: &dyn Account,
        symbol: &str,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<RawTransaction>;

    async fn withdraw(
        &self,
        account: &dyn Account,
        symbol: &str,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<RawTransaction>;

    async fn create_or_update_account(
        &self,
        account: &dyn Account,
        password: &str,
        gas_price_gwei: Decimal,
    ) -> Result<AccountUpsert>;
}

/// Signs what the exchange protocol builds. No recovery: collaborator
/// errors reach the caller untouched.
pub struct ExchangeOperations {
    exchange: Arc<dyn ExchangeProtocol>,
    account: Arc<dyn Account>,
}

impl ExchangeOperations {
    pub fn new(exchange: Arc<dyn ExchangeProtocol>, account: Arc<dyn Account>) -> Self {
        Self { exchange, account }
    }

    pub async fn deposit_to_exchange(
        &self,
        symbol: &str,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<SignedTransaction> {
        let kind = OperationKind::ExchangeDeposit;
        let raw = self
            .exchange
            .deposit(self.account.as_ref(), symbol, amount, gas_price_gwei)
            .await
            .map_err(|e| log_failure(kind, e))?;
        self.sign_raw(kind, &raw).await
    }

    pub async fn withdraw_from_exchange(
        &self,
        symbol: &str,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<SignedTransaction> {
        let kind = OperationKind::ExchangeWithdraw;
        let raw = self
            .exchange
            .withdraw(self.account.as_ref(), symbol, amount, gas_price_gwei)
            .await
            .map_err(|e| log_failure(kind, e))?;
        self.sign_raw(kind, &raw).await
    }

    pub async fn upsert_exchange_account(
        &self,
        password: &str,
        gas_price_gwei: Decimal,
    ) -> Result<AccountUpdate> {
        let kind = OperationKind::AccountUpsert;
        let upsert = self
            .exchange
            .create_or_update_account(self.account.as_ref(), password, gas_price_gwei)
            .await
            .map_err(|e| log_failure(kind, e))?;
        let signed_transaction = self.sign_raw(kind, &upsert.raw_transaction).await?;
        Ok(AccountUpdate {
            signed_transaction,
            key_pair: upsert.key_pair,
        })
    }

    async fn sign_raw(
        &self,
        kind: OperationKind,
        raw: &RawTransaction,
    ) -> Result<SignedTransaction> {
        let signed = self
            .account
            .sign_raw(raw)
            .await
            .map_err(|e| log_failure(kind, e))?;
        log_signed(kind, &signed);
        Ok(signed)
    }
}
