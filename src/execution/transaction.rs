use ethers::abi::Token;
use ethers::types::{Address, Bytes, U256};
use rust_decimal::Decimal;
use std::sync::Arc;

use crate::abi::{CallDataEncoder, ContractAbi, NamedArgs};
use crate::config::{GasOperation, TokenRegistry};
use crate::domain::amount::{gwei_to_wei, scale, WRAPPED_NATIVE_DECIMALS};
use crate::domain::transaction::{OperationKind, SignedTransaction, UnsignedTransaction};
use crate::execution::errors::Result;
use crate::logging::{log_built, log_failure, log_signed};
use crate::wallet::{Account, AddressProvider, NonceSource, TransactionSigner};

/// Everything except the nonce, computed before any network call.
struct Draft {
    kind: OperationKind,
    to: Address,
    value: U256,
    data: Bytes,
    gas_price: U256,
    gas_limit: U256,
}

/// Builds and signs plain transfers, ERC-20 transfers and approvals, and
/// WETH wraps and unwraps.
///
/// Each operation resolves the token, scales the amount and encodes call
/// data first; the nonce lookup is the only await before signing, so a bad
/// input never reaches the network.
pub struct TransactionBuilder {
    registry: Arc<dyn TokenRegistry>,
    encoder: Arc<dyn CallDataEncoder>,
    nonces: Arc<dyn NonceSource>,
    account: Arc<dyn Account>,
}

impl TransactionBuilder {
    pub fn new(
        registry: Arc<dyn TokenRegistry>,
        encoder: Arc<dyn CallDataEncoder>,
        nonces: Arc<dyn NonceSource>,
        account: Arc<dyn Account>,
    ) -> Self {
        Self {
            registry,
            encoder,
            nonces,
            account,
        }
    }

    // ==================================================
    // TRANSFER
    // ==================================================

    /// Native asset: value carries the amount, no call data.
    /// Tokens: value is zero and the amount goes into `transfer(_to, _value)`.
    pub async fn prepare_transfer(
        &self,
        to: Address,
        symbol: &str,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<UnsignedTransaction> {
        let token = self.registry.token(symbol)?;
        let scaled = scale(amount, token.decimals)?;
        let gas_limit = self
            .registry
            .gas_limit_for(&token, GasOperation::TokenTransfer)?;
        let gas_price = gwei_to_wei(gas_price_gwei)?;

        let draft = if self.registry.is_native(&token) {
            Draft {
                kind: OperationKind::NativeTransfer,
                to,
                value: scaled,
                data: Bytes::default(),
                gas_price,
                gas_limit,
            }
        } else {
            let data = self.encoder.encode(
                ContractAbi::Erc20,
                "transfer",
                &NamedArgs::none()
                    .arg("_to", Token::Address(to))
                    .arg("_value", Token::Uint(scaled)),
            )?;
            Draft {
                kind: OperationKind::TokenTransfer,
                to: token.address,
                value: U256::zero(),
                data,
                gas_price,
                gas_limit,
            }
        };

        self.assemble(draft).await
    }

    pub async fn transfer(
        &self,
        to: Address,
        symbol: &str,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<SignedTransaction> {
        let tx = self.prepare_transfer(to, symbol, amount, gas_price_gwei).await?;
        let kind = if tx.data.is_empty() {
            OperationKind::NativeTransfer
        } else {
            OperationKind::TokenTransfer
        };
        self.sign(kind, &tx).await
    }

    // ==================================================
    // APPROVE
    // ==================================================

    /// `amount` is in base units and is encoded as given. Scale human
    /// amounts with [`crate::domain::amount::scale`] first.
    pub async fn prepare_approve(
        &self,
        symbol: &str,
        amount: U256,
        gas_price_gwei: Decimal,
    ) -> Result<UnsignedTransaction> {
        let token = self.registry.token(symbol)?;
        let spender = self.registry.exchange_address()?;
        let gas_limit = self.registry.gas_limit_for(&token, GasOperation::Approve)?;
        let gas_price = gwei_to_wei(gas_price_gwei)?;

        let data = self.encoder.encode(
            ContractAbi::Erc20,
            "approve",
            &NamedArgs::none()
                .arg("_spender", Token::Address(spender))
                .arg("_value", Token::Uint(amount)),
        )?;

        self.assemble(Draft {
            kind: OperationKind::Approve,
            to: token.address,
            value: U256::zero(),
            data,
            gas_price,
            gas_limit,
        })
        .await
    }

    /// Signs the unsigned RLP payload rather than the record.
    pub async fn approve(
        &self,
        symbol: &str,
        amount: U256,
        gas_price_gwei: Decimal,
    ) -> Result<SignedTransaction> {
        let tx = self.prepare_approve(symbol, amount, gas_price_gwei).await?;
        let signed = self
            .account
            .sign_raw(&tx.raw())
            .await
            .map_err(|e| log_failure(OperationKind::Approve, e))?;
        log_signed(OperationKind::Approve, &signed);
        Ok(signed)
    }

    // ==================================================
    // WRAP / UNWRAP
    // ==================================================

    pub async fn prepare_wrap(
        &self,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<UnsignedTransaction> {
        let weth = self.registry.token(self.registry.wrapped_symbol())?;
        let value = scale(amount, WRAPPED_NATIVE_DECIMALS)?;
        let gas_limit = self.registry.gas_limit_for(&weth, GasOperation::Deposit)?;
        let gas_price = gwei_to_wei(gas_price_gwei)?;
        let data = self
            .encoder
            .encode(ContractAbi::WrappedNative, "deposit", &NamedArgs::none())?;

        self.assemble(Draft {
            kind: OperationKind::Wrap,
            to: weth.address,
            value,
            data,
            gas_price,
            gas_limit,
        })
        .await
    }

    pub async fn wrap(&self, amount: &str, gas_price_gwei: Decimal) -> Result<SignedTransaction> {
        let tx = self.prepare_wrap(amount, gas_price_gwei).await?;
        self.sign(OperationKind::Wrap, &tx).await
    }

    pub async fn prepare_unwrap(
        &self,
        amount: &str,
        gas_price_gwei: Decimal,
    ) -> Result<UnsignedTransaction> {
        let weth = self.registry.token(self.registry.wrapped_symbol())?;
        let wad = scale(amount, WRAPPED_NATIVE_DECIMALS)?;
        let gas_limit = self.registry.gas_limit_for(&weth, GasOperation::Withdraw)?;
        let gas_price = gwei_to_wei(gas_price_gwei)?;
        let data = self.encoder.encode(
            ContractAbi::WrappedNative,
            "withdraw",
            &NamedArgs::none().arg("wad", Token::Uint(wad)),
        )?;

        self.assemble(Draft {
            kind: OperationKind::Unwrap,
            to: weth.address,
            value: U256::zero(),
            data,
            gas_price,
            gas_limit,
        })
        .await
    }

    pub async fn unwrap(&self, amount: &str, gas_price_gwei: Decimal) -> Result<SignedTransaction> {
        let tx = self.prepare_unwrap(amount, gas_price_gwei).await?;
        self.sign(OperationKind::Unwrap, &tx).await
    }

    // ==================================================
    // Helpers
    // ==================================================

    async fn assemble(&self, draft: Draft) -> Result<UnsignedTransaction> {
        let nonce = self
            .nonces
            .nonce(self.account.address())
            .await
            .map_err(|e| log_failure(draft.kind, e))?;

        let tx = UnsignedTransaction {
            to: draft.to,
            value: draft.value,
            data: draft.data,
            chain_id: self.registry.chain_id(),
            nonce,
            gas_price: draft.gas_price,
            gas_limit: draft.gas_limit,
        };
        log_built(draft.kind, &tx);
        Ok(tx)
    }

    async fn sign(
        &self,
        kind: OperationKind,
        tx: &UnsignedTransaction,
    ) -> Result<SignedTransaction> {
        let signed = self
            .account
            .sign_transaction(tx)
            .await
            .map_err(|e| log_failure(kind, e))?;
        log_signed(kind, &signed);
        Ok(signed)
    }
}
