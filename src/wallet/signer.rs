use async_trait::async_trait;
use ethers::prelude::*;
use ethers::types::transaction::eip2718::TypedTransaction;
use ethers::utils::rlp::Rlp;

use crate::domain::transaction::{RawTransaction, SignedTransaction, UnsignedTransaction};
use crate::execution::errors::{Result, WalletError};

/// Where transactions are sent from.
pub trait AddressProvider: Send + Sync {
    fn address(&self) -> Address;
}

/// Signs transactions without looking at what they do.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    async fn sign_transaction(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction>;

    /// Sign an unsigned RLP payload produced elsewhere.
    async fn sign_raw(&self, raw: &RawTransaction) -> Result<SignedTransaction>;
}

/// Address plus signing, the capability set handed to exchange collaborators.
pub trait Account: AddressProvider + TransactionSigner {}

impl<T: AddressProvider + TransactionSigner> Account for T {}

/// Private-key signer for a single chain.
#[derive(Debug, Clone)]
pub struct LocalSigner {
    wallet: LocalWallet,
}

impl LocalSigner {
    pub fn new(private_key: &str, chain_id: u64) -> Result<Self> {
        let wallet = private_key
            .trim_start_matches("0x")
            .parse::<LocalWallet>()
            .map_err(|e| WalletError::SigningFailed(format!("bad private key: {}", e)))?;
        Ok(Self {
            wallet: wallet.with_chain_id(chain_id),
        })
    }

    pub fn chain_id(&self) -> u64 {
        self.wallet.chain_id()
    }

    async fn sign_typed(&self, tx: TypedTransaction) -> Result<SignedTransaction> {
        let sig = self
            .wallet
            .sign_transaction(&tx)
            .await
            .map_err(|e| WalletError::SigningFailed(e.to_string()))?;
        Ok(SignedTransaction {
            raw: tx.rlp_signed(&sig),
            hash: tx.hash(&sig),
        })
    }
}

impl AddressProvider for LocalSigner {
    fn address(&self) -> Address {
        self.wallet.address()
    }
}

#[async_trait]
impl TransactionSigner for LocalSigner {
    async fn sign_transaction(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction> {
        self.sign_typed(tx.to_typed()).await
    }

    async fn sign_raw(&self, raw: &RawTransaction) -> Result<SignedTransaction> {
        let request = TransactionRequest::decode_unsigned_rlp(&Rlp::new(raw.as_ref()))
            .map_err(|e| WalletError::SigningFailed(format!("undecodable payload: {}", e)))?;
        self.sign_typed(TypedTransaction::Legacy(request)).await
    }
}
