use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Address, BlockNumber, U256};
use log::debug;
use std::sync::Arc;

use crate::execution::errors::{Result, WalletError};

/// Next transaction sequence number for an address.
#[async_trait]
pub trait NonceSource: Send + Sync {
    async fn nonce(&self, address: Address) -> Result<U256>;
}

/// Reads the pending transaction count from a node.
///
/// No local bookkeeping: two transactions built back to back before the
/// first reaches the mempool get the same nonce.
#[derive(Debug, Clone)]
pub struct ChainNonces<M> {
    provider: Arc<M>,
}

impl<M: Middleware> ChainNonces<M> {
    pub fn new(provider: Arc<M>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl<M: Middleware + 'static> NonceSource for ChainNonces<M> {
    async fn nonce(&self, address: Address) -> Result<U256> {
        let nonce = self
            .provider
            .get_transaction_count(address, Some(BlockNumber::Pending.into()))
            .await
            .map_err(|e| WalletError::NonceLookupFailed(e.to_string()))?;
        debug!("nonce for {:?}: {}", address, nonce);
        Ok(nonce)
    }
}
