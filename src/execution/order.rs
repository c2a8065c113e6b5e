use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::config::TokenRegistry;
use crate::domain::amount::scale;
use crate::domain::order::{OrderRecord, OrderRequest, SubmissionReceipt};
use crate::domain::time::floor_timestamp;
use crate::domain::transaction::OperationKind;
use crate::execution::errors::Result;
use crate::logging::log_failure;
use crate::wallet::Account;

/// Hands a finished order to the exchange, which signs and relays it.
#[async_trait]
pub trait OrderSubmitter: Send + Sync {
    async fn submit_order(
        &self,
        account: &dyn Account,
        order: &OrderRecord,
    ) -> Result<SubmissionReceipt>;
}

pub struct OrderBuilder {
    registry: Arc<dyn TokenRegistry>,
    submitter: Arc<dyn OrderSubmitter>,
    account: Arc<dyn Account>,
}

impl OrderBuilder {
    pub fn new(
        registry: Arc<dyn TokenRegistry>,
        submitter: Arc<dyn OrderSubmitter>,
        account: Arc<dyn Account>,
    ) -> Self {
        Self {
            registry,
            submitter,
            account,
        }
    }

    /// Scale both amounts by their own token's decimals and floor the
    /// validity window. `valid_since <= valid_until` is left to the caller.
    pub fn build_order(&self, req: &OrderRequest) -> Result<OrderRecord> {
        let token_sell = self.registry.token(&req.token_s)?;
        let token_buy = self.registry.token(&req.token_b)?;

        let amount_s = scale(&req.amount_s, token_sell.decimals)?;
        let amount_b = scale(&req.amount_b, token_buy.decimals)?;

        Ok(OrderRecord {
            owner: req.owner,
            account_id: req.account_id,
            token_s: req.token_s.clone(),
            token_b: req.token_b.clone(),
            token_s_id: req.token_s_id,
            token_b_id: req.token_b_id,
            trading_pub_key_x: req.trading_pub_key_x.clone(),
            trading_pub_key_y: req.trading_pub_key_y.clone(),
            trading_priv_key: req.trading_priv_key.clone(),
            amount_s,
            amount_b,
            order_id: req.order_id,
            valid_since: floor_timestamp(req.valid_since)?,
            valid_until: floor_timestamp(req.valid_until)?,
        })
    }

    /// Build, then submit. The receipt comes back exactly as the submitter
    /// produced it.
    pub async fn submit_order(&self, req: &OrderRequest) -> Result<SubmissionReceipt> {
        let order = self.build_order(req)?;

        info!(
            "📤 Submitting order #{} | sell {} {} → buy {} {}",
            order.order_id, order.amount_s, order.token_s, order.amount_b, order.token_b
        );

        self.submitter
            .submit_order(self.account.as_ref(), &order)
            .await
            .map_err(|e| log_failure(OperationKind::OrderSubmit, e))
    }
}
