use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::domain::amount::{decimal_units, to_decimal_string};

/// Caller-side order parameters, amounts still in human decimals.
#[derive(Debug, Clone)]
pub struct OrderRequest {
    pub owner: Address,
    pub account_id: u32,
    /// Symbol or hex address of the token sold.
    pub token_s: String,
    /// Symbol or hex address of the token bought.
    pub token_b: String,
    pub token_s_id: u32,
    pub token_b_id: u32,
    pub trading_pub_key_x: String,
    pub trading_pub_key_y: String,
    pub trading_priv_key: String,
    pub amount_s: String,
    pub amount_b: String,
    pub order_id: u32,
    /// UNIX seconds; fractions are floored.
    pub valid_since: f64,
    pub valid_until: f64,
}

/// Order with exact base-unit amounts, ready for the exchange to sign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub owner: Address,
    pub account_id: u32,
    pub token_s: String,
    pub token_b: String,
    pub token_s_id: u32,
    pub token_b_id: u32,
    pub trading_pub_key_x: String,
    pub trading_pub_key_y: String,
    #[serde(skip)]
    pub trading_priv_key: String,

    /// Base units, carried on the wire as a base-10 string.
    #[serde(with = "decimal_units")]
    pub amount_s: U256,
    #[serde(with = "decimal_units")]
    pub amount_b: U256,

    pub order_id: u32,
    pub valid_since: u64,
    pub valid_until: u64,
}

impl OrderRecord {
    pub fn amount_s_string(&self) -> String {
        to_decimal_string(self.amount_s)
    }

    pub fn amount_b_string(&self) -> String {
        to_decimal_string(self.amount_b)
    }
}

/// What the order submitter reports back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub order_hash: Option<String>,
    pub accepted: bool,
    pub message: Option<String>,
}
