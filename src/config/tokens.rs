use crate::execution::errors::{Result, WalletError};
use ethers::types::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Names of the static per-operation gas table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasOperation {
    TokenTransfer,
    Approve,
    Deposit,
    Withdraw,
}

impl GasOperation {
    pub fn as_str(&self) -> &'static str {
        match self {
            GasOperation::TokenTransfer => "token_transfer",
            GasOperation::Approve => "approve",
            GasOperation::Deposit => "deposit",
            GasOperation::Withdraw => "withdraw",
        }
    }
}

impl fmt::Display for GasOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub symbol: String,
    pub address: Address,
    pub decimals: u32,
    /// Overrides of the global gas table for this token only.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub gas_limits: HashMap<GasOperation, u64>,
}

impl TokenInfo {
    pub fn new(symbol: &str, address: Address, decimals: u32) -> Self {
        Self {
            symbol: symbol.to_string(),
            address,
            decimals,
            gas_limits: HashMap::new(),
        }
    }

    pub fn with_gas_limit(mut self, op: GasOperation, gas: u64) -> Self {
        self.gas_limits.insert(op, gas);
        self
    }
}

/// Read-only token and network metadata the builders consume.
pub trait TokenRegistry: Send + Sync {
    /// Look a token up by symbol (case-insensitive) or by `0x` address.
    fn token(&self, symbol_or_address: &str) -> Result<TokenInfo>;

    fn chain_id(&self) -> u64;

    fn exchange_address(&self) -> Result<Address>;

    fn gas_limit(&self, op: GasOperation) -> Result<U256>;

    fn native_symbol(&self) -> &str;

    fn wrapped_symbol(&self) -> &str;

    /// Gas limit for `op` on `token`, preferring the token's own entry.
    fn gas_limit_for(&self, token: &TokenInfo, op: GasOperation) -> Result<U256> {
        match token.gas_limits.get(&op) {
            Some(gas) => Ok(U256::from(*gas)),
            None => self.gas_limit(op),
        }
    }

    fn is_native(&self, token: &TokenInfo) -> bool {
        token.symbol.eq_ignore_ascii_case(self.native_symbol())
    }
}

pub(crate) fn find_token<'a>(tokens: &'a [TokenInfo], key: &str) -> Result<&'a TokenInfo> {
    let found = match key.parse::<Address>() {
        Ok(address) if key.starts_with("0x") => tokens.iter().find(|t| t.address == address),
        _ => tokens.iter().find(|t| t.symbol.eq_ignore_ascii_case(key)),
    };
    found.ok_or_else(|| WalletError::UnknownToken(key.to_string()))
}
