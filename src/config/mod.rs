use clap::{Parser, Subcommand};
use ethers::types::{Address, U256};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::str::FromStr;

use crate::execution::errors::{Result, WalletError};

pub mod tokens;

pub use tokens::{GasOperation, TokenInfo, TokenRegistry};

/* =======================
CLI ARGS
======================= */

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "config.json")]
    pub config: PathBuf,

    /// Send signed transactions through RPC_URL instead of printing them
    #[arg(long)]
    pub broadcast: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Send ETH or an ERC-20 token
    Transfer {
        #[arg(long, value_parser = parse_address)]
        to: Address,
        #[arg(long)]
        symbol: String,
        /// Human amount, e.g. 1.5
        #[arg(long)]
        amount: String,
        /// Gas price in gwei
        #[arg(long)]
        gas_price: Decimal,
    },
    /// Allow the exchange to spend a token
    Approve {
        #[arg(long)]
        symbol: String,
        /// Allowance in base units (already scaled by the token decimals)
        #[arg(long, value_parser = parse_base_units)]
        amount: U256,
        #[arg(long)]
        gas_price: Decimal,
    },
    /// ETH -> WETH
    Wrap {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        gas_price: Decimal,
    },
    /// WETH -> ETH
    Unwrap {
        #[arg(long)]
        amount: String,
        #[arg(long)]
        gas_price: Decimal,
    },
    /// Build an order record and print it
    Order {
        #[arg(long)]
        account_id: u32,
        #[arg(long)]
        token_s: String,
        #[arg(long)]
        token_b: String,
        #[arg(long)]
        token_s_id: u32,
        #[arg(long)]
        token_b_id: u32,
        #[arg(long)]
        pub_key_x: String,
        #[arg(long)]
        pub_key_y: String,
        #[arg(long)]
        amount_s: String,
        #[arg(long)]
        amount_b: String,
        #[arg(long)]
        order_id: u32,
        /// Validity in days from now
        #[arg(long, default_value_t = 30)]
        valid_days: i64,
    },
}

fn parse_address(s: &str) -> std::result::Result<Address, String> {
    Address::from_str(s).map_err(|e| format!("invalid address: {}", e))
}

fn parse_base_units(s: &str) -> std::result::Result<U256, String> {
    U256::from_dec_str(s).map_err(|e| format!("invalid base-unit amount: {:?}", e))
}

/* =======================
MAIN CONFIG
======================= */

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub chain_id: u64,

    /// Exchange contract that receives approvals. Zero means unset.
    pub exchange_address: Address,

    pub native_symbol: String,
    pub wrapped_symbol: String,

    pub gas_limits: HashMap<GasOperation, u64>,
    pub tokens: Vec<TokenInfo>,
}

/* =======================
DEFAULT CONFIG
======================= */

impl Default for Config {
    fn default() -> Self {
        let weth = Address::from_str("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")
            .unwrap_or_default();
        let usdt = Address::from_str("0xdAC17F958D2ee523a2206206994597C13D831ec7")
            .unwrap_or_default();

        Self {
            chain_id: 1,
            exchange_address: Address::zero(),
            native_symbol: "ETH".to_string(),
            wrapped_symbol: "WETH".to_string(),
            gas_limits: HashMap::from([
                (GasOperation::TokenTransfer, 60_000),
                (GasOperation::Approve, 60_000),
                (GasOperation::Deposit, 60_000),
                (GasOperation::Withdraw, 60_000),
            ]),
            tokens: vec![
                TokenInfo::new("ETH", Address::zero(), 18),
                TokenInfo::new("WETH", weth, 18),
                TokenInfo::new("USDT", usdt, 6).with_gas_limit(GasOperation::TokenTransfer, 80_000),
            ],
        }
    }
}

/* =======================
LOAD / CREATE CONFIG
======================= */

impl Config {
    pub fn load(path: &PathBuf) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            let cfg = Config::default();
            let content = serde_json::to_string_pretty(&cfg)?;
            std::fs::write(path, content)?;
            Ok(cfg)
        }
    }
}

/* =======================
REGISTRY
======================= */

impl TokenRegistry for Config {
    fn token(&self, symbol_or_address: &str) -> Result<TokenInfo> {
        tokens::find_token(&self.tokens, symbol_or_address).cloned()
    }

    fn chain_id(&self) -> u64 {
        self.chain_id
    }

    fn exchange_address(&self) -> Result<Address> {
        if self.exchange_address.is_zero() {
            return Err(WalletError::ExchangeNotConfigured);
        }
        Ok(self.exchange_address)
    }

    fn gas_limit(&self, op: GasOperation) -> Result<U256> {
        self.gas_limits
            .get(&op)
            .map(|gas| U256::from(*gas))
            .ok_or(WalletError::MissingGasLimit(op))
    }

    fn native_symbol(&self) -> &str {
        &self.native_symbol
    }

    fn wrapped_symbol(&self) -> &str {
        &self.wrapped_symbol
    }
}
