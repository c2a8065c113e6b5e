//! Shared fixtures: a small token table and recording collaborators.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use ethers::types::{Address, H256, U256};

use dex_wallet::abi::AbiEncoder;
use dex_wallet::config::Config;
use dex_wallet::domain::{RawTransaction, SignedTransaction, UnsignedTransaction};
use dex_wallet::execution::TransactionBuilder;
use dex_wallet::wallet::{AddressProvider, NonceSource, TransactionSigner};
use dex_wallet::{Result, WalletError};

pub const CONFIG: &str = r#"{
    "chain_id": 5,
    "exchange_address": "0x00000000000000000000000000000000000000ee",
    "native_symbol": "ETH",
    "wrapped_symbol": "WETH",
    "gas_limits": {
        "token_transfer": 60000,
        "approve": 50000,
        "deposit": 40000,
        "withdraw": 45000
    },
    "tokens": [
        {
            "symbol": "ETH",
            "address": "0x0000000000000000000000000000000000000000",
            "decimals": 18
        },
        {
            "symbol": "WETH",
            "address": "0x00000000000000000000000000000000000000aa",
            "decimals": 18
        },
        {
            "symbol": "LRC",
            "address": "0x00000000000000000000000000000000000000bb",
            "decimals": 18
        },
        {
            "symbol": "USDT",
            "address": "0x00000000000000000000000000000000000000cc",
            "decimals": 6,
            "gas_limits": { "token_transfer": 80000 }
        }
    ]
}"#;

pub fn config() -> Config {
    serde_json::from_str(CONFIG).unwrap()
}

pub fn addr(byte: u64) -> Address {
    Address::from_low_u64_be(byte)
}

pub const OWNER: u64 = 0x0a11ce;
pub const EXCHANGE: u64 = 0xee;
pub const WETH: u64 = 0xaa;
pub const LRC: u64 = 0xbb;
pub const USDT: u64 = 0xcc;

// ===============================
// NONCES
// ===============================

pub struct FixedNonces {
    pub nonce: U256,
    pub calls: AtomicUsize,
    pub last_address: Mutex<Option<Address>>,
}

impl FixedNonces {
    pub fn new(nonce: u64) -> Self {
        Self {
            nonce: U256::from(nonce),
            calls: AtomicUsize::new(0),
            last_address: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NonceSource for FixedNonces {
    async fn nonce(&self, address: Address) -> Result<U256> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_address.lock().unwrap() = Some(address);
        Ok(self.nonce)
    }
}

pub struct FailingNonces;

#[async_trait]
impl NonceSource for FailingNonces {
    async fn nonce(&self, _address: Address) -> Result<U256> {
        Err(WalletError::NonceLookupFailed("node unreachable".into()))
    }
}

// ===============================
// SIGNER
// ===============================

/// Echoes payloads back as "signed" bytes and remembers what it was given.
pub struct RecordingSigner {
    pub address: Address,
    pub fail: bool,
    pub records: Mutex<Vec<UnsignedTransaction>>,
    pub raws: Mutex<Vec<RawTransaction>>,
}

impl RecordingSigner {
    pub fn new() -> Self {
        Self {
            address: addr(OWNER),
            fail: false,
            records: Mutex::new(Vec::new()),
            raws: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    pub fn signatures(&self) -> usize {
        self.records.lock().unwrap().len() + self.raws.lock().unwrap().len()
    }
}

impl AddressProvider for RecordingSigner {
    fn address(&self) -> Address {
        self.address
    }
}

#[async_trait]
impl TransactionSigner for RecordingSigner {
    async fn sign_transaction(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction> {
        if self.fail {
            return Err(WalletError::SigningFailed("hardware wallet locked".into()));
        }
        self.records.lock().unwrap().push(tx.clone());
        Ok(SignedTransaction {
            raw: tx.raw().0,
            hash: H256::repeat_byte(0xaa),
        })
    }

    async fn sign_raw(&self, raw: &RawTransaction) -> Result<SignedTransaction> {
        if self.fail {
            return Err(WalletError::SigningFailed("hardware wallet locked".into()));
        }
        self.raws.lock().unwrap().push(raw.clone());
        Ok(SignedTransaction {
            raw: raw.0.clone(),
            hash: H256::repeat_byte(0xbb),
        })
    }
}

// ===============================
// HARNESS
// ===============================

pub struct Harness {
    pub config: Arc<Config>,
    pub nonces: Arc<FixedNonces>,
    pub signer: Arc<RecordingSigner>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(config())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            nonces: Arc::new(FixedNonces::new(7)),
            signer: Arc::new(RecordingSigner::new()),
        }
    }

    pub fn builder(&self) -> TransactionBuilder {
        TransactionBuilder::new(
            self.config.clone(),
            Arc::new(AbiEncoder::new().unwrap()),
            self.nonces.clone(),
            self.signer.clone(),
        )
    }
}
