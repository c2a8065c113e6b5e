//! Transaction and order construction for a DEX wallet client.
//!
//! Human decimal amounts are scaled to exact base units, protocol fields
//! are filled from an injected [`config::TokenRegistry`], and signing is
//! delegated to a [`wallet::TransactionSigner`].

pub mod abi;
pub mod config;
pub mod domain;
pub mod execution;
mod logging;
pub mod wallet;

pub use execution::{Result, WalletError};
