use crate::config::GasOperation;
use thiserror::Error;

pub type Result<T, E = WalletError> = std::result::Result<T, E>;

/// Failures surfaced by the builders.
///
/// Collaborator implementations map their own errors into the matching
/// variant; the builders only forward them with `?`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WalletError {
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    #[error("Unknown token: {0}")]
    UnknownToken(String),

    #[error("No gas limit configured for {0}")]
    MissingGasLimit(GasOperation),

    #[error("Exchange address is not configured")]
    ExchangeNotConfigured,

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(f64),

    #[error("Call data encoding failed: {0}")]
    Encoding(String),

    #[error("Nonce lookup failed: {0}")]
    NonceLookupFailed(String),

    #[error("Signing failed: {0}")]
    SigningFailed(String),

    #[error("Submission failed: {0}")]
    SubmissionFailed(String),
}

impl WalletError {
    pub(crate) fn invalid_amount(amount: impl Into<String>, reason: impl Into<String>) -> Self {
        WalletError::InvalidAmount {
            amount: amount.into(),
            reason: reason.into(),
        }
    }
}
