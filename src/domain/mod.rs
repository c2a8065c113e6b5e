pub mod amount;
pub mod order;
pub mod time;
pub mod transaction;

pub use amount::{gwei_to_wei, scale, scale_decimal, to_decimal_string, to_hex};
pub use order::{OrderRecord, OrderRequest, SubmissionReceipt};
pub use transaction::{RawTransaction, SignedTransaction, UnsignedTransaction};
