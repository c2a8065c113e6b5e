pub mod errors;
pub mod exchange;
pub mod order;
pub mod transaction;

pub use errors::{Result, WalletError};
pub use exchange::{
    AccountUpdate, AccountUpsert, ExchangeOperations, ExchangeProtocol, TradingKeyPair,
};
pub use order::{OrderBuilder, OrderSubmitter};
pub use transaction::TransactionBuilder;
