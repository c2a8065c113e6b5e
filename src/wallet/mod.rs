pub mod nonce;
pub mod signer;

pub use nonce::{ChainNonces, NonceSource};
pub use signer::{Account, AddressProvider, LocalSigner, TransactionSigner};
