use crate::domain::amount::to_hex;
use crate::domain::transaction::{OperationKind, SignedTransaction, UnsignedTransaction};
use log::{debug, info, warn};

pub(crate) fn log_built(kind: OperationKind, tx: &UnsignedTransaction) {
    debug!(
        "🧱 {} tx | to={:?} value={} nonce={} gasPrice={} gasLimit={} data={}B",
        kind,
        tx.to,
        to_hex(tx.value),
        tx.nonce,
        to_hex(tx.gas_price),
        tx.gas_limit,
        tx.data.len()
    );
}

pub(crate) fn log_signed(kind: OperationKind, signed: &SignedTransaction) {
    info!("✍️  Signed {} tx {:?}", kind, signed.hash);
}

/// Logs and hands the error back, for use in `map_err`.
pub(crate) fn log_failure<E: std::fmt::Display>(kind: OperationKind, err: E) -> E {
    warn!("❌ {} failed: {}", kind, err);
    err
}
