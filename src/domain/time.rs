use crate::execution::errors::{Result, WalletError};
use chrono::{DateTime, Duration, Utc};

/// Whole seconds of a UNIX timestamp. Fractions are floored, never rounded.
pub fn floor_timestamp(ts: f64) -> Result<u64> {
    if !ts.is_finite() || ts < 0.0 || ts > u64::MAX as f64 {
        return Err(WalletError::InvalidTimestamp(ts));
    }
    Ok(ts.floor() as u64)
}

fn unix_secs(at: DateTime<Utc>) -> u64 {
    at.timestamp().max(0) as u64
}

pub fn now_secs() -> u64 {
    unix_secs(Utc::now())
}

/// `(now, now + days)` in seconds, the default order validity window.
pub fn validity_window(days: i64) -> (u64, u64) {
    let now = Utc::now();
    (unix_secs(now), unix_secs(now + Duration::days(days)))
}
