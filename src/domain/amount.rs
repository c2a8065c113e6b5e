//! Exact conversion between human decimal amounts and integer base units.
//!
//! Amounts are scaled on their decimal digits directly, never through a
//! float or a fixed-precision intermediate, so an 18-decimal token with a
//! large balance keeps every digit.

use crate::execution::errors::{Result, WalletError};
use ethers::types::U256;
use rust_decimal::Decimal;

/// Decimal places between gwei and wei.
pub const GWEI_DECIMALS: u32 = 9;

/// Decimal places of the wrapped native asset, fixed by its contract.
pub const WRAPPED_NATIVE_DECIMALS: u32 = 18;

/// Base-10 digits of `U256::MAX`.
const MAX_U256_DIGITS: usize = 78;

/// Scale `amount` by `10^decimals` into an exact base-unit integer.
///
/// Accepts `"123"`, `"1.5"`, `".5"` and `"5."`. Signs, exponents and
/// whitespace are rejected. Fractional digits past `decimals` must all be
/// zero; anything else would have to be truncated and is rejected instead.
pub fn scale(amount: &str, decimals: u32) -> Result<U256> {
    if amount.starts_with('-') {
        return Err(WalletError::invalid_amount(amount, "negative amount"));
    }

    let (int_part, frac_part) = amount.split_once('.').unwrap_or((amount, ""));

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(WalletError::invalid_amount(amount, "no digits"));
    }

    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return Err(WalletError::invalid_amount(amount, "malformed decimal"));
    }

    let decimals = decimals as usize;
    let (kept, dropped) = frac_part.split_at(frac_part.len().min(decimals));

    if dropped.bytes().any(|b| b != b'0') {
        return Err(WalletError::invalid_amount(
            amount,
            format!("more than {} fractional digits", decimals),
        ));
    }

    let mut significant = String::with_capacity(int_part.len() + kept.len());
    significant.push_str(int_part);
    significant.push_str(kept);
    let significant = significant.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(U256::zero());
    }

    let padding = decimals - kept.len();
    if significant.len() + padding > MAX_U256_DIGITS {
        return Err(WalletError::invalid_amount(amount, "exceeds 256 bits"));
    }

    let mut digits = String::with_capacity(significant.len() + padding);
    digits.push_str(significant);
    digits.extend(std::iter::repeat('0').take(padding));

    U256::from_dec_str(&digits)
        .map_err(|_| WalletError::invalid_amount(amount, "exceeds 256 bits"))
}

/// [`scale`] for an already parsed decimal.
pub fn scale_decimal(value: Decimal, decimals: u32) -> Result<U256> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(WalletError::invalid_amount(value.to_string(), "negative amount"));
    }
    // Display never uses exponent notation, so the digits go through as-is.
    scale(&value.abs().to_string(), decimals)
}

/// Gas price in gwei → wei.
pub fn gwei_to_wei(gwei: Decimal) -> Result<U256> {
    scale_decimal(gwei, GWEI_DECIMALS)
}

/// Minimal `0x`-prefixed hex, `0x0` for zero.
pub fn to_hex(value: U256) -> String {
    format!("{:#x}", value)
}

pub fn to_decimal_string(value: U256) -> String {
    value.to_string()
}

/// Serde adapter: `U256` as a base-10 string, the way order amounts travel.
pub mod decimal_units {
    use ethers::types::U256;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(de::Error::custom(format!("not a base-10 integer: {:?}", s)));
        }
        U256::from_dec_str(&s).map_err(|e| de::Error::custom(format!("{:?}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn scales_reference_values() {
        assert_eq!(
            scale("1.5", 18).unwrap(),
            U256::from(1_500_000_000_000_000_000u128)
        );
        assert_eq!(scale("0", 6).unwrap(), U256::zero());
        assert_eq!(scale("100", 0).unwrap(), U256::from(100));
        assert_eq!(scale(".5", 1).unwrap(), U256::from(5));
        assert_eq!(scale("5.", 2).unwrap(), U256::from(500));
        assert_eq!(scale("000.010", 3).unwrap(), U256::from(10));
    }

    #[test]
    fn keeps_precision_beyond_f64() {
        // 17 significant digits plus 18 decimals overflows both f64 and Decimal.
        let v = scale("98765432109876543.123456789012345678", 18).unwrap();
        assert_eq!(
            v,
            U256::from_dec_str("98765432109876543123456789012345678").unwrap()
        );
    }

    #[test]
    fn trailing_zero_fraction_is_not_precision_loss() {
        assert_eq!(scale("1.2300", 2).unwrap(), U256::from(123));
    }

    #[test]
    fn rejects_excess_precision() {
        let err = scale("1.234", 2).unwrap_err();
        assert!(matches!(err, WalletError::InvalidAmount { .. }));
        assert!(scale("0.0000001", 6).is_err());
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", ".", "-1", "+1", "1e18", " 1", "1,5", "1.2.3", "abc", "0x10"] {
            assert!(
                matches!(scale(bad, 18), Err(WalletError::InvalidAmount { .. })),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        let max = U256::MAX.to_string();
        assert_eq!(scale(&max, 0).unwrap(), U256::MAX);
        assert!(scale(&max, 1).is_err());
    }

    #[test]
    fn huge_decimals_are_checked_before_padding() {
        assert_eq!(scale("0", 3_000_000_000).unwrap(), U256::zero());
        assert_eq!(scale("0.000", u32::MAX).unwrap(), U256::zero());
        assert!(matches!(
            scale("1", 3_000_000_000),
            Err(WalletError::InvalidAmount { .. })
        ));
        assert!(scale("1", 78).is_err());
        assert_eq!(scale("1", 77).unwrap(), U256::exp10(77));
        assert_eq!(scale("0.1", 78).unwrap(), U256::exp10(77));
        assert!(scale("0.5", 78).is_err());
    }

    #[test]
    fn gas_price_in_wei() {
        assert_eq!(gwei_to_wei(dec!(5)).unwrap(), U256::from(5_000_000_000u64));
        assert_eq!(gwei_to_wei(dec!(1.25)).unwrap(), U256::from(1_250_000_000u64));
        assert!(gwei_to_wei(dec!(-1)).is_err());
        assert!(gwei_to_wei(dec!(0.0000000001)).is_err());
    }

    #[test]
    fn renders_hex_and_decimal() {
        assert_eq!(to_hex(U256::zero()), "0x0");
        assert_eq!(to_hex(U256::from(255)), "0xff");
        assert_eq!(to_hex(U256::from(5_000_000_000u64)), "0x12a05f200");

        let v = scale("1.5", 18).unwrap();
        let s = to_decimal_string(v);
        assert_eq!(s, "1500000000000000000");
        assert_eq!(U256::from_dec_str(&s).unwrap(), v);
    }
}
