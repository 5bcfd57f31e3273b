//! Fixed-point conversions
//!
//! Token amounts and prices travel as 18-decimal base units in `U256`.
//! The heuristic multiplier chain runs in `f64`, so values cross the
//! integer/float boundary here and nowhere else.

use alloy_primitives::{U256, U512};

/// Decimals of a creator-coin base unit
pub const DECIMALS: u32 = 18;

/// 10^18 as a float, for whole-unit conversions
pub const SCALE_F64: f64 = 1e18;

/// 10^18 as a base-unit integer
pub const WAD: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

/// Convert a base-unit integer to `f64` (nearest representable value)
pub fn to_f64(value: U256) -> f64 {
    f64::from(value)
}

/// Convert base units to whole coins (`value / 10^18`)
pub fn to_whole_units(value: U256) -> f64 {
    to_f64(value) / SCALE_F64
}

/// Truncate a float toward zero into a `U256`, saturating at both ends.
///
/// Negative and NaN inputs map to zero; values beyond 256 bits map to `U256::MAX`.
pub fn floor_to_u256(value: f64) -> U256 {
    U256::saturating_from(value.floor())
}

/// Truncate a float toward zero into a `U256`
///
/// Returns `None` for NaN, negative and infinite inputs and for anything
/// that does not fit in 256 bits.
pub fn checked_floor_to_u256(value: f64) -> Option<U256> {
    U256::try_from(value.floor()).ok()
}

/// Widen a `U256` into a `U512` for overflow-free summation
pub fn widen(value: U256) -> U512 {
    U512::from(value)
}

/// Whole coins to base units, truncating sub-wei remainders
pub fn from_whole_units(coins: u64) -> U256 {
    U256::from(coins) * WAD
}
