//! Curve error types

use alloy_primitives::U256;
use thiserror::Error;

/// Bonding curve errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// Supply sits at or beyond the curve's asymptote
    #[error("Invalid supply {supply}: must be below cap {cap}")]
    InvalidSupply { supply: U256, cap: U256 },
    /// Curve parameters outside their allowed ranges
    #[error("Invalid curve parameters: {0}")]
    InvalidParameters(String),
    /// Scaled price does not fit in 256 bits
    #[error("Price at supply {supply} exceeds 256 bits")]
    PriceOverflow { supply: U256 },
}
