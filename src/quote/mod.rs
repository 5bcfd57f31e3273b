//! Trade quote module
//!
//! Slippage-bounded quotes, dynamic fees and optimal trade sizing

mod calculator;
mod policy;
mod types;

pub use calculator::QuoteCalculator;
pub use policy::{
    adjusted_max_slippage, fee_rate_bps, BASE_FEE_BPS, MAX_SLIPPAGE_CEILING, MIN_FEE_BPS,
};
pub use types::{QuoteError, TradeQuote};
