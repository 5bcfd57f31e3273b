//! Trade quote types

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::curve::CurveError;

/// A priced, slippage-checked trade
///
/// Quotes are never updated in place. Once `deadline` has passed, callers
/// must request a fresh quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeQuote {
    /// Quote identifier
    pub id: Uuid,
    /// Buy (true) or sell (false)
    pub is_buy: bool,
    /// Tokens going into the trade
    pub input_amount: U256,
    /// Value coming out of the trade before fees
    pub output_amount: U256,
    /// Fee deducted from the output
    pub fee: U256,
    /// Fee rate in basis points
    pub fee_bps: u32,
    /// Output after fees; the least the caller should accept
    pub minimum_received: U256,
    /// Relative price move caused by the trade (positive is worse)
    pub price_impact: f64,
    /// Expiry as unix seconds
    pub deadline: i64,
}

impl TradeQuote {
    /// Check whether the quote's deadline has passed
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.deadline
    }

    /// Seconds left before expiry (zero once expired)
    pub fn seconds_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.deadline - now.timestamp()).max(0)
    }
}

/// Quote errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuoteError {
    /// Trade would push supply below zero or to the cap
    #[error("Invalid trade: {0}")]
    InvalidTrade(String),
    /// Price impact above the adjusted slippage bound
    #[error("Slippage exceeded: impact {price_impact:.6} > max {max_slippage:.6}")]
    SlippageExceeded { price_impact: f64, max_slippage: f64 },
    /// Output amount or deadline does not fit its integer type
    #[error("Arithmetic overflow computing quote")]
    Overflow,
    /// Underlying curve rejected the supply
    #[error(transparent)]
    Curve(#[from] CurveError),
}
