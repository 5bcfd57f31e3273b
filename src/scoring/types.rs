//! Market scoring types

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Trading recommendation derived from curve vs AMM pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    Buy,
    Sell,
    Hold,
}

/// Coarse risk bucket
///
/// Ordered so that `Low < Medium < High`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// One level up, saturating at `High`
    pub fn escalated(self) -> Self {
        match self {
            RiskLevel::Low => RiskLevel::Medium,
            RiskLevel::Medium | RiskLevel::High => RiskLevel::High,
        }
    }
}

/// Full scoring bundle for one coin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketScore {
    /// Depth/activity score, 0 to 100
    pub liquidity_score: f64,
    /// Volatility score, 0 to 100
    pub volatility_score: f64,
    /// Trend score, -100 (bearish) to 100 (bullish)
    pub trend_score: f64,
    /// Buy, sell or hold
    pub recommendation: Recommendation,
    /// Confidence in the recommendation, 0 to 100
    pub confidence: f64,
    /// Overall risk bucket
    pub risk_level: RiskLevel,
    /// Human-readable reasons behind `risk_level`, in evaluation order
    pub risk_factors: Vec<String>,
    /// Bonding curve price at the snapshot's supply (×10^18)
    pub custom_price: Option<U256>,
    /// Relative gap between curve and AMM price (0.1 = curve 10% above)
    pub price_difference: f64,
}
