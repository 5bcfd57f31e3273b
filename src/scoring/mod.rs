//! Market scoring module
//!
//! Liquidity, volatility and trend scores, buy/sell/hold recommendations
//! and risk assessment for a single coin

mod risk;
mod scorer;
mod types;

pub use risk::{assess_risk, RiskAssessment, RiskInputs, STABLE_FACTOR};
pub use scorer::{
    confidence, liquidity_score, price_difference, recommend, trend_score, volatility_score,
    MarketScorer,
};
pub use types::{MarketScore, Recommendation, RiskLevel};
