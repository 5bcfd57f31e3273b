//! Market scorer
//!
//! Turns a coin snapshot into liquidity, volatility and trend scores, a
//! recommendation based on how far the curve price sits from the AMM price,
//! and a risk assessment.

use std::time::Instant;

use alloy_primitives::U256;
use chrono::{DateTime, Utc};

use super::risk::{assess_risk, RiskInputs};
use super::{MarketScore, Recommendation};
use crate::coin::CoinSnapshot;
use crate::curve::CurveModel;
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use crate::units;

/// Price gap (fraction) needed before recommending a trade
const DIVERGENCE_THRESHOLD: f64 = 0.10;
/// Liquidity score required before acting on a price gap
const MIN_LIQUIDITY_TO_TRADE: f64 = 50.0;

/// Scores coins against a bonding curve
#[derive(Debug, Clone)]
pub struct MarketScorer {
    curve: CurveModel,
}

impl MarketScorer {
    /// Create a scorer pricing with `curve`
    pub fn new(curve: CurveModel) -> Self {
        Self { curve }
    }

    /// Score a snapshot now
    pub fn score(&self, snapshot: &CoinSnapshot) -> MarketScore {
        self.score_at(snapshot, Utc::now())
    }

    /// Score a snapshot with an explicit evaluation time
    pub fn score_at(&self, snapshot: &CoinSnapshot, now: DateTime<Utc>) -> MarketScore {
        let started = Instant::now();

        let volume = snapshot.volume_whole();
        let price_change = snapshot.price_change_pct();

        let liquidity_score = liquidity_score(snapshot, now);
        let volatility_score = volatility_score(price_change, volume);
        let trend_score = trend_score(price_change);

        let custom_price = match self
            .curve
            .price_at(snapshot.circulating_supply, Some(snapshot), now)
        {
            Ok(price) => Some(price),
            Err(e) => {
                tracing::warn!(symbol = %snapshot.symbol, error = %e, "Curve price unavailable");
                None
            }
        };

        let price_difference = price_difference(custom_price, snapshot.amm_price);
        let recommendation = recommend(price_difference, liquidity_score);
        let confidence = confidence(price_difference, liquidity_score, volume);

        let mut risk = assess_risk(RiskInputs {
            volatility_score,
            liquidity_score,
            price_change_pct: price_change,
            volume,
        });
        if custom_price.is_none() {
            risk.add_factor("Custom curve price unavailable");
        }

        record_latency(LatencyMetric::Scoring, started.elapsed());
        increment(CounterMetric::ScoresProduced);
        tracing::debug!(
            symbol = %snapshot.symbol,
            liquidity_score,
            volatility_score,
            trend_score,
            ?recommendation,
            risk_level = ?risk.level,
            "Market scored"
        );

        MarketScore {
            liquidity_score,
            volatility_score,
            trend_score,
            recommendation,
            confidence,
            risk_level: risk.level,
            risk_factors: risk.factors,
            custom_price,
            price_difference,
        }
    }
}

/// Liquidity score, 0 to 100
///
/// Volume up to 40 points, market cap up to 30, trade recency up to 20 and
/// price stability up to 10.
pub fn liquidity_score(snapshot: &CoinSnapshot, now: DateTime<Utc>) -> f64 {
    let volume_pts = (snapshot.volume_whole() / 10.0).min(40.0);
    let cap_pts = (snapshot.market_cap_whole() / 100.0).min(30.0);

    let recency_pts = match snapshot.hours_since_last_trade(now) {
        Some(h) if h < 1.0 => 20.0,
        Some(h) if h < 24.0 => 15.0,
        Some(h) if h < 168.0 => 10.0,
        _ => 5.0,
    };

    let change = snapshot.price_change_pct().abs();
    let stability_pts = if change < 5.0 {
        10.0
    } else if change < 10.0 {
        7.0
    } else if change < 20.0 {
        4.0
    } else {
        1.0
    };

    (volume_pts + cap_pts + recency_pts + stability_pts).min(100.0)
}

/// Volatility score, 0 to 100
pub fn volatility_score(price_change_pct: f64, volume: f64) -> f64 {
    let volume_volatility = (volume / 100.0).min(20.0);
    (price_change_pct.abs() * 2.0 + volume_volatility).min(100.0)
}

/// Trend score, -100 to 100
///
/// Volume trend and momentum are both proxied from the 24h price change
/// until a historical series is available.
pub fn trend_score(price_change_pct: f64) -> f64 {
    let volume_trend = price_change_pct * 0.5;
    let momentum = price_change_pct * 0.3;
    (price_change_pct + volume_trend + momentum).clamp(-100.0, 100.0)
}

/// Relative gap `(custom - amm) / amm`; zero when either side is missing
pub fn price_difference(custom_price: Option<U256>, amm_price: Option<U256>) -> f64 {
    match (custom_price, amm_price) {
        (Some(custom), Some(amm)) if !amm.is_zero() => {
            let amm = units::to_f64(amm);
            (units::to_f64(custom) - amm) / amm
        }
        _ => 0.0,
    }
}

/// Buy/sell/hold from the price gap, gated on liquidity
///
/// Thin markets always hold, whatever the gap.
pub fn recommend(price_difference: f64, liquidity_score: f64) -> Recommendation {
    if liquidity_score <= MIN_LIQUIDITY_TO_TRADE {
        return Recommendation::Hold;
    }
    if price_difference > DIVERGENCE_THRESHOLD {
        Recommendation::Buy
    } else if price_difference < -DIVERGENCE_THRESHOLD {
        Recommendation::Sell
    } else {
        Recommendation::Hold
    }
}

/// Confidence, 0 to 100
pub fn confidence(price_difference: f64, liquidity_score: f64, volume: f64) -> f64 {
    let divergence_pts = (price_difference.abs() * 200.0).min(50.0);
    let volume_pts = (volume / 100.0).min(20.0);
    (divergence_pts + liquidity_score * 0.3 + volume_pts).min(100.0)
}
