//! Market aggregation module
//!
//! Folds a batch of coin snapshots into market-wide conditions. Each call
//! works on the snapshots it is given; nothing is cached between cycles.

use std::time::Instant;

use alloy_primitives::U512;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coin::CoinSnapshot;
use crate::telemetry::{record_latency, set_gauge, GaugeMetric, LatencyMetric};
use crate::units::widen;

/// Average 24h change (percent) beyond which the market is trending
const TREND_THRESHOLD: Decimal = dec!(5);

/// Aggregation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// No coins to aggregate
    #[error("Cannot aggregate an empty set of coins")]
    EmptyInput,
}

/// Market-wide direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketTrend {
    Bullish,
    Bearish,
    Neutral,
}

/// Aggregate view over many coins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConditions {
    /// Sum of market caps (base units)
    pub total_market_cap: U512,
    /// Sum of 24h volumes (base units)
    pub total_volume: U512,
    /// Mean 24h price change in percent
    pub average_price_change: Decimal,
    /// Direction implied by the mean price change
    pub overall_trend: MarketTrend,
    /// Total volume divided by coin count, truncated
    pub average_trade_size: U512,
    /// Number of coins aggregated
    pub coin_count: usize,
    /// When the aggregate was computed
    pub computed_at: DateTime<Utc>,
}

/// Aggregate market conditions over `coins`, stamped with the current time
pub fn aggregate(coins: &[CoinSnapshot]) -> Result<MarketConditions, AggregateError> {
    aggregate_at(coins, Utc::now())
}

/// [`aggregate`] with an explicit computation time
pub fn aggregate_at(
    coins: &[CoinSnapshot],
    now: DateTime<Utc>,
) -> Result<MarketConditions, AggregateError> {
    if coins.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    let started = Instant::now();

    let (total_market_cap, total_volume, change_sum) = coins.iter().fold(
        (U512::ZERO, U512::ZERO, Decimal::ZERO),
        |(cap, volume, change), coin| {
            (
                cap + widen(coin.market_cap),
                volume + widen(coin.volume_24h),
                change + coin.price_change_24h,
            )
        },
    );

    let count = coins.len();
    let average_price_change = change_sum / Decimal::from(count);
    let overall_trend = trend_for(average_price_change);
    let average_trade_size = total_volume / U512::from(count);

    record_latency(LatencyMetric::Aggregation, started.elapsed());
    set_gauge(GaugeMetric::AggregatedCoins, count as f64);
    set_gauge(
        GaugeMetric::AveragePriceChange,
        average_price_change.to_f64().unwrap_or(0.0),
    );
    tracing::debug!(
        coins = count,
        %average_price_change,
        ?overall_trend,
        "Market conditions aggregated"
    );

    Ok(MarketConditions {
        total_market_cap,
        total_volume,
        average_price_change,
        overall_trend,
        average_trade_size,
        coin_count: count,
        computed_at: now,
    })
}

/// Trend implied by an average 24h price change
pub fn trend_for(average_price_change: Decimal) -> MarketTrend {
    if average_price_change > TREND_THRESHOLD {
        MarketTrend::Bullish
    } else if average_price_change < -TREND_THRESHOLD {
        MarketTrend::Bearish
    } else {
        MarketTrend::Neutral
    }
}
