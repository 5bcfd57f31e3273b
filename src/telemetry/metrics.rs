//! Prometheus metrics

use std::time::Duration;

/// Latency metric types
#[derive(Debug, Clone, Copy)]
pub enum LatencyMetric {
    /// Trade quote construction
    Quote,
    /// Market score computation
    Scoring,
    /// Market aggregation over a batch of coins
    Aggregation,
}

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Curve prices computed
    PricesComputed,
    /// Quotes handed back to callers
    QuotesIssued,
    /// Quotes refused for exceeding the slippage bound
    QuotesSlippageRejected,
    /// Quotes refused for pushing supply out of range
    QuotesInvalidTrade,
    /// Market scores produced
    ScoresProduced,
}

/// Gauge metric types
#[derive(Debug, Clone, Copy)]
pub enum GaugeMetric {
    /// Coins in the latest aggregation
    AggregatedCoins,
    /// Average 24h price change of the latest aggregation
    AveragePriceChange,
}

fn latency_name(metric: LatencyMetric) -> &'static str {
    match metric {
        LatencyMetric::Quote => "creator_curve_quote_latency_us",
        LatencyMetric::Scoring => "creator_curve_scoring_latency_us",
        LatencyMetric::Aggregation => "creator_curve_aggregation_latency_us",
    }
}

fn counter_name(metric: CounterMetric) -> &'static str {
    match metric {
        CounterMetric::PricesComputed => "creator_curve_prices_computed_total",
        CounterMetric::QuotesIssued => "creator_curve_quotes_issued_total",
        CounterMetric::QuotesSlippageRejected => "creator_curve_quotes_slippage_rejected_total",
        CounterMetric::QuotesInvalidTrade => "creator_curve_quotes_invalid_trade_total",
        CounterMetric::ScoresProduced => "creator_curve_scores_produced_total",
    }
}

fn gauge_name(metric: GaugeMetric) -> &'static str {
    match metric {
        GaugeMetric::AggregatedCoins => "creator_curve_aggregated_coins",
        GaugeMetric::AveragePriceChange => "creator_curve_average_price_change_pct",
    }
}

/// Record a latency measurement
pub fn record_latency(metric: LatencyMetric, duration: Duration) {
    metrics::histogram!(latency_name(metric)).record(duration.as_secs_f64() * 1_000_000.0);
}

/// Increment a counter by one
pub fn increment(metric: CounterMetric) {
    metrics::counter!(counter_name(metric)).increment(1);
}

/// Set a gauge value
pub fn set_gauge(metric: GaugeMetric, value: f64) {
    metrics::gauge!(gauge_name(metric)).set(value);
}
