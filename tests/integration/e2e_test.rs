//! End-to-end integration tests

use alloy_primitives::U256;
use chrono::{Duration, Utc};
use creator_curve::aggregate::{aggregate, MarketTrend};
use creator_curve::coin::CoinSnapshot;
use creator_curve::config::Config;
use creator_curve::curve::{CurveModel, CurveProfile};
use creator_curve::quote::QuoteCalculator;
use creator_curve::scoring::{MarketScorer, Recommendation, RiskLevel};
use creator_curve::units::{from_whole_units, widen};
use rust_decimal_macros::dec;

const EXAMPLE_CONFIG: &str = include_str!("../../config.toml.example");

#[test]
fn test_config_example_loads() {
    let config = Config::parse(EXAMPLE_CONFIG).unwrap();
    assert!(config.curve.new_coin.max_slippage > config.curve.established.max_slippage);
    assert_eq!(config.quote.deadline_secs, 1800);
}

#[test]
fn test_snapshot_through_every_component() {
    let config = Config::parse(EXAMPLE_CONFIG).unwrap();
    let now = Utc::now();

    let snapshot = CoinSnapshot::new(
        "CREATE",
        from_whole_units(10_000_000),
        from_whole_units(1_000_000_000),
    )
    .with_activity(from_whole_units(4_000), from_whole_units(800))
    .with_price_change(dec!(4))
    .with_last_trade(now - Duration::minutes(20));

    let profile = CurveProfile::for_snapshot(&snapshot);
    assert_eq!(profile, CurveProfile::Established);
    let curve = CurveModel::new(config.curve.params_for(profile).clone()).unwrap();

    // Put the AMM well below the curve so the scorer wants to buy
    let curve_price = curve
        .price_at(snapshot.circulating_supply, Some(&snapshot), now)
        .unwrap();
    let snapshot = snapshot.with_amm_price(curve_price * U256::from(3u64) / U256::from(4u64));

    let score = MarketScorer::new(curve.clone()).score_at(&snapshot, now);
    assert_eq!(score.recommendation, Recommendation::Buy);
    assert_eq!(score.risk_level, RiskLevel::Low);
    assert_eq!(score.risk_factors, vec!["Stable market conditions".to_string()]);

    let calc = QuoteCalculator::from_config(curve, &config.quote);
    let quote = calc
        .quote(
            snapshot.circulating_supply,
            from_whole_units(1_000),
            true,
            Some(&snapshot),
        )
        .unwrap();
    assert_eq!(quote.fee_bps, 75);
    assert!(quote.minimum_received < quote.output_amount);
    assert!(!quote.is_expired(Utc::now()));
}

#[test]
fn test_extreme_move_is_high_risk() {
    let config = Config::default();
    let snapshot = CoinSnapshot::new(
        "PUMP",
        from_whole_units(1_000),
        from_whole_units(1_000_000_000),
    )
    .with_activity(from_whole_units(50), from_whole_units(20))
    .with_price_change(dec!(60));

    let curve = CurveModel::new(config.curve.new_coin.clone()).unwrap();
    let score = MarketScorer::new(curve).score(&snapshot);

    assert_eq!(score.risk_level, RiskLevel::High);
    assert!(score
        .risk_factors
        .iter()
        .any(|f| f.to_lowercase().contains("extreme price movement")));
}

#[test]
fn test_aggregate_market() {
    let coins: Vec<CoinSnapshot> = [(dec!(12), 100u64), (dec!(8), 300), (dec!(-2), 200)]
        .into_iter()
        .map(|(change, volume)| {
            CoinSnapshot::new("AGG", from_whole_units(1), from_whole_units(10))
                .with_activity(from_whole_units(volume * 10), from_whole_units(volume))
                .with_price_change(change)
        })
        .collect();

    let conditions = aggregate(&coins).unwrap();
    assert_eq!(conditions.total_volume, widen(from_whole_units(600)));
    assert_eq!(conditions.total_market_cap, widen(from_whole_units(6_000)));
    assert_eq!(conditions.average_trade_size, widen(from_whole_units(200)));
    assert_eq!(conditions.average_price_change, dec!(6));
    assert_eq!(conditions.overall_trend, MarketTrend::Bullish);
}
