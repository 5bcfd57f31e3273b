//! Integration tests for trade quotes

use alloy_primitives::U256;
use chrono::Utc;
use creator_curve::coin::CoinSnapshot;
use creator_curve::curve::{CurveModel, CurveParameters};
use creator_curve::quote::{QuoteCalculator, QuoteError};
use creator_curve::units::from_whole_units;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn calculator() -> QuoteCalculator {
    let params = CurveParameters::new(0.0001, U256::from(1_000_000_000u64), 0.05);
    QuoteCalculator::new(CurveModel::new(params).unwrap())
}

#[test]
fn test_buy_from_empty_supply_has_positive_impact() {
    let impact = calculator()
        .price_impact(U256::ZERO, U256::from(1_000u64), true, None)
        .unwrap();
    assert!(impact > 0.0);
}

#[test]
fn test_round_trip_impacts() {
    let calc = calculator();
    let start = U256::from(200_000_000u64);
    let amount = U256::from(2_000_000u64);

    let buy = calc.quote(start, amount, true, None).unwrap();
    let sell = calc.quote(start + amount, amount, false, None).unwrap();

    assert!(buy.price_impact > 0.0);
    assert!(sell.price_impact > 0.0);
    assert!(sell.price_impact <= buy.price_impact);
}

#[test]
fn test_pathological_trade_exceeds_slippage() {
    let result = calculator().quote(
        U256::from(10_000_000u64),
        U256::from(985_000_000u64),
        true,
        None,
    );
    assert!(matches!(result, Err(QuoteError::SlippageExceeded { .. })));
}

#[test]
fn test_deterministic_with_seeded_rng() {
    let calc = calculator();
    let now = Utc::now();
    let snapshot = CoinSnapshot::new(
        "SEED",
        U256::from(300_000_000u64),
        U256::from(1_000_000_000u64),
    )
    .with_activity(from_whole_units(20), from_whole_units(150));

    let quote = |seed| {
        calc.quote_with(
            snapshot.circulating_supply,
            U256::from(10_000u64),
            true,
            Some(&snapshot),
            now,
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap()
    };

    assert_eq!(quote(11), quote(11));
    assert_eq!(quote(11).fee_bps, 75);
}

#[test]
fn test_optimal_size_is_quotable() {
    let calc = calculator();
    let start = U256::from(400_000_000u64);
    let size = calc.optimal_trade_size(start, 0.03, None).unwrap();

    assert!(size > U256::ZERO);
    let quote = calc.quote(start, size, true, None).unwrap();
    assert!(quote.price_impact <= 0.03 + 1e-9);
}
