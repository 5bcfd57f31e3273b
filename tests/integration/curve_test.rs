//! Integration tests for the bonding curve

use alloy_primitives::U256;
use chrono::{Duration, Utc};
use creator_curve::coin::CoinSnapshot;
use creator_curve::curve::{CurveError, CurveModel, CurveParameters, CurveProfile};
use creator_curve::units::from_whole_units;
use rust_decimal_macros::dec;

fn scenario_params() -> CurveParameters {
    CurveParameters::new(0.0001, U256::from(1_000_000_000u64), 0.05)
}

#[test]
fn test_scenario_prices() {
    let curve = CurveModel::new(scenario_params()).unwrap();

    assert_eq!(curve.price(U256::ZERO, None).unwrap(), U256::ZERO);
    let at_100m = curve.price(U256::from(100_000_000u64), None).unwrap();
    let at_500m = curve.price(U256::from(500_000_000u64), None).unwrap();
    assert!(at_500m > at_100m);
}

#[test]
fn test_boundary_rejected() {
    let curve = CurveModel::new(scenario_params()).unwrap();
    let cap = U256::from(1_000_000_000u64);

    for supply in [cap, cap + U256::from(1u64), U256::MAX] {
        assert!(matches!(
            curve.price(supply, None),
            Err(CurveError::InvalidSupply { .. })
        ));
    }
}

#[test]
fn test_monotonic_with_fixed_snapshot() {
    let curve = CurveModel::new(CurveParameters::new_coin()).unwrap();
    let now = Utc::now();
    let snapshot = CoinSnapshot::new(
        "MONO",
        from_whole_units(1_000_000),
        from_whole_units(1_000_000_000),
    )
    .with_activity(from_whole_units(5_000), from_whole_units(250))
    .with_price_change(dec!(3.2))
    .with_last_trade(now - Duration::hours(30));

    let mut previous = U256::ZERO;
    for millions in [1u64, 5, 20, 100, 400, 800, 999] {
        let price = curve
            .price_at(from_whole_units(millions * 1_000_000), Some(&snapshot), now)
            .unwrap();
        assert!(price > previous, "price at {millions}M not increasing");
        previous = price;
    }
}

#[test]
fn test_profiles_price_differently() {
    let supply = from_whole_units(50_000_000);
    let new_coin = CurveModel::new(CurveProfile::NewCoin.preset()).unwrap();
    let established = CurveModel::new(CurveProfile::Established.preset()).unwrap();

    assert_ne!(
        new_coin.price(supply, None).unwrap(),
        established.price(supply, None).unwrap()
    );
}

#[test]
fn test_curve_shared_across_threads() {
    let curve = std::sync::Arc::new(CurveModel::new(scenario_params()).unwrap());
    let expected = curve.price(U256::from(250_000_000u64), None).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let curve = curve.clone();
            std::thread::spawn(move || curve.price(U256::from(250_000_000u64), None).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
