//! Trade quote calculator
//!
//! Prices a trade against the bonding curve, rejects it when the price
//! impact exceeds the coin's slippage bound, and attaches fees and an
//! expiry.

use std::time::Instant;

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use rand::Rng;

use super::policy::{adjusted_max_slippage, fee_rate_bps};
use super::{QuoteError, TradeQuote};
use crate::coin::CoinSnapshot;
use crate::config::QuoteConfig;
use crate::curve::{CurveError, CurveModel};
use crate::telemetry::{increment, record_latency, CounterMetric, LatencyMetric};
use crate::units::{self, WAD};

const BPS_DENOMINATOR: u64 = 10_000;

/// Builds trade quotes on top of a [`CurveModel`]
#[derive(Debug, Clone)]
pub struct QuoteCalculator {
    curve: CurveModel,
    /// Base quote lifetime in seconds
    deadline_secs: i64,
    /// Upper bound (exclusive) of the random lifetime extension
    jitter_secs: i64,
}

impl QuoteCalculator {
    /// Create a calculator with a 30 minute lifetime and 5 minutes of jitter
    pub fn new(curve: CurveModel) -> Self {
        Self {
            curve,
            deadline_secs: 1800,
            jitter_secs: 300,
        }
    }

    /// Create from QuoteConfig
    pub fn from_config(curve: CurveModel, config: &QuoteConfig) -> Self {
        Self::new(curve).with_deadline(config.deadline_secs, config.deadline_jitter_secs)
    }

    /// Override the quote lifetime
    ///
    /// Values beyond `i64::MAX` saturate; quoting then fails with
    /// [`QuoteError::Overflow`] instead of producing a deadline.
    pub fn with_deadline(mut self, deadline_secs: u64, jitter_secs: u64) -> Self {
        self.deadline_secs = i64::try_from(deadline_secs).unwrap_or(i64::MAX);
        self.jitter_secs = i64::try_from(jitter_secs).unwrap_or(i64::MAX);
        self
    }

    /// Curve used for pricing
    pub fn curve(&self) -> &CurveModel {
        &self.curve
    }

    /// Quote a trade now, with jitter drawn from the thread RNG
    ///
    /// The curve price at zero supply is zero, so any buy against a fresh
    /// coin has unbounded relative impact and is always rejected with
    /// [`QuoteError::SlippageExceeded`]. Seed supply some other way first.
    pub fn quote(
        &self,
        current_supply: U256,
        trade_amount: U256,
        is_buy: bool,
        snapshot: Option<&CoinSnapshot>,
    ) -> Result<TradeQuote, QuoteError> {
        self.quote_with(
            current_supply,
            trade_amount,
            is_buy,
            snapshot,
            Utc::now(),
            &mut rand::thread_rng(),
        )
    }

    /// Quote a trade with an explicit clock and random source
    ///
    /// The deadline jitter makes expiry times harder to predict. It is a
    /// weak heuristic against front-running, not a security control, and
    /// `rng` need not be cryptographically secure.
    pub fn quote_with<R: Rng>(
        &self,
        current_supply: U256,
        trade_amount: U256,
        is_buy: bool,
        snapshot: Option<&CoinSnapshot>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<TradeQuote, QuoteError> {
        let started = Instant::now();
        let result = self.build_quote(current_supply, trade_amount, is_buy, snapshot, now, rng);
        record_latency(LatencyMetric::Quote, started.elapsed());

        match &result {
            Ok(quote) => {
                increment(CounterMetric::QuotesIssued);
                tracing::debug!(
                    quote_id = %quote.id,
                    is_buy,
                    %trade_amount,
                    price_impact = quote.price_impact,
                    fee_bps = quote.fee_bps,
                    "Quote issued"
                );
            }
            Err(QuoteError::SlippageExceeded {
                price_impact,
                max_slippage,
            }) => {
                increment(CounterMetric::QuotesSlippageRejected);
                tracing::warn!(
                    is_buy,
                    %trade_amount,
                    price_impact,
                    max_slippage,
                    "Quote rejected: slippage exceeded"
                );
            }
            Err(e) => {
                increment(CounterMetric::QuotesInvalidTrade);
                tracing::warn!(is_buy, %trade_amount, error = %e, "Quote rejected");
            }
        }

        result
    }

    fn build_quote<R: Rng>(
        &self,
        current_supply: U256,
        trade_amount: U256,
        is_buy: bool,
        snapshot: Option<&CoinSnapshot>,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<TradeQuote, QuoteError> {
        let new_supply = self.new_supply(current_supply, trade_amount, is_buy)?;

        let current_price = self.curve.price_at(current_supply, snapshot, now)?;
        let new_price = self.curve.price_at(new_supply, snapshot, now)?;
        let price_impact = impact_between(current_price, new_price, is_buy);

        let max_slippage = adjusted_max_slippage(self.curve.params().max_slippage, snapshot);
        if price_impact > max_slippage {
            return Err(QuoteError::SlippageExceeded {
                price_impact,
                max_slippage,
            });
        }

        // Both sides value the trade at the pre-trade price
        let output_amount = trade_amount
            .checked_mul(current_price)
            .ok_or(QuoteError::Overflow)?
            / WAD;

        let fee_bps = fee_rate_bps(snapshot);
        let fee = output_amount
            .checked_mul(U256::from(fee_bps))
            .ok_or(QuoteError::Overflow)?
            / U256::from(BPS_DENOMINATOR);
        let minimum_received = output_amount - fee;

        let jitter = if self.jitter_secs > 0 {
            rng.gen_range(0..self.jitter_secs)
        } else {
            0
        };
        let deadline = now
            .timestamp()
            .checked_add(self.deadline_secs)
            .and_then(|t| t.checked_add(jitter))
            .ok_or(QuoteError::Overflow)?;

        Ok(TradeQuote {
            id: uuid::Builder::from_random_bytes(rng.gen()).into_uuid(),
            is_buy,
            input_amount: trade_amount,
            output_amount,
            fee,
            fee_bps,
            minimum_received,
            price_impact,
            deadline,
        })
    }

    /// Price impact of a trade without building a full quote
    pub fn price_impact(
        &self,
        current_supply: U256,
        trade_amount: U256,
        is_buy: bool,
        snapshot: Option<&CoinSnapshot>,
    ) -> Result<f64, QuoteError> {
        self.price_impact_at(current_supply, trade_amount, is_buy, snapshot, Utc::now())
    }

    /// [`Self::price_impact`] with an explicit evaluation time
    pub fn price_impact_at(
        &self,
        current_supply: U256,
        trade_amount: U256,
        is_buy: bool,
        snapshot: Option<&CoinSnapshot>,
        now: DateTime<Utc>,
    ) -> Result<f64, QuoteError> {
        let new_supply = self.new_supply(current_supply, trade_amount, is_buy)?;
        let current_price = self.curve.price_at(current_supply, snapshot, now)?;
        let new_price = self.curve.price_at(new_supply, snapshot, now)?;
        Ok(impact_between(current_price, new_price, is_buy))
    }

    /// Largest trade whose resulting price stays within `max_impact`
    ///
    /// Binary search over `[0, cap - supply)`; valid because the curve is
    /// non-decreasing in supply. A price too large for 256 bits is above
    /// any target.
    pub fn optimal_trade_size(
        &self,
        supply: U256,
        max_impact: f64,
        snapshot: Option<&CoinSnapshot>,
    ) -> Result<U256, CurveError> {
        self.optimal_trade_size_at(supply, max_impact, snapshot, Utc::now())
    }

    /// [`Self::optimal_trade_size`] with an explicit evaluation time
    pub fn optimal_trade_size_at(
        &self,
        supply: U256,
        max_impact: f64,
        snapshot: Option<&CoinSnapshot>,
        now: DateTime<Utc>,
    ) -> Result<U256, CurveError> {
        let current_price = self.curve.price_at(supply, snapshot, now)?;
        let ceiling = units::to_f64(current_price) * (1.0 + max_impact.max(0.0));
        let target = units::floor_to_u256(ceiling);

        let one = U256::from(1u64);
        let mut lo = U256::ZERO;
        let mut hi = self.curve.cap() - supply - one;
        let mut best = U256::ZERO;

        while lo <= hi {
            let mid = lo + (hi - lo) / U256::from(2u64);
            let within = match self.curve.price_at(supply + mid, snapshot, now) {
                Ok(price) => price <= target,
                Err(CurveError::PriceOverflow { .. }) => false,
                Err(e) => return Err(e),
            };
            if within {
                best = mid;
                lo = mid + one;
            } else if mid.is_zero() {
                break;
            } else {
                hi = mid - one;
            }
        }

        tracing::debug!(%supply, max_impact, %best, "Optimal trade size found");
        Ok(best)
    }

    fn new_supply(
        &self,
        current_supply: U256,
        trade_amount: U256,
        is_buy: bool,
    ) -> Result<U256, QuoteError> {
        if is_buy {
            let cap = self.curve.cap();
            match current_supply.checked_add(trade_amount) {
                Some(new_supply) if new_supply < cap => Ok(new_supply),
                _ => Err(QuoteError::InvalidTrade(format!(
                    "buying {trade_amount} at supply {current_supply} reaches cap {cap}"
                ))),
            }
        } else {
            current_supply.checked_sub(trade_amount).ok_or_else(|| {
                QuoteError::InvalidTrade(format!(
                    "selling {trade_amount} exceeds supply {current_supply}"
                ))
            })
        }
    }
}

/// Relative price move, positive when the trade moves price against the trader
///
/// A move away from a zero price is unbounded in relative terms.
fn impact_between(current_price: U256, new_price: U256, is_buy: bool) -> f64 {
    let (from, to) = if is_buy {
        (current_price, new_price)
    } else {
        (new_price, current_price)
    };
    let delta = if to >= from {
        units::to_f64(to - from)
    } else {
        -units::to_f64(from - to)
    };

    if current_price.is_zero() {
        return if delta == 0.0 { 0.0 } else { f64::INFINITY };
    }
    delta / units::to_f64(current_price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveParameters;
    use crate::units::from_whole_units;
    use chrono::Duration;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn calculator() -> QuoteCalculator {
        let params = CurveParameters::new(0.0001, U256::from(1_000_000_000u64), 0.05);
        QuoteCalculator::new(CurveModel::new(params).unwrap())
    }

    fn supply(n: u64) -> U256 {
        U256::from(n)
    }

    fn seeded_buy(calc: &QuoteCalculator, now: DateTime<Utc>, seed: u64) -> TradeQuote {
        let mut rng = StdRng::seed_from_u64(seed);
        calc.quote_with(supply(100_000_000), supply(1_000), true, None, now, &mut rng)
            .unwrap()
    }

    #[test]
    fn test_buy_quote_fields() {
        let calc = calculator();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(7);

        let quote = calc
            .quote_with(supply(100_000_000), supply(1_000), true, None, now, &mut rng)
            .unwrap();

        let current_price = calc.curve().price_at(supply(100_000_000), None, now).unwrap();
        let expected_output = supply(1_000) * current_price / WAD;

        assert!(quote.is_buy);
        assert_eq!(quote.input_amount, supply(1_000));
        assert_eq!(quote.output_amount, expected_output);
        assert_eq!(quote.fee_bps, 100);
        assert_eq!(quote.fee, expected_output / U256::from(100u64));
        assert_eq!(quote.minimum_received, quote.output_amount - quote.fee);
        assert!(quote.price_impact > 0.0);
    }

    #[test]
    fn test_deadline_window() {
        let calc = calculator();
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..50 {
            let quote = calc
                .quote_with(supply(100_000_000), supply(1_000), true, None, now, &mut rng)
                .unwrap();
            let lifetime = quote.deadline - now.timestamp();
            assert!((1800..2100).contains(&lifetime), "lifetime {lifetime}");
        }
    }

    #[test]
    fn test_seeded_quotes_are_deterministic() {
        let calc = calculator();
        let now = Utc::now();

        let a = seeded_buy(&calc, now, 42);
        let b = seeded_buy(&calc, now, 42);
        assert_eq!(a, b);

        let c = seeded_buy(&calc, now, 43);
        assert_ne!(a.id, c.id);
    }

    #[test]
    fn test_no_jitter_gives_fixed_deadline() {
        let calc = calculator().with_deadline(600, 0);
        let now = Utc::now();
        let quote = seeded_buy(&calc, now, 3);
        assert_eq!(quote.deadline, now.timestamp() + 600);
    }

    #[test]
    fn test_deadline_overflow_is_an_error() {
        let now = Utc::now();
        let mut rng = StdRng::seed_from_u64(5);

        for deadline in [i64::MAX as u64, u64::MAX] {
            let calc = calculator().with_deadline(deadline, 0);
            let result =
                calc.quote_with(supply(100_000_000), supply(1_000), true, None, now, &mut rng);
            assert_eq!(result, Err(QuoteError::Overflow));
        }
    }

    #[test]
    fn test_price_impact_at_is_deterministic() {
        let params = CurveParameters::new(0.0001, from_whole_units(1_000_000_000), 0.05);
        let calc = QuoteCalculator::new(CurveModel::new(params).unwrap());
        let now = Utc::now();
        let start = from_whole_units(100_000_000);
        let amount = from_whole_units(1_000_000);

        let idle = CoinSnapshot::new("IDLE", start, from_whole_units(1_000_000_000))
            .with_activity(from_whole_units(10), from_whole_units(50))
            .with_last_trade(now - Duration::hours(72));

        let a = calc.price_impact_at(start, amount, true, Some(&idle), now).unwrap();
        let b = calc.price_impact_at(start, amount, true, Some(&idle), now).unwrap();
        assert_eq!(a, b);
        assert!(a > 0.0);

        let later = now + Duration::days(30);
        let c = calc.price_impact_at(start, amount, true, Some(&idle), later).unwrap();
        assert!(c > 0.0);
    }

    #[test]
    fn test_optimal_trade_size_on_steep_curve() {
        let mut params = CurveParameters::new_coin();
        params.base_k = 1e10;
        let calc = QuoteCalculator::new(CurveModel::new(params).unwrap());
        let now = Utc::now();
        let start = from_whole_units(500_000_000);

        let size = calc.optimal_trade_size_at(start, 0.02, None, now).unwrap();
        assert!(size > U256::ZERO);
        assert!(calc.curve().price_at(start + size, None, now).is_ok());
    }

    #[test]
    fn test_impact_from_zero_supply_is_positive() {
        let calc = calculator();
        let impact = calc.price_impact(U256::ZERO, supply(1_000), true, None).unwrap();
        assert!(impact > 0.0);

        // Unbounded relative move cannot fit any slippage bound
        match calc.quote(U256::ZERO, supply(1_000), true, None) {
            Err(QuoteError::SlippageExceeded { price_impact, .. }) => assert!(price_impact > 0.0),
            other => panic!("expected slippage error, got {other:?}"),
        }
    }

    #[test]
    fn test_sell_back_impact_not_above_buy_impact() {
        let calc = calculator();
        let start = supply(100_000_000);
        let amount = supply(1_000_000);

        let buy = calc.quote(start, amount, true, None).unwrap();
        let sell = calc.quote(start + amount, amount, false, None).unwrap();

        assert!(buy.price_impact > 0.0);
        assert!(sell.price_impact > 0.0);
        assert!(sell.price_impact <= buy.price_impact);
    }

    #[test]
    fn test_slippage_enforced_near_cap() {
        let calc = calculator();
        let result = calc.quote(supply(100_000_000), supply(890_000_000), true, None);
        assert!(matches!(result, Err(QuoteError::SlippageExceeded { .. })));
    }

    #[test]
    fn test_invalid_trades() {
        let calc = calculator();

        let oversell = calc.quote(supply(1_000), supply(1_001), false, None);
        assert!(matches!(oversell, Err(QuoteError::InvalidTrade(_))));

        let to_cap = calc.quote(supply(999_999_000), supply(1_000), true, None);
        assert!(matches!(to_cap, Err(QuoteError::InvalidTrade(_))));

        let overflow = calc.quote(supply(1), U256::MAX, true, None);
        assert!(matches!(overflow, Err(QuoteError::InvalidTrade(_))));
    }

    #[test]
    fn test_supply_beyond_cap_is_curve_error() {
        let calc = calculator();
        let result = calc.quote(supply(2_000_000_000), supply(10), false, None);
        assert!(matches!(
            result,
            Err(QuoteError::Curve(CurveError::InvalidSupply { .. }))
        ));
    }

    #[test]
    fn test_snapshot_drives_fee_rate() {
        let params = CurveParameters::new(0.0001, from_whole_units(1_000_000_000), 0.05);
        let calc = QuoteCalculator::new(CurveModel::new(params).unwrap());
        let snapshot = CoinSnapshot::new(
            "LIQ",
            from_whole_units(100_000_000),
            from_whole_units(1_000_000_000),
        )
        .with_activity(from_whole_units(50_000), from_whole_units(5_000));

        let quote = calc
            .quote(from_whole_units(100_000_000), from_whole_units(1), true, Some(&snapshot))
            .unwrap();
        assert_eq!(quote.fee_bps, 50);
    }

    #[test]
    fn test_optimal_trade_size_respects_bound() {
        let calc = calculator();
        let now = Utc::now();
        let start = supply(100_000_000);
        let max_impact = 0.04;

        let size = calc.optimal_trade_size_at(start, max_impact, None, now).unwrap();
        assert!(size > U256::ZERO);

        let current = calc.curve().price_at(start, None, now).unwrap();
        let target = units::floor_to_u256(units::to_f64(current) * (1.0 + max_impact));
        let at_size = calc.curve().price_at(start + size, None, now).unwrap();
        let past_size = calc
            .curve()
            .price_at(start + size + U256::from(1u64), None, now)
            .unwrap();

        assert!(at_size <= target);
        assert!(past_size > target);

        // The found size is quotable under the default 5% bound
        assert!(calc.quote(start, size, true, None).is_ok());
    }

    #[test]
    fn test_optimal_trade_size_rejects_full_supply() {
        let calc = calculator();
        assert!(calc
            .optimal_trade_size(supply(1_000_000_000), 0.01, None)
            .is_err());
    }

    #[test]
    fn test_quote_expiry() {
        let calc = calculator();
        let now = Utc::now();
        let quote = seeded_buy(&calc, now, 9);

        assert!(!quote.is_expired(now));
        assert!(quote.seconds_remaining(now) >= 1800);
        assert!(quote.is_expired(now + Duration::hours(1)));
        assert_eq!(quote.seconds_remaining(now + Duration::hours(1)), 0);
    }
}
