//! Supply-to-price bonding curve
//!
//! price = k * supply^2 / (cap - supply)
//!
//! The curve is convex and strictly increasing on [0, cap) and diverges at
//! the cap, so exhausting the supply prices itself out. `k` is recomputed per
//! evaluation from the coin's recent activity.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};

use super::{CurveError, CurveParameters};
use crate::coin::CoinSnapshot;
use crate::telemetry::{increment, CounterMetric};
use crate::units;

/// Volume (whole coins) above which k is boosted
const HIGH_VOLUME: f64 = 100.0;
/// Volume (whole coins) below which k is dampened
const LOW_VOLUME: f64 = 1.0;
const HIGH_VOLUME_FACTOR: f64 = 1.2;
const LOW_VOLUME_FACTOR: f64 = 0.8;

/// Inactivity (hours) before time decay kicks in
const DECAY_AFTER_HOURS: f64 = 24.0;

/// Market cap (whole coins) above which popularity boosts k
const POPULAR_MARKET_CAP: f64 = 1000.0;
const POPULARITY_FACTOR: f64 = 1.1;

/// Lowest k as a fraction of base k
const MIN_K_RATIO: f64 = 0.1;

/// Bonding curve pricing model
#[derive(Debug, Clone)]
pub struct CurveModel {
    params: CurveParameters,
}

impl CurveModel {
    /// Create a curve after validating its parameters
    pub fn new(params: CurveParameters) -> Result<Self, CurveError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Parameters this curve prices with
    pub fn params(&self) -> &CurveParameters {
        &self.params
    }

    /// Supply cap of the curve
    pub fn cap(&self) -> U256 {
        self.params.total_supply_cap
    }

    /// Effective k for a snapshot evaluated at `now`
    ///
    /// Without a snapshot there is nothing to adjust and base k is returned.
    /// The result never drops below `base_k * 0.1`.
    pub fn dynamic_k_at(&self, snapshot: Option<&CoinSnapshot>, now: DateTime<Utc>) -> f64 {
        let base_k = self.params.base_k;
        let Some(snapshot) = snapshot else {
            return base_k;
        };

        let volume = snapshot.volume_whole();
        let volume_factor = if volume > HIGH_VOLUME {
            HIGH_VOLUME_FACTOR
        } else if volume < LOW_VOLUME {
            LOW_VOLUME_FACTOR
        } else {
            1.0
        };

        let decay_factor = match snapshot.hours_since_last_trade(now) {
            Some(hours) if hours > DECAY_AFTER_HOURS => {
                let idle_days = (hours / DECAY_AFTER_HOURS).floor();
                self.params.time_decay_factor.powf(idle_days)
            }
            _ => 1.0,
        };

        let popularity_factor = if snapshot.market_cap_whole() > POPULAR_MARKET_CAP {
            POPULARITY_FACTOR
        } else {
            1.0
        };

        let k = base_k * volume_factor * decay_factor * popularity_factor;
        k.max(base_k * MIN_K_RATIO)
    }

    /// Price at `supply`, scaled ×10^18
    pub fn price(&self, supply: U256, snapshot: Option<&CoinSnapshot>) -> Result<U256, CurveError> {
        self.price_at(supply, snapshot, Utc::now())
    }

    /// Price at `supply` with an explicit evaluation time
    ///
    /// Fails with [`CurveError::PriceOverflow`] when the scaled price does
    /// not fit in a `U256`, which steep curves reach close to the cap.
    pub fn price_at(
        &self,
        supply: U256,
        snapshot: Option<&CoinSnapshot>,
        now: DateTime<Utc>,
    ) -> Result<U256, CurveError> {
        let cap = self.params.total_supply_cap;
        if supply >= cap {
            return Err(CurveError::InvalidSupply { supply, cap });
        }

        let k = self.dynamic_k_at(snapshot, now);
        let s = units::to_f64(supply);
        let remaining = units::to_f64(cap - supply);

        let price = k * s * s / remaining
            * self.params.creator_multiplier
            * self.params.volume_multiplier;

        increment(CounterMetric::PricesComputed);
        tracing::trace!(%supply, dynamic_k = k, price, "Curve price computed");

        units::checked_floor_to_u256(price * units::SCALE_F64)
            .ok_or(CurveError::PriceOverflow { supply })
    }
}
