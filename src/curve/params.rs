//! Curve parameters and profiles

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::CurveError;
use crate::coin::CoinSnapshot;
use crate::units;

/// Whole-coin market cap from which a coin counts as established
pub const ESTABLISHED_MARKET_CAP: f64 = 1000.0;

/// Tuning for one bonding curve profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveParameters {
    /// Base price-sensitivity constant
    pub base_k: f64,
    /// Supply at which the curve diverges (base units)
    pub total_supply_cap: U256,
    /// Largest acceptable price impact before adjustments
    pub max_slippage: f64,
    /// Multiplier rewarding the coin creator
    #[serde(default = "default_multiplier")]
    pub creator_multiplier: f64,
    /// Multiplier applied after the creator multiplier
    #[serde(default = "default_multiplier")]
    pub volume_multiplier: f64,
    /// Decay applied to k per full day without trades
    #[serde(default = "default_time_decay")]
    pub time_decay_factor: f64,
}

fn default_multiplier() -> f64 {
    1.0
}
fn default_time_decay() -> f64 {
    0.95
}

impl CurveParameters {
    /// Create parameters with neutral multipliers
    pub fn new(base_k: f64, total_supply_cap: U256, max_slippage: f64) -> Self {
        Self {
            base_k,
            total_supply_cap,
            max_slippage,
            creator_multiplier: default_multiplier(),
            volume_multiplier: default_multiplier(),
            time_decay_factor: default_time_decay(),
        }
    }

    /// Preset for freshly launched coins: steeper curve, wider slippage
    pub fn new_coin() -> Self {
        Self {
            base_k: 0.0001,
            total_supply_cap: units::from_whole_units(1_000_000_000),
            max_slippage: 0.05,
            creator_multiplier: 1.0,
            volume_multiplier: 1.0,
            time_decay_factor: 0.95,
        }
    }

    /// Preset for coins with an established market
    pub fn established_coin() -> Self {
        Self {
            base_k: 0.00005,
            total_supply_cap: units::from_whole_units(1_000_000_000),
            max_slippage: 0.03,
            creator_multiplier: 1.05,
            volume_multiplier: 1.1,
            time_decay_factor: 0.98,
        }
    }

    /// Check every field against its allowed range
    pub fn validate(&self) -> Result<(), CurveError> {
        if !(self.base_k.is_finite() && self.base_k > 0.0) {
            return Err(CurveError::InvalidParameters(format!(
                "base_k must be positive, got {}",
                self.base_k
            )));
        }
        if self.total_supply_cap.is_zero() {
            return Err(CurveError::InvalidParameters(
                "total_supply_cap must be non-zero".to_string(),
            ));
        }
        if !(self.max_slippage > 0.0 && self.max_slippage < 1.0) {
            return Err(CurveError::InvalidParameters(format!(
                "max_slippage must be in (0, 1), got {}",
                self.max_slippage
            )));
        }
        for (name, value) in [
            ("creator_multiplier", self.creator_multiplier),
            ("volume_multiplier", self.volume_multiplier),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(CurveError::InvalidParameters(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if !(self.time_decay_factor > 0.0 && self.time_decay_factor <= 1.0) {
            return Err(CurveError::InvalidParameters(format!(
                "time_decay_factor must be in (0, 1], got {}",
                self.time_decay_factor
            )));
        }
        Ok(())
    }
}

impl Default for CurveParameters {
    fn default() -> Self {
        Self::new_coin()
    }
}

/// Which parameter preset a coin is priced with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurveProfile {
    /// Young coin with little market history
    NewCoin,
    /// Coin with a sizeable market cap
    Established,
}

impl CurveProfile {
    /// Pick the profile matching a snapshot's market cap
    pub fn for_snapshot(snapshot: &CoinSnapshot) -> Self {
        if snapshot.market_cap_whole() >= ESTABLISHED_MARKET_CAP {
            CurveProfile::Established
        } else {
            CurveProfile::NewCoin
        }
    }

    /// Built-in parameters for this profile
    pub fn preset(self) -> CurveParameters {
        match self {
            CurveProfile::NewCoin => CurveParameters::new_coin(),
            CurveProfile::Established => CurveParameters::established_coin(),
        }
    }
}
