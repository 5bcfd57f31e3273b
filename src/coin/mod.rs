//! Coin snapshot module
//!
//! The immutable record a data collaborator hands to the engine for one
//! evaluation cycle.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::curve::CurveError;
use crate::units;

/// Raw statistics for a single creator coin
///
/// Amounts are 18-decimal base units. Nothing here is mutated by the engine;
/// callers build a fresh snapshot for every evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinSnapshot {
    /// Ticker or display name
    #[serde(default)]
    pub symbol: String,

    /// Tokens currently in circulation
    pub circulating_supply: U256,

    /// Total token supply; must exceed `circulating_supply`
    pub total_supply: U256,

    /// Market capitalisation
    pub market_cap: U256,

    /// Traded volume over the last 24 hours
    pub volume_24h: U256,

    /// Price change over the last 24 hours in percent (12.5 = +12.5%)
    pub price_change_24h: Decimal,

    /// Time of the most recent trade, if any
    #[serde(default)]
    pub last_trade_at: Option<DateTime<Utc>>,

    /// Current price quoted by the external AMM (×10^18)
    #[serde(default)]
    pub amm_price: Option<U256>,
}

impl CoinSnapshot {
    /// Create a snapshot with no trading activity
    pub fn new(symbol: impl Into<String>, circulating_supply: U256, total_supply: U256) -> Self {
        Self {
            symbol: symbol.into(),
            circulating_supply,
            total_supply,
            market_cap: U256::ZERO,
            volume_24h: U256::ZERO,
            price_change_24h: Decimal::ZERO,
            last_trade_at: None,
            amm_price: None,
        }
    }

    /// Set market cap and 24h volume
    pub fn with_activity(mut self, market_cap: U256, volume_24h: U256) -> Self {
        self.market_cap = market_cap;
        self.volume_24h = volume_24h;
        self
    }

    /// Set the 24h price change in percent
    pub fn with_price_change(mut self, price_change_24h: Decimal) -> Self {
        self.price_change_24h = price_change_24h;
        self
    }

    /// Set the last trade timestamp
    pub fn with_last_trade(mut self, at: DateTime<Utc>) -> Self {
        self.last_trade_at = Some(at);
        self
    }

    /// Set the external AMM price
    pub fn with_amm_price(mut self, price: U256) -> Self {
        self.amm_price = Some(price);
        self
    }

    /// Check the supply invariant `circulating_supply < total_supply`
    pub fn validate(&self) -> Result<(), CurveError> {
        if self.circulating_supply >= self.total_supply {
            return Err(CurveError::InvalidSupply {
                supply: self.circulating_supply,
                cap: self.total_supply,
            });
        }
        Ok(())
    }

    /// 24h volume in whole coins
    pub fn volume_whole(&self) -> f64 {
        units::to_whole_units(self.volume_24h)
    }

    /// Market cap in whole coins
    pub fn market_cap_whole(&self) -> f64 {
        units::to_whole_units(self.market_cap)
    }

    /// 24h price change as a float percentage
    pub fn price_change_pct(&self) -> f64 {
        self.price_change_24h.to_f64().unwrap_or(0.0)
    }

    /// Hours elapsed between the last trade and `now`, if a trade is known
    pub fn hours_since_last_trade(&self, now: DateTime<Utc>) -> Option<f64> {
        self.last_trade_at
            .map(|at| (now - at).num_seconds().max(0) as f64 / 3600.0)
    }
}
