//! Slippage bounds and fee schedule
//!
//! Both depend only on the coin's 24h volume and market cap, measured in
//! whole coins.

use crate::coin::CoinSnapshot;

/// Hard ceiling on the adjusted slippage bound
pub const MAX_SLIPPAGE_CEILING: f64 = 0.10;

/// Base fee rate (1%)
pub const BASE_FEE_BPS: u32 = 100;

/// Lowest fee rate (0.5%)
pub const MIN_FEE_BPS: u32 = 50;

const LIQUID_VOLUME: f64 = 100.0;
const VERY_LIQUID_VOLUME: f64 = 1000.0;
const SMALL_MARKET_CAP: f64 = 10.0;
const TINY_MARKET_CAP: f64 = 1.0;

/// Slippage bound for a trade on this coin
///
/// Liquid coins get a tighter bound, small coins a looser one, and the
/// result never exceeds [`MAX_SLIPPAGE_CEILING`].
pub fn adjusted_max_slippage(max_slippage: f64, snapshot: Option<&CoinSnapshot>) -> f64 {
    let mut bound = max_slippage;

    if let Some(snapshot) = snapshot {
        if snapshot.volume_whole() > LIQUID_VOLUME {
            bound *= 0.8;
        }
        if snapshot.market_cap_whole() < SMALL_MARKET_CAP {
            bound *= 1.5;
        }
    }

    bound.min(MAX_SLIPPAGE_CEILING)
}

/// Fee rate in basis points for a trade on this coin
pub fn fee_rate_bps(snapshot: Option<&CoinSnapshot>) -> u32 {
    let Some(snapshot) = snapshot else {
        return BASE_FEE_BPS;
    };

    let volume = snapshot.volume_whole();
    let mut bps = if volume > VERY_LIQUID_VOLUME {
        BASE_FEE_BPS / 2
    } else if volume > LIQUID_VOLUME {
        BASE_FEE_BPS * 3 / 4
    } else {
        BASE_FEE_BPS
    };

    // Brand-new coins pay double to discourage manipulation
    if snapshot.market_cap_whole() < TINY_MARKET_CAP {
        bps *= 2;
    }

    bps.max(MIN_FEE_BPS)
}
