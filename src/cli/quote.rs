//! Quote and optimal-size command implementations

use alloy_primitives::U256;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{curve_for, load_snapshot, print_json, ProfileArg};
use crate::config::Config;
use crate::quote::QuoteCalculator;

#[derive(Args, Debug)]
pub struct QuoteArgs {
    /// JSON coin snapshot
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Trade size in base units
    #[arg(long)]
    pub amount: U256,

    /// Quote a sell instead of a buy
    #[arg(long)]
    pub sell: bool,

    /// Curve profile (picked from market cap when omitted)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,
}

impl QuoteArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let curve = curve_for(config, &snapshot, self.profile)?;
        let calculator = QuoteCalculator::from_config(curve, &config.quote);

        let quote = calculator.quote(
            snapshot.circulating_supply,
            self.amount,
            !self.sell,
            Some(&snapshot),
        )?;
        print_json(&quote)
    }
}

#[derive(Args, Debug)]
pub struct OptimalSizeArgs {
    /// JSON coin snapshot
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Largest acceptable price impact (0.02 = 2%)
    #[arg(long, default_value = "0.02")]
    pub max_impact: f64,

    /// Curve profile (picked from market cap when omitted)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,
}

#[derive(Debug, Serialize)]
struct OptimalSizeOutput {
    symbol: String,
    max_impact: f64,
    trade_size: U256,
}

impl OptimalSizeArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let curve = curve_for(config, &snapshot, self.profile)?;
        let calculator = QuoteCalculator::from_config(curve, &config.quote);

        let trade_size = calculator.optimal_trade_size(
            snapshot.circulating_supply,
            self.max_impact,
            Some(&snapshot),
        )?;

        print_json(&OptimalSizeOutput {
            symbol: snapshot.symbol.clone(),
            max_impact: self.max_impact,
            trade_size,
        })
    }
}
