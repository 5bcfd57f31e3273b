//! Price command implementation

use alloy_primitives::U256;
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

use super::common::{curve_for, load_snapshot, print_json, ProfileArg};
use crate::config::Config;

#[derive(Args, Debug)]
pub struct PriceArgs {
    /// JSON coin snapshot
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Supply to price at (defaults to the snapshot's circulating supply)
    #[arg(long)]
    pub supply: Option<U256>,

    /// Curve profile (picked from market cap when omitted)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,
}

#[derive(Debug, Serialize)]
struct PriceOutput {
    symbol: String,
    supply: U256,
    dynamic_k: f64,
    price: U256,
}

impl PriceArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let curve = curve_for(config, &snapshot, self.profile)?;
        let supply = self.supply.unwrap_or(snapshot.circulating_supply);
        let now = chrono::Utc::now();

        let price = curve.price_at(supply, Some(&snapshot), now)?;

        print_json(&PriceOutput {
            symbol: snapshot.symbol.clone(),
            supply,
            dynamic_k: curve.dynamic_k_at(Some(&snapshot), now),
            price,
        })
    }
}
