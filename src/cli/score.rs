//! Score command implementation

use clap::Args;
use std::path::PathBuf;

use super::common::{curve_for, load_snapshot, print_json, ProfileArg};
use crate::config::Config;
use crate::scoring::MarketScorer;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// JSON coin snapshot (set `amm_price` to get a buy/sell signal)
    #[arg(long)]
    pub snapshot: PathBuf,

    /// Curve profile (picked from market cap when omitted)
    #[arg(long, value_enum)]
    pub profile: Option<ProfileArg>,
}

impl ScoreArgs {
    pub fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let snapshot = load_snapshot(&self.snapshot)?;
        let scorer = MarketScorer::new(curve_for(config, &snapshot, self.profile)?);
        print_json(&scorer.score(&snapshot))
    }
}
