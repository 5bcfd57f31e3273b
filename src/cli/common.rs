//! Helpers shared by the subcommands

use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use serde::Serialize;

use crate::coin::CoinSnapshot;
use crate::config::Config;
use crate::curve::{CurveModel, CurveProfile};

/// Curve profile selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ProfileArg {
    /// Young coin preset
    NewCoin,
    /// Established coin preset
    Established,
}

impl From<ProfileArg> for CurveProfile {
    fn from(arg: ProfileArg) -> Self {
        match arg {
            ProfileArg::NewCoin => CurveProfile::NewCoin,
            ProfileArg::Established => CurveProfile::Established,
        }
    }
}

/// Read a JSON coin snapshot and check its supply invariant
pub fn load_snapshot(path: &Path) -> anyhow::Result<CoinSnapshot> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot: CoinSnapshot = serde_json::from_str(&content)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    snapshot.validate()?;
    Ok(snapshot)
}

/// Build the curve for a snapshot, honouring an explicit profile override
pub fn curve_for(
    config: &Config,
    snapshot: &CoinSnapshot,
    profile: Option<ProfileArg>,
) -> anyhow::Result<CurveModel> {
    let profile = profile
        .map(CurveProfile::from)
        .unwrap_or_else(|| CurveProfile::for_snapshot(snapshot));
    tracing::debug!(symbol = %snapshot.symbol, ?profile, "Curve profile selected");

    Ok(CurveModel::new(config.curve.params_for(profile).clone())?)
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
