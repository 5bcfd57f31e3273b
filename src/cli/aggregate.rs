//! Aggregate command implementation

use clap::Args;
use std::path::PathBuf;

use super::common::{load_snapshot, print_json};
use crate::aggregate::aggregate;

#[derive(Args, Debug)]
pub struct AggregateArgs {
    /// JSON coin snapshots, one per file
    #[arg(required = true)]
    pub snapshots: Vec<PathBuf>,
}

impl AggregateArgs {
    pub fn execute(&self) -> anyhow::Result<()> {
        let coins = self
            .snapshots
            .iter()
            .map(|path| load_snapshot(path))
            .collect::<anyhow::Result<Vec<_>>>()?;

        print_json(&aggregate(&coins)?)
    }
}
