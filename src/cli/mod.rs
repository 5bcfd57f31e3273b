//! CLI interface for creator-curve
//!
//! Provides subcommands for:
//! - `price`: Curve price for a coin snapshot
//! - `quote`: Slippage-checked trade quote
//! - `optimal-size`: Largest trade within a price impact bound
//! - `score`: Market score and recommendation
//! - `aggregate`: Market conditions over many snapshots
//! - `config`: Show effective configuration

mod aggregate;
mod common;
mod price;
mod quote;
mod score;

pub use aggregate::AggregateArgs;
pub use common::ProfileArg;
pub use price::PriceArgs;
pub use quote::{OptimalSizeArgs, QuoteArgs};
pub use score::ScoreArgs;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "creator-curve")]
#[command(about = "Bonding-curve pricing, quotes and market scoring for creator coins")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Curve price for a coin snapshot
    Price(PriceArgs),
    /// Slippage-checked trade quote
    Quote(QuoteArgs),
    /// Largest trade within a price impact bound
    OptimalSize(OptimalSizeArgs),
    /// Market score and recommendation
    Score(ScoreArgs),
    /// Market conditions over many snapshots
    Aggregate(AggregateArgs),
    /// Show effective configuration
    Config,
}
