//! creator-curve: bonding-curve pricing engine for creator coins
//!
//! This library provides the core components for:
//! - Supply-to-price bonding curve with dynamic k
//! - Slippage-bounded trade quotes with dynamic fees
//! - Optimal trade sizing under a price impact bound
//! - Market scoring, recommendations and risk assessment
//! - Market-wide aggregation over many coins
//! - Configuration, CLI and observability stack
//!
//! Every computation is pure over an immutable [`coin::CoinSnapshot`], so
//! all engine types can be shared freely across threads.

pub mod aggregate;
pub mod cli;
pub mod coin;
pub mod config;
pub mod curve;
pub mod quote;
pub mod scoring;
pub mod telemetry;
pub mod units;
