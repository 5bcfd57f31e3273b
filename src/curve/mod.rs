//! Bonding curve module
//!
//! Maps circulating supply to a price, with k adjusted by volume,
//! inactivity and popularity signals

mod model;
mod params;
mod types;

pub use model::CurveModel;
pub use params::{CurveParameters, CurveProfile, ESTABLISHED_MARKET_CAP};
pub use types::CurveError;
