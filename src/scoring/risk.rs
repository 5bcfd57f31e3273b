//! Risk assessment
//!
//! Conditions are evaluated in a fixed order and can only raise the level.

use serde::{Deserialize, Serialize};

use super::RiskLevel;

const HIGH_VOLATILITY: f64 = 70.0;
const MODERATE_VOLATILITY: f64 = 40.0;
const LOW_LIQUIDITY: f64 = 30.0;
const EXTREME_PRICE_MOVE_PCT: f64 = 50.0;
const LOW_VOLUME: f64 = 1.0;

/// Reported when no risk condition fires
pub const STABLE_FACTOR: &str = "Stable market conditions";

/// Inputs to a risk assessment
#[derive(Debug, Clone, Copy)]
pub struct RiskInputs {
    pub volatility_score: f64,
    pub liquidity_score: f64,
    /// 24h price change in percent
    pub price_change_pct: f64,
    /// 24h volume in whole coins
    pub volume: f64,
}

/// Risk level plus the factors that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub level: RiskLevel,
    pub factors: Vec<String>,
}

impl RiskAssessment {
    fn new() -> Self {
        Self {
            level: RiskLevel::Low,
            factors: Vec::new(),
        }
    }

    /// Raise to at least `level`
    fn raise_to(&mut self, level: RiskLevel, factor: String) {
        self.level = self.level.max(level);
        self.factors.push(factor);
    }

    /// Bump one level
    fn escalate(&mut self, factor: String) {
        self.level = self.level.escalated();
        self.factors.push(factor);
    }

    /// True when only the informational stable factor is present
    pub fn is_stable(&self) -> bool {
        self.factors.len() == 1 && self.factors[0] == STABLE_FACTOR
    }

    /// Append a factor discovered outside the standard checks
    pub fn add_factor(&mut self, factor: impl Into<String>) {
        if self.is_stable() {
            self.factors.clear();
        }
        self.factors.push(factor.into());
    }
}

/// Assess risk from scores and raw signals
pub fn assess_risk(inputs: RiskInputs) -> RiskAssessment {
    let mut risk = RiskAssessment::new();

    if inputs.volatility_score > HIGH_VOLATILITY {
        risk.raise_to(
            RiskLevel::High,
            format!("High volatility (score {:.1})", inputs.volatility_score),
        );
    } else if inputs.volatility_score > MODERATE_VOLATILITY {
        risk.raise_to(
            RiskLevel::Medium,
            format!("Moderate volatility (score {:.1})", inputs.volatility_score),
        );
    }

    if inputs.liquidity_score < LOW_LIQUIDITY {
        risk.escalate(format!(
            "Low liquidity (score {:.1})",
            inputs.liquidity_score
        ));
    }

    if inputs.price_change_pct.abs() > EXTREME_PRICE_MOVE_PCT {
        risk.raise_to(
            RiskLevel::High,
            format!(
                "Extreme price movement ({:+.1}% in 24h)",
                inputs.price_change_pct
            ),
        );
    }

    if inputs.volume < LOW_VOLUME {
        risk.escalate("Very low trading volume".to_string());
    }

    if risk.factors.is_empty() {
        risk.factors.push(STABLE_FACTOR.to_string());
    }

    risk
}
