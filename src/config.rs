//! Configuration types for creator-curve

use serde::Deserialize;

use crate::curve::{CurveParameters, CurveProfile};
use crate::telemetry::LogFormat;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub curve: CurveConfig,
    #[serde(default)]
    pub quote: QuoteConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Curve parameters per profile
#[derive(Debug, Clone, Deserialize)]
pub struct CurveConfig {
    /// Parameters for young coins
    #[serde(default = "CurveParameters::new_coin")]
    pub new_coin: CurveParameters,

    /// Parameters for established coins
    #[serde(default = "CurveParameters::established_coin")]
    pub established: CurveParameters,
}

impl CurveConfig {
    /// Parameters configured for `profile`
    pub fn params_for(&self, profile: CurveProfile) -> &CurveParameters {
        match profile {
            CurveProfile::NewCoin => &self.new_coin,
            CurveProfile::Established => &self.established,
        }
    }
}

impl Default for CurveConfig {
    fn default() -> Self {
        Self {
            new_coin: CurveParameters::new_coin(),
            established: CurveParameters::established_coin(),
        }
    }
}

/// Quote lifetime configuration
#[derive(Debug, Clone, Deserialize)]
pub struct QuoteConfig {
    /// Base lifetime of a quote (seconds)
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,

    /// Random extension added to the lifetime, drawn from [0, jitter)
    #[serde(default = "default_deadline_jitter_secs")]
    pub deadline_jitter_secs: u64,
}

/// Longest quote lifetime or jitter accepted from configuration (one week)
const MAX_QUOTE_LIFETIME_SECS: u64 = 7 * 24 * 3600;

fn default_deadline_secs() -> u64 {
    1800 // 30 minutes
}
fn default_deadline_jitter_secs() -> u64 {
    300 // up to 5 minutes
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            deadline_secs: 1800,
            deadline_jitter_secs: 300,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_format: LogFormat,
    /// Port for the Prometheus exporter; disabled when unset
    #[serde(default)]
    pub metrics_port: Option<u16>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: LogFormat::Pretty,
            metrics_port: None,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate every curve profile and the quote lifetime
    pub fn validate(&self) -> anyhow::Result<()> {
        for profile in [CurveProfile::NewCoin, CurveProfile::Established] {
            self.curve
                .params_for(profile)
                .validate()
                .map_err(|e| anyhow::anyhow!("[curve.{:?}] {}", profile, e))?;
        }
        self.quote.validate()
    }
}

impl QuoteConfig {
    /// Check lifetimes are positive and at most one week
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.deadline_secs == 0 || self.deadline_secs > MAX_QUOTE_LIFETIME_SECS {
            anyhow::bail!(
                "[quote] deadline_secs must be in 1..={}, got {}",
                MAX_QUOTE_LIFETIME_SECS,
                self.deadline_secs
            );
        }
        if self.deadline_jitter_secs > MAX_QUOTE_LIFETIME_SECS {
            anyhow::bail!(
                "[quote] deadline_jitter_secs must be at most {}, got {}",
                MAX_QUOTE_LIFETIME_SECS,
                self.deadline_jitter_secs
            );
        }
        Ok(())
    }
}
