pub mod toml_config;

use crate::core::engine::DEFAULT_PENDING_THRESHOLD;
use crate::core::ConfigProvider;
use crate::domain::model::ResultProfile;
use crate::utils::error::{Result, ScanApiError};
use crate::utils::validation::{
    validate_bind_address, validate_non_empty_string, validate_positive_number, validate_range,
    Validate,
};
use std::time::Duration;

#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "cli")]
use std::path::PathBuf;

pub use toml_config::TomlConfig;

/// Token accepted when authentication is on and none was configured.
pub const DEFAULT_BEARER_TOKEN: &str = "your-siscolino-bearer-token";

pub const DEFAULT_PORT: u16 = 5000;

/// Longest pending delay a deployment may configure, in seconds.
pub const MAX_PENDING_SECONDS: f64 = 3600.0;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tropico-mock")]
#[command(about = "Mock asynchronous security-scanning API")]
pub struct CliConfig {
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    #[arg(long, env = "BEARER_TOKEN")]
    pub bearer_token: Option<String>,

    #[arg(long, help = "Disable bearer-token authentication")]
    pub no_auth: bool,

    #[arg(long, default_value_t = 5.0, help = "Seconds a scan stays pending")]
    pub pending_seconds: f64,

    #[arg(long, default_value = "domain", help = "Result profile: domain or placeholder")]
    pub profile: ResultProfile,

    #[arg(long)]
    pub min_endpoints: Option<usize>,

    #[arg(long)]
    pub max_endpoints: Option<usize>,

    #[arg(long)]
    pub max_risk_factors: Option<usize>,

    #[arg(long, help = "Reject requests for accounts that were never created")]
    pub enforce_account_exists: bool,

    #[arg(long, short = 'c', help = "Load settings from a TOML file instead of flags")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn bind_address(&self) -> String {
        format_bind_address(&self.host, self.port)
    }

    fn bearer_token(&self) -> Option<String> {
        resolve_token(!self.no_auth, self.bearer_token.as_deref())
    }

    fn pending_threshold(&self) -> Duration {
        threshold_from_secs(self.pending_seconds)
    }

    fn result_profile(&self) -> ResultProfile {
        self.profile
    }

    fn min_endpoints(&self) -> Option<usize> {
        self.min_endpoints
    }

    fn max_endpoints(&self) -> Option<usize> {
        self.max_endpoints
    }

    fn max_risk_factors(&self) -> Option<usize> {
        self.max_risk_factors
    }

    fn enforce_account_exists(&self) -> bool {
        self.enforce_account_exists
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)?;
        validate_pending_seconds("pending_seconds", self.pending_seconds)
    }
}

pub(crate) fn format_bind_address(host: &str, port: u16) -> String {
    if host.contains(':') && !host.starts_with('[') {
        format!("[{}]:{}", host, port)
    } else {
        format!("{}:{}", host, port)
    }
}

pub(crate) fn resolve_token(enabled: bool, token: Option<&str>) -> Option<String> {
    enabled.then(|| token.unwrap_or(DEFAULT_BEARER_TOKEN).to_string())
}

pub(crate) fn threshold_from_secs(seconds: f64) -> Duration {
    Duration::try_from_secs_f64(seconds).unwrap_or(DEFAULT_PENDING_THRESHOLD)
}

pub(crate) fn validate_pending_seconds(field_name: &str, seconds: f64) -> Result<()> {
    if !seconds.is_finite() {
        return Err(ScanApiError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: seconds.to_string(),
            reason: "Value must be a finite number".to_string(),
        });
    }
    validate_range(field_name, seconds, 0.0, MAX_PENDING_SECONDS)
}

/// Checks shared by every configuration source.
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_bind_address("server", &config.bind_address())?;

    if let Some(token) = config.bearer_token() {
        validate_non_empty_string("bearer_token", &token)?;
        if token.contains("${") {
            return Err(ScanApiError::InvalidConfigValueError {
                field: "bearer_token".to_string(),
                value: token,
                reason: "Unresolved environment variable".to_string(),
            });
        }
    }

    if let Some(min) = config.min_endpoints() {
        validate_positive_number("min_endpoints", min, 1)?;
    }
    if let Some(max) = config.max_endpoints() {
        validate_positive_number("max_endpoints", max, 1)?;
    }
    if let (Some(min), Some(max)) = (config.min_endpoints(), config.max_endpoints()) {
        if min > max {
            return Err(ScanApiError::ConfigError {
                message: format!("min_endpoints ({}) exceeds max_endpoints ({})", min, max),
            });
        }
    }
    if let Some(max) = config.max_risk_factors() {
        validate_range(
            "max_risk_factors",
            max,
            1,
            crate::core::catalog::RISK_FACTORS.len(),
        )?;
    }

    Ok(())
}
