//! Runtime configuration for dashboard sessions.
//!
//! # Responsibility
//! - Describe tunables that hosts may override (log level, deadline window).
//! - Parse host-supplied JSON, filling unset fields with defaults.
//!
//! # Invariants
//! - `Default` values reproduce the stock dashboard behavior.
//! - A parsed config always carries a normalized log level.

use crate::logging::{default_log_level, level_name, parse_level, LoggingError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default look-ahead for the upcoming deadlines card.
pub const DEFAULT_DEADLINE_WINDOW_DAYS: u32 = 30;
/// Default number of rows in the upcoming deadlines card.
pub const DEFAULT_DEADLINE_LIMIT: usize = 5;

/// Analytics view tunables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub window_days: u32,
    pub deadline_limit: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_DEADLINE_WINDOW_DAYS,
            deadline_limit: DEFAULT_DEADLINE_LIMIT,
        }
    }
}

/// Top-level host configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub log_level: String,
    pub analytics: AnalyticsConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

/// Errors from loading host configuration.
#[derive(Debug)]
pub enum ConfigError {
    Parse(serde_json::Error),
    InvalidLogLevel(LoggingError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "invalid dashboard config: {err}"),
            Self::InvalidLogLevel(err) => write!(f, "invalid dashboard config: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::InvalidLogLevel(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

impl DashboardConfig {
    /// Parses JSON config; missing keys keep their defaults.
    ///
    /// # Errors
    /// - `Parse` for malformed JSON or wrongly typed fields.
    /// - `InvalidLogLevel` when `log_level` is not a known level.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(raw)?;
        let level = parse_level(&config.log_level).map_err(ConfigError::InvalidLogLevel)?;
        config.log_level = level_name(level).to_string();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsConfig, ConfigError, DashboardConfig};

    #[test]
    fn empty_object_yields_defaults() {
        let config = DashboardConfig::from_json_str("{}").expect("empty config parses");
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.analytics.window_days, 30);
        assert_eq!(config.analytics.deadline_limit, 5);
    }

    #[test]
    fn partial_analytics_override_keeps_other_defaults() {
        let config = DashboardConfig::from_json_str(
            r#"{"log_level":"WARNING","analytics":{"window_days":7}}"#,
        )
        .expect("partial config parses");
        assert_eq!(config.log_level, "warn");
        assert_eq!(
            config.analytics,
            AnalyticsConfig {
                window_days: 7,
                deadline_limit: 5,
            }
        );
    }

    #[test]
    fn rejects_unknown_log_level() {
        let err = DashboardConfig::from_json_str(r#"{"log_level":"loud"}"#)
            .expect_err("unknown level must fail");
        assert!(matches!(err, ConfigError::InvalidLogLevel(_)));
    }
}
