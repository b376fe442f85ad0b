//! Environment-driven configuration for the monitoring runtime.

use std::env;
use thiserror::Error;

/// Errors raised while reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {name}")]
    MissingVar { name: &'static str },

    /// An environment variable holds an unparsable value.
    #[error("invalid value for {name}: {value}")]
    InvalidVar { name: &'static str, value: String },
}

/// Runtime configuration, read from the environment.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Override for the market data endpoint. `None` uses the public one.
    pub market_data_base_url: Option<String>,
    /// Webhook to deliver critical alerts to. `None` logs to console only.
    pub alert_webhook_url: Option<String>,
    /// Seconds between evaluation cycles in watch mode.
    pub check_interval_secs: u64,
    /// Maximum pools checked concurrently within one cycle.
    pub max_concurrency: usize,
}

impl MonitorConfig {
    /// Reads configuration from the environment.
    ///
    /// `DATABASE_URL` is required; `MARKET_DATA_BASE_URL` and
    /// `ALERT_WEBHOOK_URL` are optional; `CHECK_INTERVAL_SECS` defaults
    /// to 300 and `MAX_CONCURRENCY` to 8.
    ///
    /// # Errors
    /// Returns an error if a required variable is missing or a numeric
    /// variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar {
                name: "DATABASE_URL",
            })?;

        Ok(Self {
            database_url,
            market_data_base_url: env::var("MARKET_DATA_BASE_URL").ok(),
            alert_webhook_url: env::var("ALERT_WEBHOOK_URL").ok(),
            check_interval_secs: parse_var("CHECK_INTERVAL_SECS", 300)?,
            max_concurrency: parse_var("MAX_CONCURRENCY", 8)?,
        })
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_var_default_when_unset() {
        let value: u64 = parse_var("PH_TEST_UNSET_VAR", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_var_rejects_garbage() {
        // Safety: test-local variable name, not read anywhere else.
        unsafe { env::set_var("PH_TEST_GARBAGE_VAR", "not-a-number") };
        let result: Result<u64, _> = parse_var("PH_TEST_GARBAGE_VAR", 1);
        assert!(matches!(result, Err(ConfigError::InvalidVar { .. })));
        unsafe { env::remove_var("PH_TEST_GARBAGE_VAR") };
    }
}
