//! Environment configuration for the premium ledger service.

use std::time::Duration;

use chrono_tz::Tz;

use crate::server::{error::config::ConfigError, scheduler::config::ledger};

/// Service configuration loaded from environment variables.
pub struct Config {
    /// Connection string for the ledger database.
    pub database_url: String,
    /// Valkey/Redis URL of the shared cache, `None` to keep invalidations in-process.
    pub valkey_url: Option<String>,
    /// Time zone "today" and the daily cron job are evaluated in.
    pub business_timezone: Tz,
    /// Cron expression for the daily catch-up run.
    pub cron_expression: String,
    /// Pause inserted between candidate batches.
    pub batch_pause: Duration,
    /// Whether to run a catch-up as soon as the service starts.
    pub run_on_startup: bool,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// `DATABASE_URL` is required; every other variable falls back to a default.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingEnvVar("DATABASE_URL".to_string()))?;

        let valkey_url = std::env::var("VALKEY_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let business_timezone = match std::env::var("BUSINESS_TIMEZONE") {
            Ok(name) => name
                .parse::<Tz>()
                .map_err(|e| ConfigError::InvalidEnvValue {
                    var: "BUSINESS_TIMEZONE".to_string(),
                    reason: e.to_string(),
                })?,
            Err(_) => Tz::UTC,
        };

        let cron_expression = std::env::var("LEDGER_CRON")
            .unwrap_or_else(|_| ledger::CRON_EXPRESSION.to_string());

        let batch_pause = match std::env::var("LEDGER_BATCH_PAUSE_MS") {
            Ok(value) => Duration::from_millis(value.parse::<u64>().map_err(|e| {
                ConfigError::InvalidEnvValue {
                    var: "LEDGER_BATCH_PAUSE_MS".to_string(),
                    reason: e.to_string(),
                }
            })?),
            Err(_) => ledger::BATCH_PAUSE,
        };

        let run_on_startup = match std::env::var("LEDGER_RUN_ON_STARTUP") {
            Ok(value) => parse_bool("LEDGER_RUN_ON_STARTUP", &value)?,
            Err(_) => false,
        };

        Ok(Self {
            database_url,
            valkey_url,
            business_timezone,
            cron_expression,
            batch_pause,
            run_on_startup,
        })
    }
}

fn parse_bool(var: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidEnvValue {
            var: var.to_string(),
            reason: format!("expected a boolean, got {other:?}"),
        }),
    }
}
