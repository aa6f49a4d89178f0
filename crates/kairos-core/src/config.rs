use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{
    DEFAULT_APPOINTMENT_DURATION_MINUTES, DEFAULT_CELL_DURATION_MINUTES, DEFAULT_END_DAY_HOUR,
    DEFAULT_FIRST_DAY_OF_WEEK, DEFAULT_MAX_OCCURRENCES, DEFAULT_START_DAY_HOUR,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub scheduler: SchedulerConfig,
    pub logging: LoggingConfig,
}

/// Session-wide scheduler defaults. Views may override the day hours and cell
/// duration individually.
#[derive(Debug, Clone, Deserialize)]
pub struct SchedulerConfig {
    pub start_day_hour: u32,
    pub end_day_hour: u32,
    pub cell_duration: u32,
    pub appointment_duration: u32,
    pub first_day_of_week: u32,
    pub max_occurrences: usize,
    /// Display zone: an IANA name or a fractional hour offset such as `"9.5"`.
    pub time_zone: Option<String>,
    /// `chrono` pattern (or `"iso"`, `"date"`, `"utc"`) used when writing dates.
    pub date_serialization_format: Option<String>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            start_day_hour: DEFAULT_START_DAY_HOUR,
            end_day_hour: DEFAULT_END_DAY_HOUR,
            cell_duration: DEFAULT_CELL_DURATION_MINUTES,
            appointment_duration: DEFAULT_APPOINTMENT_DURATION_MINUTES,
            first_day_of_week: DEFAULT_FIRST_DAY_OF_WEEK,
            max_occurrences: DEFAULT_MAX_OCCURRENCES,
            time_zone: None,
            date_serialization_format: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from `.env` file and environment variables into a `Settings`.
    /// Environment variables take precedence over `.env` file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Config::builder()
            .set_default("scheduler.start_day_hour", i64::from(DEFAULT_START_DAY_HOUR))?
            .set_default("scheduler.end_day_hour", i64::from(DEFAULT_END_DAY_HOUR))?
            .set_default(
                "scheduler.cell_duration",
                i64::from(DEFAULT_CELL_DURATION_MINUTES),
            )?
            .set_default(
                "scheduler.appointment_duration",
                i64::from(DEFAULT_APPOINTMENT_DURATION_MINUTES),
            )?
            .set_default(
                "scheduler.first_day_of_week",
                i64::from(DEFAULT_FIRST_DAY_OF_WEEK),
            )?
            .set_default(
                "scheduler.max_occurrences",
                i64::try_from(DEFAULT_MAX_OCCURRENCES).unwrap_or(i64::MAX),
            )?
            .set_default("logging.level", "info")?
            .add_source(
                config::Environment::with_prefix("KAIROS")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            // TOML file
            .add_source(config::File::with_name("config.toml").required(false))
            .build()?
            .try_deserialize::<Settings>()?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!(error = %e, "No .env file loaded");
    }

    Settings::load()
}
