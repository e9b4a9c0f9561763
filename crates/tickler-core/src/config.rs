use anyhow::Result;
use config::Config;
use serde::Deserialize;

use crate::constants::{DEFAULT_DATE_FORMAT, DEFAULT_PERIOD, DEFAULT_TAG, DEFAULT_TIME_FORMAT};
use crate::types::Frequency;

/// Top-level settings: the set of configured reminder definitions.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub reminders: Vec<ReminderConfig>,
}

/// Raw reminder definition as it arrives from configuration.
///
/// Dates and times are unparsed strings; rule construction parses them
/// against `date_format` / `time_format`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReminderConfig {
    pub name: String,
    /// Anchor date the recurrence is computed from.
    pub date: String,
    #[serde(default)]
    pub frequency: Frequency,
    #[serde(default = "default_period")]
    pub period: u32,
    /// Inclusive lower bound on occurrences.
    pub first_date: Option<String>,
    /// Inclusive upper bound on occurrences.
    pub last_date: Option<String>,
    #[serde(default)]
    pub exclude_dates: Vec<String>,
    #[serde(default)]
    pub include_dates: Vec<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_time_format")]
    pub time_format: String,
    /// Defaults to `name` when unset.
    pub summary: Option<String>,
    pub description: Option<String>,
    #[serde(default = "default_tag")]
    pub tag: String,
}

fn default_period() -> u32 {
    DEFAULT_PERIOD
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

fn default_time_format() -> String {
    DEFAULT_TIME_FORMAT.to_string()
}

fn default_tag() -> String {
    DEFAULT_TAG.to_string()
}

impl Settings {
    /// ## Summary
    /// Loads reminder definitions from environment variables and an optional
    /// `reminders.toml` file into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        let settings = Config::builder()
            .add_source(
                config::Environment::default()
                    .convert_case(config::Case::Snake)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .add_source(config::File::with_name("reminders.toml").required(false))
            .build()?
            .try_deserialize::<Self>()?;

        tracing::debug!(
            count = settings.reminders.len(),
            "Loaded reminder definitions"
        );

        Ok(settings)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}
