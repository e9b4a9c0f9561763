//! Validated reminder rules constructed from raw configuration.

use std::collections::BTreeSet;

use chrono::{NaiveDate, NaiveTime, TimeDelta};
use tickler_core::config::ReminderConfig;
use tickler_core::error::ConfigError;
use tickler_core::types::Frequency;

/// Immutable reminder definition with all scalars parsed and validated.
///
/// A configuration change produces a new rule; rules are never mutated in
/// place and are safe to query from any number of callers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderRule {
    pub name: String,
    pub summary: String,
    pub description: Option<String>,
    pub tag: String,

    /// Reference date defining the recurrence phase (day-of-week,
    /// day-of-month, month-day) and the sole candidate for one-time rules.
    pub anchor_date: NaiveDate,
    pub frequency: Frequency,
    /// Multiplier on the frequency's base interval, at least 1.
    pub period: u32,
    /// Inclusive lower bound; earlier occurrences are invalid.
    pub first_date: Option<NaiveDate>,
    /// Inclusive upper bound; later occurrences are suppressed.
    pub last_date: Option<NaiveDate>,
    pub exclude_dates: BTreeSet<NaiveDate>,
    pub include_dates: BTreeSet<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

impl ReminderRule {
    /// ## Summary
    /// Parses and validates a raw reminder definition into a rule.
    ///
    /// Date and time strings are parsed against the definition's
    /// `date_format` / `time_format`. Empty strings in optional fields count
    /// as unset, but a malformed entry anywhere (including the exclude and
    /// include lists) fails construction.
    ///
    /// ## Errors
    /// Returns a `ConfigError` naming the offending field when a date or
    /// time string does not match the configured format, or when
    /// `period < 1`.
    pub fn from_config(config: &ReminderConfig) -> Result<Self, ConfigError> {
        if config.period == 0 {
            return Err(ConfigError::InvalidPeriod);
        }

        let date_format = config.date_format.as_str();
        let time_format = config.time_format.as_str();

        let anchor_date = parse_date(&config.date, "date", date_format)?;
        let first_date = parse_opt_date(config.first_date.as_deref(), "first_date", date_format)?;
        let last_date = parse_opt_date(config.last_date.as_deref(), "last_date", date_format)?;

        let mut exclude_dates = BTreeSet::new();
        for (i, raw) in config.exclude_dates.iter().enumerate() {
            exclude_dates.insert(parse_date(raw, &format!("exclude_dates[{i}]"), date_format)?);
        }
        let mut include_dates = BTreeSet::new();
        for (i, raw) in config.include_dates.iter().enumerate() {
            include_dates.insert(parse_date(raw, &format!("include_dates[{i}]"), date_format)?);
        }

        let start_time = parse_opt_time(config.start_time.as_deref(), "start_time", time_format)?;
        let end_time = parse_opt_time(config.end_time.as_deref(), "end_time", time_format)?;

        Ok(Self {
            name: config.name.clone(),
            summary: config
                .summary
                .clone()
                .unwrap_or_else(|| config.name.clone()),
            description: config.description.clone(),
            tag: config.tag.clone(),
            anchor_date,
            frequency: config.frequency,
            period: config.period,
            first_date,
            last_date,
            exclude_dates,
            include_dates,
            start_time,
            end_time,
        })
    }

    /// True when no active window is configured; the reminder is then active
    /// for the entire occurrence date.
    #[must_use]
    pub const fn is_all_day(&self) -> bool {
        self.start_time.is_none() && self.end_time.is_none()
    }

    /// Start of the daily active window, defaulting to midnight.
    #[must_use]
    pub fn effective_start_time(&self) -> NaiveTime {
        self.start_time.unwrap_or(NaiveTime::MIN)
    }

    /// End of the daily active window. An end before the start is corrected
    /// to one hour after the start, wrapping past midnight.
    #[must_use]
    pub fn effective_end_time(&self) -> Option<NaiveTime> {
        let end = self.end_time?;
        let start = self.effective_start_time();
        if end < start {
            Some(start.overflowing_add_signed(TimeDelta::hours(1)).0)
        } else {
            Some(end)
        }
    }
}

fn parse_date(value: &str, field: &str, format: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value, format).map_err(|_e| ConfigError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
        format: format.to_string(),
    })
}

fn parse_opt_date(
    value: Option<&str>,
    field: &str,
    format: &str,
) -> Result<Option<NaiveDate>, ConfigError> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_date(s, field, format).map(Some),
    }
}

fn parse_time(value: &str, field: &str, format: &str) -> Result<NaiveTime, ConfigError> {
    NaiveTime::parse_from_str(value, format).map_err(|_e| ConfigError::InvalidTime {
        field: field.to_string(),
        value: value.to_string(),
        format: format.to_string(),
    })
}

fn parse_opt_time(
    value: Option<&str>,
    field: &str,
    format: &str,
) -> Result<Option<NaiveTime>, ConfigError> {
    match value {
        None => Ok(None),
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => parse_time(s, field, format).map(Some),
    }
}
