use thiserror::Error;

/// Reminder construction error naming the offending configuration field.
///
/// A definition that fails to validate is fatal for that reminder only;
/// callers skip it and keep building the rest.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid date in `{field}`: {value:?} does not match format {format:?}")]
    InvalidDate {
        field: String,
        value: String,
        format: String,
    },

    #[error("Invalid time in `{field}`: {value:?} does not match format {format:?}")]
    InvalidTime {
        field: String,
        value: String,
        format: String,
    },

    #[error("`period` must be at least 1")]
    InvalidPeriod,
}

pub type CoreResult<T> = std::result::Result<T, ConfigError>;
