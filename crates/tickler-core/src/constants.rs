/// Default `chrono` format string for configured dates.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default `chrono` format string for configured times.
pub const DEFAULT_TIME_FORMAT: &str = "%H:%M";

/// Default recurrence period multiplier.
pub const DEFAULT_PERIOD: u32 = 1;

/// Default reminder tag.
pub const DEFAULT_TAG: &str = "reminder";

/// Upper bound on the exclude-date scan, ten years of daily steps.
pub const MAX_EXCLUDE_SCAN: usize = 3653;
