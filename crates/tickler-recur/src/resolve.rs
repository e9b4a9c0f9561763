//! Recurrence resolution: next-occurrence math and active-window checks.
//!
//! All functions are pure over a [`ReminderRule`]; "now" always arrives as
//! an argument, so evaluation is deterministic and trivially testable.
//!
//! Day-of-month overflow policy: when the anchor's day does not exist in a
//! target month (day 31 in April, Feb 29 in a non-leap year), the occurrence
//! is clamped to the last valid day of that month.

use chrono::{Datelike, NaiveDate, NaiveDateTime, TimeDelta};
use thiserror::Error;
use tracing::debug;

use tickler_core::constants::MAX_EXCLUDE_SCAN;
use tickler_core::types::{Frequency, ReminderState};

use crate::rule::ReminderRule;

/// Error during occurrence resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The exclude-date scan advanced past its iteration bound without
    /// finding a candidate.
    #[error("Exclude-date scan exceeded {0} iterations")]
    ScanLimitExceeded(usize),
}

/// Result of evaluating a rule at an instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Evaluation {
    /// Next raw occurrence combined with the effective start time.
    pub next_occurrence: NaiveDateTime,
    /// Whole days between the query date and the next occurrence.
    pub remaining_days: i64,
    /// Whether the reminder is inside its active window at the instant.
    pub active: bool,
}

impl Evaluation {
    /// On/off projection of the active flag.
    #[must_use]
    pub const fn state(self) -> ReminderState {
        if self.active {
            ReminderState::On
        } else {
            ReminderState::Off
        }
    }
}

/// ## Summary
/// Computes the earliest date on/after `from` that satisfies the rule's
/// periodicity, before exclude/include overrides or range bounds apply.
///
/// `Frequency::None` has exactly one candidate, the anchor date; `None` is
/// returned when it already passed. The recurring kinds always yield a
/// candidate unless the arithmetic leaves the representable calendar range.
#[must_use]
pub fn next_occurrence_on_or_after(rule: &ReminderRule, from: NaiveDate) -> Option<NaiveDate> {
    match rule.frequency {
        Frequency::None => (rule.anchor_date >= from).then_some(rule.anchor_date),
        Frequency::Daily => next_daily(rule, from),
        Frequency::Weekly => next_weekly(rule, from),
        Frequency::Monthly => next_monthly(rule, from),
        Frequency::Yearly => next_yearly(rule, from),
    }
}

/// Advances `period` days from the day before `from`.
///
/// Not re-anchored to the anchor date's day-of-cycle: the candidate always
/// lands on/after `from` regardless of phase.
fn next_daily(rule: &ReminderRule, from: NaiveDate) -> Option<NaiveDate> {
    add_days(from, i64::from(rule.period) - 1)
}

/// Shifts `from` to the anchor's weekday within the current week, then adds
/// whole period-weeks if that landed in the past.
fn next_weekly(rule: &ReminderRule, from: NaiveDate) -> Option<NaiveDate> {
    let shift = i64::from(rule.anchor_date.weekday().num_days_from_monday())
        - i64::from(from.weekday().num_days_from_monday());
    let candidate = add_days(from, shift)?;
    if candidate < from {
        add_days(candidate, 7 * i64::from(rule.period))
    } else {
        Some(candidate)
    }
}

/// The anchor's day-of-month in `from`'s month, or `period` months later if
/// that already passed. The day is clamped per target month.
fn next_monthly(rule: &ReminderRule, from: NaiveDate) -> Option<NaiveDate> {
    let day = rule.anchor_date.day();
    let candidate = clamped_date(from.year(), from.month(), day)?;
    if candidate < from {
        let months = from.month0().checked_add(rule.period)?;
        let year = from.year().checked_add(i32::try_from(months / 12).ok()?)?;
        clamped_date(year, months % 12 + 1, day)
    } else {
        Some(candidate)
    }
}

/// The anchor's month and day in `from`'s year, or `period` years later if
/// that already passed. The day is clamped per target month, so a Feb 29
/// anchor resolves to Feb 28 in non-leap years.
fn next_yearly(rule: &ReminderRule, from: NaiveDate) -> Option<NaiveDate> {
    let (month, day) = (rule.anchor_date.month(), rule.anchor_date.day());
    let candidate = clamped_date(from.year(), month, day)?;
    if candidate < from {
        let year = from.year().checked_add(i32::try_from(rule.period).ok()?)?;
        clamped_date(year, month, day)
    } else {
        Some(candidate)
    }
}

/// ## Summary
/// Resolves the next occurrence on/after `from`, honoring exclude dates,
/// the configured date range, and include-date overrides.
///
/// One-time rules skip the exclude scan entirely. A candidate before
/// `first_date` is recomputed from `first_date`; one after `last_date` is
/// suppressed. The earliest include date on/after `from` replaces the
/// candidate when it is earlier, or supplies one when none exists.
///
/// ## Errors
/// Returns [`ResolveError::ScanLimitExceeded`] when the exclude-date scan
/// advances `MAX_EXCLUDE_SCAN` days without finding a candidate.
pub fn find_next_date(
    rule: &ReminderRule,
    from: NaiveDate,
) -> Result<Option<NaiveDate>, ResolveError> {
    let mut candidate = if rule.frequency == Frequency::None {
        next_occurrence_on_or_after(rule, from)
    } else {
        scan_past_excludes(rule, from)?
    };

    if let (Some(first), Some(date)) = (rule.first_date, candidate) {
        if date < first {
            candidate = next_occurrence_on_or_after(rule, first);
        }
    }
    if let (Some(last), Some(date)) = (rule.last_date, candidate) {
        if date > last {
            candidate = None;
        }
    }

    Ok(insert_include_date(rule, from, candidate))
}

/// ## Summary
/// Whether the instant's time of day falls inside the rule's active window.
///
/// All-day rules are active for the entire matching date. The date itself is
/// not checked here; [`evaluate`] pairs this with the occurrence-date match.
#[must_use]
pub fn is_active_at(rule: &ReminderRule, at: NaiveDateTime) -> bool {
    if rule.is_all_day() {
        return true;
    }
    let time = at.time();
    if rule.start_time.is_some() && time < rule.effective_start_time() {
        return false;
    }
    if let Some(end) = rule.effective_end_time() {
        if time > end {
            return false;
        }
    }
    true
}

/// ## Summary
/// Top-level query: next occurrence, days remaining, and the active flag
/// for `now`.
///
/// `Ok(None)` signals no upcoming occurrence; that is a valid terminal
/// result, not an error, and callers keep their prior state. The active flag
/// requires the full exclude/include-aware search to land on `now`'s date
/// and the active window to contain `now`'s time.
///
/// ## Errors
/// Propagates [`ResolveError`] from the exclude-date scan.
pub fn evaluate(
    rule: &ReminderRule,
    now: NaiveDateTime,
) -> Result<Option<Evaluation>, ResolveError> {
    let today = now.date();
    let Some(next) = next_occurrence_on_or_after(rule, today) else {
        return Ok(None);
    };

    let next_occurrence = next.and_time(rule.effective_start_time());
    let remaining_days = next.signed_duration_since(today).num_days();

    let reminder_date = find_next_date(rule, today)?;
    let active = reminder_date == Some(today) && is_active_at(rule, now);

    Ok(Some(Evaluation {
        next_occurrence,
        remaining_days,
        active,
    }))
}

/// Re-invokes the per-kind formula from one day later for every excluded
/// candidate. The candidate strictly advances for every recurring kind, but
/// the scan is still bounded to keep adversarial exclude sets from looping.
fn scan_past_excludes(
    rule: &ReminderRule,
    from: NaiveDate,
) -> Result<Option<NaiveDate>, ResolveError> {
    let mut day = from;
    for _ in 0..MAX_EXCLUDE_SCAN {
        match next_occurrence_on_or_after(rule, day) {
            Some(date) if rule.exclude_dates.contains(&date) => {
                debug!(name = %rule.name, %date, "Skipping excluded occurrence");
                match day.succ_opt() {
                    Some(next) => day = next,
                    None => return Ok(None),
                }
            }
            found => return Ok(found),
        }
    }
    Err(ResolveError::ScanLimitExceeded(MAX_EXCLUDE_SCAN))
}

/// Among include dates on/after `floor`, the earliest replaces the candidate
/// when it is strictly earlier, or supplies one when the candidate is none.
fn insert_include_date(
    rule: &ReminderRule,
    floor: NaiveDate,
    candidate: Option<NaiveDate>,
) -> Option<NaiveDate> {
    let include = rule.include_dates.range(floor..).next().copied();
    match (candidate, include) {
        (Some(date), Some(include)) if include < date => {
            debug!(name = %rule.name, %include, "Inserting include date");
            Some(include)
        }
        (None, Some(include)) => {
            debug!(name = %rule.name, %include, "Inserting include date");
            Some(include)
        }
        (candidate, _) => candidate,
    }
}

fn add_days(date: NaiveDate, days: i64) -> Option<NaiveDate> {
    date.checked_add_signed(TimeDelta::days(days))
}

/// Builds a date from components, clamping the day to the last valid day of
/// the month.
fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
        .or_else(|| NaiveDate::from_ymd_opt(year, month, days_in_month(year, month)?))
}

fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 {
        (year.checked_add(1)?, 1)
    } else {
        (year, month + 1)
    };
    let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    Some(first_of_next.pred_opt()?.day())
}
