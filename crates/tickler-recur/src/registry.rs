//! Construction of rule sets from loaded settings.

use tickler_core::config::Settings;
use tickler_core::error::ConfigError;
use tracing::warn;

use crate::rule::ReminderRule;

/// ## Summary
/// Builds a rule for every configured reminder definition.
///
/// A definition that fails validation lands in the failure list, keyed by
/// reminder name, and never blocks the remaining definitions.
#[must_use]
pub fn build_rules(settings: &Settings) -> (Vec<ReminderRule>, Vec<(String, ConfigError)>) {
    let mut rules = Vec::with_capacity(settings.reminders.len());
    let mut failures = Vec::new();

    for config in &settings.reminders {
        match ReminderRule::from_config(config) {
            Ok(rule) => rules.push(rule),
            Err(err) => {
                warn!(name = %config.name, error = %err, "Skipping invalid reminder definition");
                failures.push((config.name.clone(), err));
            }
        }
    }

    (rules, failures)
}
