//! Recurrence resolution for reminder rules.
//!
//! Pure date math: no I/O, no shared state, deterministic for a given rule
//! and query instant. The host is responsible for polling, persistence, and
//! fanning state changes out to its own event system.

pub mod registry;
pub mod resolve;
pub mod rule;

pub use registry::build_rules;
pub use resolve::{
    Evaluation, ResolveError, evaluate, find_next_date, is_active_at, next_occurrence_on_or_after,
};
pub use rule::ReminderRule;
