//! Shared foundation for the tickler workspace: configuration, constants,
//! error types, and the frequency/state vocabulary.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
