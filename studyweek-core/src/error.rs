//! Engine-level errors.
//!
//! The engine itself never fails on well-formed items; these errors are raised
//! while turning stored strings (weekday names, recurrence modes, zone names)
//! into typed values.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("unknown weekday name: {0:?}")]
    UnknownWeekday(String),
    #[error("unknown recurrence mode: {0:?} (expected none, daily, weekly or monthly)")]
    UnknownRecurrence(String),
    #[error("invalid timezone: {0}")]
    InvalidTimezone(String),
}
