//! studyweek-core: recurrence expansion and weekly aggregation for a student
//! planner.
//!
//! Pure and synchronous. Callers hand in already-normalized
//! [`ScheduleItem`]s (see `studyweek-ingest`) and an explicit "now"; nothing
//! here performs I/O or keeps state between calls.

pub mod error;
pub mod expander;
pub mod item;
pub mod rrule;
pub mod time;
pub mod upcoming;
pub mod weekly;

pub use error::ScheduleError;
pub use expander::{Occurrence, expand, expand_all, expand_in_window};
pub use item::{Category, Recurrence, ScheduleItem};
pub use rrule::{
    CalendarEntry, Frequency, RecurrenceRule, build_rule, calendar_entry, calendar_feed,
    weekday_code,
};
pub use time::{DateRange, WeekWindow};
pub use upcoming::{DEFAULT_UPCOMING_LIMIT, select_upcoming};
pub use weekly::{WeekdayCounts, WeeklyBuckets, WeeklySummary, aggregate_week};
