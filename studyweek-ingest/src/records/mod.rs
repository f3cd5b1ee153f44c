//! Stored record shapes, one module per collection.

pub mod assignments;
pub mod class_schedules;
pub mod exams;

use anyhow::Result;
use chrono_tz::Tz;
use serde::de::DeserializeOwned;
use studyweek_core::ScheduleItem;

use crate::types::Collection;

/// A raw document from one collection that can be mapped onto a
/// [`ScheduleItem`].
pub trait StoredRecord: DeserializeOwned {
    const COLLECTION: Collection;

    fn id(&self) -> Option<&str>;

    fn owner(&self) -> Option<&str>;

    /// `Ok(None)` means the record is valid but produces no item (e.g. a
    /// completed assignment).
    fn to_item(&self, tz: Tz) -> Result<Option<ScheduleItem>>;
}

pub use assignments::AssignmentRecord;
pub use class_schedules::ClassScheduleRecord;
pub use exams::ExamRecord;
