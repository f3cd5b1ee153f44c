//! `assignments` collection: homework and other deadlines, counted as tasks.

use anyhow::Result;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use studyweek_core::time::{combine_date_and_time, utc_to_local};
use studyweek_core::{Category, ScheduleItem};

use super::StoredRecord;
use crate::types::{Collection, SubjectRef, subject_name};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub subject: Option<SubjectRef>,
    #[serde(default)]
    pub description: Option<String>,
    /// Date part of the deadline.
    pub deadline: DateTime<Utc>,
    /// Time-of-day part of the deadline.
    pub deadline_time: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl StoredRecord for AssignmentRecord {
    const COLLECTION: Collection = Collection::Assignments;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn owner(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn to_item(&self, tz: Tz) -> Result<Option<ScheduleItem>> {
        if self.completed {
            return Ok(None);
        }

        let start = combine_date_and_time(
            utc_to_local(self.deadline, tz),
            utc_to_local(self.deadline_time, tz),
        );
        let title = subject_name(self.subject.as_ref(), "Untitled");

        Ok(Some(ScheduleItem::new(title, Category::Task, start)))
    }
}
