//! `exams` collection.

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
pub struct ExamRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub subject: Option<SubjectRef>,
    /// Exam or quiz.
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    pub date: DateTime<Utc>,
    pub time: DateTime<Utc>,
    /// Minutes.
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
}

impl ExamRecord {
    fn place(&self) -> Option<String> {
        let location = self.location.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let room = self.room_number.as_deref().map(str::trim).filter(|s| !s.is_empty());
        match (location, room) {
            (Some(location), Some(room)) => Some(format!("{location}, room {room}")),
            (Some(location), None) => Some(location.to_string()),
            (None, Some(room)) => Some(format!("room {room}")),
            (None, None) => None,
        }
    }
}

impl StoredRecord for ExamRecord {
    const COLLECTION: Collection = Collection::Exams;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn owner(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn to_item(&self, tz: Tz) -> Result<Option<ScheduleItem>> {
        let start = combine_date_and_time(utc_to_local(self.date, tz), utc_to_local(self.time, tz));
        let title = format!("{} - {}", subject_name(self.subject.as_ref(), ""), self.name);

        let mut item = ScheduleItem::new(title, Category::Exam, start);
        if let Some(minutes) = self.duration.filter(|m| *m > 0) {
            item = item.with_duration_minutes(minutes);
        }
        if let Some(place) = self.place() {
            item = item.with_location(place);
        }
        Ok(Some(item))
    }
}
