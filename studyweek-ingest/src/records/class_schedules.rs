//! `schedules` collection: class sessions with an optional recurrence.
//!
//! A schedule stores its dates and its times separately. The first session
//! is `startDate` at `startTime`; a session lasts `endTime - startTime`; the
//! recurrence runs until `endDate`.

use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use studyweek_core::time::{combine_date_and_time, parse_weekday, utc_to_local};
use studyweek_core::{Category, Recurrence, ScheduleItem};

use super::StoredRecord;
use crate::types::{Collection, SubjectRef, subject_name};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassScheduleRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub subject: Option<SubjectRef>,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// `none`, `daily`, `weekly` or `monthly`; absent means `none`.
    #[serde(default)]
    pub recurrence: Option<String>,
    /// Lowercase English weekday names, used by weekly schedules.
    #[serde(default)]
    pub week_days: Vec<String>,
    /// `online` or `campus`.
    #[serde(default)]
    pub mode: Option<String>,
}

impl StoredRecord for ClassScheduleRecord {
    const COLLECTION: Collection = Collection::Schedules;

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn owner(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn to_item(&self, tz: Tz) -> Result<Option<ScheduleItem>> {
        let recurrence = Recurrence::from_stored(self.recurrence.as_deref())?;
        let weekdays = self
            .week_days
            .iter()
            .map(|day| parse_weekday(day))
            .collect::<Result<Vec<_>, _>>()?;

        let first_day = utc_to_local(self.start_date, tz);
        let start = combine_date_and_time(first_day, utc_to_local(self.start_time, tz));
        let session_end = combine_date_and_time(first_day, utc_to_local(self.end_time, tz));

        let minutes = (session_end - start).num_minutes();
        if minutes < 0 {
            bail!("class ends ({session_end}) before it starts ({start})");
        }

        let mut item = ScheduleItem::new(
            subject_name(self.subject.as_ref(), "Unnamed Subject"),
            Category::Class,
            start,
        )
        .with_end(utc_to_local(self.end_date, tz))
        .with_recurrence(recurrence)
        .with_weekdays(weekdays)
        .with_duration_minutes(u32::try_from(minutes)?);

        if let Some(mode) = self.mode.as_deref().filter(|m| !m.trim().is_empty()) {
            item = item.with_location(mode);
        }

        Ok(Some(item))
    }
}
