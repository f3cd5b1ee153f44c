//! Schedule item model: classes, tasks and exams normalized into one shape.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Class,
    Task,
    Exam,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Class, Category::Task, Category::Exam];

    /// Background color the calendar surface paints this category with.
    pub fn color(self) -> &'static str {
        match self {
            Category::Class => "#4caf50",
            Category::Task => "#007bff",
            Category::Exam => "#ff9800",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Class => "class",
            Category::Task => "task",
            Category::Exam => "exam",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Monthly,
}

impl Recurrence {
    /// Stored records may omit the mode entirely; that means a one-off item.
    pub fn from_stored(value: Option<&str>) -> Result<Self, ScheduleError> {
        match value.map(str::trim) {
            None | Some("") => Ok(Recurrence::None),
            Some(s) => s.parse(),
        }
    }
}

impl FromStr for Recurrence {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none" => Ok(Recurrence::None),
            "daily" => Ok(Recurrence::Daily),
            "weekly" => Ok(Recurrence::Weekly),
            "monthly" => Ok(Recurrence::Monthly),
            _ => Err(ScheduleError::UnknownRecurrence(s.to_string())),
        }
    }
}

/// One schedulable thing, possibly recurring.
///
/// `end` is the last date a recurrence applies, not the end of a single
/// session; it is ignored when `recurrence` is `None`. The length of one
/// session lives in `duration_minutes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleItem {
    pub title: String,
    pub category: Category,
    pub start: NaiveDateTime,
    #[serde(default)]
    pub end: Option<NaiveDateTime>,
    #[serde(default)]
    pub recurrence: Recurrence,
    /// Only meaningful for weekly items. Unique, Monday first.
    #[serde(default)]
    pub weekdays: Vec<Weekday>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
    #[serde(default)]
    pub location: Option<String>,
}

impl ScheduleItem {
    pub fn new(title: impl Into<String>, category: Category, start: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            category,
            start,
            end: None,
            recurrence: Recurrence::None,
            weekdays: Vec::new(),
            duration_minutes: None,
            location: None,
        }
    }

    pub fn with_end(mut self, end: NaiveDateTime) -> Self {
        self.end = Some(end);
        self
    }

    pub fn with_recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays = normalize_weekdays(weekdays);
        self
    }

    pub fn with_duration_minutes(mut self, minutes: u32) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn is_recurring(&self) -> bool {
        self.recurrence != Recurrence::None
    }

    /// Last date the recurrence applies, if this item recurs and is bounded.
    pub fn recurrence_end(&self) -> Option<NaiveDateTime> {
        if self.is_recurring() { self.end } else { None }
    }
}

fn normalize_weekdays(weekdays: impl IntoIterator<Item = Weekday>) -> Vec<Weekday> {
    let mut out: Vec<Weekday> = weekdays.into_iter().collect();
    out.sort_by_key(|day| day.num_days_from_monday());
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn monday_nine() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 10, 30)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap()
    }

    #[test]
    fn weekdays_are_unique_and_monday_first() {
        let item = ScheduleItem::new("Algebra", Category::Class, monday_nine())
            .with_recurrence(Recurrence::Weekly)
            .with_weekdays([Weekday::Sun, Weekday::Wed, Weekday::Mon, Weekday::Wed]);
        assert_eq!(item.weekdays, vec![Weekday::Mon, Weekday::Wed, Weekday::Sun]);
    }

    #[test]
    fn parses_stored_recurrence_modes() {
        assert_eq!(Recurrence::from_stored(None), Ok(Recurrence::None));
        assert_eq!(Recurrence::from_stored(Some("")), Ok(Recurrence::None));
        assert_eq!(Recurrence::from_stored(Some("Weekly")), Ok(Recurrence::Weekly));
        assert!(matches!(
            Recurrence::from_stored(Some("yearly")),
            Err(ScheduleError::UnknownRecurrence(_))
        ));
    }

    #[test]
    fn one_off_items_have_no_recurrence_end() {
        let end = monday_nine() + chrono::Duration::days(30);
        let once = ScheduleItem::new("Essay", Category::Task, monday_nine()).with_end(end);
        assert_eq!(once.recurrence_end(), None);

        let daily = once.clone().with_recurrence(Recurrence::Daily);
        assert_eq!(daily.recurrence_end(), Some(end));
    }

    #[test]
    fn deserializes_with_defaults() {
        let item: ScheduleItem = serde_json::from_str(
            r#"{"title":"Final","category":"exam","start":"2023-11-02T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(item.category, Category::Exam);
        assert_eq!(item.recurrence, Recurrence::None);
        assert!(item.weekdays.is_empty());
    }
}
