//! Recurrence rules and the calendar feed.
//!
//! The calendar surface expands recurring items itself from an rrule-style
//! object. Its wire shape is fixed:
//!
//! ```json
//! {"freq":"weekly","interval":1,"dtstart":"2023-10-02T09:00:00",
//!  "until":"2023-12-01T00:00:00","byweekday":["MO","WE"]}
//! ```
//!
//! Timestamps are local wall-clock, whole seconds, without a zone suffix.

use chrono::{Duration, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize, Serializer};

use crate::item::{Category, Recurrence, ScheduleItem};
use crate::time::to_local_iso_string;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RecurrenceRule {
    pub freq: Frequency,
    pub interval: u32,
    #[serde(serialize_with = "serialize_local_iso")]
    pub dtstart: NaiveDateTime,
    /// `None` leaves the rule open-ended.
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_until"
    )]
    pub until: Option<NaiveDateTime>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_weekday_codes"
    )]
    pub byweekday: Option<Vec<Weekday>>,
}

/// Two-letter uppercase code the calendar surface uses for a weekday.
pub fn weekday_code(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "MO",
        Weekday::Tue => "TU",
        Weekday::Wed => "WE",
        Weekday::Thu => "TH",
        Weekday::Fri => "FR",
        Weekday::Sat => "SA",
        Weekday::Sun => "SU",
    }
}

/// Build the rule for a stored recurrence descriptor.
///
/// `Recurrence::None` yields no rule: the item is a single occurrence at
/// `start`. A weekly descriptor with no weekdays still yields a rule (without
/// `byweekday`); it simply expands to nothing.
pub fn build_rule(
    recurrence: Recurrence,
    start: NaiveDateTime,
    end: Option<NaiveDateTime>,
    weekdays: &[Weekday],
) -> Option<RecurrenceRule> {
    let freq = match recurrence {
        Recurrence::None => return None,
        Recurrence::Daily => Frequency::Daily,
        Recurrence::Weekly => Frequency::Weekly,
        Recurrence::Monthly => Frequency::Monthly,
    };

    let byweekday = (recurrence == Recurrence::Weekly && !weekdays.is_empty())
        .then(|| weekdays.to_vec());

    Some(RecurrenceRule {
        freq,
        interval: 1,
        dtstart: start,
        until: end,
        byweekday,
    })
}

pub fn rule_for(item: &ScheduleItem) -> Option<RecurrenceRule> {
    build_rule(item.recurrence, item.start, item.end, &item.weekdays)
}

/// `HH:MM`, the session length format of the calendar surface.
pub fn format_duration(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// One element of the calendar feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CalendarEntry {
    Recurring {
        title: String,
        category: Category,
        color: &'static str,
        rrule: RecurrenceRule,
        duration: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
    Single {
        title: String,
        category: Category,
        color: &'static str,
        #[serde(serialize_with = "serialize_local_iso")]
        start: NaiveDateTime,
        #[serde(
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_until"
        )]
        end: Option<NaiveDateTime>,
        #[serde(skip_serializing_if = "Option::is_none")]
        location: Option<String>,
    },
}

/// Recurring items with a known session length are handed over as rules;
/// everything else becomes a plain `{start, end}` pair.
pub fn calendar_entry(item: &ScheduleItem) -> CalendarEntry {
    let title = item.title.clone();
    let category = item.category;
    let color = category.color();
    let location = item.location.clone();

    match (rule_for(item), item.duration_minutes) {
        (Some(rrule), Some(minutes)) => CalendarEntry::Recurring {
            title,
            category,
            color,
            rrule,
            duration: format_duration(minutes),
            location,
        },
        _ => CalendarEntry::Single {
            title,
            category,
            color,
            start: item.start,
            end: item
                .duration_minutes
                .map(|minutes| item.start + Duration::minutes(i64::from(minutes))),
            location,
        },
    }
}

pub fn calendar_feed(items: &[ScheduleItem]) -> Vec<CalendarEntry> {
    items.iter().map(calendar_entry).collect()
}

fn serialize_local_iso<S: Serializer>(dt: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&to_local_iso_string(*dt))
}

fn serialize_until<S: Serializer>(dt: &Option<NaiveDateTime>, s: S) -> Result<S::Ok, S::Error> {
    match dt {
        Some(dt) => serialize_local_iso(dt, s),
        None => s.serialize_none(),
    }
}

fn serialize_weekday_codes<S: Serializer>(
    days: &Option<Vec<Weekday>>,
    s: S,
) -> Result<S::Ok, S::Error> {
    match days {
        Some(days) => s.collect_seq(days.iter().map(|day| weekday_code(*day))),
        None => s.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn no_rule_for_one_off_items() {
        assert!(build_rule(Recurrence::None, at(2023, 10, 2, 9, 0), None, &[]).is_none());
    }

    #[test]
    fn weekly_rule_serializes_to_calendar_shape() {
        let rule = build_rule(
            Recurrence::Weekly,
            at(2023, 10, 2, 9, 0),
            Some(at(2023, 12, 1, 0, 0)),
            &[Weekday::Mon, Weekday::Wed],
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&rule).unwrap(),
            json!({
                "freq": "weekly",
                "interval": 1,
                "dtstart": "2023-10-02T09:00:00",
                "until": "2023-12-01T00:00:00",
                "byweekday": ["MO", "WE"]
            })
        );
    }

    #[test]
    fn weekly_rule_without_weekdays_has_no_byweekday() {
        let rule = build_rule(Recurrence::Weekly, at(2023, 10, 2, 9, 0), None, &[]).unwrap();
        assert_eq!(rule.byweekday, None);
        assert_eq!(
            serde_json::to_string(&rule).unwrap(),
            r#"{"freq":"weekly","interval":1,"dtstart":"2023-10-02T09:00:00"}"#
        );
    }

    #[test]
    fn byweekday_only_applies_to_weekly() {
        let rule = build_rule(
            Recurrence::Daily,
            at(2023, 10, 2, 9, 0),
            Some(at(2023, 10, 9, 0, 0)),
            &[Weekday::Fri],
        )
        .unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
        assert_eq!(rule.byweekday, None);
    }

    #[test]
    fn weekday_codes() {
        let codes: Vec<_> = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .map(weekday_code)
        .collect();
        assert_eq!(codes, ["MO", "TU", "WE", "TH", "FR", "SA", "SU"]);
    }

    #[test]
    fn recurring_class_becomes_rule_entry() {
        let item = ScheduleItem::new("Physics", Category::Class, at(2023, 10, 2, 9, 0))
            .with_end(at(2023, 12, 1, 0, 0))
            .with_recurrence(Recurrence::Weekly)
            .with_weekdays([Weekday::Tue])
            .with_duration_minutes(90);

        let value = serde_json::to_value(calendar_entry(&item)).unwrap();
        assert_eq!(value["duration"], "01:30");
        assert_eq!(value["color"], "#4caf50");
        assert_eq!(value["rrule"]["byweekday"], json!(["TU"]));
        assert!(value.get("start").is_none());
    }

    #[test]
    fn exam_becomes_start_end_pair() {
        let item = ScheduleItem::new("Physics - Midterm", Category::Exam, at(2023, 11, 2, 10, 0))
            .with_duration_minutes(120)
            .with_location("Room 101");

        assert_eq!(
            serde_json::to_value(calendar_entry(&item)).unwrap(),
            json!({
                "title": "Physics - Midterm",
                "category": "exam",
                "color": "#ff9800",
                "start": "2023-11-02T10:00:00",
                "end": "2023-11-02T12:00:00",
                "location": "Room 101"
            })
        );
    }

    #[test]
    fn recurring_item_without_duration_falls_back_to_single() {
        let item = ScheduleItem::new("Lab", Category::Class, at(2023, 10, 2, 9, 0))
            .with_recurrence(Recurrence::Daily)
            .with_end(at(2023, 10, 6, 0, 0));
        assert!(matches!(calendar_entry(&item), CalendarEntry::Single { end: None, .. }));
    }

    #[test]
    fn formats_durations() {
        assert_eq!(format_duration(0), "00:00");
        assert_eq!(format_duration(75), "01:15");
        assert_eq!(format_duration(600), "10:00");
    }
}
