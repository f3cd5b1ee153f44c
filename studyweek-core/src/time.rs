//! Time utilities: week windows, weekday indexing and local wall-clock helpers.
//!
//! Every timestamp the engine sees is a local wall-clock `NaiveDateTime`. The
//! user's zone is applied once, when stored UTC instants are localized with
//! [`utc_to_local`], so "same day" and "start of week" never need a zone.

use anyhow::Result;
use chrono::{
    DateTime, Datelike, Days, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
    Weekday,
};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

pub const DAYS_PER_WEEK: usize = 7;

/// Monday = 0 ... Sunday = 6.
pub fn weekday_index(dt: NaiveDateTime) -> usize {
    dt.weekday().num_days_from_monday() as usize
}

pub fn start_of_day(dt: NaiveDateTime) -> NaiveDateTime {
    dt.date().and_time(NaiveTime::MIN)
}

/// Monday 00:00:00 of the week containing `dt`. Sunday is the last day of the
/// week, not the first.
pub fn start_of_week(dt: NaiveDateTime) -> NaiveDateTime {
    start_of_day(dt) - Duration::days(weekday_index(dt) as i64)
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

/// Half-open membership: `start <= dt < end`.
pub fn is_in_range(dt: NaiveDateTime, start: NaiveDateTime, end: NaiveDateTime) -> bool {
    start <= dt && dt < end
}

/// Dashboard name for [`is_in_range`].
pub fn is_in_week(dt: NaiveDateTime, week_start: NaiveDateTime, week_end: NaiveDateTime) -> bool {
    is_in_range(dt, week_start, week_end)
}

/// Parse a canonical English weekday name (`monday` ... `sunday`), ignoring
/// case and surrounding whitespace.
pub fn parse_weekday(name: &str) -> Result<Weekday, ScheduleError> {
    match name.trim().to_lowercase().as_str() {
        "monday" => Ok(Weekday::Mon),
        "tuesday" => Ok(Weekday::Tue),
        "wednesday" => Ok(Weekday::Wed),
        "thursday" => Ok(Weekday::Thu),
        "friday" => Ok(Weekday::Fri),
        "saturday" => Ok(Weekday::Sat),
        "sunday" => Ok(Weekday::Sun),
        _ => Err(ScheduleError::UnknownWeekday(name.to_string())),
    }
}

pub fn weekday_name_to_index(name: &str) -> Result<usize, ScheduleError> {
    parse_weekday(name).map(|day| day.num_days_from_monday() as usize)
}

/// `week_start + index` days, time of day zeroed.
pub fn date_at_weekday_offset(week_start: NaiveDateTime, index: usize) -> NaiveDateTime {
    start_of_day(week_start) + Duration::days(index as i64)
}

/// Add one to the month field, letting a day-of-month the target month does
/// not have roll over into the month after (Jan 31 -> Mar 3, or Mar 2 in leap
/// years). Time of day is kept. `None` only at the edge of the representable
/// calendar.
pub fn add_calendar_month(dt: NaiveDateTime) -> Option<NaiveDateTime> {
    let (year, month) = match dt.month() {
        12 => (dt.year() + 1, 1),
        m => (dt.year(), m + 1),
    };
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let date = first.checked_add_days(Days::new(u64::from(dt.day() - 1)))?;
    Some(date.and_time(dt.time()))
}

/// Half-open `[start, end)` interval of local wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// A [`DateRange`] running from a Monday 00:00 to the following Monday 00:00,
/// as produced by [`DateRange::week_of`].
pub type WeekWindow = DateRange;

impl DateRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The week window containing `dt`.
    pub fn week_of(dt: NaiveDateTime) -> WeekWindow {
        let start = start_of_week(dt);
        Self {
            start,
            end: start + Duration::days(DAYS_PER_WEEK as i64),
        }
    }

    pub fn contains(&self, dt: NaiveDateTime) -> bool {
        is_in_range(dt, self.start, self.end)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Week windows touching this range, in order.
    pub fn weeks(self) -> impl Iterator<Item = WeekWindow> {
        let end = self.end;
        std::iter::successors(Some(Self::week_of(self.start)), |week| {
            Some(Self::week_of(week.end))
        })
        .take_while(move |week| week.start < end)
    }
}

pub fn parse_timezone(name: &str) -> Result<Tz, ScheduleError> {
    name.trim()
        .parse()
        .map_err(|_| ScheduleError::InvalidTimezone(name.to_string()))
}

/// Wall-clock time of a stored UTC instant in `tz`.
pub fn utc_to_local(dt: DateTime<Utc>, tz: Tz) -> NaiveDateTime {
    dt.with_timezone(&tz).naive_local()
}

/// Calendar date of `date` at the time of day of `time`, whole seconds only.
pub fn combine_date_and_time(date: NaiveDateTime, time: NaiveDateTime) -> NaiveDateTime {
    let t = time.time();
    date.date().and_time(t.with_nanosecond(0).unwrap_or(t))
}

/// `YYYY-MM-DDTHH:MM:SS`, no zone suffix.
pub fn to_local_iso_string(dt: NaiveDateTime) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parse a user-supplied local timestamp. Accepts `2023-10-30`,
/// `2023-10-30T09:15`, `2023-10-30 09:15` and the same with seconds.
pub fn parse_local_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    for fmt in [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("invalid local datetime '{s}': {e}"))?;
    Ok(date.and_time(NaiveTime::MIN))
}
