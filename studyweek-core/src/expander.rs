//! Occurrence expansion: which concrete instances of an item fall in a range.
//!
//! Dispatch is on [`Recurrence`]:
//! - `None`: the single `start`, if it is inside the range.
//! - `Daily`: every calendar day from `start` to `end` inclusive.
//! - `Weekly`: per week window, each listed weekday whose midnight lies within
//!   `[start, end]`, provided the active interval touches the window.
//! - `Monthly`: `start`, then `start` plus whole calendar months, up to `end`.
//!
//! Daily and weekly occurrences carry the item's start time of day, and range
//! membership is decided on that emitted timestamp. Daily compares the item's
//! bounds by calendar day; weekly and monthly compare them as timestamps.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;

use crate::item::{Category, Recurrence, ScheduleItem};
use crate::time::{
    DateRange, WeekWindow, add_calendar_month, date_at_weekday_offset, is_same_day, start_of_day,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Occurrence {
    pub title: String,
    pub category: Category,
    pub at: NaiveDateTime,
}

impl Occurrence {
    fn of(item: &ScheduleItem, at: NaiveDateTime) -> Self {
        Self {
            title: item.title.clone(),
            category: item.category,
            at,
        }
    }
}

/// Occurrences of `item` inside one week window, in time order.
pub fn expand_in_window(item: &ScheduleItem, window: &WeekWindow) -> Vec<Occurrence> {
    occurrence_times_in_window(item, window)
        .into_iter()
        .map(|at| Occurrence::of(item, at))
        .collect()
}

/// Occurrences of `item` inside an arbitrary half-open range, in time order.
pub fn expand(item: &ScheduleItem, range: &DateRange) -> Vec<Occurrence> {
    occurrence_times(item, range)
        .into_iter()
        .map(|at| Occurrence::of(item, at))
        .collect()
}

/// Occurrences of every item inside `range`, merged in time order.
pub fn expand_all(items: &[ScheduleItem], range: &DateRange) -> Vec<Occurrence> {
    let mut out: Vec<Occurrence> = items.iter().flat_map(|item| expand(item, range)).collect();
    out.sort_by_key(|occurrence| occurrence.at);
    out
}

/// Timestamps only; what the weekly aggregator counts.
pub fn occurrence_times_in_window(item: &ScheduleItem, window: &WeekWindow) -> Vec<NaiveDateTime> {
    let mut out = match item.recurrence {
        Recurrence::Weekly => weekly_in_window(item, window),
        _ => non_weekly(item, window),
    };
    out.sort();
    out
}

pub fn occurrence_times(item: &ScheduleItem, range: &DateRange) -> Vec<NaiveDateTime> {
    let mut out = match item.recurrence {
        Recurrence::Weekly => range
            .weeks()
            .flat_map(|week| weekly_in_window(item, &week))
            .filter(|at| range.contains(*at))
            .collect(),
        _ => non_weekly(item, range),
    };
    out.sort();
    out
}

fn non_weekly(item: &ScheduleItem, range: &DateRange) -> Vec<NaiveDateTime> {
    match item.recurrence {
        Recurrence::None => once(item, range),
        Recurrence::Daily => daily(item, range),
        Recurrence::Monthly => monthly(item, range),
        Recurrence::Weekly => Vec::new(),
    }
}

fn once(item: &ScheduleItem, range: &DateRange) -> Vec<NaiveDateTime> {
    if range.contains(item.start) {
        vec![item.start]
    } else {
        Vec::new()
    }
}

fn daily(item: &ScheduleItem, range: &DateRange) -> Vec<NaiveDateTime> {
    let first = start_of_day(item.start);
    let last = item.end.map(start_of_day);
    let on_day = |day: NaiveDateTime| day.date().and_time(item.start.time());

    // A one-day daily item occurs once, not once per inclusive bound.
    if let Some(last) = last.filter(|last| is_same_day(first, *last)) {
        return if range.contains(on_day(last)) {
            vec![on_day(last)]
        } else {
            Vec::new()
        };
    }

    // Days before the range cannot land in it; start the walk there.
    let mut day = first.max(start_of_day(range.start));
    let mut out = Vec::new();
    while day < range.end && last.is_none_or(|last| day <= last) {
        if range.contains(on_day(day)) {
            out.push(on_day(day));
        }
        day += Duration::days(1);
    }
    out
}

fn weekly_in_window(item: &ScheduleItem, window: &WeekWindow) -> Vec<NaiveDateTime> {
    let active = item.end.is_none_or(|end| end >= window.start) && item.start <= window.end;
    if !active {
        return Vec::new();
    }

    // The weekday's midnight is what must lie within the item's bounds.
    let within_bounds =
        |date: NaiveDateTime| date >= item.start && item.end.is_none_or(|end| date <= end);

    item.weekdays
        .iter()
        .map(|day| date_at_weekday_offset(window.start, day.num_days_from_monday() as usize))
        .filter(|date| within_bounds(*date))
        .map(|date| date.date().and_time(item.start.time()))
        .collect()
}

fn monthly(item: &ScheduleItem, range: &DateRange) -> Vec<NaiveDateTime> {
    let mut out = Vec::new();
    let mut current = Some(item.start);

    while let Some(at) = current {
        if item.end.is_some_and(|end| at > end) || at >= range.end {
            break;
        }
        if range.contains(at) {
            out.push(at);
        }
        current = add_calendar_month(at);
    }
    out
}
