//! "What's next": items still ahead of now, soonest first.

use chrono::NaiveDateTime;

use crate::item::ScheduleItem;

pub const DEFAULT_UPCOMING_LIMIT: usize = 5;

/// An item is upcoming if it starts at or after `now`, or if it recurs and its
/// recurrence has not ended yet. A recurrence with no end never ends.
pub fn is_upcoming(item: &ScheduleItem, now: NaiveDateTime) -> bool {
    if item.start >= now {
        return true;
    }
    item.is_recurring() && item.end.is_none_or(|end| end >= now)
}

/// Upcoming items sorted by start (stable for equal starts), at most `limit`.
pub fn select_upcoming(
    items: &[ScheduleItem],
    now: NaiveDateTime,
    limit: usize,
) -> Vec<&ScheduleItem> {
    let mut out: Vec<&ScheduleItem> = items.iter().filter(|item| is_upcoming(item, now)).collect();
    out.sort_by_key(|item| item.start);
    out.truncate(limit);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::{Category, Recurrence};
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn past_one_offs_are_dropped() {
        let now = at(2023, 11, 1, 12);
        let items = vec![
            ScheduleItem::new("Past", Category::Task, at(2023, 10, 31, 9)),
            ScheduleItem::new("Future", Category::Task, at(2023, 11, 2, 9)),
        ];
        let titles: Vec<_> = select_upcoming(&items, now, 5)
            .into_iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, ["Future"]);
    }

    #[test]
    fn running_recurrences_stay_upcoming() {
        let now = at(2023, 11, 1, 12);
        let running = ScheduleItem::new("Algebra", Category::Class, at(2023, 9, 1, 9))
            .with_recurrence(Recurrence::Weekly)
            .with_end(at(2023, 12, 1, 0));
        let finished = running.clone().with_end(at(2023, 10, 1, 0));
        let open = ScheduleItem::new("Reading", Category::Task, at(2023, 1, 1, 9))
            .with_recurrence(Recurrence::Daily);

        assert!(is_upcoming(&running, now));
        assert!(!is_upcoming(&finished, now));
        assert!(is_upcoming(&open, now));
    }

    #[test]
    fn sorted_and_truncated() {
        let now = at(2023, 11, 1, 0);
        let items: Vec<_> = (0..8)
            .rev()
            .map(|d| ScheduleItem::new(format!("t{d}"), Category::Task, at(2023, 11, 2 + d, 9)))
            .collect();

        let picked = select_upcoming(&items, now, DEFAULT_UPCOMING_LIMIT);
        let titles: Vec<_> = picked.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["t0", "t1", "t2", "t3", "t4"]);
    }
}
