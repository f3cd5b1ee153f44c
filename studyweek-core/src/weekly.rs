//! Weekly aggregation: per-category, per-weekday occurrence counts for the
//! week containing "now".

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::expander::occurrence_times_in_window;
use crate::item::{Category, ScheduleItem};
use crate::time::{DAYS_PER_WEEK, DateRange, WeekWindow, weekday_index};

/// Monday..Sunday.
pub type WeekdayCounts = [u32; DAYS_PER_WEEK];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyBuckets {
    pub classes: WeekdayCounts,
    pub tasks: WeekdayCounts,
    pub exams: WeekdayCounts,
}

impl WeeklyBuckets {
    pub fn for_category(&self, category: Category) -> &WeekdayCounts {
        match category {
            Category::Class => &self.classes,
            Category::Task => &self.tasks,
            Category::Exam => &self.exams,
        }
    }

    fn for_category_mut(&mut self, category: Category) -> &mut WeekdayCounts {
        match category {
            Category::Class => &mut self.classes,
            Category::Task => &mut self.tasks,
            Category::Exam => &mut self.exams,
        }
    }

    fn record(&mut self, category: Category, at: NaiveDateTime) {
        self.for_category_mut(category)[weekday_index(at)] += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklySummary {
    pub window: WeekWindow,
    pub buckets: WeeklyBuckets,
    pub class_count: u32,
    pub task_count: u32,
    pub exam_count: u32,
}

impl WeeklySummary {
    pub fn count_for(&self, category: Category) -> u32 {
        match category {
            Category::Class => self.class_count,
            Category::Task => self.task_count,
            Category::Exam => self.exam_count,
        }
    }

    pub fn total(&self) -> u32 {
        self.class_count + self.task_count + self.exam_count
    }
}

/// Aggregate the week containing `now`.
pub fn aggregate_week(items: &[ScheduleItem], now: NaiveDateTime) -> WeeklySummary {
    aggregate_window(items, DateRange::week_of(now))
}

/// Aggregate an explicit week window. Buckets start from zero on every call;
/// nothing carries over between passes.
pub fn aggregate_window(items: &[ScheduleItem], window: WeekWindow) -> WeeklySummary {
    let mut buckets = WeeklyBuckets::default();

    for item in items {
        for at in occurrence_times_in_window(item, &window) {
            buckets.record(item.category, at);
        }
    }

    let sum = |counts: &WeekdayCounts| counts.iter().sum::<u32>();
    let summary = WeeklySummary {
        window,
        class_count: sum(&buckets.classes),
        task_count: sum(&buckets.tasks),
        exam_count: sum(&buckets.exams),
        buckets,
    };

    tracing::debug!(
        week_start = %summary.window.start,
        items = items.len(),
        classes = summary.class_count,
        tasks = summary.task_count,
        exams = summary.exam_count,
        "aggregated week"
    );

    summary
}
