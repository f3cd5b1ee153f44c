//! Plain-text views for the terminal.

use chrono::{Duration, NaiveDate};
use studyweek_core::{Category, Occurrence, ScheduleItem, WeeklySummary};

const DAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn row_label(category: Category) -> &'static str {
    match category {
        Category::Class => "classes",
        Category::Task => "tasks",
        Category::Exam => "exams",
    }
}

fn join_lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

pub fn week_table(summary: &WeeklySummary) -> String {
    let first = summary.window.start.date();
    let last = (summary.window.end - Duration::days(1)).date();
    let days: String = DAY_LABELS.iter().map(|day| format!("{day:>4}")).collect();

    let mut lines = vec![
        format!("Week of {first} .. {last}"),
        String::new(),
        format!("{:<8}{days}{:>7}", "", "Total"),
    ];
    for category in Category::ALL {
        let counts: String = summary
            .buckets
            .for_category(category)
            .iter()
            .map(|count| format!("{count:>4}"))
            .collect();
        lines.push(format!(
            "{:<8}{counts}{:>7}",
            row_label(category),
            summary.count_for(category)
        ));
    }
    lines.push(String::new());
    lines.push(format!("{} occurrences this week", summary.total()));
    join_lines(lines)
}

pub fn upcoming_list(items: &[&ScheduleItem]) -> String {
    if items.is_empty() {
        return "Nothing upcoming.\n".to_string();
    }

    let lines = items
        .iter()
        .map(|item| {
            let mut line = format!(
                "- {}  [{}] {}",
                item.start.format("%Y-%m-%d %H:%M"),
                item.category,
                item.title
            );
            if item.is_recurring() {
                let mode = format!("{:?}", item.recurrence).to_lowercase();
                line.push_str(&match item.end {
                    Some(end) => format!(" ({mode} until {})", end.format("%Y-%m-%d")),
                    None => format!(" ({mode})"),
                });
            }
            line
        })
        .collect();
    join_lines(lines)
}

pub fn occurrence_list(occurrences: &[Occurrence]) -> String {
    if occurrences.is_empty() {
        return "No occurrences in range.\n".to_string();
    }

    let mut lines = Vec::new();
    let mut current: Option<NaiveDate> = None;
    for occurrence in occurrences {
        let day = occurrence.at.date();
        if current != Some(day) {
            if current.is_some() {
                lines.push(String::new());
            }
            lines.push(day.format("%A %Y-%m-%d").to_string());
            current = Some(day);
        }
        lines.push(format!(
            "  {}  [{}] {}",
            occurrence.at.format("%H:%M"),
            occurrence.category,
            occurrence.title
        ));
    }
    join_lines(lines)
}
