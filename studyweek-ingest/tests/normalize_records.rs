use chrono::{NaiveDate, NaiveDateTime};
use studyweek_core::{Category, Recurrence, aggregate_week};
use studyweek_ingest::{Collection, NormalizeOptions, RawRecords, parse_documents};

fn local(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, min, 0)
        .unwrap()
}

fn fixtures() -> RawRecords {
    let mut raw = RawRecords::default();
    raw.set(
        Collection::Assignments,
        parse_documents(include_str!("fixtures/assignments.json")).unwrap(),
    );
    raw.set(
        Collection::Exams,
        parse_documents(include_str!("fixtures/exams.json")).unwrap(),
    );
    raw.set(
        Collection::Schedules,
        parse_documents(include_str!("fixtures/schedules.json")).unwrap(),
    );
    raw
}

fn options() -> NormalizeOptions {
    // UTC+4, no DST
    NormalizeOptions::new(chrono_tz::Asia::Tbilisi).for_user("student-1")
}

#[test]
fn normalizes_all_collections_for_one_user() {
    let normalized = fixtures().normalize(&options());

    let titles: Vec<_> = normalized.items.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(
        titles,
        ["History", "Physics - Midterm", "Calculus", "Chemistry Lab"]
    );

    let essay = &normalized.items[0];
    assert_eq!(essay.category, Category::Task);
    assert_eq!(essay.start, local(2023, 11, 3, 19, 0));

    let exam = &normalized.items[1];
    assert_eq!(exam.start, local(2023, 11, 4, 10, 0));
    assert_eq!(exam.duration_minutes, Some(120));

    let calculus = &normalized.items[2];
    assert_eq!(calculus.recurrence, Recurrence::Weekly);
    assert_eq!(calculus.start, local(2023, 10, 1, 9, 0));
    assert_eq!(calculus.end, Some(local(2023, 12, 1, 0, 0)));
    assert_eq!(calculus.duration_minutes, Some(90));
}

#[test]
fn malformed_records_are_reported_not_passed_on() {
    let normalized = fixtures().normalize(&options());

    let rejected: Vec<_> = normalized
        .rejected
        .iter()
        .map(|r| (r.collection, r.id.as_str()))
        .collect();
    assert_eq!(
        rejected,
        [
            (Collection::Assignments, "asg-broken"),
            (Collection::Schedules, "cls-bad-day"),
        ]
    );
    assert!(normalized.rejected[1].reason.contains("caturday"));
}

#[test]
fn without_owner_filter_every_user_is_included() {
    let normalized = fixtures().normalize(&NormalizeOptions::new(chrono_tz::Asia::Tbilisi));
    assert!(normalized.items.iter().any(|i| i.title == "Biology"));
}

#[test]
fn normalized_items_feed_the_weekly_dashboard() {
    let normalized = fixtures().normalize(&options());
    let summary = aggregate_week(&normalized.items, local(2023, 11, 1, 12, 0));

    // Calculus Mon + Wed, lab Tue + Wed + Thu.
    assert_eq!(summary.buckets.classes, [1, 1, 2, 1, 0, 0, 0]);
    assert_eq!(summary.buckets.tasks, [0, 0, 0, 0, 1, 0, 0]);
    assert_eq!(summary.buckets.exams, [0, 0, 0, 0, 0, 1, 0]);
}
