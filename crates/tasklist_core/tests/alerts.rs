use chrono::NaiveDate;
use tasklist_core::{
    days_until, due_badge, evaluate, Clock, DueBadge, FixedClock, Priority, Settings, Task,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Noon local time on 2024-01-10.
fn now() -> i64 {
    FixedClock::at_local(date(2024, 1, 10), 12).unwrap().now_ms()
}

fn due_task(id: &str, due: Option<NaiveDate>, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        title: id.to_string(),
        description: String::new(),
        category: String::new(),
        priority: Priority::Medium,
        due_date: due,
        completed,
        created_at: 0,
        updated_at: 0,
    }
}

fn settings(alert_days: u32, alert_enabled: bool) -> Settings {
    Settings {
        alert_days,
        alert_enabled,
        ..Settings::default()
    }
}

#[test]
fn days_until_uses_local_calendar_days() {
    let now = now();
    assert_eq!(days_until(Some(date(2024, 1, 5)), now), Some(-5));
    assert_eq!(days_until(Some(date(2024, 1, 15)), now), Some(5));
    assert_eq!(days_until(Some(date(2024, 1, 10)), now), Some(0));
    assert_eq!(days_until(None, now), None);
}

#[test]
fn days_until_is_stable_across_the_day() {
    let early = FixedClock::at_local(date(2024, 1, 10), 0).unwrap().now_ms();
    let late = FixedClock::at_local(date(2024, 1, 10), 23).unwrap().now_ms();
    assert_eq!(days_until(Some(date(2024, 1, 11)), early), Some(1));
    assert_eq!(days_until(Some(date(2024, 1, 11)), late), Some(1));
}

#[test]
fn disabled_alerts_never_report() {
    let tasks = vec![due_task("late", Some(date(2024, 1, 1)), false)];
    assert_eq!(evaluate(&tasks, &settings(3, false), now()), None);
}

#[test]
fn overdue_and_out_of_threshold_tasks_are_partitioned() {
    let tasks = vec![
        due_task("overdue", Some(date(2024, 1, 5)), false),
        due_task("later", Some(date(2024, 1, 14)), false),
    ];

    let summary = evaluate(&tasks, &settings(3, true), now()).unwrap();
    assert_eq!(summary.overdue_count(), 1);
    assert_eq!(summary.due_soon_count(), 0);
    assert_eq!(summary.overdue, vec!["overdue".to_string()]);
    assert_eq!(summary.message(), "1件が期日超過");
}

#[test]
fn today_and_threshold_edge_count_as_due_soon() {
    let tasks = vec![
        due_task("today", Some(date(2024, 1, 10)), false),
        due_task("edge", Some(date(2024, 1, 13)), false),
        due_task("beyond", Some(date(2024, 1, 14)), false),
    ];

    let summary = evaluate(&tasks, &settings(3, true), now()).unwrap();
    assert_eq!(summary.due_soon, vec!["today".to_string(), "edge".to_string()]);
    assert_eq!(summary.overdue_count(), 0);
}

#[test]
fn completed_and_undated_tasks_are_ignored() {
    let tasks = vec![
        due_task("done", Some(date(2024, 1, 1)), true),
        due_task("undated", None, false),
    ];

    let summary = evaluate(&tasks, &settings(3, true), now()).unwrap();
    assert!(summary.is_empty());
    assert_eq!(summary.message(), "");
}

#[test]
fn zero_threshold_only_flags_today_and_overdue() {
    let tasks = vec![
        due_task("yesterday", Some(date(2024, 1, 9)), false),
        due_task("today", Some(date(2024, 1, 10)), false),
        due_task("tomorrow", Some(date(2024, 1, 11)), false),
    ];

    let summary = evaluate(&tasks, &settings(0, true), now()).unwrap();
    assert_eq!(summary.overdue_count(), 1);
    assert_eq!(summary.due_soon, vec!["today".to_string()]);
}

#[test]
fn due_badge_classifies_each_window() {
    let settings = settings(3, true);
    let now = now();
    let badge = |due| due_badge(&due_task("t", due, false), &settings, now);

    assert_eq!(badge(None), None);
    assert_eq!(badge(Some(date(2024, 1, 7))), Some(DueBadge::Overdue { days: 3 }));
    assert_eq!(badge(Some(date(2024, 1, 10))), Some(DueBadge::Today));
    assert_eq!(badge(Some(date(2024, 1, 12))), Some(DueBadge::DueSoon { days: 2 }));
    assert_eq!(
        badge(Some(date(2024, 2, 1))),
        Some(DueBadge::Scheduled {
            date: date(2024, 2, 1)
        })
    );
    assert_eq!(badge(Some(date(2024, 2, 1))).unwrap().label(), "2/1");
}
