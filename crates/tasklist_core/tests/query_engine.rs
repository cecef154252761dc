use chrono::NaiveDate;
use tasklist_core::{
    visible_tasks, CategoryFilter, Priority, PriorityFilter, SortKey, StatusFilter, Task,
    TaskQuery,
};

fn task(id: &str, title: &str) -> Task {
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: String::new(),
        category: "仕事".to_string(),
        priority: Priority::Medium,
        due_date: None,
        completed: false,
        created_at: 0,
        updated_at: 0,
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn ids(tasks: &[&Task]) -> Vec<String> {
    tasks.iter().map(|task| task.id.clone()).collect()
}

fn sorted_by(key: SortKey) -> TaskQuery {
    TaskQuery {
        sort_key: key,
        ..TaskQuery::default()
    }
}

#[test]
fn search_matches_title_or_description_case_insensitively() {
    let mut with_description = task("b", "groceries");
    with_description.description = "Buy MILK and eggs".to_string();
    let tasks = vec![task("a", "Milk run"), with_description, task("c", "taxes")];

    let query = TaskQuery {
        search_text: "  milk ".to_string(),
        ..TaskQuery::default()
    };
    assert_eq!(ids(&visible_tasks(&tasks, &query)), vec!["a", "b"]);
}

#[test]
fn blank_search_matches_everything() {
    let tasks = vec![task("a", "one"), task("b", "two")];
    let query = TaskQuery {
        search_text: "   ".to_string(),
        ..TaskQuery::default()
    };
    assert_eq!(visible_tasks(&tasks, &query).len(), 2);
}

#[test]
fn filters_are_combined_with_and() {
    let mut shopping_high = task("a", "eggs");
    shopping_high.category = "買い物".to_string();
    shopping_high.priority = Priority::High;
    let mut shopping_low = task("b", "bread");
    shopping_low.category = "買い物".to_string();
    shopping_low.priority = Priority::Low;
    let mut work_high_done = task("c", "report");
    work_high_done.priority = Priority::High;
    work_high_done.completed = true;
    let tasks = vec![shopping_high, shopping_low, work_high_done];

    let query = TaskQuery {
        category: CategoryFilter::Named("買い物".to_string()),
        priority: PriorityFilter::Only(Priority::High),
        ..TaskQuery::default()
    };
    assert_eq!(ids(&visible_tasks(&tasks, &query)), vec!["a"]);

    let pending = TaskQuery {
        status: StatusFilter::Pending,
        ..TaskQuery::default()
    };
    assert_eq!(ids(&visible_tasks(&tasks, &pending)), vec!["a", "b"]);

    let completed = TaskQuery {
        status: StatusFilter::Completed,
        ..TaskQuery::default()
    };
    assert_eq!(ids(&visible_tasks(&tasks, &completed)), vec!["c"]);
}

#[test]
fn completed_tasks_always_sort_last() {
    let mut done_high = task("done", "a");
    done_high.completed = true;
    done_high.priority = Priority::High;
    done_high.due_date = Some(date(2020, 1, 1));
    done_high.created_at = 999;
    let mut open_low = task("open", "z");
    open_low.priority = Priority::Low;
    let tasks = vec![done_high, open_low];

    for key in [
        SortKey::Unsorted,
        SortKey::DueDate,
        SortKey::Priority,
        SortKey::CreatedAt,
        SortKey::Title,
    ] {
        assert_eq!(
            ids(&visible_tasks(&tasks, &sorted_by(key))),
            vec!["open", "done"],
            "sort key {key:?}"
        );
    }
}

#[test]
fn priority_sort_orders_high_medium_low() {
    let mut low = task("low", "x");
    low.priority = Priority::Low;
    let mut high = task("high", "y");
    high.priority = Priority::High;
    let medium = task("medium", "z");
    let tasks = vec![low, high, medium];

    assert_eq!(
        ids(&visible_tasks(&tasks, &sorted_by(SortKey::Priority))),
        vec!["high", "medium", "low"]
    );
}

#[test]
fn due_date_sort_puts_undated_last() {
    let none = task("none", "x");
    let mut tenth = task("10", "y");
    tenth.due_date = Some(date(2024, 1, 10));
    let mut fifth = task("05", "z");
    fifth.due_date = Some(date(2024, 1, 5));
    let tasks = vec![none, tenth, fifth];

    assert_eq!(
        ids(&visible_tasks(&tasks, &sorted_by(SortKey::DueDate))),
        vec!["05", "10", "none"]
    );
}

#[test]
fn created_at_sort_is_newest_first() {
    let mut old = task("old", "x");
    old.created_at = 1;
    let mut new = task("new", "y");
    new.created_at = 3;
    let mut mid = task("mid", "z");
    mid.created_at = 2;
    let tasks = vec![old, new, mid];

    assert_eq!(
        ids(&visible_tasks(&tasks, &sorted_by(SortKey::CreatedAt))),
        vec!["new", "mid", "old"]
    );
}

#[test]
fn title_sort_uses_japanese_collation() {
    let tasks = vec![
        task("sa", "さくら"),
        task("a", "あさがお"),
        task("ka", "かえで"),
    ];
    assert_eq!(
        ids(&visible_tasks(&tasks, &sorted_by(SortKey::Title))),
        vec!["a", "ka", "sa"]
    );
}

#[test]
fn ties_keep_base_order() {
    let tasks = vec![task("1", "same"), task("2", "same"), task("3", "same")];
    for key in [SortKey::Unsorted, SortKey::Priority, SortKey::DueDate, SortKey::Title] {
        assert_eq!(
            ids(&visible_tasks(&tasks, &sorted_by(key))),
            vec!["1", "2", "3"]
        );
    }
}

#[test]
fn visible_tasks_is_idempotent() {
    let mut a = task("a", "b-title");
    a.priority = Priority::Low;
    let mut b = task("b", "a-title");
    b.completed = true;
    let c = task("c", "c-title");
    let tasks = vec![a, b, c];
    let query = TaskQuery::from_controls("title", "all", "all", "all", "priority");

    let first = ids(&visible_tasks(&tasks, &query));
    let second = ids(&visible_tasks(&tasks, &query));
    assert_eq!(first, second);
    assert_eq!(first, vec!["c", "a", "b"]);
}
