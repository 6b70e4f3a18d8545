//! Integration tests for the store and the read-through entry cache.

use chrono::NaiveDate;
use focuslife_core::analytics::habit_streak;
use focuslife_core::{
    monthly_summary, Database, EntryCache, Frequency, Habit, Task, TaskFilter, TaskPriority,
    TaskStatus, Transaction, TransactionFilter, TransactionKind,
};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

#[test]
fn cached_reads_power_streaks_across_invalidation() {
    let db = Database::open_memory().unwrap();
    let habit = Habit::new("Read", Frequency::Daily, 1).unwrap();
    db.create_habit(&habit).unwrap();

    let today = date(2024, 3, 13);
    db.mark_complete(&habit.id, date(2024, 3, 12), None).unwrap();

    let mut cache = EntryCache::new(&db);
    let from = date(2024, 2, 13);

    let entries = cache.entries_between(&habit.id, from, today).unwrap().to_vec();
    assert_eq!(habit_streak(&entries, &habit.id, today), 0);

    // Complete today, then invalidate so the next read sees it
    db.mark_complete(&habit.id, today, None).unwrap();
    cache.invalidate(&habit.id);

    let entries = cache.entries_between(&habit.id, from, today).unwrap().to_vec();
    assert_eq!(habit_streak(&entries, &habit.id, today), 2);
}

#[test]
fn habit_lifecycle_end_to_end() {
    let db = Database::open_memory().unwrap();
    let mut habit = Habit::new("Stretch", Frequency::parse("5 days per week"), 1).unwrap();
    db.create_habit(&habit).unwrap();

    db.mark_complete(&habit.id, date(2024, 3, 11), None).unwrap();
    db.mark_complete(&habit.id, date(2024, 3, 12), Some("morning")).unwrap();

    // Deactivate: drops out of the default listing, history stays
    habit.is_active = false;
    db.update_habit(&habit).unwrap();
    assert!(db.list_habits(false).unwrap().is_empty());
    assert_eq!(db.entries_for_habit(&habit.id).unwrap().len(), 2);

    // Delete: habit and entries both go
    db.delete_habit(&habit.id).unwrap();
    assert!(db.get_habit(&habit.id).unwrap().is_none());
    assert!(db.entries_for_habit(&habit.id).unwrap().is_empty());
}

#[test]
fn tasks_and_transactions_are_independent_resources() {
    let db = Database::open_memory().unwrap();

    let mut task = Task::new("File taxes", TaskPriority::High, Some(date(2024, 4, 15))).unwrap();
    db.create_task(&task).unwrap();
    task.status = TaskStatus::InProgress;
    db.update_task(&task).unwrap();

    let open_tasks = db
        .list_tasks(&TaskFilter {
            status: Some(TaskStatus::InProgress),
            due_before: Some(date(2024, 4, 30)),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(open_tasks.len(), 1);

    for (amount, kind, category, day) in [
        (2500.0, TransactionKind::Income, "salary", 1),
        (900.0, TransactionKind::Expense, "rent", 2),
        (120.0, TransactionKind::Expense, "food", 8),
        (30.0, TransactionKind::Expense, "food", 21),
    ] {
        let tx = Transaction::new(amount, kind, category, date(2024, 3, day), None).unwrap();
        db.create_transaction(&tx).unwrap();
    }

    let march = db
        .list_transactions(&TransactionFilter {
            from: Some(date(2024, 3, 1)),
            to: Some(date(2024, 3, 31)),
            ..Default::default()
        })
        .unwrap();
    let summary = monthly_summary(&march, 2024, 3);
    assert_eq!(summary.income, 2500.0);
    assert_eq!(summary.expense, 1050.0);
    assert_eq!(summary.net, 1450.0);
    assert_eq!(summary.by_category[0].category, "rent");
    assert_eq!(summary.by_category[1].total, 150.0);
}
