//! SQLite-based storage for habits, completion entries, tasks, and
//! transactions.
//!
//! The store owns the two invariants the analytics layer relies on:
//! - at most one entry per (habit_id, date), enforced by a unique index
//!   and an upsert that increments the existing count;
//! - deleting a habit removes its entries first, in one transaction.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

use super::data_dir;
use crate::error::{CoreError, DatabaseError};
use crate::finance::{Transaction, TransactionFilter, TransactionKind};
use crate::habit::{Frequency, Habit, HabitEntry};
use crate::task::{Task, TaskFilter, TaskPriority, TaskStatus};

// === Helper Functions ===

/// Format a calendar day for database storage
fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a calendar day from database storage with fallback to today
fn parse_date_fallback(date_str: &str) -> NaiveDate {
    NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap_or_else(|_| Utc::now().date_naive())
}

/// Parse datetime from RFC3339 string with fallback to current time
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse task status from database string
fn parse_task_status(status_str: &str) -> TaskStatus {
    match status_str {
        "in_progress" => TaskStatus::InProgress,
        "done" => TaskStatus::Done,
        _ => TaskStatus::Pending,
    }
}

/// Format task status for database storage
fn format_task_status(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "pending",
        TaskStatus::InProgress => "in_progress",
        TaskStatus::Done => "done",
    }
}

/// Parse task priority from database string
fn parse_task_priority(priority_str: &str) -> TaskPriority {
    match priority_str {
        "low" => TaskPriority::Low,
        "high" => TaskPriority::High,
        _ => TaskPriority::Medium,
    }
}

/// Format task priority for database storage
fn format_task_priority(priority: TaskPriority) -> &'static str {
    match priority {
        TaskPriority::Low => "low",
        TaskPriority::Medium => "medium",
        TaskPriority::High => "high",
    }
}

/// Parse transaction kind from database string
fn parse_transaction_kind(kind_str: &str) -> TransactionKind {
    match kind_str {
        "income" => TransactionKind::Income,
        _ => TransactionKind::Expense,
    }
}

/// Format transaction kind for database storage
fn format_transaction_kind(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::Income => "income",
        TransactionKind::Expense => "expense",
    }
}

/// Build a Habit from a database row
fn row_to_habit(row: &rusqlite::Row) -> Result<Habit, rusqlite::Error> {
    let frequency_str: String = row.get(2)?;
    let created_at_str: String = row.get(5)?;

    Ok(Habit {
        id: row.get(0)?,
        name: row.get(1)?,
        frequency: Frequency::parse(&frequency_str),
        target: row.get(3)?,
        is_active: row.get(4)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a HabitEntry from a database row
fn row_to_entry(row: &rusqlite::Row) -> Result<HabitEntry, rusqlite::Error> {
    let date_str: String = row.get(2)?;

    Ok(HabitEntry {
        id: row.get(0)?,
        habit_id: row.get(1)?,
        date: parse_date_fallback(&date_str),
        count: row.get(3)?,
        notes: row.get(4)?,
    })
}

/// Build a Task from a database row
fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let status_str: String = row.get(2)?;
    let priority_str: String = row.get(3)?;
    let due_date_str: Option<String> = row.get(4)?;
    let created_at_str: String = row.get(5)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        status: parse_task_status(&status_str),
        priority: parse_task_priority(&priority_str),
        due_date: due_date_str.as_deref().map(parse_date_fallback),
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// Build a Transaction from a database row
fn row_to_transaction(row: &rusqlite::Row) -> Result<Transaction, rusqlite::Error> {
    let kind_str: String = row.get(2)?;
    let date_str: String = row.get(4)?;
    let created_at_str: String = row.get(6)?;

    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        kind: parse_transaction_kind(&kind_str),
        category: row.get(3)?,
        date: parse_date_fallback(&date_str),
        notes: row.get(5)?,
        created_at: parse_datetime_fallback(&created_at_str),
    })
}

/// SQLite database for FocusLife data.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Get a reference to the underlying SQLite connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Open the database at `~/.config/focuslife/focuslife.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("focuslife.db");
        let conn = Connection::open(&path)
            .map_err(|source| DatabaseError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate().map_err(DatabaseError::from)?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(DatabaseError::from)?;
        let db = Self { conn };
        db.migrate().map_err(DatabaseError::from)?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS habits (
                id         TEXT PRIMARY KEY,
                name       TEXT NOT NULL,
                frequency  TEXT NOT NULL DEFAULT 'daily',
                target     INTEGER NOT NULL DEFAULT 1,
                is_active  INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS habit_entries (
                id       TEXT PRIMARY KEY,
                habit_id TEXT NOT NULL,
                date     TEXT NOT NULL,
                count    INTEGER NOT NULL DEFAULT 1,
                notes    TEXT,
                UNIQUE(habit_id, date)
            );

            CREATE TABLE IF NOT EXISTS tasks (
                id         TEXT PRIMARY KEY,
                title      TEXT NOT NULL,
                status     TEXT NOT NULL DEFAULT 'pending',
                priority   TEXT NOT NULL DEFAULT 'medium',
                due_date   TEXT,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS transactions (
                id         TEXT PRIMARY KEY,
                amount     REAL NOT NULL,
                kind       TEXT NOT NULL,
                category   TEXT NOT NULL,
                date       TEXT NOT NULL,
                notes      TEXT,
                created_at TEXT NOT NULL
            );

            -- Create indexes for common query patterns
            CREATE INDEX IF NOT EXISTS idx_entries_habit_date ON habit_entries(habit_id, date);
            CREATE INDEX IF NOT EXISTS idx_tasks_status ON tasks(status);
            CREATE INDEX IF NOT EXISTS idx_transactions_date ON transactions(date);",
        )?;
        Ok(())
    }

    // === Habits ===

    /// Insert a new habit.
    pub fn create_habit(&self, habit: &Habit) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO habits (id, name, frequency, target, is_active, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                habit.id,
                habit.name,
                habit.frequency.to_string(),
                habit.target,
                habit.is_active,
                habit.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_habit(&self, id: &str) -> Result<Option<Habit>, DatabaseError> {
        let habit = self
            .conn
            .query_row(
                "SELECT id, name, frequency, target, is_active, created_at
                 FROM habits WHERE id = ?1",
                params![id],
                row_to_habit,
            )
            .optional()?;
        Ok(habit)
    }

    /// List habits in creation order, active only unless asked otherwise.
    pub fn list_habits(&self, include_inactive: bool) -> Result<Vec<Habit>, DatabaseError> {
        let sql = if include_inactive {
            "SELECT id, name, frequency, target, is_active, created_at
             FROM habits ORDER BY created_at"
        } else {
            "SELECT id, name, frequency, target, is_active, created_at
             FROM habits WHERE is_active = 1 ORDER BY created_at"
        };
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([], row_to_habit)?;
        let mut habits = Vec::new();
        for row in rows {
            habits.push(row?);
        }
        Ok(habits)
    }

    /// Update a habit in place.
    ///
    /// # Errors
    /// Returns `NotFound` if no habit has the given id.
    pub fn update_habit(&self, habit: &Habit) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE habits SET name = ?2, frequency = ?3, target = ?4, is_active = ?5
             WHERE id = ?1",
            params![
                habit.id,
                habit.name,
                habit.frequency.to_string(),
                habit.target,
                habit.is_active,
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                resource: "habit",
                id: habit.id.clone(),
            });
        }
        Ok(())
    }

    /// Delete a habit and all of its entries, in one transaction.
    ///
    /// # Errors
    /// Returns `NotFound` if no habit has the given id; nothing is
    /// deleted in that case.
    pub fn delete_habit(&self, id: &str) -> Result<(), DatabaseError> {
        let tx = self.conn.unchecked_transaction()?;
        tx.execute("DELETE FROM habit_entries WHERE habit_id = ?1", params![id])?;
        let deleted = tx.execute("DELETE FROM habits WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound {
                resource: "habit",
                id: id.to_string(),
            });
        }
        tx.commit()?;
        Ok(())
    }

    // === Habit entries ===

    /// Record a completion for a habit on a day.
    ///
    /// First completion of the day inserts an entry with count 1; marking
    /// again the same day increments the existing entry instead of
    /// creating a duplicate. Returns the resulting entry.
    ///
    /// # Errors
    /// Returns `NotFound` if no habit has the given id.
    pub fn mark_complete(
        &self,
        habit_id: &str,
        date: NaiveDate,
        notes: Option<&str>,
    ) -> Result<HabitEntry, DatabaseError> {
        if self.get_habit(habit_id)?.is_none() {
            return Err(DatabaseError::NotFound {
                resource: "habit",
                id: habit_id.to_string(),
            });
        }

        self.conn.execute(
            "INSERT INTO habit_entries (id, habit_id, date, count, notes)
             VALUES (?1, ?2, ?3, 1, ?4)
             ON CONFLICT(habit_id, date)
             DO UPDATE SET count = count + 1, notes = COALESCE(excluded.notes, notes)",
            params![
                Uuid::new_v4().to_string(),
                habit_id,
                format_date(date),
                notes,
            ],
        )?;

        self.entry_for_day(habit_id, date)?
            .ok_or_else(|| DatabaseError::QueryFailed("upserted entry not found".to_string()))
    }

    /// Remove a day's entry entirely (not a decrement).
    ///
    /// Returns whether an entry existed.
    pub fn unmark(&self, habit_id: &str, date: NaiveDate) -> Result<bool, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM habit_entries WHERE habit_id = ?1 AND date = ?2",
            params![habit_id, format_date(date)],
        )?;
        Ok(deleted > 0)
    }

    pub fn entry_for_day(
        &self,
        habit_id: &str,
        date: NaiveDate,
    ) -> Result<Option<HabitEntry>, DatabaseError> {
        let entry = self
            .conn
            .query_row(
                "SELECT id, habit_id, date, count, notes
                 FROM habit_entries WHERE habit_id = ?1 AND date = ?2",
                params![habit_id, format_date(date)],
                row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    pub fn entries_for_habit(&self, habit_id: &str) -> Result<Vec<HabitEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, count, notes
             FROM habit_entries WHERE habit_id = ?1 ORDER BY date",
        )?;
        let rows = stmt.query_map(params![habit_id], row_to_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    /// Entries for a habit within `[from, to]`, inclusive on both ends.
    pub fn entries_between(
        &self,
        habit_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<HabitEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, count, notes
             FROM habit_entries
             WHERE habit_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date",
        )?;
        let rows = stmt.query_map(
            params![habit_id, format_date(from), format_date(to)],
            row_to_entry,
        )?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    pub fn all_entries(&self) -> Result<Vec<HabitEntry>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, habit_id, date, count, notes
             FROM habit_entries ORDER BY date",
        )?;
        let rows = stmt.query_map([], row_to_entry)?;
        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }
        Ok(entries)
    }

    // === Tasks ===

    pub fn create_task(&self, task: &Task) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO tasks (id, title, status, priority, due_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                task.id,
                task.title,
                format_task_status(task.status),
                format_task_priority(task.priority),
                task.due_date.map(format_date),
                task.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    pub fn get_task(&self, id: &str) -> Result<Option<Task>, DatabaseError> {
        let task = self
            .conn
            .query_row(
                "SELECT id, title, status, priority, due_date, created_at
                 FROM tasks WHERE id = ?1",
                params![id],
                row_to_task,
            )
            .optional()?;
        Ok(task)
    }

    /// List tasks in creation order, applying the filter predicate.
    pub fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, title, status, priority, due_date, created_at
             FROM tasks ORDER BY created_at",
        )?;
        let rows = stmt.query_map([], row_to_task)?;
        let mut tasks = Vec::new();
        for row in rows {
            let task = row?;
            if filter.matches(&task) {
                tasks.push(task);
            }
        }
        Ok(tasks)
    }

    /// Update a task in place.
    ///
    /// # Errors
    /// Returns `NotFound` if no task has the given id.
    pub fn update_task(&self, task: &Task) -> Result<(), DatabaseError> {
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?2, status = ?3, priority = ?4, due_date = ?5
             WHERE id = ?1",
            params![
                task.id,
                task.title,
                format_task_status(task.status),
                format_task_priority(task.priority),
                task.due_date.map(format_date),
            ],
        )?;
        if changed == 0 {
            return Err(DatabaseError::NotFound {
                resource: "task",
                id: task.id.clone(),
            });
        }
        Ok(())
    }

    pub fn delete_task(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound {
                resource: "task",
                id: id.to_string(),
            });
        }
        Ok(())
    }

    // === Transactions ===

    pub fn create_transaction(&self, tx: &Transaction) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO transactions (id, amount, kind, category, date, notes, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                tx.id,
                tx.amount,
                format_transaction_kind(tx.kind),
                tx.category,
                format_date(tx.date),
                tx.notes,
                tx.created_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }

    /// List transactions in date order, applying the filter predicate.
    pub fn list_transactions(
        &self,
        filter: &TransactionFilter,
    ) -> Result<Vec<Transaction>, DatabaseError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, amount, kind, category, date, notes, created_at
             FROM transactions ORDER BY date, created_at",
        )?;
        let rows = stmt.query_map([], row_to_transaction)?;
        let mut transactions = Vec::new();
        for row in rows {
            let tx = row?;
            if filter.matches(&tx) {
                transactions.push(tx);
            }
        }
        Ok(transactions)
    }

    pub fn delete_transaction(&self, id: &str) -> Result<(), DatabaseError> {
        let deleted = self
            .conn
            .execute("DELETE FROM transactions WHERE id = ?1", params![id])?;
        if deleted == 0 {
            return Err(DatabaseError::NotFound {
                resource: "transaction",
                id: id.to_string(),
            });
        }
        Ok(())
    }
}
