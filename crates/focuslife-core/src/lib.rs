//! # FocusLife Core Library
//!
//! This library provides the core business logic for FocusLife, a
//! personal-productivity tool combining habit tracking, task management,
//! and personal finance logging. It implements a CLI-first philosophy
//! where all operations are available via a standalone CLI binary, with
//! any GUI being a thin layer over the same core library.
//!
//! ## Architecture
//!
//! - **Analytics**: Pure, side-effect-free derivations over habits and
//!   entries (streaks, progress, consistency, gamification), recomputed
//!   in full from an immutable snapshot on every call
//! - **Storage**: SQLite-based habit/task/transaction storage and
//!   TOML-based configuration
//! - **Domain**: Habits with a structured frequency type, tasks, and a
//!   finance ledger with filter predicates
//!
//! ## Key Components
//!
//! - [`analytics::build_dashboard`]: The combined report every
//!   presentation context consumes
//! - [`Database`]: Habit, entry, task, and transaction persistence
//! - [`EntryCache`]: Read-through entry fetching with manual invalidation
//! - [`Config`]: Application configuration management

pub mod analytics;
pub mod error;
pub mod finance;
pub mod habit;
pub mod storage;
pub mod task;

pub use analytics::{
    build_dashboard, Achievement, DashboardReport, EpicLevel, HabitRank, HabitSummary,
    PlayerStats, STREAK_WINDOW_DAYS,
};
pub use error::{ConfigError, CoreError, DatabaseError, ValidationError};
pub use finance::{
    monthly_summary, MonthlySummary, Transaction, TransactionFilter, TransactionKind,
};
pub use habit::{Frequency, Habit, HabitEntry};
pub use storage::{Config, Database, EntryCache};
pub use task::{Task, TaskFilter, TaskPriority, TaskStatus};
