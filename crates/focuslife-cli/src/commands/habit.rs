//! Habit tracking commands for CLI.

use chrono::Duration;
use clap::Subcommand;
use focuslife_core::analytics::{consistency, daily_progress, habit_streak, weekly_progress};
use focuslife_core::{Database, EntryCache, Frequency, Habit};
use serde::Serialize;

use crate::common::{parse_date, today};

#[derive(Subcommand)]
pub enum HabitAction {
    /// Create a new habit
    Add {
        /// Habit name
        name: String,
        /// Cadence: daily, weekly, monthly, or "N days per week"
        #[arg(long, default_value = "daily")]
        frequency: String,
        /// Completions per day for the day to count as done
        #[arg(long, default_value = "1")]
        target: u32,
    },
    /// List habits
    List {
        /// Include inactive habits
        #[arg(long)]
        all: bool,
    },
    /// Mark a habit complete for a day (repeatable; same day increments)
    Done {
        /// Habit ID
        id: String,
        /// Day to mark, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
        /// Optional note for the day
        #[arg(long)]
        notes: Option<String>,
    },
    /// Remove a day's completion entry entirely
    Undo {
        /// Habit ID
        id: String,
        /// Day to unmark, YYYY-MM-DD (default: today)
        #[arg(long)]
        date: Option<String>,
    },
    /// Update a habit
    Update {
        /// Habit ID
        id: String,
        /// New name
        #[arg(long)]
        name: Option<String>,
        /// New cadence
        #[arg(long)]
        frequency: Option<String>,
        /// New daily target
        #[arg(long)]
        target: Option<u32>,
        /// Set active status
        #[arg(long)]
        active: Option<bool>,
    },
    /// Delete a habit and its history
    Delete {
        /// Habit ID
        id: String,
    },
    /// Derived metrics for one habit
    Stats {
        /// Habit ID
        id: String,
    },
}

#[derive(Serialize)]
struct HabitStats {
    habit_id: String,
    name: String,
    streak: u32,
    daily: focuslife_core::analytics::DailyProgress,
    weekly: focuslife_core::analytics::WeeklyProgress,
    consistency: u32,
}

pub fn run(action: HabitAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;

    match action {
        HabitAction::Add {
            name,
            frequency,
            target,
        } => {
            let habit = Habit::new(name, Frequency::parse(&frequency), target)?;
            db.create_habit(&habit)?;
            println!("Habit created: {}", habit.id);
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::List { all } => {
            let habits = db.list_habits(all)?;
            println!("{}", serde_json::to_string_pretty(&habits)?);
        }
        HabitAction::Done { id, date, notes } => {
            let day = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            let entry = db.mark_complete(&id, day, notes.as_deref())?;
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        HabitAction::Undo { id, date } => {
            let day = match date {
                Some(d) => parse_date(&d)?,
                None => today(),
            };
            if db.unmark(&id, day)? {
                println!("Entry removed: {id} on {day}");
            } else {
                println!("No entry for {id} on {day}");
            }
        }
        HabitAction::Update {
            id,
            name,
            frequency,
            target,
            active,
        } => {
            let mut habit = db
                .get_habit(&id)?
                .ok_or(format!("Habit not found: {id}"))?;

            if let Some(n) = name {
                habit.name = n;
            }
            if let Some(f) = frequency {
                habit.frequency = Frequency::parse(&f);
            }
            if let Some(t) = target {
                habit.target = t;
            }
            if let Some(a) = active {
                habit.is_active = a;
            }

            db.update_habit(&habit)?;
            println!("Habit updated:");
            println!("{}", serde_json::to_string_pretty(&habit)?);
        }
        HabitAction::Delete { id } => {
            db.delete_habit(&id)?;
            println!("Habit deleted: {id}");
        }
        HabitAction::Stats { id } => {
            let habit = db
                .get_habit(&id)?
                .ok_or(format!("Habit not found: {id}"))?;

            // One cached window covers the streak lookback, the current
            // week, and the current month
            let reference = today();
            let mut cache = EntryCache::new(&db);
            let entries = cache
                .entries_between(&habit.id, reference - Duration::days(60), reference)?
                .to_vec();

            let stats = HabitStats {
                habit_id: habit.id.clone(),
                name: habit.name.clone(),
                streak: habit_streak(&entries, &habit.id, reference),
                daily: daily_progress(&habit, &entries, reference),
                weekly: weekly_progress(&habit, &entries, reference),
                consistency: consistency(&entries, &habit.id, reference),
            };
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
    }
    Ok(())
}
