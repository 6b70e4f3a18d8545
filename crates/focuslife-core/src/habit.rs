//! Habit domain types.
//!
//! A habit is a recurring activity with a per-day completion target and a
//! cadence. Completions are recorded as dated entries, at most one per
//! (habit, day); repeating a completion on the same day increments the
//! existing entry's count instead of creating a second row.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::ValidationError;

/// How often a habit is expected to be completed.
///
/// Parsed once at the data boundary from either the cadence words
/// (`daily`, `weekly`, `monthly`, case-insensitive) or the free-text
/// `"N days per week"` convention. Anything unrecognized falls back to
/// [`Frequency::Daily`] rather than erroring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Frequency {
    /// Every day of the week
    Daily,
    /// Once per week
    Weekly,
    /// Once per month
    Monthly,
    /// A fixed number of days per week (1-7)
    DaysPerWeek(u8),
}

impl Frequency {
    /// Parse a frequency string, falling back to `Daily` when unrecognized.
    pub fn parse(input: &str) -> Self {
        let normalized = input.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "daily" => return Frequency::Daily,
            "weekly" => return Frequency::Weekly,
            "monthly" => return Frequency::Monthly,
            _ => {}
        }

        // "N days per week" free-text convention, whitespace-tolerant
        let digits: String = normalized
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        if !digits.is_empty() {
            let rest: Vec<&str> = normalized[digits.len()..].split_whitespace().collect();
            if matches!(rest.as_slice(), ["day", "per", "week"] | ["days", "per", "week"]) {
                if let Ok(n) = digits.parse::<u8>() {
                    if (1..=7).contains(&n) {
                        return Frequency::DaysPerWeek(n);
                    }
                }
            }
        }

        Frequency::Daily
    }

    /// Number of days per week this habit is expected on.
    ///
    /// Used as the denominator for habit-level weekly completion ratios.
    pub fn weekly_target_days(&self) -> u32 {
        match self {
            Frequency::Daily => 7,
            Frequency::Weekly => 1,
            Frequency::Monthly => 1,
            Frequency::DaysPerWeek(n) => u32::from(*n),
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Frequency::Daily => write!(f, "daily"),
            Frequency::Weekly => write!(f, "weekly"),
            Frequency::Monthly => write!(f, "monthly"),
            Frequency::DaysPerWeek(n) => write!(f, "{n} days per week"),
        }
    }
}

impl From<String> for Frequency {
    fn from(value: String) -> Self {
        Frequency::parse(&value)
    }
}

impl From<Frequency> for String {
    fn from(value: Frequency) -> Self {
        value.to_string()
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Frequency::Daily
    }
}

/// A recurring user-defined activity with a per-day completion target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    pub name: String,
    pub frequency: Frequency,
    /// Minimum completions required per day for that day to count as done
    pub target: u32,
    /// Inactive habits are excluded from "today" aggregates but their
    /// history is retained
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Habit {
    /// Create a new active habit with a fresh id.
    ///
    /// # Errors
    /// Returns a validation error if the name is blank or the target is zero.
    pub fn new(
        name: impl Into<String>,
        frequency: Frequency,
        target: u32,
    ) -> Result<Self, ValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::invalid_value(
                "name",
                "habit name must not be blank",
            ));
        }
        if target == 0 {
            return Err(ValidationError::invalid_value(
                "target",
                "daily target must be at least 1",
            ));
        }

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            frequency,
            target,
            is_active: true,
            created_at: Utc::now(),
        })
    }
}

/// A dated completion record for a habit.
///
/// Invariant: at most one entry exists per (habit_id, date); the store
/// enforces this by incrementing `count` on re-marking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitEntry {
    pub id: String,
    pub habit_id: String,
    pub date: NaiveDate,
    pub count: u32,
    pub notes: Option<String>,
}
