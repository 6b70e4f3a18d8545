//! Consistency ranking across active habits.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::progress::{consistency, weekly_progress, WeeklyProgress};
use crate::analytics::streak::habit_streak;
use crate::habit::{Habit, HabitEntry};

/// One row of the consistency leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitRank {
    pub habit_id: String,
    pub name: String,
    pub consistency: u32,
    pub streak: u32,
    pub weekly: WeeklyProgress,
}

/// Active habits sorted descending by monthly consistency.
///
/// Ties keep the input order: the sort is stable and no secondary key is
/// applied.
pub fn rank_by_consistency(
    habits: &[Habit],
    entries: &[HabitEntry],
    reference: NaiveDate,
) -> Vec<HabitRank> {
    let mut ranking: Vec<HabitRank> = habits
        .iter()
        .filter(|h| h.is_active)
        .map(|h| HabitRank {
            habit_id: h.id.clone(),
            name: h.name.clone(),
            consistency: consistency(entries, &h.id, reference),
            streak: habit_streak(entries, &h.id, reference),
            weekly: weekly_progress(h, entries, reference),
        })
        .collect();

    ranking.sort_by(|a, b| b.consistency.cmp(&a.consistency));
    ranking
}
