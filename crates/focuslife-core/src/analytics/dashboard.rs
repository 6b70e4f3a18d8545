//! The combined dashboard report.
//!
//! One shared entry point assembles every derived view from a single
//! snapshot of habits and entries, so all presentation contexts read the
//! same numbers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::epic::{
    compute_epic_level, evaluate_achievements, player_stats, Achievement, EpicLevel, PlayerStats,
};
use crate::analytics::progress::{
    calendar_heatmap, consistency, daily_progress, weekly_progress, DailyProgress, HeatmapCell,
    WeeklyProgress,
};
use crate::analytics::ranking::{rank_by_consistency, HabitRank};
use crate::analytics::streak::habit_streak;
use crate::habit::{Habit, HabitEntry};

/// Per-habit derived metrics for the reference day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HabitSummary {
    pub habit_id: String,
    pub name: String,
    pub streak: u32,
    pub daily: DailyProgress,
    pub weekly: WeeklyProgress,
    pub consistency: u32,
}

/// Everything a dashboard renders, computed in one pass.
///
/// Inactive habits are excluded from `habits` and `habit_ranking`, but
/// their history still feeds the player stats, achievements, epic level,
/// and heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub player_stats: PlayerStats,
    pub habit_ranking: Vec<HabitRank>,
    pub achievements: Vec<Achievement>,
    pub epic_level: EpicLevel,
    pub calendar_heatmap: Vec<HeatmapCell>,
    pub habits: Vec<HabitSummary>,
}

/// Build the full dashboard from an immutable snapshot.
pub fn build_dashboard(
    habits: &[Habit],
    entries: &[HabitEntry],
    reference: NaiveDate,
) -> DashboardReport {
    let achievements = evaluate_achievements(entries, reference);
    let epic_level = compute_epic_level(habits, entries, &achievements, reference);

    let summaries = habits
        .iter()
        .filter(|h| h.is_active)
        .map(|h| HabitSummary {
            habit_id: h.id.clone(),
            name: h.name.clone(),
            streak: habit_streak(entries, &h.id, reference),
            daily: daily_progress(h, entries, reference),
            weekly: weekly_progress(h, entries, reference),
            consistency: consistency(entries, &h.id, reference),
        })
        .collect();

    DashboardReport {
        player_stats: player_stats(entries, reference),
        habit_ranking: rank_by_consistency(habits, entries, reference),
        achievements,
        epic_level,
        calendar_heatmap: calendar_heatmap(entries, reference),
        habits: summaries,
    }
}
