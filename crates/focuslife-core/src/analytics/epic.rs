//! Gamification: player stats, achievements, and the epic level score.
//!
//! The epic score is a weighted sum of the global streak, average monthly
//! consistency, achievement rate, monthly activity, and a capped lifetime
//! level, mapped to a named tier by fixed thresholds. The weights
//! (2.0 / 1.5 / 1.2 / 1.3 / 5.0), the 20-level cap in the score term, and
//! the tier thresholds are tuning constants preserved for behavioral
//! parity; do not rebalance them here.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::progress::{active_days_this_month, consistency, month_elapsed_days};
use crate::analytics::streak::global_streak;
use crate::habit::{Habit, HabitEntry};

/// Lifetime points required per level.
pub const POINTS_PER_LEVEL: u64 = 50;

/// Tier thresholds, evaluated highest-first.
const TITLE_THRESHOLDS: [(u32, &str); 8] = [
    (300, "God tier"),
    (250, "Demigod"),
    (200, "Legendary hero"),
    (150, "Elite warrior"),
    (100, "Warrior"),
    (60, "Explorer"),
    (30, "Apprentice"),
    (0, "Novice"),
];

/// The ordered score ladder used for `next_level_score`.
const SCORE_LADDER: [u32; 7] = [30, 60, 100, 150, 200, 250, 300];

/// Whole-collection lifetime and month-to-date statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    /// Sum of all entry counts ever logged
    pub total_points: u64,
    /// `total_points / 50 + 1`
    pub level: u32,
    /// Consecutive days with any habit completed, ending today
    pub current_streak: u32,
    pub active_days_this_month: u32,
    pub days_elapsed_this_month: u32,
    /// `round(active_days / days_elapsed * 100)`
    pub monthly_activity_pct: u32,
}

/// A fixed milestone badge. Every badge always exists, earned or not, so
/// a UI can render locked and unlocked states from the same list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub earned: bool,
    /// Current value of the tracked quantity
    pub progress: u32,
    /// Value required to earn the badge
    pub goal: u32,
}

impl Achievement {
    fn new(id: &str, title: &str, description: &str, earned: bool, progress: u32, goal: u32) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            earned,
            progress,
            goal,
        }
    }
}

/// Metric breakdown behind an epic score, kept for explainability.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpicMetrics {
    pub current_streak: u32,
    pub average_consistency: f64,
    pub achievement_rate: f64,
    pub monthly_activity: f64,
    pub level: u32,
}

/// The composite gamification result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpicLevel {
    pub title: String,
    pub score: u32,
    /// Smallest ladder threshold strictly above `score`; 300 once capped
    pub next_level_score: u32,
    pub metrics: EpicMetrics,
}

/// Lifetime and month-to-date player statistics.
pub fn player_stats(entries: &[HabitEntry], reference: NaiveDate) -> PlayerStats {
    let total_points: u64 = entries.iter().map(|e| u64::from(e.count)).sum();
    let active_days = active_days_this_month(entries, reference);
    let days_elapsed = month_elapsed_days(reference);

    PlayerStats {
        total_points,
        level: level_for_points(total_points),
        current_streak: global_streak(entries, reference),
        active_days_this_month: active_days,
        days_elapsed_this_month: days_elapsed,
        monthly_activity_pct: (f64::from(active_days) / f64::from(days_elapsed) * 100.0).round()
            as u32,
    }
}

/// Evaluate the fixed achievement list.
///
/// Streak and level tiers earn only the single highest-qualifying badge;
/// lower tiers stay unearned and show progress instead.
pub fn evaluate_achievements(entries: &[HabitEntry], reference: NaiveDate) -> Vec<Achievement> {
    let streak = global_streak(entries, reference);
    let total_points: u64 = entries.iter().map(|e| u64::from(e.count)).sum();
    let level = level_for_points(total_points);
    let active_days = active_days_this_month(entries, reference);
    let days_elapsed = month_elapsed_days(reference);

    let streak_tier = highest_tier(streak, &[30, 21, 7]);
    let level_tier = highest_tier(level, &[10, 5]);
    let perfect_month = active_days >= days_elapsed && days_elapsed >= 7;

    vec![
        Achievement::new(
            "streak_30",
            "Unstoppable",
            "Complete a habit 30 days in a row",
            streak_tier == Some(30),
            streak,
            30,
        ),
        Achievement::new(
            "streak_21",
            "Habit Former",
            "Complete a habit 21 days in a row",
            streak_tier == Some(21),
            streak,
            21,
        ),
        Achievement::new(
            "streak_7",
            "One Week Strong",
            "Complete a habit 7 days in a row",
            streak_tier == Some(7),
            streak,
            7,
        ),
        Achievement::new(
            "level_10",
            "Seasoned",
            "Reach level 10",
            level_tier == Some(10),
            level,
            10,
        ),
        Achievement::new(
            "level_5",
            "Committed",
            "Reach level 5",
            level_tier == Some(5),
            level,
            5,
        ),
        Achievement::new(
            "perfect_month",
            "Perfect Month",
            "Stay active every day of the month so far",
            perfect_month,
            active_days,
            days_elapsed.max(7),
        ),
    ]
}

/// Compute the composite epic level from pre-evaluated achievements.
pub fn compute_epic_level(
    habits: &[Habit],
    entries: &[HabitEntry],
    achievements: &[Achievement],
    reference: NaiveDate,
) -> EpicLevel {
    let consistencies: Vec<u32> = habits
        .iter()
        .filter(|h| has_entry_this_month(entries, &h.id, reference))
        .map(|h| consistency(entries, &h.id, reference))
        .collect();
    let average_consistency = if consistencies.is_empty() {
        0.0
    } else {
        f64::from(consistencies.iter().sum::<u32>()) / consistencies.len() as f64
    };

    let earned = achievements.iter().filter(|a| a.earned).count();
    let achievement_rate = if achievements.is_empty() {
        0.0
    } else {
        100.0 * earned as f64 / achievements.len() as f64
    };

    let active_days = active_days_this_month(entries, reference);
    let days_elapsed = month_elapsed_days(reference);
    let monthly_activity = 100.0 * f64::from(active_days) / f64::from(days_elapsed);

    let current_streak = global_streak(entries, reference);
    let total_points: u64 = entries.iter().map(|e| u64::from(e.count)).sum();
    let level = level_for_points(total_points);

    let score = (f64::from(current_streak) * 2.0
        + average_consistency * 1.5
        + achievement_rate * 1.2
        + monthly_activity * 1.3
        + f64::from(level.min(20)) * 5.0)
        .round() as u32;

    EpicLevel {
        title: title_for_score(score).to_string(),
        score,
        next_level_score: next_level_score(score),
        metrics: EpicMetrics {
            current_streak,
            average_consistency,
            achievement_rate,
            monthly_activity,
            level,
        },
    }
}

/// Lifetime level: one level per 50 points, starting at 1.
pub fn level_for_points(total_points: u64) -> u32 {
    (total_points / POINTS_PER_LEVEL) as u32 + 1
}

/// Name the tier a score falls in, evaluated highest-first.
pub fn title_for_score(score: u32) -> &'static str {
    TITLE_THRESHOLDS
        .iter()
        .find(|(threshold, _)| score >= *threshold)
        .map(|(_, title)| *title)
        .unwrap_or("Novice")
}

/// The next ladder threshold strictly above `score`, or 300 once capped.
pub fn next_level_score(score: u32) -> u32 {
    SCORE_LADDER
        .iter()
        .copied()
        .find(|threshold| *threshold > score)
        .unwrap_or(300)
}

fn highest_tier(value: u32, tiers_desc: &[u32]) -> Option<u32> {
    tiers_desc.iter().copied().find(|tier| value >= *tier)
}

fn has_entry_this_month(entries: &[HabitEntry], habit_id: &str, reference: NaiveDate) -> bool {
    use chrono::Datelike;
    entries.iter().any(|e| {
        e.habit_id == habit_id
            && e.date.year() == reference.year()
            && e.date.month() == reference.month()
            && e.date.day() <= reference.day()
    })
}
