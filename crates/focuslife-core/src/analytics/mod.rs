//! Habit analytics for FocusLife
//!
//! Pure, side-effect-free derivations over habits and their completion
//! entries: streaks, daily/weekly progress, monthly consistency, a
//! consistency ranking, achievements, and the composite epic level.
//! Everything here is a function of `(habits, entries, reference_date)`
//! and is recomputed in full from an immutable snapshot.

mod dashboard;
mod epic;
mod progress;
mod ranking;
mod streak;

pub use dashboard::{build_dashboard, DashboardReport, HabitSummary};

pub use epic::{
    compute_epic_level, evaluate_achievements, level_for_points, next_level_score, player_stats,
    title_for_score, Achievement, EpicLevel, EpicMetrics, PlayerStats, POINTS_PER_LEVEL,
};

pub use progress::{
    active_days_this_month, calendar_heatmap, consistency, daily_progress, month_elapsed_days,
    week_start, weekly_progress, DailyProgress, HeatmapCell, WeeklyProgress,
};

pub use ranking::{rank_by_consistency, HabitRank};

pub use streak::{global_streak, habit_streak, STREAK_WINDOW_DAYS};
