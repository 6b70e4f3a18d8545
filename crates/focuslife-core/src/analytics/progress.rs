//! Daily, weekly, and monthly progress primitives.
//!
//! Weeks run Monday 00:00 through the following Monday (exclusive).
//! Monthly consistency is the share of elapsed days in the reference
//! month with at least one completion, as a rounded percentage.

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::habit::{Habit, HabitEntry};

/// Completions logged for a habit on a single day, against its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyProgress {
    /// Sum of entry counts on the day
    pub completed: u32,
    /// The habit's configured target, never reduced by progress
    pub target: u32,
}

/// A habit's completion picture for the current calendar week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyProgress {
    /// Distinct days this week with at least one completion
    pub completed: u32,
    /// Days in the week, always 7
    pub total: u32,
    /// `round(completed / 7 * 100)`
    pub percentage: u32,
    /// Frequency-aware weekly denominator for this habit
    pub target_days: u32,
    /// `round(completed / target_days * 100)`, capped at 100
    pub target_percentage: u32,
}

/// Total completions across all habits for one day of the heatmap month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub date: NaiveDate,
    pub count: u32,
}

/// The Monday that starts the week containing `reference`.
pub fn week_start(reference: NaiveDate) -> NaiveDate {
    reference - Duration::days(i64::from(reference.weekday().num_days_from_monday()))
}

/// Days elapsed so far in `reference`'s month, including the reference day.
pub fn month_elapsed_days(reference: NaiveDate) -> u32 {
    reference.day()
}

fn days_in_month(reference: NaiveDate) -> u32 {
    (28..=31)
        .take_while(|&d| reference.with_day(d).is_some())
        .last()
        .unwrap_or(28)
}

/// Sum of entry counts for `habit` on `date`.
pub fn daily_progress(habit: &Habit, entries: &[HabitEntry], date: NaiveDate) -> DailyProgress {
    let completed = entries
        .iter()
        .filter(|e| e.habit_id == habit.id && e.date == date)
        .map(|e| e.count)
        .sum();
    DailyProgress {
        completed,
        target: habit.target,
    }
}

/// Distinct completed days for `habit` in the week containing `reference`.
pub fn weekly_progress(habit: &Habit, entries: &[HabitEntry], reference: NaiveDate) -> WeeklyProgress {
    let start = week_start(reference);
    let end = start + Duration::days(7);

    let days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.habit_id == habit.id && e.count > 0)
        .filter(|e| e.date >= start && e.date < end)
        .map(|e| e.date)
        .collect();

    let completed = days.len() as u32;
    let target_days = habit.frequency.weekly_target_days();
    WeeklyProgress {
        completed,
        total: 7,
        percentage: rounded_pct(completed, 7),
        target_days,
        target_percentage: rounded_pct(completed, target_days).min(100),
    }
}

/// Unique completed days this month over days elapsed, as a percentage
/// rounded to the nearest integer.
pub fn consistency(entries: &[HabitEntry], habit_id: &str, reference: NaiveDate) -> u32 {
    let completed_days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.habit_id == habit_id && e.count > 0)
        .filter(|e| e.date.year() == reference.year() && e.date.month() == reference.month())
        .filter(|e| e.date.day() <= reference.day())
        .map(|e| e.date)
        .collect();

    rounded_pct(completed_days.len() as u32, month_elapsed_days(reference))
}

/// Unique days this month, up to the reference day, with a completion for
/// any habit.
pub fn active_days_this_month(entries: &[HabitEntry], reference: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.count > 0)
        .filter(|e| e.date.year() == reference.year() && e.date.month() == reference.month())
        .filter(|e| e.date.day() <= reference.day())
        .map(|e| e.date)
        .collect();
    days.len() as u32
}

/// One zero-filled cell per day of `reference`'s month, counting total
/// completions across all habits.
pub fn calendar_heatmap(entries: &[HabitEntry], reference: NaiveDate) -> Vec<HeatmapCell> {
    (1..=days_in_month(reference))
        .filter_map(|day| reference.with_day(day))
        .map(|date| HeatmapCell {
            date,
            count: entries
                .iter()
                .filter(|e| e.date == date)
                .map(|e| e.count)
                .sum(),
        })
        .collect()
}

fn rounded_pct(numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return 0;
    }
    (f64::from(numerator) / f64::from(denominator) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::Frequency;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn habit(id: &str, frequency: Frequency, target: u32) -> Habit {
        Habit {
            id: id.to_string(),
            name: format!("Habit {id}"),
            frequency,
            target,
            is_active: true,
            created_at: chrono::Utc::now(),
        }
    }

    fn entry(habit_id: &str, date: NaiveDate, count: u32) -> HabitEntry {
        HabitEntry {
            id: format!("{habit_id}-{date}"),
            habit_id: habit_id.to_string(),
            date,
            count,
            notes: None,
        }
    }

    #[test]
    fn week_start_is_monday() {
        // 2024-01-17 is a Wednesday
        assert_eq!(week_start(date(2024, 1, 17)), date(2024, 1, 15));
        // Monday maps to itself
        assert_eq!(week_start(date(2024, 1, 15)), date(2024, 1, 15));
        // Sunday belongs to the week started the previous Monday
        assert_eq!(week_start(date(2024, 1, 21)), date(2024, 1, 15));
    }

    #[test]
    fn daily_progress_sums_counts_and_keeps_target() {
        let h = habit("h1", Frequency::Daily, 3);
        let day = date(2024, 1, 17);
        let entries = vec![entry("h1", day, 2), entry("h2", day, 5)];

        let progress = daily_progress(&h, &entries, day);
        assert_eq!(progress.completed, 2);
        assert_eq!(progress.target, 3);
    }

    #[test]
    fn daily_progress_empty_day() {
        let h = habit("h1", Frequency::Daily, 1);
        let progress = daily_progress(&h, &[], date(2024, 1, 17));
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.target, 1);
    }

    #[test]
    fn weekly_progress_counts_distinct_days_in_window() {
        let h = habit("h1", Frequency::Daily, 1);
        // Reference Wednesday 2024-01-17; week is Mon 15th .. Sun 21st
        let entries = vec![
            entry("h1", date(2024, 1, 15), 1),
            entry("h1", date(2024, 1, 16), 2),
            entry("h1", date(2024, 1, 17), 1),
            entry("h1", date(2024, 1, 14), 1), // previous week, excluded
            entry("h1", date(2024, 1, 22), 1), // next week, excluded
        ];

        let weekly = weekly_progress(&h, &entries, date(2024, 1, 17));
        assert_eq!(weekly.completed, 3);
        assert_eq!(weekly.total, 7);
        assert_eq!(weekly.percentage, 43); // round(3/7*100)
    }

    #[test]
    fn weekly_percentage_is_exact_and_bounded() {
        let h = habit("h1", Frequency::Daily, 1);
        for completed_days in 0..=7u32 {
            let entries: Vec<HabitEntry> = (0..completed_days)
                .map(|d| entry("h1", date(2024, 1, 15) + Duration::days(i64::from(d)), 1))
                .collect();
            let weekly = weekly_progress(&h, &entries, date(2024, 1, 21));
            let expected = (f64::from(completed_days) / 7.0 * 100.0).round() as u32;
            assert_eq!(weekly.percentage, expected);
            assert!(weekly.percentage <= 100);
        }
    }

    #[test]
    fn weekly_target_uses_frequency_denominator() {
        let h = habit("h1", Frequency::DaysPerWeek(3), 1);
        let entries = vec![
            entry("h1", date(2024, 1, 15), 1),
            entry("h1", date(2024, 1, 16), 1),
        ];

        let weekly = weekly_progress(&h, &entries, date(2024, 1, 17));
        assert_eq!(weekly.target_days, 3);
        assert_eq!(weekly.target_percentage, 67); // round(2/3*100)
        assert_eq!(weekly.percentage, 29); // still round(2/7*100)
    }

    #[test]
    fn weekly_target_percentage_caps_at_100() {
        let h = habit("h1", Frequency::DaysPerWeek(2), 1);
        let entries: Vec<HabitEntry> = (0..5)
            .map(|d| entry("h1", date(2024, 1, 15) + Duration::days(d), 1))
            .collect();

        let weekly = weekly_progress(&h, &entries, date(2024, 1, 19));
        assert_eq!(weekly.completed, 5);
        assert_eq!(weekly.target_percentage, 100);
    }

    #[test]
    fn weekly_progress_ignores_zero_count_days() {
        let h = habit("h1", Frequency::Daily, 1);
        let entries = vec![entry("h1", date(2024, 1, 16), 0)];
        let weekly = weekly_progress(&h, &entries, date(2024, 1, 17));
        assert_eq!(weekly.completed, 0);
    }

    #[test]
    fn consistency_over_elapsed_days() {
        // Reference 2024-01-15: 15 days elapsed, 5 completed -> 33%
        let entries: Vec<HabitEntry> = (1..=5)
            .map(|d| entry("h1", date(2024, 1, d), 1))
            .collect();
        assert_eq!(consistency(&entries, "h1", date(2024, 1, 15)), 33);
    }

    #[test]
    fn consistency_ignores_future_and_other_months() {
        let entries = vec![
            entry("h1", date(2024, 1, 2), 1),
            entry("h1", date(2024, 1, 20), 1), // after the reference day
            entry("h1", date(2023, 12, 31), 1),
        ];
        // 2 days elapsed, 1 completed -> 50%
        assert_eq!(consistency(&entries, "h1", date(2024, 1, 2)), 50);
    }

    #[test]
    fn consistency_full_month_is_100() {
        let entries: Vec<HabitEntry> = (1..=10)
            .map(|d| entry("h1", date(2024, 1, d), 1))
            .collect();
        assert_eq!(consistency(&entries, "h1", date(2024, 1, 10)), 100);
    }

    #[test]
    fn heatmap_covers_whole_month_zero_filled() {
        let entries = vec![
            entry("h1", date(2024, 2, 3), 2),
            entry("h2", date(2024, 2, 3), 1),
            entry("h1", date(2024, 2, 10), 1),
        ];

        let cells = calendar_heatmap(&entries, date(2024, 2, 14));
        assert_eq!(cells.len(), 29); // 2024 is a leap year
        assert_eq!(cells[0].date, date(2024, 2, 1));
        assert_eq!(cells[0].count, 0);
        assert_eq!(cells[2].count, 3);
        assert_eq!(cells[9].count, 1);
    }

    #[test]
    fn active_days_counts_unique_days_across_habits() {
        let entries = vec![
            entry("h1", date(2024, 1, 3), 1),
            entry("h2", date(2024, 1, 3), 1),
            entry("h1", date(2024, 1, 5), 1),
        ];
        assert_eq!(active_days_this_month(&entries, date(2024, 1, 10)), 2);
    }
}
