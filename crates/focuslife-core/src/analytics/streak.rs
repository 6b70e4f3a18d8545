//! Streak calculation.
//!
//! A streak counts consecutive days, walking backward from the reference
//! day, on which at least one completion was logged. The walk breaks on
//! the first absent day; a reference day with no completion yields 0.
//! Lookback is capped at [`STREAK_WINDOW_DAYS`]: streaks longer than the
//! window are reported as the window length. The cap is part of the
//! contract, not an optimization.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;

use crate::habit::HabitEntry;

/// Hard lookback bound for streak computation, in days.
pub const STREAK_WINDOW_DAYS: u32 = 30;

/// Consecutive completed days for a single habit, ending at `reference`.
///
/// Entries with `count == 0` do not count as completed. An unknown
/// `habit_id` behaves as an empty entry set and yields 0.
pub fn habit_streak(entries: &[HabitEntry], habit_id: &str, reference: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.habit_id == habit_id && e.count > 0)
        .map(|e| e.date)
        .collect();
    streak_from_days(&days, reference)
}

/// Consecutive days on which *any* habit was completed, ending at `reference`.
pub fn global_streak(entries: &[HabitEntry], reference: NaiveDate) -> u32 {
    let days: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.count > 0)
        .map(|e| e.date)
        .collect();
    streak_from_days(&days, reference)
}

fn streak_from_days(days: &HashSet<NaiveDate>, reference: NaiveDate) -> u32 {
    let mut streak = 0;
    for offset in 0..STREAK_WINDOW_DAYS {
        let day = reference - Duration::days(i64::from(offset));
        if days.contains(&day) {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
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
    fn no_entries_yields_zero() {
        assert_eq!(habit_streak(&[], "h1", date(2024, 3, 15)), 0);
    }

    #[test]
    fn zero_count_entries_do_not_count() {
        let today = date(2024, 3, 15);
        let entries = vec![
            entry("h1", today, 0),
            entry("h1", today - Duration::days(1), 1),
        ];
        // A logged-but-zero entry on the reference day breaks the walk
        assert_eq!(habit_streak(&entries, "h1", today), 0);
    }

    #[test]
    fn gap_yesterday_but_entry_today_is_one() {
        let today = date(2024, 3, 15);
        let entries = vec![
            entry("h1", today, 1),
            entry("h1", today - Duration::days(2), 1),
        ];
        assert_eq!(habit_streak(&entries, "h1", today), 1);
    }

    #[test]
    fn absent_reference_day_yields_zero_despite_prior_days() {
        let today = date(2024, 3, 15);
        let entries = vec![
            entry("h1", today - Duration::days(1), 1),
            entry("h1", today - Duration::days(2), 1),
        ];
        assert_eq!(habit_streak(&entries, "h1", today), 0);
    }

    #[test]
    fn consecutive_days_count_up_to_the_gap() {
        let today = date(2024, 3, 15);
        let entries: Vec<HabitEntry> = (0..4)
            .map(|d| entry("h1", today - Duration::days(d), 1))
            .collect();
        assert_eq!(habit_streak(&entries, "h1", today), 4);
    }

    #[test]
    fn streak_caps_at_window() {
        let today = date(2024, 3, 15);
        let entries: Vec<HabitEntry> = (0..31)
            .map(|d| entry("h1", today - Duration::days(d), 1))
            .collect();
        assert_eq!(habit_streak(&entries, "h1", today), STREAK_WINDOW_DAYS);
    }

    #[test]
    fn other_habits_do_not_extend_a_habit_streak() {
        let today = date(2024, 3, 15);
        let entries = vec![
            entry("h1", today, 1),
            entry("h2", today - Duration::days(1), 1),
        ];
        assert_eq!(habit_streak(&entries, "h1", today), 1);
    }

    #[test]
    fn global_streak_spans_habits() {
        let today = date(2024, 3, 15);
        let entries = vec![
            entry("h1", today, 1),
            entry("h2", today - Duration::days(1), 1),
            entry("h1", today - Duration::days(2), 1),
        ];
        assert_eq!(global_streak(&entries, today), 3);
    }

    #[test]
    fn unknown_habit_behaves_as_empty() {
        let today = date(2024, 3, 15);
        let entries = vec![entry("h1", today, 1)];
        assert_eq!(habit_streak(&entries, "missing", today), 0);
    }

    proptest! {
        #[test]
        fn streak_is_bounded_by_window(offsets in prop::collection::vec(0i64..120, 0..80), counts in prop::collection::vec(0u32..3, 80)) {
            let today = date(2024, 6, 1);
            let entries: Vec<HabitEntry> = offsets
                .iter()
                .zip(counts.iter())
                .map(|(&d, &c)| entry("h1", today - Duration::days(d), c))
                .collect();
            let streak = habit_streak(&entries, "h1", today);
            prop_assert!(streak <= STREAK_WINDOW_DAYS);
        }

        #[test]
        fn contiguous_prefix_is_counted_exactly(k in 0u32..29) {
            let today = date(2024, 6, 1);
            // Entries for today back through today-k, then a guaranteed gap.
            let entries: Vec<HabitEntry> = (0..=k)
                .map(|d| entry("h1", today - Duration::days(i64::from(d)), 1))
                .collect();
            prop_assert_eq!(habit_streak(&entries, "h1", today), k + 1);
        }
    }
}
