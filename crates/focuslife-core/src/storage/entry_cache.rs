//! Read-through cache for habit entries.
//!
//! Keyed by `(habit_id, from, to)`; a repeated request for the same range
//! is served from memory. The cache does not watch the store: callers
//! must invalidate a habit after mutating its entries.

use chrono::NaiveDate;
use std::collections::hash_map::Entry;
use std::collections::HashMap;

use super::database::Database;
use crate::error::DatabaseError;
use crate::habit::HabitEntry;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    habit_id: String,
    from: NaiveDate,
    to: NaiveDate,
}

/// Read-through entry cache over a [`Database`].
pub struct EntryCache<'a> {
    db: &'a Database,
    map: HashMap<CacheKey, Vec<HabitEntry>>,
}

impl<'a> EntryCache<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            map: HashMap::new(),
        }
    }

    /// Entries for a habit within `[from, to]`, fetched on first request
    /// and served from memory afterwards.
    pub fn entries_between(
        &mut self,
        habit_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<&[HabitEntry], DatabaseError> {
        let key = CacheKey {
            habit_id: habit_id.to_string(),
            from,
            to,
        };
        match self.map.entry(key) {
            Entry::Occupied(occupied) => Ok(occupied.into_mut()),
            Entry::Vacant(vacant) => {
                let rows = self.db.entries_between(habit_id, from, to)?;
                Ok(vacant.insert(rows))
            }
        }
    }

    /// Drop every cached range for a habit. Call after mutating its entries.
    pub fn invalidate(&mut self, habit_id: &str) {
        self.map.retain(|key, _| key.habit_id != habit_id);
    }

    /// Number of ranges currently held.
    pub fn cached_ranges(&self) -> usize {
        self.map.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::habit::{Frequency, Habit};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn seeded_db() -> (Database, Habit) {
        let db = Database::open_memory().unwrap();
        let habit = Habit::new("Read", Frequency::Daily, 1).unwrap();
        db.create_habit(&habit).unwrap();
        db.mark_complete(&habit.id, date(2024, 3, 10), None).unwrap();
        (db, habit)
    }

    #[test]
    fn serves_repeated_requests_from_memory() {
        let (db, habit) = seeded_db();
        let mut cache = EntryCache::new(&db);
        let from = date(2024, 3, 1);
        let to = date(2024, 3, 31);

        assert_eq!(cache.entries_between(&habit.id, from, to).unwrap().len(), 1);
        assert_eq!(cache.cached_ranges(), 1);
        assert_eq!(cache.entries_between(&habit.id, from, to).unwrap().len(), 1);
        assert_eq!(cache.cached_ranges(), 1);
    }

    #[test]
    fn distinct_ranges_are_cached_separately() {
        let (db, habit) = seeded_db();
        let mut cache = EntryCache::new(&db);

        cache
            .entries_between(&habit.id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        cache
            .entries_between(&habit.id, date(2024, 3, 5), date(2024, 3, 15))
            .unwrap();
        assert_eq!(cache.cached_ranges(), 2);
    }

    #[test]
    fn stale_until_invalidated() {
        let (db, habit) = seeded_db();
        let mut cache = EntryCache::new(&db);
        let from = date(2024, 3, 1);
        let to = date(2024, 3, 31);

        assert_eq!(cache.entries_between(&habit.id, from, to).unwrap().len(), 1);

        db.mark_complete(&habit.id, date(2024, 3, 11), None).unwrap();
        // The cached range does not see the new entry...
        assert_eq!(cache.entries_between(&habit.id, from, to).unwrap().len(), 1);

        // ...until the habit is invalidated
        cache.invalidate(&habit.id);
        assert_eq!(cache.cached_ranges(), 0);
        assert_eq!(cache.entries_between(&habit.id, from, to).unwrap().len(), 2);
    }

    #[test]
    fn invalidate_leaves_other_habits_cached() {
        let (db, habit) = seeded_db();
        let other = Habit::new("Walk", Frequency::Daily, 1).unwrap();
        db.create_habit(&other).unwrap();

        let mut cache = EntryCache::new(&db);
        cache
            .entries_between(&habit.id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();
        cache
            .entries_between(&other.id, date(2024, 3, 1), date(2024, 3, 31))
            .unwrap();

        cache.invalidate(&habit.id);
        assert_eq!(cache.cached_ranges(), 1);
    }
}
