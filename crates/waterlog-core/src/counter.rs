//! Daily drink counter.
//!
//! One kv row per day that had at least one drink: the key is the [`DayKey`],
//! the value a decimal count. Absent and malformed rows read as zero; a
//! malformed row is logged rather than surfaced, so a damaged value can
//! never break the counter display.

use log::warn;

use crate::clock::DayKey;
use crate::error::Result;
use crate::storage::Database;

/// Persists and retrieves the per-day drink count.
///
/// Sole writer of day-key rows in the kv store.
pub struct DailyCounter<'a> {
    db: &'a Database,
}

impl<'a> DailyCounter<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Count for `day`. Returns 0 for absent, unreadable, or unparsable
    /// values; never errors.
    pub fn load(&self, day: &DayKey) -> u32 {
        match self.db.kv_get(day.as_str()) {
            Ok(Some(raw)) => match raw.parse::<u32>() {
                Ok(count) => count,
                Err(_) => {
                    warn!("malformed count for {day}: {raw:?}, treating as 0");
                    0
                }
            },
            Ok(None) => 0,
            Err(e) => {
                warn!("failed to read count for {day}: {e}, treating as 0");
                0
            }
        }
    }

    /// Record one drink for `day` and return the new count.
    ///
    /// # Errors
    /// Returns an error if the new count cannot be persisted.
    pub fn increment(&self, day: &DayKey) -> Result<u32> {
        let count = self.load(day) + 1;
        self.db.kv_set(day.as_str(), &count.to_string())?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::{Clock, FixedClock};
    use chrono::{Local, TimeZone};

    fn day(y: i32, m: u32, d: u32) -> DayKey {
        FixedClock(Local.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()).day_key()
    }

    #[test]
    fn absent_day_reads_zero() {
        let db = Database::open_memory().unwrap();
        let counter = DailyCounter::new(&db);
        assert_eq!(counter.load(&day(2024, 6, 1)), 0);
    }

    #[test]
    fn increment_then_load_matches() {
        let db = Database::open_memory().unwrap();
        let counter = DailyCounter::new(&db);
        let today = day(2024, 6, 1);
        for expected in 1..=5 {
            assert_eq!(counter.increment(&today).unwrap(), expected);
        }
        assert_eq!(counter.load(&today), 5);
    }

    #[test]
    fn days_are_independent() {
        let db = Database::open_memory().unwrap();
        let counter = DailyCounter::new(&db);
        let first = day(2024, 6, 1);
        let second = day(2024, 6, 2);
        counter.increment(&first).unwrap();
        counter.increment(&first).unwrap();
        counter.increment(&second).unwrap();
        assert_eq!(counter.load(&first), 2);
        assert_eq!(counter.load(&second), 1);
    }

    #[test]
    fn malformed_value_reads_zero() {
        let db = Database::open_memory().unwrap();
        db.kv_set("2024-06-01", "three").unwrap();
        let counter = DailyCounter::new(&db);
        assert_eq!(counter.load(&day(2024, 6, 1)), 0);
        // The next increment repairs the row.
        assert_eq!(counter.increment(&day(2024, 6, 1)).unwrap(), 1);
    }

    #[test]
    fn counts_survive_reopen_and_reset_on_rollover() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("waterlog.db");
        {
            let db = Database::open_at(&path).unwrap();
            let counter = DailyCounter::new(&db);
            for _ in 0..3 {
                counter.increment(&day(2024, 6, 1)).unwrap();
            }
        }
        let db = Database::open_at(&path).unwrap();
        let counter = DailyCounter::new(&db);
        assert_eq!(counter.load(&day(2024, 6, 1)), 3);
        assert_eq!(counter.load(&day(2024, 6, 2)), 0);
    }
}
