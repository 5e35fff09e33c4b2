//! Injectable time source.
//!
//! The counter partitions by calendar day in the local time zone. Deriving
//! the day key through a trait keeps date-rollover behavior deterministic
//! under test.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Canonical `YYYY-MM-DD` key identifying a calendar day in local time.
///
/// Used as the storage partition for the daily counter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DayKey(String);

impl DayKey {
    pub fn from_date(date: NaiveDate) -> Self {
        Self(date.format("%Y-%m-%d").to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DayKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wall-clock source.
pub trait Clock {
    fn now(&self) -> DateTime<Local>;

    /// Today's counter partition key.
    fn day_key(&self) -> DayKey {
        DayKey::from_date(self.now().date_naive())
    }
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock pinned to a fixed instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn day_key_is_canonical_date_string() {
        let clock = FixedClock(Local.with_ymd_and_hms(2024, 6, 1, 23, 59, 59).unwrap());
        assert_eq!(clock.day_key().as_str(), "2024-06-01");
    }

    #[test]
    fn day_key_rolls_over_at_midnight() {
        let before = FixedClock(Local.with_ymd_and_hms(2024, 6, 1, 23, 59, 59).unwrap());
        let after = FixedClock(Local.with_ymd_and_hms(2024, 6, 2, 0, 0, 0).unwrap());
        assert_ne!(before.day_key(), after.day_key());
        assert_eq!(after.day_key().as_str(), "2024-06-02");
    }

    #[test]
    fn day_key_pads_single_digit_fields() {
        assert_eq!(
            DayKey::from_date(chrono::NaiveDate::from_ymd_opt(2024, 1, 5).unwrap()).as_str(),
            "2024-01-05"
        );
    }
}
