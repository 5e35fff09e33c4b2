use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clock::DayKey;

/// Every user-visible state change produces an Event.
/// The CLI prints events as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    DrinkRecorded {
        day: DayKey,
        count: u32,
        at: DateTime<Utc>,
    },
    ReminderEnabled {
        interval_minutes: u32,
        at: DateTime<Utc>,
    },
    ReminderDisabled {
        at: DateTime<Utc>,
    },
    IntervalChanged {
        interval_minutes: u32,
        rescheduled: bool,
        at: DateTime<Utc>,
    },
    /// One-shot notice for a non-fatal failure.
    Advisory {
        message: String,
        at: DateTime<Utc>,
    },
}
