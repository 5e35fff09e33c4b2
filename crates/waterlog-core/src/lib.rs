//! # Waterlog Core Library
//!
//! This library provides the core logic for the Waterlog drink reminder:
//! a per-day drink counter over key-value storage, a notification scheduler
//! adapter, and the reminder on/off state machine. The CLI binary is a thin
//! surface over this crate.
//!
//! ## Key Components
//!
//! - [`DailyCounter`]: per-day drink count persistence
//! - [`ToggleController`]: reminder on/off state machine
//! - [`ReminderScheduler`]: keeps at most one repeating reminder scheduled
//! - [`Database`] / [`Config`]: key-value storage and TOML preferences
//! - [`Clock`]: injectable time source deriving the [`DayKey`] partition

pub mod clock;
pub mod counter;
pub mod error;
pub mod events;
pub mod notify;
pub mod storage;
pub mod toggle;

pub use clock::{Clock, DayKey, FixedClock, SystemClock};
pub use counter::DailyCounter;
pub use error::{ConfigError, CoreError, NotifyError, StorageError, ValidationError};
pub use events::Event;
pub use notify::{
    DesktopBackend, NotifyBackend, PermissionState, ReminderPayload, ReminderScheduler,
    ScheduleHandle,
};
pub use storage::{Config, Database};
pub use toggle::{ReminderConfig, ToggleController, INTERVAL_PRESETS};
