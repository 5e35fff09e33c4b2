//! Reminder on/off state machine.
//!
//! Two states, Disabled and Enabled, over a persisted [`ReminderConfig`].
//! The controller is the sole writer to the scheduler: enabling checks
//! permission and places the repeating schedule, disabling cancels it, and
//! an interval change reschedules only when explicitly asked to -- the new
//! interval otherwise applies on the next enable.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::events::Event;
use crate::notify::{NotifyBackend, ReminderScheduler};

/// Selectable reminder intervals, in minutes.
pub const INTERVAL_PRESETS: [u32; 4] = [1, 30, 60, 120];

/// Persisted reminder state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderConfig {
    pub interval_minutes: u32,
    pub enabled: bool,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            interval_minutes: 60,
            enabled: false,
        }
    }
}

/// Orchestrates enabling and disabling the repeating reminder.
pub struct ToggleController<B: NotifyBackend> {
    config: ReminderConfig,
    scheduler: ReminderScheduler<B>,
}

impl<B: NotifyBackend> ToggleController<B> {
    pub fn new(config: ReminderConfig, scheduler: ReminderScheduler<B>) -> Self {
        Self { config, scheduler }
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &ReminderConfig {
        &self.config
    }

    pub fn enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn interval_minutes(&self) -> u32 {
        self.config.interval_minutes
    }

    pub fn scheduler(&self) -> &ReminderScheduler<B> {
        &self.scheduler
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Enable the reminder. Returns `None` when already enabled.
    ///
    /// A permission denial or an environment that cannot deliver
    /// notifications keeps the reminder disabled and yields an
    /// [`Event::Advisory`].
    pub fn toggle_on(&mut self) -> Option<Event> {
        if self.config.enabled {
            return None;
        }
        if !self.scheduler.ensure_permission() {
            return Some(Event::Advisory {
                message: "notification permission denied; reminder stays off".to_string(),
                at: Utc::now(),
            });
        }
        if let Err(e) = self.scheduler.schedule_repeating(self.config.interval_minutes) {
            return Some(Event::Advisory {
                message: e.to_string(),
                at: Utc::now(),
            });
        }
        self.config.enabled = true;
        Some(Event::ReminderEnabled {
            interval_minutes: self.config.interval_minutes,
            at: Utc::now(),
        })
    }

    /// Disable the reminder. Returns `None` when already disabled.
    pub fn toggle_off(&mut self) -> Option<Event> {
        if !self.config.enabled {
            return None;
        }
        self.scheduler.cancel_all();
        self.config.enabled = false;
        Some(Event::ReminderDisabled { at: Utc::now() })
    }

    /// Re-enact the enable transition after state was restored from
    /// storage. A fresh process holds no live schedule even when `enabled`
    /// is set. Returns `None` when the reminder is off.
    pub fn resume(&mut self) -> Option<Event> {
        if !self.config.enabled {
            return None;
        }
        self.config.enabled = false;
        self.toggle_on()
    }

    /// Select an interval preset.
    ///
    /// While enabled the active schedule is left untouched unless
    /// `reschedule_immediately` is set. A reschedule failure disables the
    /// reminder and yields an advisory, like a failed enable.
    ///
    /// # Errors
    /// Returns an error if `minutes` is not one of [`INTERVAL_PRESETS`].
    pub fn set_interval(&mut self, minutes: u32, reschedule_immediately: bool) -> Result<Event> {
        if !INTERVAL_PRESETS.contains(&minutes) {
            return Err(ValidationError::InvalidValue {
                field: "interval_minutes".to_string(),
                message: format!("{minutes} is not one of {INTERVAL_PRESETS:?}"),
            }
            .into());
        }
        self.config.interval_minutes = minutes;
        let mut rescheduled = false;
        if self.config.enabled && reschedule_immediately {
            if let Err(e) = self.scheduler.schedule_repeating(minutes) {
                self.scheduler.cancel_all();
                self.config.enabled = false;
                return Ok(Event::Advisory {
                    message: e.to_string(),
                    at: Utc::now(),
                });
            }
            rescheduled = true;
        }
        Ok(Event::IntervalChanged {
            interval_minutes: minutes,
            rescheduled,
            at: Utc::now(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::testing::MockBackend;
    use crate::notify::ReminderPayload;

    fn controller(backend: MockBackend) -> ToggleController<MockBackend> {
        let scheduler = ReminderScheduler::new(backend, ReminderPayload::default());
        ToggleController::new(ReminderConfig::default(), scheduler)
    }

    #[test]
    fn starts_disabled_with_hourly_interval() {
        let ctl = controller(MockBackend::granting());
        assert!(!ctl.enabled());
        assert_eq!(ctl.interval_minutes(), 60);
    }

    #[test]
    fn toggle_on_schedules_and_enables() {
        let mut ctl = controller(MockBackend::granting());
        let event = ctl.toggle_on().unwrap();
        assert!(matches!(event, Event::ReminderEnabled { interval_minutes: 60, .. }));
        assert!(ctl.enabled());
        assert_eq!(ctl.scheduler().backend().scheduled, vec![3600]);
    }

    #[test]
    fn denied_permission_keeps_reminder_off() {
        let mut ctl = controller(MockBackend::denying());
        let event = ctl.toggle_on().unwrap();
        assert!(matches!(event, Event::Advisory { .. }));
        assert!(!ctl.enabled());
        assert!(ctl.scheduler().backend().scheduled.is_empty());
    }

    #[test]
    fn on_off_on_leaves_exactly_one_active_schedule() {
        let mut ctl = controller(MockBackend::granting());
        ctl.toggle_on().unwrap();
        ctl.toggle_off().unwrap();
        ctl.toggle_on().unwrap();
        assert_eq!(ctl.scheduler().backend().active, 1);
    }

    #[test]
    fn toggle_off_cancels_the_schedule() {
        let mut ctl = controller(MockBackend::granting());
        ctl.toggle_on().unwrap();
        let event = ctl.toggle_off().unwrap();
        assert!(matches!(event, Event::ReminderDisabled { .. }));
        assert!(!ctl.enabled());
        assert_eq!(ctl.scheduler().backend().active, 0);
    }

    #[test]
    fn toggle_on_when_enabled_is_a_noop() {
        let mut ctl = controller(MockBackend::granting());
        ctl.toggle_on().unwrap();
        assert!(ctl.toggle_on().is_none());
        assert_eq!(ctl.scheduler().backend().scheduled.len(), 1);
    }

    #[test]
    fn toggle_off_when_disabled_is_a_noop() {
        let mut ctl = controller(MockBackend::granting());
        assert!(ctl.toggle_off().is_none());
    }

    #[test]
    fn preset_120_schedules_a_7200_second_trigger() {
        let mut ctl = controller(MockBackend::granting());
        ctl.set_interval(120, false).unwrap();
        ctl.toggle_on().unwrap();
        assert_eq!(ctl.scheduler().backend().scheduled, vec![7200]);
    }

    #[test]
    fn non_preset_interval_is_rejected() {
        let mut ctl = controller(MockBackend::granting());
        assert!(ctl.set_interval(45, false).is_err());
        assert_eq!(ctl.interval_minutes(), 60);
    }

    #[test]
    fn interval_change_while_enabled_defers_rescheduling() {
        let mut ctl = controller(MockBackend::granting());
        ctl.toggle_on().unwrap();
        let event = ctl.set_interval(30, false).unwrap();
        assert!(matches!(
            event,
            Event::IntervalChanged { interval_minutes: 30, rescheduled: false, .. }
        ));
        // Still on the old schedule until the next off/on cycle.
        assert_eq!(ctl.scheduler().backend().scheduled, vec![3600]);
        ctl.toggle_off().unwrap();
        ctl.toggle_on().unwrap();
        assert_eq!(ctl.scheduler().backend().scheduled, vec![3600, 1800]);
    }

    #[test]
    fn interval_change_can_reschedule_immediately() {
        let mut ctl = controller(MockBackend::granting());
        ctl.toggle_on().unwrap();
        let event = ctl.set_interval(30, true).unwrap();
        assert!(matches!(
            event,
            Event::IntervalChanged { interval_minutes: 30, rescheduled: true, .. }
        ));
        assert_eq!(ctl.scheduler().backend().scheduled, vec![3600, 1800]);
        assert_eq!(ctl.scheduler().backend().active, 1);
    }

    #[test]
    fn resume_reenacts_the_enable_transition() {
        let mut ctl = controller(MockBackend::granting());
        ctl.toggle_on().unwrap();
        let persisted = ctl.config().clone();

        let scheduler = ReminderScheduler::new(MockBackend::granting(), ReminderPayload::default());
        let mut restored = ToggleController::new(persisted, scheduler);
        let event = restored.resume().unwrap();
        assert!(matches!(event, Event::ReminderEnabled { .. }));
        assert_eq!(restored.scheduler().backend().active, 1);
    }

    #[test]
    fn resume_is_a_noop_when_disabled() {
        let mut ctl = controller(MockBackend::granting());
        assert!(ctl.resume().is_none());
        assert!(ctl.scheduler().backend().scheduled.is_empty());
    }
}
