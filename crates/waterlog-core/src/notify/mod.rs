//! Notification scheduling.
//!
//! [`NotifyBackend`] is the platform notification capability: permission
//! state, placing a repeating schedule, cancellation. [`ReminderScheduler`]
//! layers the reminder policy on top: request permission at most once and
//! keep at most one active schedule.

mod desktop;

pub use desktop::DesktopBackend;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::NotifyError;

pub const DEFAULT_TITLE: &str = "\u{1F4A7} Time to drink water!";
pub const DEFAULT_BODY: &str = "Have a glass of water for your health.";

/// Host permission to deliver notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionState {
    Granted,
    Denied,
    Undetermined,
}

/// Title and body delivered with every reminder.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderPayload {
    pub title: String,
    pub body: String,
}

impl Default for ReminderPayload {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
        }
    }
}

/// Opaque identifier for an active repeating schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleHandle(pub(crate) u64);

/// Platform notification capability.
pub trait NotifyBackend {
    fn permission_state(&self) -> PermissionState;

    /// Prompt or probe the host once; returns the resulting state.
    fn request_permission(&mut self) -> PermissionState;

    /// Place a repeating schedule firing every `interval_secs`.
    fn schedule_repeating(
        &mut self,
        payload: &ReminderPayload,
        interval_secs: u64,
    ) -> Result<ScheduleHandle, NotifyError>;

    /// Remove every schedule. Safe to call when none exist.
    fn cancel_all(&mut self);
}

/// Wraps a backend with the reminder scheduling policy.
pub struct ReminderScheduler<B: NotifyBackend> {
    backend: B,
    payload: ReminderPayload,
    active: Option<ScheduleHandle>,
}

impl<B: NotifyBackend> ReminderScheduler<B> {
    pub fn new(backend: B, payload: ReminderPayload) -> Self {
        Self {
            backend,
            payload,
            active: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The currently active schedule, if any.
    pub fn active(&self) -> Option<ScheduleHandle> {
        self.active
    }

    /// Check permission, requesting it once if still undetermined.
    /// Never retries a denial.
    pub fn ensure_permission(&mut self) -> bool {
        match self.backend.permission_state() {
            PermissionState::Granted => true,
            PermissionState::Denied => false,
            PermissionState::Undetermined => {
                self.backend.request_permission() == PermissionState::Granted
            }
        }
    }

    /// Schedule a repeating reminder every `interval_minutes`.
    ///
    /// Any prior schedule is cancelled first, so at most one repeating
    /// reminder is active at a time.
    ///
    /// # Errors
    /// Returns an error if the host refuses the schedule.
    pub fn schedule_repeating(&mut self, interval_minutes: u32) -> Result<(), NotifyError> {
        self.cancel_all();
        let interval_secs = u64::from(interval_minutes) * 60;
        let handle = self.backend.schedule_repeating(&self.payload, interval_secs)?;
        self.active = Some(handle);
        debug!("scheduled repeating reminder every {interval_minutes} min");
        Ok(())
    }

    /// Cancel every schedule. Idempotent.
    pub fn cancel_all(&mut self) {
        self.backend.cancel_all();
        self.active = None;
    }
}
