//! Desktop notification backend on top of `notify-rust`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::{debug, warn};
use notify_rust::Notification;

use crate::error::NotifyError;

use super::{NotifyBackend, PermissionState, ReminderPayload, ScheduleHandle};

const APP_NAME: &str = "waterlog";

/// Delivers reminders through the desktop notification service.
///
/// A repeating schedule is a detached ticker thread; cancellation flips a
/// shared flag the ticker checks after each sleep. Tickers die with the
/// process, so a long-running command must keep the backend alive.
pub struct DesktopBackend {
    permission: PermissionState,
    unsupported_reason: Option<String>,
    tickers: Vec<Ticker>,
    next_handle: u64,
}

struct Ticker {
    handle: ScheduleHandle,
    stop: Arc<AtomicBool>,
}

impl DesktopBackend {
    pub fn new() -> Self {
        Self {
            permission: PermissionState::Undetermined,
            unsupported_reason: None,
            tickers: Vec::new(),
            next_handle: 0,
        }
    }

    /// XDG hosts expose the notification server directly; an unreachable
    /// server means this environment cannot deliver reminders at all.
    #[cfg(all(unix, not(target_os = "macos")))]
    fn probe(&mut self) -> PermissionState {
        match notify_rust::get_server_information() {
            Ok(info) => {
                debug!("notification server: {} {}", info.name, info.version);
                PermissionState::Granted
            }
            Err(e) => {
                self.unsupported_reason = Some(format!("no notification server reachable: {e}"));
                PermissionState::Denied
            }
        }
    }

    /// No queryable permission surface on this platform; delivery is
    /// attempt-based.
    #[cfg(not(all(unix, not(target_os = "macos"))))]
    fn probe(&mut self) -> PermissionState {
        PermissionState::Granted
    }

    fn show(payload: &ReminderPayload) {
        if let Err(e) = Notification::new()
            .appname(APP_NAME)
            .summary(&payload.title)
            .body(&payload.body)
            .show()
        {
            warn!("notification delivery failed: {e}");
        }
    }
}

impl Default for DesktopBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl NotifyBackend for DesktopBackend {
    fn permission_state(&self) -> PermissionState {
        self.permission
    }

    fn request_permission(&mut self) -> PermissionState {
        if self.permission == PermissionState::Undetermined {
            self.permission = self.probe();
        }
        self.permission
    }

    fn schedule_repeating(
        &mut self,
        payload: &ReminderPayload,
        interval_secs: u64,
    ) -> Result<ScheduleHandle, NotifyError> {
        if self.permission != PermissionState::Granted {
            return Err(match self.unsupported_reason.clone() {
                Some(reason) => NotifyError::Unsupported(reason),
                None => NotifyError::PermissionDenied,
            });
        }

        let stop = Arc::new(AtomicBool::new(false));
        let ticker_stop = Arc::clone(&stop);
        let payload = payload.clone();
        let interval = Duration::from_secs(interval_secs);
        thread::spawn(move || loop {
            thread::sleep(interval);
            if ticker_stop.load(Ordering::Relaxed) {
                break;
            }
            Self::show(&payload);
        });

        self.next_handle += 1;
        let handle = ScheduleHandle(self.next_handle);
        self.tickers.push(Ticker { handle, stop });
        Ok(handle)
    }

    fn cancel_all(&mut self) {
        for ticker in self.tickers.drain(..) {
            ticker.stop.store(true, Ordering::Relaxed);
            debug!("cancelled schedule {:?}", ticker.handle);
        }
    }
}

impl Drop for DesktopBackend {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
