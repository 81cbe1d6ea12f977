use std::sync::Arc;
use std::sync::Mutex as StdMutex;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use tokio::sync::Mutex;
use tokio::time::sleep;

use crate::models::appointment::Appointment;
use crate::service::schedule_service::ScheduleStore;

pub const SCAN_INTERVAL_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyPermission {
    Unknown,
    Granted,
    Denied,
}

// Permission-gated notification capability. `request_permission` is called
// at most once per Unknown state, when a reminder is actually due.
pub trait Notifier: Send + Sync {
    fn permission(&self) -> NotifyPermission;
    fn request_permission(&self) -> NotifyPermission;
    fn notify(&self, title: &str, body: &str) -> Result<(), String>;
}

pub struct DesktopNotifier {
    permission: StdMutex<NotifyPermission>,
}

impl DesktopNotifier {
    pub fn new() -> Self {
        Self {
            permission: StdMutex::new(NotifyPermission::Unknown),
        }
    }
}

impl Default for DesktopNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> NotifyPermission {
        *self.permission.lock().unwrap()
    }

    // The desktop surface has no asynchronous grant dialog; posting to the
    // notification daemon either works or fails per call.
    fn request_permission(&self) -> NotifyPermission {
        let mut permission = self.permission.lock().unwrap();
        if *permission == NotifyPermission::Unknown {
            *permission = NotifyPermission::Granted;
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), String> {
        notify_rust::Notification::new()
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| format!("Failed to show notification: {}", e))
    }
}

pub async fn run_reminder_loop(store: Arc<Mutex<ScheduleStore>>, notifier: Arc<dyn Notifier>) {
    loop {
        sleep(Duration::from_secs(SCAN_INTERVAL_SECS)).await;
        let mut store = store.lock().await;
        reminder_tick(&mut store, notifier.as_ref(), Local::now().naive_local());
    }
}

// One scan over the schedule. An appointment's reminder fires at most once,
// and only while `now` sits inside [start - minutes, start). A window that
// elapsed while the process was not running is silently skipped.
pub fn reminder_tick(store: &mut ScheduleStore, notifier: &dyn Notifier, now: NaiveDateTime) {
    let due: Vec<Appointment> = store
        .list()
        .iter()
        .filter(|appointment| {
            if appointment.reminder_minutes.is_none() || store.is_reminded(&appointment.id) {
                return false;
            }
            match (appointment.reminder_at(), appointment.start()) {
                (Some(remind_at), Some(start)) => now >= remind_at && now < start,
                _ => false,
            }
        })
        .cloned()
        .collect();

    if due.is_empty() {
        return;
    }

    let mut permission = notifier.permission();
    if permission == NotifyPermission::Unknown {
        permission = notifier.request_permission();
    }
    // Denied: nothing fires and nothing is marked, so a later grant can
    // still raise the reminder while its window is open.
    if permission != NotifyPermission::Granted {
        return;
    }

    for appointment in due {
        let body = format!("Your appointment is at {}.", appointment.time);
        match notifier.notify(&appointment.title, &body) {
            Ok(()) => store.mark_reminded(&appointment.id),
            Err(err) => eprintln!("Failed to raise reminder notification: {}", err),
        }
    }
}
