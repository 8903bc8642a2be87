//! Reminder scheduling.
//!
//! Each task goes through `Unscheduled → Armed → Fired` at most once per
//! session. Arming persists the task's claim flag before the timer is
//! spawned, so a rebuild that runs again (after every mutation and at
//! startup) never arms the same task twice: the stored flag covers tasks
//! armed by an earlier rebuild, the in-memory state table covers a rebuild
//! racing an unfinished one.
//!
//! A reminder armed in a previous run is lost when the process exits while
//! its claim flag stays set; reminders only fire while the application is
//! open.
//!
//! ## Timer delay
//!
//! The delay is the distance between the due time and now at minute
//! resolution, seconds discarded:
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taskbell::libs::scheduler::reminder_delay_ms;
//!
//! let day = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let due = day.and_hms_opt(14, 30, 0).unwrap();
//! let now = day.and_hms_opt(14, 0, 45).unwrap();
//! assert_eq!(reminder_delay_ms(due, now), 30 * 60_000);
//! ```

use crate::db::tasks::Tasks;
use crate::libs::activity::ActivityLog;
use crate::libs::expiry::is_same_calendar_day;
use crate::libs::messages::Message;
use crate::libs::notifier::{HapticsEmitter, Notification, NotificationEmitter, NOTIFICATION_BODY, NOTIFICATION_ICON, VIBRATION_PATTERN};
use crate::libs::task::Task;
use chrono::{NaiveDateTime, Timelike};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

pub const DEFAULT_CLEANUP_DELAY_MS: u64 = 3000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderState {
    Unscheduled,
    Armed,
    Fired,
}

/// What a fired reminder does besides notifying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSettings {
    pub body: String,
    pub icon: Option<String>,
    pub haptics: bool,
    /// Delete the task once its notification is dismissed.
    pub auto_cleanup: bool,
    pub cleanup_delay_ms: u64,
}

impl Default for ReminderSettings {
    fn default() -> Self {
        Self {
            body: NOTIFICATION_BODY.to_string(),
            icon: Some(NOTIFICATION_ICON.to_string()),
            haptics: true,
            auto_cleanup: false,
            cleanup_delay_ms: DEFAULT_CLEANUP_DELAY_MS,
        }
    }
}

/// Broadcast to subscribers whenever a reminder changes the task list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderEvent {
    Fired(i64),
    CleanedUp(i64),
}

/// A reminder that a rebuild just armed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmedReminder {
    pub id: i64,
    pub title: String,
    pub delay_ms: i64,
}

/// Owns one spawned reminder timer. Dropping the handle cancels the timer.
#[derive(Debug)]
pub struct ReminderHandle {
    id: i64,
    handle: JoinHandle<()>,
}

impl ReminderHandle {
    pub fn id(&self) -> i64 {
        self.id
    }

    /// `true` once the reminder has fired and finished its follow-up work.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    pub fn cancel(self) {
        self.handle.abort();
    }
}

impl Drop for ReminderHandle {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Milliseconds from `now` until `due`, both truncated to the minute.
///
/// Only the time of day takes part; callers check the calendar day first.
/// Negative when the due minute has already passed.
pub fn reminder_delay_ms(due: NaiveDateTime, now: NaiveDateTime) -> i64 {
    let due_minutes = i64::from(due.hour()) * 60 + i64::from(due.minute());
    let now_minutes = i64::from(now.hour()) * 60 + i64::from(now.minute());
    due_minutes * 60_000 - now_minutes * 60_000
}

struct Inner {
    tasks: Tasks,
    notifier: Arc<dyn NotificationEmitter>,
    haptics: Arc<dyn HapticsEmitter>,
    settings: ReminderSettings,
    states: Mutex<HashMap<i64, ReminderState>>,
    handles: Mutex<HashMap<i64, ReminderHandle>>,
    events: broadcast::Sender<ReminderEvent>,
}

/// Arms, fires and cancels reminders for one session.
#[derive(Clone)]
pub struct Scheduler {
    inner: Arc<Inner>,
}

impl Scheduler {
    pub fn new(tasks: Tasks, notifier: Arc<dyn NotificationEmitter>, haptics: Arc<dyn HapticsEmitter>, settings: ReminderSettings) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            inner: Arc::new(Inner {
                tasks,
                notifier,
                haptics,
                settings,
                states: Mutex::new(HashMap::new()),
                handles: Mutex::new(HashMap::new()),
                events,
            }),
        }
    }

    pub fn settings(&self) -> &ReminderSettings {
        &self.inner.settings
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ReminderEvent> {
        self.inner.events.subscribe()
    }

    pub fn state(&self, id: i64) -> ReminderState {
        self.inner.states.lock().get(&id).copied().unwrap_or(ReminderState::Unscheduled)
    }

    /// Reminders armed and not yet fired.
    pub fn armed_count(&self) -> usize {
        self.inner.states.lock().values().filter(|state| **state == ReminderState::Armed).count()
    }

    /// Arms every task in `tasks` that is due later today and not yet claimed.
    pub async fn arm_due(&self, tasks: &[Task], now: NaiveDateTime) -> Vec<ArmedReminder> {
        let mut armed = Vec::new();
        for task in tasks {
            if let Some(reminder) = self.arm(task, now).await {
                armed.push(reminder);
            }
        }
        armed
    }

    /// Arms a single task. Returns `None` when the task is not eligible, is
    /// already armed or fired, was deleted or claimed since `task` was read,
    /// or its claim flag could not be stored.
    pub async fn arm(&self, task: &Task, now: NaiveDateTime) -> Option<ArmedReminder> {
        let due = task.due();
        if task.notified || !is_same_calendar_day(due, now) {
            return None;
        }

        let delay_ms = reminder_delay_ms(due, now);
        if delay_ms < 0 {
            return None;
        }

        {
            let mut states = self.inner.states.lock();
            if states.contains_key(&task.id) {
                return None;
            }
            states.insert(task.id, ReminderState::Armed);
        }

        match self.inner.tasks.claim(task.id).await {
            Ok(true) => {}
            Ok(false) => {
                self.inner.states.lock().remove(&task.id);
                self.log().info(Message::ReminderClaimLost(task.id));
                return None;
            }
            Err(e) => {
                self.inner.states.lock().remove(&task.id);
                self.log().error(Message::ReminderClaimFailed(e.to_string()));
                return None;
            }
        }

        let inner = Arc::clone(&self.inner);
        let (id, title) = (task.id, task.title.clone());
        let handle = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(delay_ms as u64)).await;
            inner.fire(id, title).await;
        });
        self.inner.handles.lock().insert(task.id, ReminderHandle { id: task.id, handle });

        self.log().info(Message::ReminderArmed {
            title: task.title.clone(),
            delay_ms,
        });

        Some(ArmedReminder {
            id: task.id,
            title: task.title.clone(),
            delay_ms,
        })
    }

    /// Cancels the reminder for `id`. Returns `true` if one was still pending.
    pub fn cancel(&self, id: i64) -> bool {
        let handle = self.inner.handles.lock().remove(&id);
        let state = self.inner.states.lock().remove(&id);

        let pending = matches!(&handle, Some(h) if !h.is_finished()) && state == Some(ReminderState::Armed);
        if let Some(handle) = handle {
            handle.cancel();
        }
        if pending {
            self.log().info(Message::ReminderCancelled(id));
        }
        pending
    }

    /// Drops the entries kept for a task that can no longer be armed. A
    /// reminder still running its follow-up work is left alone.
    pub fn forget(&self, id: i64) {
        let mut handles = self.inner.handles.lock();
        if handles.get(&id).is_some_and(|handle| !handle.is_finished()) {
            return;
        }
        handles.remove(&id);
        drop(handles);
        self.inner.states.lock().remove(&id);
    }

    /// Cancels every reminder and forgets all states. Returns how many were
    /// still pending.
    pub fn cancel_all(&self) -> usize {
        let ids: Vec<i64> = self.inner.states.lock().keys().copied().collect();
        ids.into_iter().filter(|id| self.cancel(*id)).count()
    }

    /// Stops all timers, for process exit.
    pub fn shutdown(&self) {
        self.inner.handles.lock().clear();
    }

    fn log(&self) -> &ActivityLog {
        self.inner.tasks.log()
    }
}

impl Inner {
    async fn fire(&self, id: i64, title: String) {
        self.states.lock().insert(id, ReminderState::Fired);
        self.tasks.log().info(Message::ReminderFired(title.clone()));

        let dismissal = self.notifier.notify(&Notification {
            title,
            body: self.settings.body.clone(),
            icon: self.settings.icon.clone(),
        });
        if self.settings.haptics {
            self.haptics.vibrate(&VIBRATION_PATTERN);
        }
        let _ = self.events.send(ReminderEvent::Fired(id));

        if !self.settings.auto_cleanup || !dismissal.dismissed().await {
            return;
        }

        tokio::time::sleep(Duration::from_millis(self.settings.cleanup_delay_ms)).await;
        match self.tasks.delete(id).await {
            Ok(_) => {
                self.tasks.log().info(Message::ReminderCleanedUp(id));
                let _ = self.events.send(ReminderEvent::CleanedUp(id));
            }
            Err(e) => self.tasks.log().error(Message::ReminderCleanupFailed(e.to_string())),
        }
    }
}
