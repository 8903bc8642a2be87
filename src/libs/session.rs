//! One open application session.
//!
//! A [`Session`] ties the repository, the scheduler, the emitters and the
//! clock together and runs the rebuild pass after every mutation:
//!
//! 1. read every stored task,
//! 2. evict the expired ones according to the [`EvictionPolicy`],
//! 3. arm reminders for what is due later today,
//! 4. hand the rest to the presentation layer, newest first.
//!
//! Failures are written to the activity log where they happen and also
//! returned, so the caller decides whether they end the process. The session
//! itself stays usable after a failed operation.

use crate::db::tasks::Tasks;
use crate::libs::activity::ActivityLog;
use crate::libs::clock::Clock;
use crate::libs::config::Config;
use crate::libs::error::{TaskError, ValidationError};
use crate::libs::expiry::{self, EvictionPolicy};
use crate::libs::messages::Message;
use crate::libs::notifier::{HapticsEmitter, NotificationEmitter, Permission};
use crate::libs::scheduler::Scheduler;
use crate::libs::task::{Task, TaskForm};
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

/// A stored task and the list rebuilt right after storing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub id: i64,
    pub tasks: Vec<Task>,
}

pub struct Session {
    tasks: Tasks,
    scheduler: Scheduler,
    notifier: Arc<dyn NotificationEmitter>,
    clock: Arc<dyn Clock>,
    eviction: EvictionPolicy,
    arm_reminders: bool,
    permission: OnceLock<Permission>,
    seen_version: Mutex<Option<i64>>,
}

impl Session {
    pub fn new(tasks: Tasks, notifier: Arc<dyn NotificationEmitter>, haptics: Arc<dyn HapticsEmitter>, clock: Arc<dyn Clock>, config: &Config) -> Self {
        let scheduler = Scheduler::new(tasks.clone(), Arc::clone(&notifier), haptics, config.reminder_settings());
        Self {
            tasks,
            scheduler,
            notifier,
            clock,
            eviction: config.eviction,
            arm_reminders: true,
            permission: OnceLock::new(),
            seen_version: Mutex::new(None),
        }
    }

    /// A session that evicts but never arms reminders.
    ///
    /// For commands that exit right after rendering: arming would set the
    /// claim flag on tasks whose timers die with the process.
    pub fn passive(mut self) -> Self {
        self.arm_reminders = false;
        self
    }

    pub fn tasks(&self) -> &Tasks {
        &self.tasks
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn log(&self) -> &ActivityLog {
        self.tasks.log()
    }

    /// Permission granted by the host, once it has been asked.
    pub fn permission(&self) -> Option<Permission> {
        self.permission.get().copied()
    }

    /// Validates and stores a new task, then rebuilds.
    ///
    /// An invalid form is logged and nothing is written.
    pub async fn submit(&self, form: TaskForm) -> Result<Submission, TaskError> {
        let new_task = match expiry::validate(form, self.clock.now()) {
            Ok(task) => task,
            Err(e) => {
                match &e {
                    ValidationError::Expired(_) => self.log().error(Message::EnterFutureDateTime),
                    other => self.log().error(Message::InvalidTask(other.to_string())),
                }
                return Err(e.into());
            }
        };

        self.request_permission();

        let id = self.tasks.add(&new_task).await?;
        let tasks = self.build_list().await?;
        Ok(Submission { id, tasks })
    }

    /// Cancels the task's reminder, deletes it and rebuilds.
    pub async fn delete(&self, id: i64) -> Result<Vec<Task>, TaskError> {
        self.scheduler.cancel(id);
        self.tasks.delete(id).await?;
        self.build_list().await
    }

    /// Cancels every reminder and removes every task.
    pub async fn clear(&self) -> Result<Vec<Task>, TaskError> {
        self.scheduler.cancel_all();
        self.tasks.clear().await?;
        Ok(Vec::new())
    }

    /// The rebuild pass. Returns the visible tasks in descending id order.
    pub async fn build_list(&self) -> Result<Vec<Task>, TaskError> {
        let now = self.clock.now();
        let stored = self.tasks.get_all().await?;

        let mut visible = Vec::with_capacity(stored.len());
        for task in stored {
            if !expiry::is_expired(task.due(), now) {
                visible.push(task);
                continue;
            }

            match self.eviction {
                EvictionPolicy::Delete => {
                    self.scheduler.cancel(task.id);
                    // A failed delete is already logged; the task stays hidden
                    // and is retried on the next rebuild.
                    if self.tasks.delete(task.id).await.is_ok() {
                        self.log().info(Message::ExpiredTaskEvicted(task.title));
                    }
                }
                EvictionPolicy::Skip => {
                    self.scheduler.forget(task.id);
                    self.log().info(Message::ExpiredTaskSkipped(task.title));
                }
            }
        }

        let armed = if self.arm_reminders {
            self.scheduler.arm_due(&visible, now).await
        } else {
            Vec::new()
        };
        for task in visible.iter_mut() {
            if armed.iter().any(|reminder| reminder.id == task.id) {
                task.notified = true;
            }
        }

        visible.reverse();
        Ok(visible)
    }

    /// Rebuilds only when another connection committed to the store since
    /// the last call. The first call always rebuilds.
    ///
    /// Lets a long-running session pick up tasks added from another process
    /// without waiting for the next periodic rebuild.
    pub async fn rebuild_if_changed(&self) -> Result<Option<Vec<Task>>, TaskError> {
        let version = self.tasks.store().data_version().await?;
        if *self.seen_version.lock() == Some(version) {
            return Ok(None);
        }
        let tasks = self.build_list().await?;
        *self.seen_version.lock() = Some(version);
        Ok(Some(tasks))
    }

    /// Stops every pending reminder.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
    }

    fn request_permission(&self) -> Permission {
        *self.permission.get_or_init(|| {
            let permission = self.notifier.request_permission();
            match permission {
                Permission::Granted => self.log().info(Message::NotificationPermissionGranted),
                Permission::Denied => self.log().info(Message::NotificationPermissionDenied),
                Permission::Unsupported => self.log().info(Message::NotificationsUnsupported),
            }
            permission
        })
    }
}
