//! Display implementation for taskbell messages.
//!
//! Every user-facing string lives here so the activity log, the console
//! output and the notification texts stay consistent.
//!
//! ```rust
//! use taskbell::libs::messages::Message;
//!
//! assert_eq!(Message::NoTasks.to_string(), "You have no tasks!");
//! ```

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter) -> Result {
        let text = match self {
            // === STORE MESSAGES ===
            Message::StoreOpened => "Database successfully opened".to_string(),
            Message::StoreClosed => "Database closed".to_string(),

            // === TASK MESSAGES ===
            Message::TaskAdded(title) => format!("Successfully added task '{}'", title),
            Message::TaskAddFailed(error) => format!("Failed to add task: {}", error),
            Message::TasksLoaded(count) => format!("All tasks successfully loaded ({})", count),
            Message::TasksLoadFailed(error) => format!("Error retrieving all tasks: {}", error),
            Message::TaskUpdated(id) => format!("Successfully updated task #{}", id),
            Message::TaskClaimed(id) => format!("Task #{} claimed for a reminder", id),
            Message::TaskUpdateFailed(error) => format!("Error updating task: {}", error),
            Message::TaskDeleted(id) => format!("Successfully deleted task #{}", id),
            Message::TaskDeleteFailed(error) => format!("Error deleting task: {}", error),
            Message::TaskNotFound(id) => format!("Task #{} not found", id),
            Message::TasksCleared(count) => format!("All tasks cleared ({})", count),
            Message::TasksClearFailed(error) => format!("Error clearing all tasks: {}", error),
            Message::NoTasks => "You have no tasks!".to_string(),
            Message::TasksHeader => "Your tasks".to_string(),

            // === VALIDATION MESSAGES ===
            Message::EnterFutureDateTime => "Error! Please enter future date/time for task.".to_string(),
            Message::InvalidTask(reason) => format!("Error! {}", reason),

            // === EXPIRY MESSAGES ===
            Message::ExpiredTaskEvicted(title) => format!("Task '{}' has expired and was removed", title),
            Message::ExpiredTaskSkipped(title) => format!("Task '{}' has expired and is hidden", title),

            // === REMINDER MESSAGES ===
            Message::ReminderArmed { title, delay_ms } => {
                let minutes = delay_ms / 60_000;
                format!("Reminder for '{}' set in {} min", title, minutes)
            }
            Message::ReminderFired(title) => format!("Reminder: {}", title),
            Message::ReminderCancelled(id) => format!("Reminder for task #{} cancelled", id),
            Message::ReminderCleanedUp(id) => format!("Task #{} removed after its reminder", id),
            Message::ReminderCleanupFailed(error) => format!("Failed to remove a reminded task: {}", error),
            Message::ReminderClaimFailed(error) => format!("Failed to set reminder: {}", error),
            Message::ReminderClaimLost(id) => format!("Task #{} was removed or claimed elsewhere, no reminder set", id),

            // === NOTIFICATION MESSAGES ===
            Message::NotificationPermissionGranted => "Notification permission granted".to_string(),
            Message::NotificationPermissionDenied => "Notification permission denied".to_string(),
            Message::NotificationsUnsupported => "Notifications are not supported here".to_string(),

            // === WATCH MESSAGES ===
            Message::WatchStarted(armed) => format!("Watching tasks, {} reminder(s) pending. Press Ctrl-C to stop.", armed),
            Message::WatchStopping => "Stopping, pending reminders are dropped".to_string(),
            Message::WatchCtrlCFailed(error) => format!("Failed to listen for Ctrl-C: {}", error),
            Message::WatchRenderFailed(error) => format!("Could not show the task list: {}", error),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigReadFailed(error) => format!("Failed to read configuration: {}", error),
            Message::ConfigModuleReminders => "Reminders".to_string(),
            Message::ConfigModuleNotifications => "Notifications".to_string(),

            // === PROMPTS ===
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskHour => "Hour (1-12)".to_string(),
            Message::PromptTaskMinute => "Minute (0-59)".to_string(),
            Message::PromptTaskDay => "Day".to_string(),
            Message::PromptTaskMonth => "Month".to_string(),
            Message::PromptTaskYear => "Year".to_string(),
            Message::PromptTaskMeridiem => "AM or PM".to_string(),
            Message::PromptConfirmClearAll(count) => format!("Delete all {} task(s)?", count),
            Message::PromptConfirmDelete(title) => format!("Delete task '{}'?", title),
            Message::PromptEvictionPolicy => "What should happen to expired tasks".to_string(),
            Message::PromptAutoCleanup => "Remove a task once its reminder is dismissed?".to_string(),
            Message::PromptCleanupDelay => "Delay before removal (milliseconds)".to_string(),
            Message::PromptNotificationBody => "Notification text".to_string(),
            Message::PromptNotificationIcon => "Notification icon (empty for none)".to_string(),
            Message::PromptHaptics => "Vibrate on reminder where supported?".to_string(),
            Message::PromptSelectModules => "Select settings to configure".to_string(),
            Message::HourRange => "Hour must be between 1 and 12".to_string(),
            Message::MinuteRange => "Minute must be between 0 and 59".to_string(),
            Message::TitleRequired => "Title must not be empty".to_string(),

            // === LOG VIEW ===
            Message::ActivityLogHeader => "Activity log".to_string(),

            // === GENERAL MESSAGES ===
            Message::OperationCancelled => "Operation cancelled".to_string(),

            // === MIGRATION MESSAGES ===
            Message::MigrationsFound(count) => format!("Found {} pending database migrations", count),
            Message::RunningMigration(version, name) => format!("Running migration v{}: {}", version, name),
            Message::MigrationCompleted(version) => format!("✓ Migration v{} completed", version),
            Message::MigrationFailed(version, error) => format!("✗ Migration v{} failed: {}", version, error),
            Message::AllMigrationsCompleted => "All database migrations completed successfully".to_string(),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
        };

        write!(f, "{}", text)
    }
}
