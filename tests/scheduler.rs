#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, NaiveDateTime};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use std::time::Duration;
    use taskbell::db::db::{Store, DB_FILE_NAME};
    use taskbell::db::tasks::Tasks;
    use taskbell::libs::activity::{ActivityLog, LogKind};
    use taskbell::libs::notifier::{ChannelNotifier, HapticsEmitter, NoHaptics, Notification, VIBRATION_PATTERN};
    use taskbell::libs::scheduler::{ReminderEvent, ReminderSettings, ReminderState, Scheduler};
    use taskbell::libs::task::{Meridiem, NewTask, Task, TaskTime};
    use tokio::sync::mpsc::UnboundedReceiver;

    #[derive(Default)]
    struct RecordingHaptics {
        patterns: Mutex<Vec<Vec<u64>>>,
    }

    impl HapticsEmitter for RecordingHaptics {
        fn vibrate(&self, pattern: &[u64]) {
            self.patterns.lock().push(pattern.to_vec());
        }
    }

    struct Fixture {
        tasks: Tasks,
        scheduler: Scheduler,
        notifications: UnboundedReceiver<Notification>,
        haptics: Arc<RecordingHaptics>,
    }

    fn fixture(settings: ReminderSettings) -> Fixture {
        let tasks = Tasks::new(Store::open_in_memory().unwrap(), ActivityLog::new());
        let (notifier, notifications) = ChannelNotifier::channel();
        let haptics = Arc::new(RecordingHaptics::default());
        let scheduler = Scheduler::new(tasks.clone(), Arc::new(notifier), haptics.clone(), settings);
        Fixture {
            tasks,
            scheduler,
            notifications,
            haptics,
        }
    }

    fn today_at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(hour, minute, 0).unwrap()
    }

    /// Stores a task due at `hour12:minute meridiem` on `date`.
    async fn stored(tasks: &Tasks, title: &str, date: NaiveDate, hour12: u32, minute: u32, meridiem: Meridiem) -> Task {
        let new_task = NewTask {
            title: title.to_string(),
            date,
            time: TaskTime::new(hour12, minute, meridiem).unwrap(),
        };
        let id = tasks.add(&new_task).await.unwrap();
        Task::from_new(id, new_task)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_day_task_is_armed_with_minute_delay() {
        let f = fixture(ReminderSettings::default());
        let task = stored(&f.tasks, "Stand-up", today(), 2, 30, Meridiem::Pm).await;

        let armed = f.scheduler.arm(&task, today_at(14, 0)).await.unwrap();

        assert_eq!(armed.delay_ms, 1_800_000);
        assert_eq!(f.scheduler.state(task.id), ReminderState::Armed);
        assert_eq!(f.scheduler.armed_count(), 1);
        assert!(f.tasks.get(task.id).await.unwrap().unwrap().notified);
        assert!(f.tasks.log().contains(LogKind::Info, "Stand-up"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_armed_reminder_fires_after_its_delay() {
        let mut f = fixture(ReminderSettings::default());
        let task = stored(&f.tasks, "Stand-up", today(), 2, 1, Meridiem::Pm).await;
        f.scheduler.arm(&task, today_at(14, 0)).await.unwrap();

        tokio::time::advance(Duration::from_millis(59_000)).await;
        tokio::task::yield_now().await;
        assert!(f.notifications.try_recv().is_err());

        let notification = f.notifications.recv().await.unwrap();
        assert_eq!(notification.title, "Stand-up");
        assert_eq!(notification.body, "It's time to start your task!");
        assert_eq!(notification.icon.as_deref(), Some("images/bell.png"));
        assert_eq!(f.scheduler.state(task.id), ReminderState::Fired);
        assert_eq!(f.haptics.patterns.lock().as_slice(), &[VIBRATION_PATTERN.to_vec()]);
    }

    #[tokio::test]
    async fn test_task_due_this_minute_fires_immediately() {
        let mut f = fixture(ReminderSettings::default());
        let task = stored(&f.tasks, "Now", today(), 9, 15, Meridiem::Am).await;

        let now = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap().and_hms_opt(9, 15, 42).unwrap();
        let armed = f.scheduler.arm(&task, now).await.unwrap();
        assert_eq!(armed.delay_ms, 0);

        assert_eq!(f.notifications.recv().await.unwrap().title, "Now");
    }

    #[tokio::test]
    async fn test_arming_twice_is_a_no_op() {
        let f = fixture(ReminderSettings::default());
        let task = stored(&f.tasks, "Once", today(), 11, 0, Meridiem::Pm).await;
        let now = today_at(10, 0);

        assert!(f.scheduler.arm(&task, now).await.is_some());
        assert!(f.scheduler.arm(&task, now).await.is_none());

        let reloaded = f.tasks.get_all().await.unwrap();
        assert!(f.scheduler.arm_due(&reloaded, now).await.is_empty());
        assert_eq!(f.scheduler.armed_count(), 1);
    }

    #[tokio::test]
    async fn test_claimed_task_is_not_armed_by_a_new_scheduler() {
        let f = fixture(ReminderSettings::default());
        let task = stored(&f.tasks, "Claimed", today(), 11, 0, Meridiem::Pm).await;
        f.scheduler.arm(&task, today_at(10, 0)).await.unwrap();
        f.scheduler.shutdown();

        let restarted = Scheduler::new(f.tasks.clone(), Arc::new(ChannelNotifier::channel().0), Arc::new(NoHaptics), ReminderSettings::default());
        let reloaded = f.tasks.get_all().await.unwrap();
        assert!(restarted.arm_due(&reloaded, today_at(10, 0)).await.is_empty());
        assert_eq!(restarted.state(task.id), ReminderState::Unscheduled);
    }

    #[tokio::test]
    async fn test_only_later_today_is_eligible() {
        let f = fixture(ReminderSettings::default());
        let now = today_at(12, 0);
        let tomorrow = stored(&f.tasks, "Tomorrow", today().succ_opt().unwrap(), 12, 30, Meridiem::Pm).await;
        let earlier = stored(&f.tasks, "Earlier", today(), 11, 59, Meridiem::Am).await;
        let later = stored(&f.tasks, "Later", today(), 12, 1, Meridiem::Pm).await;

        let armed = f.scheduler.arm_due(&[tomorrow.clone(), earlier.clone(), later.clone()], now).await;

        assert_eq!(armed.len(), 1);
        assert_eq!(armed[0].id, later.id);
        assert_eq!(armed[0].delay_ms, 60_000);
        assert_eq!(f.scheduler.state(tomorrow.id), ReminderState::Unscheduled);
        assert!(!f.tasks.get(tomorrow.id).await.unwrap().unwrap().notified);
        assert!(!f.tasks.get(earlier.id).await.unwrap().unwrap().notified);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_reminder_never_fires() {
        let mut f = fixture(ReminderSettings::default());
        let task = stored(&f.tasks, "Cancelled", today(), 10, 5, Meridiem::Am).await;
        f.scheduler.arm(&task, today_at(10, 0)).await.unwrap();

        assert!(f.scheduler.cancel(task.id));
        assert!(!f.scheduler.cancel(task.id));
        assert_eq!(f.scheduler.state(task.id), ReminderState::Unscheduled);

        tokio::time::advance(Duration::from_secs(600)).await;
        tokio::task::yield_now().await;
        assert!(f.notifications.try_recv().is_err());
        assert!(f.tasks.log().contains(LogKind::Info, "cancelled"));
    }

    #[tokio::test]
    async fn test_cancel_all_counts_pending_reminders() {
        let f = fixture(ReminderSettings::default());
        for minute in [10, 20, 30] {
            let task = stored(&f.tasks, "Batch", today(), 10, minute, Meridiem::Am).await;
            f.scheduler.arm(&task, today_at(10, 0)).await.unwrap();
        }

        assert_eq!(f.scheduler.cancel_all(), 3);
        assert_eq!(f.scheduler.armed_count(), 0);
    }

    #[tokio::test]
    async fn test_forget_keeps_live_timers_and_drops_finished_ones() {
        let mut f = fixture(ReminderSettings::default());
        let later = stored(&f.tasks, "Later", today(), 11, 0, Meridiem::Pm).await;
        let now_due = stored(&f.tasks, "Now", today(), 10, 0, Meridiem::Am).await;
        f.scheduler.arm_due(&[later.clone(), now_due.clone()], today_at(10, 0)).await;

        assert_eq!(f.notifications.recv().await.unwrap().title, "Now");
        tokio::task::yield_now().await;
        assert_eq!(f.scheduler.state(now_due.id), ReminderState::Fired);

        f.scheduler.forget(later.id);
        assert_eq!(f.scheduler.state(later.id), ReminderState::Armed);

        f.scheduler.forget(now_due.id);
        assert_eq!(f.scheduler.state(now_due.id), ReminderState::Unscheduled);
        f.scheduler.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn test_auto_cleanup_deletes_after_dismissal() {
        let settings = ReminderSettings {
            auto_cleanup: true,
            ..ReminderSettings::default()
        };
        let f = fixture(settings);
        let mut events = f.scheduler.subscribe();
        let task = stored(&f.tasks, "Temporary", today(), 10, 0, Meridiem::Am).await;
        f.scheduler.arm(&task, today_at(10, 0)).await.unwrap();

        assert_eq!(events.recv().await.unwrap(), ReminderEvent::Fired(task.id));
        assert_eq!(events.recv().await.unwrap(), ReminderEvent::CleanedUp(task.id));
        assert!(f.tasks.get(task.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_haptics_can_be_turned_off() {
        let settings = ReminderSettings {
            haptics: false,
            icon: None,
            ..ReminderSettings::default()
        };
        let mut f = fixture(settings);
        let task = stored(&f.tasks, "Quiet", today(), 10, 0, Meridiem::Am).await;
        f.scheduler.arm(&task, today_at(10, 0)).await.unwrap();

        let notification = f.notifications.recv().await.unwrap();
        assert_eq!(notification.icon, None);
        assert!(f.haptics.patterns.lock().is_empty());
    }

    #[tokio::test]
    async fn test_task_deleted_by_another_process_is_not_brought_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE_NAME);
        let watcher = Tasks::new(Store::open(&path).unwrap(), ActivityLog::new());
        let other = Tasks::new(Store::open(&path).unwrap(), ActivityLog::new());
        let (notifier, mut notifications) = ChannelNotifier::channel();
        let scheduler = Scheduler::new(watcher.clone(), Arc::new(notifier), Arc::new(NoHaptics), ReminderSettings::default());

        let task = stored(&watcher, "Gone", today(), 10, 0, Meridiem::Am).await;
        let snapshot = watcher.get_all().await.unwrap();
        assert!(other.delete(task.id).await.unwrap());

        assert!(scheduler.arm_due(&snapshot, today_at(10, 0)).await.is_empty());
        assert_eq!(scheduler.state(task.id), ReminderState::Unscheduled);
        assert!(watcher.get(task.id).await.unwrap().is_none());
        assert!(other.get_all().await.unwrap().is_empty());
        assert!(watcher.log().contains(LogKind::Info, "removed or claimed elsewhere"));
        tokio::task::yield_now().await;
        assert!(notifications.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_task_claimed_by_another_process_is_armed_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE_NAME);
        let first = Tasks::new(Store::open(&path).unwrap(), ActivityLog::new());
        let second = Tasks::new(Store::open(&path).unwrap(), ActivityLog::new());
        let first_scheduler = Scheduler::new(first.clone(), Arc::new(ChannelNotifier::channel().0), Arc::new(NoHaptics), ReminderSettings::default());
        let second_scheduler = Scheduler::new(second.clone(), Arc::new(ChannelNotifier::channel().0), Arc::new(NoHaptics), ReminderSettings::default());

        let task = stored(&first, "Shared", today(), 11, 0, Meridiem::Pm).await;
        let snapshot = second.get_all().await.unwrap();

        assert_eq!(first_scheduler.arm_due(&[task.clone()], today_at(10, 0)).await.len(), 1);
        assert!(second_scheduler.arm_due(&snapshot, today_at(10, 0)).await.is_empty());
        assert_eq!(second_scheduler.armed_count(), 0);
        first_scheduler.shutdown();
    }
}
