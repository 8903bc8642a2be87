#[derive(Debug, Clone)]
pub enum Message {
    // === STORE MESSAGES ===
    StoreOpened,
    StoreClosed,

    // === TASK MESSAGES ===
    TaskAdded(String),
    TaskAddFailed(String),
    TasksLoaded(usize),
    TasksLoadFailed(String),
    TaskUpdated(i64),
    TaskUpdateFailed(String),
    TaskClaimed(i64),
    TaskDeleted(i64),
    TaskDeleteFailed(String),
    TaskNotFound(i64),
    TasksCleared(usize),
    TasksClearFailed(String),
    NoTasks,
    TasksHeader,

    // === VALIDATION MESSAGES ===
    EnterFutureDateTime,
    InvalidTask(String),

    // === EXPIRY MESSAGES ===
    ExpiredTaskEvicted(String),
    ExpiredTaskSkipped(String),

    // === REMINDER MESSAGES ===
    ReminderArmed { title: String, delay_ms: i64 },
    ReminderFired(String),
    ReminderCancelled(i64),
    ReminderCleanedUp(i64),
    ReminderCleanupFailed(String),
    ReminderClaimFailed(String),
    ReminderClaimLost(i64),

    // === NOTIFICATION MESSAGES ===
    NotificationPermissionGranted,
    NotificationPermissionDenied,
    NotificationsUnsupported,

    // === WATCH MESSAGES ===
    WatchStarted(usize),
    WatchStopping,
    WatchCtrlCFailed(String),
    WatchRenderFailed(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigReadFailed(String),
    ConfigModuleReminders,
    ConfigModuleNotifications,

    // === PROMPTS ===
    PromptTaskTitle,
    PromptTaskHour,
    PromptTaskMinute,
    PromptTaskDay,
    PromptTaskMonth,
    PromptTaskYear,
    PromptTaskMeridiem,
    PromptConfirmClearAll(usize),
    PromptConfirmDelete(String),
    PromptEvictionPolicy,
    PromptAutoCleanup,
    PromptCleanupDelay,
    PromptNotificationBody,
    PromptNotificationIcon,
    PromptHaptics,
    PromptSelectModules,
    HourRange,
    MinuteRange,
    TitleRequired,

    // === LOG VIEW ===
    ActivityLogHeader,

    // === GENERAL MESSAGES ===
    OperationCancelled,

    // === MIGRATION MESSAGES ===
    MigrationsFound(usize),
    RunningMigration(u32, String),
    MigrationCompleted(u32),
    MigrationFailed(u32, String),
    AllMigrationsCompleted,
    DatabaseUpToDate,
}
