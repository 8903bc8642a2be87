//! Task repository: CRUD over the `tasks` table.
//!
//! Every operation reports its outcome to the [`ActivityLog`] (info on
//! success, error on failure) and returns a typed [`PersistenceError`] when
//! the underlying transaction fails.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbell::db::{db::Store, tasks::Tasks};
//! use taskbell::libs::activity::ActivityLog;
//!
//! # async fn run() -> Result<(), taskbell::libs::error::PersistenceError> {
//! let tasks = Tasks::new(Store::open_default()?, ActivityLog::new());
//! for task in tasks.get_all().await? {
//!     println!("{} at {}", task.title, task.time);
//! }
//! # Ok(())
//! # }
//! ```

use super::db::Store;
use crate::libs::activity::ActivityLog;
use crate::libs::error::PersistenceError;
use crate::libs::messages::Message;
use crate::libs::task::{Meridiem, NewTask, Task, TaskTime};
use rusqlite::types::Type;
use rusqlite::{params, OptionalExtension, Row};

const INSERT_TASK: &str = "INSERT INTO tasks (title, date, hour, minute, meridiem, notified) VALUES (?1, ?2, ?3, ?4, ?5, FALSE)";
const SELECT_TASKS: &str = "SELECT id, title, date, hour, minute, meridiem, notified FROM tasks ORDER BY id";
const SELECT_TASK_BY_ID: &str = "SELECT id, title, date, hour, minute, meridiem, notified FROM tasks WHERE id = ?1";
const UPSERT_TASK: &str = "INSERT INTO tasks (id, title, date, hour, minute, meridiem, notified) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
    ON CONFLICT(id) DO UPDATE SET
        title = excluded.title,
        date = excluded.date,
        hour = excluded.hour,
        minute = excluded.minute,
        meridiem = excluded.meridiem,
        notified = excluded.notified";
const CLAIM_TASK: &str = "UPDATE tasks SET notified = TRUE WHERE id = ?1 AND notified = FALSE";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";
const DELETE_ALL_TASKS: &str = "DELETE FROM tasks";

#[derive(Debug, Clone)]
pub struct Tasks {
    store: Store,
    log: ActivityLog,
}

impl Tasks {
    pub fn new(store: Store, log: ActivityLog) -> Self {
        Self { store, log }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Inserts `task` and returns the id the store assigned to it.
    pub async fn add(&self, task: &NewTask) -> Result<i64, PersistenceError> {
        let title = task.title.clone();
        let (date, hour, minute, meridiem) = (task.date, task.time.hour, task.time.minute, task.time.meridiem.as_str());

        let result = self
            .store
            .transaction(move |tx| {
                tx.execute(INSERT_TASK, params![title, date, hour, minute, meridiem])?;
                Ok(tx.last_insert_rowid())
            })
            .await;

        match &result {
            Ok(_) => self.log.info(Message::TaskAdded(task.title.clone())),
            Err(e) => self.log.error(Message::TaskAddFailed(e.to_string())),
        }
        result
    }

    /// Every stored task, ascending by id.
    pub async fn get_all(&self) -> Result<Vec<Task>, PersistenceError> {
        let result = self
            .store
            .transaction(|tx| {
                let mut stmt = tx.prepare(SELECT_TASKS)?;
                let rows = stmt.query_map([], task_from_row)?;
                rows.collect::<rusqlite::Result<Vec<_>>>()
            })
            .await;

        match &result {
            Ok(tasks) => self.log.info(Message::TasksLoaded(tasks.len())),
            Err(e) => self.log.error(Message::TasksLoadFailed(e.to_string())),
        }
        result
    }

    pub async fn get(&self, id: i64) -> Result<Option<Task>, PersistenceError> {
        let result = self
            .store
            .transaction(move |tx| tx.query_row(SELECT_TASK_BY_ID, params![id], task_from_row).optional())
            .await;

        if let Err(e) = &result {
            self.log.error(Message::TasksLoadFailed(e.to_string()));
        }
        result
    }

    /// Writes `task` under its id, inserting it if the id is not stored.
    pub async fn update(&self, task: &Task) -> Result<(), PersistenceError> {
        let task_row = task.clone();
        let result = self
            .store
            .transaction(move |tx| {
                tx.execute(
                    UPSERT_TASK,
                    params![
                        task_row.id,
                        task_row.title,
                        task_row.date,
                        task_row.time.hour,
                        task_row.time.minute,
                        task_row.time.meridiem.as_str(),
                        task_row.notified
                    ],
                )?;
                Ok(())
            })
            .await;

        match &result {
            Ok(()) => self.log.info(Message::TaskUpdated(task.id)),
            Err(e) => self.log.error(Message::TaskUpdateFailed(e.to_string())),
        }
        result
    }

    /// Sets the claim flag of a stored, unclaimed task.
    ///
    /// Returns `false` when the task is gone or another process already
    /// claimed it. Unlike [`Tasks::update`] this never inserts a row.
    pub async fn claim(&self, id: i64) -> Result<bool, PersistenceError> {
        let result = self
            .store
            .transaction(move |tx| Ok(tx.execute(CLAIM_TASK, params![id])? == 1))
            .await;

        match &result {
            Ok(true) => self.log.info(Message::TaskClaimed(id)),
            Ok(false) => {}
            Err(e) => self.log.error(Message::TaskUpdateFailed(e.to_string())),
        }
        result
    }

    /// Removes the task. Returns `false` when nothing was stored under `id`,
    /// which is not an error.
    pub async fn delete(&self, id: i64) -> Result<bool, PersistenceError> {
        let result = self
            .store
            .transaction(move |tx| Ok(tx.execute(DELETE_TASK, params![id])? > 0))
            .await;

        match &result {
            Ok(_) => self.log.info(Message::TaskDeleted(id)),
            Err(e) => self.log.error(Message::TaskDeleteFailed(e.to_string())),
        }
        result
    }

    /// Removes every task in one transaction and returns how many there were.
    pub async fn clear(&self) -> Result<usize, PersistenceError> {
        let result = self.store.transaction(|tx| tx.execute(DELETE_ALL_TASKS, [])).await;

        match &result {
            Ok(count) => self.log.info(Message::TasksCleared(*count)),
            Err(e) => self.log.error(Message::TasksClearFailed(e.to_string())),
        }
        result
    }
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    let meridiem: String = row.get(5)?;
    let meridiem: Meridiem = meridiem
        .parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e)))?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        date: row.get(2)?,
        time: TaskTime {
            hour: row.get(3)?,
            minute: row.get(4)?,
            meridiem,
        },
        notified: row.get(6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::activity::LogKind;
    use chrono::NaiveDate;

    fn repo() -> Tasks {
        Tasks::new(Store::open_in_memory().unwrap(), ActivityLog::new())
    }

    fn new_task(title: &str) -> NewTask {
        NewTask {
            title: title.to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 16).unwrap(),
            time: TaskTime::new(3, 15, Meridiem::Pm).unwrap(),
        }
    }

    #[tokio::test]
    async fn add_then_get_all_returns_the_task_with_its_id() {
        let tasks = repo();
        let input = new_task("Pay bills");

        let id = tasks.add(&input).await.unwrap();
        let stored = tasks.get_all().await.unwrap();

        assert_eq!(stored, vec![Task::from_new(id, input)]);
        assert!(tasks.log().contains(LogKind::Info, "Successfully added task 'Pay bills'"));
    }

    #[tokio::test]
    async fn ids_are_not_reused_after_delete() {
        let tasks = repo();
        let first = tasks.add(&new_task("one")).await.unwrap();
        assert!(tasks.delete(first).await.unwrap());

        let second = tasks.add(&new_task("two")).await.unwrap();
        assert!(second > first);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let tasks = repo();
        let id = tasks.add(&new_task("once")).await.unwrap();

        assert!(tasks.delete(id).await.unwrap());
        assert!(!tasks.delete(id).await.unwrap());
        assert!(tasks.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_flips_claim_flag_and_upserts_missing_ids() {
        let tasks = repo();
        let id = tasks.add(&new_task("claim me")).await.unwrap();

        let mut task = tasks.get(id).await.unwrap().unwrap();
        assert!(!task.notified);
        task.notified = true;
        tasks.update(&task).await.unwrap();
        assert!(tasks.get(id).await.unwrap().unwrap().notified);

        let ghost = Task::from_new(99, new_task("ghost"));
        tasks.update(&ghost).await.unwrap();
        assert_eq!(tasks.get(99).await.unwrap(), Some(ghost));
    }

    #[tokio::test]
    async fn claim_only_succeeds_once_and_never_inserts() {
        let tasks = repo();
        let id = tasks.add(&new_task("claim once")).await.unwrap();

        assert!(tasks.claim(id).await.unwrap());
        assert!(!tasks.claim(id).await.unwrap());
        assert!(tasks.get(id).await.unwrap().unwrap().notified);

        assert!(!tasks.claim(42).await.unwrap());
        assert!(tasks.get(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let tasks = repo();
        for title in ["a", "b", "c"] {
            tasks.add(&new_task(title)).await.unwrap();
        }

        assert_eq!(tasks.clear().await.unwrap(), 3);
        assert!(tasks.get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn failures_are_logged_as_errors() {
        let tasks = repo();
        tasks.store().close().unwrap();

        assert!(matches!(tasks.get_all().await, Err(PersistenceError::Closed)));
        assert!(tasks.add(&new_task("late")).await.is_err());
        assert!(tasks.log().contains(LogKind::Error, "Error retrieving all tasks"));
        assert!(tasks.log().contains(LogKind::Error, "Failed to add task"));
    }
}
