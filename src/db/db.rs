//! The local store: one SQLite database holding the `tasks` table.
//!
//! A [`Store`] is opened explicitly, handed to whoever needs it and closed
//! explicitly. Work runs on tokio's blocking pool inside a transaction; the
//! returned future resolves only after the commit, so a caller that awaits an
//! insert can rely on the row being visible to the next read.

use super::migrations;
use crate::libs::data_storage::DataStorage;
use crate::libs::error::PersistenceError;
use crate::libs::messages::Message;
use crate::msg_debug;
use parking_lot::Mutex;
use rusqlite::{Connection, Transaction};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub const DB_FILE_NAME: &str = "taskbell.db";

#[derive(Debug, Clone)]
pub struct Store {
    conn: Arc<Mutex<Option<Connection>>>,
    path: Option<PathBuf>,
}

impl Store {
    /// Opens (or creates) the database at `path` and brings its schema up to date.
    pub fn open(path: impl AsRef<Path>) -> Result<Store, PersistenceError> {
        let path = path.as_ref().to_path_buf();
        let mut conn = Connection::open(&path).map_err(|source| PersistenceError::Open { path: path.clone(), source })?;
        migrations::init_with_migrations(&mut conn)?;
        msg_debug!(Message::StoreOpened);

        Ok(Store {
            conn: Arc::new(Mutex::new(Some(conn))),
            path: Some(path),
        })
    }

    /// Opens the database in the platform data directory.
    pub fn open_default() -> Result<Store, PersistenceError> {
        let path = DataStorage::new().get_path(DB_FILE_NAME)?;
        Self::open(path)
    }

    pub fn open_in_memory() -> Result<Store, PersistenceError> {
        let mut conn = Connection::open_in_memory()?;
        migrations::init_with_migrations(&mut conn)?;

        Ok(Store {
            conn: Arc::new(Mutex::new(Some(conn))),
            path: None,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.conn.lock().is_some()
    }

    /// Closes the connection. Clones of this store see the closed state too;
    /// closing twice is a no-op.
    pub fn close(&self) -> Result<(), PersistenceError> {
        let conn = self.conn.lock().take();
        match conn {
            Some(conn) => {
                conn.close().map_err(|(_, e)| PersistenceError::Sqlite(e))?;
                msg_debug!(Message::StoreClosed);
                Ok(())
            }
            None => Ok(()),
        }
    }

    /// Runs `f` in a transaction on the blocking pool and commits it.
    ///
    /// An error from `f` rolls the transaction back.
    pub async fn transaction<T, F>(&self, f: F) -> Result<T, PersistenceError>
    where
        F: FnOnce(&Transaction) -> rusqlite::Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || -> Result<T, PersistenceError> {
            let mut guard = conn.lock();
            let conn = guard.as_mut().ok_or(PersistenceError::Closed)?;
            let tx = conn.transaction()?;
            let value = f(&tx)?;
            tx.commit()?;
            Ok(value)
        })
        .await
        .map_err(|e| PersistenceError::Worker(e.to_string()))?
    }

    /// SQLite's `data_version` for this connection. It changes whenever
    /// another connection commits to the same file, and never for commits
    /// made through this store.
    pub async fn data_version(&self) -> Result<i64, PersistenceError> {
        self.transaction(|tx| tx.query_row("PRAGMA data_version", [], |row| row.get(0))).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn closed_store_rejects_work() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.is_open());

        store.close().unwrap();
        assert!(!store.is_open());
        store.close().unwrap();

        let result = store.transaction(|tx| tx.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))).await;
        assert!(matches!(result, Err(PersistenceError::Closed)));
    }

    #[tokio::test]
    async fn failed_work_is_rolled_back() {
        let store = Store::open_in_memory().unwrap();

        let result: Result<(), _> = store
            .transaction(|tx| {
                tx.execute(
                    "INSERT INTO tasks (title, date, hour, minute, meridiem) VALUES ('a', '2026-10-16', 1, 0, 'AM')",
                    [],
                )?;
                tx.execute("INSERT INTO no_such_table VALUES (1)", [])?;
                Ok(())
            })
            .await;
        assert!(matches!(result, Err(PersistenceError::Sqlite(_))));

        let count = store
            .transaction(|tx| tx.query_row("SELECT COUNT(*) FROM tasks", [], |row| row.get::<_, i64>(0)))
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[test]
    fn reopening_a_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE_NAME);

        Store::open(&path).unwrap().close().unwrap();
        let store = Store::open(&path).unwrap();
        assert_eq!(store.path(), Some(path.as_path()));
    }

    #[tokio::test]
    async fn data_version_tracks_other_connections_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DB_FILE_NAME);
        let watcher = Store::open(&path).unwrap();
        let writer = Store::open(&path).unwrap();
        let insert = "INSERT INTO tasks (title, date, hour, minute, meridiem) VALUES ('a', '2026-10-16', 1, 0, 'AM')";

        let before = watcher.data_version().await.unwrap();
        watcher.transaction(move |tx| tx.execute(insert, [])).await.unwrap();
        assert_eq!(watcher.data_version().await.unwrap(), before);

        writer.transaction(move |tx| tx.execute(insert, [])).await.unwrap();
        assert_ne!(watcher.data_version().await.unwrap(), before);
    }
}
