//! Persistence layer: one SQLite database holding the `tasks` table.
//!
//! ```rust
//! use taskbell::db::{db::Store, tasks::Tasks};
//! use taskbell::libs::activity::ActivityLog;
//!
//! let store = Store::open_in_memory().unwrap();
//! let tasks = Tasks::new(store.clone(), ActivityLog::new());
//! # drop(tasks);
//! store.close().unwrap();
//! ```

/// Store lifecycle and transactions.
pub mod db;

/// Versioned schema migrations.
pub mod migrations;

/// Task repository.
pub mod tasks;
