//! # Taskbell - local task reminders
//!
//! Keeps a list of titled tasks with a due date and time in a local SQLite
//! store and rings a reminder when a task falls due while the application is
//! running.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbell::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
