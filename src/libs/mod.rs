//! Core library modules.
//!
//! - **Domain**: tasks, expiry rules, reminder scheduling, the session
//! - **Host collaborators**: clock, notification and haptics emitters
//! - **Infrastructure**: configuration, data storage, errors, messages, activity log
//! - **Presentation**: console tables

pub mod activity;
pub mod clock;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod expiry;
pub mod messages;
pub mod notifier;
pub mod scheduler;
pub mod session;
pub mod task;
pub mod view;
