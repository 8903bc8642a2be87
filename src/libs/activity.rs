//! Structured activity log.
//!
//! Store, repository, scheduler and session operations report what they did
//! as [`LogEvent`]s. Each event is kept in memory for the presentation layer
//! (the visible activity log) and forwarded to `tracing`.

use super::messages::Message;
use chrono::{Local, NaiveDateTime};
use parking_lot::Mutex;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEvent {
    pub kind: LogKind,
    pub message: String,
    pub at: NaiveDateTime,
}

/// Shared, cloneable sink for [`LogEvent`]s.
#[derive(Debug, Clone, Default)]
pub struct ActivityLog {
    events: Arc<Mutex<Vec<LogEvent>>>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&self, message: Message) {
        tracing::info!(target: "taskbell::activity", "{}", message);
        self.push(LogKind::Info, message);
    }

    pub fn error(&self, message: Message) {
        tracing::error!(target: "taskbell::activity", "{}", message);
        self.push(LogKind::Error, message);
    }

    fn push(&self, kind: LogKind, message: Message) {
        self.events.lock().push(LogEvent {
            kind,
            message: message.to_string(),
            at: Local::now().naive_local(),
        });
    }

    /// Snapshot of every event recorded so far.
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    /// Removes and returns the recorded events.
    pub fn drain(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// `true` if any recorded event of `kind` contains `needle`.
    pub fn contains(&self, kind: LogKind, needle: &str) -> bool {
        self.events.lock().iter().any(|e| e.kind == kind && e.message.contains(needle))
    }
}
