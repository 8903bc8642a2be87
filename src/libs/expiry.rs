//! Expiry policy: due-time resolution and the "has this task passed" checks.
//!
//! Everything here is pure. Times are local wall-clock values
//! (`NaiveDateTime`), the same reference the form is filled in with.
//!
//! ## Comparison rules
//!
//! - Same-day checks look at year, month and day only.
//! - Expiry compares year, then month, then day, then hour, then minute; the
//!   first component that differs decides. Seconds never take part, so a task
//!   due in the current minute is still live.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use taskbell::libs::expiry::{is_expired, resolve_due_instant};
//! use taskbell::libs::task::Meridiem;
//!
//! let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
//! let due = resolve_due_instant(date, 12, 30, Meridiem::Am);
//! assert_eq!(due.format("%H:%M").to_string(), "00:30");
//!
//! let now = date.and_hms_opt(9, 0, 0).unwrap();
//! assert!(is_expired(due, now));
//! ```

use super::error::ValidationError;
use super::task::{Meridiem, NewTask, TaskForm};
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

/// What a rebuild does with a task whose due time has passed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvictionPolicy {
    /// Remove the task from the store and log it.
    #[default]
    Delete,
    /// Leave the task stored but keep it out of the list (legacy behavior).
    Skip,
}

/// Converts a 12-hour clock value to 0-23.
///
/// `12 AM` is midnight, `12 PM` is noon, any other PM hour gains twelve.
pub fn to_24_hour(hour12: u32, meridiem: Meridiem) -> u32 {
    match (meridiem, hour12) {
        (Meridiem::Am, 12) => 0,
        (Meridiem::Pm, 12) => 12,
        (Meridiem::Pm, hour) => hour + 12,
        (Meridiem::Am, hour) => hour,
    }
}

/// Combines a date with a 12-hour time into the task's due instant.
///
/// Expects the hour and minute to be in range; out-of-range values are
/// clamped rather than rejected since [`TaskForm::into_new_task`] already
/// refuses them.
pub fn resolve_due_instant(date: NaiveDate, hour12: u32, minute: u32, meridiem: Meridiem) -> NaiveDateTime {
    let hour = to_24_hour(hour12, meridiem).min(23);
    let time = NaiveTime::from_hms_opt(hour, minute.min(59), 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}

pub fn is_same_calendar_day(instant: NaiveDateTime, now: NaiveDateTime) -> bool {
    (instant.year(), instant.month(), instant.day()) == (now.year(), now.month(), now.day())
}

/// `true` when `instant` lies before `now` at minute resolution.
pub fn is_expired(instant: NaiveDateTime, now: NaiveDateTime) -> bool {
    let due = [
        i64::from(instant.year()),
        i64::from(instant.month()),
        i64::from(instant.day()),
        i64::from(instant.hour()),
        i64::from(instant.minute()),
    ];
    let current = [
        i64::from(now.year()),
        i64::from(now.month()),
        i64::from(now.day()),
        i64::from(now.hour()),
        i64::from(now.minute()),
    ];

    for (d, c) in due.iter().zip(current.iter()) {
        if d != c {
            return d < c;
        }
    }
    false
}

/// Full submit-time validation: shape first, then expiry against `now`.
pub fn validate(form: TaskForm, now: NaiveDateTime) -> Result<NewTask, ValidationError> {
    let task = form.into_new_task()?;
    let due = task.due();
    if is_expired(due, now) {
        return Err(ValidationError::Expired(due));
    }
    Ok(task)
}
