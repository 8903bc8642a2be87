//! Task records and the form they are created from.
//!
//! A [`TaskForm`] carries the raw picker values a user enters, a [`NewTask`]
//! is a checked but unsaved task, and a [`Task`] is what the store hands back
//! with its assigned id.

use super::error::ValidationError;
use super::expiry;
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;
use std::str::FromStr;

/// English month names accepted by the month picker, in calendar order.
pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }
}

impl fmt::Display for Meridiem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Meridiem {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AM" => Ok(Meridiem::Am),
            "PM" => Ok(Meridiem::Pm),
            _ => Err(ValidationError::UnknownMeridiem(s.to_string())),
        }
    }
}

/// Time of day as entered: a 12-hour clock value plus AM/PM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTime {
    pub hour: u32,
    pub minute: u32,
    pub meridiem: Meridiem,
}

impl TaskTime {
    pub fn new(hour: u32, minute: u32, meridiem: Meridiem) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&hour) {
            return Err(ValidationError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ValidationError::MinuteOutOfRange(minute));
        }
        Ok(Self { hour, minute, meridiem })
    }

    /// Hour on the 24-hour clock.
    pub fn hour_24(&self) -> u32 {
        expiry::to_24_hour(self.hour, self.meridiem)
    }
}

impl fmt::Display for TaskTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02} {}", self.hour, self.minute, self.meridiem)
    }
}

/// A validated task that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub date: NaiveDate,
    pub time: TaskTime,
}

impl NewTask {
    pub fn due(&self) -> NaiveDateTime {
        expiry::resolve_due_instant(self.date, self.time.hour, self.time.minute, self.time.meridiem)
    }
}

/// A stored task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub date: NaiveDate,
    pub time: TaskTime,
    /// Claim flag: set once a reminder has been armed for this task.
    pub notified: bool,
}

impl Task {
    pub fn from_new(id: i64, new_task: NewTask) -> Self {
        Task {
            id,
            title: new_task.title,
            date: new_task.date,
            time: new_task.time,
            notified: false,
        }
    }

    pub fn due(&self) -> NaiveDateTime {
        expiry::resolve_due_instant(self.date, self.time.hour, self.time.minute, self.time.meridiem)
    }
}

/// Raw values from the task form's discrete inputs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    pub title: String,
    pub hour: u32,
    pub minute: u32,
    pub day: u32,
    /// Month name (`"March"`) or number (`"3"`, `"03"`).
    pub month: String,
    pub year: i32,
    pub meridiem: String,
}

impl TaskForm {
    /// Checks the shape of the form. Whether the due time has passed is
    /// decided separately by [`expiry::validate`].
    pub fn into_new_task(self) -> Result<NewTask, ValidationError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }

        let meridiem: Meridiem = self.meridiem.parse()?;
        let time = TaskTime::new(self.hour, self.minute, meridiem)?;
        let month = parse_month(&self.month)?;
        let date = NaiveDate::from_ymd_opt(self.year, month, self.day).ok_or(ValidationError::InvalidDate {
            year: self.year,
            month,
            day: self.day,
        })?;

        Ok(NewTask { title, date, time })
    }
}

/// Parses a month picker value into 1-12.
pub fn parse_month(value: &str) -> Result<u32, ValidationError> {
    let value = value.trim();
    if let Ok(number) = value.parse::<u32>() {
        if (1..=12).contains(&number) {
            return Ok(number);
        }
        return Err(ValidationError::UnknownMonth(value.to_string()));
    }

    MONTH_NAMES
        .iter()
        .position(|name| name.eq_ignore_ascii_case(value))
        .map(|index| index as u32 + 1)
        .ok_or_else(|| ValidationError::UnknownMonth(value.to_string()))
}
