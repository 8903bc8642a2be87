use super::activity::{LogEvent, LogKind};
use super::messages::Message;
use super::task::Task;
use crate::msg_info;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use prettytable::{row, Table};

/// Weekday abbreviations, Sunday first.
pub const DAYS_OF_THE_WEEK: [&str; 7] = ["Sun", "Mon", "Tues", "Wed", "Thur", "Fri", "Sat"];

/// `"Tues 3/14/2026"`
pub fn format_task_date(date: NaiveDate) -> String {
    let weekday = DAYS_OF_THE_WEEK[date.weekday().num_days_from_sunday() as usize];
    format!("{} {}/{}/{}", weekday, date.month(), date.day(), date.year())
}

pub struct View {}

impl View {
    /// Prints the task list, or the empty state when there is nothing to show.
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        if tasks.is_empty() {
            msg_info!(Message::NoTasks);
            return Ok(());
        }

        let mut table = Table::new();

        table.add_row(row!["ID", "TASK", "TIME", "DATE", "REMINDER"]);
        for task in tasks {
            let reminder = if task.notified { "🔔" } else { "" };
            table.add_row(row![task.id, task.title, task.time, format_task_date(task.date), reminder]);
        }
        table.printstd();

        Ok(())
    }

    pub fn logs(events: &[LogEvent]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["TIME", "", "MESSAGE"]);
        for event in events {
            let marker = match event.kind {
                LogKind::Info => "ℹ️",
                LogKind::Error => "❌",
            };
            let at = event.at.format("%H:%M:%S").to_string();
            table.add_row(row![at, marker, event.message]);
        }
        table.printstd();

        Ok(())
    }
}
