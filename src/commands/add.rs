use super::{close_session, open_session};
use crate::{
    libs::{
        error::{TaskError, ValidationError},
        messages::Message,
        task::{TaskForm, MONTH_NAMES},
        view::View,
    },
    msg_error, msg_success,
};
use anyhow::Result;
use chrono::{Datelike, Local, Timelike};
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};

/// Any value left out is asked for interactively, pre-set to the current
/// date and time.
#[derive(Debug, Args)]
pub struct AddArgs {
    #[arg(short, long)]
    title: Option<String>,
    /// Hour on the 12-hour clock (1-12)
    #[arg(long)]
    hour: Option<u32>,
    #[arg(long)]
    minute: Option<u32>,
    #[arg(long)]
    day: Option<u32>,
    /// Month name or number
    #[arg(long)]
    month: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    /// AM or PM
    #[arg(long)]
    meridiem: Option<String>,
}

pub async fn cmd(args: AddArgs) -> Result<()> {
    let form = prompt_missing(args)?;
    let title = form.title.trim().to_string();

    let session = open_session()?.passive();
    match session.submit(form).await {
        Ok(submission) => {
            msg_success!(Message::TaskAdded(title));
            View::tasks(&submission.tasks)?;
        }
        Err(TaskError::Validation(ValidationError::Expired(_))) => msg_error!(Message::EnterFutureDateTime),
        Err(TaskError::Validation(e)) => msg_error!(Message::InvalidTask(e.to_string())),
        Err(e) => {
            close_session(&session)?;
            return Err(e.into());
        }
    }

    close_session(&session)
}

fn prompt_missing(args: AddArgs) -> Result<TaskForm> {
    let now = Local::now().naive_local();
    let (is_pm, hour12) = now.hour12();

    let title = match args.title {
        Some(title) => title,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskTitle.to_string())
            .validate_with(|title: &String| if title.trim().is_empty() { Err(Message::TitleRequired.to_string()) } else { Ok(()) })
            .interact_text()?,
    };

    let hour = match args.hour {
        Some(hour) => hour,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskHour.to_string())
            .default(hour12)
            .validate_with(|hour: &u32| if (1..=12).contains(hour) { Ok(()) } else { Err(Message::HourRange.to_string()) })
            .interact_text()?,
    };

    let minute = match args.minute {
        Some(minute) => minute,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskMinute.to_string())
            .default(now.minute())
            .validate_with(|minute: &u32| if *minute <= 59 { Ok(()) } else { Err(Message::MinuteRange.to_string()) })
            .interact_text()?,
    };

    let meridiem = match args.meridiem {
        Some(meridiem) => meridiem,
        None => {
            let options = ["AM", "PM"];
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskMeridiem.to_string())
                .items(&options)
                .default(usize::from(is_pm))
                .interact()?;
            options[selection].to_string()
        }
    };

    let day = match args.day {
        Some(day) => day,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskDay.to_string())
            .default(now.day())
            .interact_text()?,
    };

    let month = match args.month {
        Some(month) => month,
        None => {
            let selection = Select::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptTaskMonth.to_string())
                .items(&MONTH_NAMES)
                .default(now.month0() as usize)
                .interact()?;
            MONTH_NAMES[selection].to_string()
        }
    };

    let year = match args.year {
        Some(year) => year,
        None => Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptTaskYear.to_string())
            .default(now.year())
            .interact_text()?,
    };

    Ok(TaskForm {
        title,
        hour,
        minute,
        day,
        month,
        year,
        meridiem,
    })
}
