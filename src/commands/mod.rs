//! Command-line interface.
//!
//! Every subcommand opens the default store, builds a [`Session`] on top of
//! it and closes the store again before returning.

pub mod add;
pub mod clear;
pub mod delete;
pub mod init;
pub mod list;
pub mod watch;

use crate::db::db::Store;
use crate::db::tasks::Tasks;
use crate::libs::activity::ActivityLog;
use crate::libs::clock::SystemClock;
use crate::libs::config::Config;
use crate::libs::notifier::{ConsoleNotifier, NoHaptics};
use crate::libs::messages::Message;
use crate::libs::session::Session;
use crate::msg_error_anyhow;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::sync::Arc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Add a task with a due date and time")]
    Add(add::AddArgs),
    #[command(about = "Show upcoming tasks")]
    List(list::ListArgs),
    #[command(about = "Delete a task", arg_required_else_help = true)]
    Delete(delete::DeleteArgs),
    #[command(about = "Delete every task")]
    Clear(clear::ClearArgs),
    #[command(about = "Keep running and ring reminders when tasks are due")]
    Watch,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Add(args) => add::cmd(args).await,
            Commands::List(args) => list::cmd(args).await,
            Commands::Delete(args) => delete::cmd(args).await,
            Commands::Clear(args) => clear::cmd(args).await,
            Commands::Watch => watch::cmd().await,
        }
    }
}

/// Opens the default store and a session over it with the console emitters.
pub(crate) fn open_session() -> Result<Session> {
    let config = Config::read().map_err(|e| msg_error_anyhow!(Message::ConfigReadFailed(e.to_string())))?;
    let store = Store::open_default()?;
    let tasks = Tasks::new(store, ActivityLog::new());

    Ok(Session::new(
        tasks,
        Arc::new(ConsoleNotifier),
        Arc::new(NoHaptics),
        Arc::new(SystemClock),
        &config,
    ))
}

pub(crate) fn close_session(session: &Session) -> Result<()> {
    session.shutdown();
    session.tasks().store().close()?;
    Ok(())
}
