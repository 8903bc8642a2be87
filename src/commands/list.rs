use super::{close_session, open_session};
use crate::{
    libs::{messages::Message, view::View},
    msg_print,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Also show what the store did while loading
    #[arg(short, long)]
    logs: bool,
}

pub async fn cmd(args: ListArgs) -> Result<()> {
    let session = open_session()?.passive();
    let tasks = session.build_list().await?;

    if !tasks.is_empty() {
        msg_print!(Message::TasksHeader, true);
    }
    View::tasks(&tasks)?;

    if args.logs {
        msg_print!(Message::ActivityLogHeader, true);
        View::logs(&session.log().events())?;
    }

    close_session(&session)
}
