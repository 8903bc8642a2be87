use super::{close_session, open_session};
use crate::{
    libs::{messages::Message, view::View},
    msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct ClearArgs {
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: ClearArgs) -> Result<()> {
    let session = open_session()?.passive();
    let count = session.tasks().get_all().await?.len();

    if count == 0 {
        View::tasks(&[])?;
        return close_session(&session);
    }

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptConfirmClearAll(count).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        let tasks = session.clear().await?;
        msg_success!(Message::TasksCleared(count));
        View::tasks(&tasks)?;
    } else {
        msg_info!(Message::OperationCancelled);
    }

    close_session(&session)
}
