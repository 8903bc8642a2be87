use super::{close_session, open_session};
use crate::{
    libs::{messages::Message, view::View},
    msg_bail_anyhow, msg_info, msg_success,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm};

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Id shown in the task list
    id: i64,
    /// Skip the confirmation prompt
    #[arg(short, long)]
    yes: bool,
}

pub async fn cmd(args: DeleteArgs) -> Result<()> {
    let session = open_session()?.passive();

    let task = match session.tasks().get(args.id).await? {
        Some(task) => task,
        None => {
            close_session(&session)?;
            msg_bail_anyhow!(Message::TaskNotFound(args.id));
        }
    };

    let confirmed = args.yes
        || Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptConfirmDelete(task.title.clone()).to_string())
            .default(false)
            .interact()?;

    if confirmed {
        let tasks = session.delete(task.id).await?;
        msg_success!(Message::TaskDeleted(task.id));
        View::tasks(&tasks)?;
    } else {
        msg_info!(Message::OperationCancelled);
    }

    close_session(&session)
}
