use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Asks the player to exit
pub struct QuitCommand;

#[async_trait]
impl Command for QuitCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let root = session.root();
        if !root.can_quit().await? {
            return Ok(CommandOutput::Report(format!(
                "{} cannot be asked to quit",
                session.identity()
            )));
        }

        root.quit().await?;
        Ok(CommandOutput::Notice("Quit".to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "quit".to_string(),
            description: "Ask the player to exit".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote quit".to_string()],
        }
    }
}
