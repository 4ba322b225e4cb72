use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Goes back to the previous track
pub struct PreviousCommand;

#[async_trait]
impl Command for PreviousCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        session.player().previous().await?;
        Ok(CommandOutput::Notice("Previous song".to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "previous".to_string(),
            description: "Go back to the previous track".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote previous".to_string()],
        }
    }
}
