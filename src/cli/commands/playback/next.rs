use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Skips to the next track
pub struct NextCommand;

#[async_trait]
impl Command for NextCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        session.player().next().await?;
        Ok(CommandOutput::Notice("Next song".to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "next".to_string(),
            description: "Skip to the next track".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote next".to_string()],
        }
    }
}
