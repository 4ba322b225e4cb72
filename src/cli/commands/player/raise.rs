use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Brings the player's window to the front
pub struct RaiseCommand;

#[async_trait]
impl Command for RaiseCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let root = session.root();
        if !root.can_raise().await? {
            return Ok(CommandOutput::Report(format!(
                "{} cannot be raised",
                session.identity()
            )));
        }

        root.raise().await?;
        Ok(CommandOutput::Nothing)
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "raise".to_string(),
            description: "Bring the player window to the front".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote raise".to_string()],
        }
    }
}
