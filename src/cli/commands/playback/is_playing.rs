use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::{PlaybackStatus, Session},
};

/// Answers through the exit status whether the player is playing
pub struct IsPlayingCommand;

#[async_trait]
impl Command for IsPlayingCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let status = session.player().playback_status().await?;
        Ok(CommandOutput::Status(status == PlaybackStatus::Playing))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "is_playing".to_string(),
            description: "Exit with status 0 if playing, 1 otherwise".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote is_playing && echo playing".to_string()],
        }
    }
}
