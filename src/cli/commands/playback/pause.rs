use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::{PlaybackStatus, Session},
};

/// Pauses playback if the player is playing
pub struct PauseCommand;

#[async_trait]
impl Command for PauseCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let player = session.player();
        if player.playback_status().await? == PlaybackStatus::Playing {
            player.pause().await?;
        }

        Ok(CommandOutput::Notice("Pause".to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "pause".to_string(),
            description: "Pause playback".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote pause".to_string()],
        }
    }
}
