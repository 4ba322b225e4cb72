use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::{PlaybackStatus, Session},
};

/// Starts playback unless the player is already playing
pub struct PlayCommand;

#[async_trait]
impl Command for PlayCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let player = session.player();
        if player.playback_status().await? != PlaybackStatus::Playing {
            player.play().await?;
        }

        Ok(CommandOutput::Notice("Play".to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "play".to_string(),
            description: "Start playback".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote play".to_string()],
        }
    }
}
