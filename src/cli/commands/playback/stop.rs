use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::{PlaybackStatus, Session},
};

/// Stops playback unless already stopped
pub struct StopCommand;

#[async_trait]
impl Command for StopCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let player = session.player();
        if player.playback_status().await? != PlaybackStatus::Stopped {
            player.stop().await?;
        }

        Ok(CommandOutput::Notice("Stop".to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "stop".to_string(),
            description: "Stop playback".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote stop".to_string()],
        }
    }
}
