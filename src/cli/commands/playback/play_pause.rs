use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Toggles between playing and paused, reporting the resulting status
pub struct PlayPauseCommand;

#[async_trait]
impl Command for PlayPauseCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let player = session.player();
        player.play_pause().await?;
        let status = player.playback_status().await?;

        Ok(CommandOutput::Notice(status.to_string()))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "play_pause".to_string(),
            description: "Toggle between play and pause".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote play_pause".to_string()],
        }
    }
}
