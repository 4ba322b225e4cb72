use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Starts playing one of the player's playlists
pub struct ActivatePlaylistCommand;

#[async_trait]
impl Command for ActivatePlaylistCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        session.playlists()?.activate_playlist(&args[0]).await?;
        Ok(CommandOutput::Notice(format!("Playlist {}", args[0])))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "activate_playlist".to_string(),
            description: "Start playing a playlist".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "playlist-id".to_string(),
                description: "Playlist id as printed by 'playlists'".to_string(),
                required: true,
                value_type: ArgType::Path,
            }],
            examples: vec![
                "mpris-remote activate_playlist /org/mpris/MediaPlayer2/Playlist/1".to_string(),
            ],
        }
    }
}
