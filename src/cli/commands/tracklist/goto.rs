use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Jumps to a track in the track list
pub struct GotoCommand;

#[async_trait]
impl Command for GotoCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        session.track_list()?.go_to(&args[0]).await?;
        Ok(CommandOutput::Notice(format!("Go to {}", args[0])))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "goto".to_string(),
            description: "Jump to a track in the track list".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "track-id".to_string(),
                description: "Track id as printed by 'tracks'".to_string(),
                required: true,
                value_type: ArgType::Path,
            }],
            examples: vec![
                "mpris-remote goto /org/mpris/MediaPlayer2/Track/3".to_string(),
            ],
        }
    }
}
