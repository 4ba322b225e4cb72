use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Asks the player to open and play a URI
pub struct OpenCommand;

#[async_trait]
impl Command for OpenCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        session.player().open_uri(&args[0]).await?;
        Ok(CommandOutput::Notice(format!("Open {}", args[0])))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "open".to_string(),
            description: "Open a URI in the player".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "uri".to_string(),
                description: "Location of the media, e.g. file:///music/song.ogg".to_string(),
                required: true,
                value_type: ArgType::Path,
            }],
            examples: vec!["mpris-remote open file:///music/song.ogg".to_string()],
        }
    }
}
