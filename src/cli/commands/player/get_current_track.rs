use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        formatting::format_track,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Prints title, album and artist of the cached track
pub struct GetCurrentTrackCommand;

#[async_trait]
impl Command for GetCurrentTrackCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let record = session.metadata().snapshot();
        if record.is_empty() {
            return Ok(CommandOutput::Report(format_track(None, None, &[])));
        }

        Ok(CommandOutput::Report(format_track(
            record.title()?.as_deref(),
            record.album()?.as_deref(),
            &record.artist()?.unwrap_or_default(),
        )))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "get_current_track".to_string(),
            description: "Print the track being played".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote get_current_track".to_string()],
        }
    }
}
