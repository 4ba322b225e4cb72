use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::describe_track,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Lists the tracks in the player's current track list
pub struct TracksCommand;

#[async_trait]
impl Command for TracksCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let track_list = session.track_list()?;
        let ids = track_list.tracks().await?;
        if ids.is_empty() {
            return Ok(CommandOutput::Report("The track list is empty".to_string()));
        }

        let records = track_list.get_tracks_metadata(&ids).await?;
        let current = session.metadata().track_id().ok();

        let mut lines = Vec::with_capacity(records.len());
        for record in &records {
            let id = record.track_id()?;
            let marker = if current.as_deref() == Some(id.as_str()) { "*" } else { " " };
            lines.push(format!("{marker} {id} : {}", describe_track(record)?));
        }

        Ok(CommandOutput::Report(lines.join("\n")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "tracks".to_string(),
            description: "List the tracks in the track list".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote tracks".to_string()],
        }
    }
}
