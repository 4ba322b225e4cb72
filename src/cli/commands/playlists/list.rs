use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::{PlaylistOrdering, Session},
};

const DEFAULT_PAGE: u32 = 50;

/// Lists the player's playlists, marking the active one
pub struct PlaylistsCommand;

#[async_trait]
impl Command for PlaylistsCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let max_count = match args.first() {
            Some(count) => count
                .parse::<u32>()
                .map_err(|_| CliError::invalid("count", "Expected a positive number"))?,
            None => DEFAULT_PAGE,
        };

        let playlists = session.playlists()?;
        let page = playlists
            .get_playlists(0, max_count, PlaylistOrdering::Alphabetical, false)
            .await?;
        if page.is_empty() {
            return Ok(CommandOutput::Report("No playlists".to_string()));
        }

        let active = playlists.active_playlist().await?.map(|p| p.id);
        let lines: Vec<String> = page
            .iter()
            .map(|playlist| {
                let marker = if active.as_ref() == Some(&playlist.id) { "*" } else { " " };
                format!("{marker} {} : {}", playlist.id, playlist.name)
            })
            .collect();

        Ok(CommandOutput::Report(lines.join("\n")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "playlists".to_string(),
            description: "List playlists in alphabetical order".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "count".to_string(),
                description: "Maximum number of playlists to list (default 50)".to_string(),
                required: false,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "mpris-remote playlists".to_string(),
                "mpris-remote playlists 10".to_string(),
            ],
        }
    }
}
