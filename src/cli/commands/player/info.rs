use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::describe_track,
        formatting::format_header,
        types::{CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Summarizes the player: status, track, settings and optional interfaces
pub struct InfoCommand;

#[async_trait]
impl Command for InfoCommand {
    async fn execute(&self, session: &Session, _args: &[String]) -> CommandResult {
        let player = session.player();
        let record = session.metadata().snapshot();
        let yes_no = |flag: bool| if flag { "yes" } else { "no" };

        let mut lines = vec![
            format_header(&format!("{} ({})", session.identity(), session.player_id())),
            format!("  Status:     {}", player.playback_status().await?),
            format!("  Track:      {}", describe_track(&record)?),
            format!("  Volume:     {:.0}%", player.volume().await? * 100.0),
            format!("  Loop:       {}", player.loop_status().await?),
            format!("  Shuffle:    {}", yes_no(player.shuffle().await?)),
            format!("  Rate:       {}", player.rate().await?),
            format!("  Track list: {}", yes_no(session.has_track_list())),
            format!("  Playlists:  {}", yes_no(session.has_playlists())),
        ];

        if session.has_playlists() {
            let playlists = session.playlists()?;
            lines.push(format!(
                "  Playlist count: {}",
                playlists.playlist_count().await?
            ));
        }

        Ok(CommandOutput::Report(lines.join("\n")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "info".to_string(),
            description: "Show player status and capabilities".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![],
            examples: vec!["mpris-remote info".to_string()],
        }
    }
}
