use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::{LoopStatus, Session},
};

/// Shows the loop mode, or sets it
///
/// Without an argument the mode cycles None, Track, Playlist.
pub struct LoopCommand;

impl LoopCommand {
    fn next_mode(current: LoopStatus) -> LoopStatus {
        match current {
            LoopStatus::None => LoopStatus::Track,
            LoopStatus::Track => LoopStatus::Playlist,
            LoopStatus::Playlist => LoopStatus::None,
        }
    }
}

#[async_trait]
impl Command for LoopCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let player = session.player();

        let mode = match args.first() {
            Some(mode) => LoopStatus::parse(mode)
                .ok_or_else(|| CliError::invalid("mode", "Expected none, track or playlist"))?,
            None => Self::next_mode(player.loop_status().await?),
        };
        player.set_loop_status(mode).await?;

        Ok(CommandOutput::Notice(format!("Loop {mode}")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "loop".to_string(),
            description: "Set the loop mode, or cycle through modes".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "mode".to_string(),
                description: "none, track or playlist".to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec![
                "mpris-remote loop".to_string(),
                "mpris-remote loop playlist".to_string(),
            ],
        }
    }
}
