use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::parse_position,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::{
        Session,
        utils::{format_duration, from_mpris_micros, to_mpris_micros},
    },
};

/// Shows the playhead position, or moves it to an absolute position
pub struct PositionCommand;

#[async_trait]
impl Command for PositionCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let player = session.player();
        let current = from_mpris_micros(player.position().await?);
        let record = player.metadata().await?;
        let length = record.length()?;

        let Some(position_str) = args.first() else {
            let shown = match length {
                Some(length) => {
                    format!("{} / {}", format_duration(current), format_duration(length))
                }
                None => format_duration(current),
            };
            return Ok(CommandOutput::Report(shown));
        };

        let target = parse_position(position_str, Some(current), length)?;
        if let Some(length) = length
            && target > length
        {
            return Err(CliError::invalid(
                "position",
                format!(
                    "Position {} exceeds track length {}",
                    format_duration(target),
                    format_duration(length)
                ),
            ));
        }

        player
            .set_position(&record.track_id()?, to_mpris_micros(target))
            .await?;

        Ok(CommandOutput::Notice(format!(
            "Position {}",
            format_duration(target)
        )))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "position".to_string(),
            description: "Show or set the position in the current track".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "position".to_string(),
                description: "Target position: seconds (30), time (1:30), percentage (50%) \
                              or relative (+10, -10)"
                    .to_string(),
                required: false,
                value_type: ArgType::String,
            }],
            examples: vec![
                "mpris-remote position".to_string(),
                "mpris-remote position 1:30".to_string(),
                "mpris-remote position 50%".to_string(),
            ],
        }
    }
}
