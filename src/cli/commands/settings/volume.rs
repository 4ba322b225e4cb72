use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        CliError, Command, CommandResult,
        commands::utils::parse_level,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Shows or sets the player volume
pub struct VolumeCommand;

#[async_trait]
impl Command for VolumeCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let player = session.player();

        let Some(level) = args.first() else {
            let volume = player.volume().await?;
            return Ok(CommandOutput::Report(format!("{:.0}%", volume * 100.0)));
        };

        let volume = parse_level("level", level)?;
        if volume < 0.0 {
            return Err(CliError::invalid("level", "Volume cannot be negative"));
        }
        player.set_volume(volume).await?;

        Ok(CommandOutput::Notice(format!("Volume {:.0}%", volume * 100.0)))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "volume".to_string(),
            description: "Show or set the volume".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "level".to_string(),
                description: "New volume as a fraction (0.5) or percentage (50%)".to_string(),
                required: false,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "mpris-remote volume".to_string(),
                "mpris-remote volume 75%".to_string(),
            ],
        }
    }
}
