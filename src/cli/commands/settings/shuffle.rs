use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        Command, CommandResult,
        commands::utils::parse_switch,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Turns shuffle on or off, toggling by default
pub struct ShuffleCommand;

#[async_trait]
impl Command for ShuffleCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let player = session.player();
        let current = player.shuffle().await?;

        let shuffle = match args.first() {
            Some(value) => parse_switch("state", value, current)?,
            None => !current,
        };
        player.set_shuffle(shuffle).await?;

        let state = if shuffle { "on" } else { "off" };
        Ok(CommandOutput::Notice(format!("Shuffle {state}")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "shuffle".to_string(),
            description: "Turn shuffle on, off, or toggle it".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "state".to_string(),
                description: "on, off or toggle (default)".to_string(),
                required: false,
                value_type: ArgType::Boolean,
            }],
            examples: vec![
                "mpris-remote shuffle".to_string(),
                "mpris-remote shuffle on".to_string(),
            ],
        }
    }
}
