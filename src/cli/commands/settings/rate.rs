use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::Session,
};

/// Shows or sets the playback rate
///
/// The value is passed through unchecked; players clamp or reject rates
/// outside their own range.
pub struct RateCommand;

#[async_trait]
impl Command for RateCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let player = session.player();

        let Some(rate) = args.first() else {
            return Ok(CommandOutput::Report(format!("{}", player.rate().await?)));
        };

        let rate = rate
            .parse::<f64>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| CliError::invalid("rate", format!("'{rate}' is not a number")))?;
        player.set_rate(rate).await?;

        Ok(CommandOutput::Notice(format!("Rate {rate}")))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "rate".to_string(),
            description: "Show or set the playback rate".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "rate".to_string(),
                description: "New rate, 1.0 is normal speed".to_string(),
                required: false,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "mpris-remote rate".to_string(),
                "mpris-remote rate 1.5".to_string(),
            ],
        }
    }
}
