use std::time::Duration;

use async_trait::async_trait;

use super::CATEGORY_NAME;
use crate::{
    cli::{
        CliError, Command, CommandResult,
        types::{ArgType, CommandArg, CommandMetadata, CommandOutput},
    },
    services::mpris::{Session, utils::to_mpris_micros},
};

/// Moves the playhead by a number of seconds, forward or back
pub struct SeekCommand;

impl SeekCommand {
    fn parse_offset(offset_str: &str) -> Result<i64, CliError> {
        let seconds = offset_str
            .parse::<f64>()
            .ok()
            .filter(|s| s.is_finite())
            .ok_or_else(|| CliError::invalid("offset", "Expected seconds, e.g. 10 or -10"))?;

        let magnitude = Duration::try_from_secs_f64(seconds.abs())
            .map_err(|_| CliError::invalid("offset", "Offset is too large"))?;
        let micros = to_mpris_micros(magnitude);
        Ok(if seconds < 0.0 { -micros } else { micros })
    }
}

#[async_trait]
impl Command for SeekCommand {
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult {
        let offset = Self::parse_offset(&args[0])?;
        session.player().seek(offset).await?;

        Ok(CommandOutput::Notice(format!("Seek {}s", args[0])))
    }

    fn metadata(&self) -> CommandMetadata {
        CommandMetadata {
            name: "seek".to_string(),
            description: "Move the playhead by an offset in seconds".to_string(),
            category: CATEGORY_NAME.to_string(),
            args: vec![CommandArg {
                name: "offset".to_string(),
                description: "Seconds to move, negative to go back".to_string(),
                required: true,
                value_type: ArgType::Number,
            }],
            examples: vec![
                "mpris-remote seek 30".to_string(),
                "mpris-remote seek -10".to_string(),
            ],
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn offsets_are_signed_microseconds() {
        assert_eq!(SeekCommand::parse_offset("10").unwrap(), 10_000_000);
        assert_eq!(SeekCommand::parse_offset("-2.5").unwrap(), -2_500_000);
        assert!(SeekCommand::parse_offset("inf").is_err());
        assert!(SeekCommand::parse_offset("ten").is_err());
        assert!(SeekCommand::parse_offset("1e30").is_err());
        assert!(SeekCommand::parse_offset("-1e30").is_err());
    }
}
