use std::collections::HashMap;

use super::{
    CliError, Command, CommandResult, commands,
    types::CommandMetadata,
};
use crate::services::mpris::Session;

/// Registry of actions by name.
///
/// Names are matched case-insensitively, as typed on the command line.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Box<dyn Command>>,
}

impl CommandRegistry {
    /// Creates a new empty command registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a command under the name in its metadata, replacing any
    /// command already registered with that name.
    pub fn register_command(&mut self, command: Box<dyn Command>) {
        self.commands
            .insert(command.metadata().name.to_lowercase(), command);
    }

    /// Look up an action and check its argument count.
    ///
    /// Done before binding a player so typos fail without bus traffic.
    ///
    /// # Errors
    ///
    /// Returns `CliError::CommandNotFound` for an unknown action and
    /// `CliError::InvalidArguments` for a wrong argument count.
    pub fn resolve(&self, command_name: &str, args: &[String]) -> Result<&dyn Command, CliError> {
        let command = self
            .commands
            .get(&command_name.to_lowercase())
            .ok_or_else(|| CliError::CommandNotFound(command_name.to_string()))?;

        Self::validate_args(&command.metadata(), args)?;
        Ok(command.as_ref())
    }

    /// Executes an action against `session`.
    ///
    /// # Errors
    ///
    /// As [`resolve`](Self::resolve), plus whatever the command returns.
    pub async fn execute(
        &self,
        session: &Session,
        command_name: &str,
        args: &[String],
    ) -> CommandResult {
        self.resolve(command_name, args)?
            .execute(session, args)
            .await
    }

    /// Metadata of every registered command, sorted by category then name.
    pub fn list_commands(&self) -> Vec<CommandMetadata> {
        let mut commands: Vec<CommandMetadata> =
            self.commands.values().map(|c| c.metadata()).collect();
        commands.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));
        commands
    }

    fn validate_args(metadata: &CommandMetadata, args: &[String]) -> Result<(), CliError> {
        let required_count = metadata.args.iter().filter(|arg| arg.required).count();
        let total_count = metadata.args.len();

        if args.len() < required_count {
            return Err(CliError::InvalidArguments(format!(
                "'{}' expects at least {} arguments, got {}",
                metadata.name,
                required_count,
                args.len(),
            )));
        }

        if args.len() > total_count {
            return Err(CliError::InvalidArguments(format!(
                "'{}' expects at most {} arguments, got {}",
                metadata.name,
                total_count,
                args.len(),
            )));
        }

        Ok(())
    }

    /// Registers every built-in action.
    pub fn register_all_commands(&mut self) {
        commands::playback::register_commands(self);
        commands::settings::register_commands(self);
        commands::player::register_commands(self);
        commands::tracklist::register_commands(self);
        commands::playlists::register_commands(self);
    }
}
