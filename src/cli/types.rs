use async_trait::async_trait;
use thiserror::Error;

use crate::services::mpris::{MprisError, Session};

/// Errors that can occur during CLI command execution.
#[derive(Error, Debug)]
pub enum CliError {
    /// The action name is not in the registry.
    #[error("unknown command: {0}")]
    CommandNotFound(String),

    /// Wrong number of arguments for the action.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// An argument could not be parsed or is out of range.
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// Name of the offending argument
        arg: String,
        /// Why it was rejected
        reason: String,
    },

    /// The player or the bus reported a failure.
    #[error(transparent)]
    Player(#[from] MprisError),
}

impl CliError {
    pub(crate) fn invalid(arg: &str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg: arg.to_string(),
            reason: reason.into(),
        }
    }
}

/// What an action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// A short message, printed and shown as a desktop notification
    Notice(String),

    /// Text for the terminal only
    Report(String),

    /// No output; the process exit status carries the answer
    Status(bool),

    /// Nothing to say
    Nothing,
}

/// Type alias for command execution results.
pub type CommandResult = Result<CommandOutput, CliError>;

/// Specification for a single command argument.
#[derive(Debug, Clone)]
pub struct CommandArg {
    /// The name of the argument (e.g., "position", "uri").
    pub name: String,

    /// Human-readable description of what this argument does.
    pub description: String,

    /// Whether this argument is required for command execution.
    pub required: bool,

    /// The expected type of this argument for help display.
    pub value_type: ArgType,
}

/// Type classification for command arguments.
#[derive(Debug, Clone)]
pub enum ArgType {
    /// A general string value.
    String,

    /// A numeric value (integer or float).
    Number,

    /// A boolean-like switch (on/off/toggle).
    Boolean,

    /// A URI or object path.
    Path,
}

impl std::fmt::Display for ArgType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::String => "text",
            Self::Number => "number",
            Self::Boolean => "on|off|toggle",
            Self::Path => "path",
        };
        f.write_str(label)
    }
}

/// Complete metadata for a CLI command.
///
/// Used for usage text and argument count validation.
#[derive(Debug, Clone)]
pub struct CommandMetadata {
    /// The action name as typed on the command line.
    pub name: String,

    /// Brief description of what this command does.
    pub description: String,

    /// Specification of all arguments this command accepts.
    pub args: Vec<CommandArg>,

    /// Example usage strings to show in help text.
    pub examples: Vec<String>,

    /// Group the command is listed under in usage text.
    pub category: String,
}

/// Trait defining the interface for all actions.
#[async_trait]
pub trait Command: Send + Sync {
    /// Run the action against a bound player.
    ///
    /// The registry has already checked the argument count against
    /// [`metadata`](Self::metadata).
    ///
    /// # Errors
    ///
    /// Returns `CliError` for invalid argument values or player failures.
    async fn execute(&self, session: &Session, args: &[String]) -> CommandResult;

    /// Returns the complete metadata for this command.
    fn metadata(&self) -> CommandMetadata;
}
