//! Command-line actions against a bound media player.
//!
//! Each action is a [`Command`] looked up by name in the
//! [`CommandRegistry`]. Actions are grouped by category and usage text is
//! generated from their metadata.

mod commands;
pub mod formatting;
mod registry;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use registry::CommandRegistry;
pub use service::CliService;
pub use types::{
    ArgType, CliError, Command, CommandArg, CommandMetadata, CommandOutput, CommandResult,
};
