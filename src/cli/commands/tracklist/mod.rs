/// Track list commands, for players that expose one
mod goto;
mod tracks;

pub use goto::GotoCommand;
pub use tracks::TracksCommand;

use crate::cli::CommandRegistry;

pub(crate) const CATEGORY_NAME: &str = "tracklist";

/// Registers the track list commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(TracksCommand));
    registry.register_command(Box::new(GotoCommand));
}
