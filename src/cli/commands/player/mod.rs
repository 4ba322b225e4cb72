/// Player-wide commands
mod get_current_track;
mod info;
mod quit;
mod raise;
mod watch;

pub use get_current_track::GetCurrentTrackCommand;
pub use info::InfoCommand;
pub use quit::QuitCommand;
pub use raise::RaiseCommand;
pub use watch::WatchCommand;

use crate::cli::CommandRegistry;

pub(crate) const CATEGORY_NAME: &str = "player";

/// Registers the player-wide commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(GetCurrentTrackCommand));
    registry.register_command(Box::new(InfoCommand));
    registry.register_command(Box::new(RaiseCommand));
    registry.register_command(Box::new(QuitCommand));
    registry.register_command(Box::new(WatchCommand));
}
