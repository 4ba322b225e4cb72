/// Playback settings commands
mod loop_mode;
mod rate;
mod shuffle;
mod volume;

pub use loop_mode::LoopCommand;
pub use rate::RateCommand;
pub use shuffle::ShuffleCommand;
pub use volume::VolumeCommand;

use crate::cli::CommandRegistry;

pub(crate) const CATEGORY_NAME: &str = "settings";

/// Registers the playback settings commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(VolumeCommand));
    registry.register_command(Box::new(LoopCommand));
    registry.register_command(Box::new(ShuffleCommand));
    registry.register_command(Box::new(RateCommand));
}
