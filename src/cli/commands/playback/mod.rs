/// Transport control commands
mod is_playing;
mod next;
mod open;
mod pause;
mod play;
mod play_pause;
mod position;
mod previous;
mod seek;
mod stop;

pub use is_playing::IsPlayingCommand;
pub use next::NextCommand;
pub use open::OpenCommand;
pub use pause::PauseCommand;
pub use play::PlayCommand;
pub use play_pause::PlayPauseCommand;
pub use position::PositionCommand;
pub use previous::PreviousCommand;
pub use seek::SeekCommand;
pub use stop::StopCommand;

use crate::cli::CommandRegistry;

pub(crate) const CATEGORY_NAME: &str = "playback";

/// Registers the transport control commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(PlayCommand));
    registry.register_command(Box::new(PauseCommand));
    registry.register_command(Box::new(PlayPauseCommand));
    registry.register_command(Box::new(StopCommand));
    registry.register_command(Box::new(NextCommand));
    registry.register_command(Box::new(PreviousCommand));
    registry.register_command(Box::new(IsPlayingCommand));
    registry.register_command(Box::new(SeekCommand));
    registry.register_command(Box::new(PositionCommand));
    registry.register_command(Box::new(OpenCommand));
}
