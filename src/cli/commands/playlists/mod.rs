/// Playlist commands, for players that expose playlists
mod activate_playlist;
mod list;

pub use activate_playlist::ActivatePlaylistCommand;
pub use list::PlaylistsCommand;

use crate::cli::CommandRegistry;

pub(crate) const CATEGORY_NAME: &str = "playlists";

/// Registers the playlist commands with the command registry
pub fn register_commands(registry: &mut CommandRegistry) {
    registry.register_command(Box::new(PlaylistsCommand));
    registry.register_command(Box::new(ActivatePlaylistCommand));
}
