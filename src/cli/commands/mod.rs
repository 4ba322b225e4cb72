/// Transport control and position
pub mod playback;
/// Player-wide state: what is playing, raising and quitting
pub mod player;
/// Playlist browsing and activation
pub mod playlists;
/// Volume, loop, shuffle and rate
pub mod settings;
/// Track list browsing
pub mod tracklist;

mod utils;
