use std::fmt;

use super::coercion::{CoercionError, PropertyValue};

/// Track id a TrackList player reports when nothing is loaded.
pub const NO_TRACK: &str = "/org/mpris/MediaPlayer2/TrackList/NoTrack";

/// Current playback state of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackStatus {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    Stopped,
}

impl PlaybackStatus {
    /// Wire spelling of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "Playing",
            Self::Paused => "Paused",
            Self::Stopped => "Stopped",
        }
    }
}

impl From<&str> for PlaybackStatus {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            _ => Self::Stopped,
        }
    }
}

impl fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Loop mode for track or playlist repetition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopStatus {
    /// No looping
    None,

    /// Loop current track
    Track,

    /// Loop entire playlist
    Playlist,
}

impl LoopStatus {
    /// Wire spelling of the mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Track => "Track",
            Self::Playlist => "Playlist",
        }
    }

    /// Parse a mode name, ignoring case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "none" | "off" => Some(Self::None),
            "track" => Some(Self::Track),
            "playlist" => Some(Self::Playlist),
            _ => None,
        }
    }
}

impl From<&str> for LoopStatus {
    fn from(status: &str) -> Self {
        Self::parse(status).unwrap_or(Self::None)
    }
}

impl fmt::Display for LoopStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort orders accepted by `GetPlaylists`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistOrdering {
    /// Alphabetical by name
    Alphabetical,

    /// By creation date, oldest first
    CreationDate,

    /// By modification date, oldest first
    ModifiedDate,

    /// By last play date, oldest first
    LastPlayDate,

    /// Player-defined order
    UserDefined,
}

impl PlaylistOrdering {
    /// Wire spelling of the ordering.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Alphabetical => "Alphabetical",
            Self::CreationDate => "Created",
            Self::ModifiedDate => "Modified",
            Self::LastPlayDate => "Played",
            Self::UserDefined => "User",
        }
    }
}

/// A playlist as returned by the Playlists interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playlist {
    /// Object path identifying the playlist
    pub id: String,

    /// Display name
    pub name: String,

    /// Icon URI, empty when the player has none
    pub icon: String,
}

impl TryFrom<&PropertyValue> for Playlist {
    type Error = CoercionError;

    fn try_from(value: &PropertyValue) -> Result<Self, Self::Error> {
        match value {
            PropertyValue::Struct(fields) if fields.len() == 3 => Ok(Self {
                id: String::try_from(&fields[0])?,
                name: String::try_from(&fields[1])?,
                icon: String::try_from(&fields[2])?,
            }),
            other => Err(CoercionError::Mismatch {
                expected: "playlist structure",
                found: other.kind(),
            }),
        }
    }
}

/// Decode the `(b(oss))` shape of `ActivePlaylist`.
///
/// # Errors
///
/// Returns `CoercionError::Mismatch` if the value has another shape.
pub fn active_playlist(value: &PropertyValue) -> Result<Option<Playlist>, CoercionError> {
    match value {
        PropertyValue::Struct(fields) if fields.len() == 2 => {
            if bool::try_from(&fields[0])? {
                Playlist::try_from(&fields[1]).map(Some)
            } else {
                Ok(None)
            }
        }
        other => Err(CoercionError::Mismatch {
            expected: "optional playlist",
            found: other.kind(),
        }),
    }
}
