use std::fmt;

/// Prefix shared by the well-known bus names of all MPRIS players.
pub const BUS_NAME_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Object path every MPRIS player exports its interfaces on.
pub const OBJECT_PATH: &str = "/org/mpris/MediaPlayer2";

/// Interface carrying the `PropertiesChanged` broadcast.
pub const PROPERTIES_INTERFACE: &str = "org.freedesktop.DBus.Properties";

/// Member name of the property-change broadcast.
pub const PROPERTIES_CHANGED: &str = "PropertiesChanged";

/// The MPRIS interfaces a session can bind to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Interface {
    /// `org.mpris.MediaPlayer2`
    Root,
    /// `org.mpris.MediaPlayer2.Player`
    Player,
    /// `org.mpris.MediaPlayer2.TrackList`
    TrackList,
    /// `org.mpris.MediaPlayer2.Playlists`
    Playlists,
}

impl Interface {
    /// Every interface, root first.
    pub const ALL: [Self; 4] = [Self::Root, Self::Player, Self::TrackList, Self::Playlists];

    /// D-Bus interface name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Root => "org.mpris.MediaPlayer2",
            Self::Player => "org.mpris.MediaPlayer2.Player",
            Self::TrackList => "org.mpris.MediaPlayer2.TrackList",
            Self::Playlists => "org.mpris.MediaPlayer2.Playlists",
        }
    }

    /// Look up an interface by its D-Bus name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|interface| interface.name() == name)
    }
}

impl fmt::Display for Interface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Expand a candidate id (`vlc`) to its bus name; full bus names pass through.
pub fn bus_name_for(player: &str) -> String {
    if player.starts_with(BUS_NAME_PREFIX) {
        player.to_string()
    } else {
        format!("{BUS_NAME_PREFIX}{player}")
    }
}
