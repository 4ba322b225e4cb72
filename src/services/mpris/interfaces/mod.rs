//! Typed bindings over [`RemoteObjectBinding`], one per MPRIS interface.
//!
//! Each binding names the interface's methods and properties and shapes
//! method arguments into the exact wire types the protocol declares.

/// `org.mpris.MediaPlayer2.Player`
pub mod player;
/// `org.mpris.MediaPlayer2.Playlists`
pub mod playlists;
/// `org.mpris.MediaPlayer2`
pub mod root;
/// `org.mpris.MediaPlayer2.TrackList`
pub mod tracklist;

pub use player::PlayerBinding;
pub use playlists::PlaylistsBinding;
pub use root::RootBinding;
pub use tracklist::TrackListBinding;

use zbus::zvariant::{ObjectPath, OwnedValue, Value};

use super::{CoercionError, MprisError};

pub(crate) fn arg<'a>(value: impl Into<Value<'a>>) -> Result<OwnedValue, MprisError> {
    value
        .into()
        .try_to_owned()
        .map_err(|e| CoercionError::Unsupported(e.to_string()).into())
}

pub(crate) fn object_path(path: &str) -> Result<ObjectPath<'_>, MprisError> {
    ObjectPath::try_from(path)
        .map_err(|_| CoercionError::InvalidObjectPath(path.to_string()).into())
}

pub(crate) fn path_arg(path: &str) -> Result<OwnedValue, MprisError> {
    arg(object_path(path)?)
}
