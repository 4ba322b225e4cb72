use crate::services::mpris::{MprisError, PropertyValue, RemoteObjectBinding};

/// The root `org.mpris.MediaPlayer2` interface.
#[derive(Debug, Clone)]
pub struct RootBinding {
    binding: RemoteObjectBinding,
}

impl RootBinding {
    /// Wrap a binding addressed to the root interface.
    pub fn new(binding: RemoteObjectBinding) -> Self {
        Self { binding }
    }

    /// The generic binding underneath.
    pub fn binding(&self) -> &RemoteObjectBinding {
        &self.binding
    }

    /// Bring the player's window to the front.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player refuses
    pub async fn raise(&self) -> Result<(), MprisError> {
        self.binding.invoke("Raise", Vec::new()).await.map(drop)
    }

    /// Ask the player to exit.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player refuses
    pub async fn quit(&self) -> Result<(), MprisError> {
        self.binding.invoke("Quit", Vec::new()).await.map(drop)
    }

    /// Whether `Quit` has any effect.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_quit(&self) -> Result<bool, MprisError> {
        self.binding.get("CanQuit").await
    }

    /// Whether `Raise` has any effect.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_raise(&self) -> Result<bool, MprisError> {
        self.binding.get("CanRaise").await
    }

    /// Whether the player is fullscreen.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn fullscreen(&self) -> Result<bool, MprisError> {
        self.binding.get("Fullscreen").await
    }

    /// Request fullscreen on or off.
    ///
    /// # Errors
    /// Returns error if the transport reports a fault
    pub async fn set_fullscreen(&self, fullscreen: bool) -> Result<(), MprisError> {
        self.binding
            .set_property("Fullscreen", PropertyValue::Bool(fullscreen))
            .await
    }

    /// Whether `Fullscreen` may be written.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_set_fullscreen(&self) -> Result<bool, MprisError> {
        self.binding.get("CanSetFullscreen").await
    }

    /// Whether the player implements the TrackList interface.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn has_track_list(&self) -> Result<bool, MprisError> {
        self.binding.get("HasTrackList").await
    }

    /// Human-readable player name.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn identity(&self) -> Result<String, MprisError> {
        self.binding.get("Identity").await
    }

    /// Basename of the player's desktop file.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn desktop_entry(&self) -> Result<String, MprisError> {
        self.binding.get("DesktopEntry").await
    }

    /// URI schemes `OpenUri` accepts.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn supported_uri_schemes(&self) -> Result<Vec<String>, MprisError> {
        self.binding.get("SupportedUriSchemes").await
    }

    /// MIME types `OpenUri` accepts.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn supported_mime_types(&self) -> Result<Vec<String>, MprisError> {
        self.binding.get("SupportedMimeTypes").await
    }
}
