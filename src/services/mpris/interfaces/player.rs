use tracing::debug;

use super::{arg, path_arg};
use crate::services::mpris::{
    LoopStatus, MetadataRecord, MprisError, PlaybackStatus, PropertyValue, RemoteObjectBinding,
};

/// The `org.mpris.MediaPlayer2.Player` playback interface.
///
/// Positions and offsets are in microseconds, as on the wire.
#[derive(Debug, Clone)]
pub struct PlayerBinding {
    binding: RemoteObjectBinding,
}

impl PlayerBinding {
    /// Wrap a binding addressed to the player interface.
    pub fn new(binding: RemoteObjectBinding) -> Self {
        Self { binding }
    }

    /// The generic binding underneath.
    pub fn binding(&self) -> &RemoteObjectBinding {
        &self.binding
    }

    async fn call0(&self, method: &str) -> Result<(), MprisError> {
        self.binding.invoke(method, Vec::new()).await.map(drop)
    }

    /// Skip to the next track.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn next(&self) -> Result<(), MprisError> {
        self.call0("Next").await
    }

    /// Skip to the previous track.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn previous(&self) -> Result<(), MprisError> {
        self.call0("Previous").await
    }

    /// Pause playback.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn pause(&self) -> Result<(), MprisError> {
        self.call0("Pause").await
    }

    /// Toggle between playing and paused.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn play_pause(&self) -> Result<(), MprisError> {
        self.call0("PlayPause").await
    }

    /// Stop playback.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn stop(&self) -> Result<(), MprisError> {
        self.call0("Stop").await
    }

    /// Start or resume playback.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn play(&self) -> Result<(), MprisError> {
        self.call0("Play").await
    }

    /// Move the playback position by `offset` microseconds.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn seek(&self, offset: i64) -> Result<(), MprisError> {
        debug!(offset, "Seeking");
        self.binding.invoke("Seek", vec![arg(offset)?]).await.map(drop)
    }

    /// Jump to `position` microseconds within `track_id`.
    ///
    /// Players ignore the request when `track_id` is not the current track.
    ///
    /// # Errors
    /// Returns `MprisError::Coercion` for an invalid track path and
    /// `MprisError::Remote` if the player reports a fault
    pub async fn set_position(&self, track_id: &str, position: i64) -> Result<(), MprisError> {
        self.binding
            .invoke("SetPosition", vec![path_arg(track_id)?, arg(position)?])
            .await
            .map(drop)
    }

    /// Open and play a URI.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn open_uri(&self, uri: &str) -> Result<(), MprisError> {
        self.binding.invoke("OpenUri", vec![arg(uri)?]).await.map(drop)
    }

    /// Current playback state.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn playback_status(&self) -> Result<PlaybackStatus, MprisError> {
        let status: String = self.binding.get("PlaybackStatus").await?;
        Ok(PlaybackStatus::from(status.as_str()))
    }

    /// Current loop mode.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn loop_status(&self) -> Result<LoopStatus, MprisError> {
        let status: String = self.binding.get("LoopStatus").await?;
        Ok(LoopStatus::from(status.as_str()))
    }

    /// Request a loop mode.
    ///
    /// # Errors
    /// Returns error if the transport reports a fault
    pub async fn set_loop_status(&self, status: LoopStatus) -> Result<(), MprisError> {
        self.binding
            .set_property("LoopStatus", PropertyValue::from(status.as_str()))
            .await
    }

    /// Current playback rate.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn rate(&self) -> Result<f64, MprisError> {
        self.binding.get("Rate").await
    }

    /// Request a playback rate. Out-of-range values are sent unchanged.
    ///
    /// # Errors
    /// Returns error if the transport reports a fault
    pub async fn set_rate(&self, rate: f64) -> Result<(), MprisError> {
        self.binding.set_property("Rate", PropertyValue::Double(rate)).await
    }

    /// Whether shuffle is on.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn shuffle(&self) -> Result<bool, MprisError> {
        self.binding.get("Shuffle").await
    }

    /// Request shuffle on or off.
    ///
    /// # Errors
    /// Returns error if the transport reports a fault
    pub async fn set_shuffle(&self, shuffle: bool) -> Result<(), MprisError> {
        self.binding
            .set_property("Shuffle", PropertyValue::Bool(shuffle))
            .await
    }

    /// Metadata of the current track, read fresh from the player.
    ///
    /// # Errors
    /// Returns error if the property cannot be read or is not a map
    pub async fn metadata(&self) -> Result<MetadataRecord, MprisError> {
        let value = self.binding.get_property("Metadata").await?;
        MetadataRecord::try_from(value).map_err(|source| MprisError::UnexpectedType {
            key: "Metadata".to_string(),
            source,
        })
    }

    /// Current volume, 1.0 being full.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn volume(&self) -> Result<f64, MprisError> {
        self.binding.get("Volume").await
    }

    /// Request a volume. Negative values are clamped by the player.
    ///
    /// # Errors
    /// Returns error if the transport reports a fault
    pub async fn set_volume(&self, volume: f64) -> Result<(), MprisError> {
        self.binding
            .set_property("Volume", PropertyValue::Double(volume))
            .await
    }

    /// Playback position in microseconds.
    ///
    /// Never broadcast by players; always a fresh read.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn position(&self) -> Result<i64, MprisError> {
        self.binding.get("Position").await
    }

    /// Lowest rate the player accepts.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn minimum_rate(&self) -> Result<f64, MprisError> {
        self.binding.get("MinimumRate").await
    }

    /// Highest rate the player accepts.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn maximum_rate(&self) -> Result<f64, MprisError> {
        self.binding.get("MaximumRate").await
    }

    /// Whether `Next` is expected to do something.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_go_next(&self) -> Result<bool, MprisError> {
        self.binding.get("CanGoNext").await
    }

    /// Whether `Previous` is expected to do something.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_go_previous(&self) -> Result<bool, MprisError> {
        self.binding.get("CanGoPrevious").await
    }

    /// Whether playback can be started.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_play(&self) -> Result<bool, MprisError> {
        self.binding.get("CanPlay").await
    }

    /// Whether playback can be paused.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_pause(&self) -> Result<bool, MprisError> {
        self.binding.get("CanPause").await
    }

    /// Whether `Seek` and `SetPosition` work.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_seek(&self) -> Result<bool, MprisError> {
        self.binding.get("CanSeek").await
    }

    /// Whether the player can be controlled at all.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_control(&self) -> Result<bool, MprisError> {
        self.binding.get("CanControl").await
    }

    /// Call `handler` with the new position whenever the player jumps.
    pub fn on_seeked<F>(&self, handler: F)
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        self.binding.subscribe("Seeked", move |args| {
            if let Some(position) = args.first().and_then(|v| i64::try_from(v).ok()) {
                handler(position);
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::services::mpris::{
        EventSubscriptionBus, Interface, Transport,
        testing::{MockTransport, Op, full_player},
    };

    fn player(transport: &Arc<MockTransport>) -> PlayerBinding {
        let dest = full_player(transport, "vlc", "VLC media player");
        transport.clear_ops();
        PlayerBinding::new(RemoteObjectBinding::new(
            Interface::Player,
            dest,
            Arc::clone(transport) as Arc<dyn Transport>,
            EventSubscriptionBus::new(),
        ))
    }

    #[tokio::test]
    async fn set_position_sends_object_path_and_offset() {
        let transport = MockTransport::new();
        let player = player(&transport);

        player
            .set_position("/org/mpris/MediaPlayer2/Track/1", 30_000_000)
            .await
            .unwrap();

        assert_eq!(
            transport.ops(),
            vec![Op::Call(
                Interface::Player,
                "SetPosition".to_string(),
                vec![
                    PropertyValue::ObjectPath("/org/mpris/MediaPlayer2/Track/1".to_string()),
                    PropertyValue::Int(30_000_000),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn invalid_track_id_is_rejected_before_sending() {
        let transport = MockTransport::new();
        let player = player(&transport);

        let err = player.set_position("track one", 0).await.unwrap_err();

        assert!(matches!(err, MprisError::Coercion(_)));
        assert!(transport.ops().is_empty());
    }

    #[tokio::test]
    async fn status_properties_are_typed() {
        let transport = MockTransport::new();
        let player = player(&transport);

        assert_eq!(player.playback_status().await.unwrap(), PlaybackStatus::Paused);
        assert_eq!(player.loop_status().await.unwrap(), LoopStatus::None);
        assert_eq!(player.position().await.unwrap(), 42_000_000);

        player.set_loop_status(LoopStatus::Playlist).await.unwrap();
        assert_eq!(player.loop_status().await.unwrap(), LoopStatus::Playlist);
    }

    #[tokio::test]
    async fn metadata_reads_a_full_record() {
        let transport = MockTransport::new();
        let player = player(&transport);

        let record = player.metadata().await.unwrap();

        assert_eq!(record.title().unwrap().as_deref(), Some("Song A"));
    }
}
