use tracing::warn;

use super::{arg, object_path, path_arg};
use crate::services::mpris::{
    MetadataRecord, MprisError, PropertyValue, RemoteObjectBinding, coercion::CoercionError,
};

/// The optional `org.mpris.MediaPlayer2.TrackList` interface.
///
/// Only built for players whose root `HasTrackList` was true at bind time.
#[derive(Debug, Clone)]
pub struct TrackListBinding {
    binding: RemoteObjectBinding,
}

impl TrackListBinding {
    /// Wrap a binding addressed to the track list interface.
    pub fn new(binding: RemoteObjectBinding) -> Self {
        Self { binding }
    }

    /// The generic binding underneath.
    pub fn binding(&self) -> &RemoteObjectBinding {
        &self.binding
    }

    /// Metadata for each of `track_ids`, in the order the player returns them.
    ///
    /// # Errors
    /// Returns error if an id is not an object path, the player reports a
    /// fault or the reply is not a list of maps
    pub async fn get_tracks_metadata(
        &self,
        track_ids: &[String],
    ) -> Result<Vec<MetadataRecord>, MprisError> {
        let paths = track_ids
            .iter()
            .map(|id| object_path(id))
            .collect::<Result<Vec<_>, _>>()?;

        let reply = self
            .binding
            .invoke("GetTracksMetadata", vec![arg(paths)?])
            .await?;

        let unexpected = |source| MprisError::UnexpectedType {
            key: "GetTracksMetadata".to_string(),
            source,
        };
        match reply {
            Some(PropertyValue::List(items)) => items
                .into_iter()
                .map(MetadataRecord::try_from)
                .collect::<Result<_, _>>()
                .map_err(unexpected),
            Some(other) => Err(unexpected(CoercionError::Mismatch {
                expected: "list",
                found: other.kind(),
            })),
            None => Ok(Vec::new()),
        }
    }

    /// Insert `uri` after `after_track`, optionally making it current.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn add_track(
        &self,
        uri: &str,
        after_track: &str,
        set_as_current: bool,
    ) -> Result<(), MprisError> {
        self.binding
            .invoke(
                "AddTrack",
                vec![arg(uri)?, path_arg(after_track)?, arg(set_as_current)?],
            )
            .await
            .map(drop)
    }

    /// Remove a track from the list.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn remove_track(&self, track_id: &str) -> Result<(), MprisError> {
        self.binding
            .invoke("RemoveTrack", vec![path_arg(track_id)?])
            .await
            .map(drop)
    }

    /// Skip to a track in the list.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn go_to(&self, track_id: &str) -> Result<(), MprisError> {
        self.binding
            .invoke("GoTo", vec![path_arg(track_id)?])
            .await
            .map(drop)
    }

    /// Ids of the tracks in the list, in play order.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn tracks(&self) -> Result<Vec<String>, MprisError> {
        self.binding.get("Tracks").await
    }

    /// Whether tracks can be added or removed.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn can_edit_tracks(&self) -> Result<bool, MprisError> {
        self.binding.get("CanEditTracks").await
    }

    /// Call `handler` with the new track ids and current track when the
    /// whole list is replaced.
    pub fn on_track_list_replaced<F>(&self, handler: F)
    where
        F: Fn(Vec<String>, String) + Send + Sync + 'static,
    {
        self.binding.subscribe("TrackListReplaced", move |args| {
            let decoded = match args {
                [tracks, current] => Vec::<String>::try_from(tracks)
                    .and_then(|tracks| Ok((tracks, String::try_from(current)?))),
                _ => Err(arity("TrackListReplaced")),
            };
            match decoded {
                Ok((tracks, current)) => handler(tracks, current),
                Err(e) => warn!(error = %e, "Ignoring malformed TrackListReplaced"),
            }
        });
    }

    /// Call `handler` with the new track's metadata and the id it follows.
    pub fn on_track_added<F>(&self, handler: F)
    where
        F: Fn(MetadataRecord, String) + Send + Sync + 'static,
    {
        self.binding.subscribe("TrackAdded", move |args| {
            let decoded = match args {
                [metadata, after] => MetadataRecord::try_from(metadata.clone())
                    .and_then(|record| Ok((record, String::try_from(after)?))),
                _ => Err(arity("TrackAdded")),
            };
            match decoded {
                Ok((record, after)) => handler(record, after),
                Err(e) => warn!(error = %e, "Ignoring malformed TrackAdded"),
            }
        });
    }

    /// Call `handler` with the id of each removed track.
    pub fn on_track_removed<F>(&self, handler: F)
    where
        F: Fn(String) + Send + Sync + 'static,
    {
        self.binding.subscribe("TrackRemoved", move |args| {
            match args.first().map(String::try_from) {
                Some(Ok(track_id)) => handler(track_id),
                _ => warn!("Ignoring malformed TrackRemoved"),
            }
        });
    }

    /// Call `handler` with a track id and its replacement metadata.
    pub fn on_track_metadata_changed<F>(&self, handler: F)
    where
        F: Fn(String, MetadataRecord) + Send + Sync + 'static,
    {
        self.binding.subscribe("TrackMetadataChanged", move |args| {
            let decoded = match args {
                [track_id, metadata] => String::try_from(track_id).and_then(|track_id| {
                    Ok((track_id, MetadataRecord::try_from(metadata.clone())?))
                }),
                _ => Err(arity("TrackMetadataChanged")),
            };
            match decoded {
                Ok((track_id, record)) => handler(track_id, record),
                Err(e) => warn!(error = %e, "Ignoring malformed TrackMetadataChanged"),
            }
        });
    }
}

fn arity(signal: &str) -> CoercionError {
    CoercionError::Unsupported(format!("{signal} arguments"))
}
