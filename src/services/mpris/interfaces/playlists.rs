use tracing::warn;

use super::{arg, path_arg};
use crate::services::mpris::{
    MprisError, Playlist, PlaylistOrdering, PropertyValue, RemoteObjectBinding,
    coercion::CoercionError, types::active_playlist,
};

/// The optional `org.mpris.MediaPlayer2.Playlists` interface.
#[derive(Debug, Clone)]
pub struct PlaylistsBinding {
    binding: RemoteObjectBinding,
}

impl PlaylistsBinding {
    /// Wrap a binding addressed to the playlists interface.
    pub fn new(binding: RemoteObjectBinding) -> Self {
        Self { binding }
    }

    /// The generic binding underneath.
    pub fn binding(&self) -> &RemoteObjectBinding {
        &self.binding
    }

    /// Start playing a playlist.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault
    pub async fn activate_playlist(&self, playlist_id: &str) -> Result<(), MprisError> {
        self.binding
            .invoke("ActivatePlaylist", vec![path_arg(playlist_id)?])
            .await
            .map(drop)
    }

    /// A page of the player's playlists.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the player reports a fault and
    /// `MprisError::UnexpectedType` for a reply that is not a playlist list
    pub async fn get_playlists(
        &self,
        index: u32,
        max_count: u32,
        order: PlaylistOrdering,
        reverse: bool,
    ) -> Result<Vec<Playlist>, MprisError> {
        let reply = self
            .binding
            .invoke(
                "GetPlaylists",
                vec![arg(index)?, arg(max_count)?, arg(order.as_str())?, arg(reverse)?],
            )
            .await?;

        let unexpected = |source| MprisError::UnexpectedType {
            key: "GetPlaylists".to_string(),
            source,
        };
        match reply {
            Some(PropertyValue::List(items)) => items
                .iter()
                .map(Playlist::try_from)
                .collect::<Result<_, _>>()
                .map_err(unexpected),
            Some(other) => Err(unexpected(CoercionError::Mismatch {
                expected: "list",
                found: other.kind(),
            })),
            None => Ok(Vec::new()),
        }
    }

    /// Number of playlists the player offers.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn playlist_count(&self) -> Result<u64, MprisError> {
        self.binding.get("PlaylistCount").await
    }

    /// Orderings `GetPlaylists` supports, as wire names.
    ///
    /// # Errors
    /// Returns error if the property cannot be read
    pub async fn orderings(&self) -> Result<Vec<String>, MprisError> {
        self.binding.get("Orderings").await
    }

    /// The playlist currently playing, if the player reports one.
    ///
    /// # Errors
    /// Returns error if the property cannot be read or has the wrong shape
    pub async fn active_playlist(&self) -> Result<Option<Playlist>, MprisError> {
        let value = self.binding.get_property("ActivePlaylist").await?;
        active_playlist(&value).map_err(|source| MprisError::UnexpectedType {
            key: "ActivePlaylist".to_string(),
            source,
        })
    }

    /// Call `handler` whenever a playlist's name or icon changes.
    pub fn on_playlist_changed<F>(&self, handler: F)
    where
        F: Fn(Playlist) + Send + Sync + 'static,
    {
        self.binding.subscribe("PlaylistChanged", move |args| {
            match args.first().map(Playlist::try_from) {
                Some(Ok(playlist)) => handler(playlist),
                _ => warn!("Ignoring malformed PlaylistChanged"),
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use zbus::zvariant::{ObjectPath, Value};

    use super::*;
    use crate::services::mpris::{
        EventSubscriptionBus, Interface, Transport,
        testing::{MockTransport, Op, full_player},
    };

    fn playlists(transport: &Arc<MockTransport>) -> (String, PlaylistsBinding) {
        let dest = full_player(transport, "vlc", "VLC media player");
        transport.clear_ops();
        let binding = PlaylistsBinding::new(RemoteObjectBinding::new(
            Interface::Playlists,
            dest.clone(),
            Arc::clone(transport) as Arc<dyn Transport>,
            EventSubscriptionBus::new(),
        ));
        (dest, binding)
    }

    fn entry(id: &str, name: &str) -> Value<'static> {
        Value::from((
            ObjectPath::try_from(id.to_string()).unwrap(),
            name.to_string(),
            String::new(),
        ))
    }

    #[tokio::test]
    async fn get_playlists_returns_the_page() {
        let transport = MockTransport::new();
        let (dest, playlists) = playlists(&transport);
        transport.reply(
            &dest,
            Interface::Playlists,
            "GetPlaylists",
            Value::from(vec![entry("/pl/1", "Morning"), entry("/pl/2", "Evening")]),
        );

        let page = playlists
            .get_playlists(0, 10, PlaylistOrdering::Alphabetical, false)
            .await
            .unwrap();

        let names: Vec<_> = page.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Morning", "Evening"]);
        assert_eq!(
            transport.ops(),
            vec![Op::Call(
                Interface::Playlists,
                "GetPlaylists".to_string(),
                vec![
                    PropertyValue::UInt(0),
                    PropertyValue::UInt(10),
                    PropertyValue::Str("Alphabetical".to_string()),
                    PropertyValue::Bool(false),
                ]
            )]
        );
    }

    #[tokio::test]
    async fn active_playlist_reads_maybe_playlist() {
        let transport = MockTransport::new();
        let (dest, playlists) = playlists(&transport);
        transport.set(
            &dest,
            Interface::Playlists,
            "ActivePlaylist",
            Value::from((true, entry("/pl/2", "Evening"))),
        );

        let active = playlists.active_playlist().await.unwrap();

        assert_eq!(active.map(|p| p.id), Some("/pl/2".to_string()));
    }
}
