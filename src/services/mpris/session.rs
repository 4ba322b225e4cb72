use std::sync::{Arc, Mutex, PoisonError};

use futures::stream::BoxStream;
use tracing::{info, instrument};

use super::{
    Capability, CapabilityGate, EventLoop, EventSubscriptionBus, Interface, MetadataCache,
    MprisError, PlayerBinding, PlaylistsBinding, RemoteObjectBinding, RootBinding,
    TrackListBinding,
    interface::{BUS_NAME_PREFIX, bus_name_for},
    transport::{BusEvent, DbusTransport, Transport},
};

/// One bound player.
///
/// Optional interfaces are probed once here and never re-checked; the
/// metadata cache is loaded once and then follows broadcasts delivered by
/// the event loop.
pub struct Session {
    destination: String,
    player_id: String,
    identity: String,
    root: RootBinding,
    player: PlayerBinding,
    track_list: Capability<TrackListBinding>,
    playlists: Capability<PlaylistsBinding>,
    metadata: MetadataCache,
    bus: EventSubscriptionBus,
    events: Mutex<Option<BoxStream<'static, BusEvent>>>,
}

impl Session {
    /// Bind to `player` over the session bus.
    ///
    /// # Errors
    /// Returns `MprisError::InitializationFailed` without a session bus, or
    /// any error [`bind`](Self::bind) reports
    pub async fn connect(player: &str) -> Result<Self, MprisError> {
        let transport = DbusTransport::session().await?;
        Self::bind(Arc::new(transport), player).await
    }

    /// Bind to `player`, a candidate id such as `vlc` or a full bus name.
    ///
    /// Subscribes to the player's signals before the metadata snapshot is
    /// taken, so no broadcast sent after the snapshot is missed.
    ///
    /// # Errors
    /// Returns `MprisError::Remote` if the identity or metadata cannot be
    /// read and `MprisError::InitializationFailed` if signal subscription fails
    #[instrument(skip(transport))]
    pub async fn bind(transport: Arc<dyn Transport>, player: &str) -> Result<Self, MprisError> {
        let destination = bus_name_for(player);
        let player_id = destination
            .strip_prefix(BUS_NAME_PREFIX)
            .unwrap_or(&destination)
            .to_string();
        let bus = EventSubscriptionBus::new();
        let binding = |interface| {
            RemoteObjectBinding::new(
                interface,
                destination.clone(),
                Arc::clone(&transport),
                bus.clone(),
            )
        };

        let root = RootBinding::new(binding(Interface::Root));
        let identity = root.identity().await?;

        let has_track_list = CapabilityGate::probe(root.binding(), "HasTrackList").await;
        let track_list = Capability::gate(has_track_list, Interface::TrackList, || {
            TrackListBinding::new(binding(Interface::TrackList))
        });

        let playlists_binding = binding(Interface::Playlists);
        let has_playlists =
            CapabilityGate::probe_interface(&playlists_binding, "PlaylistCount").await;
        let playlists = Capability::gate(has_playlists, Interface::Playlists, || {
            PlaylistsBinding::new(playlists_binding)
        });

        let events = transport.events(&destination).await.map_err(|e| {
            MprisError::InitializationFailed(format!("Signal subscription failed: {e}"))
        })?;

        let player = PlayerBinding::new(binding(Interface::Player));
        let metadata = MetadataCache::load(&player).await?;
        metadata.attach(&bus);

        info!(
            destination = %destination,
            identity = %identity,
            has_track_list,
            has_playlists,
            "Bound MPRIS player"
        );

        Ok(Self {
            destination,
            player_id,
            identity,
            root,
            player,
            track_list,
            playlists,
            metadata,
            bus,
            events: Mutex::new(Some(events)),
        })
    }

    /// Bus name of the bound player.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Short player id, the bus name without its MPRIS prefix.
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    /// Human-readable player name, read at bind time.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The root interface.
    pub fn root(&self) -> &RootBinding {
        &self.root
    }

    /// The playback interface.
    pub fn player(&self) -> &PlayerBinding {
        &self.player
    }

    /// The track list interface.
    ///
    /// # Errors
    /// Returns `MprisError::CapabilityUnavailable` if the player did not
    /// advertise `HasTrackList` at bind time
    pub fn track_list(&self) -> Result<&TrackListBinding, MprisError> {
        self.track_list.get()
    }

    /// The playlists interface.
    ///
    /// # Errors
    /// Returns `MprisError::CapabilityUnavailable` if the player did not
    /// answer for it at bind time
    pub fn playlists(&self) -> Result<&PlaylistsBinding, MprisError> {
        self.playlists.get()
    }

    /// Whether the track list interface is bound.
    pub fn has_track_list(&self) -> bool {
        self.track_list.is_available()
    }

    /// Whether the playlists interface is bound.
    pub fn has_playlists(&self) -> bool {
        self.playlists.is_available()
    }

    /// Current track metadata.
    pub fn metadata(&self) -> &MetadataCache {
        &self.metadata
    }

    /// The bus broadcasts are routed through; register extra observers here.
    pub fn bus(&self) -> &EventSubscriptionBus {
        &self.bus
    }

    fn take_events(&self) -> Result<BoxStream<'static, BusEvent>, MprisError> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or_else(|| {
                MprisError::InitializationFailed("event loop already started".to_string())
            })
    }

    /// Dispatch broadcasts on the calling task until the connection drops.
    ///
    /// # Errors
    /// Returns `MprisError::Disconnected` when the stream ends and
    /// `MprisError::InitializationFailed` if the loop was already started
    pub async fn run_event_loop(&self) -> Result<(), MprisError> {
        let events = self.take_events()?;
        EventLoop::run(events, self.bus.clone()).await
    }

    /// Dispatch broadcasts on a background task.
    ///
    /// # Errors
    /// Returns `MprisError::InitializationFailed` if the loop was already started
    pub fn spawn_event_loop(&self) -> Result<EventLoop, MprisError> {
        let events = self.take_events()?;
        Ok(EventLoop::spawn(events, self.bus.clone()))
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("destination", &self.destination)
            .field("identity", &self.identity)
            .field("has_track_list", &self.has_track_list())
            .field("has_playlists", &self.has_playlists())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use futures::StreamExt;
    use zbus::zvariant::Value;

    use super::*;
    use crate::services::mpris::testing::{MockTransport, full_player, track};

    async fn bind(transport: &Arc<MockTransport>, player: &str) -> Result<Session, MprisError> {
        Session::bind(Arc::clone(transport) as Arc<dyn Transport>, player).await
    }

    #[tokio::test]
    async fn binds_all_advertised_interfaces() {
        let transport = MockTransport::new();
        full_player(&transport, "vlc", "VLC media player");

        let session = bind(&transport, "vlc").await.unwrap();

        assert_eq!(session.destination(), "org.mpris.MediaPlayer2.vlc");
        assert_eq!(session.player_id(), "vlc");
        assert_eq!(session.identity(), "VLC media player");
        assert!(session.has_track_list());
        assert!(session.has_playlists());
        assert_eq!(session.metadata().title().unwrap(), Some("Song A".to_string()));
    }

    #[tokio::test]
    async fn full_bus_names_are_accepted() {
        let transport = MockTransport::new();
        full_player(&transport, "audacious", "Audacious");

        let session = bind(&transport, "org.mpris.MediaPlayer2.audacious")
            .await
            .unwrap();

        assert_eq!(session.player_id(), "audacious");
    }

    #[tokio::test]
    async fn absent_track_list_fails_without_bus_traffic() {
        let transport = MockTransport::new();
        let dest = full_player(&transport, "vlc", "VLC media player");
        transport.set(&dest, Interface::Root, "HasTrackList", Value::from(false));
        transport.fail(&dest, Interface::Playlists, "PlaylistCount");

        let session = bind(&transport, "vlc").await.unwrap();
        transport.clear_ops();

        assert!(matches!(
            session.track_list(),
            Err(MprisError::CapabilityUnavailable {
                interface: Interface::TrackList
            })
        ));
        assert!(matches!(
            session.playlists(),
            Err(MprisError::CapabilityUnavailable {
                interface: Interface::Playlists
            })
        ));
        assert!(transport.ops().is_empty());
    }

    #[tokio::test]
    async fn unreachable_player_fails_to_bind() {
        let transport = MockTransport::new();

        let err = bind(&transport, "bmp").await.unwrap_err();

        assert!(matches!(
            err,
            MprisError::Remote {
                interface: Interface::Root,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn event_loop_feeds_the_metadata_cache() {
        let transport = MockTransport::new();
        full_player(&transport, "vlc", "VLC media player");
        let session = bind(&transport, "vlc").await.unwrap();
        let mut updates = session.metadata().watch();
        updates.next().await;

        let event_loop = session.spawn_event_loop().unwrap();
        let next = track("/org/mpris/MediaPlayer2/Track/2", "Song B", &["B"], "Album B");
        transport.broadcast(Interface::Player, vec![("Metadata", next)]);
        let latest = updates.next().await.unwrap();

        assert_eq!(latest.title().unwrap(), Some("Song B".to_string()));
        assert!(event_loop.is_running());
        assert!(session.spawn_event_loop().is_err());
    }

    #[tokio::test]
    async fn quick_track_changes_all_reach_listeners() {
        let transport = MockTransport::new();
        full_player(&transport, "vlc", "VLC media player");
        let session = bind(&transport, "vlc").await.unwrap();
        let mut changes = session.metadata().changes();

        for (n, title) in ["Song B", "Song C", "Song D"].into_iter().enumerate() {
            let id = format!("/org/mpris/MediaPlayer2/Track/{}", n + 2);
            transport.broadcast(
                Interface::Player,
                vec![("Metadata", track(&id, title, &["B"], "Album B"))],
            );
        }
        transport.disconnect();
        assert!(session.run_event_loop().await.is_err());

        let mut titles = Vec::new();
        while let Ok(record) = changes.try_recv() {
            titles.push(record.title().unwrap().unwrap());
        }

        assert_eq!(titles, ["Song B", "Song C", "Song D"]);
    }

    #[tokio::test]
    async fn dropped_connection_ends_the_loop() {
        let transport = MockTransport::new();
        full_player(&transport, "vlc", "VLC media player");
        let session = bind(&transport, "vlc").await.unwrap();

        transport.disconnect();

        assert!(matches!(
            session.run_event_loop().await,
            Err(MprisError::Disconnected)
        ));
    }
}
