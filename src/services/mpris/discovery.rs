use std::{fmt, sync::Arc};

use tracing::{debug, info, instrument};

use super::{
    DiscoveryError, Interface, PropertyValue,
    interface::bus_name_for,
    transport::Transport,
};

/// Players probed when no candidate list is configured.
pub const DEFAULT_CANDIDATES: [&str; 4] = ["audacious", "vlc", "bmp", "xmms2"];

/// A reachable player found during discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Candidate id as configured, e.g. `vlc`
    pub id: String,

    /// Human-readable player name from the root `Identity` property
    pub identity: String,
}

impl Candidate {
    /// Well-known bus name of the player.
    pub fn bus_name(&self) -> String {
        bus_name_for(&self.id)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.id, self.identity)
    }
}

/// Probes a fixed, ordered list of candidate players.
pub struct EndpointDiscovery {
    transport: Arc<dyn Transport>,
    candidates: Vec<String>,
}

impl EndpointDiscovery {
    /// Discovery over the default candidate list.
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_candidates(transport, DEFAULT_CANDIDATES)
    }

    /// Discovery over a custom candidate list, probed in the given order.
    pub fn with_candidates<I, S>(transport: Arc<dyn Transport>, candidates: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            transport,
            candidates: candidates.into_iter().map(Into::into).collect(),
        }
    }

    /// The candidate ids probed, in order.
    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Probe every candidate and return the reachable ones, in candidate order.
    ///
    /// A candidate that is not on the bus, has no identity or fails to answer
    /// is left out; enumeration itself never fails.
    #[instrument(skip(self))]
    pub async fn enumerate(&self) -> Vec<Candidate> {
        let mut found = Vec::new();

        for id in &self.candidates {
            match self.probe(id).await {
                Some(identity) => {
                    debug!(
                        candidate = id.as_str(),
                        identity = identity.as_str(),
                        "Player reachable"
                    );
                    found.push(Candidate {
                        id: id.clone(),
                        identity,
                    });
                }
                None => debug!(candidate = id.as_str(), "Player not reachable"),
            }
        }

        info!(count = found.len(), "Discovered MPRIS players");
        found
    }

    /// Pick the one reachable player.
    ///
    /// # Errors
    ///
    /// Returns `DiscoveryError::NoPlayerFound` when nothing is reachable and
    /// `DiscoveryError::AmbiguousPlayer` when more than one player is.
    pub async fn resolve_default(&self) -> Result<Candidate, DiscoveryError> {
        let mut found = self.enumerate().await;
        match found.len() {
            0 => Err(DiscoveryError::NoPlayerFound),
            1 => found.pop().ok_or(DiscoveryError::NoPlayerFound),
            _ => Err(DiscoveryError::AmbiguousPlayer(found)),
        }
    }

    async fn probe(&self, id: &str) -> Option<String> {
        let destination = bus_name_for(id);

        if !self.transport.has_owner(&destination).await.ok()? {
            return None;
        }

        let raw = self
            .transport
            .get_property(&destination, Interface::Root, "Identity")
            .await
            .ok()?;

        match PropertyValue::try_from(&raw).ok()? {
            PropertyValue::Str(identity) => Some(identity),
            _ => None,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::services::mpris::testing::{MockTransport, Op};

    fn discovery(transport: &Arc<MockTransport>) -> EndpointDiscovery {
        EndpointDiscovery::new(Arc::clone(transport) as Arc<dyn Transport>)
    }

    #[tokio::test]
    async fn single_reachable_player_is_enumerated_and_resolved() {
        let transport = MockTransport::new();
        transport.add_player("vlc", "VLC media player");
        let discovery = discovery(&transport);

        let found = discovery.enumerate().await;
        assert_eq!(
            found,
            vec![Candidate {
                id: "vlc".to_string(),
                identity: "VLC media player".to_string(),
            }]
        );

        let resolved = discovery.resolve_default().await.unwrap();
        assert_eq!(resolved.id, "vlc");
        assert_eq!(resolved.bus_name(), "org.mpris.MediaPlayer2.vlc");
    }

    #[tokio::test]
    async fn no_reachable_player_is_an_error() {
        let transport = MockTransport::new();

        let err = discovery(&transport).resolve_default().await.unwrap_err();

        assert!(matches!(err, DiscoveryError::NoPlayerFound));
    }

    #[tokio::test]
    async fn several_reachable_players_are_ambiguous() {
        let transport = MockTransport::new();
        transport.add_player("xmms2", "XMMS2");
        transport.add_player("audacious", "Audacious");

        let err = discovery(&transport).resolve_default().await.unwrap_err();

        let DiscoveryError::AmbiguousPlayer(found) = err else {
            panic!("expected ambiguity");
        };
        let ids: Vec<_> = found.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["audacious", "xmms2"]);
    }

    #[tokio::test]
    async fn failing_probe_excludes_candidate_only() {
        let transport = MockTransport::new();
        transport.add_silent_owner("audacious");
        transport.add_player("bmp", "Beep Media Player");

        let found = discovery(&transport).enumerate().await;

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "bmp");
    }

    #[tokio::test]
    async fn absent_players_are_never_asked_for_identity() {
        let transport = MockTransport::new();

        discovery(&transport).enumerate().await;

        assert!(transport.ops().iter().all(|op| matches!(op, Op::HasOwner(_))));
        assert_eq!(transport.ops().len(), DEFAULT_CANDIDATES.len());
    }

    #[tokio::test]
    async fn custom_candidates_extend_discovery() {
        let transport = MockTransport::new();
        transport.add_player("spotify", "Spotify");
        let discovery = EndpointDiscovery::with_candidates(
            Arc::clone(&transport) as Arc<dyn Transport>,
            ["vlc", "spotify"],
        );

        assert_eq!(discovery.resolve_default().await.unwrap().identity, "Spotify");
    }
}
