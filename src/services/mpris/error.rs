use thiserror::Error;

use super::{Candidate, Interface, coercion::CoercionError};

/// Failures while choosing which player a session binds to.
#[derive(Error, Debug)]
pub enum DiscoveryError {
    /// None of the known candidates is reachable on the bus
    #[error("no media player found")]
    NoPlayerFound,

    /// More than one candidate is reachable and none was chosen explicitly
    #[error("multiple media players found: {}", list_candidates(.0))]
    AmbiguousPlayer(Vec<Candidate>),
}

/// Media player error types
#[derive(Error, Debug)]
pub enum MprisError {
    /// Player selection failed
    #[error(transparent)]
    Discovery(#[from] DiscoveryError),

    /// A round-trip to the remote player failed or was rejected
    #[error("{interface}.{member} failed: {source}")]
    Remote {
        /// Interface the request was addressed to
        interface: Interface,
        /// Property or method name
        member: String,
        /// Underlying transport fault
        #[source]
        source: zbus::Error,
    },

    /// A metadata record lacks a field the protocol guarantees
    #[error("metadata record is missing required field '{key}'")]
    MalformedMetadata {
        /// Wire key of the missing field
        key: &'static str,
    },

    /// An optional interface was used although the player does not provide it
    #[error("{interface} is not available for this player")]
    CapabilityUnavailable {
        /// The absent interface
        interface: Interface,
    },

    /// A value arrived with a type other than the one its key requires
    #[error("unexpected value for '{key}': {source}")]
    UnexpectedType {
        /// Property or metadata key
        key: String,
        /// Mismatch details
        #[source]
        source: CoercionError,
    },

    /// A value could not be converted to or from its wire form
    #[error(transparent)]
    Coercion(#[from] CoercionError),

    /// Service initialization failed
    #[error("Failed to initialize MPRIS session: {0}")]
    InitializationFailed(String),

    /// The broadcast stream ended, the bus connection is gone
    #[error("bus connection lost, no more events will be delivered")]
    Disconnected,
}

impl MprisError {
    pub(crate) fn remote(interface: Interface, member: &str, source: zbus::Error) -> Self {
        Self::Remote {
            interface,
            member: member.to_string(),
            source,
        }
    }
}

fn list_candidates(candidates: &[Candidate]) -> String {
    candidates
        .iter()
        .map(|candidate| candidate.id.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
