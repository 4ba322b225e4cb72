//! MPRIS media player remote control.
//!
//! Discovers players on the session bus, binds a [`Session`] to one of them
//! and keeps a local view of its track metadata in sync through the
//! `PropertiesChanged` broadcasts the player emits.

/// Generic property/method proxy for one remote interface
pub mod binding;
/// Capability-gated optional interfaces
pub mod capability;
/// Wire value normalization
pub mod coercion;
/// Candidate probing and default player resolution
pub mod discovery;
/// Media player error types
pub mod error;
/// Change-notification routing and the dispatch loop
pub mod events;
/// Well-known interface names
pub mod interface;
/// Typed bindings for each MPRIS interface
pub mod interfaces;
/// Track metadata record and cache
pub mod metadata;
/// Bound player session
pub mod session;
/// Bus transport abstraction and its D-Bus implementation
pub mod transport;
/// Protocol value types
pub mod types;
/// MPRIS utility functions
pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

pub use binding::RemoteObjectBinding;
pub use capability::{Capability, CapabilityGate};
pub use coercion::{CoercionError, PropertyValue};
pub use discovery::{Candidate, DEFAULT_CANDIDATES, EndpointDiscovery};
pub use error::{DiscoveryError, MprisError};
pub use events::{EventLoop, EventSubscriptionBus};
pub use interface::{BUS_NAME_PREFIX, Interface, OBJECT_PATH};
pub use interfaces::{PlayerBinding, PlaylistsBinding, RootBinding, TrackListBinding};
pub use metadata::{MetadataCache, MetadataField, MetadataRecord, UNKNOWN_METADATA};
pub use session::Session;
pub use transport::{Broadcast, BusEvent, DbusTransport, SignalEvent, Transport};
pub use types::{LoopStatus, NO_TRACK, PlaybackStatus, Playlist, PlaylistOrdering};
