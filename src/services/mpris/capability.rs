use tracing::{debug, instrument};

use super::{Interface, MprisError, PropertyValue, RemoteObjectBinding};

/// An optional interface, present or absent for the whole life of a session.
#[derive(Debug, Clone)]
pub enum Capability<T> {
    /// The player advertised the interface
    Available(T),
    /// The player did not; no binding was built
    Unavailable {
        /// The missing interface
        interface: Interface,
    },
}

impl<T> Capability<T> {
    /// Build from a probe result, constructing the binding only when present.
    pub fn gate(present: bool, interface: Interface, build: impl FnOnce() -> T) -> Self {
        if present {
            Self::Available(build())
        } else {
            Self::Unavailable { interface }
        }
    }

    /// Whether the interface is usable.
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available(_))
    }

    /// Borrow the binding.
    ///
    /// # Errors
    ///
    /// Returns `MprisError::CapabilityUnavailable` when the interface is
    /// absent. No bus traffic is issued in that case.
    pub fn get(&self) -> Result<&T, MprisError> {
        match self {
            Self::Available(binding) => Ok(binding),
            Self::Unavailable { interface } => Err(MprisError::CapabilityUnavailable {
                interface: *interface,
            }),
        }
    }
}

/// One-time capability probes run while a session is being bound.
pub struct CapabilityGate;

impl CapabilityGate {
    /// Read a boolean capability flag from the root interface.
    ///
    /// Any failure, including a non-boolean value, counts as `false`.
    #[instrument(skip(root))]
    pub async fn probe(root: &RemoteObjectBinding, flag: &str) -> bool {
        let present = matches!(root.get_property(flag).await, Ok(PropertyValue::Bool(true)));
        debug!(flag, present, "Capability probed");
        present
    }

    /// Decide whether an interface without a flag exists by reading one of
    /// its properties; present iff the read succeeds.
    #[instrument(skip(binding), fields(interface = %binding.interface()))]
    pub async fn probe_interface(binding: &RemoteObjectBinding, property: &str) -> bool {
        let present = binding.get_property(property).await.is_ok();
        debug!(property, present, "Interface probed");
        present
    }
}
