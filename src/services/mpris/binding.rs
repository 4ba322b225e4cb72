use std::sync::Arc;

use tracing::{debug, instrument};
use zbus::zvariant::OwnedValue;

use super::{
    CoercionError, EventSubscriptionBus, Interface, MprisError, PropertyValue, transport::Transport,
};

/// Property and method access to one interface of one remote player.
///
/// Holds no state besides its address; every call is a fresh round-trip.
#[derive(Clone)]
pub struct RemoteObjectBinding {
    interface: Interface,
    destination: String,
    transport: Arc<dyn Transport>,
    bus: EventSubscriptionBus,
}

impl RemoteObjectBinding {
    /// Bind `interface` on the player owning `destination`.
    pub fn new(
        interface: Interface,
        destination: impl Into<String>,
        transport: Arc<dyn Transport>,
        bus: EventSubscriptionBus,
    ) -> Self {
        Self {
            interface,
            destination: destination.into(),
            transport,
            bus,
        }
    }

    /// Interface this binding addresses.
    pub fn interface(&self) -> Interface {
        self.interface
    }

    /// Bus name of the bound player.
    pub fn destination(&self) -> &str {
        &self.destination
    }

    /// Read a property, coerced to its native form.
    ///
    /// # Errors
    ///
    /// Returns `MprisError::Remote` if the player rejects the read and
    /// `MprisError::UnexpectedType` if the value cannot be coerced.
    #[instrument(skip(self), fields(interface = %self.interface, destination = %self.destination))]
    pub async fn get_property(&self, name: &str) -> Result<PropertyValue, MprisError> {
        let raw = self
            .transport
            .get_property(&self.destination, self.interface, name)
            .await
            .map_err(|e| MprisError::remote(self.interface, name, e))?;

        PropertyValue::try_from(&raw).map_err(|source| MprisError::UnexpectedType {
            key: name.to_string(),
            source,
        })
    }

    /// Read a property and convert it to `T`.
    ///
    /// # Errors
    ///
    /// As [`get_property`](Self::get_property), plus
    /// `MprisError::UnexpectedType` when the value is not a `T`.
    pub async fn get<T>(&self, name: &str) -> Result<T, MprisError>
    where
        T: for<'a> TryFrom<&'a PropertyValue, Error = CoercionError>,
    {
        let value = self.get_property(name).await?;
        T::try_from(&value).map_err(|source| MprisError::UnexpectedType {
            key: name.to_string(),
            source,
        })
    }

    /// Write a property.
    ///
    /// The value is sent as given. Players may ignore writes they do not
    /// support without reporting anything.
    ///
    /// # Errors
    ///
    /// Returns `MprisError::Coercion` if the value has no wire form and
    /// `MprisError::Remote` if the transport reports a fault.
    #[instrument(skip(self), fields(interface = %self.interface, destination = %self.destination))]
    pub async fn set_property(&self, name: &str, value: PropertyValue) -> Result<(), MprisError> {
        let wire = value.to_wire()?;
        self.transport
            .set_property(&self.destination, self.interface, name, wire)
            .await
            .map_err(|e| MprisError::remote(self.interface, name, e))?;

        debug!(property = name, "Property written");
        Ok(())
    }

    /// Call a method with already wire-shaped arguments.
    ///
    /// A reply without fault only means the player accepted the request.
    ///
    /// # Errors
    ///
    /// Returns `MprisError::Remote` on a reported fault and
    /// `MprisError::UnexpectedType` if the reply cannot be coerced.
    #[instrument(
        skip(self, args),
        fields(interface = %self.interface, destination = %self.destination)
    )]
    pub async fn invoke(
        &self,
        method: &str,
        args: Vec<OwnedValue>,
    ) -> Result<Option<PropertyValue>, MprisError> {
        let reply = self
            .transport
            .call_method(&self.destination, self.interface, method, args)
            .await
            .map_err(|e| MprisError::remote(self.interface, method, e))?;

        debug!(method, "Method invoked");
        reply
            .map(|raw| PropertyValue::try_from(&raw))
            .transpose()
            .map_err(|source| MprisError::UnexpectedType {
                key: method.to_string(),
                source,
            })
    }

    /// Call `handler` whenever the player emits `signal` on this interface.
    ///
    /// Delivery happens on the event loop.
    pub fn subscribe<F>(&self, signal: &str, handler: F)
    where
        F: Fn(&[PropertyValue]) + Send + Sync + 'static,
    {
        self.bus.on_signal(self.interface, signal, handler);
    }

    /// Call `handler` whenever a broadcast announces a new value for `property`.
    pub fn on_property_changed<F>(&self, property: &str, handler: F)
    where
        F: Fn(&PropertyValue) + Send + Sync + 'static,
    {
        self.bus.on_property_changed(self.interface, property, handler);
    }
}

impl std::fmt::Debug for RemoteObjectBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteObjectBinding")
            .field("interface", &self.interface)
            .field("destination", &self.destination)
            .finish_non_exhaustive()
    }
}
