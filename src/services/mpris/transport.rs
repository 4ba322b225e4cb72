use std::collections::HashMap;

use async_trait::async_trait;
use futures::{StreamExt, future, stream::BoxStream};
use tracing::{debug, instrument};
use zbus::{
    Connection, MatchRule, Message, MessageStream,
    fdo::{DBusProxy, PropertiesProxy},
    message,
    names::{BusName, InterfaceName},
    zvariant::{OwnedValue, Structure, StructureBuilder, Value},
};

use super::{
    MprisError,
    interface::{Interface, OBJECT_PATH, PROPERTIES_CHANGED, PROPERTIES_INTERFACE},
};

/// A `PropertiesChanged` broadcast as received from the bus.
#[derive(Debug)]
pub struct Broadcast {
    /// Name of the interface whose properties changed
    pub interface: String,
    /// Changed property values, keyed by property name
    pub changed: HashMap<String, OwnedValue>,
}

/// Any other signal emitted by the bound player.
#[derive(Debug)]
pub struct SignalEvent {
    /// Emitting interface name
    pub interface: String,
    /// Signal member name
    pub member: String,
    /// Positional signal arguments
    pub args: Vec<OwnedValue>,
}

/// Notifications delivered by [`Transport::events`].
#[derive(Debug)]
pub enum BusEvent {
    /// Property values changed on one interface
    PropertiesChanged(Broadcast),
    /// A plain signal was emitted
    Signal(SignalEvent),
}

/// Request/response and broadcast access to remote objects at
/// `/org/mpris/MediaPlayer2`.
///
/// Everything above this trait is transport agnostic; the session bus
/// implementation is [`DbusTransport`].
#[async_trait]
pub trait Transport: Send + Sync {
    /// Whether some connection currently owns `bus_name`.
    async fn has_owner(&self, bus_name: &str) -> zbus::Result<bool>;

    /// Read one property.
    async fn get_property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
    ) -> zbus::Result<OwnedValue>;

    /// Write one property.
    async fn set_property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
        value: OwnedValue,
    ) -> zbus::Result<()>;

    /// Call a method and wait for its reply.
    ///
    /// Replies carrying several values come back as one structure value,
    /// empty replies as `None`.
    async fn call_method(
        &self,
        destination: &str,
        interface: Interface,
        member: &str,
        args: Vec<OwnedValue>,
    ) -> zbus::Result<Option<OwnedValue>>;

    /// Subscribe to every signal `destination` emits on the MPRIS object path.
    ///
    /// The stream ends when the connection goes away.
    async fn events(&self, destination: &str) -> zbus::Result<BoxStream<'static, BusEvent>>;
}

/// [`Transport`] over a zbus session bus connection.
#[derive(Clone)]
pub struct DbusTransport {
    connection: Connection,
}

impl DbusTransport {
    /// Connect to the session bus.
    ///
    /// # Errors
    ///
    /// Returns `MprisError::InitializationFailed` if no session bus is reachable.
    #[instrument]
    pub async fn session() -> Result<Self, MprisError> {
        let connection = Connection::session()
            .await
            .map_err(|e| {
                MprisError::InitializationFailed(format!("D-Bus connection failed: {e}"))
            })?;

        debug!("Connected to session bus");
        Ok(Self { connection })
    }

    async fn properties(&self, destination: &str) -> zbus::Result<PropertiesProxy<'static>> {
        PropertiesProxy::builder(&self.connection)
            .destination(destination.to_string())?
            .path(OBJECT_PATH)?
            .build()
            .await
    }
}

#[async_trait]
impl Transport for DbusTransport {
    async fn has_owner(&self, bus_name: &str) -> zbus::Result<bool> {
        let dbus = DBusProxy::new(&self.connection).await?;
        let name = BusName::try_from(bus_name)?;
        Ok(dbus.name_has_owner(name).await?)
    }

    async fn get_property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
    ) -> zbus::Result<OwnedValue> {
        let proxy = self.properties(destination).await?;
        let interface = InterfaceName::try_from(interface.name())?;
        Ok(proxy.get(interface, name).await?)
    }

    async fn set_property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
        value: OwnedValue,
    ) -> zbus::Result<()> {
        let proxy = self.properties(destination).await?;
        let interface = InterfaceName::try_from(interface.name())?;
        Ok(proxy.set(interface, name, Value::from(value)).await?)
    }

    async fn call_method(
        &self,
        destination: &str,
        interface: Interface,
        member: &str,
        args: Vec<OwnedValue>,
    ) -> zbus::Result<Option<OwnedValue>> {
        let reply = if args.is_empty() {
            self.connection
                .call_method(
                    Some(destination),
                    OBJECT_PATH,
                    Some(interface.name()),
                    member,
                    &(),
                )
                .await?
        } else {
            let body = args
                .into_iter()
                .fold(StructureBuilder::new(), |builder, arg| {
                    builder.append_field(Value::from(arg))
                })
                .build()?;
            self.connection
                .call_method(
                    Some(destination),
                    OBJECT_PATH,
                    Some(interface.name()),
                    member,
                    &body,
                )
                .await?
        };

        Ok(reply_value(&reply))
    }

    async fn events(&self, destination: &str) -> zbus::Result<BoxStream<'static, BusEvent>> {
        let dbus = DBusProxy::new(&self.connection).await?;
        let owner = dbus.get_name_owner(BusName::try_from(destination)?).await?;

        let rule = MatchRule::builder()
            .msg_type(message::Type::Signal)
            .sender(owner.to_string())?
            .path(OBJECT_PATH)?
            .build();

        let stream = MessageStream::for_match_rule(rule, &self.connection, None).await?;
        debug!(destination, owner = %owner, "Subscribed to player signals");

        Ok(stream
            .filter_map(|message| future::ready(message.ok().and_then(|m| decode_event(&m))))
            .boxed())
    }
}

fn reply_value(reply: &Message) -> Option<OwnedValue> {
    let body = reply.body();
    if body.signature().to_string().is_empty() {
        return None;
    }

    match body.deserialize::<Structure<'_>>() {
        Ok(structure) => {
            let mut fields = structure.into_fields();
            let value = if fields.len() == 1 {
                fields.pop()?
            } else {
                let rebuilt = fields
                    .into_iter()
                    .fold(StructureBuilder::new(), StructureBuilder::append_field)
                    .build()
                    .ok()?;
                Value::Structure(rebuilt)
            };
            value.try_to_owned().ok()
        }
        Err(_) => body
            .deserialize::<Value<'_>>()
            .ok()
            .and_then(|value| value.try_to_owned().ok()),
    }
}

fn decode_event(message: &Message) -> Option<BusEvent> {
    let header = message.header();
    let interface = header.interface()?.to_string();
    let member = header.member()?.to_string();

    if interface == PROPERTIES_INTERFACE {
        if member != PROPERTIES_CHANGED {
            return None;
        }
        let (interface, changed, _invalidated) = message
            .body()
            .deserialize::<(String, HashMap<String, OwnedValue>, Vec<String>)>()
            .ok()?;
        return Some(BusEvent::PropertiesChanged(Broadcast { interface, changed }));
    }

    let args = match message.body().deserialize::<Structure<'_>>() {
        Ok(structure) => structure
            .into_fields()
            .into_iter()
            .filter_map(|field| field.try_to_owned().ok())
            .collect(),
        Err(_) => Vec::new(),
    };

    Some(BusEvent::Signal(SignalEvent {
        interface,
        member,
        args,
    }))
}
