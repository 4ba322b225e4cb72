#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use futures::{StreamExt, stream::BoxStream};
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;
use zbus::{
    fdo,
    zvariant::{ObjectPath, OwnedValue, Value},
};

use super::{
    Interface, PropertyValue,
    interface::bus_name_for,
    transport::{Broadcast, BusEvent, SignalEvent, Transport},
};

/// One request seen by [`MockTransport`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Op {
    HasOwner(String),
    Get(Interface, String),
    Set(Interface, String, PropertyValue),
    Call(Interface, String, Vec<PropertyValue>),
    Subscribe(String),
}

type Key = (String, Interface, String);

#[derive(Default)]
struct State {
    owners: HashSet<String>,
    properties: HashMap<Key, OwnedValue>,
    failing: HashSet<Key>,
    replies: HashMap<Key, OwnedValue>,
    ops: Vec<Op>,
}

/// In-memory players standing in for the session bus.
pub(crate) struct MockTransport {
    state: Mutex<State>,
    sender: Mutex<Option<mpsc::UnboundedSender<BusEvent>>>,
    receiver: Mutex<Option<mpsc::UnboundedReceiver<BusEvent>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Arc<Self> {
        let (tx, rx) = mpsc::unbounded_channel();
        Arc::new(Self {
            state: Mutex::new(State::default()),
            sender: Mutex::new(Some(tx)),
            receiver: Mutex::new(Some(rx)),
        })
    }

    /// Register a player that exposes the root `Identity` property.
    pub(crate) fn add_player(&self, id: &str, identity: &str) {
        let destination = bus_name_for(id);
        self.state.lock().unwrap().owners.insert(destination.clone());
        self.set(&destination, Interface::Root, "Identity", Value::from(identity));
    }

    /// Register an owner that fails every request.
    pub(crate) fn add_silent_owner(&self, id: &str) {
        let destination = bus_name_for(id);
        let mut state = self.state.lock().unwrap();
        state.owners.insert(destination.clone());
        state
            .failing
            .insert((destination, Interface::Root, "Identity".to_string()));
    }

    pub(crate) fn set(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
        value: Value<'_>,
    ) {
        self.state.lock().unwrap().properties.insert(
            (destination.to_string(), interface, name.to_string()),
            wire(value),
        );
    }

    pub(crate) fn fail(&self, destination: &str, interface: Interface, name: &str) {
        self.state
            .lock()
            .unwrap()
            .failing
            .insert((destination.to_string(), interface, name.to_string()));
    }

    pub(crate) fn reply(
        &self,
        destination: &str,
        interface: Interface,
        member: &str,
        value: Value<'_>,
    ) {
        self.state.lock().unwrap().replies.insert(
            (destination.to_string(), interface, member.to_string()),
            wire(value),
        );
    }

    pub(crate) fn property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
    ) -> Option<PropertyValue> {
        let state = self.state.lock().unwrap();
        state
            .properties
            .get(&(destination.to_string(), interface, name.to_string()))
            .map(|value| PropertyValue::try_from(value).unwrap())
    }

    pub(crate) fn broadcast(&self, interface: Interface, changed: Vec<(&str, Value<'_>)>) {
        let changed = changed
            .into_iter()
            .map(|(name, value)| (name.to_string(), wire(value)))
            .collect();
        self.emit(BusEvent::PropertiesChanged(Broadcast {
            interface: interface.name().to_string(),
            changed,
        }));
    }

    pub(crate) fn signal(&self, interface: Interface, member: &str, args: Vec<Value<'_>>) {
        self.emit(BusEvent::Signal(SignalEvent {
            interface: interface.name().to_string(),
            member: member.to_string(),
            args: args.into_iter().map(wire).collect(),
        }));
    }

    pub(crate) fn emit(&self, event: BusEvent) {
        if let Some(sender) = self.sender.lock().unwrap().as_ref() {
            sender.send(event).unwrap();
        }
    }

    /// End the event stream, as a dropped connection would.
    pub(crate) fn disconnect(&self) {
        self.sender.lock().unwrap().take();
    }

    pub(crate) fn ops(&self) -> Vec<Op> {
        self.state.lock().unwrap().ops.clone()
    }

    pub(crate) fn clear_ops(&self) {
        self.state.lock().unwrap().ops.clear();
    }

    fn record(&self, op: Op) {
        self.state.lock().unwrap().ops.push(op);
    }

    fn check_destination(&self, destination: &str) -> zbus::Result<()> {
        if self.state.lock().unwrap().owners.contains(destination) {
            Ok(())
        } else {
            Err(fdo::Error::ServiceUnknown(destination.to_string()).into())
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn has_owner(&self, bus_name: &str) -> zbus::Result<bool> {
        self.record(Op::HasOwner(bus_name.to_string()));
        Ok(self.state.lock().unwrap().owners.contains(bus_name))
    }

    async fn get_property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
    ) -> zbus::Result<OwnedValue> {
        self.record(Op::Get(interface, name.to_string()));
        self.check_destination(destination)?;

        let key = (destination.to_string(), interface, name.to_string());
        let state = self.state.lock().unwrap();
        if state.failing.contains(&key) {
            return Err(fdo::Error::Failed(format!("{name} unavailable")).into());
        }
        match state.properties.get(&key) {
            Some(value) => Ok(value.try_clone()?),
            None => Err(fdo::Error::UnknownProperty(name.to_string()).into()),
        }
    }

    async fn set_property(
        &self,
        destination: &str,
        interface: Interface,
        name: &str,
        value: OwnedValue,
    ) -> zbus::Result<()> {
        let native = PropertyValue::try_from(&value).unwrap();
        self.record(Op::Set(interface, name.to_string(), native));
        self.check_destination(destination)?;

        let key = (destination.to_string(), interface, name.to_string());
        let mut state = self.state.lock().unwrap();
        if state.failing.contains(&key) {
            return Err(fdo::Error::PropertyReadOnly(name.to_string()).into());
        }
        state.properties.insert(key, value);
        Ok(())
    }

    async fn call_method(
        &self,
        destination: &str,
        interface: Interface,
        member: &str,
        args: Vec<OwnedValue>,
    ) -> zbus::Result<Option<OwnedValue>> {
        let native = args
            .iter()
            .map(|arg| PropertyValue::try_from(arg).unwrap())
            .collect();
        self.record(Op::Call(interface, member.to_string(), native));
        self.check_destination(destination)?;

        let key = (destination.to_string(), interface, member.to_string());
        let state = self.state.lock().unwrap();
        if state.failing.contains(&key) {
            return Err(fdo::Error::UnknownMethod(member.to_string()).into());
        }
        match state.replies.get(&key) {
            Some(value) => Ok(Some(value.try_clone()?)),
            None => Ok(None),
        }
    }

    async fn events(&self, destination: &str) -> zbus::Result<BoxStream<'static, BusEvent>> {
        self.record(Op::Subscribe(destination.to_string()));
        let receiver = self
            .receiver
            .lock()
            .unwrap()
            .take()
            .ok_or_else(|| zbus::Error::Failure("already subscribed".to_string()))?;
        Ok(UnboundedReceiverStream::new(receiver).boxed())
    }
}

pub(crate) fn wire(value: Value<'_>) -> OwnedValue {
    value.try_to_owned().unwrap()
}

/// A metadata dictionary with the usual xesam fields.
pub(crate) fn track(track_id: &str, title: &str, artists: &[&str], album: &str) -> Value<'static> {
    let mut map: HashMap<String, Value<'static>> = HashMap::new();
    map.insert(
        "mpris:trackid".to_string(),
        Value::ObjectPath(ObjectPath::try_from(track_id.to_string()).unwrap()),
    );
    map.insert("xesam:title".to_string(), Value::from(title.to_string()));
    map.insert(
        "xesam:artist".to_string(),
        Value::from(artists.iter().map(|a| (*a).to_string()).collect::<Vec<_>>()),
    );
    map.insert("xesam:album".to_string(), Value::from(album.to_string()));
    map.insert("mpris:length".to_string(), Value::from(215_000_000_i64));
    Value::from(map)
}

/// A player with `HasTrackList` set and the Player properties commands read.
pub(crate) fn full_player(transport: &MockTransport, id: &str, identity: &str) -> String {
    transport.add_player(id, identity);
    let destination = bus_name_for(id);
    transport.set(&destination, Interface::Root, "HasTrackList", Value::from(true));
    transport.set(&destination, Interface::Root, "CanQuit", Value::from(true));
    transport.set(&destination, Interface::Root, "CanRaise", Value::from(false));
    transport.set(&destination, Interface::Player, "PlaybackStatus", Value::from("Paused"));
    transport.set(&destination, Interface::Player, "Rate", Value::from(1.0_f64));
    transport.set(&destination, Interface::Player, "Volume", Value::from(0.5_f64));
    transport.set(&destination, Interface::Player, "Position", Value::from(42_000_000_i64));
    transport.set(&destination, Interface::Player, "LoopStatus", Value::from("None"));
    transport.set(&destination, Interface::Player, "Shuffle", Value::from(false));
    transport.set(
        &destination,
        Interface::Player,
        "Metadata",
        track("/org/mpris/MediaPlayer2/Track/1", "Song A", &["Artist A"], "Album A"),
    );
    transport.set(&destination, Interface::Playlists, "PlaylistCount", Value::from(2_u32));
    destination
}
