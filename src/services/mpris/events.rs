use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use futures::{StreamExt, stream::BoxStream};
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};
use zbus::zvariant::OwnedValue;

use super::{
    Interface, MprisError, PropertyValue,
    transport::{BusEvent, SignalEvent},
};

type PropertyHandler = Arc<dyn Fn(&PropertyValue) + Send + Sync>;
type SignalHandler = Arc<dyn Fn(&[PropertyValue]) + Send + Sync>;

#[derive(Default)]
struct Registry {
    properties: Vec<(Interface, String, PropertyHandler)>,
    signals: Vec<(Interface, String, SignalHandler)>,
}

/// Routes broadcasts and signals to handlers registered per
/// (interface, member).
///
/// Handlers run synchronously inside the dispatch call, in registration
/// order. They must not block: the next event is not looked at until every
/// handler for the current one has returned.
#[derive(Clone, Default)]
pub struct EventSubscriptionBus {
    registry: Arc<RwLock<Registry>>,
}

impl EventSubscriptionBus {
    /// Create a bus with no registrations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Call `handler` with the new value whenever a broadcast for `interface`
    /// names `property`.
    pub fn on_property_changed<F>(&self, interface: Interface, property: &str, handler: F)
    where
        F: Fn(&PropertyValue) + Send + Sync + 'static,
    {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .properties
            .push((interface, property.to_string(), Arc::new(handler)));
    }

    /// Call `handler` with the signal arguments whenever `interface` emits
    /// `member`.
    pub fn on_signal<F>(&self, interface: Interface, member: &str, handler: F)
    where
        F: Fn(&[PropertyValue]) + Send + Sync + 'static,
    {
        self.registry
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .signals
            .push((interface, member.to_string(), Arc::new(handler)));
    }

    /// Entry point for every `PropertiesChanged` broadcast.
    ///
    /// Values are taken from the broadcast as-is. Returns the number of
    /// handlers invoked; broadcasts nobody is interested in yield zero.
    pub fn on_broadcast(
        &self,
        source_interface: &str,
        changed: &HashMap<String, OwnedValue>,
    ) -> usize {
        let Some(interface) = Interface::from_name(source_interface) else {
            trace!(source_interface, "Dropping broadcast for foreign interface");
            return 0;
        };

        let handlers: Vec<(String, PropertyHandler)> = {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            registry
                .properties
                .iter()
                .filter(|(iface, property, _)| {
                    *iface == interface && changed.contains_key(property)
                })
                .map(|(_, property, handler)| (property.clone(), Arc::clone(handler)))
                .collect()
        };

        let mut values: HashMap<&str, Option<PropertyValue>> = HashMap::new();
        let mut invoked = 0;
        for (property, handler) in &handlers {
            let value = values.entry(property.as_str()).or_insert_with(|| {
                let raw = changed.get(property)?;
                PropertyValue::try_from(raw)
                    .inspect_err(|e| {
                        warn!(
                            %interface,
                            property = property.as_str(),
                            error = %e,
                            "Skipping undecodable property value"
                        );
                    })
                    .ok()
            });

            if let Some(value) = value {
                handler(value);
                invoked += 1;
            }
        }

        debug!(%interface, invoked, "Dispatched property broadcast");
        invoked
    }

    /// Entry point for plain interface signals.
    pub fn on_signal_event(&self, event: &SignalEvent) -> usize {
        let Some(interface) = Interface::from_name(&event.interface) else {
            return 0;
        };

        let handlers: Vec<SignalHandler> = {
            let registry = self.registry.read().unwrap_or_else(PoisonError::into_inner);
            registry
                .signals
                .iter()
                .filter(|(iface, member, _)| *iface == interface && *member == event.member)
                .map(|(_, _, handler)| Arc::clone(handler))
                .collect()
        };
        if handlers.is_empty() {
            return 0;
        }

        let args = match event
            .args
            .iter()
            .map(PropertyValue::try_from)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(args) => args,
            Err(e) => {
                warn!(
                    %interface,
                    member = event.member.as_str(),
                    error = %e,
                    "Skipping undecodable signal"
                );
                return 0;
            }
        };

        for handler in &handlers {
            handler(&args);
        }
        handlers.len()
    }

    /// Route one transport event.
    pub fn dispatch(&self, event: &BusEvent) -> usize {
        match event {
            BusEvent::PropertiesChanged(broadcast) => {
                self.on_broadcast(&broadcast.interface, &broadcast.changed)
            }
            BusEvent::Signal(signal) => self.on_signal_event(signal),
        }
    }
}

/// Single dispatch task feeding transport events into an
/// [`EventSubscriptionBus`].
pub struct EventLoop {
    handle: Option<JoinHandle<Result<(), MprisError>>>,
}

impl EventLoop {
    /// Dispatch events one at a time until the stream ends.
    ///
    /// # Errors
    ///
    /// Always ends with `MprisError::Disconnected`: the stream only ends when
    /// the bus connection is gone.
    pub async fn run(
        mut events: BoxStream<'static, BusEvent>,
        bus: EventSubscriptionBus,
    ) -> Result<(), MprisError> {
        while let Some(event) = events.next().await {
            bus.dispatch(&event);
        }

        warn!("Event stream ended");
        Err(MprisError::Disconnected)
    }

    /// Run the loop on its own task.
    pub fn spawn(events: BoxStream<'static, BusEvent>, bus: EventSubscriptionBus) -> Self {
        Self {
            handle: Some(tokio::spawn(Self::run(events, bus))),
        }
    }

    /// Whether the dispatch task is still running.
    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Stop dispatching. Handlers already running finish first.
    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
    }

    /// Wait for the loop to end.
    ///
    /// A panicking handler is resumed on the caller.
    ///
    /// # Errors
    ///
    /// Returns `MprisError::Disconnected` once the connection is gone.
    pub async fn join(mut self) -> Result<(), MprisError> {
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };

        match handle.await {
            Ok(result) => result,
            Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
            Err(_) => Ok(()),
        }
    }
}

impl Drop for EventLoop {
    fn drop(&mut self) {
        self.stop();
    }
}
