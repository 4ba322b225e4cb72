/// Shared service building blocks
pub mod common;
/// MPRIS media player remote control
pub mod mpris;
/// Desktop notifications
pub mod notifications;

pub use mpris::{EndpointDiscovery, Session};
pub use notifications::DesktopNotifier;
