//! Common utilities and abstractions for services

/// Watchable value cells
pub mod property;

pub use property::Property;
