//! mpris-remote - a client for MPRIS media players on the D-Bus session bus.
//!
//! The library finds a running player, binds a [`Session`](services::mpris::Session)
//! to it and exposes the MPRIS interfaces as typed async bindings. Track
//! metadata is cached locally and kept current from the player's change
//! broadcasts.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use mpris_remote::services::mpris::{MprisError, Session};
//!
//! # async fn example() -> Result<(), MprisError> {
//! let session = Session::connect("vlc").await?;
//! session.player().play_pause().await?;
//!
//! let track = session.metadata().snapshot();
//! println!("Now playing: {:?}", track.title()?);
//! # Ok(())
//! # }
//! ```

/// Command-line actions against a bound player.
pub mod cli;

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Media player and notification services.
pub mod services;

/// Logging setup for the binary.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{MprisRemoteError, Result};
