//! Preview player.
//!
//! The player is a client-side state machine: a queue of [`crate::types::Track`]s,
//! a selected index and a transport state. It owns no audio code itself; sound
//! is produced by whatever implements [`PlaybackPort`], and the port reports
//! progress back through [`PlaybackController::handle_event`].

mod controller;
mod port;

pub use controller::{DEFAULT_VOLUME, PlaybackController, PlaybackState, TransportState};
pub use port::{PlaybackError, PlaybackEvent, PlaybackPort};
