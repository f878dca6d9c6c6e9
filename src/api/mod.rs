//! # API Module
//!
//! HTTP handlers of the proxy. The module is the web interface layer: it
//! turns inbound requests into calls on [`crate::spotify`] and the session
//! store, and turns their results into JSON responses or redirects.
//!
//! ## Endpoints
//!
//! ### Authentication (`/auth`)
//!
//! - [`login`] - Redirects to Spotify's authorization page
//! - [`callback`] - Completes the authorization-code exchange and writes the
//!   session cookie
//! - [`refresh`] - Trades the refresh token for a new access token
//! - [`logout`] - Clears the session cookie
//! - [`status`] - Reports whether the visitor is logged in
//!
//! ### Proxy (`/api`)
//!
//! [`proxy`] holds one handler per Spotify resource: profile, search, track,
//! album and artist lookup, recently played, top tracks, recommendations and
//! the saved-track check/add/remove trio. All of them require a valid,
//! unexpired session; the check lives in the `SpotifyClient` extractor in
//! [`gate`] so no handler can forget it.
//!
//! ### Monitoring
//!
//! - [`health`] - Status, version and server time
//!
//! ## Error Handling
//!
//! Handlers return [`crate::error::ApiError`], which renders as
//! `{"error": "..."}` with the mapped status code. Parameter validation
//! ([`params`]) runs before any upstream call.

mod auth;
mod gate;
mod health;
pub mod params;
pub mod proxy;

pub use auth::{callback, login, logout, refresh, status};
pub use health::{health, not_found};
