//! # Spotify Integration Module
//!
//! This module is the only place that talks to Spotify. It is split along the
//! two hosts the proxy uses:
//!
//! ```text
//! Handlers (api::auth, api::proxy)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (accounts service: authorize URL, token endpoint)
//!     └── Web API client (profile, search, catalog, library)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## Authentication
//!
//! [`auth`] implements the confidential-client authorization-code flow: it
//! builds the authorize URL with the fixed scope set, exchanges the code for a
//! token pair and refreshes access tokens. Client credentials travel as HTTP
//! Basic auth.
//!
//! ## Web API client
//!
//! [`client::SpotifyClient`] is created per request and carries that
//! request's bearer token. It never retries; one inbound call issues exactly
//! one upstream call and its outcome is passed straight back.
//!
//! ## Error Types
//!
//! Both halves return [`crate::error::ApiError`]: `UpstreamAuth` for a
//! rejected code or refresh token, `Upstream` for anything the Web API
//! answers with a non-2xx status and for network failures or timeouts.

pub mod auth;
pub mod client;

pub use client::SpotifyClient;
