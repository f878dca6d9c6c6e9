//! Spotify Proxy Library
//!
//! This library implements a small web proxy in front of the Spotify Web API.
//! It performs the OAuth 2.0 authorization-code login, keeps the resulting
//! token pair in a signed session cookie, forwards a fixed set of read and
//! write calls to Spotify and ships the playback state machine used by the
//! preview player.
//!
//! # Modules
//!
//! - `api` - HTTP handlers for the `/auth`, `/api` and `/health` routes
//! - `config` - Configuration management and environment variables
//! - `error` - The error taxonomy shared by handlers and the Spotify client
//! - `player` - Preview player state machine and its playback port
//! - `server` - Router assembly, shared state and the HTTP listener
//! - `session` - Signed-cookie session store and the authorization gate
//! - `spotify` - Spotify Web API client and OAuth token endpoint calls
//! - `types` - Data structures and type definitions
//! - `utils` - Utility functions and helpers
//!
//! # Example
//!
//! ```
//! use spotiproxy::{config, server};
//!
//! #[tokio::main]
//! async fn main() -> spotiproxy::Res<()> {
//!     config::load_env().await?;
//!     let cfg = config::Config::from_env()?;
//!     server::start_api_server(cfg, false).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod error;
pub mod player;
pub mod server;
pub mod session;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for operations that may fail.
///
/// Used by start-up code (configuration, binding the listener) where any
/// error is reported to the operator and terminates the process. Request
/// handling uses [`error::ApiError`] instead.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
///
/// Used when a visitor completes a login or a token refresh.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only meant for start-up failures such as invalid configuration or an
/// address that cannot be bound. Request-level failures are reported with
/// [`warning!`] and answered with an HTTP error instead.
///
/// # Example
///
/// ```
/// error!("Invalid configuration: {}", e);
/// // Program exits here - code after this will not execute
/// ```
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Every failed request ends up here, as do recoverable oddities such as a
/// track without a preview source.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
