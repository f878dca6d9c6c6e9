//! Configuration management for the Spotify proxy.
//!
//! This module handles loading and accessing configuration values from environment
//! variables and `.env` files. All values are read once at start-up into a
//! [`Config`] which is then shared by the server; nothing reads the environment
//! while requests are being served.
//!
//! The configuration system follows a hierarchical approach:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{utils, warning};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:3001";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SESSION_MAX_AGE_SECS: i64 = 24 * 60 * 60;
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

/// Loads environment variables from a `.env` file in the local data directory.
///
/// Creates the directory structure if it doesn't exist and loads variables from
/// `spotiproxy/.env` below the platform-specific local data directory:
/// - Linux: `~/.local/share/spotiproxy/.env`
/// - macOS: `~/Library/Application Support/spotiproxy/.env`
/// - Windows: `%LOCALAPPDATA%/spotiproxy/.env`
///
/// Variables that are already set in the process environment win over the
/// file. A missing file is reported as an error so the caller can decide
/// whether the process environment alone is good enough.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("spotiproxy/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    dotenv::from_path(&path).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(())
}

/// Runtime configuration of the proxy.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP listener binds to, e.g. `127.0.0.1:3001`.
    pub server_addr: String,
    pub client_id: String,
    pub client_secret: String,
    /// Must match the redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Base URL of the front-end; login redirects go to `{app_url}/`.
    pub app_url: String,
    /// Secret the session cookie signing key is derived from.
    pub session_secret: String,
    pub session_max_age_secs: i64,
    pub secure_cookies: bool,
    pub upstream_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server_addr: DEFAULT_SERVER_ADDRESS.to_string(),
            client_id: String::new(),
            client_secret: String::new(),
            redirect_uri: String::new(),
            auth_url: DEFAULT_AUTH_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            app_url: String::new(),
            session_secret: utils::generate_secret(64),
            session_max_age_secs: DEFAULT_SESSION_MAX_AGE_SECS,
            secure_cookies: false,
            upstream_timeout_secs: DEFAULT_UPSTREAM_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Builds the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Fails if `SPOTIFY_CLIENT_ID`, `SPOTIFY_CLIENT_SECRET` or
    /// `SPOTIFY_REDIRECT_URI` is missing, or if a numeric or boolean variable
    /// cannot be parsed.
    ///
    /// # Example
    ///
    /// ```
    /// let cfg = Config::from_env()?;
    /// println!("binding {}", cfg.server_addr);
    /// ```
    pub fn from_env() -> Result<Self, String> {
        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                warning!(
                    "SESSION_SECRET is not set, generating a random one. Sessions will not survive a restart."
                );
                utils::generate_secret(64)
            }
        };

        Ok(Config {
            server_addr: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            client_id: required("SPOTIFY_CLIENT_ID")?,
            client_secret: required("SPOTIFY_CLIENT_SECRET")?,
            redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
            auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_AUTH_URL),
            token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_TOKEN_URL),
            api_url: optional("SPOTIFY_API_URL", DEFAULT_API_URL),
            app_url: optional("APP_URL", ""),
            session_secret,
            session_max_age_secs: parsed("SESSION_MAX_AGE_SECS", DEFAULT_SESSION_MAX_AGE_SECS)?,
            secure_cookies: parsed("COOKIE_SECURE", false)?,
            upstream_timeout_secs: parsed("UPSTREAM_TIMEOUT_SECS", DEFAULT_UPSTREAM_TIMEOUT_SECS)?,
        })
    }

    /// Where a visitor lands after a successful login.
    pub fn app_root(&self) -> String {
        format!("{}/", self.app_url.trim_end_matches('/'))
    }

    /// Where a visitor lands after a failed login, tagged with `reason`.
    pub fn login_error_url(&self, reason: &str) -> String {
        format!(
            "{}/login?error={}",
            self.app_url.trim_end_matches('/'),
            reason
        )
    }
}

fn required(name: &str) -> Result<String, String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => Ok(value),
        _ => Err(format!("{} must be set", name)),
    }
}

fn optional(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(value) if !value.is_empty() => value
            .parse::<T>()
            .map_err(|_| format!("{} has an invalid value: {}", name, value)),
        _ => Ok(default),
    }
}
