//! Signed-cookie session store.
//!
//! The proxy keeps no server-side datastore. A visitor's token pair lives in a
//! single cookie whose value is the base64url-encoded JSON of [`Session`],
//! signed with a key derived from the configured secret. A cookie that fails
//! verification, cannot be decoded or is older than the configured maximum
//! age reads back as an empty session.

use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    error::ApiError,
    types::{AuthStatus, TokenResponse},
    utils,
};

pub const SESSION_COOKIE: &str = "spotify_session";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Epoch milliseconds after which the access token is no longer accepted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<i64>,
    /// Epoch milliseconds of the last write; drives the session max age.
    #[serde(default)]
    pub issued_at: i64,
}

impl Session {
    /// A fresh session for a token pair obtained from the code exchange.
    pub fn from_tokens(tokens: &TokenResponse, now: i64) -> Self {
        Session {
            user_id: None,
            access_token: Some(tokens.access_token.clone()),
            refresh_token: tokens.refresh_token.clone(),
            token_expiry: Some(expiry_from(now, tokens.expires_in)),
            issued_at: now,
        }
    }

    /// Applies the result of a refresh grant.
    ///
    /// The expiry always moves; the refresh token is only replaced when
    /// Spotify sent a new one.
    pub fn apply_refresh(&mut self, tokens: &TokenResponse, now: i64) {
        self.access_token = Some(tokens.access_token.clone());
        if let Some(refresh_token) = &tokens.refresh_token {
            self.refresh_token = Some(refresh_token.clone());
        }
        self.token_expiry = Some(expiry_from(now, tokens.expires_in));
        self.issued_at = now;
    }

    /// The gate in front of every proxied call.
    ///
    /// Returns the access token when it is present and `now` is strictly
    /// before the recorded expiry. A token without an expiry counts as
    /// expired.
    pub fn authorize(&self, now: i64) -> Result<&str, ApiError> {
        let token = match self.access_token.as_deref() {
            Some(t) if !t.is_empty() => t,
            _ => return Err(ApiError::AuthRequired),
        };

        match self.token_expiry {
            Some(expiry) if now < expiry => Ok(token),
            _ => Err(ApiError::TokenExpired),
        }
    }

    pub fn status(&self) -> AuthStatus {
        AuthStatus {
            authenticated: self.access_token.is_some() && self.user_id.is_some(),
            user_id: self.user_id.clone(),
            token_expiry: self.token_expiry,
        }
    }

    /// Reads the session from the jar, falling back to an empty one.
    pub fn from_jar(jar: &SignedCookieJar, config: &Config, now: i64) -> Self {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Session::default();
        };

        let session = utils::decode_cookie_value(cookie.value())
            .and_then(|raw| serde_json::from_slice::<Session>(&raw).ok())
            .unwrap_or_default();

        let max_age_ms = config.session_max_age_secs.saturating_mul(1000);
        if now.saturating_sub(session.issued_at) > max_age_ms {
            return Session::default();
        }
        session
    }

    /// Writes the session into the jar, replacing any previous cookie.
    pub fn store(&self, jar: SignedCookieJar, config: &Config) -> SignedCookieJar {
        // serializing a struct of strings and integers cannot fail
        let raw = serde_json::to_vec(self).unwrap_or_default();
        let cookie = Cookie::build((SESSION_COOKIE, utils::encode_cookie_value(&raw)))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(config.secure_cookies);
        jar.add(cookie)
    }

    pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
        jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
    }
}

/// Builds the cookie signing key from the configured secret.
pub fn signing_key(config: &Config) -> Key {
    Key::from(utils::derive_key_material(&config.session_secret).as_slice())
}

fn expiry_from(now: i64, expires_in: i64) -> i64 {
    now.saturating_add(expires_in.saturating_mul(1000))
}
