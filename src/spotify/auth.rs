use reqwest::{Client, Url};

use crate::{config::Config, error::ApiError, types::TokenResponse};

/// Permissions requested at login.
pub const SCOPES: [&str; 8] = [
    "user-read-private",
    "user-read-email",
    "user-read-recently-played",
    "user-top-read",
    "playlist-read-private",
    "playlist-read-collaborative",
    "user-library-read",
    "user-follow-read",
];

/// Builds the Spotify authorization URL a visitor is redirected to at login.
///
/// The URL carries the client id, the registered redirect URI and the fixed
/// [`SCOPES`] set, and asks Spotify to always show the consent dialog so a
/// visitor can switch accounts after logging out.
///
/// # Errors
///
/// Only fails when the configured authorize URL is not a valid URL.
///
/// # Example
///
/// ```
/// let url = generate_auth_url(&config)?;
/// // https://accounts.spotify.com/authorize?client_id=...&response_type=code&...
/// ```
pub fn generate_auth_url(config: &Config) -> Result<String, ApiError> {
    let scope = SCOPES.join(" ");
    let url = Url::parse_with_params(
        &config.auth_url,
        &[
            ("client_id", config.client_id.as_str()),
            ("response_type", "code"),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
            ("show_dialog", "true"),
        ],
    )
    .map_err(|e| ApiError::Internal(format!("invalid authorize url {}: {}", config.auth_url, e)))?;

    Ok(url.into())
}

/// Exchanges an authorization code for an access/refresh token pair.
///
/// Completes the login started by [`generate_auth_url`]. The code is
/// single-use and short-lived, so the callback handler calls this right away.
///
/// # Errors
///
/// - `ApiError::UpstreamAuth` when Spotify answers with a non-2xx status
///   (unknown, expired or already used code, wrong client credentials)
/// - `ApiError::Upstream` when the token endpoint cannot be reached or the
///   body is not a token response
pub async fn exchange_code_for_tokens(
    config: &Config,
    http: &Client,
    code: &str,
) -> Result<TokenResponse, ApiError> {
    request_token(
        config,
        http,
        &[
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
        ],
    )
    .await
}

/// Obtains a fresh access token with a refresh token.
///
/// Spotify may or may not rotate the refresh token; when the response has no
/// `refresh_token` the caller keeps using the old one (see
/// [`crate::session::Session::apply_refresh`]).
///
/// # Errors
///
/// Same as [`exchange_code_for_tokens`]; a revoked or expired refresh token
/// yields `ApiError::UpstreamAuth`.
pub async fn refresh_access_token(
    config: &Config,
    http: &Client,
    refresh_token: &str,
) -> Result<TokenResponse, ApiError> {
    request_token(
        config,
        http,
        &[
            ("grant_type", "refresh_token"),
            ("refresh_token", refresh_token),
        ],
    )
    .await
}

async fn request_token(
    config: &Config,
    http: &Client,
    form: &[(&str, &str)],
) -> Result<TokenResponse, ApiError> {
    let response = http
        .post(&config.token_url)
        .basic_auth(&config.client_id, Some(&config.client_secret))
        .form(form)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ApiError::UpstreamAuth(format!("{} => {}", status, body)));
    }

    Ok(response.json::<TokenResponse>().await?)
}
