use axum::{
    Json,
    extract::{Query, State},
    response::Redirect,
};
use axum_extra::extract::cookie::SignedCookieJar;
use serde::Deserialize;

use crate::{
    error::ApiError,
    server::AppState,
    session::Session,
    spotify::{self, SpotifyClient},
    success,
    types::{AuthStatus, MessageResponse, RefreshResponse},
    utils, warning,
};

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

/// `GET /auth/login` - sends the visitor to Spotify's consent page.
pub async fn login(State(state): State<AppState>) -> Result<Redirect, ApiError> {
    let url = spotify::auth::generate_auth_url(&state.config)?;
    Ok(Redirect::to(&url))
}

/// `GET /auth/callback` - where Spotify sends the visitor back.
///
/// On success the code is exchanged for tokens, the profile id is looked up
/// with the new access token, the session cookie is written and the visitor
/// lands on the app root. Every failure ends on the login page with an
/// `error` query parameter instead of an HTTP error, since the visitor is
/// mid-navigation in a browser:
///
/// - `access_denied` - Spotify reported an error (e.g. the user declined)
/// - `invalid_code` - no code in the callback
/// - `auth_failed` - code exchange or profile lookup failed
pub async fn callback(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Query(params): Query<CallbackParams>,
) -> (SignedCookieJar, Redirect) {
    if let Some(error) = params.error {
        warning!("Authorization was denied by Spotify: {}", error);
        return (jar, Redirect::to(&state.config.login_error_url("access_denied")));
    }

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        warning!("Authorization callback without a code");
        return (jar, Redirect::to(&state.config.login_error_url("invalid_code")));
    };

    match establish_session(&state, &code).await {
        Ok(session) => {
            success!(
                "Session established for user {}",
                session.user_id.as_deref().unwrap_or("<unknown>")
            );
            let jar = session.store(jar, &state.config);
            (jar, Redirect::to(&state.config.app_root()))
        }
        Err(e) => {
            warning!("Auth callback failed: {}", e);
            (jar, Redirect::to(&state.config.login_error_url("auth_failed")))
        }
    }
}

async fn establish_session(state: &AppState, code: &str) -> Result<Session, ApiError> {
    let tokens = spotify::auth::exchange_code_for_tokens(&state.config, &state.http, code).await?;
    let mut session = Session::from_tokens(&tokens, utils::now_millis());

    let client = SpotifyClient::new(
        state.http.clone(),
        state.config.api_url.clone(),
        tokens.access_token.clone(),
    );
    let profile = client.current_user().await?;
    session.user_id = profile["id"].as_str().map(String::from);

    Ok(session)
}

/// `GET /auth/refresh` - trades the session's refresh token for a new
/// access token and rewrites the cookie.
pub async fn refresh(
    State(state): State<AppState>,
    jar: SignedCookieJar,
) -> Result<(SignedCookieJar, Json<RefreshResponse>), ApiError> {
    let mut session = Session::from_jar(&jar, &state.config, utils::now_millis());
    let Some(refresh_token) = session.refresh_token.clone() else {
        return Err(ApiError::NoRefreshToken);
    };

    let tokens =
        spotify::auth::refresh_access_token(&state.config, &state.http, &refresh_token).await?;
    session.apply_refresh(&tokens, utils::now_millis());
    success!("Access token refreshed");

    let jar = session.store(jar, &state.config);
    Ok((
        jar,
        Json(RefreshResponse {
            access_token: tokens.access_token,
            expires_in: tokens.expires_in,
        }),
    ))
}

/// `GET /auth/logout` - drops the session cookie.
pub async fn logout(jar: SignedCookieJar) -> (SignedCookieJar, Json<MessageResponse>) {
    (
        Session::clear(jar),
        Json(MessageResponse {
            message: "Logged out successfully".to_string(),
        }),
    )
}

/// `GET /auth/status` - polled by the front-end to learn whether the visitor
/// is logged in.
pub async fn status(State(state): State<AppState>, jar: SignedCookieJar) -> Json<AuthStatus> {
    let session = Session::from_jar(&jar, &state.config, utils::now_millis());
    Json(session.status())
}
