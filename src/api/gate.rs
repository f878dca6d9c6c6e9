use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Key, SignedCookieJar};

use crate::{
    error::ApiError, server::AppState, session::Session, spotify::SpotifyClient, utils,
};

/// Every `/api` handler takes a `SpotifyClient` argument. Extracting it runs
/// the session gate, so a handler body only executes for a visitor with a
/// present, unexpired access token, and the client it receives is bound to
/// that visitor's token alone.
impl FromRequestParts<AppState> for SpotifyClient {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = SignedCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        let now = utils::now_millis();
        let session = Session::from_jar(&jar, &state.config, now);
        let token = session.authorize(now)?;

        Ok(SpotifyClient::new(
            state.http.clone(),
            state.config.api_url.clone(),
            token,
        ))
    }
}
