use reqwest::{Client, Method, RequestBuilder, header::CONTENT_LENGTH};
use serde_json::Value;

use crate::{error::ApiError, types::SearchRequest};

/// Spotify Web API client bound to one visitor's access token.
///
/// A new value is built for every inbound request from the visitor's session,
/// so concurrent requests never share authorization state. The underlying
/// `reqwest::Client` is shared and only contributes the connection pool and
/// the request timeout.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    base_url: String,
    token: String,
}

impl SpotifyClient {
    pub fn new(http: Client, base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        SpotifyClient {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// `GET /me` - profile of the logged-in user.
    pub async fn current_user(&self) -> Result<Value, ApiError> {
        self.get_json("/me", &[]).await
    }

    /// `GET /search` - catalog search across one or more item types.
    ///
    /// Spotify's paging fields (`total`, `limit`, `offset`, `next`, ...) are
    /// passed back untouched.
    pub async fn search(&self, request: &SearchRequest) -> Result<Value, ApiError> {
        self.get_json(
            "/search",
            &[
                ("q", request.query.clone()),
                ("type", request.types.join(",")),
                ("limit", request.limit.to_string()),
                ("offset", request.offset.to_string()),
            ],
        )
        .await
    }

    pub async fn track(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/tracks/{}", id), &[]).await
    }

    pub async fn album(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/albums/{}", id), &[]).await
    }

    pub async fn artist(&self, id: &str) -> Result<Value, ApiError> {
        self.get_json(&format!("/artists/{}", id), &[]).await
    }

    pub async fn recently_played(&self, limit: u32) -> Result<Value, ApiError> {
        self.get_json("/me/player/recently-played", &[("limit", limit.to_string())])
            .await
    }

    pub async fn top_tracks(&self, limit: u32) -> Result<Value, ApiError> {
        self.get_json("/me/top/tracks", &[("limit", limit.to_string())])
            .await
    }

    pub async fn recommendations(
        &self,
        seed_tracks: &[String],
        limit: u32,
    ) -> Result<Value, ApiError> {
        self.get_json(
            "/recommendations",
            &[
                ("seed_tracks", seed_tracks.join(",")),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    /// Whether the track is in the user's library.
    ///
    /// Spotify answers with one boolean per requested id; an empty array is
    /// read as "not saved".
    pub async fn check_saved_track(&self, id: &str) -> Result<bool, ApiError> {
        let response = self
            .send(self.request(Method::GET, "/me/tracks/contains", &[("ids", id.to_string())]))
            .await?;
        let saved = response.json::<Vec<bool>>().await?;
        Ok(saved.first().copied().unwrap_or(false))
    }

    pub async fn save_track(&self, id: &str) -> Result<(), ApiError> {
        let request = self
            .request(Method::PUT, "/me/tracks", &[("ids", id.to_string())])
            .header(CONTENT_LENGTH, "0");
        self.send(request).await?;
        Ok(())
    }

    pub async fn remove_track(&self, id: &str) -> Result<(), ApiError> {
        let request = self
            .request(Method::DELETE, "/me/tracks", &[("ids", id.to_string())])
            .header(CONTENT_LENGTH, "0");
        self.send(request).await?;
        Ok(())
    }

    async fn get_json(&self, path: &str, query: &[(&str, String)]) -> Result<Value, ApiError> {
        let response = self.send(self.request(Method::GET, path, query)).await?;
        Ok(response.json::<Value>().await?)
    }

    fn request(&self, method: Method, path: &str, query: &[(&str, String)]) -> RequestBuilder {
        let mut builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path))
            .bearer_auth(&self.token);
        if !query.is_empty() {
            builder = builder.query(query);
        }
        builder
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::Upstream {
                status: Some(status),
                message: body,
            });
        }
        Ok(response)
    }
}
