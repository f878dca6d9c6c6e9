//! `/api` pass-through handlers.
//!
//! One handler per Spotify resource. Each validates its parameters, makes one
//! call through the visitor's [`SpotifyClient`] and returns Spotify's JSON
//! unchanged.

use axum::{
    Json,
    extract::{Path, Query},
};
use serde_json::Value;

use crate::{
    error::ApiError,
    spotify::SpotifyClient,
    types::{MessageResponse, SavedResponse},
};

use super::params::{self, LimitParams, RecommendationParams, SearchParams};

pub async fn me(client: SpotifyClient) -> Result<Json<Value>, ApiError> {
    Ok(Json(client.current_user().await?))
}

pub async fn search(
    client: SpotifyClient,
    Query(query): Query<SearchParams>,
) -> Result<Json<Value>, ApiError> {
    let request = query.validate()?;
    Ok(Json(client.search(&request).await?))
}

pub async fn track(
    client: SpotifyClient,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    params::validate_id(&id, "track")?;
    Ok(Json(client.track(&id).await?))
}

pub async fn album(
    client: SpotifyClient,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    params::validate_id(&id, "album")?;
    Ok(Json(client.album(&id).await?))
}

pub async fn artist(
    client: SpotifyClient,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    params::validate_id(&id, "artist")?;
    Ok(Json(client.artist(&id).await?))
}

pub async fn recently_played(
    client: SpotifyClient,
    Query(query): Query<LimitParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = query.validate()?;
    Ok(Json(client.recently_played(limit).await?))
}

pub async fn top_tracks(
    client: SpotifyClient,
    Query(query): Query<LimitParams>,
) -> Result<Json<Value>, ApiError> {
    let limit = query.validate()?;
    Ok(Json(client.top_tracks(limit).await?))
}

pub async fn recommendations(
    client: SpotifyClient,
    Query(query): Query<RecommendationParams>,
) -> Result<Json<Value>, ApiError> {
    let (seeds, limit) = query.validate()?;
    Ok(Json(client.recommendations(&seeds, limit).await?))
}

pub async fn check_saved(
    client: SpotifyClient,
    Path(id): Path<String>,
) -> Result<Json<SavedResponse>, ApiError> {
    params::validate_id(&id, "track")?;
    let saved = client.check_saved_track(&id).await?;
    Ok(Json(SavedResponse { saved }))
}

pub async fn save_track(
    client: SpotifyClient,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    params::validate_id(&id, "track")?;
    client.save_track(&id).await?;
    Ok(Json(MessageResponse {
        message: "Track saved successfully".to_string(),
    }))
}

pub async fn remove_track(
    client: SpotifyClient,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    params::validate_id(&id, "track")?;
    client.remove_track(&id).await?;
    Ok(Json(MessageResponse {
        message: "Track removed successfully".to_string(),
    }))
}
