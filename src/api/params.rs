//! Boundary validation for `/api` query and path parameters.
//!
//! Everything here runs before an upstream call is made; a parameter that
//! does not pass is answered with `400` and never reaches Spotify.

use serde::Deserialize;

use crate::{error::ApiError, types::SearchRequest, utils};

pub const DEFAULT_LIMIT: u32 = 20;
pub const MAX_LIMIT: u32 = 50;
pub const MAX_RECOMMENDATION_LIMIT: u32 = 100;
pub const MAX_SEED_TRACKS: usize = 5;
pub const DEFAULT_SEARCH_TYPES: [&str; 3] = ["track", "album", "artist"];
pub const SEARCH_TYPES: [&str; 7] = [
    "album",
    "artist",
    "playlist",
    "track",
    "show",
    "episode",
    "audiobook",
];

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RecommendationParams {
    pub seed_tracks: Option<String>,
    pub limit: Option<String>,
}

impl SearchParams {
    pub fn validate(&self) -> Result<SearchRequest, ApiError> {
        let query = self.q.as_deref().map(str::trim).unwrap_or_default();
        if query.is_empty() {
            return Err(ApiError::Validation("Search query is required".to_string()));
        }

        let types = match self.kind.as_deref() {
            Some(kind) if !kind.trim().is_empty() => parse_search_types(kind)?,
            _ => DEFAULT_SEARCH_TYPES.iter().map(|t| t.to_string()).collect(),
        };

        Ok(SearchRequest {
            query: query.to_string(),
            types,
            limit: parse_number(self.limit.as_deref(), "limit", DEFAULT_LIMIT, 1, MAX_LIMIT)?,
            offset: parse_number(self.offset.as_deref(), "offset", 0, 0, u32::MAX)?,
        })
    }
}

impl LimitParams {
    pub fn validate(&self) -> Result<u32, ApiError> {
        parse_number(self.limit.as_deref(), "limit", DEFAULT_LIMIT, 1, MAX_LIMIT)
    }
}

impl RecommendationParams {
    pub fn validate(&self) -> Result<(Vec<String>, u32), ApiError> {
        let raw = self.seed_tracks.as_deref().unwrap_or_default();
        let seeds: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();

        if seeds.is_empty() {
            return Err(ApiError::Validation(
                "seed_tracks parameter is required".to_string(),
            ));
        }
        if seeds.len() > MAX_SEED_TRACKS {
            return Err(ApiError::Validation(format!(
                "at most {} seed_tracks are allowed",
                MAX_SEED_TRACKS
            )));
        }
        if let Some(bad) = seeds.iter().find(|s| !utils::is_spotify_id(s)) {
            return Err(ApiError::Validation(format!("Invalid seed track: {}", bad)));
        }

        let limit = parse_number(
            self.limit.as_deref(),
            "limit",
            DEFAULT_LIMIT,
            1,
            MAX_RECOMMENDATION_LIMIT,
        )?;
        Ok((seeds, limit))
    }
}

/// Checks a path id. `kind` names the resource in the error message.
pub fn validate_id(id: &str, kind: &str) -> Result<(), ApiError> {
    if utils::is_spotify_id(id) {
        Ok(())
    } else {
        Err(ApiError::Validation(format!("Invalid {} ID", kind)))
    }
}

fn parse_search_types(raw: &str) -> Result<Vec<String>, ApiError> {
    let mut types = Vec::new();
    for kind in raw.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !SEARCH_TYPES.contains(&kind) {
            return Err(ApiError::Validation(format!("Invalid search type: {}", kind)));
        }
        if !types.iter().any(|t: &String| t == kind) {
            types.push(kind.to_string());
        }
    }
    if types.is_empty() {
        return Err(ApiError::Validation("Invalid search type".to_string()));
    }
    Ok(types)
}

fn parse_number(
    raw: Option<&str>,
    name: &str,
    default: u32,
    min: u32,
    max: u32,
) -> Result<u32, ApiError> {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(default);
    };

    match raw.parse::<u32>() {
        Ok(value) if (min..=max).contains(&value) => Ok(value),
        _ => Err(ApiError::Validation(format!(
            "{} must be a number between {} and {}",
            name, min, max
        ))),
    }
}
