//! # Spotify Integration Module
//!
//! Thin client for the parts of the Spotify Web API and accounts service that
//! genrepick needs. Every call is a single attempt: there is no retry, no
//! rate-limit handling and no token refresh.
//!
//! ## Architecture
//!
//! ```text
//! Backend (api) / Session (session)
//!          ↓
//! Spotify Integration Layer
//!     ├── Authentication (authorize URL, code exchange)
//!     ├── User (profile lookup)
//!     ├── Recommendations (genre seeds, pagination)
//!     ├── Playlist (create, add tracks)
//!     └── Player (devices, state, play, queue)
//!          ↓
//! HTTP Layer (reqwest, JSON)
//! ```
//!
//! ## API Coverage
//!
//! - `GET /me` - Profile of the token owner
//! - `GET /recommendations` - Genre-seeded recommendations
//! - `POST /users/{user_id}/playlists` - Create a playlist
//! - `POST /playlists/{playlist_id}/tracks` - Add tracks to a playlist
//! - `GET /me/player/devices` - Available playback devices
//! - `GET /me/player` - Current playback state
//! - `PUT /me/player/play` - Start playback
//! - `POST /me/player/queue` - Enqueue a track
//! - `POST /api/token` (accounts service) - Authorization-code exchange
//!
//! ## Error Types
//!
//! All calls return [`ApiError`]. Non-2xx responses keep their status and the
//! response body so callers can map them to user messages or surface them
//! for diagnostics.

pub mod auth;
pub mod player;
pub mod playlist;
pub mod recommendations;
pub mod user;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("Spotify API responded with {status}: {body}")]
    Status { status: StatusCode, body: Value },
    #[error(transparent)]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// HTTP status of an upstream rejection, if the call got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Http(e) => e.status(),
            ApiError::Decode(_) | ApiError::Url(_) => None,
        }
    }

    /// Diagnostic payload: the upstream body when there is one, otherwise
    /// the error message.
    pub fn details(&self) -> Value {
        match self {
            ApiError::Status { body, .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }
}

/// Web API client bound to one base URL.
///
/// Holds no credentials; every call takes the bearer token of the user it
/// acts for.
#[derive(Debug, Clone)]
pub struct SpotifyClient {
    http: Client,
    api_url: String,
}

impl SpotifyClient {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    /// Builds `{api_url}/{segments...}`, percent-encoding each segment.
    pub(crate) fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.api_url)?;
        url.path_segments_mut()
            .map_err(|_| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Turns a non-2xx response into [`ApiError::Status`], keeping the body.
pub(crate) async fn check_status(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
    Err(ApiError::Status { status, body })
}

pub(crate) async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    Ok(response.json::<T>().await?)
}
