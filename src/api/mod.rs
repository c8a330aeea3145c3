//! # API Module
//!
//! HTTP endpoints of the genrepick backend.
//!
//! ## Endpoints
//!
//! ### Authentication
//!
//! - [`login`] - Redirects the user agent to Spotify's authorization page with
//!   the fixed scope list.
//! - [`callback`] - Exchanges the authorization code for a token pair using the
//!   confidential client credentials, then redirects to the client
//!   application with the tokens in the query string.
//!
//! ### Playlists
//!
//! - [`create_playlist`] - Creates a private playlist for the caller and adds
//!   the given tracks, using the caller's own bearer token.
//!
//! ### Monitoring
//!
//! - [`health`] - Status and version.
//!
//! ## State
//!
//! Handlers share one read-only [`AppState`] through an `Extension`. Nothing
//! is written to it after startup, so requests never coordinate.

mod callback;
mod health;
mod login;
mod playlist;

use axum::{
    http::{StatusCode, header::LOCATION},
    response::{IntoResponse, Response},
};
use reqwest::Client;

pub use callback::callback;
pub use health::health;
pub use login::login;
pub use playlist::{create_playlist, is_valid};

use crate::{config::Config, spotify::SpotifyClient};

pub struct AppState {
    pub config: Config,
    pub http: Client,
    pub spotify: SpotifyClient,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = Client::new();
        let spotify = SpotifyClient::with_client(http.clone(), config.api_url.clone());
        Self {
            config,
            http,
            spotify,
        }
    }
}

/// `302 Found` to `location`.
pub(crate) fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(LOCATION, location.to_string())]).into_response()
}
