use std::sync::Arc;

use axum::{Extension, response::Response};

use crate::{
    api::{AppState, found},
    info,
    spotify::auth,
};

/// `GET /login`: sends the user agent to Spotify's consent page.
pub async fn login(Extension(state): Extension<Arc<AppState>>) -> Response {
    info!("Redirecting to Spotify authorization");
    found(&auth::authorize_url(&state.config))
}
