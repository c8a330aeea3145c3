use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::AppState,
    info,
    spotify::ApiError,
    success,
    types::{ErrorResponse, SavePlaylistRequest, SavePlaylistResponse},
    warning,
};

/// `POST /create-playlist`: creates a private playlist and fills it.
///
/// Two dependent upstream calls, each attempted once:
/// 1. create the playlist for `userId`
/// 2. add all `tracks` in one batch
///
/// Invalid input answers `400` before anything goes upstream. If step 2
/// fails the playlist stays behind empty; the response still reports failure
/// and nothing is rolled back.
pub async fn create_playlist(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<SavePlaylistRequest>, JsonRejection>,
) -> Response {
    let request = match body {
        Ok(Json(request)) if is_valid(&request) => request,
        Ok(Json(request)) => {
            warning!(
                "Invalid playlist request: user_id={:?} name={:?} tracks={}",
                request.user_id,
                request.name,
                request.tracks.len()
            );
            return invalid_request();
        }
        Err(rejection) => {
            warning!("Unreadable playlist request: {}", rejection);
            return invalid_request();
        }
    };

    info!(
        "Creating playlist {:?} for {} with {} tracks",
        request.name,
        request.user_id,
        request.tracks.len()
    );

    match save(&state, &request).await {
        Ok(playlist_id) => {
            success!("Playlist {} created", playlist_id);
            Json(SavePlaylistResponse {
                success: true,
                playlist_id,
            })
            .into_response()
        }
        Err(e) => {
            warning!("Failed to create playlist: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create playlist".to_string(),
                    details: Some(e.details()),
                }),
            )
                .into_response()
        }
    }
}

pub fn is_valid(request: &SavePlaylistRequest) -> bool {
    !request.access_token.is_empty()
        && !request.user_id.is_empty()
        && !request.name.is_empty()
        && !request.tracks.is_empty()
}

async fn save(state: &AppState, request: &SavePlaylistRequest) -> Result<String, ApiError> {
    let playlist = state
        .spotify
        .create_playlist(&request.access_token, &request.user_id, &request.name)
        .await?;
    info!("Playlist {} created, adding tracks", playlist.id);

    state
        .spotify
        .add_tracks(&request.access_token, &playlist.id, &request.tracks)
        .await?;

    Ok(playlist.id)
}

fn invalid_request() -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "Invalid request data".to_string(),
            details: None,
        }),
    )
        .into_response()
}
