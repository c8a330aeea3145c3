use std::sync::Arc;

use axum::{
    Extension,
    extract::Query,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    api::{AppState, found},
    info,
    spotify::auth,
    success,
    types::CallbackParams,
    utils, warning,
};

/// `GET /callback`: completes the authorization-code flow.
///
/// Exchanges `code` for a token pair and redirects to the client application
/// with `access_token` and `refresh_token` in the query string. Tokens in a
/// URL end up in browser history; that trade-off is accepted here.
///
/// Without a `code` the provider's `error` (or `missing_code`) is forwarded
/// to the client application instead, and no exchange is attempted.
///
/// A failed exchange answers `500` with a generic body. The upstream error
/// is logged, never echoed.
pub async fn callback(
    Query(params): Query<CallbackParams>,
    Extension(state): Extension<Arc<AppState>>,
) -> Response {
    let client_app_url = &state.config.client_app_url;

    let Some(code) = params.code.filter(|c| !c.is_empty()) else {
        let error = params.error.unwrap_or_else(|| "missing_code".to_string());
        warning!("Authorization callback without code: {}", error);
        return found(&utils::with_query(client_app_url, &[("error", &error)]));
    };

    info!("Exchanging authorization code");
    match auth::exchange_code(&state.http, &state.config, &code).await {
        Ok(token) => {
            success!("Authorization code exchanged");
            found(&utils::with_query(
                client_app_url,
                &[
                    ("access_token", &token.access_token),
                    ("refresh_token", &token.refresh_token),
                ],
            ))
        }
        Err(e) => {
            warning!("Token exchange failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error during authentication",
            )
                .into_response()
        }
    }
}
