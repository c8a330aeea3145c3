use std::{net::SocketAddr, sync::Arc};

use axum::{
    Extension, Router,
    extract::Query,
    response::Html,
    routing::{get, post},
};
use tokio::{net::TcpListener, sync::Mutex};
use tower_http::cors::CorsLayer;

use crate::{Res, api, api::AppState, config::Config, info, types::RedirectParams};

/// Backend routes. CORS is permissive because the client application is
/// served from another origin.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(api::health))
        .route("/login", get(api::login))
        .route("/callback", get(api::callback))
        .route("/create-playlist", post(api::create_playlist))
        .layer(Extension(state))
        .layer(CorsLayer::permissive())
}

/// Binds the backend on the configured port and serves until the process
/// ends.
pub async fn start_api_server(config: Config) -> Res<()> {
    let addr = config.listen_addr();
    let state = Arc::new(AppState::new(config));

    let listener = TcpListener::bind(&addr).await?;
    info!("Server running on http://localhost:{}", addr.port());
    axum::serve(listener, router(state)).await?;
    Ok(())
}

/// Route the backend redirects to after a successful (or failed) login.
/// Stores the query parameters for whoever waits on `shared_state`.
pub fn redirect_router(shared_state: Arc<Mutex<Option<RedirectParams>>>) -> Router {
    Router::new().route(
        "/",
        get(receive_redirect).layer(Extension(shared_state)),
    )
}

/// Listens on the client application address for the token redirect.
pub async fn start_redirect_listener(
    addr: SocketAddr,
    shared_state: Arc<Mutex<Option<RedirectParams>>>,
) -> Res<()> {
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, redirect_router(shared_state)).await?;
    Ok(())
}

async fn receive_redirect(
    Query(params): Query<RedirectParams>,
    Extension(shared_state): Extension<Arc<Mutex<Option<RedirectParams>>>>,
) -> Html<&'static str> {
    let page = if params.error.is_some() {
        "<h4>Login failed.</h4><p>Return to the terminal for details.</p>"
    } else {
        "<h2>Authentication successful.</h2><p>Close this window and return to the terminal.</p>"
    };

    *shared_state.lock().await = Some(params);
    Html(page)
}
