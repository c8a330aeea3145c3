use std::{sync::Arc, time::Duration};

use tokio::sync::Mutex;

use crate::{
    config::ClientConfig, error, server::start_redirect_listener, session::BackendClient,
    types::RedirectParams, warning,
};

/// Drives the browser login and returns the redirect parameters.
///
/// 1. Starts a listener on the client application address
/// 2. Opens the backend's `/login` in the default browser
/// 3. Waits for the backend to redirect back with tokens or an error
///
/// Returns `None` on timeout.
pub async fn login(
    config: &ClientConfig,
    backend: &BackendClient,
    open_browser: bool,
) -> Option<RedirectParams> {
    let addr = match config.redirect_listen_addr() {
        Ok(addr) => addr,
        Err(e) => error!("Cannot listen for the login redirect: {}", e),
    };

    let shared_state: Arc<Mutex<Option<RedirectParams>>> = Arc::new(Mutex::new(None));
    let server_state = Arc::clone(&shared_state);
    tokio::spawn(async move {
        if let Err(e) = start_redirect_listener(addr, server_state).await {
            warning!("Redirect listener stopped: {}", e);
        }
    });

    let login_url = backend.login_url();
    if !open_browser || webbrowser::open(&login_url).is_err() {
        warning!(
            "Open the following URL in your browser to log in:\n{}",
            login_url
        );
    }

    wait_for_redirect(shared_state, Duration::from_secs(60)).await
}

/// Polls `shared_state` every 250 ms until the redirect arrives or
/// `max_wait` has passed.
pub async fn wait_for_redirect(
    shared_state: Arc<Mutex<Option<RedirectParams>>>,
    max_wait: Duration,
) -> Option<RedirectParams> {
    use std::time::Instant;

    let start = Instant::now();

    while start.elapsed() < max_wait {
        if let Some(params) = shared_state.lock().await.take() {
            return Some(params);
        }
        tokio::time::sleep(Duration::from_millis(250)).await;
    }

    None
}
