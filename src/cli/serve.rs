use crate::{config::Config, error, server::start_api_server};

/// Runs the backend. Exits before binding when the client credentials are
/// missing.
pub async fn serve() {
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => error!("Cannot start server: {}", e),
    };

    if let Err(e) = start_api_server(config).await {
        error!("Server stopped: {}", e);
    }
}
