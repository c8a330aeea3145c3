use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::{Client, header::AUTHORIZATION};

use crate::{
    config::Config,
    spotify::{ApiError, read_json},
    types::Token,
    utils,
};

/// Permissions requested at login. Fixed; never configurable.
pub const SCOPE: &str = "playlist-modify-public playlist-modify-private user-read-playback-state user-modify-playback-state user-read-currently-playing streaming";

/// Builds the authorization URL the user agent is sent to from `/login`.
///
/// # Example
///
/// ```
/// let url = authorize_url(&config);
/// // https://accounts.spotify.com/authorize?response_type=code&client_id=...&scope=...&redirect_uri=...
/// ```
pub fn authorize_url(config: &Config) -> String {
    utils::with_query(
        &config.auth_url,
        &[
            ("response_type", "code"),
            ("client_id", &config.client_id),
            ("scope", SCOPE),
            ("redirect_uri", &config.redirect_uri),
        ],
    )
}

/// Value of the `Authorization` header for the confidential client.
pub fn basic_credentials(client_id: &str, client_secret: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{client_id}:{client_secret}"))
    )
}

/// Exchanges an authorization code for a token pair.
///
/// Posts a form-encoded `authorization_code` grant to the token endpoint,
/// authenticating with HTTP Basic built from the client id and secret.
///
/// # Errors
///
/// - [`ApiError::Http`] on transport failure or an unreadable body
/// - [`ApiError::Status`] when the token endpoint answers non-2xx
pub async fn exchange_code(http: &Client, config: &Config, code: &str) -> Result<Token, ApiError> {
    let response = http
        .post(&config.token_url)
        .header(
            AUTHORIZATION,
            basic_credentials(&config.client_id, &config.client_secret),
        )
        .form(&[
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ])
        .send()
        .await?;

    read_json::<Token>(response).await
}
