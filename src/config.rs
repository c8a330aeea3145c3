//! Configuration management for genrepick.
//!
//! Configuration comes from environment variables, optionally seeded from
//! `.env` files:
//! 1. Environment variables (highest priority)
//! 2. `.env` in the local data directory (`genrepick/.env`)
//! 3. `.env` in the working directory
//! 4. Application defaults (everything except the client credentials)
//!
//! Values are read once at startup into [`Config`] (backend) or
//! [`ClientConfig`] (the `curate` front end) and never change afterwards.

use std::{
    env,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    path::PathBuf,
};

use url::{Host, Url};

pub const CLIENT_ID_VAR: &str = "SPOTIFY_API_AUTH_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SPOTIFY_API_AUTH_CLIENT_SECRET";
pub const REDIRECT_URI_VAR: &str = "SPOTIFY_API_REDIRECT_URI";
pub const SERVER_PORT_VAR: &str = "SERVER_PORT";
pub const CLIENT_APP_URL_VAR: &str = "CLIENT_APP_URL";
pub const BACKEND_URL_VAR: &str = "BACKEND_URL";
pub const AUTH_URL_VAR: &str = "SPOTIFY_API_AUTH_URL";
pub const TOKEN_URL_VAR: &str = "SPOTIFY_API_TOKEN_URL";
pub const API_URL_VAR: &str = "SPOTIFY_API_URL";

pub const DEFAULT_REDIRECT_URI: &str = "http://localhost:8888/callback";
pub const DEFAULT_SERVER_PORT: u16 = 8888;
pub const DEFAULT_CLIENT_APP_URL: &str = "http://localhost:3000";
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8888";
pub const DEFAULT_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_API_URL: &str = "https://api.spotify.com/v1";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{0} is invalid: {1}")]
    Invalid(&'static str, String),
}

/// Backend configuration: confidential client credentials plus the endpoints
/// the token exchange and the playlist proxy talk to.
#[derive(Debug, Clone)]
pub struct Config {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_uri: String,
    pub port: u16,
    pub client_app_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
}

impl Config {
    /// Reads the backend configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when the client id or secret is absent
    /// or empty, and [`ConfigError::Invalid`] for an unparsable port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let client_id = required(&lookup, CLIENT_ID_VAR)?;
        let client_secret = required(&lookup, CLIENT_SECRET_VAR)?;

        let port = match optional(&lookup, SERVER_PORT_VAR) {
            Some(raw) => raw
                .parse::<u16>()
                .map_err(|e| ConfigError::Invalid(SERVER_PORT_VAR, e.to_string()))?,
            None => DEFAULT_SERVER_PORT,
        };

        Ok(Self {
            client_id,
            client_secret,
            redirect_uri: or_default(&lookup, REDIRECT_URI_VAR, DEFAULT_REDIRECT_URI),
            port,
            client_app_url: or_default(&lookup, CLIENT_APP_URL_VAR, DEFAULT_CLIENT_APP_URL),
            auth_url: or_default(&lookup, AUTH_URL_VAR, DEFAULT_AUTH_URL),
            token_url: or_default(&lookup, TOKEN_URL_VAR, DEFAULT_TOKEN_URL),
            api_url: or_default(&lookup, API_URL_VAR, DEFAULT_API_URL),
        })
    }

    pub fn listen_addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Configuration of the `curate` front end. Needs no credentials: it only
/// ever holds the user's access token.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub backend_url: String,
    pub api_url: String,
    pub client_app_url: String,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            backend_url: or_default(&lookup, BACKEND_URL_VAR, DEFAULT_BACKEND_URL),
            api_url: or_default(&lookup, API_URL_VAR, DEFAULT_API_URL),
            client_app_url: or_default(&lookup, CLIENT_APP_URL_VAR, DEFAULT_CLIENT_APP_URL),
        }
    }

    /// The socket address the token redirect lands on, derived from the
    /// client application URL.
    ///
    /// # Errors
    ///
    /// Fails when the URL does not parse or its host is neither `localhost`
    /// nor an IP literal.
    pub fn redirect_listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let invalid = |reason: String| ConfigError::Invalid(CLIENT_APP_URL_VAR, reason);

        let url = Url::parse(&self.client_app_url).map_err(|e| invalid(e.to_string()))?;
        let port = url
            .port_or_known_default()
            .ok_or_else(|| invalid("no port".to_string()))?;
        let ip: IpAddr = match url.host() {
            Some(Host::Domain("localhost")) => IpAddr::V4(Ipv4Addr::LOCALHOST),
            Some(Host::Ipv4(ip)) => IpAddr::V4(ip),
            Some(Host::Ipv6(ip)) => IpAddr::V6(ip),
            Some(Host::Domain(other)) => {
                return Err(invalid(format!("cannot listen on remote host {other}")));
            }
            None => return Err(invalid("no host".to_string())),
        };

        Ok(SocketAddr::new(ip, port))
    }
}

/// Loads environment variables from `.env` files.
///
/// Looks in the platform-specific local data directory first
/// (`~/.local/share/genrepick/.env` on Linux), creating the directory when
/// needed, then in the working directory. Both files are optional; variables
/// already present in the environment are never overwritten.
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("genrepick/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

fn optional<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).ok_or(ConfigError::Missing(key))
}

fn or_default<F>(lookup: &F, key: &str, default: &str) -> String
where
    F: Fn(&str) -> Option<String>,
{
    optional(lookup, key).unwrap_or_else(|| default.to_string())
}
