#![allow(dead_code)]

use std::{collections::HashMap, sync::Arc};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri, header::AUTHORIZATION},
    response::{IntoResponse, Response},
};
use genrepick::{
    api::AppState,
    config::Config,
    server::router,
    session::{BackendClient, Session},
    spotify::SpotifyClient,
    types::{RedirectParams, Track},
};
use reqwest::{Client, redirect::Policy};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};

/// One request received by the stand-in.
#[derive(Debug, Clone)]
pub struct Call {
    pub method: String,
    pub path: String,
    pub query: HashMap<String, String>,
    pub authorization: Option<String>,
    pub body: String,
}

impl Call {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap_or(Value::Null)
    }
}

#[derive(Default)]
struct MockState {
    routes: HashMap<(String, String), (u16, Value)>,
    calls: Vec<Call>,
}

/// Scripted stand-in for the Spotify accounts service and Web API.
///
/// Unscripted routes answer `404`. A `204` route answers with an empty body.
pub struct MockSpotify {
    base_url: String,
    state: Arc<Mutex<MockState>>,
}

impl MockSpotify {
    pub async fn start() -> Self {
        let state = Arc::new(Mutex::new(MockState::default()));
        let app = Router::new()
            .fallback(handle)
            .with_state(Arc::clone(&state));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub async fn respond(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .lock()
            .await
            .routes
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub async fn calls(&self) -> Vec<Call> {
        self.state.lock().await.calls.clone()
    }

    pub async fn calls_to(&self, method: &str, path: &str) -> Vec<Call> {
        self.calls()
            .await
            .into_iter()
            .filter(|c| c.method == method && c.path == path)
            .collect()
    }

    pub fn api_url(&self) -> String {
        format!("{}/v1", self.base_url)
    }

    pub fn auth_url(&self) -> String {
        format!("{}/authorize", self.base_url)
    }

    pub fn token_url(&self) -> String {
        format!("{}/api/token", self.base_url)
    }

    pub fn config(&self) -> Config {
        Config {
            client_id: "abc".to_string(),
            client_secret: "s3cr3t".to_string(),
            redirect_uri: "http://localhost:8888/callback".to_string(),
            port: 0,
            client_app_url: "http://localhost:3000".to_string(),
            auth_url: self.auth_url(),
            token_url: self.token_url(),
            api_url: self.api_url(),
        }
    }
}

async fn handle(
    State(state): State<Arc<Mutex<MockState>>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let query = url::form_urlencoded::parse(uri.query().unwrap_or("").as_bytes())
        .into_owned()
        .collect();
    let call = Call {
        method: method.to_string(),
        path: uri.path().to_string(),
        query,
        authorization: headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    };

    let mut state = state.lock().await;
    let route = state
        .routes
        .get(&(call.method.clone(), call.path.clone()))
        .cloned();
    state.calls.push(call);

    match route {
        Some((204, _)) => StatusCode::NO_CONTENT.into_response(),
        Some((status, body)) => (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(body),
        )
            .into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({"error": {"status": 404, "message": "Service not found"}})),
        )
            .into_response(),
    }
}

/// Serves the real backend router against `config` and returns its base URL.
pub async fn spawn_backend(config: Config) -> String {
    let app = router(Arc::new(AppState::new(config)));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// HTTP client that reports redirects instead of following them.
pub fn no_redirect_client() -> Client {
    Client::builder().redirect(Policy::none()).build().unwrap()
}

pub fn track_json(id: &str) -> Value {
    json!({
        "id": id,
        "name": format!("Song {id}"),
        "artists": [
            {"id": "ar1", "name": "First Artist"},
            {"id": "ar2", "name": "Second Artist"}
        ],
        "uri": format!("spotify:track:{id}"),
        "external_urls": {"spotify": format!("https://open.spotify.com/track/{id}")}
    })
}

pub fn track(id: &str) -> Track {
    serde_json::from_value(track_json(id)).unwrap()
}

pub fn page(ids: &[&str]) -> Value {
    json!({ "tracks": ids.iter().map(|id| track_json(id)).collect::<Vec<_>>() })
}

/// Session against the stand-in, authenticated as `u1` with token `tok`.
/// `backend_url` is only contacted when saving.
pub async fn logged_in_session(mock: &MockSpotify, backend_url: &str) -> Session {
    mock.respond("GET", "/v1/me", 200, json!({"id": "u1", "display_name": "User One"}))
        .await;

    let mut session = Session::new(
        SpotifyClient::new(mock.api_url()),
        BackendClient::new(Client::new(), backend_url),
    );
    session
        .authenticate(RedirectParams {
            access_token: Some("tok".to_string()),
            refresh_token: Some("ref".to_string()),
            error: None,
        })
        .await;
    assert!(session.is_authenticated());
    assert_eq!(session.user_id(), Some("u1"));
    session
}
