use reqwest::Client;

use crate::{
    spotify::{ApiError, read_json},
    types::{SavePlaylistRequest, SavePlaylistResponse},
};

/// Client for the genrepick backend's playlist proxy.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn login_url(&self) -> String {
        format!("{}/login", self.base_url)
    }

    pub async fn create_playlist(
        &self,
        request: &SavePlaylistRequest,
    ) -> Result<SavePlaylistResponse, ApiError> {
        let response = self
            .http
            .post(format!("{}/create-playlist", self.base_url))
            .json(request)
            .send()
            .await?;

        read_json::<SavePlaylistResponse>(response).await
    }
}
