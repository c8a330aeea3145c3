use reqwest::StatusCode;

use crate::{
    spotify::{ApiError, SpotifyClient, check_status, read_json},
    types::{Device, DevicesResponse, PlayRequest, PlaybackState},
};

impl SpotifyClient {
    pub async fn devices(&self, token: &str) -> Result<Vec<Device>, ApiError> {
        let url = self.endpoint(&["me", "player", "devices"])?;
        let response = self.http().get(url).bearer_auth(token).send().await?;
        let res = read_json::<DevicesResponse>(response).await?;
        Ok(res.devices)
    }

    /// Current playback state, or `None` when nothing is active.
    ///
    /// Spotify answers `204 No Content` when no device is playing; an empty
    /// 200 body is treated the same way.
    pub async fn playback_state(&self, token: &str) -> Result<Option<PlaybackState>, ApiError> {
        let url = self.endpoint(&["me", "player"])?;
        let response = self.http().get(url).bearer_auth(token).send().await?;
        let response = check_status(response).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(None);
        }

        Ok(serde_json::from_str::<Option<PlaybackState>>(&text)?)
    }

    /// Starts playing `uri` on `device_id`, replacing the current queue.
    pub async fn play(&self, token: &str, device_id: &str, uri: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["me", "player", "play"])?;
        let response = self
            .http()
            .put(url)
            .bearer_auth(token)
            .query(&[("device_id", device_id)])
            .json(&PlayRequest {
                uris: vec![uri.to_string()],
            })
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }

    /// Appends `uri` to the queue of `device_id`.
    pub async fn queue(&self, token: &str, device_id: &str, uri: &str) -> Result<(), ApiError> {
        let url = self.endpoint(&["me", "player", "queue"])?;
        let response = self
            .http()
            .post(url)
            .bearer_auth(token)
            .query(&[("uri", uri), ("device_id", device_id)])
            .send()
            .await?;

        check_status(response).await?;
        Ok(())
    }
}
