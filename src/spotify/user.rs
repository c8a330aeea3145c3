use crate::{
    spotify::{ApiError, SpotifyClient, read_json},
    types::UserProfile,
};

impl SpotifyClient {
    /// Profile of the user the token belongs to (`GET /me`).
    pub async fn current_user(&self, token: &str) -> Result<UserProfile, ApiError> {
        let url = self.endpoint(&["me"])?;
        let response = self.http().get(url).bearer_auth(token).send().await?;
        read_json::<UserProfile>(response).await
    }
}
