use crate::{
    spotify::{ApiError, SpotifyClient, read_json},
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse,
    },
};

impl SpotifyClient {
    /// Creates a private playlist owned by `user_id`.
    pub async fn create_playlist(
        &self,
        token: &str,
        user_id: &str,
        name: &str,
    ) -> Result<CreatePlaylistResponse, ApiError> {
        let url = self.endpoint(&["users", user_id, "playlists"])?;
        let body = CreatePlaylistRequest {
            name: name.to_string(),
            public: false,
        };

        let response = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        read_json::<CreatePlaylistResponse>(response).await
    }

    /// Adds all `uris` to the playlist in one request.
    pub async fn add_tracks(
        &self,
        token: &str,
        playlist_id: &str,
        uris: &[String],
    ) -> Result<AddTrackToPlaylistResponse, ApiError> {
        let url = self.endpoint(&["playlists", playlist_id, "tracks"])?;
        let body = AddTrackToPlaylistRequest {
            uris: uris.to_vec(),
        };

        let response = self
            .http()
            .post(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await?;

        read_json::<AddTrackToPlaylistResponse>(response).await
    }
}
