use crate::{
    spotify::{ApiError, SpotifyClient, read_json},
    types::{RecommendationsResponse, Track},
};

impl SpotifyClient {
    /// Retrieves one page of recommendations seeded by a single genre.
    ///
    /// # Arguments
    ///
    /// * `token` - Bearer token of the user
    /// * `seed_genre` - Genre in Spotify's seed vocabulary (e.g. `hip-hop`)
    /// * `limit` - Page size
    /// * `offset` - Position of the page
    ///
    /// The page may be shorter than `limit`; callers decide what that means.
    pub async fn recommendations(
        &self,
        token: &str,
        seed_genre: &str,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<Track>, ApiError> {
        let url = self.endpoint(&["recommendations"])?;
        let response = self
            .http()
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("seed_genres", seed_genre.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ])
            .send()
            .await?;

        let page = read_json::<RecommendationsResponse>(response).await?;
        Ok(page.tracks)
    }
}
