//! # Session Module
//!
//! Client-side curation state. A [`Session`] holds the user's access token and
//! account id, the candidate tracks of the current recommendation page, the
//! kept tracks, the per-genre pagination offsets and the last user-facing
//! error. It talks to Spotify directly with the user's token and to the
//! genrepick backend only to save a playlist.
//!
//! ## Invariants
//!
//! - A track is never in the candidate list and the kept list at once.
//! - A genre's offset only grows, by [`PAGE_SIZE`] per successful fetch,
//!   until [`Session::reset_selections`].
//! - A playlist is only submitted with a non-blank name and at least one
//!   kept track.
//!
//! Errors never end a session: every failure is turned into a message in
//! [`Session::error`] and the user may retry any operation.

mod backend;
mod genre;
mod playback;

use std::collections::HashMap;

pub use backend::BackendClient;
pub use genre::{GENRES, genre_seed};
pub use playback::{
    MSG_NO_ACTIVE_DEVICE, MSG_NO_DEVICES, MSG_PLAYBACK_FAILED, MSG_PREMIUM_REQUIRED,
    PlaybackOutcome, pick_device, playback_error_message,
};

use crate::{
    spotify::SpotifyClient,
    types::{RedirectParams, SavePlaylistRequest, Track},
    warning,
};

/// Number of recommendations requested per fetch, and the step by which a
/// genre's offset advances.
pub const PAGE_SIZE: u32 = 10;

pub const MSG_PROFILE_FAILED: &str = "Failed to fetch user profile. Please try logging in again.";
pub const MSG_FETCH_FAILED: &str = "Failed to fetch tracks. Please try again.";
pub const MSG_SAVE_INVALID: &str =
    "Please enter a playlist name and keep at least one track before saving.";
pub const MSG_SAVE_FAILED: &str = "Failed to save playlist. Please try again.";

/// Offset of the page after the one at `offset`. Saturates instead of
/// wrapping.
pub fn next_offset(offset: u32) -> u32 {
    offset.saturating_add(PAGE_SIZE)
}

pub struct Session {
    spotify: SpotifyClient,
    backend: BackendClient,
    token: Option<String>,
    user_id: Option<String>,
    selected_genre: String,
    tracks: Vec<Track>,
    kept: Vec<Track>,
    offsets: HashMap<String, u32>,
    error: Option<String>,
    playlist_name: String,
    now_playing: Option<Track>,
}

impl Session {
    pub fn new(spotify: SpotifyClient, backend: BackendClient) -> Self {
        Self {
            spotify,
            backend,
            token: None,
            user_id: None,
            selected_genre: String::new(),
            tracks: Vec::new(),
            kept: Vec::new(),
            offsets: HashMap::new(),
            error: None,
            playlist_name: String::new(),
            now_playing: None,
        }
    }

    /// Applies the parameters of the login redirect.
    ///
    /// An `error` leaves the session unauthenticated and surfaces the error.
    /// An `access_token` authenticates the session, after which the account id
    /// is looked up once. A failed lookup keeps the token but sets an error.
    pub async fn authenticate(&mut self, params: RedirectParams) {
        if let Some(error) = params.error {
            warning!("Authentication error: {}", error);
            self.error = Some(format!("Authentication error: {error}"));
            return;
        }

        let Some(token) = params.access_token.filter(|t| !t.is_empty()) else {
            return;
        };

        match self.spotify.current_user(&token).await {
            Ok(profile) => self.user_id = Some(profile.id),
            Err(e) => {
                warning!("Error fetching user profile: {}", e);
                self.error = Some(MSG_PROFILE_FAILED.to_string());
            }
        }
        self.token = Some(token);
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Marks `genre` as selected and fetches its next page.
    pub async fn select_genre(&mut self, genre: &str) {
        self.selected_genre = genre.to_string();
        self.fetch_tracks(genre).await;
    }

    /// Replaces the candidates with the next page of recommendations for
    /// `genre`.
    ///
    /// The genre's offset advances by [`PAGE_SIZE`] whatever the page length,
    /// so a short page still moves the next fetch ten positions on. On
    /// failure the candidates and the offset stay as they were.
    pub async fn fetch_tracks(&mut self, genre: &str) {
        let Some(token) = self.token.as_deref() else {
            return;
        };

        self.error = None;
        let offset = self.offset(genre);

        match self
            .spotify
            .recommendations(token, genre_seed(genre), PAGE_SIZE, offset)
            .await
        {
            Ok(tracks) => {
                self.tracks = tracks;
                self.offsets.insert(genre.to_string(), next_offset(offset));
            }
            Err(e) => {
                warning!("Error fetching tracks: {}", e);
                self.error = Some(MSG_FETCH_FAILED.to_string());
            }
        }
    }

    /// Moves `track` from the candidates to the kept list.
    pub fn keep_track(&mut self, track: Track) {
        self.tracks.retain(|t| t.id != track.id);
        if !self.kept.iter().any(|t| t.id == track.id) {
            self.kept.push(track);
        }
    }

    /// Drops the track with `track_id` from both lists.
    pub fn remove_track(&mut self, track_id: &str) {
        self.tracks.retain(|t| t.id != track_id);
        self.kept.retain(|t| t.id != track_id);
    }

    /// Starts over: no genre, no candidates, nothing kept, no error, and every
    /// genre back at offset 0.
    pub fn reset_selections(&mut self) {
        self.selected_genre.clear();
        self.tracks.clear();
        self.kept.clear();
        self.error = None;
        self.offsets.clear();
    }

    pub fn set_playlist_name(&mut self, name: impl Into<String>) {
        self.playlist_name = name.into();
    }

    /// Submits the kept tracks as a new playlist through the backend.
    ///
    /// Returns the new playlist's id. On success the name and the kept list
    /// are cleared; on failure they stay for another attempt.
    pub async fn save_playlist(&mut self) -> Option<String> {
        let (Some(token), Some(user_id)) = (self.token.as_ref(), self.user_id.as_ref()) else {
            self.error = Some(MSG_SAVE_INVALID.to_string());
            return None;
        };
        if self.kept.is_empty() || self.playlist_name.trim().is_empty() {
            self.error = Some(MSG_SAVE_INVALID.to_string());
            return None;
        }

        let request = SavePlaylistRequest {
            access_token: token.clone(),
            user_id: user_id.clone(),
            name: self.playlist_name.clone(),
            tracks: self.kept.iter().map(|t| t.uri.clone()).collect(),
        };

        match self.backend.create_playlist(&request).await {
            Ok(res) if res.success => {
                self.playlist_name.clear();
                self.kept.clear();
                Some(res.playlist_id)
            }
            Ok(_) => {
                warning!("Error saving playlist: server indicated failure");
                self.error = Some(MSG_SAVE_FAILED.to_string());
                None
            }
            Err(e) => {
                warning!("Error saving playlist: {}", e);
                self.error = Some(MSG_SAVE_FAILED.to_string());
                None
            }
        }
    }

    /// Next offset for `genre`; 0 for a genre not fetched since the last reset.
    pub fn offset(&self, genre: &str) -> u32 {
        self.offsets.get(genre).copied().unwrap_or(0)
    }

    pub fn offsets(&self) -> &HashMap<String, u32> {
        &self.offsets
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn kept(&self) -> &[Track] {
        &self.kept
    }

    pub fn selected_genre(&self) -> &str {
        &self.selected_genre
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    pub fn playlist_name(&self) -> &str {
        &self.playlist_name
    }

    pub fn now_playing(&self) -> Option<&Track> {
        self.now_playing.as_ref()
    }
}
