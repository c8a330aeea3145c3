use reqwest::StatusCode;

use crate::{
    session::Session,
    spotify::ApiError,
    types::{Device, Track},
    warning,
};

pub const MSG_NO_DEVICES: &str =
    "No active Spotify devices found. Please open Spotify on any device and try again.";
pub const MSG_PREMIUM_REQUIRED: &str =
    "Unable to control playback. Make sure you have an active Spotify Premium account.";
pub const MSG_NO_ACTIVE_DEVICE: &str =
    "No active device found. Please start playing Spotify on any device and try again.";
pub const MSG_PLAYBACK_FAILED: &str =
    "Failed to play or queue the track. Please try again or refresh the page.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlaybackOutcome {
    /// Playback started on the named device.
    Playing { device: String },
    /// Added to the queue of the named device.
    Queued { device: String },
    NoDevices,
    /// Rejected; the message is in [`Session::error`].
    Failed,
    NotAuthenticated,
}

impl Session {
    /// Plays `track` now if nothing is playing, otherwise queues it.
    ///
    /// Steps, each awaited before the next:
    /// 1. list devices; stop if there are none
    /// 2. pick the active device, or the first one listed
    /// 3. read the playback state
    /// 4. nothing playing: play on that device and mark the track as now
    ///    playing; something playing: enqueue on that device
    ///
    /// The now-playing marker is local and is never reconciled with the real
    /// player.
    pub async fn play_track(&mut self, track: &Track) -> PlaybackOutcome {
        let Some(token) = self.token.clone() else {
            return PlaybackOutcome::NotAuthenticated;
        };

        match self.play_or_queue(&token, track).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warning!("Error handling track selection: {}", e);
                self.error = Some(playback_error_message(&e).to_string());
                PlaybackOutcome::Failed
            }
        }
    }

    async fn play_or_queue(
        &mut self,
        token: &str,
        track: &Track,
    ) -> Result<PlaybackOutcome, ApiError> {
        let devices = self.spotify.devices(token).await?;
        let Some((device, device_id)) =
            pick_device(&devices).and_then(|d| d.id.as_deref().map(|id| (d, id)))
        else {
            self.error = Some(MSG_NO_DEVICES.to_string());
            return Ok(PlaybackOutcome::NoDevices);
        };

        let playing = self
            .spotify
            .playback_state(token)
            .await?
            .is_some_and(|state| state.is_playing);

        if playing {
            self.spotify.queue(token, device_id, &track.uri).await?;
            Ok(PlaybackOutcome::Queued {
                device: device.name.clone(),
            })
        } else {
            self.spotify.play(token, device_id, &track.uri).await?;
            self.now_playing = Some(track.clone());
            Ok(PlaybackOutcome::Playing {
                device: device.name.clone(),
            })
        }
    }
}

/// The device flagged active, else the first one. Devices without an id
/// are never picked.
pub fn pick_device(devices: &[Device]) -> Option<&Device> {
    let usable = || devices.iter().filter(|device| device.id.is_some());
    usable()
        .find(|device| device.is_active)
        .or_else(|| usable().next())
}

pub fn playback_error_message(error: &ApiError) -> &'static str {
    match error.status() {
        Some(StatusCode::FORBIDDEN) => MSG_PREMIUM_REQUIRED,
        Some(StatusCode::NOT_FOUND) => MSG_NO_ACTIVE_DEVICE,
        _ => MSG_PLAYBACK_FAILED,
    }
}
