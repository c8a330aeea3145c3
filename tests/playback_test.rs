mod common;

use common::{MockSpotify, logged_in_session, track};
use genrepick::{
    cli::now_playing_line,
    session::{
        MSG_NO_ACTIVE_DEVICE, MSG_NO_DEVICES, MSG_PLAYBACK_FAILED, MSG_PREMIUM_REQUIRED,
        PlaybackOutcome, pick_device,
    },
    types::Device,
};
use serde_json::json;

const UNUSED_BACKEND: &str = "http://127.0.0.1:9";

fn device(id: &str, is_active: bool) -> Device {
    Device {
        id: Some(id.to_string()),
        name: format!("Speaker {id}"),
        is_active,
        kind: "Speaker".to_string(),
    }
}

fn device_json(id: &str, is_active: bool) -> serde_json::Value {
    json!({"id": id, "name": format!("Speaker {id}"), "is_active": is_active, "type": "Speaker"})
}

#[test]
fn test_pick_device_prefers_active_then_first() {
    assert!(pick_device(&[]).is_none());

    let devices = vec![device("a", false), device("b", true), device("c", true)];
    assert_eq!(pick_device(&devices).unwrap().id.as_deref(), Some("b"));

    let devices = vec![device("a", false), device("b", false)];
    assert_eq!(pick_device(&devices).unwrap().id.as_deref(), Some("a"));
}

#[test]
fn test_pick_device_skips_devices_without_id() {
    let restricted = Device {
        id: None,
        ..device("r", true)
    };

    let devices = vec![restricted.clone(), device("a", false)];
    assert_eq!(pick_device(&devices).unwrap().id.as_deref(), Some("a"));

    assert!(pick_device(&[restricted]).is_none());
}

#[tokio::test]
async fn test_no_devices_stops_before_playback() {
    let mock = MockSpotify::start().await;
    mock.respond("GET", "/v1/me/player/devices", 200, json!({"devices": []}))
        .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("1")).await;

    assert_eq!(outcome, PlaybackOutcome::NoDevices);
    assert_eq!(session.error(), Some(MSG_NO_DEVICES));
    assert!(session.now_playing().is_none());
    assert!(mock.calls_to("GET", "/v1/me/player").await.is_empty());
    assert!(mock.calls_to("PUT", "/v1/me/player/play").await.is_empty());
    assert!(mock.calls_to("POST", "/v1/me/player/queue").await.is_empty());
}

#[tokio::test]
async fn test_plays_on_only_device_when_nothing_is_playing() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        200,
        json!({"devices": [device_json("d1", false)]}),
    )
    .await;
    mock.respond("GET", "/v1/me/player", 204, json!(null)).await;
    mock.respond("PUT", "/v1/me/player/play", 204, json!(null))
        .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(
        outcome,
        PlaybackOutcome::Playing {
            device: "Speaker d1".to_string()
        }
    );
    assert_eq!(session.now_playing().map(|t| t.id.as_str()), Some("7"));
    assert_eq!(session.error(), None);

    // Shown even though nothing has been kept.
    assert!(session.kept().is_empty());
    assert_eq!(
        now_playing_line(&session).as_deref(),
        Some("Now Playing: Song 7 by First Artist, Second Artist")
    );

    let play = mock.calls_to("PUT", "/v1/me/player/play").await;
    assert_eq!(play.len(), 1);
    assert_eq!(play[0].query["device_id"], "d1");
    assert_eq!(play[0].json(), json!({"uris": ["spotify:track:7"]}));
    assert!(mock.calls_to("POST", "/v1/me/player/queue").await.is_empty());
}

#[tokio::test]
async fn test_paused_playback_counts_as_nothing_playing() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        200,
        json!({"devices": [device_json("d1", false), device_json("d2", true)]}),
    )
    .await;
    mock.respond(
        "GET",
        "/v1/me/player",
        200,
        json!({"is_playing": false, "item": null}),
    )
    .await;
    mock.respond("PUT", "/v1/me/player/play", 204, json!(null))
        .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(
        outcome,
        PlaybackOutcome::Playing {
            device: "Speaker d2".to_string()
        }
    );
    let play = mock.calls_to("PUT", "/v1/me/player/play").await;
    assert_eq!(play[0].query["device_id"], "d2");
}

#[tokio::test]
async fn test_queues_when_something_is_playing() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        200,
        json!({"devices": [device_json("d1", true)]}),
    )
    .await;
    mock.respond(
        "GET",
        "/v1/me/player",
        200,
        json!({"is_playing": true, "item": common::track_json("0")}),
    )
    .await;
    mock.respond("POST", "/v1/me/player/queue", 204, json!(null))
        .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(
        outcome,
        PlaybackOutcome::Queued {
            device: "Speaker d1".to_string()
        }
    );
    // Queued tracks play later; the now-playing marker stays put.
    assert!(session.now_playing().is_none());
    assert_eq!(now_playing_line(&session), None);

    let queue = mock.calls_to("POST", "/v1/me/player/queue").await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].query["uri"], "spotify:track:7");
    assert_eq!(queue[0].query["device_id"], "d1");
    assert!(mock.calls_to("PUT", "/v1/me/player/play").await.is_empty());
}

#[tokio::test]
async fn test_playback_failures_map_to_messages() {
    for (status, message) in [
        (403, MSG_PREMIUM_REQUIRED),
        (404, MSG_NO_ACTIVE_DEVICE),
        (500, MSG_PLAYBACK_FAILED),
    ] {
        let mock = MockSpotify::start().await;
        mock.respond(
            "GET",
            "/v1/me/player/devices",
            200,
            json!({"devices": [device_json("d1", true)]}),
        )
        .await;
        mock.respond("GET", "/v1/me/player", 204, json!(null)).await;
        mock.respond(
            "PUT",
            "/v1/me/player/play",
            status,
            json!({"error": {"status": status}}),
        )
        .await;
        let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

        let outcome = session.play_track(&track("7")).await;

        assert_eq!(outcome, PlaybackOutcome::Failed);
        assert_eq!(session.error(), Some(message), "status {status}");
        assert!(session.now_playing().is_none());
    }
}

#[tokio::test]
async fn test_device_lookup_failure_is_reported() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        403,
        json!({"error": {"status": 403, "message": "Premium required"}}),
    )
    .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(outcome, PlaybackOutcome::Failed);
    assert_eq!(session.error(), Some(MSG_PREMIUM_REQUIRED));

    // The session stays usable.
    assert!(session.is_authenticated());
}

#[tokio::test]
async fn test_restricted_device_next_to_active_one() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        200,
        json!({"devices": [
            {"id": null, "name": "Restricted", "is_active": false, "type": "Speaker"},
            device_json("d1", true)
        ]}),
    )
    .await;
    mock.respond("GET", "/v1/me/player", 204, json!(null)).await;
    mock.respond("PUT", "/v1/me/player/play", 204, json!(null))
        .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(
        outcome,
        PlaybackOutcome::Playing {
            device: "Speaker d1".to_string()
        }
    );
    let play = mock.calls_to("PUT", "/v1/me/player/play").await;
    assert_eq!(play.len(), 1);
    assert_eq!(play[0].query["device_id"], "d1");
}

#[tokio::test]
async fn test_only_restricted_devices_count_as_none() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        200,
        json!({"devices": [
            {"id": null, "name": "Restricted", "is_active": true, "type": "Speaker"}
        ]}),
    )
    .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(outcome, PlaybackOutcome::NoDevices);
    assert_eq!(session.error(), Some(MSG_NO_DEVICES));
    assert!(mock.calls_to("GET", "/v1/me/player").await.is_empty());
}

#[tokio::test]
async fn test_queues_while_an_episode_is_playing() {
    let mock = MockSpotify::start().await;
    mock.respond(
        "GET",
        "/v1/me/player/devices",
        200,
        json!({"devices": [device_json("d1", true)]}),
    )
    .await;
    mock.respond(
        "GET",
        "/v1/me/player",
        200,
        json!({
            "is_playing": true,
            "currently_playing_type": "episode",
            "item": {
                "type": "episode",
                "id": "ep1",
                "name": "Episode 1",
                "uri": "spotify:episode:ep1",
                "show": {"id": "sh1", "name": "A Show"}
            }
        }),
    )
    .await;
    mock.respond("POST", "/v1/me/player/queue", 204, json!(null))
        .await;
    let mut session = logged_in_session(&mock, UNUSED_BACKEND).await;

    let outcome = session.play_track(&track("7")).await;

    assert_eq!(
        outcome,
        PlaybackOutcome::Queued {
            device: "Speaker d1".to_string()
        }
    );
    assert_eq!(session.error(), None);
    let queue = mock.calls_to("POST", "/v1/me/player/queue").await;
    assert_eq!(queue.len(), 1);
    assert_eq!(queue[0].query["uri"], "spotify:track:7");
}
