use url::form_urlencoded;

use crate::types::{Track, TrackTableRow};

/// Appends form-urlencoded `pairs` to `base`, keeping `base` verbatim.
///
/// ```
/// assert_eq!(
///     with_query("http://localhost:3000", &[("access_token", "A")]),
///     "http://localhost:3000?access_token=A"
/// );
/// ```
pub fn with_query(base: &str, pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();

    if query.is_empty() {
        return base.to_string();
    }

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

pub fn artist_names(track: &Track) -> String {
    track
        .artists
        .iter()
        .map(|artist| artist.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Link shown next to a track: the web player URL when Spotify provided one,
/// otherwise the `spotify:` URI.
pub fn track_link(track: &Track) -> &str {
    if track.external_urls.spotify.is_empty() {
        &track.uri
    } else {
        &track.external_urls.spotify
    }
}

/// Table rows for a track list. `prefix` distinguishes candidate indices
/// (`1`, `2`, ...) from kept ones (`k1`, `k2`, ...).
pub fn track_rows(tracks: &[Track], prefix: &str) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, track)| TrackTableRow {
            index: format!("{prefix}{}", i + 1),
            name: track.name.clone(),
            artists: artist_names(track),
            link: track_link(track).to_string(),
        })
        .collect()
}
