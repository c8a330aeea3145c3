/// Genres offered to the user, in display order.
pub const GENRES: [&str; 10] = [
    "pop", "hip-hop", "jazz", "rock", "edm", "country", "k-pop", "rap", "r&b", "acoustic",
];

/// Translates a display genre into Spotify's seed vocabulary.
///
/// Matching is case-insensitive for the mapped names; anything else is passed
/// through unchanged.
///
/// ```
/// assert_eq!(genre_seed("rap"), "hip-hop");
/// assert_eq!(genre_seed("R&B"), "r-n-b");
/// assert_eq!(genre_seed("jazz"), "jazz");
/// ```
pub fn genre_seed(genre: &str) -> &str {
    match genre.to_lowercase().as_str() {
        "rap" => "hip-hop",
        "r&b" => "r-n-b",
        _ => genre,
    }
}
