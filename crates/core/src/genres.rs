//! Genres are persisted as one comma-delimited column and split at the
//! boundary. No normalization beyond trimming blanks. A genre containing the
//! separator cannot survive storage; forms reject it.

const SEPARATOR: char = ',';

/// Whether `genre` can be stored and read back as a single entry.
pub fn is_storable(genre: &str) -> bool {
    !genre.contains(SEPARATOR)
}

/// Join submitted genres into the stored column value.
///
/// ```
/// use trifold_core::genres::join_genres;
/// assert_eq!(join_genres(&["Jazz".to_string(), "Blues".to_string()]), "Jazz,Blues");
/// ```
pub fn join_genres(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .collect::<Vec<_>>()
        .join(&SEPARATOR.to_string())
}

/// Split a stored column value back into a list.
pub fn split_genres(stored: &str) -> Vec<String> {
    stored
        .split(SEPARATOR)
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect()
}
