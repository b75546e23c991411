//! Search query generation: broad-to-narrow variants of one (track, artist)
//! pair, reordered to compensate for the search index's sensitivity to term
//! order and to titles cut short by punctuation artifacts.

/// Ordered search attempts for one entry, most to least specific:
///
/// 1. track + artist
/// 2. track alone
/// 3. artist + track
/// 4. first three track words + artist
/// 5. artist + first three track words
///
/// `track` is expected to be pre-cleaned (see [`crate::normalize`]) and
/// `artist` trimmed. Variants that are blank after trimming are skipped, so
/// the result has at most five queries. Duplicates are kept: a short title
/// makes variant 4 repeat variant 1, and repeating the attempt is harmless.
pub fn search_queries(track: &str, artist: &str) -> Vec<String> {
    let first_three = track
        .split_whitespace()
        .take(3)
        .collect::<Vec<_>>()
        .join(" ");

    [
        format!("{} {}", track, artist),
        track.to_string(),
        format!("{} {}", artist, track),
        format!("{} {}", first_three, artist),
        format!("{} {}", artist, first_three),
    ]
    .into_iter()
    .map(|q| q.trim().to_string())
    .filter(|q| !q.is_empty())
    .collect()
}
