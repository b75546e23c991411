//! Candidate scoring: artist containment plus title word-overlap.

use crate::models::SearchCandidate;
use crate::normalize::clean_candidate_title;
use std::collections::HashSet;

/// Case-insensitive substring test in either direction: true if either artist
/// name contains the other. An empty query artist matches everything, which
/// keeps entries with a missing artist column resolvable.
pub fn artist_matches(query_artist: &str, candidate_artist: &str) -> bool {
    let q = query_artist.to_lowercase();
    let c = candidate_artist.to_lowercase();
    c.contains(&q) || q.contains(&c)
}

/// Case-insensitive word set of a title, split on whitespace.
pub fn title_word_set(title: &str) -> HashSet<String> {
    title
        .to_lowercase()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Word-overlap ratio between the wanted title words and a candidate title:
/// `|wanted ∩ candidate| / max(|wanted|, |candidate|)`. The candidate title is
/// normalized with the candidate-side token set before splitting. Two empty
/// sets score 0.0, never a division by zero.
pub fn title_overlap(wanted: &HashSet<String>, candidate_title: &str) -> f64 {
    let candidate_words = title_word_set(&clean_candidate_title(candidate_title));
    let denom = wanted.len().max(candidate_words.len());
    if denom == 0 {
        return 0.0;
    }
    let shared = wanted.intersection(&candidate_words).count();
    shared as f64 / denom as f64
}

/// Score one candidate against the wanted title words and query artist.
/// Returns (artist_match, overlap_ratio). The caller only promotes a
/// candidate to best-so-far when the artist matches and the ratio strictly
/// improves; overlap alone never qualifies a candidate.
pub fn score_candidate(
    wanted: &HashSet<String>,
    candidate: &SearchCandidate,
    query_artist: &str,
) -> (bool, f64) {
    let matched = artist_matches(query_artist, &candidate.artist_name);
    let ratio = title_overlap(wanted, &candidate.title);
    (matched, ratio)
}
