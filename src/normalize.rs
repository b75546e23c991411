//! Text cleanup for search queries and candidate comparison.
//!
//! There are two distinct rewrite chains here and they are not interchangeable:
//! the query chain runs case-sensitively over the raw export title before we
//! talk to the search service, while the candidate chain lower-cases first and
//! strips a different set of featured-artist markers from titles the service
//! returns. Both call sites depend on their own token set.

/// Sequential rewrites applied to the export track title before building
/// search queries. Order matters: `FT.` must go before `FT`, `FEAT.` before
/// `FEAT`, and `-` is turned into a space rather than dropped so hyphenated
/// titles still split into words.
const QUERY_TITLE_REWRITES: &[(&str, &str)] = &[
    ("(", ""),
    (")", ""),
    ("[", ""),
    ("]", ""),
    ("FT.", ""),
    ("FT", ""),
    ("FEAT.", ""),
    ("FEAT", ""),
    ("feat.", ""),
    ("with", ""),
    ("&", ""),
    ("-", " "),
    ("!", ""),
    ("?", ""),
    ("'", ""),
    ("\"", ""),
];

/// Rewrites applied to candidate titles coming back from the search service.
/// The input is lower-cased first, so only lower-case markers appear here.
const CANDIDATE_TITLE_REWRITES: &[(&str, &str)] = &[
    ("(", ""),
    (")", ""),
    ("[", ""),
    ("]", ""),
    ("feat.", ""),
    ("ft.", ""),
    ("featuring", ""),
    ("'", ""),
    ("\"", ""),
];

/// Strip punctuation and featured-artist noise from a raw track title so it
/// can be used in search queries. Empty input yields empty output.
pub fn clean_query_title(raw: &str) -> String {
    let mut s = raw.to_string();
    for &(from, to) in QUERY_TITLE_REWRITES {
        s = s.replace(from, to);
    }
    collapse_whitespace(&s)
}

/// Normalize a candidate title returned by the search service for word-set
/// comparison: lower-case plus a smaller noise-token set.
pub fn clean_candidate_title(raw: &str) -> String {
    let mut s = raw.to_lowercase();
    for &(from, to) in CANDIDATE_TITLE_REWRITES {
        s = s.replace(from, to);
    }
    collapse_whitespace(&s)
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
