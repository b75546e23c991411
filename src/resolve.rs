//! Resolution controller: drives query generation and candidate scoring
//! against the provider's search, with early exit once a confident match is
//! found.

use crate::api::Provider;
use crate::models::{ImportEntry, MatchResult};
use crate::normalize::clean_query_title;
use crate::query::search_queries;
use crate::score::{score_candidate, title_word_set};
use std::time::Duration;
use tracing::{debug, warn};

/// Search results past this rank are never inspected; relevance drops off
/// quickly and scanning deeper mostly surfaces karaoke/tribute noise.
pub const MAX_CANDIDATES_PER_QUERY: usize = 15;

/// Overlap ratio above which the current best is taken without scanning the
/// rest of the candidate list or issuing further queries. This only controls
/// early termination: a best below it is still accepted once all queries ran.
pub const CONFIDENT_OVERLAP: f64 = 0.8;

/// Resolve one entry to its best catalog match, or `None` if no query ever
/// produced a candidate with a matching artist.
///
/// Queries are attempted in generator order with a `pacing` pause between
/// attempts. A failed search is logged and the next query is tried; queries
/// are independent attempts, not a pipeline. Candidates with any empty field
/// are skipped silently.
pub async fn resolve_entry(
    provider: &dyn Provider,
    entry: &ImportEntry,
    pacing: Duration,
) -> Option<MatchResult> {
    let track = clean_query_title(&entry.track);
    let artist = entry.artist.trim().to_string();
    let wanted = title_word_set(&track);

    let mut best: Option<MatchResult> = None;
    let mut best_ratio = 0.0_f64;

    for query in search_queries(&track, &artist) {
        let candidates = match provider.search_tracks(&query).await {
            Ok(c) => c,
            Err(e) => {
                warn!("search error for {:?}: {}", query, e);
                continue;
            }
        };

        for candidate in candidates.into_iter().take(MAX_CANDIDATES_PER_QUERY) {
            if candidate.id.is_empty()
                || candidate.title.is_empty()
                || candidate.artist_name.is_empty()
            {
                continue;
            }

            let (artist_match, ratio) = score_candidate(&wanted, &candidate, &artist);
            if artist_match && ratio > best_ratio {
                debug!(
                    "new best for {:?}: {} - {} (ratio {:.2})",
                    entry.track, candidate.title, candidate.artist_name, ratio
                );
                best_ratio = ratio;
                best = Some(MatchResult {
                    candidate,
                    score: ratio,
                });
                if ratio > CONFIDENT_OVERLAP {
                    break;
                }
            }
        }

        if best.is_some() && best_ratio > CONFIDENT_OVERLAP {
            break;
        }

        tokio::time::sleep(pacing).await;
    }

    best
}
