//! Playlist importer: thin orchestration around the resolution controller.
//! Creates the remote playlist, resolves entries in source order, appends
//! each resolved id, and aggregates the success/failure report.

use crate::api::Provider;
use crate::models::{ImportEntry, ImportReport};
use crate::resolve::resolve_entry;
use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Pause between search attempts within one entry.
    pub search_pacing: Duration,
    /// Pause between entries.
    pub entry_pacing: Duration,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            search_pacing: Duration::from_millis(300),
            entry_pacing: Duration::from_millis(300),
        }
    }
}

/// Create a playlist named `playlist_name` and import `entries` into it.
///
/// Entries are processed one at a time in source order. An entry whose
/// resolved id fails to append is downgraded to not-found, so the report
/// invariant `successful_adds + not_found_songs.len() == total_songs` holds
/// exactly. Playlist creation failure is the only fatal error here.
pub async fn import_entries(
    provider: &dyn Provider,
    playlist_name: &str,
    description: &str,
    entries: &[ImportEntry],
    opts: &ImportOptions,
) -> Result<ImportReport> {
    let playlist_id = provider.create_playlist(playlist_name, description).await?;
    info!(
        "created playlist {:?} (id {}) on {}",
        playlist_name,
        playlist_id,
        provider.name()
    );

    let mut report = ImportReport::new(entries.len());

    for entry in entries {
        match resolve_entry(provider, entry, opts.search_pacing).await {
            Some(found) => {
                let ids = [found.candidate.id.clone()];
                match provider.add_tracks(&playlist_id, &ids).await {
                    Ok(()) => {
                        report.record_added();
                        info!(
                            "Added ({}/{}): {}",
                            report.successful_adds,
                            report.total_songs,
                            entry.label()
                        );
                        info!(
                            "  matched as: {} - {} (overlap {:.2})",
                            found.candidate.title, found.candidate.artist_name, found.score
                        );
                    }
                    Err(e) => {
                        warn!("failed to add {:?} to playlist: {}", entry.track, e);
                        report.record_not_found(entry);
                    }
                }
            }
            None => {
                info!("Not found: {}", entry.label());
                report.record_not_found(entry);
            }
        }

        tokio::time::sleep(opts.entry_pacing).await;
    }

    Ok(report)
}
