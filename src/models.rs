use serde::{Deserialize, Serialize};

/// One row from the export table: the track title plus the first listed artist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportEntry {
    pub track: String,
    pub artist: String,
}

impl ImportEntry {
    /// The "Track - Artist" label used in progress lines and the not-found list.
    pub fn label(&self) -> String {
        format!("{} - {}", self.track, self.artist)
    }
}

/// A track returned by the provider search, reduced to the canonical shape
/// the matcher works with. Anything missing id/title/artist never gets this far.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCandidate {
    pub id: String,
    pub title: String,
    pub artist_name: String,
}

/// Best candidate found for one entry, plus its title word-overlap ratio.
#[derive(Debug, Clone)]
pub struct MatchResult {
    pub candidate: SearchCandidate,
    pub score: f64,
}

/// Running totals for one import run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportReport {
    pub successful_adds: usize,
    pub total_songs: usize,
    pub not_found_songs: Vec<String>,
}

impl ImportReport {
    pub fn new(total_songs: usize) -> Self {
        Self {
            successful_adds: 0,
            total_songs,
            not_found_songs: Vec::new(),
        }
    }

    pub fn record_added(&mut self) {
        self.successful_adds += 1;
    }

    pub fn record_not_found(&mut self, entry: &ImportEntry) {
        self.not_found_songs.push(entry.label());
    }
}
