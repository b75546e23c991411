//! Reading playlist export CSVs.

use crate::models::ImportEntry;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// One row of a playlist export. Extra columns are ignored.
#[derive(Debug, Deserialize)]
struct ExportRow {
    #[serde(alias = "Track Name")]
    track_name: String,
    #[serde(alias = "Artist Name(s)")]
    artist_names: String,
}

/// List `*.csv` files in `dir`, sorted by file name for a stable menu order.
pub fn list_csv_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("reading CSV folder {}", dir.display()))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|e| e.eq_ignore_ascii_case("csv"))
                .unwrap_or(false)
        })
        .collect();
    files.sort();
    Ok(files)
}

/// Read import entries from one export CSV.
///
/// The `Artist Name(s)` column joins co-artists with ", "; only the first is
/// kept. Rows that fail to deserialize are skipped with a warning rather than
/// aborting the whole import.
pub fn read_entries(path: &Path) -> Result<Vec<ImportEntry>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut entries = Vec::new();
    for row in rdr.deserialize() {
        let row: ExportRow = match row {
            Ok(r) => r,
            Err(e) => {
                warn!("skipping malformed row in {}: {}", path.display(), e);
                continue;
            }
        };
        let artist = row
            .artist_names
            .split(", ")
            .next()
            .unwrap_or("")
            .to_string();
        entries.push(ImportEntry {
            track: row.track_name,
            artist,
        });
    }
    Ok(entries)
}
