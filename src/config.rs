use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Folder scanned for playlist export CSVs.
    #[serde(default = "default_csv_dir")]
    pub csv_dir: PathBuf,

    // path to database file (token cache)
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    #[serde(default = "default_playlist_description")]
    pub playlist_description: String,

    /// Pause between search attempts for one entry, in milliseconds.
    #[serde(default = "default_pacing_ms")]
    pub search_pacing_ms: u64,

    /// Pause between entries, in milliseconds.
    #[serde(default = "default_pacing_ms")]
    pub entry_pacing_ms: u64,
}

fn default_csv_dir() -> PathBuf { "csv-files-go-here".into() }
fn default_db_path() -> PathBuf { "playlist-import.db".into() }
fn default_log_dir() -> PathBuf { "logs".into() }
fn default_playlist_description() -> String { "Imported from CSV".into() }
fn default_pacing_ms() -> u64 { 300 }

impl Config {
    pub fn from_path(path: &std::path::Path) -> anyhow::Result<Self> {
        let s = std::fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&s)?;
        Ok(cfg)
    }
}
