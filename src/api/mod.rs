pub mod mock;
pub mod tidal;
pub mod tidal_auth;

use crate::models::SearchCandidate;
use anyhow::Result;

/// Provider trait: the operations the importer needs from the streaming
/// service. Implementations: tidal::TidalProvider and mock::MockProvider.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Create a playlist and return its remote id.
    async fn create_playlist(&self, name: &str, description: &str) -> Result<String>;

    /// Append tracks (catalog ids) to a playlist.
    async fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<()>;

    /// Run one text search and return candidate tracks, best-ranked first.
    /// Response-shape variance is normalized here: callers only ever see
    /// complete candidates, items missing id/title/artist are dropped.
    async fn search_tracks(&self, query: &str) -> Result<Vec<SearchCandidate>>;

    /// Return the provider's name (for logging, UI, etc)
    fn name(&self) -> &str;

    /// Return true if the provider has credentials and can be used
    fn is_authenticated(&self) -> bool;
}
