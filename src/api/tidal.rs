use super::Provider;
use crate::db;
use crate::models::SearchCandidate;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::Engine;
use chrono::Utc;
use log;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoredToken {
    pub access_token: String,
    pub token_type: String,
    pub expires_at: i64, // epoch seconds
    pub refresh_token: Option<String>,
    pub scope: Option<String>,
}

/// How many results to request per search page. The resolver never looks
/// past this rank anyway.
const SEARCH_PAGE_LIMIT: usize = 15;

/// Minimal Tidal provider implementation. It uses a base URL from env var
/// `TIDAL_API_BASE` for easier testing (mockito). Authentication & endpoints
/// may need tweaks depending on your Tidal application details; this is a
/// best-effort implementation using documented endpoints.
pub struct TidalProvider {
    client: Client,
    client_id: String,
    client_secret: String,
    db_path: std::path::PathBuf,
    token: tokio::sync::Mutex<Option<StoredToken>>,
}

impl TidalProvider {
    pub fn new(client_id: String, client_secret: String, db_path: std::path::PathBuf) -> Self {
        // If either client_id or client_secret is empty, try to load from DB
        let (client_id, client_secret) = if client_id.is_empty() || client_secret.is_empty() {
            if let Ok(conn) = rusqlite::Connection::open(&db_path) {
                if let Ok(Some((_token_json, db_client_id, db_client_secret))) =
                    db::load_credential_with_client(&conn, "tidal")
                {
                    (
                        db_client_id.unwrap_or(client_id),
                        db_client_secret.unwrap_or(client_secret),
                    )
                } else {
                    (client_id, client_secret)
                }
            } else {
                (client_id, client_secret)
            }
        } else {
            (client_id, client_secret)
        };
        Self {
            client: Client::new(),
            client_id,
            client_secret,
            db_path,
            token: tokio::sync::Mutex::new(None),
        }
    }

    fn is_authenticated(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }
    fn name(&self) -> &str {
        "tidal"
    }

    fn country_code() -> String {
        std::env::var("TIDAL_COUNTRY_CODE").unwrap_or_else(|_| "US".into())
    }

    fn base_url() -> String {
        // Default to the official TIDAL developer base URL; can be
        // overridden (e.g. for tests) via TIDAL_API_BASE.
        std::env::var("TIDAL_API_BASE").unwrap_or_else(|_| "https://openapi.tidal.com/v2".into())
    }

    fn auth_base() -> String {
        std::env::var("TIDAL_AUTH_BASE").unwrap_or_else(|_| "https://auth.tidal.com".into())
    }

    async fn load_token_from_db(&self) -> Result<Option<StoredToken>> {
        let db_path = self.db_path.clone();
        let json_opt =
            tokio::task::spawn_blocking(move || -> Result<Option<String>, anyhow::Error> {
                let conn = rusqlite::Connection::open(db_path)?;
                Ok(db::load_credential_with_client(&conn, "tidal")?.map(|(json, _, _)| json))
            })
            .await??;

        if let Some(s) = json_opt {
            let st: StoredToken = serde_json::from_str(&s)?;
            Ok(Some(st))
        } else {
            Ok(None)
        }
    }

    async fn persist_token_to_db(&self, st: &StoredToken) -> Result<()> {
        let db_path = self.db_path.clone();
        let s = serde_json::to_string(&st)?;
        // Pass the client credentials explicitly so the UPSERT does not
        // overwrite them with NULL and wipe them from the DB on every refresh.
        let client_id = self.client_id.clone();
        let client_secret = self.client_secret.clone();
        tokio::task::spawn_blocking(move || -> Result<(), anyhow::Error> {
            let conn = rusqlite::Connection::open(db_path)?;
            db::save_credential_raw(&conn, "tidal", &s, Some(&client_id), Some(&client_secret))?;
            Ok(())
        })
        .await??;
        Ok(())
    }

    async fn ensure_token(&self) -> Result<()> {
        let mut lock = self.token.lock().await;
        if lock.is_none() {
            if let Some(st) = self.load_token_from_db().await? {
                *lock = Some(st);
            }
        }
        // If token is near expiry, refresh if we have a refresh token
        if let Some(st) = &*lock {
            let now = Utc::now().timestamp();
            if now + 30 >= st.expires_at {
                log::debug!("Tidal token near expiry, attempting refresh");
                let mut cur = st.clone();
                if let Err(e) = self.refresh_token_internal(&mut cur).await {
                    log::warn!("Tidal token refresh failed: {}", e);
                } else {
                    *lock = Some(cur);
                }
            }
        }
        Ok(())
    }

    /// Force a token refresh using the stored refresh_token.
    ///
    /// This is primarily intended for the `AuthTest Tidal` CLI helper so
    /// users can verify that their client_id / client_secret and pasted
    /// token JSON support refresh before running an import.
    pub async fn test_refresh_token(&self) -> Result<()> {
        {
            let mut lock = self.token.lock().await;
            if lock.is_none() {
                if let Some(st) = self.load_token_from_db().await? {
                    *lock = Some(st);
                } else {
                    return Err(anyhow!("no tidal token stored in DB"));
                }
            }
        }

        let mut cur = {
            let lock = self.token.lock().await;
            lock.as_ref()
                .cloned()
                .ok_or_else(|| anyhow!("no tidal token loaded"))?
        };

        self.refresh_token_internal(&mut cur).await?;

        let mut lock = self.token.lock().await;
        *lock = Some(cur);
        Ok(())
    }

    async fn refresh_token_internal(&self, cur: &mut StoredToken) -> Result<()> {
        let refresh_token = cur
            .refresh_token
            .clone()
            .ok_or_else(|| anyhow!("no refresh token"))?;
        let params = [
            ("grant_type", "refresh_token"),
            ("refresh_token", &refresh_token),
        ];
        let auth_header = format!(
            "Basic {}",
            base64::engine::general_purpose::STANDARD
                .encode(format!("{}:{}", self.client_id, self.client_secret))
        );
        // Use the documented TIDAL OAuth2 token endpoint
        let url = format!("{}/v1/oauth2/token", Self::auth_base());
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, auth_header)
            .form(&params)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(anyhow!(
                "Failed to refresh tidal token: {} - {}",
                status,
                body
            ));
        }
        let j: serde_json::Value = resp.json().await?;
        let access_token = j["access_token"]
            .as_str()
            .ok_or_else(|| anyhow!("no access_token"))?
            .to_string();
        let expires_in = j["expires_in"].as_i64().unwrap_or(3600);
        let scope = j["scope"].as_str().map(|s| s.to_string());
        cur.access_token = access_token;
        cur.token_type = "Bearer".into();
        cur.expires_at = Utc::now().timestamp() + expires_in;
        if let Some(s) = scope {
            cur.scope = Some(s);
        }
        self.persist_token_to_db(cur).await?;
        Ok(())
    }

    pub async fn get_bearer(&self) -> Result<String> {
        self.ensure_token().await?;
        let lock = self.token.lock().await;
        let st = lock
            .as_ref()
            .ok_or_else(|| anyhow!("no tidal token loaded"))?;
        Ok(format!("Bearer {}", st.access_token))
    }
}

/// Normalize a TIDAL search response into canonical candidates.
///
/// TIDAL responses vary by API version: the track list may be a plain
/// `tracks` array, a `tracks.items` page, an `items` array (possibly itself
/// wrapped in an `items` object), or a JSON:API `data` array with an
/// `attributes` object. Titles appear as `name`, `title` or
/// `attributes.title`; the artist as `artist.name`, `artists[0].name` or
/// `attributes.artistName`; ids as strings or numbers. Items missing any of
/// id/title/artist are dropped here so the matcher never sees partial data.
pub fn parse_search_candidates(j: &serde_json::Value) -> Vec<SearchCandidate> {
    let items = j["tracks"]
        .as_array()
        .or_else(|| j["tracks"]["items"].as_array())
        .or_else(|| j["items"].as_array())
        .or_else(|| j["items"]["items"].as_array())
        .or_else(|| j["data"].as_array());

    let items = match items {
        Some(a) => a,
        None => return Vec::new(),
    };

    let mut out = Vec::new();
    for item in items {
        let id = item["id"]
            .as_str()
            .map(|s| s.to_string())
            .or_else(|| item["id"].as_i64().map(|n| n.to_string()));

        let title = item["name"]
            .as_str()
            .or_else(|| item["title"].as_str())
            .or_else(|| item["attributes"]["title"].as_str())
            .map(|s| s.to_string());

        let artist_name = item["artist"]["name"]
            .as_str()
            .or_else(|| item["artists"][0]["name"].as_str())
            .or_else(|| item["attributes"]["artistName"].as_str())
            .map(|s| s.to_string());

        match (id, title, artist_name) {
            (Some(id), Some(title), Some(artist_name))
                if !id.is_empty() && !title.is_empty() && !artist_name.is_empty() =>
            {
                out.push(SearchCandidate {
                    id,
                    title,
                    artist_name,
                });
            }
            _ => continue,
        }
    }
    out
}

#[async_trait]
impl Provider for TidalProvider {
    fn name(&self) -> &str {
        TidalProvider::name(self)
    }
    fn is_authenticated(&self) -> bool {
        TidalProvider::is_authenticated(self)
    }

    async fn create_playlist(&self, name: &str, description: &str) -> Result<String> {
        let base = Self::base_url();
        // JSON:API-style endpoint: POST /playlists
        let url = format!("{}/playlists?countryCode={}", base, Self::country_code());
        let body = json!({
            "data": {
                "type": "playlists",
                "attributes": {
                    "name": name,
                    "description": description,
                    "public": false
                }
            }
        });
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            let bearer = self.get_bearer().await?;
            let resp = self
                .client
                .post(&url)
                .header(AUTHORIZATION, &bearer)
                .header(CONTENT_TYPE, "application/vnd.tidal.v1+json")
                .json(&body)
                .send()
                .await?;
            let status = resp.status();

            if status == reqwest::StatusCode::TOO_MANY_REQUESTS && attempt <= 3 {
                let retry_after = resp
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|s| s.parse::<u64>().ok())
                    .unwrap_or(2);
                tokio::time::sleep(std::time::Duration::from_secs(retry_after + 1)).await;
                continue;
            }

            if !status.is_success() {
                let txt = resp.text().await.unwrap_or_default();
                return Err(anyhow!(
                    "tidal create playlist failed: {} => {}",
                    status,
                    txt
                ));
            }
            let j: serde_json::Value = resp.json().await?;
            // Tidal JSON:API responses return id under data.id
            let id = j
                .get("data")
                .and_then(|d| d.get("id"))
                .and_then(|v| v.as_str())
                // Fallbacks for older/undocumented shapes
                .or_else(|| j.get("uuid").and_then(|v| v.as_str()))
                .or_else(|| j.get("id").and_then(|v| v.as_str()))
                .ok_or_else(|| anyhow!("no playlist id in response"))?;
            return Ok(id.to_string());
        }
    }

    async fn add_tracks(&self, playlist_id: &str, ids: &[String]) -> Result<()> {
        let bearer = self.get_bearer().await?;
        let base = Self::base_url();
        // JSON:API relationship endpoint: POST /playlists/{id}/relationships/items
        let url = format!(
            "{}/playlists/{}/relationships/items?countryCode={}",
            base,
            playlist_id,
            Self::country_code()
        );
        let data: Vec<serde_json::Value> = ids
            .iter()
            .map(|id| id.trim())
            .filter(|id| !id.is_empty())
            // TIDAL's playlist items endpoints expect a non-null `meta`
            // object on each relationship identifier; an empty object
            // satisfies the schema.
            .map(|id| json!({ "type": "tracks", "id": id, "meta": {} }))
            .collect();
        if data.is_empty() {
            return Ok(());
        }
        let body = json!({ "data": data });
        let resp = self
            .client
            .post(&url)
            .header(AUTHORIZATION, &bearer)
            .header(CONTENT_TYPE, "application/vnd.tidal.v1+json")
            .json(&body)
            .send()
            .await?;
        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            return Err(anyhow!("rate_limited: retry_after={:?}", retry_after));
        }
        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(anyhow!("tidal add tracks failed: {} => {}", status, txt));
        }
        Ok(())
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<SearchCandidate>> {
        let bearer = self.get_bearer().await?;
        let base = Self::base_url();
        let url = format!(
            "{}/search/tracks?query={}&limit={}&countryCode={}",
            base,
            urlencoding::encode(query),
            SEARCH_PAGE_LIMIT,
            Self::country_code()
        );
        let resp = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &bearer)
            .send()
            .await?;
        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            return Err(anyhow!("tidal search failed: {} => {}", status, txt));
        }
        let j: serde_json::Value = resp.json().await?;
        Ok(parse_search_candidates(&j))
    }
}
