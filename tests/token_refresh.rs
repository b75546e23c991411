use csv_playlist_online_import::api::tidal::TidalProvider;
use csv_playlist_online_import::db;
use mockito::{Matcher, Server};
use rusqlite::Connection;
use serde_json::json;
use std::env;
use tempfile::tempdir;

#[test]
fn tidal_refresh_updates_stored_token() {
    let mut server = Server::new();
    let base = server.url();
    env::set_var("TIDAL_API_BASE", &base);
    env::set_var("TIDAL_AUTH_BASE", &base);

    let _m_token = server
        .mock("POST", Matcher::Regex("^/v1/oauth2/token".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "access_token": "fresh",
                "token_type": "Bearer",
                "expires_in": 3600,
                "scope": "playlists.write"
            })
            .to_string(),
        )
        .create();

    // store an already-expired token that carries a refresh token
    let td = tempdir().unwrap();
    let db_path = td.path().join("test.db");
    let conn = Connection::open(&db_path).unwrap();
    db::run_migrations(&conn).unwrap();
    let now = chrono::Utc::now().timestamp();
    let stored = json!({
        "access_token": "stale",
        "token_type": "Bearer",
        "expires_at": now - 10,
        "refresh_token": "refresh-me",
        "scope": ""
    })
    .to_string();
    db::save_credential_raw(&conn, "tidal", &stored, Some("cid"), Some("csecret")).unwrap();

    let provider = TidalProvider::new("cid".into(), "csecret".into(), db_path.clone());
    let rt = tokio::runtime::Runtime::new().unwrap();
    rt.block_on(async { provider.test_refresh_token().await }).unwrap();

    // the refreshed token was persisted back to the credential store
    let conn = Connection::open(&db_path).unwrap();
    let (token_json, client_id, _secret) = db::load_credential_with_client(&conn, "tidal")
        .unwrap()
        .unwrap();
    let j: serde_json::Value = serde_json::from_str(&token_json).unwrap();
    assert_eq!(j["access_token"], "fresh");
    assert!(j["expires_at"].as_i64().unwrap() > now);
    // client credentials survive the upsert
    assert_eq!(client_id.as_deref(), Some("cid"));
}
