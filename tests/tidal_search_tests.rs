use csv_playlist_online_import::api::tidal::TidalProvider;
use csv_playlist_online_import::api::Provider;
use csv_playlist_online_import::db;
use csv_playlist_online_import::models::SearchCandidate;
use mockito::{Matcher, Server};
use rusqlite::Connection;
use serde_json::json;
use std::env;
use tempfile::tempdir;

fn seed_token_db(db_path: &std::path::Path) {
    let conn = Connection::open(db_path).unwrap();
    db::run_migrations(&conn).unwrap();
    let now = chrono::Utc::now().timestamp();
    let stored = json!({
        "access_token": "valid",
        "token_type": "Bearer",
        "expires_at": now + 3600,
        "refresh_token": null,
        "scope": ""
    })
    .to_string();
    db::save_credential_raw(&conn, "tidal", &stored, Some("cid"), Some("csecret")).unwrap();
}

#[test]
fn tidal_search_returns_parsed_candidates() {
    let mut server = Server::new();
    let base = server.url();
    env::set_var("TIDAL_API_BASE", &base);
    env::set_var("TIDAL_AUTH_BASE", &base);

    let _m = server
        .mock("GET", Matcher::Regex("^/search/tracks".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "tracks": [
                    { "id": 42, "name": "Blinding Lights", "artist": { "name": "The Weeknd" } },
                    { "id": 43, "name": "Blinding Lights (Remix)", "artist": { "name": "The Weeknd" } }
                ]
            })
            .to_string(),
        )
        .create();

    let td = tempdir().unwrap();
    let db_path = td.path().join("test.db");
    seed_token_db(&db_path);

    let provider = TidalProvider::new("cid".into(), "csecret".into(), db_path);
    let rt = tokio::runtime::Runtime::new().unwrap();
    let res = rt
        .block_on(async move { provider.search_tracks("Blinding Lights The Weeknd").await })
        .unwrap();

    assert_eq!(
        res,
        vec![
            SearchCandidate {
                id: "42".into(),
                title: "Blinding Lights".into(),
                artist_name: "The Weeknd".into()
            },
            SearchCandidate {
                id: "43".into(),
                title: "Blinding Lights (Remix)".into(),
                artist_name: "The Weeknd".into()
            },
        ]
    );
}
