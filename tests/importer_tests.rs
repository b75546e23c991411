use csv_playlist_online_import::api::mock::MockProvider;
use csv_playlist_online_import::importer::{import_entries, ImportOptions};
use csv_playlist_online_import::models::{ImportEntry, SearchCandidate};
use std::time::Duration;

fn entry(track: &str, artist: &str) -> ImportEntry {
    ImportEntry {
        track: track.into(),
        artist: artist.into(),
    }
}

fn candidate(id: &str, title: &str, artist: &str) -> SearchCandidate {
    SearchCandidate {
        id: id.into(),
        title: title.into(),
        artist_name: artist.into(),
    }
}

fn no_pacing() -> ImportOptions {
    ImportOptions {
        search_pacing: Duration::ZERO,
        entry_pacing: Duration::ZERO,
    }
}

#[test]
fn report_accounting_holds_for_mixed_outcomes() {
    let provider = MockProvider::new();
    provider.set_results(
        "Blinding Lights The Weeknd",
        vec![candidate("42", "Blinding Lights", "The Weeknd")],
    );
    // second entry gets no results anywhere

    let entries = vec![
        entry("Blinding Lights", "The Weeknd"),
        entry("Nonexistent Song", "Nobody"),
    ];

    let rt = tokio::runtime::Runtime::new().unwrap();
    let report = rt
        .block_on(import_entries(
            &provider,
            "My Mix",
            "Imported from CSV",
            &entries,
            &no_pacing(),
        ))
        .unwrap();

    assert_eq!(report.total_songs, 2);
    assert_eq!(report.successful_adds, 1);
    assert_eq!(report.not_found_songs, vec!["Nonexistent Song - Nobody"]);
    assert_eq!(
        report.successful_adds + report.not_found_songs.len(),
        report.total_songs
    );
    assert_eq!(provider.added_ids(), vec!["42"]);
}

#[test]
fn append_failure_downgrades_entry_to_not_found() {
    let provider = MockProvider::with_failing_adds();
    provider.set_results(
        "Blinding Lights The Weeknd",
        vec![candidate("42", "Blinding Lights", "The Weeknd")],
    );

    let entries = vec![entry("Blinding Lights", "The Weeknd")];

    let rt = tokio::runtime::Runtime::new().unwrap();
    let report = rt
        .block_on(import_entries(
            &provider,
            "My Mix",
            "Imported from CSV",
            &entries,
            &no_pacing(),
        ))
        .unwrap();

    // resolution succeeded but the append failed, so the entry counts as
    // not-found and the accounting rule still holds
    assert_eq!(report.successful_adds, 0);
    assert_eq!(
        report.not_found_songs,
        vec!["Blinding Lights - The Weeknd"]
    );
    assert_eq!(
        report.successful_adds + report.not_found_songs.len(),
        report.total_songs
    );
}

#[test]
fn entries_keep_source_order_in_not_found_list() {
    let provider = MockProvider::new();
    let entries = vec![
        entry("First Miss", "A"),
        entry("Second Miss", "B"),
        entry("Third Miss", "C"),
    ];

    let rt = tokio::runtime::Runtime::new().unwrap();
    let report = rt
        .block_on(import_entries(
            &provider,
            "Misses",
            "Imported from CSV",
            &entries,
            &no_pacing(),
        ))
        .unwrap();

    assert_eq!(
        report.not_found_songs,
        vec!["First Miss - A", "Second Miss - B", "Third Miss - C"]
    );
}
