use csv_playlist_online_import::table::{list_csv_files, read_entries};
use std::io::Write;
use tempfile::tempdir;

#[test]
fn reads_entries_and_keeps_first_artist_only() {
    let td = tempdir().unwrap();
    let path = td.path().join("mix.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "Track Name,Artist Name(s),Album Name").unwrap();
    writeln!(f, "Blinding Lights,\"The Weeknd, Co Artist\",After Hours").unwrap();
    writeln!(f, "Solo Song,Just One,Some Album").unwrap();
    drop(f);

    let entries = read_entries(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].track, "Blinding Lights");
    assert_eq!(entries[0].artist, "The Weeknd");
    assert_eq!(entries[1].artist, "Just One");
}

#[test]
fn malformed_rows_are_skipped() {
    let td = tempdir().unwrap();
    let path = td.path().join("broken.csv");
    let mut f = std::fs::File::create(&path).unwrap();
    writeln!(f, "Track Name,Artist Name(s)").unwrap();
    writeln!(f, "Good Song,Artist").unwrap();
    writeln!(f, "only-one-field").unwrap();
    writeln!(f, "Another Song,Someone").unwrap();
    drop(f);

    let entries = read_entries(&path).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].track, "Good Song");
    assert_eq!(entries[1].track, "Another Song");
}

#[test]
fn lists_only_csv_files_sorted() {
    let td = tempdir().unwrap();
    std::fs::write(td.path().join("b.csv"), "x").unwrap();
    std::fs::write(td.path().join("a.csv"), "x").unwrap();
    std::fs::write(td.path().join("notes.txt"), "x").unwrap();

    let files = list_csv_files(td.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["a.csv", "b.csv"]);
}
