use csv_playlist_online_import::score::{artist_matches, title_overlap, title_word_set};

#[test]
fn artist_match_is_case_insensitive_and_symmetric() {
    assert!(artist_matches("drake", "Drake"));
    assert!(artist_matches("Drake", "drake"));
    // containment in either direction qualifies
    assert!(artist_matches("The Weeknd", "Weeknd"));
    assert!(artist_matches("Weeknd", "The Weeknd"));
    assert!(!artist_matches("Drake", "The Weeknd"));
}

#[test]
fn overlap_is_intersection_over_max() {
    let wanted = title_word_set("shape of you");
    assert_eq!(title_overlap(&wanted, "shape of you remix"), 0.75);
    assert_eq!(title_overlap(&wanted, "shape of you"), 1.0);
    assert_eq!(title_overlap(&wanted, "completely different title"), 0.0);
}

#[test]
fn overlap_normalizes_candidate_side() {
    let wanted = title_word_set("blinding lights");
    // candidate-side noise tokens are stripped before comparison
    assert_eq!(title_overlap(&wanted, "Blinding Lights (feat. Nobody)"), 2.0 / 3.0);
}

#[test]
fn overlap_of_empty_sets_is_zero() {
    let wanted = title_word_set("");
    assert_eq!(title_overlap(&wanted, ""), 0.0);
    assert_eq!(title_overlap(&wanted, "something"), 0.0);
}
