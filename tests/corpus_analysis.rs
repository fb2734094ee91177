//! End-to-end corpus analysis scenarios.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use serde_json::json;

use lyriclens::aggregate::{
    self, song_with_max_word_count, sum_word_count, uniqueness_percent,
};
use lyriclens::attribution::contributor_lines;
use lyriclens::frequency::{self, word_count};
use lyriclens::normalize::{self, NormalizeOptions};
use lyriclens::presets::{JsonPresetStore, PresetStore};
use lyriclens::{Corpus, Error, ExclusionList, FrequencyTable, Song};

fn opts() -> NormalizeOptions {
    NormalizeOptions::default()
}

#[test]
fn repeated_word_is_counted_case_insensitively() {
    let song = Song::new("Yes", "A", "I said yes yes YES");
    assert_eq!(word_count(&song, "yes", None, opts()), 3);
}

#[test]
fn contributor_lines_isolate_the_named_performer() {
    let song = Song::new(
        "Duet",
        "A",
        "[Chorus: A]\nHello\n\n[Verse: B]\nHello again",
    );
    let lines = contributor_lines(&song, "B");
    assert!(lines.contains("Hello again"));
    assert!(!lines.contains("Hello\n"));
    assert_eq!(lines.trim(), "Hello again");
}

#[test]
fn corpus_sum_and_max_respect_exclusions() {
    let corpus = Corpus::new(vec![
        Song::new("First", "A", "love love"),
        Song::new("Second", "A", "nothing here"),
        Song::new("Third", "A", "love love love\nlove love"),
    ]);
    let exclusions = ExclusionList::from_positions(&[1]);

    assert_eq!(
        sum_word_count(&corpus, "love", &exclusions, None, opts()).unwrap(),
        7
    );

    let max = song_with_max_word_count(&corpus, "love", &exclusions, None, opts()).unwrap();
    assert_eq!(max.count, 5);
    assert_eq!(max.title, "Third");
}

#[test]
fn uniqueness_percent_of_six_distinct_in_ten() {
    let song = Song::new("T", "A", "a b c d e f a b c d");
    let percent = uniqueness_percent(&song, None, opts()).unwrap();
    assert!((percent - 60.0).abs() < 1e-9);
}

#[test]
fn normalization_is_idempotent() {
    let raw = "Song Title Lyrics[Verse 1: Name]\nDon't stop, believin'!\u{200b}\n\n42Embed";
    let once = normalize::normalize(raw, opts());
    let twice = normalize::normalize(&once, opts());
    assert_eq!(once, twice);
}

#[test]
fn table_merge_is_associative() {
    let songs = [
        Song::new("A", "X", "one two two"),
        Song::new("B", "X", "two three"),
        Song::new("C", "X", "three three one"),
    ];
    let tables: Vec<FrequencyTable> = songs
        .iter()
        .map(|song| frequency::word_counts(song, None, opts()))
        .collect();

    let mut left_first = tables[0].clone();
    left_first.merge(tables[1].clone());
    left_first.merge(tables[2].clone());

    let mut right_first = tables[1].clone();
    right_first.merge(tables[2].clone());
    let mut other = tables[0].clone();
    other.merge(right_first);

    assert_eq!(left_first, other);
    assert_eq!(left_first.count("two"), 3);
    assert_eq!(left_first.count("three"), 3);
}

#[test]
fn complementary_exclusions_merge_to_the_full_corpus_counts() {
    let corpus = Corpus::new(vec![
        Song::new("A", "X", "one two two"),
        Song::new("B", "X", "two three"),
        Song::new("C", "X", "three three one"),
    ]);

    // Disjoint exclusion sets covering the corpus: each song is counted
    // in exactly one partition, so merging the partitions must equal the
    // unexcluded totals.
    let keep_first = ExclusionList::from_positions(&[1, 2]);
    let keep_rest = ExclusionList::from_positions(&[0]);
    let none = ExclusionList::none();

    let mut merged = aggregate::word_counts(&corpus, &keep_first, None, opts()).unwrap();
    merged.merge(aggregate::word_counts(&corpus, &keep_rest, None, opts()).unwrap());
    let full = aggregate::word_counts(&corpus, &none, None, opts()).unwrap();

    assert_eq!(merged, full);
    assert_eq!(full.count("two"), 3);
    assert_eq!(full.total(), 8);
}

#[test]
fn any_invalid_exclusion_entry_rejects_the_whole_query() {
    let corpus = Corpus::new(vec![
        Song::new("A", "X", "la"),
        Song::new("B", "X", "la"),
    ]);
    for bad in [json!(-1), json!(2), json!(0.5), json!("Seven")] {
        let list = ExclusionList(vec![json!(0), bad]);
        let err = sum_word_count(&corpus, "la", &list, None, opts()).unwrap_err();
        assert!(matches!(err, Error::InvalidExclusions { .. }), "{err}");
    }
}

#[test]
fn preset_round_trip_feeds_an_aggregate_query() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonPresetStore::new(dir.path().join("presets.json"));
    store
        .save("skip covers", &ExclusionList::from_positions(&[0]))
        .unwrap();

    let corpus = Corpus::new(vec![
        Song::new("Cover", "A", "yeah yeah yeah"),
        Song::new("Original", "A", "yeah"),
    ]);
    let loaded = store.load("skip covers").unwrap();
    assert_eq!(
        sum_word_count(&corpus, "yeah", &loaded, None, opts()).unwrap(),
        1
    );
    assert_eq!(
        aggregate::included_titles(&corpus, &loaded).unwrap(),
        vec!["Original".to_string()]
    );
}

#[test]
fn contributor_scoped_corpus_sum_only_counts_their_verses() {
    let corpus = Corpus::new(vec![
        Song::new(
            "Duet",
            "A",
            "[Verse 1: A]\ngold gold\n\n[Verse 2: B]\ngold\n",
        ),
        Song::new("Solo", "B", "gold gold gold"),
    ]);
    let none = ExclusionList::none();
    // B gets their duet verse plus the whole solo song.
    assert_eq!(
        sum_word_count(&corpus, "gold", &none, Some("B"), opts()).unwrap(),
        4
    );
    assert_eq!(
        sum_word_count(&corpus, "gold", &none, Some("A"), opts()).unwrap(),
        2
    );
}
