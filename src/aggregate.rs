//! Corpus-wide queries.
//!
//! Every operation here validates the caller's exclusion list before
//! touching a single song and refuses the whole query when validation
//! fails. Past that gate, per-song sparsity (missing lyrics, a contributor
//! with no lines) contributes zero and never aborts an aggregate.

use rayon::prelude::*;

use crate::corpus::{Corpus, Song};
use crate::error::Result;
use crate::exclusions::{ExclusionList, ExclusionSet};
use crate::frequency::{self, FrequencyTable};
use crate::normalize::NormalizeOptions;

/// The winner of a "which song has the most" query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaxCount {
    /// The winning count. Zero when no included song contains the query.
    pub count: u64,
    /// Display title of the earliest song with the winning count, empty
    /// when the count is zero.
    pub title: String,
    /// Every tied display title, in corpus order, when two or more songs
    /// share a nonzero winning count. Empty otherwise.
    pub ties: Vec<String>,
}

/// The songs surviving exclusion, with their corpus positions.
fn included<'a>(corpus: &'a Corpus, set: &ExclusionSet) -> Vec<(usize, &'a Song)> {
    corpus
        .songs
        .iter()
        .enumerate()
        .filter(|(index, _)| !set.contains(*index))
        .collect()
}

/// Total occurrences of `word` across every included song.
pub fn sum_word_count(
    corpus: &Corpus,
    word: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<u64> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| frequency::word_count(song, word, contributor, options))
        .sum())
}

/// Total occurrences of `phrase` across every included song.
pub fn sum_phrase_count(
    corpus: &Corpus,
    phrase: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<u64> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| frequency::phrase_count(song, phrase, contributor, options))
        .sum())
}

/// Total boundary-free occurrences of `needle` across every included
/// song.
pub fn sum_substring_count(
    corpus: &Corpus,
    needle: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<u64> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| frequency::substring_count(song, needle, contributor, options))
        .sum())
}

/// Merged token frequencies over every included song.
pub fn word_counts(
    corpus: &Corpus,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<FrequencyTable> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| frequency::word_counts(song, contributor, options))
        .reduce(FrequencyTable::new, FrequencyTable::merged_with))
}

/// Merged adjacent-pair frequencies over every included song.
pub fn two_word_phrase_counts(
    corpus: &Corpus,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<FrequencyTable> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| frequency::two_word_phrase_counts(song, contributor, options))
        .reduce(FrequencyTable::new, FrequencyTable::merged_with))
}

/// Pick the winner out of per-song counts in corpus order.
fn max_of(counts: Vec<(&Song, u64)>) -> MaxCount {
    let best = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    if best == 0 {
        return MaxCount::default();
    }
    let tied: Vec<String> = counts
        .iter()
        .filter(|(_, count)| *count == best)
        .map(|(song, _)| song.display_title())
        .collect();
    let title = tied.first().cloned().unwrap_or_default();
    let ties = if tied.len() > 1 { tied } else { Vec::new() };
    MaxCount { count: best, title, ties }
}

/// The included song containing `word` the most times.
///
/// When several songs share the winning count, `title` is the earliest
/// one and `ties` lists all of them. All counts zero yields the default
/// `MaxCount`.
pub fn song_with_max_word_count(
    corpus: &Corpus,
    word: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<MaxCount> {
    let set = exclusions.validate(corpus)?;
    let counts: Vec<(&Song, u64)> = included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| (song, frequency::word_count(song, word, contributor, options)))
        .collect();
    Ok(max_of(counts))
}

/// The included song containing `phrase` the most times.
pub fn song_with_max_phrase_count(
    corpus: &Corpus,
    phrase: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<MaxCount> {
    let set = exclusions.validate(corpus)?;
    let counts: Vec<(&Song, u64)> = included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| (song, frequency::phrase_count(song, phrase, contributor, options)))
        .collect();
    Ok(max_of(counts))
}

/// The included song containing `needle` the most times, word boundaries
/// ignored.
pub fn song_with_max_substring_count(
    corpus: &Corpus,
    needle: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<MaxCount> {
    let set = exclusions.validate(corpus)?;
    let counts: Vec<(&Song, u64)> = included(corpus, &set)
        .into_par_iter()
        .map(|(_, song)| (song, frequency::substring_count(song, needle, contributor, options)))
        .collect();
    Ok(max_of(counts))
}

/// Display titles of every included song containing `word` at least once,
/// in corpus order.
pub fn songs_containing_word(
    corpus: &Corpus,
    word: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<Vec<String>> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_iter()
        .filter(|(_, song)| frequency::word_count(song, word, contributor, options) > 0)
        .map(|(_, song)| song.display_title())
        .collect())
}

/// Display titles of every included song containing `phrase` at least
/// once, in corpus order.
pub fn songs_containing_phrase(
    corpus: &Corpus,
    phrase: &str,
    exclusions: &ExclusionList,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<Vec<String>> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_iter()
        .filter(|(_, song)| frequency::phrase_count(song, phrase, contributor, options) > 0)
        .map(|(_, song)| song.display_title())
        .collect())
}

/// Display titles of the songs the exclusion list keeps, in corpus order.
pub fn included_titles(corpus: &Corpus, exclusions: &ExclusionList) -> Result<Vec<String>> {
    let set = exclusions.validate(corpus)?;
    Ok(included(corpus, &set)
        .into_iter()
        .map(|(_, song)| song.display_title())
        .collect())
}

/// Display titles of the songs the exclusion list removes, in corpus
/// order.
pub fn excluded_titles(corpus: &Corpus, exclusions: &ExclusionList) -> Result<Vec<String>> {
    let set = exclusions.validate(corpus)?;
    Ok(corpus
        .songs
        .iter()
        .enumerate()
        .filter(|(index, _)| set.contains(*index))
        .map(|(_, song)| song.display_title())
        .collect())
}

/// Every artist credited on an included song, sorted and deduplicated.
pub fn artists(corpus: &Corpus, exclusions: &ExclusionList) -> Result<Vec<String>> {
    let set = exclusions.validate(corpus)?;
    let mut names: Vec<String> = included(corpus, &set)
        .into_iter()
        .flat_map(|(_, song)| song.credited_artists())
        .collect();
    names.sort();
    names.dedup();
    Ok(names)
}

/// Share of distinct tokens in a song, as a percentage rounded to four
/// decimal places.
///
/// A song with no tokens after normalization has no defined uniqueness
/// and is reported as [`Error::EmptySong`](crate::Error::EmptySong).
pub fn uniqueness_percent(
    song: &Song,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Result<f64> {
    let table = frequency::word_counts(song, contributor, options);
    let total = table.total();
    if total == 0 {
        return Err(crate::Error::EmptySong { title: song.display_title() });
    }
    #[allow(clippy::cast_precision_loss)]
    let percent = 100.0 * table.distinct() as f64 / total as f64;
    Ok((percent * 10_000.0).round() / 10_000.0)
}
