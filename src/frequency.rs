//! Token and phrase frequency counting for a single song.
//!
//! Every operation runs the same pipeline: resolve the song's text
//! (optionally filtered to one contributor's lines), normalize it, then
//! count. Corpus-wide numbers are built by merging the per-song
//! [`FrequencyTable`]s in `aggregate`.

use std::collections::HashMap;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::attribution::contributor_lines;
use crate::corpus::Song;
use crate::normalize::{normalize, normalize_term, tokenize, NormalizeOptions};

/// A token-to-count map with deterministic reporting order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrequencyTable {
    counts: HashMap<String, u64>,
}

impl FrequencyTable {
    /// An empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more occurrence of `token`.
    pub fn add(&mut self, token: impl Into<String>) {
        *self.counts.entry(token.into()).or_insert(0) += 1;
    }

    /// Occurrences of `token`, zero when absent.
    #[must_use]
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True when no token has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Fold `other` into `self`, summing counts per token.
    ///
    /// Merging is associative and commutative, so per-song tables can be
    /// combined in any grouping and the corpus total is unchanged.
    pub fn merge(&mut self, other: Self) {
        for (token, count) in other.counts {
            *self.counts.entry(token).or_insert(0) += count;
        }
    }

    /// [`merge`](Self::merge) with a consuming-operator shape for reduce
    /// pipelines.
    #[must_use]
    pub fn merged_with(mut self, other: Self) -> Self {
        self.merge(other);
        self
    }

    /// Entries ordered by descending count, ties broken by token order.
    #[must_use]
    pub fn most_common(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<(&str, u64)> = self
            .counts
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        entries
    }
}

impl FromIterator<(String, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (token, count) in iter {
            *table.counts.entry(token).or_insert(0) += count;
        }
        table
    }
}

// usize never exceeds the u64 range on supported targets.
fn to_count(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

/// The song's text for counting: all lyrics, or one contributor's lines.
fn resolve_text(song: &Song, contributor: Option<&str>) -> String {
    match contributor {
        Some(name) => contributor_lines(song, name),
        None => song.lyrics.clone().unwrap_or_default(),
    }
}

fn normalized_text(song: &Song, contributor: Option<&str>, options: NormalizeOptions) -> String {
    normalize(&resolve_text(song, contributor), options)
}

/// Occurrences of `word` as a whole token in the song.
///
/// The query word goes through the same normalization as the lyrics, so
/// the punctuation policy applies to both sides of the comparison.
/// Missing lyrics count zero.
#[must_use]
pub fn word_count(
    song: &Song,
    word: &str,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> u64 {
    let needle = normalize_term(word, options);
    if needle.is_empty() {
        return 0;
    }
    let text = normalized_text(song, contributor, options);
    to_count(tokenize(&text).filter(|token| *token == needle).count())
}

/// Non-overlapping occurrences of a multi-word phrase in the song.
///
/// Matched against the normalized, un-tokenized text with word boundaries
/// on both ends, so "oh oh oh" contains "oh oh" once, not twice. Under
/// the default keep-apostrophes policy a phrase ending in an apostrophe
/// (`"lovin'"`) never matches: there is no word boundary between the
/// apostrophe and the following space. Use [`substring_count`] for
/// boundary-free matching.
#[must_use]
pub fn phrase_count(
    song: &Song,
    phrase: &str,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> u64 {
    let needle = normalize_term(phrase, options);
    if needle.is_empty() {
        return 0;
    }
    // An escaped literal between word boundaries is always a valid pattern.
    let Ok(matcher) = Regex::new(&format!(r"\b{}\b", regex::escape(&needle))) else {
        return 0;
    };
    let text = normalized_text(song, contributor, options);
    to_count(matcher.find_iter(&text).count())
}

/// Non-overlapping occurrences of `needle` anywhere in the normalized
/// text, word boundaries ignored.
///
/// The third counting mode next to exact-token and whole-phrase matching:
/// "lov" is found inside "love", "loving", and "glove". Scanning is
/// leftmost non-overlapping, so "aaaa" contains "aa" twice.
#[must_use]
pub fn substring_count(
    song: &Song,
    needle: &str,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> u64 {
    let needle = normalize_term(needle, options);
    if needle.is_empty() {
        return 0;
    }
    let text = normalized_text(song, contributor, options);
    to_count(text.matches(&needle).count())
}

/// Frequency of every token in the song.
#[must_use]
pub fn word_counts(
    song: &Song,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> FrequencyTable {
    let text = normalized_text(song, contributor, options);
    let mut table = FrequencyTable::new();
    for token in tokenize(&text) {
        table.add(token);
    }
    table
}

/// Frequency of every pair of adjacent tokens, joined with one space.
#[must_use]
pub fn two_word_phrase_counts(
    song: &Song,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> FrequencyTable {
    let text = normalized_text(song, contributor, options);
    let tokens: Vec<&str> = tokenize(&text).collect();
    let mut table = FrequencyTable::new();
    for pair in tokens.windows(2) {
        table.add(pair.join(" "));
    }
    table
}

/// Frequency of every token window up to `max_len` tokens long.
///
/// Enumerates all windows of length 1..=min(max_len, token count), so the
/// work is quadratic in song length when uncapped. Windows are re-joined
/// with single spaces regardless of the original whitespace.
#[must_use]
pub fn repeated_phrase_counts(
    song: &Song,
    contributor: Option<&str>,
    options: NormalizeOptions,
    max_len: Option<usize>,
) -> FrequencyTable {
    let text = normalized_text(song, contributor, options);
    let tokens: Vec<&str> = tokenize(&text).collect();
    let cap = max_len.map_or(tokens.len(), |m| m.min(tokens.len()));
    let mut table = FrequencyTable::new();
    for len in 1..=cap {
        for window in tokens.windows(len) {
            table.add(window.join(" "));
        }
    }
    table
}

/// Total token count of the song.
#[must_use]
pub fn total_words(song: &Song, contributor: Option<&str>, options: NormalizeOptions) -> u64 {
    let text = normalized_text(song, contributor, options);
    to_count(tokenize(&text).count())
}

/// Number of distinct tokens in the song.
#[must_use]
pub fn unique_words(song: &Song, contributor: Option<&str>, options: NormalizeOptions) -> u64 {
    to_count(word_counts(song, contributor, options).distinct())
}

/// The normalized lyric lines in which `word` appears as a whole token.
#[must_use]
pub fn lines_containing_word(
    song: &Song,
    word: &str,
    contributor: Option<&str>,
    options: NormalizeOptions,
) -> Vec<String> {
    let needle = normalize_term(word, options);
    if needle.is_empty() {
        return Vec::new();
    }
    let text = normalized_text(song, contributor, options);
    text.lines()
        .filter(|line| line.split_whitespace().any(|token| token == needle))
        .map(ToOwned::to_owned)
        .collect()
}
