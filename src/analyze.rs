//! Per-song summary report.

use serde::{Deserialize, Serialize};

use crate::aggregate::uniqueness_percent;
use crate::corpus::Corpus;
use crate::error::{Error, Result};
use crate::frequency::{total_words, two_word_phrase_counts, unique_words, word_counts};
use crate::normalize::NormalizeOptions;

/// How many top words and phrases a [`SongReport`] carries.
const TOP_N: usize = 5;

/// Summary statistics for one song.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongReport {
    /// Display title of the song.
    pub title: String,
    /// The credited owner of the song.
    pub primary_artist: String,
    /// Featured artists, in credit order.
    pub featured_artists: Vec<String>,
    /// Total token count after normalization.
    pub total_words: u64,
    /// Distinct token count after normalization.
    pub unique_words: u64,
    /// Distinct share of all tokens as a percentage, `None` when the song
    /// has no tokens.
    pub uniqueness_percent: Option<f64>,
    /// The five most frequent tokens with their counts.
    pub top_words: Vec<(String, u64)>,
    /// The five most frequent adjacent token pairs with their counts.
    pub top_two_word_phrases: Vec<(String, u64)>,
}

/// Build the summary for the song at `index`.
///
/// An out-of-bounds position is an error here: unlike a frequency query,
/// a summary for a nonexistent song has no meaningful zero value.
pub fn song_report(
    corpus: &Corpus,
    index: usize,
    options: NormalizeOptions,
) -> Result<SongReport> {
    let song = corpus
        .song(index)
        .ok_or(Error::SongIndexOutOfBounds { index, len: corpus.len() })?;

    let total = total_words(song, None, options);
    let uniqueness = if total == 0 {
        None
    } else {
        Some(uniqueness_percent(song, None, options)?)
    };

    let top = |table: crate::FrequencyTable| {
        table
            .most_common()
            .into_iter()
            .take(TOP_N)
            .map(|(token, count)| (token.to_string(), count))
            .collect()
    };

    Ok(SongReport {
        title: song.display_title(),
        primary_artist: song.primary_artist.clone(),
        featured_artists: song.featured_artists.clone(),
        total_words: total,
        unique_words: unique_words(song, None, options),
        uniqueness_percent: uniqueness,
        top_words: top(word_counts(song, None, options)),
        top_two_word_phrases: top(two_word_phrase_counts(song, None, options)),
    })
}
