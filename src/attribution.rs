//! Per-contributor line extraction.
//!
//! Multi-artist songs attribute verses through annotation headers that
//! name the performer, e.g. `[Verse 2: Khalid]`. This module isolates the
//! lines spoken by a single contributor so the frequency engine can answer
//! "who said it" questions.

use tracing::debug;

use crate::corpus::{Corpus, Song};
use crate::normalize::strip_annotations;

/// Extract only the lines performed by `contributor` from a song.
///
/// A contributor's block is preceded by a header containing
/// `": " + contributor`. When no such header exists the song has no
/// per-line attribution: the whole song (annotations stripped) belongs to
/// the primary artist, and any other name matches nobody, so the result
/// is empty. An empty result is an expected query outcome, not a failure.
///
/// Each extracted verse runs from the end of its header to the next blank
/// line (or end of text) and is prefixed with a line break in the
/// accumulated result.
#[must_use]
pub fn contributor_lines(song: &Song, contributor: &str) -> String {
    let Some(lyrics) = song.lyrics.as_deref() else {
        return String::new();
    };

    let needle = format!(": {contributor}");
    if !lyrics.contains(&needle) {
        if contributor == song.primary_artist {
            return strip_annotations(lyrics);
        }
        debug!(contributor, title = %song.display_title(), "contributor not credited in song");
        return String::new();
    }

    let mut extracted = String::new();
    let mut cursor = 0;
    while let Some(found) = lyrics[cursor..].find(&needle) {
        // Skip the needle plus the closing "]\n" of the header.
        let mut start = cursor + found + needle.len() + 2;
        start = start.min(lyrics.len());
        while start < lyrics.len() && !lyrics.is_char_boundary(start) {
            start += 1;
        }

        let end = lyrics[start..]
            .find("\n\n")
            .map_or(lyrics.len(), |offset| start + offset);

        extracted.push('\n');
        extracted.push_str(&lyrics[start..end]);
        cursor = end;
    }
    extracted
}

/// [`contributor_lines`] addressed by corpus position.
///
/// A position outside the corpus yields the empty string, never an error:
/// the caller is probing, and sparsity is expected.
#[must_use]
pub fn contributor_lines_at(corpus: &Corpus, index: usize, contributor: &str) -> String {
    corpus
        .song(index)
        .map_or_else(String::new, |song| contributor_lines(song, contributor))
}
