//! Lyric text normalization.
//!
//! Raw lyric text arrives with bracketed annotation headers (`[Chorus]`,
//! `[Verse 2: Artist]`), site boilerplate around the actual lyrics, a
//! fixed punctuation set, and a couple of unicode artifacts that silently
//! break exact-match comparisons. This module reduces that text to a
//! lowercase, punctuation-free string ready for tokenization.

use std::sync::LazyLock;

use regex::Regex;

use crate::corpus::ZERO_WIDTH_SPACE;

/// Four-per-em space the lyric source sometimes emits instead of an
/// ordinary space.
const NARROW_SPACE: char = '\u{2005}';

/// The fixed punctuation class stripped from lyric text.
const PUNCTUATION: &[char] = &[
    '!', '(', ')', '-', '[', ']', '{', '}', ';', ':', '"', '\\', ',', '<', '>', '.', '/', '?',
    '@', '#', '$', '%', '^', '&', '*', '_', '~',
];

/// Normalization policy options.
///
/// The apostrophe is a configurable member of the punctuation class. The
/// default keeps apostrophes, so contractions stay distinct tokens
/// (`"what's"` never equals `"whats"`). Stripping them merges the two.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Treat the apostrophe as punctuation and remove it.
    pub strip_apostrophes: bool,
}

impl NormalizeOptions {
    /// The policy that removes apostrophes along with the fixed class.
    #[must_use]
    pub const fn stripping_apostrophes() -> Self {
        Self { strip_apostrophes: true }
    }
}

/// Strip the lyric site's boilerplate wrapper.
///
/// Removes a leading `"<anything> Lyrics["` marker (keeping the `[` so the
/// first annotation header is removed by [`strip_annotations`]) and, when
/// that marker was present, a trailing `<digits>Embed` footer. Fixed
/// format, best effort; text without the markers passes through untouched.
#[must_use]
pub fn strip_boilerplate(lyrics: &str) -> String {
    #[allow(clippy::unwrap_used)] // compile-time constant pattern
    static RE_FOOTER: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"\d*Embed$").unwrap());

    let Some(marker) = lyrics.find(" Lyrics[") else {
        return lyrics.to_string();
    };
    // Keep the '[': annotation stripping removes it with its header.
    let body = &lyrics[marker + " Lyrics".len()..];
    RE_FOOTER.replace(body, "").into_owned()
}

/// Strip annotation headers from raw lyric text.
///
/// Headers are bracketed spans like `[Chorus: Artist]` or `[Verse 2]`.
/// Removal is leftmost-first and non-nesting: repeatedly delete from the
/// first `[` through the first `]` at or after it. An unterminated `[`
/// truncates the text to end-of-string rather than looping. Site
/// boilerplate is stripped first. Idempotent; empty input yields empty
/// output.
#[must_use]
pub fn strip_annotations(lyrics: &str) -> String {
    let mut text = strip_boilerplate(lyrics);
    while let Some(open) = text.find('[') {
        match text[open..].find(']') {
            Some(offset) => {
                text.replace_range(open..=open + offset, "");
            }
            None => {
                // Missing closing bracket: delete through end-of-string.
                text.truncate(open);
            }
        }
    }
    text
}

/// Remove the fixed punctuation class from `text`.
///
/// The apostrophe is removed only under
/// [`NormalizeOptions::strip_apostrophes`].
#[must_use]
pub fn strip_punctuation(text: &str, options: NormalizeOptions) -> String {
    text.chars()
        .filter(|c| !PUNCTUATION.contains(c) && !(options.strip_apostrophes && *c == '\''))
        .collect()
}

/// Replace the source corpus's unicode artifacts.
///
/// The zero-width space is deleted; the narrow non-breaking space becomes
/// an ordinary space. Both otherwise survive into tokens and break exact
/// matching.
#[must_use]
pub fn fix_unicode_artifacts(text: &str) -> String {
    text.chars()
        .filter_map(|c| match c {
            ZERO_WIDTH_SPACE => None,
            NARROW_SPACE => Some(' '),
            other => Some(other),
        })
        .collect()
}

/// Full normalization pipeline for lyric text.
///
/// Strips annotations (and boilerplate), fixes unicode artifacts, strips
/// punctuation, and lowercases. The result is a single string; split it
/// with [`tokenize`] for word-level work or match against it directly for
/// phrase-level work.
#[must_use]
pub fn normalize(lyrics: &str, options: NormalizeOptions) -> String {
    let text = strip_annotations(lyrics);
    let text = fix_unicode_artifacts(&text);
    strip_punctuation(&text, options).to_lowercase()
}

/// Normalize a query term (keyword or phrase) the same way lyric text is
/// normalized, minus annotation stripping.
#[must_use]
pub fn normalize_term(term: &str, options: NormalizeOptions) -> String {
    let text = fix_unicode_artifacts(term);
    strip_punctuation(&text, options).to_lowercase()
}

/// Split normalized text into word tokens on whitespace.
pub fn tokenize(normalized: &str) -> impl Iterator<Item = &str> {
    normalized.split_whitespace()
}
