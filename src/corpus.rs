//! Corpus and song data model.
//!
//! A corpus is an ordered, read-only collection of songs supplied by an
//! external loader; every analysis operation addresses songs by their
//! stable zero-based position. The engine never mutates a corpus.

use serde::{Deserialize, Serialize};

/// Zero-width space that the lyric source leaks into some titles and
/// lyrics. Stripped wherever titles are reported.
pub(crate) const ZERO_WIDTH_SPACE: char = '\u{200b}';

/// A single song record as supplied by the corpus loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Song {
    /// Song title. Always present.
    pub title: String,
    /// The artist credited as the song's owner.
    pub primary_artist: String,
    /// Featured artists, in credit order.
    #[serde(default)]
    pub featured_artists: Vec<String>,
    /// Raw lyric text, possibly containing annotation headers. Absent
    /// lyrics make every count for this song zero.
    #[serde(default)]
    pub lyrics: Option<String>,
}

impl Song {
    /// Create a song with lyrics.
    pub fn new(
        title: impl Into<String>,
        primary_artist: impl Into<String>,
        lyrics: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            primary_artist: primary_artist.into(),
            featured_artists: Vec::new(),
            lyrics: Some(lyrics.into()),
        }
    }

    /// The title with source-leaked zero-width spaces removed.
    #[must_use]
    pub fn display_title(&self) -> String {
        self.title.replace(ZERO_WIDTH_SPACE, "")
    }

    /// All credited artists on the song: primary first, then features,
    /// sorted and deduplicated.
    #[must_use]
    pub fn credited_artists(&self) -> Vec<String> {
        let mut artists = vec![self.primary_artist.clone()];
        for artist in &self.featured_artists {
            if !artists.contains(artist) {
                artists.push(artist.clone());
            }
        }
        artists.sort();
        artists
    }
}

/// An ordered collection of songs under analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    /// The songs, in loader order. Position in this vector is the song's
    /// stable index for exclusion sets and per-song queries.
    pub songs: Vec<Song>,
}

impl Corpus {
    /// Build a corpus from a list of songs.
    #[must_use]
    pub fn new(songs: Vec<Song>) -> Self {
        Self { songs }
    }

    /// Number of songs in the corpus.
    #[must_use]
    pub fn len(&self) -> usize {
        self.songs.len()
    }

    /// True when the corpus holds no songs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }

    /// The song at `index`, or `None` when the position does not exist.
    #[must_use]
    pub fn song(&self, index: usize) -> Option<&Song> {
        self.songs.get(index)
    }

    /// Display titles of every song, in corpus order.
    #[must_use]
    pub fn titles(&self) -> Vec<String> {
        self.songs.iter().map(Song::display_title).collect()
    }
}
