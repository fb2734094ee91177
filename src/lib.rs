//! `LyricLens` - frequency and attribution analysis over a song-lyric corpus.
//!
//! This crate normalizes raw lyric text (annotation headers, scraper
//! boilerplate, stray Unicode, punctuation), attributes lines to
//! individual contributors on multi-artist songs, and answers word and
//! phrase frequency questions over a corpus with per-query song
//! exclusions.

pub mod aggregate;
pub mod analyze;
pub mod attribution;
pub mod corpus;
pub mod error;
pub mod exclusions;
pub mod frequency;
pub mod normalize;
pub mod presets;
pub mod report;

pub use aggregate::MaxCount;
pub use analyze::SongReport;
pub use corpus::{Corpus, Song};
pub use error::{Error, Result};
pub use exclusions::{ExclusionList, ExclusionSet, IndexViolation, ViolationKind};
pub use frequency::FrequencyTable;
pub use normalize::NormalizeOptions;
pub use presets::{JsonPresetStore, PresetStore};
