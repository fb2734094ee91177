//! Crate error types.
//!
//! Provides unified error handling with actionable context for debugging.

use thiserror::Error;

use crate::exclusions::IndexViolation;

/// Crate result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Crate error types with specific context for actionable debugging
#[derive(Debug, Error)]
pub enum Error {
    /// The exclusion list failed validation against the corpus bounds.
    ///
    /// The whole list is rejected; no partial analysis is performed.
    #[error("invalid exclusion list: {}", format_violations(.violations))]
    InvalidExclusions {
        /// Every offending entry, with its list position and the reason.
        violations: Vec<IndexViolation>,
    },

    /// A song position outside the corpus was requested directly.
    #[error("song index {index} out of bounds for corpus of {len} songs")]
    SongIndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// Number of songs in the corpus.
        len: usize,
    },

    /// Uniqueness percent requested for a song with no words after
    /// normalization. Callers must check the word count first.
    #[error("song {title:?} has no words after normalization")]
    EmptySong {
        /// Title of the degenerate song.
        title: String,
    },

    /// IO error with path context
    #[error("IO error at {path:?}: {source}")]
    Io {
        /// The underlying IO error.
        source: std::io::Error,
        /// File path where the error occurred, if known.
        path: Option<std::path::PathBuf>,
    },

    /// Preset file parsing error
    #[error("preset parse error in {file:?}: {source}")]
    PresetParse {
        /// File that failed to parse, if known.
        file: Option<std::path::PathBuf>,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// No preset with the requested name exists in the store.
    #[error("no preset named {0:?}")]
    UnknownPreset(String),
}

impl Error {
    /// Create an IO error with path context
    pub fn io(source: std::io::Error, path: impl Into<Option<std::path::PathBuf>>) -> Self {
        Self::Io { source, path: path.into() }
    }

    /// Create a preset parse error with file context
    pub fn preset_parse(
        source: serde_json::Error,
        file: impl Into<Option<std::path::PathBuf>>,
    ) -> Self {
        Self::PresetParse { file: file.into(), source }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Self::Io { source: e, path: None }
    }
}

fn format_violations(violations: &[IndexViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use crate::exclusions::ViolationKind;

    #[test]
    fn invalid_exclusions_lists_every_offender() {
        let err = Error::InvalidExclusions {
            violations: vec![
                IndexViolation {
                    position: 0,
                    value: "\"Seven\"".to_string(),
                    kind: ViolationKind::NotAnInteger,
                },
                IndexViolation {
                    position: 3,
                    value: "300".to_string(),
                    kind: ViolationKind::OutOfRange,
                },
            ],
        };
        let rendered = err.to_string();
        assert!(rendered.contains("[0] \"Seven\""));
        assert!(rendered.contains("[3] 300"));
    }
}
