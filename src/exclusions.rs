//! Exclusion-list validation.
//!
//! Aggregate queries take a caller-built list of corpus positions to skip
//! ("bad" songs). The list arrives from an external preset component as
//! raw JSON values, so nothing about it can be trusted: entries may be
//! strings, floats, or out of range. A single bad entry invalidates the
//! whole list, since partial skipping would silently change what a
//! corpus-wide number means.

use std::collections::HashSet;
use std::fmt;

use serde_json::Value;
use tracing::warn;

use crate::corpus::Corpus;
use crate::error::{Error, Result};

/// Why an exclusion entry was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViolationKind {
    /// The entry is not an integer (string, float, nested value, ...).
    NotAnInteger,
    /// The entry is an integer outside `[0, corpus_len - 1]`.
    OutOfRange,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnInteger => write!(f, "not an integer"),
            Self::OutOfRange => write!(f, "out of range"),
        }
    }
}

/// One rejected exclusion entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexViolation {
    /// Position of the entry within the exclusion list.
    pub position: usize,
    /// The offending value, rendered as JSON.
    pub value: String,
    /// Why it was rejected.
    pub kind: ViolationKind,
}

impl fmt::Display for IndexViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.position, self.value, self.kind)
    }
}

/// A raw, unvalidated exclusion list as supplied by the preset component.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionList(
    /// The raw entries, in list order.
    pub Vec<Value>,
);

impl ExclusionList {
    /// An empty list: exclude nothing.
    #[must_use]
    pub const fn none() -> Self {
        Self(Vec::new())
    }

    /// Build a list from known-integer positions (typical in-process use).
    #[must_use]
    pub fn from_positions(positions: &[usize]) -> Self {
        Self(positions.iter().map(|&p| Value::from(p)).collect())
    }

    /// Validate every entry against the corpus bounds.
    ///
    /// Succeeds iff the list is empty or every entry is an integer in
    /// `[0, corpus.len() - 1]`. Duplicates are permitted and removed in
    /// first-occurrence order. Any violation rejects the entire list and
    /// the error reports each offender with its list position and reason.
    pub fn validate(&self, corpus: &Corpus) -> Result<ExclusionSet> {
        let mut violations = Vec::new();
        let mut ordered = Vec::new();
        let mut members = HashSet::new();

        for (position, value) in self.0.iter().enumerate() {
            match entry_as_index(value) {
                Some(index) if index < corpus.len() => {
                    if members.insert(index) {
                        ordered.push(index);
                    }
                }
                Some(_) => violations.push(IndexViolation {
                    position,
                    value: value.to_string(),
                    kind: ViolationKind::OutOfRange,
                }),
                None => violations.push(IndexViolation {
                    position,
                    value: value.to_string(),
                    kind: ViolationKind::NotAnInteger,
                }),
            }
        }

        if violations.is_empty() {
            Ok(ExclusionSet { ordered, members })
        } else {
            warn!(count = violations.len(), "rejecting exclusion list");
            Err(Error::InvalidExclusions { violations })
        }
    }
}

impl From<Vec<usize>> for ExclusionList {
    fn from(positions: Vec<usize>) -> Self {
        Self::from_positions(&positions)
    }
}

/// Interpret a raw entry as a corpus index.
///
/// Only JSON integers qualify; `1.0` is a float and therefore invalid,
/// matching the validator's strict typing. Integers that cannot be a
/// position, negative or above `usize`, clamp to `usize::MAX` so the
/// caller classifies them as out of range rather than non-integer.
fn entry_as_index(value: &Value) -> Option<usize> {
    if let Some(number) = value.as_u64() {
        return Some(usize::try_from(number).unwrap_or(usize::MAX));
    }
    let number = value.as_i64()?;
    Some(usize::try_from(number).unwrap_or(usize::MAX))
}

/// A validated, deduplicated set of corpus positions to skip.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    ordered: Vec<usize>,
    members: HashSet<usize>,
}

impl ExclusionSet {
    /// The set excluding nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// True when `index` should be skipped.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.members.contains(&index)
    }

    /// The excluded positions, duplicates removed, first-occurrence order.
    #[must_use]
    pub fn positions(&self) -> &[usize] {
        &self.ordered
    }

    /// Number of distinct excluded positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    /// True when nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }
}

/// Convenience predicate: does `list` validate against `corpus`?
#[must_use]
pub fn is_valid_index_set(corpus: &Corpus, list: &ExclusionList) -> bool {
    list.validate(corpus).is_ok()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use serde_json::json;

    use super::*;
    use crate::corpus::Song;

    fn corpus_of(n: usize) -> Corpus {
        Corpus::new(
            (0..n)
                .map(|i| Song::new(format!("Song {i}"), "A", "la"))
                .collect(),
        )
    }

    #[test]
    fn empty_list_is_valid() {
        assert!(is_valid_index_set(&corpus_of(3), &ExclusionList::none()));
    }

    #[test]
    fn in_range_integers_are_valid() {
        let corpus = corpus_of(148);
        let list = ExclusionList(vec![json!(0), json!(12), json!(147), json!(20), json!(71)]);
        assert!(is_valid_index_set(&corpus, &list));
    }

    #[test]
    fn boundary_values_are_rejected() {
        let corpus = corpus_of(3);
        assert!(!is_valid_index_set(&corpus, &ExclusionList(vec![json!(-1)])));
        assert!(!is_valid_index_set(&corpus, &ExclusionList(vec![json!(3)])));
        assert!(is_valid_index_set(&corpus, &ExclusionList(vec![json!(2)])));
    }

    #[test]
    fn floats_and_strings_are_not_integers() {
        let corpus = corpus_of(10);
        assert!(!is_valid_index_set(&corpus, &ExclusionList(vec![json!(0.5)])));
        assert!(!is_valid_index_set(&corpus, &ExclusionList(vec![json!(1.0)])));
        assert!(!is_valid_index_set(&corpus, &ExclusionList(vec![json!("1")])));
        assert!(!is_valid_index_set(&corpus, &ExclusionList(vec![json!([1, 2])])));
    }

    #[test]
    fn huge_integers_are_out_of_range_not_non_integers() {
        let corpus = corpus_of(3);
        let list = ExclusionList(vec![json!(u64::MAX), json!(-5)]);
        let err = list.validate(&corpus).unwrap_err();
        match err {
            Error::InvalidExclusions { violations } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].kind, ViolationKind::OutOfRange);
                assert_eq!(violations[1].kind, ViolationKind::OutOfRange);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn one_bad_entry_rejects_the_whole_list() {
        let corpus = corpus_of(10);
        let list = ExclusionList(vec![json!(0), json!("Seven"), json!(2), json!(300)]);
        let err = list.validate(&corpus).unwrap_err();
        match err {
            Error::InvalidExclusions { violations } => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].position, 1);
                assert_eq!(violations[0].kind, ViolationKind::NotAnInteger);
                assert_eq!(violations[1].position, 3);
                assert_eq!(violations[1].kind, ViolationKind::OutOfRange);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn duplicates_normalize_to_first_occurrence_order() {
        let corpus = corpus_of(100);
        let list = ExclusionList::from_positions(&[24, 24, 25, 29, 29, 89]);
        let set = list.validate(&corpus).unwrap();
        assert_eq!(set.positions(), &[24, 25, 29, 89]);
        assert_eq!(set.len(), 4);
        assert!(set.contains(89));
        assert!(!set.contains(0));
    }

    #[test]
    fn unordered_input_keeps_input_order() {
        let corpus = corpus_of(100);
        let list = ExclusionList::from_positions(&[75, 74, 33, 74]);
        let set = list.validate(&corpus).unwrap();
        assert_eq!(set.positions(), &[75, 74, 33]);
    }
}
