//! Frequency-table export formats.

use std::path::Path;

use crate::error::{Error, Result};
use crate::frequency::FrequencyTable;

/// Render a table as delimited rows under a `Word|Frequency` style header.
///
/// Rows follow [`FrequencyTable::most_common`] order, one token per line.
#[must_use]
pub fn to_delimited(table: &FrequencyTable, delimiter: char) -> String {
    let mut out = format!("Word{delimiter}Frequency\n");
    for (token, count) in table.most_common() {
        out.push_str(token);
        out.push(delimiter);
        out.push_str(&count.to_string());
        out.push('\n');
    }
    out
}

/// Write [`to_delimited`] output to `path`.
pub fn write_delimited(table: &FrequencyTable, delimiter: char, path: &Path) -> Result<()> {
    fs_err::write(path, to_delimited(table, delimiter))
        .map_err(|e| Error::io(e, path.to_path_buf()))
}

/// Render the top `n` tokens as `token;count` rows for word-cloud import.
///
/// No header. Fewer than `n` tokens renders them all.
#[must_use]
pub fn to_word_cloud(table: &FrequencyTable, n: usize) -> String {
    let mut out = String::new();
    for (token, count) in table.most_common().into_iter().take(n) {
        out.push_str(token);
        out.push(';');
        out.push_str(&count.to_string());
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;

    fn table() -> FrequencyTable {
        ["love", "love", "love", "you", "you", "me"]
            .into_iter()
            .map(|t| (t.to_string(), 1))
            .collect()
    }

    #[test]
    fn delimited_rows_follow_most_common_order() {
        let rendered = to_delimited(&table(), '|');
        assert_eq!(rendered, "Word|Frequency\nlove|3\nyou|2\nme|1\n");
    }

    #[test]
    fn word_cloud_rows_have_no_header_and_honor_n() {
        assert_eq!(to_word_cloud(&table(), 2), "love;3\nyou;2\n");
        assert_eq!(to_word_cloud(&table(), 10), "love;3\nyou;2\nme;1\n");
    }

    #[test]
    fn empty_table_renders_header_only() {
        let empty = FrequencyTable::new();
        assert_eq!(to_delimited(&empty, '|'), "Word|Frequency\n");
        assert_eq!(to_word_cloud(&empty, 5), "");
    }

    #[test]
    fn delimited_file_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.csv");
        write_delimited(&table(), '|', &path).unwrap();
        assert_eq!(
            fs_err::read_to_string(&path).unwrap(),
            to_delimited(&table(), '|')
        );
    }
}
