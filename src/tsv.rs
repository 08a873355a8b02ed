//! Tab-separated source table reader.

use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{QgenError, Result};
use crate::question::RawRow;

/// Read a TSV file into ordered raw rows.
///
/// The header row defines the column set; a data row with fewer columns
/// than the header yields empty values for the missing trailing columns.
/// Cell values are trimmed. An empty file yields zero rows; a missing
/// file is the sole fatal input condition.
pub fn read_tsv<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(QgenError::InputNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut reader = ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let mut row = RawRow::new();
        for (i, header) in headers.iter().enumerate() {
            row.set(header, record.get(i).unwrap_or(""));
        }
        rows.push(row);
    }

    debug!(rows = rows.len(), path = %path.display(), "source table loaded");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn tsv_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_reads_rows_in_order() {
        let file = tsv_file("id\ttext\tanswer\n1\tQ1\tA1\n2\tQ2\tA2\n");
        let rows = read_tsv(file.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("id"), "1");
        assert_eq!(rows[0].get("text"), "Q1");
        assert_eq!(rows[1].get("answer"), "A2");
    }

    #[test]
    fn test_short_rows_read_as_empty() {
        let file = tsv_file("id\ttext\tanswer\tstatus\n1\tQ1\n");
        let rows = read_tsv(file.path()).unwrap();
        assert_eq!(rows[0].get("id"), "1");
        assert_eq!(rows[0].get("answer"), "");
        assert_eq!(rows[0].get("status"), "");
    }

    #[test]
    fn test_empty_file() {
        let file = tsv_file("");
        assert!(read_tsv(file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_tsv(Path::new("/nonexistent/questions.tsv")).unwrap_err();
        assert!(matches!(err, QgenError::InputNotFound(_)));
    }
}
