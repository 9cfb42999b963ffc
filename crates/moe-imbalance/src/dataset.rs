//! # Dataset Loading
//!
//! Newline-delimited JSON records, or plain text lines.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde_json::Value;

use crate::{
    errors::{ImbalanceError, ImbalanceResult},
    samples::TextRecord,
};

/// Read JSONL records; one JSON object per line.
///
/// Blank lines are skipped.
///
/// ## Errors
/// * [`ImbalanceError::Dataset`] for a line that is not valid JSON.
/// * [`ImbalanceError::InvalidInput`] for a line that is not a JSON object.
/// * [`ImbalanceError::Io`] for read failures.
pub fn read_jsonl_records<R: BufRead>(reader: R) -> ImbalanceResult<Vec<TextRecord>> {
    let mut records = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let value: Value = serde_json::from_str(&line).map_err(|source| {
            ImbalanceError::Dataset {
                line: idx + 1,
                source,
            }
        })?;
        let record = TextRecord::try_from_value(value).map_err(|e| match e {
            ImbalanceError::InvalidInput(msg) => {
                ImbalanceError::InvalidInput(format!("line {}: {msg}", idx + 1))
            }
            other => other,
        })?;
        records.push(record);
    }
    log::debug!("read {} records", records.len());
    Ok(records)
}

/// Load a JSONL record file.
///
/// See [`read_jsonl_records`].
pub fn load_jsonl_records<P: AsRef<Path>>(path: P) -> ImbalanceResult<Vec<TextRecord>> {
    let path = path.as_ref();
    log::info!("loading dataset {}", path.display());
    read_jsonl_records(BufReader::new(File::open(path)?))
}

/// Read plain text samples; one per non-blank line.
pub fn read_text_lines<R: BufRead>(reader: R) -> ImbalanceResult<Vec<String>> {
    let mut texts = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.trim().is_empty() {
            texts.push(line);
        }
    }
    Ok(texts)
}

#[cfg(test)]
mod tests {
    use std::{fs, io::Cursor};

    use tempdir::TempDir;

    use super::*;

    #[test]
    fn test_read_jsonl_records() {
        let data = "{\"text\": \"a b\", \"id\": 1}\n\n{\"text\": \"c\"}\r\n";
        let records = read_jsonl_records(Cursor::new(data)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].text(), Some("a b"));
        assert_eq!(records[1].text(), Some("c"));
    }

    #[test]
    fn test_malformed_line() {
        let data = "{\"text\": \"a\"}\n{\"text\": \n";
        match read_jsonl_records(Cursor::new(data)) {
            Err(ImbalanceError::Dataset { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_non_object_line() {
        let data = "{\"text\": \"a\"}\n\n\"just a string\"\n";
        match read_jsonl_records(Cursor::new(data)) {
            Err(ImbalanceError::InvalidInput(msg)) => assert!(msg.starts_with("line 3:")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_read_text_lines() {
        let texts = read_text_lines(Cursor::new("one two\n\n  \nthree\n")).unwrap();
        assert_eq!(texts, vec!["one two", "three"]);
    }

    #[test]
    fn test_load_jsonl_records() -> Result<(), Box<dyn std::error::Error>> {
        let tmpdir = TempDir::new("moe-imbalance-dataset")?;
        let path = tmpdir.path().join("high_repetition.jsonl");
        fs::write(
            &path,
            "{\"text\": \"the the the\"}\n{\"text\": \"the the\", \"category\": \"rep\"}\n",
        )?;

        let records = load_jsonl_records(&path)?;
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].fields().get("category").unwrap(), "rep");

        assert!(matches!(
            load_jsonl_records(tmpdir.path().join("missing.jsonl")),
            Err(ImbalanceError::Io(_))
        ));
        Ok(())
    }
}
