//! # Text Samples
//!
//! A batch is either all plain strings or all records; the caller picks
//! the form with the [`SampleBatch`] variant.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ImbalanceError, ImbalanceResult};

/// The record field holding the sample text.
pub const TEXT_FIELD: &str = "text";

/// A dataset record; a JSON object with at least a `text` string field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextRecord {
    fields: Map<String, Value>,
}

impl From<Map<String, Value>> for TextRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self { fields }
    }
}

impl TextRecord {
    /// Build a record holding only a `text` field.
    pub fn from_text(text: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(TEXT_FIELD.to_string(), Value::String(text.into()));
        Self { fields }
    }

    /// Build a record from a JSON value; fails unless it is an object.
    pub fn try_from_value(value: Value) -> ImbalanceResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            other => Err(ImbalanceError::InvalidInput(format!(
                "expected a JSON object record, found: {other}"
            ))),
        }
    }

    /// All fields of the record.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The `text` field, if present and a string.
    pub fn text(&self) -> Option<&str> {
        self.fields.get(TEXT_FIELD).and_then(Value::as_str)
    }
}

/// An ordered batch of samples, in one explicit form.
#[derive(Debug)]
pub enum SampleBatch<'a, S: AsRef<str> = String> {
    /// Plain text samples.
    Texts(&'a [S]),

    /// Records carrying a `text` field.
    Records(&'a [TextRecord]),
}

impl<S: AsRef<str>> Clone for SampleBatch<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S: AsRef<str>> Copy for SampleBatch<'_, S> {}

impl<'a, S: AsRef<str>> SampleBatch<'a, S> {
    /// The number of samples.
    pub fn len(&self) -> usize {
        match self {
            SampleBatch::Texts(texts) => texts.len(),
            SampleBatch::Records(records) => records.len(),
        }
    }

    /// Is the batch empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Resolve the batch to its sample texts, in order.
    ///
    /// ## Errors
    /// * [`ImbalanceError::InvalidInput`] if the batch is empty,
    ///   or a record lacks a string `text` field.
    pub fn texts(&self) -> ImbalanceResult<Vec<&'a str>> {
        if self.is_empty() {
            return Err(ImbalanceError::InvalidInput(
                "sample batch is empty".to_string(),
            ));
        }

        match *self {
            SampleBatch::Texts(texts) => Ok(texts.iter().map(AsRef::as_ref).collect()),
            SampleBatch::Records(records) => records
                .iter()
                .enumerate()
                .map(|(idx, record)| {
                    record.text().ok_or_else(|| {
                        ImbalanceError::InvalidInput(format!(
                            "record {idx} has no string \"{TEXT_FIELD}\" field"
                        ))
                    })
                })
                .collect(),
        }
    }
}

/// Describe a sample for log messages, truncated to `max_chars`.
pub fn preview(
    text: &str,
    max_chars: usize,
) -> Cow<'_, str> {
    match text.char_indices().nth(max_chars) {
        None => Cow::Borrowed(text),
        Some((end, _)) => Cow::Owned(format!("{}...", &text[..end])),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_record_text() {
        let record = TextRecord::from_text("hello world");
        assert_eq!(record.text(), Some("hello world"));

        let record = TextRecord::try_from_value(json!({"text": 12, "id": 1})).unwrap();
        assert_eq!(record.text(), None);
        assert_eq!(record.fields().get("id"), Some(&json!(1)));

        assert!(matches!(
            TextRecord::try_from_value(json!(["text"])),
            Err(ImbalanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_record_serde_is_transparent() {
        let record: TextRecord = serde_json::from_str(r#"{"text":"a b","label":"x"}"#).unwrap();
        assert_eq!(record.text(), Some("a b"));
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({"text": "a b", "label": "x"})
        );
    }

    #[test]
    fn test_batch_texts() {
        let texts = vec!["a".to_string(), "b c".to_string()];
        let batch = SampleBatch::Texts(&texts);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.texts().unwrap(), vec!["a", "b c"]);

        let records = vec![TextRecord::from_text("x"), TextRecord::from_text("y")];
        let batch: SampleBatch = SampleBatch::Records(&records);
        assert_eq!(batch.texts().unwrap(), vec!["x", "y"]);
    }

    #[test]
    fn test_batch_rejects_empty() {
        let texts: Vec<&str> = vec![];
        let batch = SampleBatch::Texts(&texts);
        assert!(batch.is_empty());
        assert!(matches!(
            batch.texts(),
            Err(ImbalanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_batch_rejects_record_without_text() {
        let records = vec![
            TextRecord::from_text("x"),
            TextRecord::try_from_value(json!({"body": "y"})).unwrap(),
        ];
        let batch: SampleBatch = SampleBatch::Records(&records);
        match batch.texts() {
            Err(ImbalanceError::InvalidInput(msg)) => assert!(msg.contains("record 1")),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("caf\u{00e9} au lait", 4), "caf\u{00e9}...");
    }
}
