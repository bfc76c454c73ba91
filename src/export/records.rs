//! Parsing and validation of article records

use serde_json::Value;
use std::fmt;

use crate::error::{ExportError, ExportResult};

pub const SLUG_FIELD: &str = "slug";
pub const BODY_FIELD: &str = "body_markdown";
pub const FILE_EXTENSION: &str = "md";

/// A record that passed validation and is ready to be written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleFile {
    /// Position of the record in the input array
    pub index: usize,
    pub slug: String,
    pub file_name: String,
    pub body: String,
}

impl ArticleFile {
    pub fn new(index: usize, slug: impl Into<String>, body: impl Into<String>) -> Self {
        let slug = slug.into();
        let file_name = format!("{slug}.{FILE_EXTENSION}");
        Self {
            index,
            slug,
            file_name,
            body: body.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    MissingSlug,
    MissingBody,
    MissingBoth,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingSlug => write!(f, "missing slug"),
            Self::MissingBody => write!(f, "missing body_markdown"),
            Self::MissingBoth => write!(f, "missing slug and body_markdown"),
        }
    }
}

/// A record dropped during validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedRecord {
    pub index: usize,
    pub reason: SkipReason,
    /// The record as compact JSON, echoed in the warning
    pub raw: String,
}

/// Parse the document into its top-level records
pub fn parse_records(text: &str) -> ExportResult<Vec<Value>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(records) => Ok(records),
        other => Err(ExportError::NotAnArray {
            found: json_type_name(&other),
        }),
    }
}

/// Check the two required fields of one record
///
/// The body must be a non-empty string. The slug may also be a non-zero
/// number, which is used in its JSON text form. Anything else, including
/// non-object records, is reported as missing.
pub fn validate_record(index: usize, record: &Value) -> Result<ArticleFile, SkippedRecord> {
    let slug = slug_value(record);
    let body = non_empty_str(record, BODY_FIELD);

    let reason = match (slug, body) {
        (Some(slug), Some(body)) => return Ok(ArticleFile::new(index, slug, body)),
        (None, None) => SkipReason::MissingBoth,
        (None, Some(_)) => SkipReason::MissingSlug,
        (Some(_), None) => SkipReason::MissingBody,
    };

    Err(SkippedRecord {
        index,
        reason,
        raw: record.to_string(),
    })
}

fn slug_value(record: &Value) -> Option<String> {
    match record.get(SLUG_FIELD)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
        _ => None,
    }
}

fn non_empty_str<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
