//! Export record validation.
//!
//! # Responsibility
//! - Check presence and shape of known export keys against a static table.
//! - Decide note kind (plain vs checklist) exactly once.
//!
//! # Invariants
//! - `title` and `userEditedTimestampUsec` are required.
//! - At least one of `textContent` / `listContent` must be present; when both
//!   are, the note is a checklist.
//! - Keys outside `NOTE_FIELDS` are ignored.

use crate::model::note::{Annotation, ListItem, Note, NoteBody, NoteMeta};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::error::Error;
use std::fmt::{Display, Formatter};

const TITLE: &str = "title";
const TEXT_CONTENT: &str = "textContent";
const LIST_CONTENT: &str = "listContent";
const EDITED_AT_USEC: &str = "userEditedTimestampUsec";
const IS_PINNED: &str = "isPinned";
const IS_TRASHED: &str = "isTrashed";
const IS_ARCHIVED: &str = "isArchived";
const COLOR: &str = "color";
const ANNOTATIONS: &str = "annotations";

/// JSON shape accepted for a known export key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldShape {
    String,
    Bool,
    Integer,
    Array,
}

impl FieldShape {
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Integer => value.as_i64().is_some(),
            Self::Array => value.is_array(),
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Bool => "boolean",
            Self::Integer => "integer",
            Self::Array => "array",
        }
    }
}

/// One row of the export field table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub shape: FieldShape,
    pub required: bool,
}

const fn field(key: &'static str, shape: FieldShape, required: bool) -> FieldSpec {
    FieldSpec {
        key,
        shape,
        required,
    }
}

/// Known top-level export keys. Everything else is dropped.
pub const NOTE_FIELDS: &[FieldSpec] = &[
    field(TITLE, FieldShape::String, true),
    field(EDITED_AT_USEC, FieldShape::Integer, true),
    field(TEXT_CONTENT, FieldShape::String, false),
    field(LIST_CONTENT, FieldShape::Array, false),
    field(IS_PINNED, FieldShape::Bool, false),
    field(IS_TRASHED, FieldShape::Bool, false),
    field(IS_ARCHIVED, FieldShape::Bool, false),
    field(COLOR, FieldShape::String, false),
    field(ANNOTATIONS, FieldShape::Array, false),
];

/// Reason an export record was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Input bytes are not valid JSON.
    MalformedJson(String),
    /// Top-level JSON value is not an object.
    NotAnObject,
    /// A required key is absent.
    MissingField(&'static str),
    /// A known key holds a value of the wrong JSON type.
    WrongShape {
        field: &'static str,
        expected: &'static str,
    },
    /// An element of `listContent` / `annotations` is malformed.
    InvalidEntry {
        field: &'static str,
        index: usize,
        message: String,
    },
    /// Neither `textContent` nor `listContent` is present.
    MissingContent,
    /// Timestamp cannot be represented as a calendar date.
    TimestampOutOfRange(i64),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedJson(message) => write!(f, "malformed JSON: {message}"),
            Self::NotAnObject => write!(f, "note record must be a JSON object"),
            Self::MissingField(field) => write!(f, "missing required field `{field}`"),
            Self::WrongShape { field, expected } => {
                write!(f, "field `{field}` must be a {expected}")
            }
            Self::InvalidEntry {
                field,
                index,
                message,
            } => write!(f, "invalid `{field}` entry at index {index}: {message}"),
            Self::MissingContent => write!(
                f,
                "either `{LIST_CONTENT}` or `{TEXT_CONTENT}` must be present"
            ),
            Self::TimestampOutOfRange(value) => {
                write!(f, "`{EDITED_AT_USEC}` out of range: {value}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Parses raw export bytes and validates them into a `Note`.
pub fn parse_note(bytes: &[u8]) -> Result<Note, ValidationError> {
    let raw: Value = serde_json::from_slice(bytes)
        .map_err(|err| ValidationError::MalformedJson(err.to_string()))?;
    validate(&raw)
}

/// Validates one raw export record.
///
/// # Errors
/// - Returns `NotAnObject` for non-object input.
/// - Returns `MissingField` / `WrongShape` when a `NOTE_FIELDS` entry is
///   violated. `null` is never an accepted value.
/// - Returns `MissingContent` when neither content key is present.
/// - Returns `InvalidEntry` for malformed checklist items or annotations.
pub fn validate(raw: &Value) -> Result<Note, ValidationError> {
    let fields = raw.as_object().ok_or(ValidationError::NotAnObject)?;

    for spec in NOTE_FIELDS {
        match fields.get(spec.key) {
            Some(value) if !spec.shape.matches(value) => {
                return Err(ValidationError::WrongShape {
                    field: spec.key,
                    expected: spec.shape.as_str(),
                });
            }
            Some(_) => {}
            None if spec.required => return Err(ValidationError::MissingField(spec.key)),
            None => {}
        }
    }

    let title = string_field(fields, TITLE).ok_or(ValidationError::MissingField(TITLE))?;
    let edited_at_usec = fields
        .get(EDITED_AT_USEC)
        .and_then(Value::as_i64)
        .ok_or(ValidationError::MissingField(EDITED_AT_USEC))?;
    let edited_at = DateTime::<Utc>::from_timestamp_micros(edited_at_usec)
        .ok_or(ValidationError::TimestampOutOfRange(edited_at_usec))?;

    let body = if fields.contains_key(LIST_CONTENT) {
        NoteBody::Checklist {
            items: entries::<ListItem>(fields, LIST_CONTENT)?,
        }
    } else if let Some(text) = string_field(fields, TEXT_CONTENT) {
        NoteBody::Plain { text }
    } else {
        return Err(ValidationError::MissingContent);
    };

    let meta = NoteMeta {
        is_pinned: fields.get(IS_PINNED).and_then(Value::as_bool),
        is_trashed: fields.get(IS_TRASHED).and_then(Value::as_bool),
        is_archived: fields.get(IS_ARCHIVED).and_then(Value::as_bool),
        color: string_field(fields, COLOR),
        annotations: entries::<Annotation>(fields, ANNOTATIONS)?,
    };

    Ok(Note {
        title,
        edited_at_usec,
        edited_at,
        body,
        meta,
    })
}

fn string_field(fields: &Map<String, Value>, key: &str) -> Option<String> {
    fields.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn entries<T: DeserializeOwned>(
    fields: &Map<String, Value>,
    key: &'static str,
) -> Result<Vec<T>, ValidationError> {
    let Some(values) = fields.get(key).and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            if !value.is_object() {
                return Err(ValidationError::InvalidEntry {
                    field: key,
                    index,
                    message: "expected object".to_string(),
                });
            }
            T::deserialize(value).map_err(|err| ValidationError::InvalidEntry {
                field: key,
                index,
                message: err.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{validate, FieldShape, ValidationError, NOTE_FIELDS};
    use serde_json::json;

    #[test]
    fn field_table_has_unique_keys() {
        for (i, spec) in NOTE_FIELDS.iter().enumerate() {
            assert!(
                NOTE_FIELDS[i + 1..].iter().all(|other| other.key != spec.key),
                "duplicate key {}",
                spec.key
            );
        }
    }

    #[test]
    fn integer_shape_rejects_floats_and_strings() {
        assert!(FieldShape::Integer.matches(&json!(12)));
        assert!(!FieldShape::Integer.matches(&json!(1.5)));
        assert!(!FieldShape::Integer.matches(&json!("12")));
    }

    #[test]
    fn null_is_a_wrong_shape() {
        let err = validate(&json!({
            "title": "t",
            "textContent": null,
            "userEditedTimestampUsec": 1
        }))
        .unwrap_err();
        assert_eq!(
            err,
            ValidationError::WrongShape {
                field: "textContent",
                expected: "string"
            }
        );
    }
}
