// Record module
// Raw spreadsheet rows and the range-field configuration binding them to
// the schedule

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A raw row from the host's record source.
///
/// Field values are opaque to the grid except for the configured range
/// fields, which carry RFC 3339 instants as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowRecord {
    pub id: String,
    pub fields: Map<String, Value>,
}

impl RowRecord {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Map::new(),
        }
    }

    /// Builder-style field setter.
    pub fn with_field(mut self, name: impl Into<String>, value: Value) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    /// Parse the named field as an instant.
    ///
    /// A missing field, a non-string cell, or an unparseable value all
    /// yield `None`; the caller decides whether that drops the record.
    pub fn instant(&self, field: &str) -> Option<DateTime<Local>> {
        self.fields
            .get(field)
            .and_then(Value::as_str)
            .and_then(parse_instant)
    }

    /// The raw (start, optional end) pair for the configured range fields.
    ///
    /// Returns `None` when the start is unusable. The end is `None` both
    /// when no end field is configured and when its value does not parse.
    pub fn range(
        &self,
        fields: &RangeFields,
    ) -> Option<(DateTime<Local>, Option<DateTime<Local>>)> {
        let start = self.instant(&fields.start_field)?;
        let end = fields
            .end_field
            .as_deref()
            .and_then(|field| self.instant(field));
        Some((start, end))
    }
}

/// Which fields of a row hold the schedule range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeFields {
    pub start_field: String,
    /// Absent when the host has no end column configured
    pub end_field: Option<String>,
}

impl RangeFields {
    pub fn start_only(start_field: impl Into<String>) -> Self {
        Self {
            start_field: start_field.into(),
            end_field: None,
        }
    }

    pub fn with_end(start_field: impl Into<String>, end_field: impl Into<String>) -> Self {
        Self {
            start_field: start_field.into(),
            end_field: Some(end_field.into()),
        }
    }
}

/// One field mutation written back through the host update API.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldChange {
    pub field: String,
    pub value: Value,
}

impl FieldChange {
    /// A change carrying an instant in its RFC 3339 string form.
    pub fn instant(field: impl Into<String>, value: DateTime<Local>) -> Self {
        Self {
            field: field.into(),
            value: Value::String(value.to_rfc3339()),
        }
    }
}

/// Parse an RFC 3339 timestamp into the local zone.
pub fn parse_instant(raw: &str) -> Option<DateTime<Local>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|instant| instant.with_timezone(&Local))
        .ok()
}
