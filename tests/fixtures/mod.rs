// Test fixtures - reusable dates, records, and field configuration
#![allow(dead_code)]

use chrono::{DateTime, Duration, Local, NaiveDate};
use serde_json::Value;

use weekgrid::models::record::{RangeFields, RowRecord};

/// Monday of the fixture week (2025-06-02).
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
}

/// An instant in the fixture week: days offset from Monday plus hh:mm.
pub fn week_instant(day_offset: i64, hour: u32, minute: u32) -> DateTime<Local> {
    (monday() + Duration::days(day_offset))
        .and_hms_opt(hour, minute, 0)
        .unwrap()
        .and_local_timezone(Local)
        .unwrap()
}

/// A record with both range fields populated.
pub fn timed_record(id: &str, start: DateTime<Local>, end: DateTime<Local>) -> RowRecord {
    RowRecord::new(id)
        .with_field("starts_at", Value::String(start.to_rfc3339()))
        .with_field("ends_at", Value::String(end.to_rfc3339()))
}

/// A record with only a start instant.
pub fn open_record(id: &str, start: DateTime<Local>) -> RowRecord {
    RowRecord::new(id).with_field("starts_at", Value::String(start.to_rfc3339()))
}

/// The fixture field configuration: start and end columns.
pub fn range_fields() -> RangeFields {
    RangeFields::with_end("starts_at", "ends_at")
}
