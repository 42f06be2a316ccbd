//! Shared output types for the week layout pass.
//!
//! These are the render-ready structures handed to the host: one
//! `RecordSegment` per (record, day) instance plus the overflow query
//! result for hidden columns.

use chrono::{DateTime, Local};
use serde::Serialize;

/// Corner treatment for a rendered segment of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentPosition {
    /// The segment covers the record's true start and true end
    Rounded,
    /// True start only; the record continues past this day
    TopRounded,
    /// True end only; the record started on an earlier day
    BottomRounded,
    /// A middle slice of a record spanning three or more days
    Flat,
}

/// Rectangle placement for one rendered segment.
///
/// `top`/`height` are pixels within the day column; `left_pct`/`width_pct`
/// are percentages of the full seven-day grid width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SegmentGeometry {
    pub top: f32,
    pub height: f32,
    pub left_pct: f32,
    pub width_pct: f32,
    /// False when the segment sits past the visible column cap
    pub visible: bool,
}

/// One per-day rendered instance of a record.
///
/// A record spanning midnight produces several of these, sharing
/// `record_id` but each carrying its own day, clipped range, and position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordSegment {
    pub record_id: String,
    /// 0 = Monday .. 6 = Sunday
    pub day_index: usize,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    /// 1-based lane within the day
    pub overlap_column: usize,
    /// Max concurrent overlaps this record participates in
    pub overlap_count: usize,
    pub position: SegmentPosition,
    pub geometry: SegmentGeometry,
}

/// Result of the per-hour overflow query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OverflowInfo {
    pub is_overflow: bool,
    /// Records beyond the visible column cap in the busiest minute
    pub overflow_count: usize,
}
