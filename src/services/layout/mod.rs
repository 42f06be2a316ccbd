//! Week layout pipeline.
//!
//! Raw rows flow through range normalization, day bucketing, overlap
//! grouping, overlap-count resolution, and geometry mapping to become
//! render-ready segments. The whole pass is recomputed from scratch on
//! every relevant input change (record set, visible window, viewport);
//! nothing here persists between passes, so a pass is idempotent over an
//! unchanged record set.

pub mod buckets;
mod columns;
mod geometry;
pub mod normalize;
pub mod occupancy;

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local, NaiveDate};

use crate::models::record::{RangeFields, RowRecord};
use crate::models::segment::{OverflowInfo, RecordSegment, SegmentPosition};
use crate::models::settings::GridConfig;
use crate::utils::date::{at_day_end, at_midnight, week_start};

use columns::{assign_columns, ColumnLayout, DaySpan};
use normalize::NormalizeCache;
use occupancy::{MinuteOccupancy, OverlapGraph};

/// The visible date range the layout is computed against, expanded to day
/// boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleWindow {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl ScheduleWindow {
    /// Window covering the week that contains `date`.
    ///
    /// `first_day_of_week`: 0 = Monday .. 6 = Sunday.
    pub fn week_of(date: NaiveDate, first_day_of_week: u8) -> Self {
        let first = week_start(date, first_day_of_week);
        Self {
            start: at_midnight(first),
            end: at_day_end(first + Duration::days(6)),
        }
    }

    /// The seven dates of the window, in order.
    pub fn dates(&self) -> Vec<NaiveDate> {
        let first = self.start.date_naive();
        (0..7).map(|offset| first + Duration::days(offset)).collect()
    }
}

/// Render-ready output of one layout pass.
#[derive(Debug)]
pub struct WeekLayout {
    pub segments: Vec<RecordSegment>,
    pub occupancy: MinuteOccupancy,
    /// Total column count per day, the cap for overlap counts
    pub columns_per_day: [usize; 7],
    max_visible_columns: usize,
}

impl WeekLayout {
    /// Per-hour "+N more" indicator for records hidden past the column cap.
    pub fn overflow_at(&self, day: usize, hour: u32) -> OverflowInfo {
        self.occupancy.overflow_at(day, hour, self.max_visible_columns)
    }

    /// Segments rendered in the given day column.
    pub fn segments_for_day(&self, day: usize) -> impl Iterator<Item = &RecordSegment> {
        self.segments.iter().filter(move |segment| segment.day_index == day)
    }
}

/// One per-day slice of a normalized record, before columns and geometry.
struct DaySlice {
    record_id: String,
    day_index: usize,
    start: DateTime<Local>,
    end: DateTime<Local>,
    position: SegmentPosition,
}

/// Compute the full layout for the visible window.
///
/// This is the explicit recomputation entry point: the host calls it
/// whenever the record set, the visible window, or the viewport changes.
/// Records with a missing or unparseable start are skipped, and a
/// configured end that parses to an instant before the start drops the
/// record for the pass. Malformed rows degrade to "not rendered"; nothing
/// in here raises.
pub fn recompute(
    records: &[RowRecord],
    fields: &RangeFields,
    window: &ScheduleWindow,
    config: &GridConfig,
) -> WeekLayout {
    let default_block = Duration::minutes(config.default_block_minutes);
    let mut cache = NormalizeCache::new();

    // Normalize and slice each record into per-day pieces.
    let mut slices: Vec<DaySlice> = Vec::new();
    for record in records {
        let Some((raw_start, raw_end)) = record.range(fields) else {
            log::debug!("record {} has no usable range start, skipping", record.id);
            continue;
        };
        if let Some(end) = raw_end {
            if end < raw_start {
                log::debug!("record {} ends before it starts, skipping", record.id);
                continue;
            }
        }

        // Entirely outside the visible window.
        let probe_end = raw_end.unwrap_or(raw_start + default_block);
        if probe_end < window.start || raw_start > window.end {
            continue;
        }

        let (start, end) = cache.normalize(raw_start, raw_end, window, default_block);
        slices.extend(slice_by_day(&record.id, start, end));
    }

    // Greedy column assignment, one day at a time.
    let mut columns_per_day = [0usize; 7];
    let mut column_of: HashMap<(usize, String), usize> = HashMap::new();
    for day in 0..7 {
        let spans: Vec<DaySpan> = slices
            .iter()
            .filter(|slice| slice.day_index == day)
            .map(|slice| DaySpan {
                record_id: slice.record_id.clone(),
                start: slice.start,
                end: slice.end,
            })
            .collect();
        let ColumnLayout { placed, column_count } = assign_columns(spans);
        columns_per_day[day] = column_count;
        for (span, column) in placed {
            column_of.insert((day, span.record_id), column);
        }
    }

    // Minute occupancy over the clipped per-day ranges.
    let mut occupancy = MinuteOccupancy::default();
    for slice in &slices {
        let from = buckets::grid_minute(slice.start, false);
        let to = buckets::grid_minute(slice.end, true).max(from);
        occupancy.insert(slice.day_index, from, to, &slice.record_id);
    }

    // Resolve overlap counts and map geometry.
    let graphs: Vec<OverlapGraph> = (0..7)
        .map(|day| OverlapGraph::for_day(&occupancy, day))
        .collect();

    let segments = slices
        .into_iter()
        .map(|slice| {
            let column = column_of
                .get(&(slice.day_index, slice.record_id.clone()))
                .copied()
                .unwrap_or(1);
            let count = graphs[slice.day_index]
                .max_overlaps(&slice.record_id, columns_per_day[slice.day_index]);
            let from = buckets::grid_minute(slice.start, false);
            let to = buckets::grid_minute(slice.end, true).max(from);
            let geometry =
                geometry::map_geometry(config, slice.day_index, from, to, column, count);
            RecordSegment {
                record_id: slice.record_id,
                day_index: slice.day_index,
                start: slice.start,
                end: slice.end,
                overlap_column: column,
                overlap_count: count,
                position: slice.position,
                geometry,
            }
        })
        .collect();

    WeekLayout {
        segments,
        occupancy,
        columns_per_day,
        max_visible_columns: config.max_visible_columns,
    }
}

/// Split a normalized range into per-day slices with corner classification.
fn slice_by_day(
    record_id: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
) -> Vec<DaySlice> {
    let mut slices = Vec::new();
    let zero_length = end == start;
    let last_date = end.date_naive();

    let mut date = start.date_naive();
    while date <= last_date {
        let slice_start = start.max(at_midnight(date));
        let slice_end = end.min(at_day_end(date));

        // An exact-midnight end contributes nothing to its final date.
        if slice_end < slice_start || (slice_end == slice_start && !zero_length) {
            date += Duration::days(1);
            continue;
        }

        let starts_here = date == start.date_naive();
        let ends_here = date == last_date
            || (last_date == date + Duration::days(1) && end == at_midnight(last_date));
        let position = match (starts_here, ends_here) {
            (true, true) => SegmentPosition::Rounded,
            (true, false) => SegmentPosition::TopRounded,
            (false, true) => SegmentPosition::BottomRounded,
            (false, false) => SegmentPosition::Flat,
        };

        slices.push(DaySlice {
            record_id: record_id.to_string(),
            day_index: buckets::day_index(date),
            start: slice_start,
            end: slice_end,
            position,
        });
        date += Duration::days(1);
    }
    slices
}
