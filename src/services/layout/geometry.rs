//! Pixel geometry for laid-out segments.

use crate::models::segment::SegmentGeometry;
use crate::models::settings::GridConfig;

pub(crate) const DAYS_PER_WEEK: usize = 7;

/// Map a segment's minute range and column slot to its rectangle.
///
/// Vertical placement is pixels within the day column; horizontal placement
/// is percentages of the full grid so the host can keep columns fluid.
/// Segments past the visible column cap are marked hidden and surface
/// through the overflow query instead.
pub(crate) fn map_geometry(
    config: &GridConfig,
    day_index: usize,
    start_minute: u32,
    end_minute: u32,
    overlap_column: usize,
    overlap_count: usize,
) -> SegmentGeometry {
    let minute_height = config.minute_height();
    let top = start_minute as f32 * minute_height;

    let span_minutes = end_minute.saturating_sub(start_minute) + 1;
    let span_hours = (span_minutes as f32 / 60.0).ceil();
    let height = (span_minutes as f32 * minute_height
        - span_hours * config.hour_seam
        - config.segment_gutter)
        .max(minute_height);

    let stacked = overlap_count.clamp(1, config.max_visible_columns);
    let day_width = 100.0 / DAYS_PER_WEEK as f32;
    let width_pct = day_width / stacked as f32;
    let left_pct = day_index as f32 * day_width + width_pct * overlap_column.saturating_sub(1) as f32;

    SegmentGeometry {
        top,
        height,
        left_pct,
        width_pct,
        visible: overlap_column <= config.max_visible_columns,
    }
}
