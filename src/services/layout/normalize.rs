//! Range normalization against the visible schedule window.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local};

use super::ScheduleWindow;

/// Clip and complete a record's raw range.
///
/// A missing end becomes `start + default_block`; an end before the start
/// collapses to the start; both bounds are then clamped to the window.
/// Pure, and total over its inputs.
pub fn normalize_range(
    start: DateTime<Local>,
    end: Option<DateTime<Local>>,
    window: &ScheduleWindow,
    default_block: Duration,
) -> (DateTime<Local>, DateTime<Local>) {
    let mut end = match end {
        Some(end) if end >= start => end,
        Some(_) => start,
        None => start + default_block,
    };

    let start = start.max(window.start);
    if end > window.end {
        end = window.end;
    }
    if end < start {
        end = start;
    }
    (start, end)
}

type RangeKey = (
    DateTime<Local>,
    Option<DateTime<Local>>,
    DateTime<Local>,
    DateTime<Local>,
);

/// Memo for [`normalize_range`], scoped to one layout pass.
///
/// Layout consults the same record several times per pass. The key is the
/// full input tuple (raw bounds plus window bounds) so a window change can
/// never serve a stale result.
#[derive(Debug, Default)]
pub struct NormalizeCache {
    entries: HashMap<RangeKey, (DateTime<Local>, DateTime<Local>)>,
}

impl NormalizeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(
        &mut self,
        start: DateTime<Local>,
        end: Option<DateTime<Local>>,
        window: &ScheduleWindow,
        default_block: Duration,
    ) -> (DateTime<Local>, DateTime<Local>) {
        *self
            .entries
            .entry((start, end, window.start, window.end))
            .or_insert_with(|| normalize_range(start, end, window, default_block))
    }
}
