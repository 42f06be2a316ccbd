//! Day and minute bucketing for the week grid.

use chrono::{Datelike, Timelike};

/// Minute slots in one day column.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Day-of-week index with Monday = 0 .. Sunday = 6.
pub fn day_index(date: impl Datelike) -> usize {
    date.weekday().num_days_from_monday() as usize
}

/// Minute-of-day grid coordinate for `instant`.
///
/// Floored by default. With `round_up`, a positive seconds component
/// carries the coordinate to the next minute so inclusive end-of-range
/// checks still cover the slot the range runs into. Clamped to the day
/// grid.
pub fn grid_minute(instant: impl Timelike, round_up: bool) -> u32 {
    let minute = instant.hour() * 60 + instant.minute();
    if round_up && instant.second() > 0 {
        (minute + 1).min(MINUTES_PER_DAY - 1)
    } else {
        minute
    }
}
