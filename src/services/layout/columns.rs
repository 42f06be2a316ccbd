//! Greedy overlap-column assignment within one day.

use chrono::{DateTime, Local};

/// One record's clipped interval within a single day.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DaySpan {
    pub record_id: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DaySpan {
    /// Inclusive-bounds membership test.
    fn contains(&self, instant: DateTime<Local>) -> bool {
        instant >= self.start && instant <= self.end
    }

    /// Two spans collide when either one's bound falls inside the other.
    /// Checked both ways so a span fully covering another still collides.
    fn collides(&self, other: &DaySpan) -> bool {
        other.contains(self.start)
            || other.contains(self.end)
            || self.contains(other.start)
            || self.contains(other.end)
    }
}

/// Column assignment for the spans of one day.
#[derive(Debug, Default)]
pub(crate) struct ColumnLayout {
    /// (span, 1-based column slot)
    pub placed: Vec<(DaySpan, usize)>,
    pub column_count: usize,
}

/// Assign column slots so colliding spans never share a column.
///
/// Spans are placed latest-start first, scanning columns left to right and
/// claiming the first one whose occupants all clear the candidate. The
/// placement order is part of the rendered contract: it decides which of
/// two simultaneous spans claims the lower lane, and the stable sort keeps
/// equal starts in input order.
pub(crate) fn assign_columns(mut spans: Vec<DaySpan>) -> ColumnLayout {
    spans.sort_by(|a, b| b.start.cmp(&a.start));

    let mut columns: Vec<Vec<DaySpan>> = Vec::new();
    let mut placed = Vec::with_capacity(spans.len());

    for span in spans {
        let slot = columns
            .iter()
            .position(|occupants| occupants.iter().all(|occupant| !span.collides(occupant)));
        let slot = match slot {
            Some(index) => index,
            None => {
                columns.push(Vec::new());
                columns.len() - 1
            }
        };
        columns[slot].push(span.clone());
        placed.push((span, slot + 1));
    }

    ColumnLayout {
        column_count: columns.len(),
        placed,
    }
}
