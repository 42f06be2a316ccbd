//! Resize translation: single-edge adjustments with cross-edge clamping.

use chrono::{DateTime, Local};

/// Which edge of the record a resize handle adjusts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeEdge {
    Start,
    End,
}

/// State for an active resize. Only the grabbed edge follows the pointer;
/// the other edge is held fixed, and dragging past it clamps to a
/// zero-duration range instead of inverting.
#[derive(Debug, Clone)]
pub struct ResizeContext {
    pub record_id: String,
    pub edge: ResizeEdge,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    hovered: Option<DateTime<Local>>,
}

impl ResizeContext {
    pub fn new(
        record_id: String,
        start: DateTime<Local>,
        end: DateTime<Local>,
        edge: ResizeEdge,
    ) -> Self {
        Self {
            record_id,
            edge,
            original_start: start,
            original_end: end,
            hovered: None,
        }
    }

    pub fn update_hover(&mut self, instant: DateTime<Local>) {
        self.hovered = Some(instant);
    }

    /// New (start, end) with the fixed edge held and crossing clamped.
    pub fn current_range(&self) -> (DateTime<Local>, DateTime<Local>) {
        match self.edge {
            ResizeEdge::Start => {
                let start = self
                    .hovered
                    .unwrap_or(self.original_start)
                    .min(self.original_end);
                (start, self.original_end)
            }
            ResizeEdge::End => {
                let end = self
                    .hovered
                    .unwrap_or(self.original_end)
                    .max(self.original_start);
                (self.original_start, end)
            }
        }
    }
}
