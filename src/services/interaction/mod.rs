//! Pointer interaction translation for the week grid.
//!
//! Converts live pointer events into normalized range updates. The state
//! machine is the only writer coordination in the system: one gesture is
//! active at a time, and every terminal transition lands back in `Idle` —
//! a session stuck in an active state would ghost-drag the next gesture.

pub mod drag;
pub mod resize;
mod throttle;

use std::rc::Rc;
use std::time::{Duration as StdDuration, Instant};

use anyhow::Result;
use chrono::{DateTime, Duration, Local, NaiveTime};

use crate::models::record::{FieldChange, RangeFields};
use crate::models::settings::GridConfig;
use crate::services::bus::{ViewBus, ViewEvent};
use crate::services::layout::ScheduleWindow;

use drag::DragContext;
use resize::{ResizeContext, ResizeEdge};
use throttle::WriteThrottle;

/// Write-back collaborator for range changes.
///
/// Assumed asynchronous and eventually consistent on the host side; the
/// grid fires and forgets, logging failures without interrupting the
/// gesture.
#[cfg_attr(test, mockall::automock)]
pub trait RowUpdater {
    fn update_row(&self, record_id: &str, changes: &[FieldChange], is_delete: bool)
        -> Result<()>;
}

/// A pointer sample relative to the scrollable grid viewport.
#[derive(Debug, Clone, Copy)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
    pub at: Instant,
}

/// Metrics of the grid container and its scroll viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridViewport {
    /// Full width of the seven day columns, px
    pub width: f32,
    /// Full height of the 24 hour rows, px
    pub height: f32,
    /// Visible height of the scrollable area, px
    pub viewport_height: f32,
    /// Current scroll offset, px
    pub scroll_top: f32,
}

impl GridViewport {
    /// Map a viewport-relative pointer position to a day column and a
    /// snapped time of day.
    pub fn slot_at(&self, x: f32, y: f32, snap_minutes: u32) -> (usize, NaiveTime) {
        let fraction_x = if self.width > 0.0 {
            (x / self.width).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let day = ((fraction_x * 7.0).floor() as usize).min(6);

        let content_y = y + self.scroll_top;
        let fraction_y = if self.height > 0.0 {
            (content_y / self.height).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let mut hour = ((fraction_y * 24.0).floor() as u32).min(23);
        let raw_minute = (fraction_y * 24.0 - hour as f32) * 60.0;
        let snap = snap_minutes.clamp(1, 60);
        let mut minute = ((raw_minute / snap as f32).round() as u32) * snap;
        if minute >= 60 {
            if hour < 23 {
                hour += 1;
                minute = 0;
            } else {
                minute = 60 - snap;
            }
        }
        (day, NaiveTime::from_hms_opt(hour, minute, 0).unwrap())
    }

    /// Scroll nudge while the pointer sits near a viewport edge; zero when
    /// no nudge is needed. Fixed increments per pointer-move event, no
    /// inertia.
    pub fn edge_nudge(&self, y: f32, margin: f32, step: f32) -> f32 {
        if y < margin && self.scroll_top > 0.0 {
            -step
        } else if y > self.viewport_height - margin
            && self.scroll_top + self.viewport_height < self.height
        {
            step
        } else {
            0.0
        }
    }
}

/// The record range known to the host when a gesture starts.
#[derive(Debug, Clone, Copy)]
pub struct RecordRange {
    pub start: DateTime<Local>,
    /// Absent when the record has no end field configured
    pub end: Option<DateTime<Local>>,
}

/// What the pointer went down on.
#[derive(Debug, Clone)]
pub enum PointerTarget {
    /// The body of a rendered segment
    Record { record_id: String, range: RecordRange },
    /// A segment's resize handle
    Edge {
        record_id: String,
        range: RecordRange,
        edge: ResizeEdge,
    },
    /// An empty grid cell
    Cell,
}

/// A live or committed range for the active record.
#[derive(Debug, Clone, PartialEq)]
pub struct RangePreview {
    pub record_id: String,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

/// Actions produced by one pointer event, drained by the host after each
/// call into the session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionResult {
    /// Live (uncommitted) range for the active record
    pub preview: Option<RangePreview>,
    /// Range written through the row updater on release
    pub committed: Option<RangePreview>,
    /// Pixels to scroll the host viewport by
    pub scroll_by: f32,
}

impl InteractionResult {
    /// Merge another result into this one.
    pub fn merge(&mut self, other: InteractionResult) {
        if other.preview.is_some() {
            self.preview = other.preview;
        }
        if other.committed.is_some() {
            self.committed = other.committed;
        }
        self.scroll_by += other.scroll_by;
    }

    pub fn has_actions(&self) -> bool {
        self.preview.is_some() || self.committed.is_some() || self.scroll_by != 0.0
    }
}

enum State {
    Idle,
    Pending {
        record_id: String,
        range: RecordRange,
        pressed_at: Instant,
    },
    Dragging { ctx: DragContext },
    Resizing { ctx: ResizeContext },
}

/// Translates pointer gestures into range updates.
///
/// `idle -> pending` on pointer-down over a record body (hold timer
/// running; an early release is a click and requests expansion instead),
/// `pending -> dragging` once the hold elapses, `idle -> resizing`
/// directly on an edge handle. Intermediate moves write through a
/// debounce; the final commit on release is immediate and unconditional.
pub struct InteractionSession {
    config: GridConfig,
    fields: RangeFields,
    window: ScheduleWindow,
    viewport: GridViewport,
    updater: Rc<dyn RowUpdater>,
    bus: Rc<ViewBus>,
    throttle: WriteThrottle,
    state: State,
}

impl InteractionSession {
    pub fn new(
        config: GridConfig,
        fields: RangeFields,
        window: ScheduleWindow,
        viewport: GridViewport,
        updater: Rc<dyn RowUpdater>,
        bus: Rc<ViewBus>,
    ) -> Self {
        let throttle = WriteThrottle::new(StdDuration::from_millis(config.write_debounce_ms));
        Self {
            config,
            fields,
            window,
            viewport,
            updater,
            bus,
            throttle,
            state: State::Idle,
        }
    }

    /// Refresh container metrics after a viewport resize or scroll.
    pub fn set_viewport(&mut self, viewport: GridViewport) {
        self.viewport = viewport;
    }

    /// Swap the visible window, e.g. after week navigation.
    pub fn set_window(&mut self, window: ScheduleWindow) {
        self.window = window;
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, State::Idle)
    }

    pub fn pointer_down(
        &mut self,
        target: PointerTarget,
        sample: PointerSample,
    ) -> InteractionResult {
        let result = InteractionResult::default();
        if self.is_active() {
            // One logical writer at a time; a second pointer is ignored.
            return result;
        }
        match target {
            PointerTarget::Record { record_id, range } => {
                self.state = State::Pending {
                    record_id,
                    range,
                    pressed_at: sample.at,
                };
            }
            PointerTarget::Edge { record_id, range, edge } => {
                let end = range.end.unwrap_or_else(|| {
                    range.start + Duration::minutes(self.config.default_block_minutes)
                });
                self.state = State::Resizing {
                    ctx: ResizeContext::new(record_id, range.start, end, edge),
                };
                self.throttle.reset();
            }
            PointerTarget::Cell => {
                let (day_index, time) =
                    self.viewport.slot_at(sample.x, sample.y, self.config.snap_minutes);
                self.bus.publish(ViewEvent::RecordCreateRequested { day_index, time });
            }
        }
        result
    }

    pub fn pointer_move(&mut self, sample: PointerSample) -> InteractionResult {
        let mut result = InteractionResult::default();

        // Promote a pending press once the hold delay elapses.
        let promote = match &self.state {
            State::Pending { pressed_at, .. } => {
                sample.at.duration_since(*pressed_at)
                    >= StdDuration::from_millis(self.config.hold_before_drag_ms)
            }
            _ => false,
        };
        if promote {
            if let State::Pending { record_id, range, .. } =
                std::mem::replace(&mut self.state, State::Idle)
            {
                self.state = State::Dragging {
                    ctx: DragContext::new(record_id, range.start, range.end),
                };
                self.throttle.reset();
            }
        }

        let (day, time) = self.viewport.slot_at(sample.x, sample.y, self.config.snap_minutes);
        let date = self.window.start.date_naive() + Duration::days(day as i64);

        match &mut self.state {
            State::Dragging { ctx } => {
                ctx.update_hover(date, time);
                let (start, end) = ctx.current_range();
                result.preview = Some(RangePreview {
                    record_id: ctx.record_id.clone(),
                    start,
                    end,
                });
                if self.throttle.admit(sample.at) {
                    write_range(
                        self.updater.as_ref(),
                        &self.fields,
                        &ctx.record_id,
                        start,
                        end,
                        ctx.has_end(),
                    );
                }
            }
            State::Resizing { ctx } => {
                let Some(instant) = date.and_time(time).and_local_timezone(Local).single()
                else {
                    return result;
                };
                ctx.update_hover(instant);
                let (start, end) = ctx.current_range();
                result.preview = Some(RangePreview {
                    record_id: ctx.record_id.clone(),
                    start,
                    end,
                });
                if self.throttle.admit(sample.at) {
                    write_range(
                        self.updater.as_ref(),
                        &self.fields,
                        &ctx.record_id,
                        start,
                        end,
                        true,
                    );
                }
            }
            _ => return result,
        }

        result.scroll_by = self.viewport.edge_nudge(
            sample.y,
            self.config.autoscroll_margin,
            self.config.autoscroll_step,
        );
        result
    }

    pub fn pointer_up(&mut self, sample: PointerSample) -> InteractionResult {
        let mut result = InteractionResult::default();
        let state = std::mem::replace(&mut self.state, State::Idle);
        self.throttle.reset();

        match state {
            State::Pending { record_id, range, pressed_at } => {
                let held = sample.at.duration_since(pressed_at);
                if held < StdDuration::from_millis(self.config.hold_before_drag_ms) {
                    // Click semantics: open the record instead of dragging.
                    self.bus
                        .publish(ViewEvent::RecordExpandRequested { record_id });
                } else {
                    // Hold elapsed without a move; commit in place.
                    let ctx = DragContext::new(record_id, range.start, range.end);
                    result.committed =
                        self.commit(&ctx.record_id, ctx.current_range(), ctx.has_end());
                }
            }
            State::Dragging { mut ctx } => {
                let (day, time) =
                    self.viewport.slot_at(sample.x, sample.y, self.config.snap_minutes);
                let date = self.window.start.date_naive() + Duration::days(day as i64);
                ctx.update_hover(date, time);
                result.committed =
                    self.commit(&ctx.record_id, ctx.current_range(), ctx.has_end());
            }
            State::Resizing { mut ctx } => {
                let (day, time) =
                    self.viewport.slot_at(sample.x, sample.y, self.config.snap_minutes);
                let date = self.window.start.date_naive() + Duration::days(day as i64);
                if let Some(instant) = date.and_time(time).and_local_timezone(Local).single() {
                    ctx.update_hover(instant);
                }
                result.committed = self.commit(&ctx.record_id, ctx.current_range(), true);
            }
            State::Idle => {}
        }
        result
    }

    /// Abandon the active gesture without committing. Host teardown hook;
    /// the grid itself always commits on release.
    pub fn cancel(&mut self) {
        self.state = State::Idle;
        self.throttle.reset();
    }

    /// Final write on release: immediate and never debounced, so the
    /// stored state matches the last pointer position exactly.
    fn commit(
        &self,
        record_id: &str,
        (start, end): (DateTime<Local>, DateTime<Local>),
        include_end: bool,
    ) -> Option<RangePreview> {
        write_range(
            self.updater.as_ref(),
            &self.fields,
            record_id,
            start,
            end,
            include_end,
        );
        self.bus.publish(ViewEvent::RangeCommitted {
            record_id: record_id.to_string(),
            start,
            end,
        });
        Some(RangePreview {
            record_id: record_id.to_string(),
            start,
            end,
        })
    }
}

fn write_range(
    updater: &dyn RowUpdater,
    fields: &RangeFields,
    record_id: &str,
    start: DateTime<Local>,
    end: DateTime<Local>,
    include_end: bool,
) {
    let mut changes = vec![FieldChange::instant(fields.start_field.clone(), start)];
    if include_end {
        if let Some(end_field) = fields.end_field.as_deref() {
            changes.push(FieldChange::instant(end_field, end));
        }
    }
    if let Err(err) = updater.update_row(record_id, &changes, false) {
        log::error!("failed to write range for record {}: {}", record_id, err);
    }
}
