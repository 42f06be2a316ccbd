// Integration tests for the week layout pipeline and pointer interactions

mod fixtures;

use std::cell::RefCell;
use std::collections::HashSet;
use std::io::Write as _;
use std::rc::Rc;
use std::time::{Duration as StdDuration, Instant};

use chrono::Duration;
use pretty_assertions::assert_eq;
use serde_json::Value;

use fixtures::{monday, open_record, range_fields, timed_record, week_instant};
use weekgrid::models::record::{parse_instant, FieldChange, RowRecord};
use weekgrid::models::segment::SegmentPosition;
use weekgrid::models::settings::GridConfig;
use weekgrid::services::bus::{ViewBus, ViewEvent};
use weekgrid::services::interaction::resize::ResizeEdge;
use weekgrid::services::interaction::{
    GridViewport, InteractionSession, PointerSample, PointerTarget, RecordRange, RowUpdater,
};
use weekgrid::services::layout::{recompute, ScheduleWindow};
use weekgrid::services::settings::load_from_path;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn window() -> ScheduleWindow {
    ScheduleWindow::week_of(monday(), 0)
}

/// Captures every write the grid pushes through the update collaborator.
#[derive(Default)]
struct RecordingUpdater {
    writes: RefCell<Vec<(String, Vec<FieldChange>)>>,
}

impl RowUpdater for RecordingUpdater {
    fn update_row(
        &self,
        record_id: &str,
        changes: &[FieldChange],
        _is_delete: bool,
    ) -> anyhow::Result<()> {
        self.writes
            .borrow_mut()
            .push((record_id.to_string(), changes.to_vec()));
        Ok(())
    }
}

fn session_with(
    updater: Rc<RecordingUpdater>,
    bus: Rc<ViewBus>,
) -> InteractionSession {
    InteractionSession::new(
        GridConfig::default(),
        range_fields(),
        window(),
        GridViewport {
            width: 700.0,
            height: 2400.0,
            viewport_height: 2400.0,
            scroll_top: 0.0,
        },
        updater,
        bus,
    )
}

#[test]
fn test_overlapping_pair_shares_the_day_in_two_lanes() {
    init_logging();
    let records = vec![
        timed_record("first", week_instant(0, 9, 0), week_instant(0, 10, 0)),
        timed_record("second", week_instant(0, 9, 30), week_instant(0, 10, 30)),
    ];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());

    assert_eq!(layout.segments.len(), 2);
    let columns: HashSet<usize> = layout
        .segments
        .iter()
        .map(|segment| segment.overlap_column)
        .collect();
    assert_eq!(columns, HashSet::from([1, 2]));
    for segment in &layout.segments {
        assert_eq!(segment.day_index, 0);
        assert_eq!(segment.overlap_count, 2);
        assert!((segment.geometry.width_pct - 100.0 / 2.0 / 7.0).abs() < 1e-4);
        assert!(segment.geometry.visible);
    }
}

#[test]
fn test_midnight_spanning_record_renders_three_segments() {
    let records = vec![timed_record(
        "span",
        week_instant(0, 22, 0),
        week_instant(2, 2, 0),
    )];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());

    assert_eq!(layout.segments.len(), 3);
    let by_day: Vec<_> = (0..3)
        .map(|day| layout.segments_for_day(day).next().unwrap())
        .collect();
    assert_eq!(by_day[0].position, SegmentPosition::TopRounded);
    assert_eq!(by_day[1].position, SegmentPosition::Flat);
    assert_eq!(by_day[2].position, SegmentPosition::BottomRounded);
    for segment in &layout.segments {
        assert_eq!(segment.record_id, "span");
    }
    assert_eq!(by_day[2].end, week_instant(2, 2, 0));
}

#[test]
fn test_layout_pass_is_idempotent() {
    let records = vec![
        timed_record("a", week_instant(0, 9, 0), week_instant(0, 10, 0)),
        timed_record("b", week_instant(0, 9, 30), week_instant(0, 10, 30)),
        timed_record("c", week_instant(3, 22, 0), week_instant(4, 6, 0)),
        open_record("d", week_instant(5, 14, 0)),
    ];
    let fields = range_fields();
    let config = GridConfig::default();

    let first = recompute(&records, &fields, &window(), &config);
    let second = recompute(&records, &fields, &window(), &config);

    assert_eq!(first.segments, second.segments);
    assert_eq!(first.columns_per_day, second.columns_per_day);
}

#[test]
fn test_overflow_query_counts_past_the_column_cap() {
    let crowd: Vec<RowRecord> = ["a", "b", "c", "d"]
        .iter()
        .map(|id| timed_record(id, week_instant(0, 9, 0), week_instant(0, 10, 0)))
        .collect();

    let layout = recompute(&crowd, &range_fields(), &window(), &GridConfig::default());

    let overflow = layout.overflow_at(0, 9);
    assert!(overflow.is_overflow);
    assert_eq!(overflow.overflow_count, 1);

    // The fourth lane is hidden and surfaces only through the query
    let hidden: Vec<_> = layout
        .segments
        .iter()
        .filter(|segment| !segment.geometry.visible)
        .collect();
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].overlap_column, 4);

    // Exactly three occupants is not an overflow
    let trio = &crowd[..3];
    let layout = recompute(trio, &range_fields(), &window(), &GridConfig::default());
    assert!(!layout.overflow_at(0, 9).is_overflow);
    assert!(!layout.overflow_at(0, 10).is_overflow);
}

#[test]
fn test_malformed_rows_degrade_to_not_rendered() {
    init_logging();
    let records = vec![
        RowRecord::new("no-start"),
        RowRecord::new("bad-start").with_field("starts_at", Value::String("tuesday".into())),
        timed_record("inverted", week_instant(1, 12, 0), week_instant(1, 9, 0)),
        timed_record("good", week_instant(1, 9, 0), week_instant(1, 10, 0)),
    ];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());

    assert_eq!(layout.segments.len(), 1);
    assert_eq!(layout.segments[0].record_id, "good");
}

#[test]
fn test_missing_end_gets_the_default_block() {
    let records = vec![open_record("open", week_instant(2, 14, 0))];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());

    assert_eq!(layout.segments.len(), 1);
    let segment = &layout.segments[0];
    assert_eq!(segment.start, week_instant(2, 14, 0));
    assert_eq!(segment.end, week_instant(2, 14, 59));
}

#[test]
fn test_ranges_are_clipped_to_the_window() {
    // Starts the Sunday before the visible week
    let records = vec![timed_record(
        "early",
        week_instant(-1, 22, 0),
        week_instant(0, 1, 0),
    )];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());

    assert_eq!(layout.segments.len(), 1);
    let segment = &layout.segments[0];
    assert_eq!(segment.day_index, 0);
    assert_eq!(segment.start, window().start);
    assert_eq!(segment.end, week_instant(0, 1, 0));
}

#[test]
fn test_drag_across_days_preserves_duration_and_time_of_day() {
    let updater = Rc::new(RecordingUpdater::default());
    let bus = Rc::new(ViewBus::new());
    let mut session = session_with(updater.clone(), bus);
    let base = Instant::now();

    // Wednesday 09:30-10:30, dragged to the Saturday column at the same y
    session.pointer_down(
        PointerTarget::Record {
            record_id: "task".to_string(),
            range: RecordRange {
                start: week_instant(2, 9, 30),
                end: Some(week_instant(2, 10, 30)),
            },
        },
        PointerSample { x: 250.0, y: 950.0, at: base },
    );
    session.pointer_move(PointerSample {
        x: 550.0,
        y: 950.0,
        at: base + StdDuration::from_millis(250),
    });
    let result = session.pointer_up(PointerSample {
        x: 550.0,
        y: 950.0,
        at: base + StdDuration::from_millis(300),
    });

    let committed = result.committed.unwrap();
    assert_eq!(committed.start, week_instant(5, 9, 30));
    assert_eq!(committed.end, week_instant(5, 10, 30));

    // The final write carries both fields, parseable back to the instants
    let writes = updater.writes.borrow();
    let (record_id, changes) = writes.last().unwrap();
    assert_eq!(record_id, "task");
    assert_eq!(changes.len(), 2);
    assert_eq!(
        parse_instant(changes[0].value.as_str().unwrap()),
        Some(week_instant(5, 9, 30))
    );
    assert_eq!(
        parse_instant(changes[1].value.as_str().unwrap()),
        Some(week_instant(5, 10, 30))
    );
}

#[test]
fn test_resize_past_the_fixed_edge_commits_zero_duration() {
    let updater = Rc::new(RecordingUpdater::default());
    let bus = Rc::new(ViewBus::new());
    let mut session = session_with(updater.clone(), bus);
    let base = Instant::now();

    session.pointer_down(
        PointerTarget::Edge {
            record_id: "task".to_string(),
            range: RecordRange {
                start: week_instant(2, 9, 0),
                end: Some(week_instant(2, 10, 0)),
            },
            edge: ResizeEdge::End,
        },
        PointerSample { x: 250.0, y: 1000.0, at: base },
    );
    session.pointer_move(PointerSample {
        x: 250.0,
        y: 800.0,
        at: base + StdDuration::from_millis(60),
    });
    let result = session.pointer_up(PointerSample {
        x: 250.0,
        y: 800.0,
        at: base + StdDuration::from_millis(120),
    });

    let committed = result.committed.unwrap();
    assert_eq!(committed.start, week_instant(2, 9, 0));
    assert_eq!(committed.end, week_instant(2, 9, 0));
}

#[test]
fn test_click_expands_and_commit_notifies_the_bus() {
    let updater = Rc::new(RecordingUpdater::default());
    let bus = Rc::new(ViewBus::new());
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = events.clone();
    bus.subscribe(move |event| sink.borrow_mut().push(event.clone()));

    let mut session = session_with(updater.clone(), bus);
    let base = Instant::now();
    let target = PointerTarget::Record {
        record_id: "task".to_string(),
        range: RecordRange {
            start: week_instant(2, 9, 30),
            end: Some(week_instant(2, 10, 30)),
        },
    };

    // Quick click: expansion request, no write
    session.pointer_down(target.clone(), PointerSample { x: 250.0, y: 950.0, at: base });
    session.pointer_up(PointerSample {
        x: 250.0,
        y: 950.0,
        at: base + StdDuration::from_millis(80),
    });
    assert!(updater.writes.borrow().is_empty());

    // Held drag: range commit notification
    let later = base + StdDuration::from_secs(2);
    session.pointer_down(target, PointerSample { x: 250.0, y: 950.0, at: later });
    session.pointer_move(PointerSample {
        x: 550.0,
        y: 950.0,
        at: later + StdDuration::from_millis(250),
    });
    session.pointer_up(PointerSample {
        x: 550.0,
        y: 950.0,
        at: later + StdDuration::from_millis(300),
    });

    let events = events.borrow();
    assert!(matches!(
        events[0],
        ViewEvent::RecordExpandRequested { ref record_id } if record_id == "task"
    ));
    assert!(events.iter().any(|event| matches!(
        event,
        ViewEvent::RangeCommitted { record_id, .. } if record_id == "task"
    )));
}

#[test]
fn test_config_file_drives_geometry() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.toml");
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(file, "hour_height = 60.0").unwrap();
    writeln!(file, "segment_gutter = 0.0").unwrap();
    writeln!(file, "hour_seam = 0.0").unwrap();

    let config = load_from_path(&path).unwrap();
    let records = vec![timed_record(
        "task",
        week_instant(0, 9, 0),
        week_instant(0, 10, 0),
    )];
    let layout = recompute(&records, &range_fields(), &window(), &config);

    let segment = &layout.segments[0];
    assert_eq!(segment.geometry.top, 540.0);
    // 61 inclusive minute slots at one pixel per minute
    assert_eq!(segment.geometry.height, 61.0);
}

#[test]
fn test_segment_bounds_never_leave_the_window() {
    let records = vec![
        timed_record("long", week_instant(-2, 8, 0), week_instant(9, 20, 0)),
        timed_record("late", week_instant(6, 23, 0), week_instant(7, 4, 0)),
    ];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());

    assert!(!layout.segments.is_empty());
    for segment in &layout.segments {
        assert!(segment.start >= window().start);
        assert!(segment.end <= window().end);
        assert!(segment.start <= segment.end);
    }
    // The week-long record renders a slice on every day
    assert_eq!(
        layout
            .segments
            .iter()
            .filter(|segment| segment.record_id == "long")
            .count(),
        7
    );
}

#[test]
fn test_week_navigation_excludes_other_weeks() {
    let records = vec![
        timed_record("this-week", week_instant(1, 9, 0), week_instant(1, 10, 0)),
        timed_record("next-week", week_instant(8, 9, 0), week_instant(8, 10, 0)),
    ];

    let layout = recompute(&records, &range_fields(), &window(), &GridConfig::default());
    assert_eq!(layout.segments.len(), 1);
    assert_eq!(layout.segments[0].record_id, "this-week");

    let next = ScheduleWindow::week_of(monday() + Duration::days(7), 0);
    let layout = recompute(&records, &range_fields(), &next, &GridConfig::default());
    assert_eq!(layout.segments.len(), 1);
    assert_eq!(layout.segments[0].record_id, "next-week");
}
