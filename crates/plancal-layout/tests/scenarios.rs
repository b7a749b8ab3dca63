//! End-to-end layout scenarios with literal dates.

use chrono::NaiveDate;
use plancal_core::{CellEntry, Config, DayCell, Layouter, MonthPage, Plan, Task};
use plancal_layout::GridLayouter;

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn layout(tasks: Vec<Task>, year: i32, month: u32) -> MonthPage {
    let plan = Plan {
        name: "Scenario".into(),
        tasks,
    };
    GridLayouter::new(Config::default())
        .layout_month(&plan, year, month)
        .unwrap()
}

fn cell<'a>(page: &'a MonthPage, day: NaiveDate) -> &'a DayCell {
    page.weeks
        .iter()
        .flat_map(|w| w.cells.iter())
        .find(|c| c.date == day)
        .unwrap_or_else(|| panic!("no cell for {day}"))
}

fn head_of<'a>(cell: &'a DayCell, task_id: &str) -> &'a plancal_core::PillHead {
    cell.entries
        .iter()
        .find_map(|e| match e {
            CellEntry::Head(h) if h.task_id == task_id => Some(h),
            _ => None,
        })
        .unwrap_or_else(|| panic!("no head for '{task_id}' on {}", cell.date))
}

// Scenario A: single task Mon-Wed in a Monday-aligned week.
#[test]
fn single_task_spans_three_columns() {
    let page = layout(
        vec![Task::new("t1", date(2025, 9, 1), date(2025, 9, 3))],
        2025,
        9,
    );

    let monday = cell(&page, date(2025, 9, 1));
    let head = head_of(monday, "t1");
    assert_eq!(head.track, 0);
    assert_eq!(head.span, 3);

    for day in [date(2025, 9, 2), date(2025, 9, 3)] {
        let c = cell(&page, day);
        assert!(
            matches!(c.entries[0], CellEntry::Continuation { track: 0 }),
            "{day}"
        );
    }

    // Max track is 0: the pill's own cells need no spacers
    assert_eq!(page.weeks[0].track_count, 1);
    assert_eq!(page.max_track_count(), 1);
    for day in [date(2025, 9, 1), date(2025, 9, 2), date(2025, 9, 3)] {
        assert!(cell(&page, day)
            .entries
            .iter()
            .all(|e| !matches!(e, CellEntry::Spacer { .. })));
    }
}

// Scenario B: two overlapping tasks with the same start; the longer one
// takes the lower track.
#[test]
fn same_start_overlap_stacks_by_duration() {
    let page = layout(
        vec![
            Task::new("t1", date(2025, 9, 1), date(2025, 9, 5)),
            Task::new("t2", date(2025, 9, 1), date(2025, 9, 3)),
        ],
        2025,
        9,
    );

    let monday = cell(&page, date(2025, 9, 1));
    let t1 = head_of(monday, "t1");
    let t2 = head_of(monday, "t2");
    assert_eq!((t1.track, t1.span), (0, 5));
    assert_eq!((t2.track, t2.span), (1, 3));

    for day in [date(2025, 9, 2), date(2025, 9, 3)] {
        let c = cell(&page, day);
        assert!(matches!(c.entries[0], CellEntry::Continuation { track: 0 }));
        assert!(matches!(c.entries[1], CellEntry::Continuation { track: 1 }));
    }
    for day in [date(2025, 9, 4), date(2025, 9, 5)] {
        let c = cell(&page, day);
        assert!(matches!(c.entries[0], CellEntry::Continuation { track: 0 }));
        assert!(matches!(c.entries[1], CellEntry::Spacer { track: 1 }));
    }
}

// Scenario C: staggered starts; pills restart cleanly at the week boundary.
#[test]
fn staggered_overlap_across_week_boundary() {
    let page = layout(
        vec![
            Task::new("write_methods", date(2025, 11, 11), date(2025, 11, 18)),
            Task::new("send_proposal", date(2025, 11, 12), date(2025, 12, 1)),
        ],
        2025,
        11,
    );

    // Tue Nov 11: head at track 0, span clamped to the row (6 of 8 days)
    let tue = cell(&page, date(2025, 11, 11));
    let write_head = head_of(tue, "write_methods");
    assert_eq!((write_head.track, write_head.span), (0, 6));
    assert!(matches!(tue.entries[1], CellEntry::Spacer { track: 1 }));

    // Wed Nov 12: continuation below, second head above
    let wed = cell(&page, date(2025, 11, 12));
    assert!(matches!(wed.entries[0], CellEntry::Continuation { track: 0 }));
    let send_head = head_of(wed, "send_proposal");
    assert_eq!((send_head.track, send_head.span), (1, 5));

    // Mon Nov 17 opens a fresh row: both tasks head again, same tracks
    let mon = cell(&page, date(2025, 11, 17));
    let write_again = head_of(mon, "write_methods");
    let send_again = head_of(mon, "send_proposal");
    assert_eq!((write_again.track, write_again.span), (0, 2));
    assert_eq!((send_again.track, send_again.span), (1, 7));

    // Nothing leaks across the row boundary: Sun Nov 16 closes the row
    // with continuations only
    let sun = cell(&page, date(2025, 11, 16));
    assert!(sun.entries.iter().all(|e| !e.is_head()));
}

// Scenario D: disjoint lifetimes reuse track 0.
#[test]
fn disjoint_tasks_reuse_track_zero() {
    let page = layout(
        vec![
            Task::new("t1", date(2026, 1, 1), date(2026, 1, 5)),
            Task::new("t2", date(2026, 1, 10), date(2026, 1, 15)),
        ],
        2026,
        1,
    );

    assert_eq!(head_of(cell(&page, date(2026, 1, 1)), "t1").track, 0);
    assert_eq!(head_of(cell(&page, date(2026, 1, 10)), "t2").track, 0);
    assert_eq!(page.max_track_count(), 1);

    // No cell anywhere needs a track-1 spacer
    for week in &page.weeks {
        for c in &week.cells {
            assert!(c.entries.iter().all(|e| e.track() == 0));
        }
    }
}

// Scenario E: two zero-duration tasks on the same day overlap degenerately.
#[test]
fn zero_duration_tasks_stack_by_identifier() {
    let page = layout(
        vec![
            Task::new("t1", date(2026, 3, 2), date(2026, 3, 2)),
            Task::new("t2", date(2026, 3, 2), date(2026, 3, 2)),
        ],
        2026,
        3,
    );

    let monday = cell(&page, date(2026, 3, 2));
    let t1 = head_of(monday, "t1");
    let t2 = head_of(monday, "t2");
    assert_eq!((t1.track, t1.span), (0, 1));
    assert_eq!((t2.track, t2.span), (1, 1));

    // No continuation markers exist anywhere on the page
    for week in &page.weeks {
        for c in &week.cells {
            assert!(c
                .entries
                .iter()
                .all(|e| !matches!(e, CellEntry::Continuation { .. })));
        }
    }
}

// Scenario F: a task crossing the month boundary renders independently on
// both pages, clamped to each month's own days.
#[test]
fn month_straddling_task_renders_on_both_pages() {
    let tasks = vec![Task::new("t1", date(2026, 1, 28), date(2026, 2, 3))];
    let plan = Plan {
        name: "Scenario".into(),
        tasks,
    };
    let layouter = GridLayouter::new(Config::default());

    // January: head on Wed Jan 28 (the first covered day of its row),
    // continuations through Sat Jan 31, nothing on the Feb 1 filler
    let january = layouter.layout_month(&plan, 2026, 1).unwrap();
    let head = head_of(cell(&january, date(2026, 1, 28)), "t1");
    assert_eq!(head.span, 4);
    for day in [date(2026, 1, 29), date(2026, 1, 30), date(2026, 1, 31)] {
        let c = cell(&january, day);
        assert!(matches!(c.entries[0], CellEntry::Continuation { track: 0 }));
    }
    let feb_filler = cell(&january, date(2026, 2, 1));
    assert!(!feb_filler.in_month);
    assert!(feb_filler.entries.iter().all(|e| !e.is_head()));
    assert!(feb_filler
        .entries
        .iter()
        .all(|e| !matches!(e, CellEntry::Continuation { .. })));

    // February: fresh heads on Sun Feb 1 (mid-row month entry, span 1)
    // and Mon Feb 2 (new row, span 2)
    let february = layouter.layout_month(&plan, 2026, 2).unwrap();
    let entry_head = head_of(cell(&february, date(2026, 2, 1)), "t1");
    assert_eq!(entry_head.span, 1);
    let monday_head = head_of(cell(&february, date(2026, 2, 2)), "t1");
    assert_eq!(monday_head.span, 2);
    let tue = cell(&february, date(2026, 2, 3));
    assert!(matches!(tue.entries[0], CellEntry::Continuation { track: 0 }));

    // Anchors are stable and distinguish the week rows
    assert_eq!(head.anchor, "t1-w4");
    assert_eq!(entry_head.anchor, "t1-w0");
    assert_eq!(monday_head.anchor, "t1-w1");
}
