//! Quantified layout invariants checked over a mixed fixture plan.

use chrono::NaiveDate;
use plancal_core::{color, date, CellEntry, Config, FirstWeekday, MonthPage, Plan, Span, Task};
use plancal_layout::{assign_tracks, GridLayouter};

fn d(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A deliberately messy plan: dense overlaps, zero-duration tasks,
/// month- and year-straddling spans, duplicate phases.
fn fixture() -> Plan {
    let mut plan = Plan::new("Fixture");
    let specs: &[(&str, (i32, u32, u32), (i32, u32, u32), &str)] = &[
        ("kickoff", (2025, 9, 1), (2025, 9, 1), "Setup"),
        ("survey", (2025, 9, 1), (2025, 9, 12), "Analysis"),
        ("outline", (2025, 9, 3), (2025, 9, 8), "Writing"),
        ("figures", (2025, 9, 5), (2025, 9, 20), "Analysis"),
        ("draft", (2025, 9, 8), (2025, 10, 2), "Writing"),
        ("pilot", (2025, 9, 10), (2025, 9, 10), "Analysis"),
        ("revise", (2025, 9, 29), (2025, 10, 14), "Writing"),
        ("submit", (2025, 10, 15), (2025, 10, 15), "Submission"),
        ("review_1", (2025, 10, 20), (2025, 11, 7), "Review"),
        ("respond", (2025, 11, 3), (2025, 11, 21), "Writing"),
        ("review_2", (2025, 11, 17), (2025, 12, 5), "Review"),
        ("camera", (2025, 12, 1), (2026, 1, 9), "Submission"),
        ("present", (2026, 1, 12), (2026, 1, 16), "Outreach"),
        ("archive", (2026, 1, 16), (2026, 1, 16), "Outreach"),
    ];
    for (id, start, end, phase) in specs {
        plan.tasks.push(
            Task::new(*id, d(start.0, start.1, start.2), d(end.0, end.1, end.2)).phase(*phase),
        );
    }
    plan
}

fn pages(config: Config) -> Vec<MonthPage> {
    GridLayouter::new(config).layout_all(&fixture()).unwrap()
}

fn month_tasks(plan: &Plan, year: i32, month: u32) -> Vec<&Task> {
    let (first, last) = date::month_bounds(year, month).unwrap();
    let span = Span::new(first, last);
    plan.tasks
        .iter()
        .filter(|t| t.span().overlaps(&span))
        .collect()
}

// Property 1: overlapping spans never share a track within a month.
#[test]
fn non_collision() {
    let plan = fixture();
    for (year, month) in plan.months_covered() {
        let tasks = month_tasks(&plan, year, month);
        let map = assign_tracks(&tasks).unwrap();
        for (i, a) in tasks.iter().enumerate() {
            for b in &tasks[i + 1..] {
                if a.span().overlaps(&b.span()) {
                    assert_ne!(
                        map.track_of(&a.id),
                        map.track_of(&b.id),
                        "{}-{:02}: '{}' and '{}' collide",
                        year,
                        month,
                        a.id,
                        b.id
                    );
                }
            }
        }
    }
}

// Property 2: two runs over identical input agree byte-for-byte.
#[test]
fn deterministic_output() {
    let first = serde_json::to_string(&pages(Config::default())).unwrap();
    let second = serde_json::to_string(&pages(Config::default())).unwrap();
    assert_eq!(first, second);

    let sunday = Config::default().first_weekday(FirstWeekday::Sunday);
    let third = serde_json::to_string(&pages(sunday.clone())).unwrap();
    let fourth = serde_json::to_string(&pages(sunday)).unwrap();
    assert_eq!(third, fourth);
}

// Property 3: in placement order, no task could take a lower track.
#[test]
fn pack_lowest() {
    let plan = fixture();
    for (year, month) in plan.months_covered() {
        let mut tasks = month_tasks(&plan, year, month);
        // The assigner's determinism key
        tasks.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then_with(|| b.duration_days().cmp(&a.duration_days()))
                .then_with(|| a.id.cmp(&b.id))
        });
        let map = assign_tracks(&tasks).unwrap();

        for (position, task) in tasks.iter().enumerate() {
            let track = map.track_of(&task.id).unwrap();
            for lower in 0..track {
                let blocked = tasks[..position].iter().any(|earlier| {
                    map.track_of(&earlier.id) == Some(lower)
                        && earlier.span().overlaps(&task.span())
                });
                assert!(
                    blocked,
                    "{}-{:02}: '{}' at track {track} but track {lower} was free",
                    year, month, task.id
                );
            }
        }
    }
}

// Property 4: exactly one head per (task, week row) intersection; every
// other covered in-month cell of that row continues at the same track.
#[test]
fn one_head_per_week_row_intersection() {
    for page in pages(Config::default()) {
        let (first, last) = date::month_bounds(page.year, page.month).unwrap();
        let plan = fixture();
        for week in &page.weeks {
            let row_end = week.start + chrono::Duration::days(6);
            for task in &plan.tasks {
                let from = task.start.max(week.start).max(first);
                let to = task.end.min(row_end).min(last);
                if from > to {
                    continue;
                }

                let covered: Vec<_> = week
                    .cells
                    .iter()
                    .filter(|c| c.date >= from && c.date <= to)
                    .collect();
                let heads: Vec<_> = covered
                    .iter()
                    .filter_map(|c| {
                        c.entries.iter().find_map(|e| match e {
                            CellEntry::Head(h) if h.task_id == task.id => Some((c.date, h)),
                            _ => None,
                        })
                    })
                    .collect();
                assert_eq!(
                    heads.len(),
                    1,
                    "'{}' in {}-{:02} week {}",
                    task.id,
                    page.year,
                    page.month,
                    week.index
                );
                let (head_day, head) = heads[0];
                assert_eq!(head_day, from, "head sits on the first covered day");

                for c in covered.iter().filter(|c| c.date != head_day) {
                    assert!(
                        matches!(
                            c.entry_at(head.track),
                            Some(CellEntry::Continuation { .. })
                        ),
                        "'{}' on {} should continue at track {}",
                        task.id,
                        c.date,
                        head.track
                    );
                }
            }
        }
    }
}

// Property 5: column spans stay within the week row.
#[test]
fn span_bounds() {
    for page in pages(Config::default()) {
        for week in &page.weeks {
            for (column, cell) in week.cells.iter().enumerate() {
                for entry in &cell.entries {
                    if let CellEntry::Head(head) = entry {
                        assert!(head.span >= 1, "{}", head.anchor);
                        assert!(head.span <= 7, "{}", head.anchor);
                        assert!(
                            column + head.span <= 7,
                            "{} extends past its week row",
                            head.anchor
                        );
                    }
                }
            }
        }
    }
}

// Property 6: every cell of a row carries an entry at every track up to
// the row's maximum, in ascending order.
#[test]
fn track_alignment() {
    for page in pages(Config::default()) {
        for week in &page.weeks {
            for cell in &week.cells {
                assert_eq!(cell.footprint(), week.track_count, "{}", cell.date);
                for (track, entry) in cell.entries.iter().enumerate() {
                    assert_eq!(entry.track(), track, "{}", cell.date);
                }
            }
        }
    }
}

// Property 7: date normalization is idempotent.
#[test]
fn normalization_idempotent() {
    let moment = d(2025, 9, 14).and_hms_opt(23, 59, 59).unwrap();
    let once = date::normalize(moment);
    let twice = date::normalize(once.and_hms_opt(0, 0, 0).unwrap());
    assert_eq!(once, twice);
}

// Property 8: phase colors are stable and normalization-invariant.
#[test]
fn color_stability() {
    for phase in ["Setup", "Analysis", "Writing", "Review", "Submission"] {
        assert_eq!(color::phase_color(phase), color::phase_color(phase));
        assert_eq!(
            color::phase_color(phase),
            color::phase_color(&format!("  {}  ", phase.to_uppercase()))
        );
    }
}

// The assignment is total: every intersecting task has a track.
#[test]
fn assignment_is_total() {
    let plan = fixture();
    for (year, month) in plan.months_covered() {
        let tasks = month_tasks(&plan, year, month);
        let map = assign_tracks(&tasks).unwrap();
        assert_eq!(map.len(), tasks.len());
        for task in &tasks {
            assert!(map.track_of(&task.id).is_some(), "{}", task.id);
        }
    }
}
