//! The outbound page model: what the layout core hands to renderers.
//!
//! A `MonthPage` is an ordered list of week rows, each a seven-element
//! array of day cells; a cell carries an ordered per-track entry stack of
//! tagged `Head` / `Continuation` / `Spacer` variants. Renderers dispatch
//! on the tag and never inspect layout internals.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::color::Color;
use crate::{TaskId, TaskStatus};

/// One composed calendar month plus its legend
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MonthPage {
    pub year: i32,
    pub month: u32,
    /// Week rows covering every day of the month, ascending
    pub weeks: Vec<WeekRow>,
    pub legend: Legend,
}

impl MonthPage {
    /// Highest track count of any week row (0 when the month is empty)
    pub fn max_track_count(&self) -> usize {
        self.weeks.iter().map(|w| w.track_count).max().unwrap_or(0)
    }

    /// Distinct tasks with at least one pill head on this page
    pub fn task_count(&self) -> usize {
        let mut ids: Vec<&str> = self
            .weeks
            .iter()
            .flat_map(|w| w.cells.iter())
            .flat_map(|c| c.entries.iter())
            .filter_map(|e| match e {
                CellEntry::Head(head) => Some(head.task_id.as_str()),
                _ => None,
            })
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    }
}

/// Seven consecutive day cells aligned to the configured first weekday
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WeekRow {
    /// Zero-based index within the month page
    pub index: usize,
    /// Date of the first column
    pub start: NaiveDate,
    /// Exactly seven cells, including neighbor-month fillers
    pub cells: Vec<DayCell>,
    /// Row height in units of one pill height; every cell in the row is
    /// padded to this many entries
    pub track_count: usize,
}

/// One day cell of a week row
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    /// False for neighbor-month fillers
    pub in_month: bool,
    /// Day-of-month, `None` for fillers
    pub day_number: Option<u32>,
    /// True when compact mode selected the single-slot widget for this cell
    pub compact: bool,
    /// Per-track entries, ascending by track
    pub entries: Vec<CellEntry>,
}

impl DayCell {
    /// An empty neighbor-month cell; contributes only grid structure
    pub fn filler(date: NaiveDate) -> Self {
        Self {
            date,
            in_month: false,
            day_number: None,
            compact: false,
            entries: Vec::new(),
        }
    }

    /// An in-month cell with no entries yet
    pub fn in_month(date: NaiveDate) -> Self {
        Self {
            date,
            in_month: true,
            day_number: Some(date.day()),
            compact: false,
            entries: Vec::new(),
        }
    }

    /// Vertical footprint in pill heights
    pub fn footprint(&self) -> usize {
        self.entries.len()
    }

    /// Entry occupying the given track, if any
    pub fn entry_at(&self, track: usize) -> Option<&CellEntry> {
        self.entries.iter().find(|e| e.track() == track)
    }
}

/// One per-track slot of a cell's content stack
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CellEntry {
    /// A pill begins in this cell
    Head(PillHead),
    /// A pill whose head is earlier in the same week row covers this cell
    Continuation { track: usize },
    /// Nothing at this track today; preserves vertical alignment
    Spacer { track: usize },
}

impl CellEntry {
    pub fn track(&self) -> usize {
        match self {
            CellEntry::Head(head) => head.track,
            CellEntry::Continuation { track } | CellEntry::Spacer { track } => *track,
        }
    }

    pub fn is_head(&self) -> bool {
        matches!(self, CellEntry::Head(_))
    }
}

/// Payload of a pill head
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PillHead {
    pub task_id: TaskId,
    /// Task name as drawn on the pill
    pub label: String,
    /// Description text, present only when descriptions are enabled
    pub description: Option<String>,
    pub track: usize,
    /// Columns covered within this week row, 1..=7
    pub span: usize,
    pub color: Color,
    pub status: TaskStatus,
    /// Forwarded from the task; decoration is the renderer's call
    pub milestone: bool,
    /// Stable cross-reference identifier, `"{task_id}-w{week_index}"`
    pub anchor: String,
}

/// Per-month legend: distinct (phase, sub-phase) pairs, grouped by phase
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Legend {
    pub groups: Vec<LegendGroup>,
}

impl Legend {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendGroup {
    pub phase: String,
    pub entries: Vec<LegendEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct LegendEntry {
    pub subphase: String,
    pub color: Color,
}
