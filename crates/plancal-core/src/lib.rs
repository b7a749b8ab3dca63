//! # plancal-core
//!
//! Core domain model and traits for the plancal calendar layout engine.
//!
//! This crate provides:
//! - Domain types: `Plan`, `Task`, `Span`, `TaskStatus`
//! - The outbound page model: `MonthPage`, `WeekRow`, `DayCell`, `CellEntry`
//! - Date utilities, deterministic phase colors and configuration
//! - Core traits: `Layouter`, `Renderer`
//! - Error types
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use plancal_core::{Plan, Task, TaskStatus};
//!
//! let mut plan = Plan::new("Thesis Timeline");
//! plan.tasks.push(
//!     Task::new(
//!         "draft",
//!         NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2025, 9, 12).unwrap(),
//!     )
//!     .name("Write first draft")
//!     .phase("Writing")
//!     .status(TaskStatus::InProgress),
//! );
//! assert_eq!(plan.months_covered(), vec![(2025, 9)]);
//! ```

pub mod color;
pub mod config;
pub mod date;
pub mod page;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use color::Color;
pub use config::{ColorSource, Config, ConfigError, FirstWeekday, RenderMode};
pub use page::{
    CellEntry, DayCell, Legend, LegendEntry, LegendGroup, MonthPage, PillHead, WeekRow,
};

// ============================================================================
// Type Aliases
// ============================================================================

/// Unique identifier for a task
pub type TaskId = String;

// ============================================================================
// Task
// ============================================================================

/// A dated unit of work, rendered as one pill per week row it touches
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier
    pub id: TaskId,
    /// Human-readable name
    pub name: String,
    /// Free-text description (may be empty)
    #[serde(default)]
    pub description: String,
    /// First active day
    pub start: NaiveDate,
    /// Last active day (inclusive)
    pub end: NaiveDate,
    /// Phase name (legend grouping, default color key)
    #[serde(default)]
    pub phase: String,
    /// Sub-phase name
    #[serde(default)]
    pub subphase: String,
    /// Progress status
    #[serde(default)]
    pub status: TaskStatus,
    /// Is this a milestone?
    #[serde(default)]
    pub milestone: bool,
}

impl Task {
    /// Create a new task covering the inclusive day range `start..=end`
    pub fn new(id: impl Into<String>, start: NaiveDate, end: NaiveDate) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            description: String::new(),
            start,
            end,
            phase: String::new(),
            subphase: String::new(),
            status: TaskStatus::Planned,
            milestone: false,
        }
    }

    /// Set the task name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the phase
    pub fn phase(mut self, phase: impl Into<String>) -> Self {
        self.phase = phase.into();
        self
    }

    /// Set the sub-phase
    pub fn subphase(mut self, subphase: impl Into<String>) -> Self {
        self.subphase = subphase.into();
        self
    }

    /// Set the status
    pub fn status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Mark as milestone
    pub fn milestone(mut self) -> Self {
        self.milestone = true;
        self
    }

    /// The closed inclusive interval `[start, end]`
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Number of calendar days covered, counting both endpoints
    pub fn duration_days(&self) -> i64 {
        date::days_inclusive(self.start, self.end)
    }

    /// Whether the task is active on the given day
    pub fn is_active_on(&self, day: NaiveDate) -> bool {
        self.span().contains(day)
    }
}

/// Task progress status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TaskStatus::Planned => write!(f, "Planned"),
            TaskStatus::InProgress => write!(f, "In Progress"),
            TaskStatus::Completed => write!(f, "Completed"),
        }
    }
}

// ============================================================================
// Span
// ============================================================================

/// Closed inclusive day interval
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Span {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Two spans overlap iff `a.start <= b.end && b.start <= a.end`
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// Whether the span contains the given day
    pub fn contains(&self, day: NaiveDate) -> bool {
        day >= self.start && day <= self.end
    }
}

// ============================================================================
// Plan
// ============================================================================

/// A named collection of tasks; the layout core borrows it immutably
/// for the duration of one generation pass.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Plan {
    /// Human-readable plan name (document title)
    pub name: String,
    /// All tasks, in input order
    pub tasks: Vec<Task>,
}

impl Plan {
    /// Create an empty plan with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tasks: Vec::new(),
        }
    }

    /// Get a task by ID
    pub fn get_task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// All `(year, month)` pairs intersected by at least one task span,
    /// ascending. Tasks with reversed dates contribute nothing here; they
    /// are reported by the track assigner for the months they do intersect.
    pub fn months_covered(&self) -> Vec<(i32, u32)> {
        use chrono::Datelike;
        let mut months = std::collections::BTreeSet::new();
        for task in &self.tasks {
            if task.start > task.end {
                continue;
            }
            let mut index = task.start.year() * 12 + task.start.month() as i32 - 1;
            let last = task.end.year() * 12 + task.end.month() as i32 - 1;
            while index <= last {
                months.insert((index.div_euclid(12), (index.rem_euclid(12) + 1) as u32));
                index += 1;
            }
        }
        months.into_iter().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

// ============================================================================
// Traits
// ============================================================================

/// Month-page composition abstraction
pub trait Layouter {
    /// Compose the page for a single calendar month
    fn layout_month(&self, plan: &Plan, year: i32, month: u32) -> Result<MonthPage, LayoutError>;
}

/// Output rendering
pub trait Renderer {
    type Output;

    /// Render composed month pages to the output format
    fn render(&self, plan: &Plan, pages: &[MonthPage]) -> Result<Self::Output, RenderError>;
}

// ============================================================================
// Errors
// ============================================================================

/// Layout error
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid task span for '{id}': start {start} is after end {end}")]
    InvalidTaskSpan {
        id: TaskId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("invalid calendar month: {year}-{month}")]
    InvalidMonth { year: i32, month: u32 },

    #[error("internal invariant violated: {0}")]
    InvariantViolated(String),
}

/// Rendering error
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

// ============================================================================
// Tests
// ============================================================================
