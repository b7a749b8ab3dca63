//! # plancal-layout
//!
//! The calendar layout core: turns a borrowed task list into composed
//! month pages with overlap-free pill stacking.
//!
//! This crate provides:
//! - Track assignment (greedy lowest-free-track, deterministic ordering)
//! - Per-day task resolution (head vs continuation)
//! - Pill column geometry (week-row and month clamping)
//! - Day-cell and month-grid composition
//! - Per-month legend aggregation
//!
//! ## Example
//!
//! ```rust
//! use chrono::NaiveDate;
//! use plancal_core::{Config, Layouter, Plan, Task};
//! use plancal_layout::GridLayouter;
//!
//! let mut plan = Plan::new("Launch");
//! plan.tasks.push(Task::new(
//!     "draft",
//!     NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(),
//!     NaiveDate::from_ymd_opt(2025, 9, 3).unwrap(),
//! ));
//!
//! let layouter = GridLayouter::new(Config::default());
//! let page = layouter.layout_month(&plan, 2025, 9).unwrap();
//! assert_eq!(page.weeks.len(), 5);
//! assert_eq!(page.task_count(), 1);
//! ```

pub mod cell;
pub mod geometry;
pub mod legend;
pub mod month;
pub mod resolver;
pub mod tracks;

pub use cell::compose_cell;
pub use geometry::pill_span;
pub use legend::build_legend;
pub use month::GridLayouter;
pub use resolver::{resolve_day, DayTask};
pub use tracks::{assign_tracks, TrackMap};
