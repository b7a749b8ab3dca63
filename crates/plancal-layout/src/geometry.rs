//! Pill column spans.
//!
//! A pill drawn at day `d` covers `min(columns left in the week row, days
//! left in the task, days left in the month)` columns, never fewer than
//! one. The month clamp keeps task content out of neighbor-month filler
//! cells; the continuation of a clamped pill reappears as a fresh head on
//! the next page or row.

use chrono::NaiveDate;

use plancal_core::{date, FirstWeekday, Task};

/// Column span of the pill headed at `day` within its week row
pub fn pill_span(task: &Task, day: NaiveDate, first_weekday: FirstWeekday) -> usize {
    let remaining = date::remaining_in_week(day, first_weekday) as i64;
    let task_days = date::days_inclusive(day, task.end);
    let month_days = date::days_inclusive(day, date::last_of_month(day));
    remaining.min(task_days).min(month_days).max(1) as usize
}
