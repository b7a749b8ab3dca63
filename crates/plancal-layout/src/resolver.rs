//! Per-day task resolution.
//!
//! For one in-month day, list the active tasks ordered by track and decide
//! whether each is a pill head here or a continuation. A task heads a week
//! row on its first covered in-month day of that row: at `task.start`, on
//! the row's first column when it entered from the previous week, or on the
//! month's first day when it entered the page from the previous month
//! mid-row.

use chrono::NaiveDate;

use plancal_core::{date, FirstWeekday, Task};

use crate::tracks::TrackMap;

/// One active task on a given day
#[derive(Clone, Copy, Debug)]
pub struct DayTask<'a> {
    pub task: &'a Task,
    pub track: usize,
    /// True when the pill for this week row is drawn in this cell
    pub starts_here: bool,
}

/// Active tasks on `day`, ascending by track.
///
/// Tasks absent from the track map (spans outside the laid-out month) are
/// skipped.
pub fn resolve_day<'a>(
    day: NaiveDate,
    tasks: &[&'a Task],
    tracks: &TrackMap,
    first_weekday: FirstWeekday,
) -> Vec<DayTask<'a>> {
    let row_entry = date::week_start(day, first_weekday).max(date::first_of_month(day));

    let mut active: Vec<DayTask<'a>> = tasks
        .iter()
        .filter(|task| task.is_active_on(day))
        .filter_map(|task| {
            let track = tracks.track_of(&task.id)?;
            Some(DayTask {
                task,
                track,
                starts_here: day == task.start.max(row_entry),
            })
        })
        .collect();

    active.sort_by_key(|entry| entry.track);
    active
}
