//! Day-cell composition.
//!
//! Builds the ordered per-track entry stack for one in-month day: heads
//! where the resolver says a pill starts, continuations under running
//! pills, spacers for unoccupied lower tracks. The month composer later
//! promotes every cell of a row to the row-wide track count.

use chrono::NaiveDate;

use plancal_core::{color, CellEntry, ColorSource, Config, DayCell, PillHead, RenderMode, Task};

use crate::geometry::pill_span;
use crate::resolver::{resolve_day, DayTask};
use crate::tracks::TrackMap;

/// Compose the cell for an in-month day
pub fn compose_cell(
    day: NaiveDate,
    week_index: usize,
    tasks: &[&Task],
    tracks: &TrackMap,
    config: &Config,
) -> DayCell {
    let day_tasks = resolve_day(day, tasks, tracks, config.first_weekday);

    let mut cell = DayCell::in_month(day);
    let mut next_track = 0;
    for entry in &day_tasks {
        while next_track < entry.track {
            cell.entries.push(CellEntry::Spacer { track: next_track });
            next_track += 1;
        }
        if entry.starts_here {
            cell.entries
                .push(CellEntry::Head(build_head(entry, day, week_index, config)));
        } else {
            cell.entries.push(CellEntry::Continuation { track: entry.track });
        }
        next_track += 1;
    }

    cell.compact = config.render_mode == RenderMode::Compact && day_tasks.len() <= 1;
    cell
}

fn build_head(entry: &DayTask<'_>, day: NaiveDate, week_index: usize, config: &Config) -> PillHead {
    let task = entry.task;
    let color_key = match config.color_source {
        ColorSource::Phase => &task.phase,
        ColorSource::SubPhase => &task.subphase,
    };
    let description = if config.show_descriptions && !task.description.is_empty() {
        Some(task.description.clone())
    } else {
        None
    };

    PillHead {
        task_id: task.id.clone(),
        label: task.name.clone(),
        description,
        track: entry.track,
        span: pill_span(task, day, config.first_weekday),
        color: color::phase_color(color_key),
        status: task.status,
        milestone: task.milestone,
        anchor: format!("{}-w{}", task.id, week_index),
    }
}
