//! Month-page composition.
//!
//! `GridLayouter` drives the whole pipeline for one month: select the
//! tasks whose spans intersect it, assign tracks, walk the week rows from
//! the week containing the 1st through the week containing the last day,
//! compose the seven cells of each row, then pad every cell to the row's
//! track count so entries at equal tracks align across the row.

use chrono::Duration;

use plancal_core::{date, CellEntry, Config, DayCell, LayoutError, Layouter, MonthPage, Plan, Span, Task, WeekRow};

use crate::cell::compose_cell;
use crate::legend::build_legend;
use crate::tracks::assign_tracks;

/// Calendar grid layouter
#[derive(Clone, Debug, Default)]
pub struct GridLayouter {
    config: Config,
}

impl GridLayouter {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Compose every month intersected by the plan's tasks, ascending
    pub fn layout_all(&self, plan: &Plan) -> Result<Vec<MonthPage>, LayoutError> {
        plan.months_covered()
            .into_iter()
            .map(|(year, month)| self.layout_month(plan, year, month))
            .collect()
    }
}

impl Layouter for GridLayouter {
    fn layout_month(&self, plan: &Plan, year: i32, month: u32) -> Result<MonthPage, LayoutError> {
        let (first, last) =
            date::month_bounds(year, month).ok_or(LayoutError::InvalidMonth { year, month })?;
        let month_span = Span::new(first, last);

        // Tasks lying entirely outside the month are excluded, not errors
        let tasks: Vec<&Task> = plan
            .tasks
            .iter()
            .filter(|t| t.span().overlaps(&month_span))
            .collect();

        let tracks = assign_tracks(&tasks)?;
        tracing::debug!(year, month, tasks = tasks.len(), "laying out month");

        let mut weeks = Vec::new();
        let mut row_start = date::week_start(first, self.config.first_weekday);
        let mut index = 0;
        while row_start <= last {
            let mut cells: Vec<DayCell> = Vec::with_capacity(7);
            let mut track_count = 0;
            for day in date::day_range(row_start, row_start + Duration::days(6)) {
                let cell = if day < first || day > last {
                    DayCell::filler(day)
                } else {
                    compose_cell(day, index, &tasks, &tracks, &self.config)
                };
                track_count = track_count.max(cell.footprint());
                cells.push(cell);
            }

            // Promote every cell to the row height; fillers included, so a
            // track index means the same vertical offset in all seven cells
            for cell in &mut cells {
                let mut track = cell.entries.len();
                while track < track_count {
                    cell.entries.push(CellEntry::Spacer { track });
                    track += 1;
                }
            }

            weeks.push(WeekRow {
                index,
                start: row_start,
                cells,
                track_count,
            });
            index += 1;
            row_start += Duration::days(7);
        }

        Ok(MonthPage {
            year,
            month,
            weeks,
            legend: build_legend(&tasks, &self.config),
        })
    }
}
