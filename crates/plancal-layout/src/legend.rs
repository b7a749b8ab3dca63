//! Per-month legend aggregation.
//!
//! Enumerates the distinct (phase, sub-phase) pairs among the month's
//! tasks, grouped by phase. Order is first appearance over the
//! deterministic layout order, which keeps legends independent of input
//! file ordering.

use plancal_core::{color, ColorSource, Config, Legend, LegendEntry, LegendGroup, Task};

use crate::tracks::layout_cmp;

/// Build the legend for the tasks appearing on one month page
pub fn build_legend(tasks: &[&Task], config: &Config) -> Legend {
    let mut ordered: Vec<&Task> = tasks.to_vec();
    ordered.sort_by(|a, b| layout_cmp(a, b));

    let mut groups: Vec<LegendGroup> = Vec::new();
    for task in ordered {
        let color_key = match config.color_source {
            ColorSource::Phase => &task.phase,
            ColorSource::SubPhase => &task.subphase,
        };
        let color = color::phase_color(color_key);

        let found = groups.iter().position(|g| g.phase == task.phase);
        let index = match found {
            Some(index) => index,
            None => {
                groups.push(LegendGroup {
                    phase: task.phase.clone(),
                    entries: Vec::new(),
                });
                groups.len() - 1
            }
        };
        let group = &mut groups[index];
        if !group.entries.iter().any(|e| e.subphase == task.subphase) {
            group.entries.push(LegendEntry {
                subphase: task.subphase.clone(),
                color,
            });
        }
    }

    Legend { groups }
}
