//! Track assignment: global overlap-free stacking of tasks.
//!
//! Tasks laid out together (the ones intersecting one month page) are
//! sorted by a deterministic key and greedily placed on the lowest track
//! whose previously accepted spans they do not overlap. The assignment is
//! re-verified before it leaves this module; a verification failure is a
//! programming defect, not an input error.

use std::cmp::Ordering;
use std::collections::HashMap;

use plancal_core::{LayoutError, Span, Task, TaskId};

/// Total mapping from task id to vertical track (0 = lowest)
#[derive(Clone, Debug, Default)]
pub struct TrackMap {
    tracks: HashMap<TaskId, usize>,
    track_count: usize,
}

impl TrackMap {
    /// Track of the given task, if it participated in the assignment
    pub fn track_of(&self, id: &str) -> Option<usize> {
        self.tracks.get(id).copied()
    }

    /// One past the highest track in use
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}

/// Deterministic placement order: start ascending, duration descending,
/// identifier ascending. Also the "first appearance" order for legends.
pub(crate) fn layout_cmp(a: &Task, b: &Task) -> Ordering {
    a.start
        .cmp(&b.start)
        .then_with(|| b.duration_days().cmp(&a.duration_days()))
        .then_with(|| a.id.cmp(&b.id))
}

/// Assign every task to the lowest track free over its whole span.
///
/// Always succeeds for well-formed input; a task with `start > end` is an
/// input-shape error reported before any placement happens.
pub fn assign_tracks(tasks: &[&Task]) -> Result<TrackMap, LayoutError> {
    for task in tasks {
        if task.start > task.end {
            return Err(LayoutError::InvalidTaskSpan {
                id: task.id.clone(),
                start: task.start,
                end: task.end,
            });
        }
    }

    let mut order: Vec<&Task> = tasks.to_vec();
    order.sort_by(|a, b| layout_cmp(a, b));

    // Accepted spans per track; a linear scan is fine at the O(N²) bound
    // the contract allows.
    let mut lanes: Vec<Vec<Span>> = Vec::new();
    let mut tracks = HashMap::with_capacity(order.len());

    for task in order {
        let span = task.span();
        let free = lanes
            .iter()
            .position(|lane| lane.iter().all(|placed| !placed.overlaps(&span)));
        let track = match free {
            Some(track) => track,
            None => {
                lanes.push(Vec::new());
                lanes.len() - 1
            }
        };
        lanes[track].push(span);
        tracks.insert(task.id.clone(), track);
    }

    let map = TrackMap {
        track_count: lanes.len(),
        tracks,
    };
    verify(tasks, &map)?;
    tracing::debug!(tasks = tasks.len(), tracks = map.track_count, "tracks assigned");
    Ok(map)
}

/// Re-check the non-collision invariant over the finished assignment
fn verify(tasks: &[&Task], map: &TrackMap) -> Result<(), LayoutError> {
    for (i, a) in tasks.iter().enumerate() {
        let track_a = map.track_of(&a.id).ok_or_else(|| {
            LayoutError::InvariantViolated(format!("task '{}' missing from track map", a.id))
        })?;
        for b in &tasks[i + 1..] {
            if a.span().overlaps(&b.span()) && map.track_of(&b.id) == Some(track_a) {
                return Err(LayoutError::InvariantViolated(format!(
                    "tasks '{}' and '{}' overlap on track {track_a}",
                    a.id, b.id
                )));
            }
        }
    }
    Ok(())
}
