//! YAML plan files.
//!
//! The on-disk shape mirrors the domain model closely enough that serde
//! does the heavy lifting; unknown fields and unknown status values are
//! rejected by the derive, duplicate ids by a post-pass.

use chrono::NaiveDate;
use serde::Deserialize;

use plancal_core::{Plan, Task, TaskStatus};

use crate::{check_unique_ids, ParseError};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawPlan {
    name: String,
    #[serde(default)]
    tasks: Vec<RawTask>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawTask {
    id: String,
    name: Option<String>,
    #[serde(default)]
    description: String,
    start: NaiveDate,
    end: NaiveDate,
    #[serde(default)]
    phase: String,
    #[serde(default, alias = "sub-phase")]
    subphase: String,
    #[serde(default)]
    status: TaskStatus,
    #[serde(default)]
    milestone: bool,
}

/// Parse a complete plan from YAML
pub fn parse(input: &str) -> Result<Plan, ParseError> {
    let raw: RawPlan = serde_yaml::from_str(input)?;

    let mut plan = Plan::new(raw.name);
    for record in raw.tasks {
        let mut task = Task::new(record.id, record.start, record.end)
            .description(record.description)
            .phase(record.phase)
            .subphase(record.subphase)
            .status(record.status);
        if let Some(name) = record.name {
            task = task.name(name);
        }
        if record.milestone {
            task = task.milestone();
        }
        plan.tasks.push(task);
    }

    check_unique_ids(&plan)?;
    Ok(plan)
}
