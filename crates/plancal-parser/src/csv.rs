//! CSV task tables.
//!
//! A fixed nine-column header, double-quoted fields with `""` escapes,
//! blank lines and `#` comments skipped. Small enough that a hand-written
//! splitter beats pulling in a dependency.

use std::str::FromStr;

use chrono::NaiveDate;

use plancal_core::{Plan, Task, TaskStatus};

use crate::{check_unique_ids, ParseError};

const HEADER: [&str; 9] = [
    "id",
    "name",
    "start",
    "end",
    "phase",
    "subphase",
    "status",
    "milestone",
    "description",
];

/// Parse a task table; the plan name comes from the caller (file stem)
pub fn parse(input: &str, plan_name: &str) -> Result<Plan, ParseError> {
    let mut plan = Plan::new(plan_name);
    let mut header_seen = false;

    for (index, raw_line) in input.lines().enumerate() {
        let line_no = index + 1;
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields = split_fields(line, line_no)?;
        if !header_seen {
            check_header(&fields, line_no)?;
            header_seen = true;
            continue;
        }
        plan.tasks.push(parse_record(&fields, line_no)?);
    }

    if !header_seen {
        return Err(ParseError::Malformed {
            line: 1,
            message: "missing header row".into(),
        });
    }
    check_unique_ids(&plan)?;
    Ok(plan)
}

fn check_header(fields: &[String], line: usize) -> Result<(), ParseError> {
    let matches = fields.len() == HEADER.len()
        && fields
            .iter()
            .zip(HEADER.iter())
            .all(|(got, want)| got.trim().eq_ignore_ascii_case(want));
    if matches {
        Ok(())
    } else {
        Err(ParseError::Malformed {
            line,
            message: format!("expected header '{}'", HEADER.join(",")),
        })
    }
}

fn parse_record(fields: &[String], line: usize) -> Result<Task, ParseError> {
    if fields.len() > HEADER.len() {
        return Err(ParseError::Malformed {
            line,
            message: format!("expected at most {} fields, got {}", HEADER.len(), fields.len()),
        });
    }
    let field = |index: usize| fields.get(index).map(|s| s.trim()).unwrap_or("");

    let id = field(0);
    if id.is_empty() {
        return Err(ParseError::Malformed {
            line,
            message: "empty task id".into(),
        });
    }

    let start = parse_date(field(2), "start")?;
    let end = parse_date(field(3), "end")?;

    let mut task = Task::new(id, start, end)
        .phase(field(4))
        .subphase(field(5))
        .status(parse_status(field(6))?)
        .description(field(8));
    if !field(1).is_empty() {
        task = task.name(field(1));
    }
    if parse_milestone(field(7))? {
        task = task.milestone();
    }
    Ok(task)
}

fn parse_date(value: &str, field: &'static str) -> Result<NaiveDate, ParseError> {
    NaiveDate::from_str(value).map_err(|_| ParseError::InvalidValue {
        field,
        value: value.to_string(),
    })
}

fn parse_status(value: &str) -> Result<TaskStatus, ParseError> {
    match value.to_lowercase().as_str() {
        "" | "planned" => Ok(TaskStatus::Planned),
        "in-progress" => Ok(TaskStatus::InProgress),
        "completed" => Ok(TaskStatus::Completed),
        _ => Err(ParseError::InvalidValue {
            field: "status",
            value: value.to_string(),
        }),
    }
}

fn parse_milestone(value: &str) -> Result<bool, ParseError> {
    match value.to_lowercase().as_str() {
        "" | "false" | "no" | "0" => Ok(false),
        "true" | "yes" | "1" => Ok(true),
        _ => Err(ParseError::InvalidValue {
            field: "milestone",
            value: value.to_string(),
        }),
    }
}

/// Split one line into fields, honoring double quotes with `""` escapes
fn split_fields(line: &str, line_no: usize) -> Result<Vec<String>, ParseError> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    if in_quotes {
        return Err(ParseError::Malformed {
            line: line_no,
            message: "unterminated quoted field".into(),
        });
    }
    fields.push(current);
    Ok(fields)
}
