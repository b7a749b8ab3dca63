//! # plancal-parser
//!
//! Task-source loaders for plancal. Two input formats produce the same
//! validated [`Plan`]: a YAML plan file and a CSV task table. Malformed
//! records are rejected here; the layout core never sees them.
//!
//! ## Example
//!
//! ```rust
//! use plancal_parser::parse_yaml;
//!
//! let input = r#"
//! name: Thesis Timeline
//! tasks:
//!   - id: draft
//!     name: Write first draft
//!     start: 2025-09-01
//!     end: 2025-09-12
//!     phase: Writing
//! "#;
//!
//! let plan = parse_yaml(input).unwrap();
//! assert_eq!(plan.name, "Thesis Timeline");
//! assert_eq!(plan.tasks.len(), 1);
//! ```

pub mod csv;
pub mod yaml;

use std::path::Path;

use thiserror::Error;

use plancal_core::Plan;

/// Parsing error
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("line {line}: {message}")]
    Malformed { line: usize, message: String },

    #[error("invalid value for {field}: '{value}'")]
    InvalidValue { field: &'static str, value: String },

    #[error("duplicate task id '{0}'")]
    DuplicateTask(String),

    #[error("unsupported input format '{0}' (expected .yaml, .yml or .csv)")]
    UnsupportedFormat(String),
}

/// Parse a plan from the YAML format
pub fn parse_yaml(input: &str) -> Result<Plan, ParseError> {
    yaml::parse(input)
}

/// Parse a plan from the CSV table format
pub fn parse_csv(input: &str, plan_name: &str) -> Result<Plan, ParseError> {
    csv::parse(input, plan_name)
}

/// Parse a plan file, dispatching on the file extension
pub fn parse_file(path: &Path) -> Result<Plan, ParseError> {
    let content = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("plan");

    match path.extension().and_then(|e| e.to_str()) {
        Some("yaml" | "yml") => yaml::parse(&content),
        Some("csv") => csv::parse(&content, stem),
        other => Err(ParseError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

/// Reject duplicate task identifiers; shared by both loaders
pub(crate) fn check_unique_ids(plan: &Plan) -> Result<(), ParseError> {
    let mut seen = std::collections::HashSet::new();
    for task in &plan.tasks {
        if !seen.insert(task.id.as_str()) {
            return Err(ParseError::DuplicateTask(task.id.clone()));
        }
    }
    Ok(())
}
