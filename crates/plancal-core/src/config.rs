//! Generation configuration.
//!
//! Deserializable from a `plancal.toml` file; the enum options also
//! implement `FromStr` so CLI flags fail fast with the offending field
//! name.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid configuration option '{field}': unknown value '{value}'")]
    InvalidOption { field: &'static str, value: String },
}

/// Which day opens a week row
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirstWeekday {
    #[default]
    Monday,
    Sunday,
}

impl FromStr for FirstWeekday {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "monday" => Ok(FirstWeekday::Monday),
            "sunday" => Ok(FirstWeekday::Sunday),
            _ => Err(ConfigError::InvalidOption {
                field: "first_weekday",
                value: value.to_string(),
            }),
        }
    }
}

/// Cell widget selection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    /// Always use the stacking widget
    #[default]
    Standard,
    /// Use the single-slot widget when a cell holds at most one task
    Compact,
}

impl FromStr for RenderMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "standard" => Ok(RenderMode::Standard),
            "compact" => Ok(RenderMode::Compact),
            _ => Err(ConfigError::InvalidOption {
                field: "render_mode",
                value: value.to_string(),
            }),
        }
    }
}

/// Which task field keys the color assignment
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorSource {
    #[default]
    #[serde(rename = "phase")]
    Phase,
    #[serde(rename = "sub-phase", alias = "subphase")]
    SubPhase,
}

impl FromStr for ColorSource {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "phase" => Ok(ColorSource::Phase),
            "sub-phase" | "subphase" => Ok(ColorSource::SubPhase),
            _ => Err(ConfigError::InvalidOption {
                field: "color_source",
                value: value.to_string(),
            }),
        }
    }
}

/// Options recognized by the layout core and forwarded to renderers
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Week row alignment
    pub first_weekday: FirstWeekday,
    /// Stacking vs single-slot cell widgets
    pub render_mode: RenderMode,
    /// Pill height as a renderer length; the core counts footprints in
    /// units of one pill height and never interprets the value
    pub pill_height: String,
    /// Whether pill heads carry the task description
    pub show_descriptions: bool,
    /// Whether milestone tasks are visually decorated (renderer concern;
    /// the core forwards the milestone flag either way)
    pub milestone_marker: bool,
    /// Key field for color assignment
    pub color_source: ColorSource,
    /// Forwarded verbatim to the renderer's weekday header row
    pub week_column_header_style: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            first_weekday: FirstWeekday::Monday,
            render_mode: RenderMode::Standard,
            pill_height: "4.5mm".into(),
            show_descriptions: true,
            milestone_marker: true,
            color_source: ColorSource::Phase,
            week_column_header_style: "\\bfseries\\small".into(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the first weekday
    pub fn first_weekday(mut self, first_weekday: FirstWeekday) -> Self {
        self.first_weekday = first_weekday;
        self
    }

    /// Switch to compact cell widgets
    pub fn compact(mut self) -> Self {
        self.render_mode = RenderMode::Compact;
        self
    }

    /// Drop descriptions from pill heads
    pub fn without_descriptions(mut self) -> Self {
        self.show_descriptions = false;
        self
    }

    /// Key colors by sub-phase instead of phase
    pub fn color_by_subphase(mut self) -> Self {
        self.color_source = ColorSource::SubPhase;
        self
    }
}
