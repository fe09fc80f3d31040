// File: src/errors.rs
//
// Error types for gridbench.
// Every failure is surfaced synchronously to the caller; nothing here is
// retried or recovered.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while expanding axis specifications into conditions
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConditionError {
    #[error("axis range {start}..{stop} has a zero step")]
    ZeroStep { start: i64, stop: i64 },
}

/// Errors raised by the timing harness
///
/// Any of these aborts the whole comparison; partial results are discarded.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HarnessError {
    #[error("condition {condition} has no value at position {index} (arity {arity})")]
    ArityMismatch { condition: String, index: usize, arity: usize },

    #[error("value {value} at position {index} does not fit the requested integer type")]
    ValueOutOfRange { index: usize, value: i64 },

    #[error("no setup registered for '{name}' (candidate '{label}')")]
    UnknownSetup { name: String, label: String },

    #[error("{setups} setups supplied for {candidates} candidates")]
    SetupCountMismatch { setups: usize, candidates: usize },

    #[error("candidate label '{0}' is used more than once")]
    DuplicateLabel(String),

    #[error("repeat count must be at least 1")]
    InvalidRepeatCount,

    #[error("candidate '{label}' failed: {message}")]
    Candidate { label: String, message: String },

    #[error(transparent)]
    Conditions(#[from] ConditionError),
}

/// Errors raised when reshaping result rows into a grid
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("no result rows to reshape")]
    Empty,

    #[error("axis {axis} is out of range for conditions of arity {arity}")]
    AxisOutOfRange { axis: usize, arity: usize },

    #[error("a row has {found} condition values but the first row has {expected}")]
    RaggedRows { expected: usize, found: usize },

    #[error("axis {axis} is not evenly spaced: {reason}")]
    NonUniformAxis { axis: usize, reason: String },

    #[error("inferred a {width}x{height} grid but there are {rows} rows")]
    ShapeMismatch { width: usize, height: usize, rows: usize },

    #[error("condition ({x}, {y}) appears more than once")]
    DuplicateCell { x: i64, y: i64 },

    #[error("bubble charts need two axes")]
    BubbleNeedsTwoAxes,
}

/// Errors raised while loading a benchmark plan
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read plan {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse plan: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid plan: {0}")]
    Invalid(String),

    #[error(transparent)]
    Conditions(#[from] ConditionError),
}

/// Errors raised while exporting or importing result collections
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("'{label}' has an invalid time of {seconds} seconds")]
    InvalidTime { label: String, seconds: f64 },
}
