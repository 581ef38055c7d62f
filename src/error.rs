//! Error types shared by the loaders, configuration and axis linkage.

use std::path::PathBuf;

use thiserror::Error;

use crate::data::axis_link::ViewId;

/// Failure while reading one of the seed datasets at startup.
///
/// Every variant names the offending file; parse failures also carry the
/// 1-based line number so the operator can fix the input directly.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path}:{line}: expected a number, found `{token}`")]
    NotNumeric {
        path: PathBuf,
        line: usize,
        token: String,
    },
    #[error("{path}:{line}: expected at least {expected} columns, found {found}")]
    ShortRow {
        path: PathBuf,
        line: usize,
        expected: usize,
        found: usize,
    },
    #[error("{path}: line {line}: {source}")]
    Csv {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },
    #[error("{path}:{line}: time {time} is earlier than the previous row")]
    UnsortedTime { path: PathBuf, line: u64, time: f64 },
    #[error("{path}:{line}: time {time} is not a finite number")]
    NonFiniteTime { path: PathBuf, line: u64, time: f64 },
    #[error("{path}: need at least {required} rows, found {found}")]
    TooFewRows {
        path: PathBuf,
        required: usize,
        found: usize,
    },
}

/// Invalid engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("sample buffer capacity must be at least 1")]
    ZeroCapacity,
    #[error("replay window needs max_points >= 2, got {0}")]
    WindowTooSmall(usize),
    #[error("tick period must be positive")]
    ZeroTickPeriod,
    #[error("replay mode needs a flight replay dataset")]
    MissingReplayData,
    #[error("external mode needs a sample receiver")]
    MissingSampleReceiver,
}

/// Invalid request on a [`LinkedAxisGroup`](crate::data::axis_link::LinkedAxisGroup).
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("view {0:?} does not belong to this group")]
    UnknownView(ViewId),
    #[error("view {0:?} cannot share a vertical scale with itself")]
    SelfLink(ViewId),
    #[error("view {0:?} already follows another vertical scale")]
    ChainedScale(ViewId),
}

/// Anything that can stop the standalone panel from starting or running.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("window system error: {0}")]
    Ui(#[from] eframe::Error),
}
