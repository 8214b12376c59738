//! Error types for the report pipeline.
//!
//! Every failure here is fatal: the input or the build directory is broken and the
//! operator has to fix it before rerunning.

use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while parsing, joining, or deriving benchmark data.
#[derive(Error, Debug)]
pub enum ReportError {
    /// A `... bench:` line did not split into the expected number of fields.
    #[error("line {line}: expected {expected} fields, found {found}: {text:?}")]
    MalformedLine {
        /// 1-based line number across all inputs
        line: usize,
        expected: usize,
        found: usize,
        text: String,
    },

    /// The benchmark path has no `implementation::benchmark` pair.
    #[error("line {line}: benchmark path {path:?} has no `::` separator")]
    MalformedPath { line: usize, path: String },

    /// A mean or stddev token is not an integer once separators are stripped.
    #[error("line {line}: invalid {field} measurement {value:?}")]
    InvalidMeasurement {
        line: usize,
        field: &'static str,
        value: String,
        #[source]
        source: ParseIntError,
    },

    /// The implementation name has no known language prefix.
    #[error("unrecognized implementation name: {0}")]
    UnknownImplementation(String),

    /// The build-output directory to search does not exist.
    #[error("build directory {} does not exist", .0.display())]
    MissingBuildDir(PathBuf),

    /// No artifact with the given name was found.
    #[error("{name} not found under {}", .root.display())]
    MissingArtifact { name: String, root: PathBuf },

    /// More than one artifact with the given name was found.
    #[error("could not find exactly one artifact called '{name}'; found: {matches:?}")]
    AmbiguousArtifact { name: String, matches: Vec<PathBuf> },

    /// Throughput was requested for a measurement with a zero mean.
    #[error("benchmark {implementation}::{test_case} has a zero mean latency")]
    ZeroMean {
        implementation: String,
        test_case: String,
    },

    /// A rate figure could not be interpreted as nanoseconds per iteration.
    #[error("invalid ns/iter figure {0:?}")]
    InvalidRate(String),

    /// Reading an input or artifact failed.
    #[error("I/O error for '{}'", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReportError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ReportError>;
