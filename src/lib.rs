//! # bench-report
//!
//! Turns the console output of `cargo bench` into a throughput report.
//!
//! Each `... bench:` line becomes a [`BenchRecord`]. Records are joined with the size
//! of the generated test data they ran over (found under `target/release/build`),
//! throughput is derived from the mean latency, and the fastest complete
//! implementations are rendered as a Markdown table.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use bench_report::{generate, ReportConfig};
//!
//! let output = std::fs::read_to_string("bench.txt").unwrap();
//! let lines = output.lines().map(|l| Ok(l.to_string()));
//!
//! let config = ReportConfig::from_env();
//! generate(&config, lines, &mut std::io::stdout()).unwrap();
//! ```

mod artifact;
mod config;
mod error;
mod input;
mod metrics;
mod parse;
mod pipeline;
mod record;
mod report;

pub use artifact::{locate, ArtifactIndex};
pub use config::{OutputFormat, ReportConfig};
pub use error::{ReportError, Result};
pub use input::{read_lines, Input};
pub use metrics::{parse_nanos, Rate, Throughput, DEFAULT_BUFFER_MIB};
pub use parse::{lines_from_str, parse_line, records, records_from_str, Records};
pub use pipeline::{generate, join};
pub use record::{BenchRecord, Category, Language, ReportRow};
pub use report::{group_thousands, select_rows, JsonReporter, MarkdownReporter, Reporter};
