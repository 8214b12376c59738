//! Configuration for report generation.

use crate::report::{JsonReporter, MarkdownReporter, Reporter};
use std::path::PathBuf;
use std::str::FromStr;

/// Output format of the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    /// Reporter that renders this format.
    pub fn reporter(self) -> Box<dyn Reporter> {
        match self {
            OutputFormat::Markdown => Box::new(MarkdownReporter::new()),
            OutputFormat::Json => Box::new(JsonReporter::new()),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Configuration for building a report.
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Build-output tree holding the generated test data.
    pub build_dir: PathBuf,
    /// Extension of test data files.
    pub artifact_extension: String,
    /// Report micro-benchmarks of sub-steps too.
    pub include_parts: bool,
    /// Output format.
    pub format: OutputFormat,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            build_dir: PathBuf::from("target/release/build"),
            artifact_extension: "bin".to_string(),
            include_parts: false,
            format: OutputFormat::Markdown,
        }
    }
}

impl ReportConfig {
    /// Create a new config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse config from environment variables.
    ///
    /// Supported variables:
    /// - `BENCH_REPORT_BUILD_DIR`: build-output tree (default: `target/release/build`)
    /// - `BENCH_REPORT_EXTENSION`: test data extension (default: `bin`)
    /// - `BENCH_REPORT_INCLUDE_PARTS`: report Part rows too (default: false)
    /// - `BENCH_REPORT_FORMAT`: `markdown` or `json`
    ///
    /// Unparseable values are ignored.
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();

        if let Some(v) = var("BENCH_REPORT_BUILD_DIR") {
            cfg.build_dir = PathBuf::from(v);
        }
        if let Some(v) = var("BENCH_REPORT_EXTENSION") {
            cfg.artifact_extension = v;
        }
        if let Some(v) = var("BENCH_REPORT_INCLUDE_PARTS") {
            cfg.include_parts = v == "1" || v.eq_ignore_ascii_case("true");
        }
        if let Some(v) = var("BENCH_REPORT_FORMAT") {
            if let Ok(format) = v.parse() {
                cfg.format = format;
            }
        }

        cfg
    }

    /// Set the build-output directory.
    pub fn build_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.build_dir = path.into();
        self
    }

    /// Set the test data extension.
    pub fn artifact_extension(mut self, ext: impl Into<String>) -> Self {
        self.artifact_extension = ext.into();
        self
    }

    /// Include Part rows.
    pub fn include_parts(mut self, v: bool) -> Self {
        self.include_parts = v;
        self
    }

    /// Set the output format.
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}
