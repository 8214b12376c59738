//! Benchmark record types.

use crate::error::{ReportError, Result};
use crate::metrics::Throughput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Implementations that only touch part of the buffer, so a per-byte rate is meaningless.
const UNSIZED_IMPLEMENTATIONS: &[&str] = &["vec_eq_do_nothing_but_allocate", "vec_eq_only_prefix"];

/// One measurement parsed from a `... bench:` line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchRecord {
    /// Implementation module, e.g. "rust_iter"
    pub implementation: String,
    /// Test case with any `bench_` prefix removed, e.g. "random_sp"
    pub test_case: String,
    /// Mean latency in nanoseconds per iteration
    pub mean_ns: u64,
    /// Standard deviation in nanoseconds
    pub stddev_ns: u64,
}

/// Language an implementation is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    C,
    Rust,
    Python,
}

impl Language {
    /// Split an implementation name into its language and display name.
    ///
    /// `rust_iter` becomes `(Rust, "iter")`. Names without a language prefix keep
    /// their full name.
    pub fn split(implementation: &str) -> Result<(Language, String)> {
        let (prefix, rest) = implementation
            .split_once('_')
            .unwrap_or((implementation, ""));

        match prefix {
            "c" => Ok((Language::C, rest.to_string())),
            "rust" => Ok((Language::Rust, rest.to_string())),
            "python" => Ok((Language::Python, rest.to_string())),
            // Benchmarks named before the language prefix convention
            "vec" | "nonzero" => Ok((Language::Rust, implementation.to_string())),
            p if p.starts_with("np") => Ok((Language::Python, implementation.to_string())),
            _ => Err(ReportError::UnknownImplementation(
                implementation.to_string(),
            )),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Language::C => "C",
            Language::Rust => "Rust",
            Language::Python => "Python",
        })
    }
}

/// Whether a benchmark measures a complete solution or one step of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Full,
    Part,
}

impl Category {
    /// Classify an implementation by name.
    pub fn of(implementation: &str) -> Self {
        if implementation == "nonzero"
            || implementation.contains("vec_eq")
            || implementation.starts_with("np.")
        {
            Category::Part
        } else {
            Category::Full
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Category::Full => "Full",
            Category::Part => "Part",
        })
    }
}

/// A record joined with its test case size and derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(flatten)]
    pub record: BenchRecord,
    pub language: Language,
    /// Implementation name without its language prefix
    pub name: String,
    pub category: Category,
    /// Bytes processed per iteration (absent when the rate is meaningless)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bytes_per_iteration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub throughput: Option<Throughput>,
}

impl ReportRow {
    /// Classify a record by language and category. Size and throughput stay unset.
    pub fn classify(record: BenchRecord) -> Result<Self> {
        let (language, name) = Language::split(&record.implementation)?;
        let category = Category::of(&record.implementation);
        Ok(Self {
            record,
            language,
            name,
            category,
            bytes_per_iteration: None,
            throughput: None,
        })
    }

    /// Attach the size of the test case and derive throughput from it.
    pub fn with_test_case_size(mut self, test_case_size: u64) -> Result<Self> {
        if UNSIZED_IMPLEMENTATIONS.contains(&self.record.implementation.as_str()) {
            return Ok(self);
        }

        let throughput = Throughput::from_latency(test_case_size, self.record.mean_ns)
            .ok_or_else(|| ReportError::ZeroMean {
                implementation: self.record.implementation.clone(),
                test_case: self.record.test_case.clone(),
            })?;
        self.bytes_per_iteration = Some(test_case_size);
        self.throughput = Some(throughput);
        Ok(self)
    }

    /// Join a record with the size of its test case and derive the metrics.
    pub fn derive(record: BenchRecord, test_case_size: u64) -> Result<Self> {
        Self::classify(record)?.with_test_case_size(test_case_size)
    }

    /// Bytes per second, if a size is known.
    pub fn bytes_per_sec(&self) -> Option<f64> {
        self.throughput.map(|t| t.bytes_per_sec)
    }

    /// GiB per second, if a size is known.
    pub fn gib_per_sec(&self) -> Option<f64> {
        self.throughput.map(|t| t.gib_per_sec)
    }
}
