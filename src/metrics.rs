//! Throughput derived from latency and buffer size.

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Nanoseconds in one second.
pub const NANOS_PER_SEC: f64 = 1_000_000_000.0;
/// Bytes in one GiB (1024³).
pub const BYTES_PER_GIB: f64 = 1_073_741_824.0;

/// Size in MiB of the generated test buffers.
pub const DEFAULT_BUFFER_MIB: f64 = 12.0;

/// Rates at or above this many MiB/s are shown in GiB/s.
const GIB_DISPLAY_THRESHOLD: f64 = 1500.0;

/// Bytes processed per second, with the same figure in GiB/s.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Throughput {
    pub bytes_per_sec: f64,
    pub gib_per_sec: f64,
}

impl Throughput {
    /// Throughput of processing `bytes` once every `mean_ns` nanoseconds.
    ///
    /// Returns `None` for a zero mean instead of an infinite rate.
    pub fn from_latency(bytes: u64, mean_ns: u64) -> Option<Self> {
        if mean_ns == 0 {
            return None;
        }
        // Same as (1 / mean) * bytes * 1e9, exact for power-of-two sizes
        let bytes_per_sec = bytes as f64 * NANOS_PER_SEC / mean_ns as f64;
        Some(Self {
            bytes_per_sec,
            gib_per_sec: bytes_per_sec / BYTES_PER_GIB,
        })
    }
}

/// A processing rate for a fixed-size buffer, in the unit that reads best.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rate {
    MibPerSec(f64),
    GibPerSec(f64),
}

impl Rate {
    /// Rate of processing `buffer_mib` MiB once every `nanos_per_iter` nanoseconds.
    pub fn from_nanos_per_iter(nanos_per_iter: f64, buffer_mib: f64) -> Result<Self> {
        if !(nanos_per_iter.is_finite() && nanos_per_iter > 0.0) {
            return Err(ReportError::InvalidRate(nanos_per_iter.to_string()));
        }
        let mib_per_sec = NANOS_PER_SEC * buffer_mib / nanos_per_iter;
        if mib_per_sec < GIB_DISPLAY_THRESHOLD {
            Ok(Rate::MibPerSec(mib_per_sec))
        } else {
            Ok(Rate::GibPerSec(mib_per_sec / 1024.0))
        }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rate::MibPerSec(v) => write!(f, "{:.2} MiB/s", v),
            Rate::GibPerSec(v) => write!(f, "{:.2} GiB/s", v),
        }
    }
}

/// Parse an `ns/iter` figure as typed by a human: `1,234,567`, `1_234_567` or `812.5`.
pub fn parse_nanos(figure: &str) -> Result<f64> {
    let cleaned: String = figure
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() && n > 0.0 => Ok(n),
        _ => Err(ReportError::InvalidRate(figure.to_string())),
    }
}
