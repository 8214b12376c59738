//! Parser for `cargo bench` console output.
//!
//! Only lines of the form
//!
//! ```text
//! test implementations::rust_iter::bench_random_sp ... bench:   1,234,567 ns/iter (+/- 12,345)
//! ```
//!
//! carry measurements. Every other line (compiler chatter, `running 12 tests`, the
//! summary) is skipped.

use crate::error::{ReportError, Result};
use crate::record::BenchRecord;

/// Substring that marks a line as a measurement.
pub const MARKER: &str = "... bench:";

/// `test <path> ... bench: <mean> ns/iter (+/- <stddev>)`
const FIELD_COUNT: usize = 8;

const BENCH_PREFIX: &str = "bench_";

/// Parse a single line of benchmark output.
///
/// Returns `Ok(None)` when the line carries no measurement. A line that has the marker
/// but not the expected shape is an error.
pub fn parse_line(line_no: usize, line: &str) -> Result<Option<BenchRecord>> {
    if !line.contains(MARKER) {
        return Ok(None);
    }

    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != FIELD_COUNT {
        return Err(ReportError::MalformedLine {
            line: line_no,
            expected: FIELD_COUNT,
            found: fields.len(),
            text: line.to_string(),
        });
    }
    let path = fields[1];
    let mean = fields[4];
    let stddev = fields[7];

    let mut components = path.rsplit("::");
    let (benchmark, implementation) = match (components.next(), components.next()) {
        (Some(benchmark), Some(implementation)) => (benchmark, implementation),
        _ => {
            return Err(ReportError::MalformedPath {
                line: line_no,
                path: path.to_string(),
            })
        }
    };
    let test_case = benchmark.strip_prefix(BENCH_PREFIX).unwrap_or(benchmark);

    // libtest closes the "(+/- N)" group on the stddev token itself
    let stddev = stddev.trim_end_matches(')');

    Ok(Some(BenchRecord {
        implementation: implementation.to_string(),
        test_case: test_case.to_string(),
        mean_ns: parse_measurement(line_no, "mean", mean)?,
        stddev_ns: parse_measurement(line_no, "stddev", stddev)?,
    }))
}

/// Parse an integer that may contain `,` thousands separators.
pub fn parse_measurement(line_no: usize, field: &'static str, token: &str) -> Result<u64> {
    token
        .replace(',', "")
        .parse::<u64>()
        .map_err(|source| ReportError::InvalidMeasurement {
            line: line_no,
            field,
            value: token.to_string(),
            source,
        })
}

/// Lazy iterator of records over a stream of lines.
///
/// Line numbers count every line seen, including skipped ones. The iterator is
/// single-pass: rerunning requires the input again.
pub struct Records<I> {
    lines: I,
    line_no: usize,
}

impl<I> Iterator for Records<I>
where
    I: Iterator<Item = Result<String>>,
{
    type Item = Result<BenchRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let line = match self.lines.next()? {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };
            self.line_no += 1;

            match parse_line(self.line_no, &line) {
                Ok(None) => continue,
                Ok(Some(record)) => return Some(Ok(record)),
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

/// Parse records from a stream of lines.
pub fn records<I>(lines: I) -> Records<I::IntoIter>
where
    I: IntoIterator<Item = Result<String>>,
{
    Records {
        lines: lines.into_iter(),
        line_no: 0,
    }
}

/// Lines of in-memory text, in the shape [`records`] and the pipeline consume.
pub fn lines_from_str(text: &str) -> impl Iterator<Item = Result<String>> + '_ {
    text.lines().map(|line| Ok(line.to_string()))
}

/// Parse records from in-memory text.
pub fn records_from_str(text: &str) -> Records<impl Iterator<Item = Result<String>> + '_> {
    records(lines_from_str(text))
}
