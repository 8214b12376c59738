//! The report pipeline: parse lines, join with test data sizes, derive metrics, render.

use crate::artifact::ArtifactIndex;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::parse::records;
use crate::record::{BenchRecord, ReportRow};
use crate::report::select_rows;
use std::io::Write;

/// Join records with the size of their test case and derive throughput.
///
/// Runs in passes over the whole input: every record is parsed, then every record is
/// classified, and only then are test case sizes looked up. A malformed line or an
/// unknown implementation is reported ahead of any missing artifact.
pub fn join<I>(records: I, index: &mut ArtifactIndex) -> Result<Vec<ReportRow>>
where
    I: IntoIterator<Item = Result<BenchRecord>>,
{
    let records = records.into_iter().collect::<Result<Vec<_>>>()?;
    let rows = records
        .into_iter()
        .map(ReportRow::classify)
        .collect::<Result<Vec<_>>>()?;

    rows.into_iter()
        .map(|row| {
            let size = index.size_of(&row.record.test_case)?;
            row.with_test_case_size(size)
        })
        .collect()
}

/// Run the whole pipeline over `lines` and write the report to `out`.
///
/// Returns the number of rows reported.
pub fn generate<I>(config: &ReportConfig, lines: I, out: &mut dyn Write) -> Result<usize>
where
    I: IntoIterator<Item = Result<String>>,
{
    let mut index = ArtifactIndex::new(&config.build_dir, &config.artifact_extension);
    let rows = join(records(lines), &mut index)?;
    let selected = select_rows(&rows, config.include_parts);
    tracing::debug!(
        parsed = rows.len(),
        reported = selected.len(),
        "joined benchmark rows"
    );

    config
        .format
        .reporter()
        .write_report(&selected, out)
        .map_err(|e| ReportError::io("<stdout>", e))?;
    Ok(selected.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::parse::{lines_from_str, records_from_str};
    use std::fs;
    use std::path::Path;

    const CARGO_BENCH: &str = "\
running 4 tests
test implementations::c_ffi::bench_random_sp               ... bench:   1,048,576 ns/iter (+/- 2,000)
test implementations::rust_iter::bench_random_sp           ... bench:   4,194,304 ns/iter (+/- 31,337)
test implementations::vec_eq_only_prefix::bench_random_sp  ... bench:         120 ns/iter (+/- 3)
test implementations::nonzero::bench_random_printable      ... bench:     800,000 ns/iter (+/- 1,000)

test result: ok. 0 passed; 0 failed; 0 ignored; 4 measured; 0 filtered out
";

    fn build_dir_with(files: &[(&str, usize)]) -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("fast-sp-063b01e3731a8eac").join("out");
        fs::create_dir_all(&out).unwrap();
        for (name, len) in files {
            fs::write(out.join(name), vec![b'p'; *len]).unwrap();
        }
        tmp
    }

    fn config(build_dir: &Path) -> ReportConfig {
        ReportConfig::new().build_dir(build_dir)
    }

    #[test]
    fn should_join_sizes_and_derive_throughput() {
        let tmp = build_dir_with(&[("random-sp.bin", 1 << 20), ("random-printable.bin", 1 << 10)]);
        let mut index = ArtifactIndex::new(tmp.path(), "bin");
        let rows = join(records_from_str(CARGO_BENCH), &mut index).unwrap();

        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].bytes_per_iteration, Some(1 << 20));
        // 1 MiB per 1,048,576 ns = 1 byte per ns = 1e9 B/s
        assert_eq!(rows[0].bytes_per_sec(), Some(1e9));
        assert_eq!(rows[2].bytes_per_iteration, None);
        assert_eq!(rows[3].bytes_per_iteration, Some(1 << 10));
    }

    #[test]
    fn should_report_only_full_rows_sorted_by_mean() {
        let tmp = build_dir_with(&[("random-sp.bin", 1 << 20), ("random-printable.bin", 1 << 10)]);
        let mut out = Vec::new();
        let reported = generate(&config(tmp.path()), lines_from_str(CARGO_BENCH), &mut out).unwrap();
        let table = String::from_utf8(out).unwrap();

        assert_eq!(reported, 2);
        let body: Vec<&str> = table.lines().skip(2).collect();
        assert!(body[0].contains("| ffi "));
        assert!(body[1].contains("| iter "));
        assert!(!table.contains("nonzero"));
        assert!(!table.contains("vec\\_eq"));
    }

    #[test]
    fn should_fail_when_artifact_missing() {
        let tmp = build_dir_with(&[("random-sp.bin", 16)]);
        let mut out = Vec::new();
        let err = generate(&config(tmp.path()), lines_from_str(CARGO_BENCH), &mut out).unwrap_err();
        assert!(
            matches!(err, ReportError::MissingArtifact { ref name, .. } if name == "random-printable.bin")
        );
        assert!(out.is_empty());
    }

    #[test]
    fn should_fail_when_implementation_unknown() {
        let tmp = build_dir_with(&[("random-sp.bin", 16)]);
        let input = "test benches::go_loop::bench_random_sp ... bench: 10 ns/iter (+/- 1)";
        let mut out = Vec::new();
        let err = generate(&config(tmp.path()), lines_from_str(input), &mut out).unwrap_err();
        assert!(err.to_string().contains("go_loop"));
    }

    #[test]
    fn should_fail_on_malformed_line_after_good_ones() {
        let tmp = build_dir_with(&[("random-sp.bin", 16)]);
        let input = "\
test a::rust_iter::bench_random_sp ... bench: 10 ns/iter (+/- 1)
test a::rust_iter::bench_random_sp ... bench: 10 ns/iter
";
        let mut out = Vec::new();
        let err = generate(&config(tmp.path()), lines_from_str(input), &mut out).unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line: 2, .. }));
    }

    #[test]
    fn should_emit_json_when_configured() {
        let tmp = build_dir_with(&[("random-sp.bin", 1 << 20), ("random-printable.bin", 1 << 10)]);
        let cfg = config(tmp.path()).format(OutputFormat::Json).include_parts(true);
        let mut out = Vec::new();
        generate(&cfg, lines_from_str(CARGO_BENCH), &mut out).unwrap();

        let rows: Vec<ReportRow> = serde_json::from_slice(&out).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].record.implementation, "vec_eq_only_prefix");
        assert_eq!(rows[0].throughput, None);
    }

    #[test]
    fn should_report_unknown_implementation_before_missing_artifact() {
        let tmp = build_dir_with(&[]);
        let input = "test a::go_loop::bench_random_sp ... bench: 10 ns/iter (+/- 1)";
        let mut out = Vec::new();
        let err = generate(&config(tmp.path()), lines_from_str(input), &mut out).unwrap_err();
        assert!(matches!(err, ReportError::UnknownImplementation(ref n) if n == "go_loop"));
    }

    #[test]
    fn should_report_malformed_line_before_missing_artifact() {
        let tmp = build_dir_with(&[]);
        let input = "\
test a::rust_iter::bench_random_sp ... bench: 10 ns/iter (+/- 1)
test a::rust_iter::bench_random_sp ... bench: 10 ns/iter
";
        let mut out = Vec::new();
        let err = generate(&config(tmp.path()), lines_from_str(input), &mut out).unwrap_err();
        assert!(matches!(err, ReportError::MalformedLine { line: 2, .. }));
    }
}
