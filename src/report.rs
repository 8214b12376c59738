//! Pluggable reporters for the joined benchmark table.

use crate::record::{Category, ReportRow};
use std::io::{self, Write};

/// Trait for report renderers.
pub trait Reporter {
    /// Write `rows` in the order given.
    fn write_report(&self, rows: &[&ReportRow], out: &mut dyn Write) -> io::Result<()>;
}

/// Keep the rows worth reporting, fastest first.
///
/// Part rows are dropped unless `include_parts` is set. The sort is stable, so rows
/// with equal means keep their input order.
pub fn select_rows(rows: &[ReportRow], include_parts: bool) -> Vec<&ReportRow> {
    let mut selected: Vec<&ReportRow> = rows
        .iter()
        .filter(|row| include_parts || row.category == Category::Full)
        .collect();
    selected.sort_by_key(|row| row.record.mean_ns);
    selected
}

/// Format an integer with `,` between groups of three digits.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Escape characters that Markdown would otherwise interpret.
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '_' | '*' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const COLUMNS: [(&str, Align); 5] = [
    ("Language", Align::Left),
    ("Implementation", Align::Left),
    ("Test case", Align::Left),
    ("Throughput (GiB/s)", Align::Right),
    ("Time per iteration", Align::Right),
];

/// Extra width every column gets beyond its header.
const HEADER_PADDING: usize = 2;

/// Pipe-style Markdown table, as rendered on GitHub.
#[derive(Debug, Default)]
pub struct MarkdownReporter;

impl MarkdownReporter {
    pub fn new() -> Self {
        Self
    }

    /// `<mean> ns/iter ± <stddev>`, with both numbers right-aligned across all rows.
    fn format_times(rows: &[&ReportRow]) -> Vec<String> {
        let means: Vec<String> = rows.iter().map(|r| group_thousands(r.record.mean_ns)).collect();
        let stddevs: Vec<String> = rows
            .iter()
            .map(|r| group_thousands(r.record.stddev_ns))
            .collect();

        let mean_width = means.iter().map(String::len).max().unwrap_or(0);
        let stddev_width = stddevs.iter().map(String::len).max().unwrap_or(0);

        means
            .iter()
            .zip(&stddevs)
            .map(|(mean, stddev)| {
                format!("{mean:>mean_width$} ns/iter ± {stddev:>stddev_width$}")
            })
            .collect()
    }

    fn format_cells(rows: &[&ReportRow]) -> Vec<[String; 5]> {
        rows.iter()
            .zip(Self::format_times(rows))
            .map(|(row, time)| {
                [
                    row.language.to_string(),
                    escape_markdown(&row.name),
                    escape_markdown(&row.record.test_case),
                    row.gib_per_sec()
                        .map(|gib| format!("{gib:.3}"))
                        .unwrap_or_default(),
                    time,
                ]
            })
            .collect()
    }

    fn render(rows: &[&ReportRow]) -> String {
        let cells = Self::format_cells(rows);

        let widths: Vec<usize> = COLUMNS
            .iter()
            .enumerate()
            .map(|(i, (header, _))| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .fold(header.chars().count() + HEADER_PADDING, usize::max)
            })
            .collect();

        let mut table = String::new();
        let headers: Vec<String> = COLUMNS.iter().map(|(h, _)| h.to_string()).collect();
        push_row(&mut table, &headers, &widths);

        table.push('|');
        for ((_, align), width) in COLUMNS.iter().zip(&widths) {
            let dashes = "-".repeat(width + 1);
            match align {
                Align::Left => table.push_str(&format!(":{dashes}|")),
                Align::Right => table.push_str(&format!("{dashes}:|")),
            }
        }
        table.push('\n');

        for row in &cells {
            push_row(&mut table, row, &widths);
        }
        table
    }
}

fn push_row(table: &mut String, cells: &[String], widths: &[usize]) {
    table.push('|');
    for ((cell, width), (_, align)) in cells.iter().zip(widths).zip(COLUMNS.iter()) {
        let pad = " ".repeat(width - cell.chars().count());
        match align {
            Align::Left => table.push_str(&format!(" {cell}{pad} |")),
            Align::Right => table.push_str(&format!(" {pad}{cell} |")),
        }
    }
    table.push('\n');
}

impl Reporter for MarkdownReporter {
    fn write_report(&self, rows: &[&ReportRow], out: &mut dyn Write) -> io::Result<()> {
        out.write_all(Self::render(rows).as_bytes())
    }
}

/// JSON array of rows, for feeding other tools.
#[derive(Debug, Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Reporter for JsonReporter {
    fn write_report(&self, rows: &[&ReportRow], out: &mut dyn Write) -> io::Result<()> {
        let json = serde_json::to_string_pretty(rows).map_err(io::Error::other)?;
        writeln!(out, "{json}")
    }
}
