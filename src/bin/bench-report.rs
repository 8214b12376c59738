//! bench-report: turn `cargo bench` output into a throughput table.
//!
//! ```text
//! cargo bench | bench-report report          # Markdown table of full solutions
//! bench-report report bench.txt --format json
//! bench-report locate libcount.a             # Path of a single build artifact
//! bench-report throughput 1,048,576 812,000  # ns/iter -> MiB/s or GiB/s
//! ```

use anyhow::{Context, Result};
use bench_report::{
    generate, locate, parse_nanos, read_lines, Input, OutputFormat, Rate, ReportConfig,
    DEFAULT_BUFFER_MIB,
};
use clap::{Parser, Subcommand};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Debug, Parser)]
#[command(
    name = "bench-report",
    version,
    about = "Summarize `cargo bench` output as a throughput report",
    long_about = "
bench-report reads the console output of `cargo bench` (or of any harness that
prints the same `test <path> ... bench: <mean> ns/iter (+/- <stddev>)` lines),
joins every measurement with the size of the test data it ran over, and prints
the complete implementations as a Markdown table, fastest first.

Test data is looked up as `<test-case-with-hyphens>.bin` under the build
directory (target/release/build by default). Exactly one match is required.

Environment:
    BENCH_REPORT_BUILD_DIR      build-output directory
    BENCH_REPORT_EXTENSION      test data extension (default: bin)
    BENCH_REPORT_INCLUDE_PARTS  report micro-benchmarks too (1/true)
    BENCH_REPORT_FORMAT         markdown or json
    RUST_LOG                    log filter (overrides -v/-q)
"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,

    /// Verbose output
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Quiet mode (only errors)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the throughput report
    Report(ReportArgs),
    /// Print the path of a single build artifact
    Locate(LocateArgs),
    /// Convert ns/iter figures into a processing rate
    Throughput(ThroughputArgs),
}

#[derive(Debug, Parser)]
struct ReportArgs {
    /// Files holding benchmark output ("-" for stdin). Reads stdin when omitted.
    files: Vec<PathBuf>,

    /// Build-output directory holding the test data
    #[arg(long)]
    build_dir: Option<PathBuf>,

    /// Extension of test data files
    #[arg(long)]
    extension: Option<String>,

    /// Also report micro-benchmarks of sub-steps
    #[arg(long)]
    include_parts: bool,

    /// Output format: markdown or json
    #[arg(long)]
    format: Option<OutputFormat>,
}

#[derive(Debug, Parser)]
struct LocateArgs {
    /// File name to find, e.g. libcount.a
    name: String,

    /// Build-output directory to search
    #[arg(long)]
    build_dir: Option<PathBuf>,
}

#[derive(Debug, Parser)]
struct ThroughputArgs {
    /// Nanoseconds per iteration; `,` and `_` separators are allowed
    #[arg(required = true)]
    nanos: Vec<String>,

    /// Size of the processed buffer in MiB
    #[arg(long, default_value_t = DEFAULT_BUFFER_MIB)]
    size_mib: f64,
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(Verbosity::from_cli(&cli));

    match cli.cmd {
        Commands::Report(args) => run_report(args),
        Commands::Locate(args) => run_locate(args),
        Commands::Throughput(args) => run_throughput(args),
    }
}

// ============================================================================
// Verbosity Control
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Verbosity {
    fn from_cli(cli: &Cli) -> Self {
        if cli.quiet {
            Verbosity::Quiet
        } else if cli.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    fn default_directive(self) -> &'static str {
        match self {
            Verbosity::Quiet => "error",
            Verbosity::Normal => "warn",
            Verbosity::Verbose => "debug",
        }
    }
}

fn init_tracing(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.default_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

// ============================================================================
// Commands
// ============================================================================

fn run_report(args: ReportArgs) -> Result<()> {
    let mut config = ReportConfig::from_env();
    if let Some(dir) = args.build_dir {
        config = config.build_dir(dir);
    }
    if let Some(ext) = args.extension {
        config = config.artifact_extension(ext);
    }
    if args.include_parts {
        config = config.include_parts(true);
    }
    if let Some(format) = args.format {
        config = config.format(format);
    }
    tracing::debug!(?config, "report configuration");

    let inputs: Vec<Input> = if args.files.is_empty() {
        vec![Input::Stdin]
    } else {
        args.files.iter().map(Input::from_arg).collect()
    };

    let mut stdout = io::stdout().lock();
    let reported = generate(&config, read_lines(inputs), &mut stdout)
        .context("failed to build benchmark report")?;
    stdout.flush().context("failed to write report")?;

    tracing::info!(rows = reported, "report written");
    Ok(())
}

fn run_locate(args: LocateArgs) -> Result<()> {
    let build_dir = args
        .build_dir
        .unwrap_or_else(|| ReportConfig::from_env().build_dir);

    let path = locate(&build_dir, &args.name)
        .with_context(|| format!("failed to locate {}", args.name))?;
    println!("{}", path.display());
    Ok(())
}

fn run_throughput(args: ThroughputArgs) -> Result<()> {
    let rates = args
        .nanos
        .iter()
        .map(|figure| {
            let nanos = parse_nanos(figure)?;
            Rate::from_nanos_per_iter(nanos, args.size_mib)
        })
        .collect::<bench_report::Result<Vec<_>>>()
        .context("failed to convert ns/iter figures")?;

    let line: Vec<String> = rates.iter().map(Rate::to_string).collect();
    println!("{}", line.join("\t"));
    Ok(())
}
