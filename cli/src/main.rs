use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use openapi_compat_core::{check, CompareOptions, ContractDocument, Report};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "openapi-compat")]
#[command(about = "Fail when a candidate API contract breaks clients of the baseline contract")]
#[command(version)]
struct Cli {
    /// Baseline contract document (JSON)
    baseline: PathBuf,

    /// Candidate contract document (JSON)
    candidate: PathBuf,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Max schema nesting depth the comparator descends into
    #[arg(long, default_value_t = CompareOptions::default().max_depth)]
    max_depth: usize,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the verdict
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    let baseline = load_contract(&cli.baseline, "baseline")?;
    let candidate = load_contract(&cli.candidate, "candidate")?;

    let options = CompareOptions {
        max_depth: cli.max_depth,
    };
    let report = check(&baseline, &candidate, &options);
    tracing::debug!(
        violations = report.violations.len(),
        baseline = %cli.baseline.display(),
        candidate = %cli.candidate.display(),
        "comparison complete"
    );

    write_report(&report, cli.format)?;

    Ok(ExitCode::from(report.verdict().exit_code()))
}

fn load_contract(path: &Path, role: &str) -> Result<ContractDocument> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {role} contract: {}", path.display()))?;
    let reader = BufReader::new(file);
    let root: serde_json::Value = serde_json::from_reader(reader)
        .with_context(|| format!("Failed to parse {role} contract from: {}", path.display()))?;
    ContractDocument::from_value(root)
        .with_context(|| format!("Invalid {role} contract: {}", path.display()))
}

fn write_report(report: &Report, format: OutputFormat) -> Result<()> {
    let mut writer = BufWriter::new(io::stdout());

    match format {
        OutputFormat::Text => {
            report
                .write_text(&mut writer)
                .context("Failed to write report")?;
        }
        OutputFormat::Json => write_json(report, &mut writer)?,
    }

    writer.flush().context("Failed to flush report")?;
    Ok(())
}

fn write_json<T: serde::Serialize, W: Write>(val: &T, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, val).context("Failed to write JSON")?;
    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    Ok(())
}
