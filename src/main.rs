//! check_backup - monitoring probe for backup directories.
//!
//! Usage:
//!   check_backup -d /srv/backups -c 86400 -s 1048576
//!   check_backup -d /srv/db,/srv/web -p nightly -c 86400 -s 1048576 -n 20
//!   check_backup -d /srv/backups -c 86400 -s 1048576 --format json
//!
//! Prints a one-line `SEVERITY: [dir] reason, ...` summary followed by a
//! human-readable section per directory, and exits with the monitoring
//! status code (0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN).

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use backupcheck_analyze::{default_probe, AnalysisEngine};
use backupcheck_core::{
    CheckConfig, ConfigError, Severity, DEFAULT_CRITICAL_DISK_PERCENT, DEFAULT_NAME_PATTERN,
    DEFAULT_SAMPLE_WINDOW, DEFAULT_WARNING_DISK_PERCENT,
};

#[derive(Parser)]
#[command(
    name = "check_backup",
    version,
    about = "Check backup freshness, size and remaining disk space",
    long_about = "check_backup inspects one or more backup directories and reports whether \
                  the newest backup is recent and large enough and whether the filesystem \
                  has room left.\n\n\
                  Exit status follows the monitoring plugin convention: \
                  0 OK, 1 WARNING, 2 CRITICAL, 3 UNKNOWN."
)]
struct Cli {
    /// Backup directories (comma-separated)
    #[arg(short = 'd', long = "dirs", value_delimiter = ',', required = true)]
    dirs: Vec<String>,

    /// Glob pattern for backup file names; plain text matches as a substring
    #[arg(short = 'p', long, default_value = DEFAULT_NAME_PATTERN)]
    pattern: String,

    /// CRITICAL if the newest backup is at least this many seconds old
    #[arg(short = 'c', long = "max-age", value_name = "SECONDS")]
    max_age: u64,

    /// CRITICAL if the newest backup is this many bytes or smaller
    #[arg(short = 's', long = "min-size", value_name = "BYTES")]
    min_size: u64,

    /// How many recent backups to average size and frequency over
    #[arg(short = 'n', long = "sample", default_value_t = DEFAULT_SAMPLE_WINDOW)]
    sample: usize,

    /// WARNING when disk usage reaches this percentage
    #[arg(long = "warn-pct", default_value_t = DEFAULT_WARNING_DISK_PERCENT)]
    warn_pct: f64,

    /// CRITICAL when disk usage reaches this percentage
    #[arg(long = "crit-pct", default_value_t = DEFAULT_CRITICAL_DISK_PERCENT)]
    crit_pct: f64,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Print only the summary line
    #[arg(short, long)]
    brief: bool,
}

impl Cli {
    /// Turn parsed flags into a validated check configuration.
    fn to_config(&self) -> Result<CheckConfig, ConfigError> {
        let directories: Vec<PathBuf> = self
            .dirs
            .iter()
            .map(|d| d.trim())
            .filter(|d| !d.is_empty())
            .map(PathBuf::from)
            .collect();

        CheckConfig::builder()
            .directories(directories)
            .name_pattern(self.pattern.as_str())
            .max_age(self.max_age)
            .min_size(self.min_size)
            .sample_window(self.sample)
            .warning_disk_percent(self.warn_pct)
            .critical_disk_percent(self.crit_pct)
            .build()
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                    let _ = err.print();
                    ExitCode::SUCCESS
                }
                _ => {
                    println!("{}", parse_error_line(&err));
                    ExitCode::from(Severity::Unknown.exit_code())
                }
            };
        }
    };

    match run(&cli) {
        Ok(severity) => ExitCode::from(severity.exit_code()),
        Err(err) => {
            let message: Vec<String> = err.chain().map(|cause| cause.to_string()).collect();
            println!("{}: {}", Severity::Unknown, message.join(": "));
            ExitCode::from(Severity::Unknown.exit_code())
        }
    }
}

/// Collapse a clap error into a single `UNKNOWN: ...` status line.
fn parse_error_line(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let message = rendered
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .trim();
    format!("{}: {message}", Severity::Unknown)
}

/// Run the check and print the report. Returns the overall severity.
fn run(cli: &Cli) -> Result<Severity> {
    color_eyre::install()?;
    init_tracing();

    let config = cli.to_config().context("Invalid configuration")?;
    debug!(?config, "configuration loaded");

    let engine =
        AnalysisEngine::with_probe(config, default_probe()).context("Invalid configuration")?;
    let report = engine.analyze_all();

    match cli.format {
        OutputFormat::Text => {
            println!("{}", report.verdict.summary_line());
            if !cli.brief {
                print!("{}", report::render_details(&report.results));
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(report.severity())
}

/// Log to stderr so stdout stays a clean monitoring payload.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
