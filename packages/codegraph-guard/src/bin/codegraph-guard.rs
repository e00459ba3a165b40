//! Codegraph Guard CLI
//!
//! # Usage
//!
//! ```bash
//! # Check snippet files and JSON dumps
//! codegraph-guard check src/Orders.cs dumps/Billing.json
//!
//! # Custom families, JSON report, fail only on errors
//! codegraph-guard check --config guard.yaml --format json --fail-on error src/*.cs
//!
//! # List rules / print the default configuration
//! codegraph-guard rules
//! codegraph-guard default-config > guard.yaml
//! ```
//!
//! Exit codes: 0 clean, 1 diagnostics at or above `--fail-on`, 2 input or
//! configuration errors.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use codegraph_guard::config::GuardConfig;
use codegraph_guard::features::diagnostics::descriptors;
use codegraph_guard::pipeline::{load_units, BatchReport, BatchRunner};
use codegraph_guard::{GuardAnalyzer, Severity};

#[derive(Parser)]
#[command(name = "codegraph-guard")]
#[command(about = "Codegraph Guard - unguarded state-specific accessor detection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze snippet files (.cs) or unit dumps (.json)
    Check {
        /// Guard configuration (YAML, schema v1)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Lowest severity that makes the run fail
        #[arg(long, default_value = "warning", value_parser = parse_severity)]
        fail_on: Severity,

        /// Analyze units one at a time
        #[arg(long)]
        sequential: bool,

        /// Disable a rule (repeatable)
        #[arg(long = "disable", value_name = "CODE")]
        disabled: Vec<String>,

        /// Input files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// List diagnostic rules
    Rules,

    /// Print the default configuration as YAML
    DefaultConfig,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn parse_severity(value: &str) -> Result<Severity, String> {
    value.parse()
}

const EXIT_FINDINGS: u8 = 1;
const EXIT_INPUT: u8 = 2;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Check {
            config,
            format,
            fail_on,
            sequential,
            disabled,
            files,
        } => check(config, format, fail_on, sequential, disabled, files),
        Commands::Rules => {
            print_rules();
            ExitCode::SUCCESS
        }
        Commands::DefaultConfig => match GuardConfig::default().to_yaml() {
            Ok(yaml) => {
                print!("{}", yaml);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("error: {}", e);
                ExitCode::from(EXIT_INPUT)
            }
        },
    }
}

fn check(
    config_path: Option<PathBuf>,
    format: OutputFormat,
    fail_on: Severity,
    sequential: bool,
    disabled: Vec<String>,
    files: Vec<PathBuf>,
) -> ExitCode {
    let config = match config_path {
        Some(path) => GuardConfig::from_yaml(&path),
        None => Ok(GuardConfig::default()),
    };
    let mut config = match config {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_INPUT);
        }
    };
    if sequential {
        config = config.analysis(|a| a.parallel(false));
    }
    for code in disabled {
        config = config.disable_rule(code);
    }

    let (units, failures) = load_units(&files, &config);
    let analyzer = match GuardAnalyzer::new(config) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(EXIT_INPUT);
        }
    };
    let report = BatchRunner::new(&analyzer).run(&units).with_failures(failures);

    match format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("error: {}", e);
                return ExitCode::from(EXIT_INPUT);
            }
        },
    }

    if report.has_failures() {
        ExitCode::from(EXIT_INPUT)
    } else if report.max_severity().is_some_and(|s| s >= fail_on) {
        ExitCode::from(EXIT_FINDINGS)
    } else {
        ExitCode::SUCCESS
    }
}

fn print_text(report: &BatchReport) {
    for diagnostic in report.diagnostics() {
        println!("{}", diagnostic);
    }
    for failure in &report.failures {
        eprintln!("error: {}: {}", failure.file_path, failure.error);
    }
    println!(
        "{} diagnostic(s) in {} file(s), {} skipped ({} ms)",
        report.diagnostic_count(),
        report.results.len(),
        report.failures.len(),
        report.elapsed_ms
    );
}

fn print_rules() {
    for descriptor in descriptors() {
        println!(
            "{}  {:<7}  {}",
            descriptor.code,
            descriptor.severity.as_str(),
            descriptor.title
        );
        println!("         {}", descriptor.help);
    }
}
