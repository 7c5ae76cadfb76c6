//! flowcheck CLI - validates one workflow JSON file
//!
//! Exit code is 1 only when the file is missing, unreadable or not valid JSON.
//! Content findings are reported but never fail the command.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use colored::Colorize;

use flowcheck::render;
use flowcheck::{OutputFormat, Outcome, Validator, ValidatorConfig};

#[derive(Parser)]
#[command(name = "flowcheck")]
#[command(about = "Validate Power Automate workflow JSON (blocks and full definitions)")]
#[command(version)]
struct Cli {
    /// Path to the .json file to validate
    file: Option<PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Expression issues listed before the rest are summarized
    #[arg(long, default_value_t = 5)]
    max_display: usize,

    /// Additional file name to skip (repeatable)
    #[arg(long = "skip", value_name = "NAME")]
    skip: Vec<String>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    // Logs go to stderr; stdout is the report
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    let Some(file) = cli.file.as_deref() else {
        eprintln!("{}", "Error: No file path provided".red());
        std::process::exit(1);
    };

    let config = cli
        .skip
        .iter()
        .fold(ValidatorConfig::default(), |config, name| config.with_skip(name))
        .with_display_limit(cli.max_display)
        .with_format(cli.format);

    match run(file, config) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            std::process::exit(1);
        }
    }
}

/// Run the validator and print the report; returns the exit code
fn run(file: &Path, config: ValidatorConfig) -> anyhow::Result<i32> {
    let format = config.format;
    let validator = Validator::new(config);
    let file_path = file.to_string_lossy().to_string();

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let outcome = validator.validate_file(file);

    let code = match (format, outcome) {
        (_, Ok(Outcome::Skipped)) => 0,

        (OutputFormat::Text, Ok(Outcome::Checked(report))) => {
            render::write_header(&mut out, &file_path)?;
            render::write_text(&mut out, &report, validator.config())?;
            0
        }
        (OutputFormat::Text, Err(err)) => {
            render::write_header(&mut out, &file_path)?;
            render::write_failure(&mut out, &err)?;
            1
        }

        (OutputFormat::Json, Ok(Outcome::Checked(report))) => {
            write_json(&mut out, &report.to_json())?;
            0
        }
        (OutputFormat::Json, Err(err)) => {
            write_json(&mut out, &render::failure_json(&file_path, &err))?;
            1
        }
    };

    out.flush()?;
    Ok(code)
}

fn write_json(out: &mut impl Write, value: &serde_json::Value) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize report")?;
    writeln!(out, "{}", text).context("Failed to write report")?;
    Ok(())
}

