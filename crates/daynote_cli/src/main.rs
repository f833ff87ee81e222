//! `daynote` command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and enforce directory preconditions.
//! - Initialize logging, run the conversion and map failures to exit codes.
//!
//! # Invariants
//! - Usage errors (missing, nonexistent or read-only directories) exit with code 2.
//! - Fatal conversion or logging errors exit with code 1.
//! - The destination directory is never created here.

use clap::Parser;
use daynote_core::{convert, core_version, default_log_level, init_logging};
use log::{error, info};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const STDERR_LOG_LEVEL: &str = "warn";

/// Convert a directory of exported note JSON files into daily journal Markdown.
///
/// Each note is appended to `<DEST>/<Month> <Day><suffix>, <Year>.md`, named
/// after the note's last edit date in UTC.
#[derive(Parser, Debug)]
#[command(name = "daynote", version = core_version())]
struct Args {
    /// Directory containing the exported `*.json` notes
    #[arg(value_parser = existing_dir)]
    src: PathBuf,

    /// Existing, writable directory that receives the daily `*.md` files
    #[arg(value_parser = writable_dir)]
    dest: PathBuf,

    /// Log level: trace, debug, info, warn or error
    #[arg(long, env = "DAYNOTE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Absolute directory for rolling log files (default: log to stderr)
    #[arg(long, env = "DAYNOTE_LOG_DIR")]
    log_dir: Option<PathBuf>,
}

impl Args {
    fn effective_log_level(&self) -> &str {
        match (&self.log_level, &self.log_dir) {
            (Some(level), _) => level.as_str(),
            (None, Some(_)) => default_log_level(),
            (None, None) => STDERR_LOG_LEVEL,
        }
    }
}

fn existing_dir(value: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(value);
    if !path.exists() {
        return Err(format!("directory `{value}` does not exist"));
    }
    if !path.is_dir() {
        return Err(format!("`{value}` is a file, not a directory"));
    }
    Ok(path)
}

fn writable_dir(value: &str) -> Result<PathBuf, String> {
    let path = existing_dir(value)?;
    let metadata = fs::metadata(&path)
        .map_err(|err| format!("cannot inspect directory `{value}`: {err}"))?;
    if metadata.permissions().readonly() {
        return Err(format!("directory `{value}` is not writable"));
    }
    Ok(path)
}

fn main() -> ExitCode {
    let args = Args::parse();

    if let Err(err) = init_logging(args.effective_log_level(), args.log_dir.as_deref()) {
        eprintln!("Error: failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }
    info!(
        "event=cli_start module=cli status=ok core_version={}",
        core_version()
    );

    match convert(&args.src, &args.dest) {
        Ok(report) => {
            println!(
                "Wrote {} notes into {} daily files, skipped {} empty, {} failed",
                report.written,
                report.daily_files.len(),
                report.skipped_empty,
                report.failures.len()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=convert_finish module=cli status=error error={}", err);
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}
