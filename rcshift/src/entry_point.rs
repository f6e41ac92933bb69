//! Shared entry point for the command line interface.
//!
//! The binary and the integration tests both come through
//! [`run_with_args_to`], which accepts an injected writer so the output
//! stream can be captured.

use std::io::Write;

use anyhow::Result;
use clap::Parser;

use crate::cli::Cli;
use crate::commands::{self, MigrateOptions};

/// Runs the migration filter with the given arguments.
///
/// # Errors
///
/// Returns an error when a recognized deprecated entry is malformed or an
/// input/output stream fails; the run terminates abnormally in that case.
/// Invocation problems (unknown flags, missing files) are reported on
/// standard error and mapped to exit code 1 instead.
pub fn run_with_args(args: Vec<String>) -> Result<i32> {
    run_with_args_to(args, &mut std::io::stdout())
}

/// Runs the migration filter, writing the output stream to `writer`.
///
/// This is the testable version of [`run_with_args`] that allows output
/// capture.
///
/// # Errors
///
/// Same as [`run_with_args`].
pub fn run_with_args_to<W: Write>(args: Vec<String>, writer: &mut W) -> Result<i32> {
    let mut program_args = vec!["rcshift".to_owned()];
    program_args.extend(args);
    let cli = match Cli::try_parse_from(program_args) {
        Ok(c) => c,
        Err(e) => match e.kind() {
            clap::error::ErrorKind::DisplayHelp | clap::error::ErrorKind::DisplayVersion => {
                // Let clap print help/version as intended, but captured by the writer
                write!(writer, "{e}")?;
                writer.flush()?;
                return Ok(0);
            }
            _ => {
                eprint!("{e}");
                return Ok(1);
            }
        },
    };

    for path in &cli.paths {
        if commands::is_stdin_path(path) {
            if cli.in_place {
                eprintln!("Error: cannot rewrite standard input in place.");
                return Ok(1);
            }
            continue;
        }
        if !path.exists() {
            eprintln!("Error: The file '{}' does not exist.", path.display());
            return Ok(1);
        }
    }

    if cli.verbose {
        eprintln!("[VERBOSE] rcshift v{}", env!("CARGO_PKG_VERSION"));
        eprintln!(
            "[VERBOSE] Mode: {}",
            if cli.in_place { "in-place" } else { "stream" }
        );
        if cli.paths.is_empty() {
            eprintln!("[VERBOSE] Input: stdin");
        } else {
            eprintln!("[VERBOSE] Inputs: {:?}", cli.paths);
        }
    }

    let options = MigrateOptions {
        in_place: cli.in_place,
        verbose: cli.verbose,
    };
    let stats = commands::run_migrate(&cli.paths, &options, writer)?;

    if cli.verbose {
        eprintln!(
            "[VERBOSE] Totals: {} lines read, {} migrated, {} marked for deletion, {} dropped",
            stats.lines_read, stats.migrated, stats.marked_for_deletion, stats.dropped
        );
    }

    Ok(0)
}
