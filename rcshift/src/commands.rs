//! Migration run harness: stream mode and in-place mode.
//!
//! Stream mode concatenates the rewritten lines of every input (files in
//! argument order, or standard input) into the injected writer. In-place
//! mode rewrites each file on disk, buffering the result so a file is only
//! overwritten after the whole file rewrote cleanly.

use std::fs;
use std::io::{self, BufReader, Write};
use std::path::{Path, PathBuf};

use anyhow::Result;
use colored::Colorize;

use crate::rewriter::{self, RewriteStats};

/// Pseudo-path naming standard input in stream mode.
pub const STDIN_PATH: &str = "-";

/// Options for one migration run.
#[derive(Debug, Default, Clone)]
pub struct MigrateOptions {
    /// Rewrite each file in place instead of writing to the output stream.
    pub in_place: bool,
    /// Print per-input diagnostics to standard error.
    pub verbose: bool,
}

/// Whether `path` names standard input.
#[must_use]
pub fn is_stdin_path(path: &Path) -> bool {
    path == Path::new(STDIN_PATH)
}

/// Runs the migration over `paths` in argument order.
///
/// Inputs are processed sequentially, so output order matches input order
/// and, in in-place mode, an error leaves the failing file untouched while
/// files already rewritten stay rewritten.
///
/// # Errors
///
/// Returns an error when an input cannot be read, an output cannot be
/// written, or a recognized deprecated entry is malformed. The error names
/// the file involved.
pub fn run_migrate<W: Write>(
    paths: &[PathBuf],
    options: &MigrateOptions,
    writer: &mut W,
) -> Result<RewriteStats> {
    let mut totals = RewriteStats::default();

    if options.in_place {
        for path in paths {
            totals.merge(migrate_in_place(path, options, writer)?);
        }
        return Ok(totals);
    }

    if paths.is_empty() {
        totals.merge(migrate_stdin(options, writer)?);
        return Ok(totals);
    }

    for path in paths {
        if is_stdin_path(path) {
            totals.merge(migrate_stdin(options, writer)?);
        } else {
            totals.merge(migrate_file_to_stream(path, options, writer)?);
        }
    }

    Ok(totals)
}

fn migrate_stdin<W: Write>(options: &MigrateOptions, writer: &mut W) -> Result<RewriteStats> {
    let stdin = io::stdin();
    let stats = rewriter::rewrite_stream(stdin.lock(), writer)?;
    if options.verbose {
        eprintln!(
            "[VERBOSE] stdin: {} lines read, {} dropped",
            stats.lines_read, stats.dropped
        );
    }
    Ok(stats)
}

fn migrate_file_to_stream<W: Write>(
    path: &Path,
    options: &MigrateOptions,
    writer: &mut W,
) -> Result<RewriteStats> {
    let file = fs::File::open(path)
        .map_err(|e| anyhow::anyhow!("Failed to open {}: {}", path.display(), e))?;
    let stats = rewriter::rewrite_stream(BufReader::new(file), writer)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
    if options.verbose {
        eprintln!(
            "[VERBOSE] {}: {} lines read, {} dropped",
            path.display(),
            stats.lines_read,
            stats.dropped
        );
    }
    Ok(stats)
}

fn migrate_in_place<W: Write>(
    path: &Path,
    options: &MigrateOptions,
    writer: &mut W,
) -> Result<RewriteStats> {
    let content = fs::read_to_string(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;

    let mut rewritten = Vec::new();
    let stats = rewriter::rewrite_stream(content.as_bytes(), &mut rewritten)
        .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;

    fs::write(path, &rewritten)
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;

    writeln!(
        writer,
        "{} {} ({} migrated, {} marked for deletion)",
        "Migrated:".green(),
        path.display(),
        stats.migrated,
        stats.marked_for_deletion
    )?;
    if options.verbose {
        eprintln!(
            "[VERBOSE] {}: {} lines read, {} dropped",
            path.display(),
            stats.lines_read,
            stats.dropped
        );
    }
    Ok(stats)
}
