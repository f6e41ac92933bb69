//! Core library for the `rcshift` configuration migration filter.
//!
//! `rcshift` performs a one-shot migration of an application's deprecated
//! clipboard settings: the boolean keys `copyImageToClipboard` and
//! `copySaveLocation` are rewritten in terms of the single enumerated key
//! `clipboardGroup`, each followed by a `# DELETE` marker telling the
//! downstream config updater to drop the old key. Every other line is
//! omitted from the output stream.

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling the migration run (stream and in-place modes).
pub mod commands;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Module implementing the line rewriter.
pub mod rewriter;

/// Module defining the migration rule table.
pub mod rules;
