//! Line rewriter for the clipboard settings migration.
//!
//! Consumes configuration lines of the `key=value` form and emits the
//! migrated stream: a deprecated boolean entry becomes a `clipboardGroup`
//! assignment (when the old value was `true`) followed by a `# DELETE`
//! marker, and every other line is dropped. Output order follows input
//! order; one input line expands to zero, one, or two output lines.
//!
//! # Usage
//!
//! ```
//! use rcshift::rewriter::rewrite_line;
//!
//! let lines = rewrite_line("copyImageToClipboard=true", 1)
//!     .expect("well-formed entry")
//!     .into_vec();
//! assert_eq!(
//!     lines,
//!     ["clipboardGroup=PostScreenshotCopyImage", "# DELETE copyImageToClipboard"]
//! );
//! ```

use std::io::{BufRead, Write};

use smallvec::SmallVec;

use crate::rules::{self, MigrationRule};

/// Output lines produced for one input line (zero, one, or two).
pub type RewrittenLines = SmallVec<[String; 2]>;

/// Error during rewriting.
///
/// A deprecated entry without its `=` separator is unrecoverable for the
/// whole run: there is no per-line skip, matching the migration contract
/// that a malformed recognized entry aborts the update. Unrelated malformed
/// lines are not errors; they are silently dropped.
#[derive(Debug, thiserror::Error)]
pub enum RewriteError {
    /// A recognized deprecated entry is missing its `=` separator.
    #[error("malformed `{key}` entry on line {line}: missing `=` separator")]
    MissingSeparator {
        /// Deprecated key whose entry is malformed.
        key: &'static str,
        /// 1-based line number within the current input.
        line: usize,
    },
    /// Reading the input or writing the output stream failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Counters accumulated over one rewriting pass.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RewriteStats {
    /// Input lines consumed.
    pub lines_read: usize,
    /// Replacement `clipboardGroup=...` assignments emitted.
    pub migrated: usize,
    /// `# DELETE ...` markers emitted.
    pub marked_for_deletion: usize,
    /// Unrelated lines omitted from the output.
    pub dropped: usize,
}

impl RewriteStats {
    /// Folds the counters of another pass into this one.
    pub fn merge(&mut self, other: Self) {
        self.lines_read += other.lines_read;
        self.migrated += other.migrated;
        self.marked_for_deletion += other.marked_for_deletion;
        self.dropped += other.dropped;
    }
}

/// Rewrites a single configuration line.
///
/// `line` is the raw line without its trailing newline; `line_no` is 1-based
/// and only used for error reporting. A line matching a deprecated key
/// prefix yields its `# DELETE` marker, preceded by the replacement
/// assignment when the old value compares equal to `true`. Any other line
/// yields nothing: the migrated stream carries only replacements and
/// markers for the downstream config updater.
///
/// # Errors
///
/// Returns [`RewriteError::MissingSeparator`] when the line matches a
/// deprecated key but contains no `=` to extract a value from.
pub fn rewrite_line(line: &str, line_no: usize) -> Result<RewrittenLines, RewriteError> {
    let mut out = RewrittenLines::new();
    let rule = match rules::match_rule(line) {
        Some(rule) => rule,
        None => return Ok(out),
    };

    if deprecated_value_is_true(line, rule, line_no)? {
        out.push(rule.replacement_line());
    }
    out.push(rule.delete_marker());
    Ok(out)
}

/// Applies the boolean predicate to a line already matched to `rule`.
///
/// The line is split on every `=` but only the segment at index 1 is read,
/// so on a line with several `=` characters the portion between the first
/// and second `=` decides. The segment is trimmed and compared to the exact
/// literal `true`: no case folding, no `1`/`yes` synonyms.
fn deprecated_value_is_true(
    line: &str,
    rule: &MigrationRule,
    line_no: usize,
) -> Result<bool, RewriteError> {
    let segment = line
        .split('=')
        .nth(1)
        .ok_or(RewriteError::MissingSeparator {
            key: rule.key,
            line: line_no,
        })?;
    Ok(segment.trim() == "true")
}

/// Streams `reader` through the rewriter into `writer`.
///
/// Output lines are written immediately, one `\n`-terminated line at a time,
/// preserving input order. The pass stops at the first malformed recognized
/// entry and propagates the error; lines already written stay written.
///
/// # Errors
///
/// Returns [`RewriteError::MissingSeparator`] for a malformed recognized
/// entry, or [`RewriteError::Io`] when reading or writing fails.
pub fn rewrite_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
) -> Result<RewriteStats, RewriteError> {
    let mut stats = RewriteStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        stats.lines_read += 1;

        let rewritten = rewrite_line(&line, index + 1)?;
        // Arity encodes the outcome: 0 = unrelated line dropped, 1 = marker
        // only, 2 = replacement assignment plus marker.
        match rewritten.len() {
            0 => stats.dropped += 1,
            1 => stats.marked_for_deletion += 1,
            _ => {
                stats.migrated += 1;
                stats.marked_for_deletion += 1;
            }
        }

        for out_line in &rewritten {
            writeln!(writer, "{out_line}")?;
        }
    }

    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rewrite(line: &str) -> Vec<String> {
        rewrite_line(line, 1).expect("should rewrite").into_vec()
    }

    fn run_stream(input: &str) -> (Vec<String>, RewriteStats) {
        let mut out = Vec::new();
        let stats = rewrite_stream(input.as_bytes(), &mut out).expect("stream should rewrite");
        let text = String::from_utf8(out).expect("output is UTF-8");
        (text.lines().map(ToOwned::to_owned).collect(), stats)
    }

    #[test]
    fn test_copy_image_true_emits_replacement_then_marker() {
        assert_eq!(
            rewrite("copyImageToClipboard=true"),
            [
                "clipboardGroup=PostScreenshotCopyImage",
                "# DELETE copyImageToClipboard"
            ]
        );
    }

    #[test]
    fn test_copy_image_false_emits_marker_only() {
        assert_eq!(
            rewrite("copyImageToClipboard=false"),
            ["# DELETE copyImageToClipboard"]
        );
    }

    #[test]
    fn test_copy_location_true_emits_replacement_then_marker() {
        assert_eq!(
            rewrite("copySaveLocation=true"),
            [
                "clipboardGroup=PostScreenshotCopyLocation",
                "# DELETE copySaveLocation"
            ]
        );
    }

    #[test]
    fn test_copy_location_false_emits_marker_only() {
        assert_eq!(
            rewrite("copySaveLocation=false"),
            ["# DELETE copySaveLocation"]
        );
    }

    #[test]
    fn test_whitespace_around_value_is_ignored() {
        assert_eq!(
            rewrite("copyImageToClipboard = true"),
            [
                "clipboardGroup=PostScreenshotCopyImage",
                "# DELETE copyImageToClipboard"
            ]
        );
        assert_eq!(
            rewrite("copySaveLocation=\ttrue\t"),
            [
                "clipboardGroup=PostScreenshotCopyLocation",
                "# DELETE copySaveLocation"
            ]
        );
    }

    #[test]
    fn test_comparison_is_case_sensitive() {
        assert_eq!(
            rewrite("copyImageToClipboard=True"),
            ["# DELETE copyImageToClipboard"]
        );
        assert_eq!(
            rewrite("copyImageToClipboard=TRUE"),
            ["# DELETE copyImageToClipboard"]
        );
    }

    #[test]
    fn test_boolean_synonyms_are_rejected() {
        for value in ["1", "yes", "on", "enabled"] {
            let line = format!("copySaveLocation={value}");
            assert_eq!(rewrite(&line), ["# DELETE copySaveLocation"]);
        }
    }

    #[test]
    fn test_empty_value_is_not_true() {
        assert_eq!(
            rewrite("copyImageToClipboard="),
            ["# DELETE copyImageToClipboard"]
        );
    }

    #[test]
    fn test_segment_before_second_equals_decides() {
        // Only the segment between the first and second `=` is compared.
        assert_eq!(
            rewrite("copyImageToClipboard=true=false"),
            [
                "clipboardGroup=PostScreenshotCopyImage",
                "# DELETE copyImageToClipboard"
            ]
        );
        assert_eq!(
            rewrite("copySaveLocation=false=true"),
            ["# DELETE copySaveLocation"]
        );
        // `==` leaves an empty segment at index 1.
        assert_eq!(
            rewrite("copySaveLocation==true"),
            ["# DELETE copySaveLocation"]
        );
    }

    #[test]
    fn test_prefix_match_covers_longer_keys() {
        // The marker carries the rule's key literal, not the line's key text.
        assert_eq!(
            rewrite("copyImageToClipboardLegacy=true"),
            [
                "clipboardGroup=PostScreenshotCopyImage",
                "# DELETE copyImageToClipboard"
            ]
        );
    }

    #[test]
    fn test_unrelated_lines_are_dropped() {
        for line in [
            "foo=bar",
            "launchAction=UseLastUsedCaptureMode",
            "# a comment",
            "[General]",
            "",
            "baz",
        ] {
            assert!(rewrite(line).is_empty(), "expected {line:?} to be dropped");
        }
    }

    #[test]
    fn test_indented_deprecated_key_is_dropped() {
        assert!(rewrite(" copyImageToClipboard=true").is_empty());
        assert!(rewrite("\tcopySaveLocation=true").is_empty());
    }

    #[test]
    fn test_missing_separator_is_fatal() {
        let err = rewrite_line("copySaveLocation", 7).expect_err("should fail");
        assert!(matches!(
            err,
            RewriteError::MissingSeparator {
                key: "copySaveLocation",
                line: 7,
            }
        ));
        assert!(err.to_string().contains("line 7"));
        assert!(err.to_string().contains("missing `=` separator"));
    }

    #[test]
    fn test_unrelated_line_without_separator_is_not_an_error() {
        assert!(rewrite("no separator here").is_empty());
    }

    #[test]
    fn test_stream_preserves_input_order() {
        let (lines, _) =
            run_stream("foo=bar\ncopyImageToClipboard = true\ncopySaveLocation=false\nbaz=1\n");
        assert_eq!(
            lines,
            [
                "clipboardGroup=PostScreenshotCopyImage",
                "# DELETE copyImageToClipboard",
                "# DELETE copySaveLocation"
            ]
        );
    }

    #[test]
    fn test_stream_counts() {
        let (_, stats) =
            run_stream("foo=bar\ncopyImageToClipboard = true\ncopySaveLocation=false\nbaz=1\n");
        assert_eq!(
            stats,
            RewriteStats {
                lines_read: 4,
                migrated: 1,
                marked_for_deletion: 2,
                dropped: 2,
            }
        );
    }

    #[test]
    fn test_stream_handles_crlf_and_missing_final_newline() {
        let (lines, stats) = run_stream("copyImageToClipboard=true\r\ncopySaveLocation=true");
        assert_eq!(
            lines,
            [
                "clipboardGroup=PostScreenshotCopyImage",
                "# DELETE copyImageToClipboard",
                "clipboardGroup=PostScreenshotCopyLocation",
                "# DELETE copySaveLocation"
            ]
        );
        assert_eq!(stats.lines_read, 2);
    }

    #[test]
    fn test_stream_error_reports_line_number_and_keeps_prior_output() {
        let mut out = Vec::new();
        let err = rewrite_stream(
            "copyImageToClipboard=true\nfoo=bar\ncopySaveLocation\n".as_bytes(),
            &mut out,
        )
        .expect_err("should fail on line 3");

        assert!(matches!(
            err,
            RewriteError::MissingSeparator {
                key: "copySaveLocation",
                line: 3,
            }
        ));
        // Lines emitted before the malformed entry stay written.
        let text = String::from_utf8(out).expect("output is UTF-8");
        assert_eq!(
            text,
            "clipboardGroup=PostScreenshotCopyImage\n# DELETE copyImageToClipboard\n"
        );
    }

    #[test]
    fn test_stream_second_pass_drops_migrated_output() {
        // Re-running on already-migrated output is expected to drop every
        // line: neither `clipboardGroup=...` nor `# DELETE ...` matches a
        // deprecated key prefix.
        let (first, _) = run_stream("copyImageToClipboard=true\ncopySaveLocation=false\n");
        let second_input = first.join("\n");
        let (second, stats) = run_stream(&second_input);
        assert!(second.is_empty());
        assert_eq!(stats.dropped, stats.lines_read);
    }

    #[test]
    fn test_stream_empty_input() {
        let (lines, stats) = run_stream("");
        assert!(lines.is_empty());
        assert_eq!(stats, RewriteStats::default());
    }
}
