use clap::Parser;
use std::path::PathBuf;

/// Help text for the config-updater line protocol, shown at the bottom of --help.
const PROTOCOL_HELP: &str = "\
UPDATE PROTOCOL:
  The output stream is a script for the config updater:

    copyImageToClipboard=true   ->  clipboardGroup=PostScreenshotCopyImage
                                    # DELETE copyImageToClipboard
    copySaveLocation=true       ->  clipboardGroup=PostScreenshotCopyLocation
                                    # DELETE copySaveLocation

  A deprecated entry whose value is not exactly `true` still gets its
  `# DELETE` marker. Every other line is omitted from the output entirely:
  the updater only consumes replacements and markers, so feed the filter
  the settings group being migrated, not a whole unrelated file.
";

/// Command line interface configuration using `clap`.
/// This struct defines the arguments and flags accepted by the program.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Migrates the deprecated clipboard settings to the unified clipboardGroup key",
    long_about = None,
    after_help = PROTOCOL_HELP
)]
pub struct Cli {
    /// Configuration files to migrate, processed in argument order.
    /// Reads standard input when no paths are given; `-` also names
    /// standard input.
    pub paths: Vec<PathBuf>,

    /// Rewrite each file in place instead of printing the migrated
    /// stream to standard output.
    #[arg(short = 'i', long, requires = "paths")]
    pub in_place: bool,

    /// Print migration statistics to standard error.
    #[arg(short, long)]
    pub verbose: bool,
}
