//! Main binary entry point for the `rcshift` migration filter.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()`
//! function so the command line and the integration tests share one code path.

use anyhow::Result;

fn main() -> Result<()> {
    let code = rcshift::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
