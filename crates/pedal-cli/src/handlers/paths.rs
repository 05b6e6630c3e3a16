//! Paths command handler.
//!
//! Displays every resolved path, for diagnosing where the profile and `.env`
//! are read from.

use anyhow::Result;

use crate::bootstrap::CliContext;

/// Print the resolved paths in `key = value` format.
pub fn execute(ctx: &CliContext) -> Result<()> {
    println!("{}", ctx.paths);
    println!(
        "profile_exists = {}",
        if ctx.paths.profile.is_file() { "yes" } else { "no" }
    );
    Ok(())
}
