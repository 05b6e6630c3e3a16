//! User input utilities for interactive prompts.

use std::io::{self, IsTerminal, Write};

use anyhow::{Context, Result};

/// Whether stdin is attached to an interactive terminal.
pub fn is_interactive() -> bool {
    io::stdin().is_terminal()
}

/// Print `prompt` and block until the user presses Enter.
///
/// Returns immediately when stdin is not a terminal, so scripted runs never
/// hang.
pub fn wait_for_enter(prompt: &str) -> Result<()> {
    if !is_interactive() {
        return Ok(());
    }

    print!("{prompt}");
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read user input")?;
    Ok(())
}
