//! Configuration management subcommands.

use clap::Subcommand;
use pedal_core::PauseMode;

/// Settings command variants.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show stored settings and their effective values
    Show,
    /// Update settings
    Set {
        /// Monitor refresh interval in ms (5-1000)
        #[arg(long)]
        refresh_ms: Option<u64>,
        /// How often the default audio output is re-checked, in ms (100-60000)
        #[arg(long)]
        device_check_ms: Option<u64>,
        /// Audio block size in frames (64-8192)
        #[arg(long)]
        block_size: Option<u32>,
        /// Input device monitored by `run` when no --device is given
        #[arg(long)]
        default_device: Option<usize>,
        /// Python interpreter names tried in order (comma separated)
        #[arg(long, value_delimiter = ',')]
        python: Option<Vec<String>>,
        /// Requirements manifest installed by `launch`
        #[arg(long)]
        manifest: Option<String>,
        /// Entry-point script started by `launch`
        #[arg(long)]
        script: Option<String>,
        /// Upgrade pip before installing (true/false)
        #[arg(long)]
        upgrade_installer: Option<bool>,
        /// When `launch` waits for Enter: never, on-error or always
        #[arg(long)]
        pause: Option<PauseMode>,
    },
    /// Reset every setting to its default (handlers are kept)
    Reset,
}
