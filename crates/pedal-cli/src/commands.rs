//! Main commands enum and primary subcommands.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use pedal_core::Waveform;
use pedal_core::domain::{parse_frequency, parse_percent};

use crate::config_commands::ConfigCommand;
use crate::handler_commands::HandlerCommand;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Monitor the axes of an input device (default when no command is given)
    Run(RunArgs),

    /// List input devices and audio output devices
    Devices,

    /// Check system dependencies (python, pip, native libraries)
    CheckDeps,

    /// Install requirements and start the Python edition
    Launch(LaunchArgs),

    /// Manage the alert handlers stored per axis
    Handler {
        #[command(subcommand)]
        command: HandlerCommand,
    },

    /// Play a test tone through the default output device
    Tone {
        /// Tone frequency in Hz (100-2000)
        #[arg(long, default_value = "440", value_parser = parse_frequency)]
        frequency: u32,
        /// Waveform: sine, sawtooth or square
        #[arg(long, default_value_t = Waveform::Sine)]
        waveform: Waveform,
        /// Volume in percent (0-100)
        #[arg(long, default_value = "50", value_parser = parse_percent)]
        volume: f32,
        /// How long to play, in milliseconds
        #[arg(long, default_value_t = 1000)]
        duration_ms: u64,
    },

    /// View or change stored settings
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },

    /// Show resolved paths for the profile and .env file
    Paths,
}

/// Options for `run`.
#[derive(Args, Debug, Clone, Default)]
pub struct RunArgs {
    /// Device index to monitor (see `devices`); defaults to the configured
    /// device, then the first one found
    #[arg(short, long)]
    pub device: Option<usize>,

    /// Replay recorded axis frames from a JSON-lines file instead of reading
    /// a controller
    #[arg(long, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    /// Time each replayed frame is held, in milliseconds
    #[arg(long, requires = "replay")]
    pub frame_ms: Option<u64>,
}

/// Options for `launch`. Each one overrides the stored setting.
#[derive(Args, Debug, Clone, Default)]
pub struct LaunchArgs {
    /// Entry-point script to run
    #[arg(long)]
    pub script: Option<String>,

    /// Requirements manifest to install
    #[arg(long)]
    pub manifest: Option<String>,

    /// Interpreter to use instead of the configured candidates
    #[arg(long)]
    pub python: Option<String>,

    /// Do not upgrade pip before installing
    #[arg(long)]
    pub skip_upgrade: bool,

    /// Never wait for Enter before exiting
    #[arg(long)]
    pub no_pause: bool,

    /// Arguments passed through to the script
    #[arg(last = true)]
    pub args: Vec<String>,
}
