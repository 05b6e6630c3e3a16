//! Handler management subcommands.

use clap::{Args, Subcommand};
use pedal_core::domain::{parse_frequency, parse_percent};
use pedal_core::{HandlerUpdate, Waveform};

/// Handler command variants. Axes are addressed by index (0 = X, 1 = Y, ...).
#[derive(Subcommand)]
pub enum HandlerCommand {
    /// List stored handlers
    List {
        /// Only show this axis
        #[arg(long)]
        axis: Option<usize>,
    },
    /// Add a handler to an axis
    Add {
        /// Axis index
        axis: usize,
        #[command(flatten)]
        values: HandlerValues,
    },
    /// Change a stored handler
    Set {
        /// Axis index
        axis: usize,
        /// Handler id (see `handler list`)
        id: String,
        #[command(flatten)]
        values: HandlerValues,
    },
    /// Remove a handler
    Remove {
        /// Axis index
        axis: usize,
        /// Handler id (see `handler list`)
        id: String,
    },
    /// Remove every handler of an axis
    Clear {
        /// Axis index
        axis: usize,
    },
}

/// Handler fields accepted on the command line.
#[derive(Args, Debug, Clone, Default)]
pub struct HandlerValues {
    /// Lower threshold in percent (0-100)
    #[arg(long, value_parser = parse_percent)]
    pub min: Option<f32>,

    /// Upper threshold in percent (0-100)
    #[arg(long, value_parser = parse_percent)]
    pub max: Option<f32>,

    /// Tone frequency in Hz (100-2000)
    #[arg(long, value_parser = parse_frequency)]
    pub frequency: Option<u32>,

    /// Volume in percent (0-100)
    #[arg(long, value_parser = parse_percent)]
    pub volume: Option<f32>,

    /// Waveform: sine, sawtooth or square
    #[arg(long)]
    pub waveform: Option<Waveform>,
}

impl HandlerValues {
    pub fn to_update(&self) -> HandlerUpdate {
        HandlerUpdate {
            min_threshold: self.min,
            max_threshold: self.max,
            frequency: self.frequency,
            volume: self.volume,
            waveform: self.waveform,
        }
    }
}
