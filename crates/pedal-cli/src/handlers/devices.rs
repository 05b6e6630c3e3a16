//! Devices command handler: input devices and audio outputs.

use anyhow::{Context, Result};
use pedal_audio::list_output_devices;
use pedal_core::AxisSource;
use pedal_input::AxisReader;

use crate::bootstrap::CliContext;

/// Print every input device and audio output device.
pub fn execute(ctx: &CliContext) -> Result<()> {
    let reader = AxisReader::gamepads().context("Failed to start gamepad input")?;
    let devices = reader.list_devices()?;
    let configured = ctx.settings().default_device;

    println!("Input devices:");
    if devices.is_empty() {
        println!("  (none found - connect a controller and try again)");
    }
    for device in &devices {
        let marker = if configured == Some(device.index) { "  [default]" } else { "" };
        println!("  {device}{marker}");
    }

    println!();
    println!("Audio outputs:");
    match list_output_devices() {
        Ok(outputs) if outputs.is_empty() => println!("  (none found)"),
        Ok(outputs) => {
            for output in outputs {
                let marker = if output.is_default { "  [default]" } else { "" };
                println!("  {}{marker}", output.name);
            }
        }
        Err(e) => println!("  (unavailable: {e})"),
    }

    Ok(())
}
