//! Tone command handler: audition a tone through the mixer.

use std::time::Duration;

use anyhow::{Context, Result};
use pedal_audio::{AudioConfig, AudioThreadHandle};
use pedal_core::{AlertHandler, HandlerUpdate, ToneSink, Waveform};

use crate::bootstrap::CliContext;

/// Play one tone for `duration`, or until Ctrl-C.
pub async fn execute(
    ctx: &CliContext,
    frequency: u32,
    waveform: Waveform,
    volume: f32,
    duration: Duration,
) -> Result<()> {
    let config = AudioConfig {
        block_size: ctx.settings().effective_block_size(),
        device_check_interval: ctx.settings().device_check_interval(),
    };
    let audio = AudioThreadHandle::spawn(config).context("Failed to start audio output")?;
    let status = audio.status()?;
    let Some(device) = status.device.as_deref() else {
        anyhow::bail!("No audio output device is available");
    };

    let mut handler = AlertHandler::default();
    handler.apply(&HandlerUpdate {
        frequency: Some(frequency),
        volume: Some(volume),
        waveform: Some(waveform),
        ..HandlerUpdate::default()
    });

    println!(
        "Playing {} Hz {} at {}% on {device} ({} Hz, {} ch)",
        handler.frequency,
        handler.waveform,
        handler.volume_percent(),
        status.sample_rate,
        status.channels
    );

    let tones = audio.tone_sink();
    tones.start_tone(&handler);
    tokio::select! {
        () = tokio::time::sleep(duration) => {}
        _ = tokio::signal::ctrl_c() => {}
    }
    tones.stop_tone(&handler.id);

    audio.shutdown();
    Ok(())
}
