//! Run command handler: the live monitor.
//!
//! Wires the audio thread, the axis reader and the monitor loop together,
//! redraws the display every tick and tears everything down on Ctrl-C.

use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use pedal_audio::{AudioConfig, AudioThreadHandle};
use pedal_core::{AxisSource, DeviceInfo, MonitorStatus, ToneSink};
use pedal_input::AxisReader;
use pedal_input::backend::DEFAULT_FRAME_INTERVAL;
use pedal_runtime::MonitorService;
use tokio_util::sync::CancellationToken;

use crate::bootstrap::CliContext;
use crate::commands::RunArgs;
use crate::error::CliError;
use crate::presentation::{Frame, MonitorScreen};

/// Where each tick is shown.
enum MonitorDisplay {
    /// Redrawn bars on the alternate screen.
    Screen(MonitorScreen),
    /// Status changes as plain lines, for pipes and logs.
    Plain { last: Option<MonitorStatus> },
}

impl MonitorDisplay {
    fn new() -> Result<Self> {
        if io::stdout().is_terminal() {
            Ok(Self::Screen(
                MonitorScreen::enter().context("Failed to prepare the terminal")?,
            ))
        } else {
            Ok(Self::Plain { last: None })
        }
    }

    fn show(&mut self, service: &MonitorService, output: Option<&str>) {
        match self {
            Self::Screen(screen) => {
                let frame = Frame {
                    device: service.device(),
                    output,
                    axes: service.axes(),
                    status: service.status(),
                };
                if let Err(e) = screen.draw(&frame) {
                    tracing::warn!(error = %e, "Failed to draw monitor frame");
                }
            }
            Self::Plain { last } => {
                let status = service.status();
                if *last != Some(status) {
                    println!("{status}");
                    *last = Some(status);
                }
            }
        }
    }
}

/// Pick the device to monitor: the requested one, else the first found.
pub fn choose_device(devices: &[DeviceInfo], requested: Option<usize>) -> Result<usize, CliError> {
    match requested {
        Some(index) if devices.iter().any(|d| d.index == index) => Ok(index),
        Some(index) => Err(CliError::Arguments(format!(
            "input device {index} not found (see `pedal-assistant devices`)"
        ))),
        None => devices.first().map(|d| d.index).ok_or_else(|| {
            CliError::Core(
                "No input devices found. Connect a controller or pass --replay FILE".to_string(),
            )
        }),
    }
}

/// Execute the run command.
pub async fn execute(ctx: &CliContext, args: RunArgs) -> Result<()> {
    let settings = ctx.settings();

    let audio = AudioThreadHandle::spawn(AudioConfig {
        block_size: settings.effective_block_size(),
        device_check_interval: settings.device_check_interval(),
    })
    .context("Failed to start audio output")?;
    let output = audio.status()?.device;
    if output.is_none() {
        tracing::warn!("No audio output available; alerts will be silent until one appears");
    }

    let reader = match &args.replay {
        Some(path) => {
            let interval = args
                .frame_ms
                .map_or(DEFAULT_FRAME_INTERVAL, Duration::from_millis);
            AxisReader::replay(path, interval)?
        }
        None => AxisReader::gamepads().context("Failed to start gamepad input")?,
    };

    let tones: Arc<dyn ToneSink> = Arc::new(audio.tone_sink());
    let mut service = MonitorService::new(Arc::new(reader) as Arc<dyn AxisSource>, tones);

    let devices = service.list_devices()?;
    // The stored default names a controller, not a replay file.
    let requested = if args.replay.is_some() {
        args.device
    } else {
        args.device.or(settings.default_device)
    };
    let index = choose_device(&devices, requested)?;
    let axes = service.select_device(index, &ctx.profile)?;
    if axes == 0 {
        return Err(CliError::Core(format!("input device {index} has no readable axes")).into());
    }

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    let mut display = MonitorDisplay::new()?;
    let period = settings.refresh_interval();
    service
        .run(period, cancel, |service| display.show(service, output.as_deref()))
        .await;
    drop(display);

    drop(service);
    audio.shutdown();
    println!("Stopped.");
    Ok(())
}
