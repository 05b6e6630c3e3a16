//! Audio output: cpal stream fed from the shared [`ToneMixer`].
//!
//! The mixer renders mono; every device channel receives the same sample.

use std::sync::{Mutex, TryLockError};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};

use crate::error::AudioError;
use crate::synth::{SharedMixer, ToneMixer};

/// Information about an available audio output device.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDeviceInfo {
    /// Human-readable device name.
    pub name: String,
    /// Whether this is the system default output device.
    pub is_default: bool,
}

/// An open, playing output stream.
///
/// `cpal::Stream` is `!Send` on some platforms, so this type stays on the
/// thread that opened it.
pub struct OutputStream {
    _stream: Stream,
    device_name: String,
    sample_rate: u32,
    channels: u16,
}

impl OutputStream {
    /// Open the default output device and start playing the mixer.
    ///
    /// A fixed buffer of `block_size` frames is requested first; devices
    /// that refuse it get their default buffer size.
    pub fn open_default(mixer: &SharedMixer, block_size: u32) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or(AudioError::NoOutputDevice)?;
        Self::open(&device, mixer, block_size)
    }

    fn open(device: &Device, mixer: &SharedMixer, block_size: u32) -> Result<Self, AudioError> {
        let device_name = device.name().unwrap_or_default();
        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::OutputStreamError(e.to_string()))?;

        let sample_format = supported.sample_format();
        let mut config: StreamConfig = supported.config();
        let sample_rate = config.sample_rate.0;
        let channels = config.channels;

        // The mixer must run at the stream's rate before the first callback.
        mixer
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .set_sample_rate(sample_rate);

        config.buffer_size = BufferSize::Fixed(block_size);
        let stream = match build_stream(device, &config, sample_format, mixer) {
            Ok(stream) => stream,
            Err(e) => {
                tracing::debug!(error = %e, block_size, "Fixed buffer refused, using device default");
                config.buffer_size = BufferSize::Default;
                build_stream(device, &config, sample_format, mixer)?
            }
        };

        stream
            .play()
            .map_err(|e| AudioError::OutputStreamError(e.to_string()))?;

        tracing::info!(
            device = %device_name,
            sample_rate,
            channels,
            format = ?sample_format,
            "Audio output opened"
        );

        Ok(Self {
            _stream: stream,
            device_name,
            sample_rate,
            channels,
        })
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub const fn channels(&self) -> u16 {
        self.channels
    }
}

/// Name of the current default output device, if any.
pub fn default_output_device_name() -> Option<String> {
    cpal::default_host()
        .default_output_device()
        .and_then(|d| d.name().ok())
}

/// List available audio output devices.
pub fn list_output_devices() -> Result<Vec<OutputDeviceInfo>, AudioError> {
    let host = cpal::default_host();
    let default_name = host
        .default_output_device()
        .and_then(|d| d.name().ok())
        .unwrap_or_default();

    let devices = host
        .output_devices()
        .map_err(|e| AudioError::DeviceList(e.to_string()))?;

    let mut result = Vec::new();
    for device in devices {
        if let Ok(name) = device.name() {
            result.push(OutputDeviceInfo {
                is_default: name == default_name,
                name,
            });
        }
    }

    Ok(result)
}

fn build_stream(
    device: &Device,
    config: &StreamConfig,
    sample_format: SampleFormat,
    mixer: &SharedMixer,
) -> Result<Stream, AudioError> {
    match sample_format {
        SampleFormat::F32 => build_typed::<f32>(device, config, mixer),
        SampleFormat::I16 => build_typed::<i16>(device, config, mixer),
        SampleFormat::U16 => build_typed::<u16>(device, config, mixer),
        other => Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
    }
}

fn build_typed<T>(
    device: &Device,
    config: &StreamConfig,
    mixer: &SharedMixer,
) -> Result<Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let mixer = SharedMixer::clone(mixer);
    let channels = usize::from(config.channels);
    let mut scratch = Vec::new();

    let err_fn = |err: cpal::StreamError| {
        tracing::error!(%err, "Audio output stream error");
    };

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                write_frames(data, channels, &mixer, &mut scratch);
            },
            err_fn,
            None,
        )
        .map_err(|e| AudioError::OutputStreamError(e.to_string()))
}

/// Fill an interleaved device buffer from the mixer.
///
/// Never waits on the mixer lock: when it is held elsewhere the block is
/// silence. A poisoned mixer keeps playing. A trailing partial frame is
/// written as silence.
pub fn write_frames<T>(
    data: &mut [T],
    channels: usize,
    mixer: &Mutex<ToneMixer>,
    scratch: &mut Vec<f32>,
) where
    T: Sample + FromSample<f32>,
{
    let channels = channels.max(1);
    let frames = data.len() / channels;
    scratch.clear();
    scratch.resize(frames, 0.0);

    match mixer.try_lock() {
        Ok(mut mixer) => mixer.fill(scratch),
        Err(TryLockError::Poisoned(poisoned)) => poisoned.into_inner().fill(scratch),
        Err(TryLockError::WouldBlock) => {
            data.fill(T::EQUILIBRIUM);
            return;
        }
    }

    let mut chunks = data.chunks_exact_mut(channels);
    for (frame, value) in (&mut chunks).zip(scratch.iter()) {
        frame.fill(T::from_sample(*value));
    }
    chunks.into_remainder().fill(T::EQUILIBRIUM);
}
