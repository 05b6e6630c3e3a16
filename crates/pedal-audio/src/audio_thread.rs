//! Dedicated audio output thread: isolates the `!Send` cpal stream.
//!
//! The thread owns the [`OutputStream`] for its whole life. Between commands
//! it polls the system default output device and reopens the stream when the
//! default changes (headphones plugged in, Bluetooth connected, ...).
//!
//! Tone control does not go through the thread: [`AudioThreadHandle::tone_sink`]
//! hands out a [`MixerToneSink`] that talks to the shared mixer directly.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::AudioError;
use crate::output::{OutputStream, default_output_device_name};
use crate::synth::{DEFAULT_SAMPLE_RATE, MixerToneSink, SharedMixer, ToneMixer};

/// Output parameters for the audio thread.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioConfig {
    /// Requested callback block size in frames.
    pub block_size: u32,
    /// How often the default output device is re-checked.
    pub device_check_interval: Duration,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            block_size: 512,
            device_check_interval: Duration::from_secs(1),
        }
    }
}

/// Snapshot of the output stream state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputStatus {
    /// Device the stream plays on, `None` when no stream is open.
    pub device: Option<String>,
    pub sample_rate: u32,
    pub channels: u16,
}

impl OutputStatus {
    pub const fn is_open(&self) -> bool {
        self.device.is_some()
    }
}

// ── Commands ───────────────────────────────────────────────────────

enum AudioCommand {
    /// Report the stream state.
    Status {
        reply: mpsc::Sender<OutputStatus>,
    },

    /// Close the stream and exit.
    Shutdown,
}

// ── Handle (Send + Sync proxy) ─────────────────────────────────────

/// `Send + Sync` handle to the audio output thread.
pub struct AudioThreadHandle {
    cmd_tx: mpsc::Sender<AudioCommand>,
    mixer: SharedMixer,
    thread: Option<thread::JoinHandle<()>>,
}

impl AudioThreadHandle {
    /// Spawn the audio thread and wait for its first attempt to open a stream.
    ///
    /// A device that cannot be opened is not an error: the thread keeps
    /// running silently and retries on the next device check.
    pub fn spawn(config: AudioConfig) -> Result<Self, AudioError> {
        let mixer = ToneMixer::shared(DEFAULT_SAMPLE_RATE);
        let (cmd_tx, cmd_rx) = mpsc::channel::<AudioCommand>();
        let (init_tx, init_rx) = mpsc::channel::<()>();

        let thread_mixer = SharedMixer::clone(&mixer);
        let thread = thread::Builder::new()
            .name("pedal-audio".into())
            .spawn(move || {
                AudioWorker::new(thread_mixer, config).run(&cmd_rx, &init_tx);
            })
            .map_err(|e| AudioError::ThreadSpawn(e.to_string()))?;

        init_rx.recv().map_err(|_| AudioError::AudioThreadDied)?;

        Ok(Self {
            cmd_tx,
            mixer,
            thread: Some(thread),
        })
    }

    /// Tone sink playing through this thread's stream.
    pub fn tone_sink(&self) -> MixerToneSink {
        MixerToneSink::new(SharedMixer::clone(&self.mixer))
    }

    /// Current stream state.
    pub fn status(&self) -> Result<OutputStatus, AudioError> {
        self.send_and_recv(|reply| AudioCommand::Status { reply })
    }

    /// Stop every tone and shut the thread down, closing the stream.
    pub fn shutdown(mut self) {
        self.stop_thread();
    }

    fn send_and_recv<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<T>) -> AudioCommand,
    ) -> Result<T, AudioError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(build(tx))
            .map_err(|_| AudioError::AudioThreadDied)?;
        rx.recv().map_err(|_| AudioError::AudioThreadDied)
    }

    fn stop_thread(&mut self) {
        self.tone_sink().stop_all();
        let _ = self.cmd_tx.send(AudioCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for AudioThreadHandle {
    fn drop(&mut self) {
        self.stop_thread();
    }
}

// ── Audio thread ───────────────────────────────────────────────────

struct AudioWorker {
    mixer: SharedMixer,
    config: AudioConfig,
    stream: Option<OutputStream>,
    /// Default device observed at the last check.
    current_device: Option<String>,
    last_check: Instant,
}

impl AudioWorker {
    fn new(mixer: SharedMixer, config: AudioConfig) -> Self {
        Self {
            mixer,
            config,
            stream: None,
            current_device: None,
            last_check: Instant::now(),
        }
    }

    fn run(mut self, cmd_rx: &mpsc::Receiver<AudioCommand>, init_tx: &mpsc::Sender<()>) {
        self.open_stream();
        if init_tx.send(()).is_err() {
            return;
        }

        loop {
            let wait = self
                .config
                .device_check_interval
                .saturating_sub(self.last_check.elapsed());

            match cmd_rx.recv_timeout(wait) {
                Ok(AudioCommand::Status { reply }) => {
                    let _ = reply.send(self.status());
                }
                Ok(AudioCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => {}
            }

            if self.last_check.elapsed() >= self.config.device_check_interval {
                self.check_device_change();
            }
        }

        self.stream = None;
        tracing::debug!("Audio thread shutting down");
    }

    fn check_device_change(&mut self) {
        self.last_check = Instant::now();
        let default_device = default_output_device_name();
        if default_device != self.current_device {
            tracing::info!(
                from = ?self.current_device,
                to = ?default_device,
                "Default output device changed, reopening stream"
            );
            self.open_stream();
        } else if self.stream.is_none() {
            tracing::debug!("Retrying audio output");
            self.open_stream();
        }
    }

    fn open_stream(&mut self) {
        // Drop the old stream before opening a new one on the same device.
        self.stream = None;
        self.last_check = Instant::now();
        self.current_device = default_output_device_name();

        match OutputStream::open_default(&self.mixer, self.config.block_size) {
            Ok(stream) => self.stream = Some(stream),
            Err(e) => tracing::warn!(error = %e, "Audio output unavailable, continuing silently"),
        }
    }

    fn status(&self) -> OutputStatus {
        self.stream.as_ref().map_or_else(
            || OutputStatus {
                device: None,
                sample_rate: 0,
                channels: 0,
            },
            |s| OutputStatus {
                device: Some(s.device_name().to_string()),
                sample_rate: s.sample_rate(),
                channels: s.channels(),
            },
        )
    }
}
