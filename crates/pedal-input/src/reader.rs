//! Background axis reader: owns the input backend on its own thread.
//!
//! The thread idles on its command channel until a device is selected, then
//! polls the backend every [`POLL_INTERVAL`] and publishes normalised values.

use std::path::Path;
use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;
use std::time::Duration;

use pedal_core::{AxisSource, CoreError, DeviceInfo};

use crate::backend::{GilrsBackend, InputBackend, ReplayBackend};
use crate::error::InputError;

/// Delay between two backend polls while a device is open.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Map a raw axis value in `[-1, 1]` to `[0, 1]`.
pub fn normalize_axis(raw: f32) -> f32 {
    if raw.is_nan() {
        return 0.0;
    }
    ((raw + 1.0) / 2.0).clamp(0.0, 1.0)
}

type Snapshot = Arc<Mutex<Vec<f32>>>;

enum ReaderCommand {
    ListDevices {
        reply: mpsc::Sender<Vec<DeviceInfo>>,
    },
    Select {
        index: usize,
        reply: mpsc::Sender<usize>,
    },
    Clear,
    Shutdown,
}

/// `Send + Sync` handle to the reader thread. Implements [`AxisSource`].
pub struct AxisReader {
    cmd_tx: mpsc::Sender<ReaderCommand>,
    values: Snapshot,
    thread: Option<thread::JoinHandle<()>>,
}

impl AxisReader {
    /// Spawn the reader thread, building the backend on it.
    pub fn spawn<F>(make_backend: F) -> Result<Self, InputError>
    where
        F: FnOnce() -> Result<Box<dyn InputBackend>, InputError> + Send + 'static,
    {
        let values: Snapshot = Arc::new(Mutex::new(Vec::new()));
        let (cmd_tx, cmd_rx) = mpsc::channel::<ReaderCommand>();
        let (init_tx, init_rx) = mpsc::channel::<Result<(), InputError>>();

        let thread_values = Arc::clone(&values);
        let thread = thread::Builder::new()
            .name("pedal-input".into())
            .spawn(move || {
                let backend = match make_backend() {
                    Ok(backend) => backend,
                    Err(e) => {
                        let _ = init_tx.send(Err(e));
                        return;
                    }
                };
                if init_tx.send(Ok(())).is_err() {
                    return;
                }
                ReaderLoop::new(backend, thread_values).run(&cmd_rx);
            })
            .map_err(|e| InputError::ThreadSpawn(e.to_string()))?;

        init_rx.recv().map_err(|_| InputError::ReaderThreadDied)??;

        Ok(Self {
            cmd_tx,
            values,
            thread: Some(thread),
        })
    }

    /// Reader over connected game controllers.
    pub fn gamepads() -> Result<Self, InputError> {
        Self::spawn(GilrsBackend::create)
    }

    /// Reader replaying a recorded JSON-lines file.
    pub fn replay(path: &Path, frame_interval: Duration) -> Result<Self, InputError> {
        let backend = ReplayBackend::load(path, frame_interval)?;
        Self::spawn(move || Ok(Box::new(backend) as Box<dyn InputBackend>))
    }

    fn send_and_recv<T>(
        &self,
        build: impl FnOnce(mpsc::Sender<T>) -> ReaderCommand,
    ) -> Result<T, InputError> {
        let (tx, rx) = mpsc::channel();
        self.cmd_tx
            .send(build(tx))
            .map_err(|_| InputError::ReaderThreadDied)?;
        rx.recv().map_err(|_| InputError::ReaderThreadDied)
    }
}

impl AxisSource for AxisReader {
    fn list_devices(&self) -> Result<Vec<DeviceInfo>, CoreError> {
        Ok(self.send_and_recv(|reply| ReaderCommand::ListDevices { reply })?)
    }

    fn select_device(&self, index: usize) -> Result<usize, CoreError> {
        Ok(self.send_and_recv(|reply| ReaderCommand::Select { index, reply })?)
    }

    fn clear_device(&self) {
        let _ = self.cmd_tx.send(ReaderCommand::Clear);
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn axis_values(&self) -> Vec<f32> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Drop for AxisReader {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(ReaderCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

struct ReaderLoop {
    backend: Box<dyn InputBackend>,
    values: Snapshot,
    reading: bool,
    raw: Vec<f32>,
}

impl ReaderLoop {
    fn new(backend: Box<dyn InputBackend>, values: Snapshot) -> Self {
        Self {
            backend,
            values,
            reading: false,
            raw: Vec::new(),
        }
    }

    fn run(mut self, cmd_rx: &mpsc::Receiver<ReaderCommand>) {
        loop {
            let next = if self.reading {
                cmd_rx.recv_timeout(POLL_INTERVAL)
            } else {
                cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected)
            };

            match next {
                Ok(ReaderCommand::ListDevices { reply }) => {
                    self.stop_reading();
                    let _ = reply.send(self.backend.devices());
                }
                Ok(ReaderCommand::Select { index, reply }) => {
                    self.stop_reading();
                    let axes = self.select(index);
                    let _ = reply.send(axes);
                }
                Ok(ReaderCommand::Clear) => self.stop_reading(),
                Ok(ReaderCommand::Shutdown) | Err(RecvTimeoutError::Disconnected) => break,
                Err(RecvTimeoutError::Timeout) => self.read_once(),
            }
        }

        self.backend.close();
        tracing::debug!("Input thread shutting down");
    }

    fn select(&mut self, index: usize) -> usize {
        match self.backend.open(index) {
            Some(axes) => {
                self.reading = true;
                self.read_once();
                axes
            }
            None => {
                tracing::warn!(index, "Input device could not be opened");
                0
            }
        }
    }

    fn read_once(&mut self) {
        self.backend.poll(&mut self.raw);
        let normalized: Vec<f32> = self.raw.iter().map(|v| normalize_axis(*v)).collect();
        self.publish(&normalized);
    }

    fn stop_reading(&mut self) {
        if self.reading {
            self.backend.close();
            self.reading = false;
        }
        self.publish(&[]);
    }

    fn publish(&self, values: &[f32]) {
        let mut snapshot = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        snapshot.clear();
        snapshot.extend_from_slice(values);
    }
}
