//! The monitor loop: axis snapshot in, tone edges and status out.

use std::sync::Arc;
use std::time::Duration;

use pedal_core::domain::{AlertHandler, AxisMonitor, HandlerId, HandlerUpdate};
use pedal_core::{AxisSource, CoreError, DeviceInfo, MonitorStatus, Profile, ToneSink};
use tokio::time::{MissedTickBehavior, interval};
use tokio_util::sync::CancellationToken;

/// Drives one [`AxisMonitor`] per axis of the selected device.
pub struct MonitorService {
    source: Arc<dyn AxisSource>,
    tones: Arc<dyn ToneSink>,
    device: Option<DeviceInfo>,
    axes: Vec<AxisMonitor>,
    status: MonitorStatus,
}

impl MonitorService {
    pub fn new(source: Arc<dyn AxisSource>, tones: Arc<dyn ToneSink>) -> Self {
        Self {
            source,
            tones,
            device: None,
            axes: Vec::new(),
            status: MonitorStatus::Ready,
        }
    }

    /// Re-enumerate input devices. Any open device is released first.
    pub fn list_devices(&mut self) -> Result<Vec<DeviceInfo>, CoreError> {
        self.release_axes();
        self.source.list_devices()
    }

    /// Open a device and build its axis monitors from the profile.
    ///
    /// Returns the number of axes; `0` when the device could not be opened.
    pub fn select_device(&mut self, index: usize, profile: &Profile) -> Result<usize, CoreError> {
        let name = self
            .source
            .list_devices()?
            .into_iter()
            .find(|d| d.index == index)
            .map_or_else(|| format!("Device {index}"), |d| d.name);
        self.release_axes();

        let count = self.source.select_device(index)?;
        self.axes = (0..count)
            .map(|i| AxisMonitor::with_handlers(i, profile.handlers(i).to_vec()))
            .collect();
        self.device = (count > 0).then(|| DeviceInfo::new(index, name));

        tracing::info!(index, axes = count, "Monitoring device");
        Ok(count)
    }

    /// Stop every tone and release the device.
    pub fn clear_device(&mut self) {
        self.release_axes();
        self.source.clear_device();
    }

    pub fn device(&self) -> Option<&DeviceInfo> {
        self.device.as_ref()
    }

    pub fn axes(&self) -> &[AxisMonitor] {
        &self.axes
    }

    pub const fn status(&self) -> MonitorStatus {
        self.status
    }

    /// Read the latest snapshot once and update every axis.
    ///
    /// Axes the snapshot does not cover keep their previous value.
    pub fn tick(&mut self) -> MonitorStatus {
        let values = self.source.axis_values();
        for (axis, value) in self.axes.iter_mut().zip(values) {
            axis.update_value(value, self.tones.as_ref());
        }

        let triggered = self.axes.iter().map(AxisMonitor::triggered_count).sum();
        self.status = MonitorStatus::from_count(triggered);
        self.status
    }

    /// Add a handler to a live axis.
    pub fn add_handler(&mut self, axis: usize, handler: AlertHandler) -> Option<HandlerId> {
        self.axes.get_mut(axis).map(|a| a.add_handler(handler))
    }

    /// Remove a handler from a live axis, silencing it.
    pub fn remove_handler(&mut self, axis: usize, id: &HandlerId) -> Option<AlertHandler> {
        let tones = Arc::clone(&self.tones);
        self.axes.get_mut(axis)?.remove_handler(id, tones.as_ref())
    }

    /// Edit a handler on a live axis; a playing tone follows the edit.
    pub fn edit_handler(&mut self, axis: usize, id: &HandlerId, update: &HandlerUpdate) -> bool {
        let tones = Arc::clone(&self.tones);
        self.axes
            .get_mut(axis)
            .is_some_and(|a| a.edit_handler(id, update, tones.as_ref()))
    }

    /// Tick every `period` until `cancel` fires, then stop all tones and
    /// release the device. `on_tick` runs after each update.
    pub async fn run(
        &mut self,
        period: Duration,
        cancel: CancellationToken,
        mut on_tick: impl FnMut(&Self) + Send,
    ) {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::debug!(?period, axes = self.axes.len(), "Starting monitor loop");

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let before = self.status;
                    let status = self.tick();
                    if status != before {
                        tracing::debug!(%status, "Monitor status changed");
                    }
                    on_tick(self);
                }
                () = cancel.cancelled() => {
                    tracing::debug!("Monitor loop cancelled");
                    break;
                }
            }
        }

        self.clear_device();
    }

    fn release_axes(&mut self) {
        for axis in &mut self.axes {
            axis.cleanup(self.tones.as_ref());
        }
        self.axes.clear();
        self.device = None;
        self.status = MonitorStatus::Ready;
    }
}

impl Drop for MonitorService {
    fn drop(&mut self) {
        self.release_axes();
    }
}
