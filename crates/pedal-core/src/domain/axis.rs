//! Per-axis monitoring: value tracking and trigger edge detection.

use crate::domain::handler::{AlertHandler, HandlerId, HandlerUpdate};
use crate::ports::ToneSink;

/// Display names of the first eight axes, in device order.
pub const AXIS_NAMES: [&str; 8] = ["X", "Y", "Z", "Rx", "Ry", "Rz", "Slider 1", "Slider 2"];

/// Name of the axis at `index`, `"Axis {index}"` past the named ones.
pub fn axis_name(index: usize) -> String {
    AXIS_NAMES
        .get(index)
        .map_or_else(|| format!("Axis {index}"), |name| (*name).to_string())
}

/// One device axis together with the handlers watching it.
#[derive(Debug, Clone)]
pub struct AxisMonitor {
    index: usize,
    name: String,
    value: f32,
    handlers: Vec<AlertHandler>,
}

impl AxisMonitor {
    pub fn new(index: usize) -> Self {
        Self::with_handlers(index, Vec::new())
    }

    /// Create a monitor pre-populated with stored handlers.
    pub fn with_handlers(index: usize, handlers: Vec<AlertHandler>) -> Self {
        Self {
            index,
            name: axis_name(index),
            value: 0.0,
            handlers: handlers.into_iter().map(AlertHandler::normalized).collect(),
        }
    }

    pub const fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Last value fed through [`update_value`](Self::update_value), in `[0, 1]`.
    pub const fn value(&self) -> f32 {
        self.value
    }

    pub fn handlers(&self) -> &[AlertHandler] {
        &self.handlers
    }

    pub fn handler(&self, id: &HandlerId) -> Option<&AlertHandler> {
        self.handlers.iter().find(|h| &h.id == id)
    }

    /// Feed a new axis value and start/stop tones on trigger edges.
    ///
    /// Returns the number of handlers whose trigger state changed.
    pub fn update_value(&mut self, value: f32, tones: &dyn ToneSink) -> usize {
        self.value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };

        let mut edges = 0;
        for handler in &mut self.handlers {
            let was_triggered = handler.triggered;
            let is_triggered = handler.check_trigger(self.value);
            handler.triggered = is_triggered;

            match (was_triggered, is_triggered) {
                (false, true) => {
                    tones.start_tone(handler);
                    edges += 1;
                }
                (true, false) => {
                    tones.stop_tone(&handler.id);
                    edges += 1;
                }
                _ => {}
            }
        }
        edges
    }

    /// Append a handler. It starts untriggered; the next value update decides.
    pub fn add_handler(&mut self, handler: AlertHandler) -> HandlerId {
        let handler = handler.normalized();
        let id = handler.id.clone();
        self.handlers.push(handler);
        id
    }

    /// Remove a handler, silencing it first. Returns the removed handler.
    pub fn remove_handler(&mut self, id: &HandlerId, tones: &dyn ToneSink) -> Option<AlertHandler> {
        let position = self.handlers.iter().position(|h| &h.id == id)?;
        tones.stop_tone(id);
        let mut removed = self.handlers.remove(position);
        removed.triggered = false;
        Some(removed)
    }

    /// Edit a handler. A playing tone picks up the new parameters immediately.
    ///
    /// Returns `false` when no handler has that id.
    pub fn edit_handler(
        &mut self,
        id: &HandlerId,
        update: &HandlerUpdate,
        tones: &dyn ToneSink,
    ) -> bool {
        let Some(handler) = self.handlers.iter_mut().find(|h| &h.id == id) else {
            return false;
        };
        handler.apply(update);
        if handler.triggered {
            tones.update_tone(handler);
        }
        true
    }

    pub fn triggered_count(&self) -> usize {
        self.handlers.iter().filter(|h| h.triggered).count()
    }

    /// Stop every playing tone of this axis.
    pub fn cleanup(&mut self, tones: &dyn ToneSink) {
        for handler in &mut self.handlers {
            if handler.triggered {
                tones.stop_tone(&handler.id);
                handler.triggered = false;
            }
        }
    }
}
