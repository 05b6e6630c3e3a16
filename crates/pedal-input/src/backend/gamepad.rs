//! gilrs-backed joystick / pedal input.
//!
//! Every raw axis the device reports is read, mapped or not, so throttle,
//! rudder and wheel axes that gilrs knows only as `Axis::Unknown` are kept.
//! Axis `i` is the `i`-th axis code in ascending order, which keeps stored
//! handlers on the same physical axis across sessions.

use gilrs::ev::Code;
use gilrs::ev::state::AxisData;
use gilrs::{GamepadId, Gilrs};
use pedal_core::DeviceInfo;

use super::{InputBackend, NullBackend};
use crate::error::InputError;

pub struct GilrsBackend {
    gilrs: Gilrs,
    selected: Option<(GamepadId, Vec<Code>)>,
}

impl GilrsBackend {
    /// Initialise gilrs. Platforms gilrs does not support get a [`NullBackend`].
    pub fn create() -> Result<Box<dyn InputBackend>, InputError> {
        match Gilrs::new() {
            Ok(gilrs) => Ok(Box::new(Self {
                gilrs,
                selected: None,
            })),
            Err(gilrs::Error::NotImplemented(_)) => {
                tracing::warn!("Gamepad input is not supported on this platform");
                Ok(Box::new(NullBackend))
            }
            Err(e) => Err(InputError::Backend(e.to_string())),
        }
    }

    fn pump(&mut self) {
        while self.gilrs.next_event().is_some() {}
    }
}

/// Order items by their raw axis code, dropping duplicate codes.
fn by_axis_code<T>(mut items: Vec<(u32, T)>) -> Vec<T> {
    items.sort_by_key(|(code, _)| *code);
    items.dedup_by_key(|(code, _)| *code);
    items.into_iter().map(|(_, item)| item).collect()
}

impl InputBackend for GilrsBackend {
    fn devices(&mut self) -> Vec<DeviceInfo> {
        self.pump();
        self.gilrs
            .gamepads()
            .map(|(id, gamepad)| DeviceInfo::new(usize::from(id), gamepad.name()))
            .collect()
    }

    fn open(&mut self, index: usize) -> Option<usize> {
        self.pump();
        let (id, gamepad) = self
            .gilrs
            .gamepads()
            .find(|(id, _)| usize::from(*id) == index)?;

        let codes = by_axis_code(
            gamepad
                .state()
                .axes()
                .map(|(code, _)| (code.into_u32(), code))
                .collect(),
        );

        tracing::info!(index, name = gamepad.name(), axes = codes.len(), "Device opened");
        let count = codes.len();
        self.selected = Some((id, codes));
        Some(count)
    }

    fn poll(&mut self, raw: &mut Vec<f32>) {
        self.pump();
        let Some((id, codes)) = &self.selected else {
            raw.clear();
            return;
        };
        // A disconnected device keeps its last values.
        if let Some(gamepad) = self.gilrs.connected_gamepad(*id) {
            let state = gamepad.state();
            raw.clear();
            raw.extend(
                codes
                    .iter()
                    .map(|code| state.axis_data(*code).map_or(0.0, AxisData::value)),
            );
        }
    }

    fn close(&mut self) {
        self.selected = None;
    }
}
