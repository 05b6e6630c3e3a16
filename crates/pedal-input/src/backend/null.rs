use pedal_core::DeviceInfo;

use super::InputBackend;

/// Backend for platforms without gamepad support: no devices, ever.
#[derive(Debug, Default)]
pub struct NullBackend;

impl InputBackend for NullBackend {
    fn devices(&mut self) -> Vec<DeviceInfo> {
        Vec::new()
    }

    fn open(&mut self, _index: usize) -> Option<usize> {
        None
    }

    fn poll(&mut self, raw: &mut Vec<f32>) {
        raw.clear();
    }

    fn close(&mut self) {}
}
