//! The monitor loop ticks until cancelled and cleans up after itself.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pedal_core::domain::{AlertHandler, HandlerId};
use pedal_core::{AxisSource, CoreError, DeviceInfo, MonitorStatus, Profile, ToneSink};
use pedal_runtime::MonitorService;
use tokio_util::sync::CancellationToken;

struct HeldPedal;

impl AxisSource for HeldPedal {
    fn list_devices(&self) -> Result<Vec<DeviceInfo>, CoreError> {
        Ok(vec![DeviceInfo::new(0, "Pedal")])
    }

    fn select_device(&self, _index: usize) -> Result<usize, CoreError> {
        Ok(1)
    }

    fn clear_device(&self) {}

    fn axis_values(&self) -> Vec<f32> {
        vec![1.0]
    }
}

#[derive(Default)]
struct CountingSink {
    playing: Mutex<Vec<HandlerId>>,
}

impl ToneSink for CountingSink {
    fn start_tone(&self, handler: &AlertHandler) {
        self.playing.lock().unwrap().push(handler.id.clone());
    }

    fn stop_tone(&self, id: &HandlerId) {
        self.playing.lock().unwrap().retain(|p| p != id);
    }

    fn update_tone(&self, _handler: &AlertHandler) {}
}

#[tokio::test]
async fn run_ticks_until_cancelled_then_silences() {
    let sink = Arc::new(CountingSink::default());
    let mut service = MonitorService::new(
        Arc::new(HeldPedal),
        Arc::clone(&sink) as Arc<dyn ToneSink>,
    );

    let mut profile = Profile::default();
    profile.add_handler(0, AlertHandler::default());
    service.select_device(0, &profile).unwrap();

    let cancel = CancellationToken::new();
    let ticks = AtomicUsize::new(0);
    let statuses = Mutex::new(Vec::new());

    let stopper = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(60)).await;
        stopper.cancel();
    });

    service
        .run(Duration::from_millis(5), cancel, |s| {
            ticks.fetch_add(1, Ordering::SeqCst);
            statuses.lock().unwrap().push(s.status());
        })
        .await;

    assert!(ticks.load(Ordering::SeqCst) >= 2);
    assert!(
        statuses
            .into_inner()
            .unwrap()
            .iter()
            .all(|s| *s == MonitorStatus::Triggered(1))
    );
    assert!(sink.playing.lock().unwrap().is_empty());
    assert!(service.axes().is_empty());
}
