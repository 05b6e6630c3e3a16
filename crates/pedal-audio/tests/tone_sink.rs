//! Axis monitors driving the mixer through the `ToneSink` port.

use pedal_audio::{MixerToneSink, ToneMixer};
use pedal_core::domain::{AlertHandler, AxisMonitor, HandlerUpdate};

fn handler(min: f32, max: f32) -> AlertHandler {
    let mut h = AlertHandler::default();
    h.set_min_threshold(min);
    h.set_max_threshold(max);
    h
}

#[test]
fn axis_edges_start_and_stop_tones() {
    let sink = MixerToneSink::new(ToneMixer::shared(8_000));
    let mut axis = AxisMonitor::new(0);
    let low = axis.add_handler(handler(0.0, 0.3));
    let high = axis.add_handler(handler(0.7, 1.0));

    axis.update_value(0.1, &sink);
    assert_eq!(sink.active_count(), 1);
    assert!(sink.mixer().lock().unwrap().is_playing(&low));

    axis.update_value(0.9, &sink);
    assert_eq!(sink.active_count(), 1);
    assert!(sink.mixer().lock().unwrap().is_playing(&high));

    axis.update_value(0.5, &sink);
    assert_eq!(sink.active_count(), 0);

    let mut block = vec![1.0_f32; 256];
    sink.mixer().lock().unwrap().fill(&mut block);
    assert!(block.iter().all(|s| *s == 0.0));
}

#[test]
fn removing_triggered_handler_silences_it() {
    let sink = MixerToneSink::new(ToneMixer::shared(8_000));
    let mut axis = AxisMonitor::new(1);
    let id = axis.add_handler(handler(0.0, 1.0));

    axis.update_value(0.5, &sink);
    assert_eq!(sink.active_count(), 1);

    axis.remove_handler(&id, &sink);
    assert_eq!(sink.active_count(), 0);
}

#[test]
fn editing_triggered_handler_keeps_it_playing() {
    let sink = MixerToneSink::new(ToneMixer::shared(8_000));
    let mut axis = AxisMonitor::new(2);
    let id = axis.add_handler(handler(0.0, 1.0));
    axis.update_value(0.5, &sink);

    let update = HandlerUpdate {
        frequency: Some(1000),
        ..HandlerUpdate::default()
    };
    assert!(axis.edit_handler(&id, &update, &sink));
    assert!(sink.mixer().lock().unwrap().is_playing(&id));

    axis.cleanup(&sink);
    assert_eq!(sink.active_count(), 0);
}
