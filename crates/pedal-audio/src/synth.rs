//! Tone synthesis: one oscillator per playing handler, mixed to mono.

use std::collections::BTreeMap;
use std::f64::consts::TAU;
use std::sync::{Arc, Mutex, PoisonError};

use pedal_core::ToneSink;
use pedal_core::domain::{AlertHandler, HandlerId, Waveform};

/// Sample rate used until an output stream reports its own.
pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

/// Mixer shared between the control side and the stream callback.
pub type SharedMixer = Arc<Mutex<ToneMixer>>;

/// A playing tone.
#[derive(Debug, Clone, PartialEq)]
struct Voice {
    frequency: f64,
    volume: f32,
    waveform: Waveform,
    /// Frames rendered so far, wrapped at the sample rate.
    phase: u64,
}

impl Voice {
    fn from_handler(handler: &AlertHandler) -> Self {
        Self {
            frequency: f64::from(handler.frequency),
            volume: handler.volume,
            waveform: handler.waveform,
            phase: 0,
        }
    }

    /// Add this voice's next `out.len()` samples onto `out`.
    fn render_into(&mut self, out: &mut [f32], sample_rate: u32) {
        let rate = f64::from(sample_rate);
        for (i, sample) in out.iter_mut().enumerate() {
            let t = (self.phase + i as u64) as f64 / rate;
            *sample += oscillator(self.waveform, self.frequency, t) * self.volume;
        }
        self.phase = (self.phase + out.len() as u64) % u64::from(sample_rate);
    }
}

/// Value of a unit-amplitude waveform at time `t` seconds.
///
/// Square is `0` exactly at zero crossings of the underlying sine.
pub fn oscillator(waveform: Waveform, frequency: f64, t: f64) -> f32 {
    let cycles = frequency * t;
    let value = match waveform {
        Waveform::Sine => (TAU * cycles).sin(),
        Waveform::Sawtooth => 2.0 * cycles.rem_euclid(1.0) - 1.0,
        Waveform::Square => {
            let s = (TAU * cycles).sin();
            if s > 0.0 {
                1.0
            } else if s < 0.0 {
                -1.0
            } else {
                0.0
            }
        }
    };
    value as f32
}

/// Set of playing tones rendered block by block.
#[derive(Debug)]
pub struct ToneMixer {
    sample_rate: u32,
    voices: BTreeMap<HandlerId, Voice>,
}

impl Default for ToneMixer {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl ToneMixer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate: sample_rate.max(1),
            voices: BTreeMap::new(),
        }
    }

    /// Wrap a new mixer for sharing with a stream callback.
    pub fn shared(sample_rate: u32) -> SharedMixer {
        Arc::new(Mutex::new(Self::new(sample_rate)))
    }

    pub const fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Switch sample rate (new stream). Every phase restarts at zero.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate.max(1);
        for voice in self.voices.values_mut() {
            voice.phase = 0;
        }
    }

    /// Start a handler's tone from phase zero. No-op if already playing.
    pub fn start(&mut self, handler: &AlertHandler) {
        self.voices
            .entry(handler.id.clone())
            .or_insert_with(|| Voice::from_handler(handler));
    }

    /// Stop a handler's tone.
    pub fn stop(&mut self, id: &HandlerId) -> bool {
        self.voices.remove(id).is_some()
    }

    /// Replace a playing tone's parameters, keeping its phase.
    pub fn update(&mut self, handler: &AlertHandler) -> bool {
        let Some(voice) = self.voices.get_mut(&handler.id) else {
            return false;
        };
        let phase = voice.phase;
        *voice = Voice {
            phase,
            ..Voice::from_handler(handler)
        };
        true
    }

    pub fn clear(&mut self) {
        self.voices.clear();
    }

    pub fn is_playing(&self, id: &HandlerId) -> bool {
        self.voices.contains_key(id)
    }

    pub fn active_count(&self) -> usize {
        self.voices.len()
    }

    /// Render one mono block into `out`.
    ///
    /// Tones are summed; a block whose peak exceeds 1.0 is scaled down by
    /// that peak. With nothing playing the block is silence.
    pub fn fill(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        if self.voices.is_empty() {
            return;
        }

        let rate = self.sample_rate;
        for voice in self.voices.values_mut() {
            voice.render_into(out, rate);
        }

        let peak = out.iter().fold(0.0_f32, |peak, s| peak.max(s.abs()));
        if peak > 1.0 {
            for sample in out.iter_mut() {
                *sample /= peak;
            }
        }
    }
}

/// [`ToneSink`] backed by a shared mixer.
///
/// Control calls take the lock and wait for it; only the stream callback
/// gives up on contention.
#[derive(Debug, Clone)]
pub struct MixerToneSink {
    mixer: SharedMixer,
}

impl MixerToneSink {
    pub const fn new(mixer: SharedMixer) -> Self {
        Self { mixer }
    }

    pub fn mixer(&self) -> &SharedMixer {
        &self.mixer
    }

    /// Stop every tone.
    pub fn stop_all(&self) {
        self.with_mixer(ToneMixer::clear);
    }

    pub fn active_count(&self) -> usize {
        self.with_mixer(|m| m.active_count())
    }

    fn with_mixer<R>(&self, f: impl FnOnce(&mut ToneMixer) -> R) -> R {
        let mut mixer = self.mixer.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut mixer)
    }
}

impl ToneSink for MixerToneSink {
    fn start_tone(&self, handler: &AlertHandler) {
        tracing::debug!(id = %handler.id, frequency = handler.frequency, "Tone start");
        self.with_mixer(|m| m.start(handler));
    }

    fn stop_tone(&self, id: &HandlerId) {
        tracing::debug!(%id, "Tone stop");
        self.with_mixer(|m| m.stop(id));
    }

    fn update_tone(&self, handler: &AlertHandler) {
        self.with_mixer(|m| m.update(handler));
    }
}
