//! Replay backend: recorded frames from a JSON-lines file, looping.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use pedal_core::DeviceInfo;
use serde::{Deserialize, Serialize};

use super::InputBackend;
use crate::error::InputError;

/// Time each frame is held before the next one.
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// One recorded snapshot of raw axis values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayFrame {
    pub axes: Vec<f32>,
}

#[derive(Debug)]
pub struct ReplayBackend {
    name: String,
    frames: Vec<ReplayFrame>,
    axis_count: usize,
    frame_interval: Duration,
    started: Option<Instant>,
}

impl ReplayBackend {
    /// Load every frame of a replay file.
    pub fn load(path: &Path, frame_interval: Duration) -> Result<Self, InputError> {
        let content = fs::read_to_string(path).map_err(|e| InputError::ReplayRead {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
        Self::parse(&content, &name, path.to_path_buf(), frame_interval)
    }

    fn parse(
        content: &str,
        name: &str,
        path: PathBuf,
        frame_interval: Duration,
    ) -> Result<Self, InputError> {
        let mut frames = Vec::new();
        for (i, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let frame: ReplayFrame =
                serde_json::from_str(line).map_err(|e| InputError::ReplayParse {
                    path: path.clone(),
                    line: i + 1,
                    reason: e.to_string(),
                })?;
            frames.push(frame);
        }

        if frames.is_empty() {
            return Err(InputError::EmptyReplay(path));
        }

        let axis_count = frames.iter().map(|f| f.axes.len()).max().unwrap_or(0);
        Ok(Self {
            name: format!("Replay ({name})"),
            frames,
            axis_count,
            frame_interval: frame_interval.max(Duration::from_millis(1)),
            started: None,
        })
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Frame shown after `elapsed` time of playback.
    pub fn frame_at(&self, elapsed: Duration) -> &ReplayFrame {
        let step = elapsed.as_millis() / self.frame_interval.as_millis();
        let index = (step % self.frames.len() as u128) as usize;
        &self.frames[index]
    }
}

impl InputBackend for ReplayBackend {
    fn devices(&mut self) -> Vec<DeviceInfo> {
        vec![DeviceInfo::new(0, self.name.clone())]
    }

    fn open(&mut self, index: usize) -> Option<usize> {
        if index != 0 {
            return None;
        }
        self.started = Some(Instant::now());
        Some(self.axis_count)
    }

    fn poll(&mut self, raw: &mut Vec<f32>) {
        let Some(started) = self.started else {
            raw.clear();
            return;
        };
        let frame = self.frame_at(started.elapsed());

        raw.clear();
        raw.extend(frame.axes.iter().map(|v| v.clamp(-1.0, 1.0)));
        // Short frames leave the remaining axes released.
        raw.resize(self.axis_count, -1.0);
    }

    fn close(&mut self) {
        self.started = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{"axes": [-1.0, 0.0]}

{"axes": [1.0]}
{"axes": [0.5, 2.0, -0.5]}
"#;

    fn backend() -> ReplayBackend {
        ReplayBackend::parse(
            SAMPLE,
            "pedals.jsonl",
            PathBuf::from("pedals.jsonl"),
            Duration::from_millis(10),
        )
        .unwrap()
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let replay = backend();
        assert_eq!(replay.frame_count(), 3);
        assert_eq!(replay.axis_count, 3);
    }

    #[test]
    fn test_frames_loop() {
        let replay = backend();
        assert_eq!(replay.frame_at(Duration::ZERO).axes, vec![-1.0, 0.0]);
        assert_eq!(replay.frame_at(Duration::from_millis(15)).axes, vec![1.0]);
        assert_eq!(replay.frame_at(Duration::from_millis(25)).axes.len(), 3);
        assert_eq!(replay.frame_at(Duration::from_millis(30)).axes, vec![-1.0, 0.0]);
    }

    #[test]
    fn test_open_and_poll() {
        let mut replay = backend();
        assert_eq!(replay.devices()[0].to_string(), "0: Replay (pedals.jsonl)");
        assert_eq!(replay.open(1), None);

        let mut raw = Vec::new();
        replay.poll(&mut raw);
        assert!(raw.is_empty());

        assert_eq!(replay.open(0), Some(3));
        replay.poll(&mut raw);
        assert_eq!(raw.len(), 3);
        assert!(raw.iter().all(|v| (-1.0..=1.0).contains(v)));

        replay.close();
        replay.poll(&mut raw);
        assert!(raw.is_empty());
    }

    #[test]
    fn test_parse_errors() {
        let err = ReplayBackend::parse(
            "{\"axes\": [0.0]}\nnot json\n",
            "bad",
            PathBuf::from("bad.jsonl"),
            DEFAULT_FRAME_INTERVAL,
        )
        .unwrap_err();
        assert!(matches!(err, InputError::ReplayParse { line: 2, .. }));

        let err =
            ReplayBackend::parse("\n\n", "empty", PathBuf::from("e.jsonl"), DEFAULT_FRAME_INTERVAL)
                .unwrap_err();
        assert!(matches!(err, InputError::EmptyReplay(_)));
    }
}
