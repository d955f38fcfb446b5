//! Frame timing

use crate::consts::MAX_FRAME_DT;

/// Converts host timestamps (milliseconds) into clamped frame deltas
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameClock {
    last: Option<f64>,
    /// Smoothed frames per second
    fps: f32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds since the previous call, capped at `MAX_FRAME_DT`.
    /// The first frame, and any timestamp going backwards, yields 0.
    pub fn advance(&mut self, timestamp_ms: f64) -> f32 {
        let dt = match self.last {
            Some(prev) if timestamp_ms > prev => ((timestamp_ms - prev) / 1000.0) as f32,
            _ => 0.0,
        };
        self.last = Some(timestamp_ms);
        if dt > 0.0 {
            let instant = 1.0 / dt;
            self.fps = if self.fps == 0.0 {
                instant
            } else {
                self.fps * 0.9 + instant * 0.1
            };
        }
        dt.min(MAX_FRAME_DT)
    }

    pub fn fps(&self) -> f32 {
        self.fps
    }
}
