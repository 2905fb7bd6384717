//! Frame clock
//!
//! Drives animation steps from the tokio timer instead of a dedicated
//! thread, so playback is awaited like any other startup work and runs on
//! virtual time under `tokio::time::pause`.

use std::time::Duration;

use tokio::time::{self, Instant, Interval, MissedTickBehavior};

/// Default frame rate for animation playback
pub const DEFAULT_FPS: u32 = 60;

/// Interval-based frame clock
///
/// Each [`FrameTicker::tick`] resolves on the next frame boundary and reports
/// the time elapsed since the previous frame. The first tick resolves
/// immediately with a zero delta.
#[derive(Debug)]
pub struct FrameTicker {
    interval: Interval,
    last: Option<Instant>,
    frame: Duration,
}

impl FrameTicker {
    /// Create a ticker at `fps` frames per second (clamped to at least 1)
    pub fn new(fps: u32) -> Self {
        let frame = Self::frame_duration(fps);
        let mut interval = time::interval(frame);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Self {
            interval,
            last: None,
            frame,
        }
    }

    /// Duration of one frame at `fps`
    pub fn frame_duration(fps: u32) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(fps.max(1)))
    }

    /// Wait for the next frame and return the delta since the last one
    pub async fn tick(&mut self) -> Duration {
        let now = self.interval.tick().await;
        let dt = self
            .last
            .map(|last| now.saturating_duration_since(last))
            .unwrap_or(Duration::ZERO);
        self.last = Some(now);
        dt
    }
}

impl Default for FrameTicker {
    fn default() -> Self {
        Self::new(DEFAULT_FPS)
    }
}
