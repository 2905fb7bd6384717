//! Readiness timing configuration

use std::time::Duration;

use sprout_animation::IntroConfig;

/// Timing for the startup sequence
///
/// Two product variants disagree on these numbers; both are available as
/// presets and neither is baked into the gate.
#[derive(Clone, Debug, PartialEq)]
pub struct ReadinessConfig {
    /// Minimum time the splash stays up once assets are available
    pub dwell: Duration,
    /// Intro animation parameters
    pub intro: IntroConfig,
}

impl ReadinessConfig {
    /// 2s dwell, 1.5s fade, softer spring
    pub fn brisk() -> Self {
        Self {
            dwell: Duration::from_millis(2000),
            intro: IntroConfig::brisk(),
        }
    }

    /// 4s dwell, 2s fade, tighter spring
    pub fn relaxed() -> Self {
        Self {
            dwell: Duration::from_millis(4000),
            intro: IntroConfig::relaxed(),
        }
    }

    /// Override the dwell duration (builder pattern)
    pub fn with_dwell(mut self, dwell: Duration) -> Self {
        self.dwell = dwell;
        self
    }
}

impl Default for ReadinessConfig {
    fn default() -> Self {
        Self::relaxed()
    }
}
