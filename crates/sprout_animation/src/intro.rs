//! Splash intro animation
//!
//! Plays the logo reveal shown while the app starts: opacity fades from 0 to 1
//! on a timed tween while scale springs from 0.5 to 1, both in parallel.
//!
//! # Example
//!
//! ```ignore
//! use sprout_animation::{IntroAnimation, IntroConfig};
//!
//! let intro = IntroAnimation::new(IntroConfig::default());
//! let values = intro.values();
//!
//! intro.reset();
//! intro.play(|| tracing::info!("logo revealed")).await?;
//! assert_eq!(values.opacity.get(), 1.0);
//! ```

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::time::Duration;

use tokio::time::Instant;

use crate::easing::Easing;
use crate::error::{AnimationError, Result};
use crate::spring::{Spring, SpringConfig};
use crate::ticker::{FrameTicker, DEFAULT_FPS};
use crate::tween::Tween;
use crate::values::{AnimatedScalar, ScalarReader};

/// Opacity at the start of every playback
pub const OPACITY_FLOOR: f32 = 0.0;
/// Scale at the start of every playback
pub const SCALE_FLOOR: f32 = 0.5;
/// Where both values end
pub const TARGET: f32 = 1.0;

/// Intro animation parameters
#[derive(Clone, Debug, PartialEq)]
pub struct IntroConfig {
    /// Duration of the opacity fade
    pub opacity_duration: Duration,
    /// Easing applied to the opacity fade
    pub opacity_easing: Easing,
    /// Spring driving the scale
    pub scale_spring: SpringConfig,
    /// Playback frame rate
    pub fps: u32,
    /// Hard cap on playback; values snap to target if it is reached
    pub max_duration: Duration,
}

impl IntroConfig {
    /// Short fade with a softer spring
    pub fn brisk() -> Self {
        Self {
            opacity_duration: Duration::from_millis(1500),
            scale_spring: SpringConfig::from_origami(20.0, 6.0),
            ..Self::relaxed()
        }
    }

    /// Longer fade with a slightly tighter spring
    pub fn relaxed() -> Self {
        Self {
            opacity_duration: Duration::from_millis(2000),
            opacity_easing: Easing::EaseInOut,
            scale_spring: SpringConfig::from_origami(25.0, 7.0),
            fps: DEFAULT_FPS,
            max_duration: Duration::from_secs(10),
        }
    }
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self::relaxed()
    }
}

/// Read-only view of the two intro values, for renderers
#[derive(Clone, Debug)]
pub struct IntroValues {
    pub opacity: ScalarReader,
    pub scale: ScalarReader,
}

/// The splash intro: parallel opacity and scale reveal
///
/// Owns both values exclusively. They change only through [`reset`](Self::reset)
/// and [`play`](Self::play); everyone else reads them via [`values`](Self::values).
#[derive(Debug)]
pub struct IntroAnimation {
    opacity: AnimatedScalar,
    scale: AnimatedScalar,
    config: IntroConfig,
    playing: AtomicBool,
    completed_plays: AtomicU32,
}

impl IntroAnimation {
    pub fn new(config: IntroConfig) -> Self {
        Self {
            opacity: AnimatedScalar::new(OPACITY_FLOOR),
            scale: AnimatedScalar::new(SCALE_FLOOR),
            config,
            playing: AtomicBool::new(false),
            completed_plays: AtomicU32::new(0),
        }
    }

    pub fn values(&self) -> IntroValues {
        IntroValues {
            opacity: self.opacity.reader(),
            scale: self.scale.reader(),
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Acquire)
    }

    /// Number of playbacks that ran to completion
    pub fn completed_plays(&self) -> u32 {
        self.completed_plays.load(Ordering::Acquire)
    }

    /// Put both values back at their floor
    ///
    /// Must precede every [`play`](Self::play) so replays start from the same
    /// place regardless of history. Ignored while a playback is running.
    pub fn reset(&self) {
        if self.is_playing() {
            tracing::debug!("IntroAnimation: reset ignored while playing");
            return;
        }
        self.opacity.set(OPACITY_FLOOR);
        self.scale.set(SCALE_FLOOR);
    }

    /// Run the reveal to completion
    ///
    /// `on_complete` fires exactly once, after both values sit at [`TARGET`].
    /// Returns the playback duration.
    pub async fn play<F>(&self, on_complete: F) -> Result<Duration>
    where
        F: FnOnce(),
    {
        if self.playing.swap(true, Ordering::AcqRel) {
            return Err(AnimationError::AlreadyPlaying);
        }
        let playing = PlayingGuard(&self.playing);

        let mut opacity = Tween::new(self.opacity.get(), TARGET, self.config.opacity_duration)
            .easing(self.config.opacity_easing);
        let mut scale = Spring::new(self.config.scale_spring, self.scale.get());
        scale.set_target(TARGET);

        tracing::debug!(
            opacity_ms = self.config.opacity_duration.as_millis() as u64,
            fps = self.config.fps,
            underdamped = self.config.scale_spring.is_underdamped(),
            "IntroAnimation: play"
        );

        let started = Instant::now();
        let mut ticker = FrameTicker::new(self.config.fps);
        loop {
            let dt = ticker.tick().await;
            opacity.tick(dt);
            scale.step(dt.as_secs_f32());

            self.opacity.set(opacity.value());
            self.scale.set(scale.value());

            if opacity.is_finished() && scale.is_settled() {
                break;
            }
            if started.elapsed() >= self.config.max_duration {
                tracing::warn!(
                    max_ms = self.config.max_duration.as_millis() as u64,
                    "IntroAnimation: spring did not settle, snapping to target"
                );
                break;
            }
        }

        self.opacity.set(TARGET);
        self.scale.set(TARGET);
        self.completed_plays.fetch_add(1, Ordering::AcqRel);

        let elapsed = started.elapsed();
        tracing::debug!(
            elapsed_ms = elapsed.as_millis() as u64,
            "IntroAnimation: complete"
        );
        drop(playing);
        on_complete();
        Ok(elapsed)
    }
}

/// Clears the playing flag even if the playback future is dropped early
struct PlayingGuard<'a>(&'a AtomicBool);

impl Drop for PlayingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
