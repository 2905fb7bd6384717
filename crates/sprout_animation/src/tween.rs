//! Fixed-duration tweens
//!
//! A tween moves a value from a start to an end over a set duration,
//! shaping progress with an [`Easing`] curve.

use std::time::Duration;

use crate::easing::Easing;
use crate::values::Interpolate;

/// A timed transition between two values
#[derive(Clone, Debug)]
pub struct Tween<T: Interpolate = f32> {
    from: T,
    to: T,
    duration: Duration,
    easing: Easing,
    elapsed: Duration,
}

impl<T: Interpolate> Tween<T> {
    pub fn new(from: T, to: T, duration: Duration) -> Self {
        Self {
            from,
            to,
            duration,
            easing: Easing::default(),
            elapsed: Duration::ZERO,
        }
    }

    /// Set the easing curve (builder pattern)
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Advance by `dt`
    pub fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt).min(self.duration);
    }

    /// Linear progress (0.0 to 1.0)
    pub fn progress(&self) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        (self.elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// Current eased value
    ///
    /// Returns the end value exactly once the duration has elapsed.
    pub fn value(&self) -> T {
        if self.is_finished() {
            return self.to.clone();
        }
        self.from.lerp(&self.to, self.easing.apply(self.progress()))
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}
