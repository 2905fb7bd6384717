//! Animatable value types
//!
//! Provides the interpolation trait used by tweens and the shared scalar cell
//! that carries a live animation value from its single writer to any number
//! of readers (renderers, loggers, tests).

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Trait for values that can be linearly interpolated
pub trait Interpolate: Clone {
    /// Linearly interpolate between self and other by factor t (0.0 to 1.0)
    fn lerp(&self, other: &Self, t: f32) -> Self;
}

impl Interpolate for f32 {
    fn lerp(&self, other: &Self, t: f32) -> Self {
        self + (other - self) * t
    }
}

// ============================================================================
// Shared scalar
// ============================================================================

/// A live `f32` with exactly one writer
///
/// The owner mutates the value; everyone else gets a [`ScalarReader`].
/// Storage is an `f32` bit-cast into an `AtomicU32`, so reads never block
/// the animation loop.
#[derive(Debug)]
pub struct AnimatedScalar {
    bits: Arc<AtomicU32>,
}

impl AnimatedScalar {
    pub fn new(initial: f32) -> Self {
        Self {
            bits: Arc::new(AtomicU32::new(initial.to_bits())),
        }
    }

    /// Current value
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    /// Write a new value
    ///
    /// Crate-private: only animation drivers in this crate may mutate.
    pub(crate) fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }

    /// Hand out a read-only view of this value
    pub fn reader(&self) -> ScalarReader {
        ScalarReader {
            bits: Arc::clone(&self.bits),
        }
    }
}

/// Read-only handle to an [`AnimatedScalar`]
#[derive(Clone, Debug)]
pub struct ScalarReader {
    bits: Arc<AtomicU32>,
}

impl ScalarReader {
    /// Current value
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}
