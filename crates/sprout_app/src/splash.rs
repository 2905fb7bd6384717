//! Headless splash surface

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use sprout_core::SplashSurface;

/// A [`SplashSurface`] that only logs
///
/// Stands in for the native splash on desktop and in CLI runs.
#[derive(Debug, Default)]
pub struct LoggingSplash {
    held: AtomicBool,
    hides: AtomicUsize,
}

impl LoggingSplash {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether auto-hide is suppressed and the surface not yet hidden
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    /// How many times the surface was hidden
    pub fn hide_count(&self) -> usize {
        self.hides.load(Ordering::Acquire)
    }
}

impl SplashSurface for LoggingSplash {
    fn prevent_auto_hide(&self) {
        self.held.store(true, Ordering::Release);
        tracing::info!("splash: holding platform splash");
    }

    fn hide(&self) {
        self.held.store(false, Ordering::Release);
        let hides = self.hides.fetch_add(1, Ordering::AcqRel) + 1;
        if hides > 1 {
            tracing::warn!(hides, "splash: hidden more than once");
        } else {
            tracing::info!("splash: platform splash hidden");
        }
    }
}
