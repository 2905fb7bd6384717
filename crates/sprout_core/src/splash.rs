//! Platform splash surface
//!
//! Mobile platforms show a native splash surface at launch and hide it on
//! their own unless told otherwise. The gate suppresses auto-hide for the
//! whole startup sequence and releases the surface exactly once, on the
//! `Ready → Committed` transition.

use std::fmt;
use std::sync::Arc;

/// The platform's native splash surface
pub trait SplashSurface: Send + Sync {
    /// Keep the surface visible until [`hide`](Self::hide) is called
    fn prevent_auto_hide(&self);

    /// Release the surface, revealing the app's own views
    fn hide(&self);
}

/// Auto-hide suppression held for the duration of startup
///
/// Acquiring calls [`SplashSurface::prevent_auto_hide`]. Releasing consumes the
/// hold, so the surface can be hidden at most once. Dropping an unreleased
/// hold leaves the surface up: only an explicit release hides it.
pub struct SplashHold {
    surface: Arc<dyn SplashSurface>,
}

impl SplashHold {
    pub fn acquire(surface: Arc<dyn SplashSurface>) -> Self {
        surface.prevent_auto_hide();
        tracing::debug!("SplashHold: platform auto-hide suppressed");
        Self { surface }
    }

    pub fn release(self) {
        tracing::debug!("SplashHold: releasing platform splash");
        self.surface.hide();
    }
}

impl fmt::Debug for SplashHold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SplashHold").finish_non_exhaustive()
    }
}
