//! Asset loading seam
//!
//! The gate only needs one thing from asset loading: a single asynchronous
//! success/failure outcome. No progress, no cancellation.

use std::future::Future;
use std::time::Duration;

use crate::error::AssetLoadFailure;

/// Outcome of loading the required assets
pub type AssetOutcome = Result<(), AssetLoadFailure>;

/// Loads the static assets (fonts, images) the app needs before first paint
pub trait AssetLoader: Send + Sync {
    /// Load everything, resolving once with the overall outcome
    fn load(&self) -> impl Future<Output = AssetOutcome> + Send;
}

/// A loader with nothing to load
#[derive(Clone, Copy, Debug, Default)]
pub struct ImmediateAssets;

impl AssetLoader for ImmediateAssets {
    async fn load(&self) -> AssetOutcome {
        Ok(())
    }
}

/// A loader that resolves with a fixed outcome after a delay
///
/// Stands in for real loading in headless runs and tests.
#[derive(Clone, Debug)]
pub struct DelayedAssets {
    delay: Duration,
    outcome: AssetOutcome,
}

impl DelayedAssets {
    pub fn succeeding(delay: Duration) -> Self {
        Self {
            delay,
            outcome: Ok(()),
        }
    }

    pub fn failing(delay: Duration, failure: AssetLoadFailure) -> Self {
        Self {
            delay,
            outcome: Err(failure),
        }
    }
}

impl AssetLoader for DelayedAssets {
    async fn load(&self) -> AssetOutcome {
        tokio::time::sleep(self.delay).await;
        self.outcome.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test]
    async fn test_immediate_assets() {
        assert_eq!(ImmediateAssets.load().await, Ok(()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_delayed_assets_wait_then_report() {
        let start = Instant::now();
        let loader = DelayedAssets::failing(
            Duration::from_millis(300),
            AssetLoadFailure::Other("font server down".to_string()),
        );

        let outcome = loader.load().await;
        assert!(start.elapsed() >= Duration::from_millis(300));
        assert_eq!(
            outcome,
            Err(AssetLoadFailure::Other("font server down".to_string()))
        );
    }
}
