//! Sprout Core
//!
//! The application readiness gate: decides when startup work is complete and
//! the main UI may replace the splash screen.
//!
//! - **ReadinessState**: `NotReady → Animating → Ready → Committed`, never backwards
//! - **ReadinessGate**: waits for assets, joins the intro animation with a
//!   minimum dwell timer, and performs the one-time hand-off on `commit()`
//! - **AssetLoader**: asynchronous success/failure signal for required assets
//! - **SplashHold**: platform splash suppression, released only on commit
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use sprout_core::{ImmediateAssets, ReadinessConfig, ReadinessGate, ReadinessState};
//!
//! let gate = ReadinessGate::new(ReadinessConfig::default(), Arc::new(my_splash));
//! gate.start_with(&ImmediateAssets).await;
//! assert_eq!(gate.current_state(), ReadinessState::Ready);
//!
//! // After the main UI has laid out:
//! gate.commit();
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod readiness;
pub mod splash;

pub use assets::{AssetLoader, AssetOutcome, DelayedAssets, ImmediateAssets};
pub use config::ReadinessConfig;
pub use error::AssetLoadFailure;
pub use readiness::{ReadinessGate, ReadinessState, StateChange};
pub use splash::{SplashHold, SplashSurface};

// Re-export the intro animation types the gate exposes
pub use sprout_animation::{IntroConfig, IntroValues};
