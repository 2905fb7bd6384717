//! Sprout Application Shell
//!
//! Wires the readiness gate to the outside world: the filesystem for assets,
//! a platform splash surface, and a renderer that swaps the splash for the
//! main UI.
//!
//! # Example (headless cold start)
//!
//! ```ignore
//! use std::sync::Arc;
//! use sprout_app::prelude::*;
//!
//! let config = SproutConfig::load("sprout.toml".as_ref())?;
//! let loader = FsAssetLoader::from_config(&config.assets, config.asset_root(".".as_ref()));
//! let gate = ReadinessGate::new(config.readiness()?, Arc::new(LoggingSplash::new()));
//!
//! let run = cold_start(&gate, &loader, TraceRenderer::new(), config.intro.fps).await;
//! for transition in &run.timeline {
//!     println!("{transition}");
//! }
//! ```

pub mod assets;
pub mod config;
pub mod error;
pub mod logging;
pub mod shell;
pub mod splash;

#[cfg(test)]
mod tests;

pub use assets::FsAssetLoader;
pub use config::{Preset, SproutConfig};
pub use error::{Result, SproutError};
pub use shell::{
    cold_start, record_transitions, ColdStart, ShellDriver, ShellRenderer, SplashFrame,
    TraceRenderer, Transition,
};
pub use splash::LoggingSplash;

/// Prelude for common imports
pub mod prelude {
    pub use crate::assets::FsAssetLoader;
    pub use crate::config::{Preset, SproutConfig};
    pub use crate::error::{Result, SproutError};
    pub use crate::shell::{cold_start, ShellDriver, ShellRenderer, SplashFrame, TraceRenderer};
    pub use crate::splash::LoggingSplash;

    pub use sprout_core::{
        AssetLoader, ImmediateAssets, ReadinessConfig, ReadinessGate, ReadinessState,
        SplashSurface,
    };
}
