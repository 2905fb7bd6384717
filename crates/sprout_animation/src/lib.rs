//! Sprout Animation System
//!
//! Spring physics, timed tweens, and the splash intro animation.
//!
//! # Features
//!
//! - **Spring Physics**: RK4-integrated springs with stiffness, damping, mass
//! - **Origami Parameters**: Springs configured from tension/friction pairs
//! - **Tweens**: Fixed-duration transitions with easing functions
//! - **Shared Scalars**: Lock-free single-writer values readable from any thread
//! - **Frame Ticker**: Interval-driven frame clock on the tokio timer
//! - **IntroAnimation**: Parallel opacity + scale reveal with exactly-once completion

pub mod easing;
pub mod error;
pub mod intro;
pub mod spring;
pub mod ticker;
pub mod tween;
pub mod values;

pub use easing::Easing;
pub use error::{AnimationError, Result};
pub use intro::{IntroAnimation, IntroConfig, IntroValues, OPACITY_FLOOR, SCALE_FLOOR, TARGET};
pub use spring::{Spring, SpringConfig};
pub use ticker::FrameTicker;
pub use tween::Tween;
pub use values::{AnimatedScalar, Interpolate, ScalarReader};
