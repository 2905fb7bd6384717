//! Shell rendering contract
//!
//! The shell draws either the splash or the main UI, picking by gate state:
//!
//! | state                            | frame                                          |
//! |----------------------------------|------------------------------------------------|
//! | `NotReady`, `Animating`, `Ready` | splash, bound to the live intro values         |
//! | `Ready`                          | also lay out the main UI, `commit()` once valid |
//! | `Committed`                      | main UI                                        |
//!
//! The splash stays on screen through the `Ready` frame in which layout
//! succeeds, so the first frame without a splash is already a laid-out main UI.

use std::fmt;
use std::time::Duration;

use sprout_animation::{FrameTicker, IntroValues};
use sprout_core::{AssetLoader, ReadinessGate, ReadinessState, StateChange};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::time::Instant;

/// Splash frame inputs
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SplashFrame {
    pub state: ReadinessState,
    pub opacity: f32,
    pub scale: f32,
}

/// Draws the app shell
pub trait ShellRenderer {
    /// Draw the splash view
    fn render_splash(&mut self, frame: SplashFrame);

    /// Lay out the main UI off-screen
    ///
    /// Returns `true` once the layout is valid. Called on every `Ready`
    /// frame until it succeeds.
    fn layout_main(&mut self) -> bool;

    /// Draw the main UI
    fn render_main(&mut self);
}

/// Runs a [`ShellRenderer`] against a gate, one call per frame
pub struct ShellDriver<'a, R> {
    gate: &'a ReadinessGate,
    renderer: R,
    values: IntroValues,
    ticker: FrameTicker,
    commit_requested: bool,
}

impl<'a, R: ShellRenderer> ShellDriver<'a, R> {
    pub fn new(gate: &'a ReadinessGate, renderer: R, fps: u32) -> Self {
        Self {
            gate,
            values: gate.intro_values(),
            renderer,
            ticker: FrameTicker::new(fps),
            commit_requested: false,
        }
    }

    /// Drive frames until the main UI has been drawn once, then hand the
    /// renderer back
    pub async fn run(mut self) -> R {
        loop {
            self.ticker.tick().await;
            if self.frame() {
                return self.renderer;
            }
        }
    }

    /// One frame. Returns `true` once the main UI was drawn.
    fn frame(&mut self) -> bool {
        let state = self.gate.current_state();
        if !state.shows_splash() {
            self.renderer.render_main();
            return true;
        }

        self.renderer.render_splash(SplashFrame {
            state,
            opacity: self.values.opacity.get(),
            scale: self.values.scale.get(),
        });

        if state == ReadinessState::Ready && !self.commit_requested && self.renderer.layout_main()
        {
            self.commit_requested = true;
            if !self.gate.commit() {
                tracing::debug!("ShellDriver: gate was already committed");
            }
        }
        false
    }
}

/// A state change and when it happened
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: ReadinessState,
    pub at: Duration,
}

impl fmt::Display for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6} ms  {}", self.at.as_millis(), self.state)
    }
}

/// Collect transitions from `rx` until `Committed` (or the gate is dropped)
///
/// Times are measured from `since` to the moment each transition was applied.
pub async fn record_transitions(
    mut rx: broadcast::Receiver<StateChange>,
    since: Instant,
) -> Vec<Transition> {
    let mut timeline = Vec::new();
    loop {
        match rx.recv().await {
            Ok(change) => {
                timeline.push(Transition {
                    state: change.to,
                    at: change.at.saturating_duration_since(since),
                });
                if change.to == ReadinessState::Committed {
                    break;
                }
            }
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!(skipped, "record_transitions: missed transitions");
            }
            Err(RecvError::Closed) => break,
        }
    }
    timeline
}

/// Result of [`cold_start`]
#[derive(Debug)]
pub struct ColdStart<R> {
    pub renderer: R,
    pub timeline: Vec<Transition>,
}

/// Run a full cold start: asset loading, gate sequence and shell, together
pub async fn cold_start<L, R>(gate: &ReadinessGate, loader: &L, renderer: R, fps: u32) -> ColdStart<R>
where
    L: AssetLoader,
    R: ShellRenderer,
{
    let since = Instant::now();
    let driver = ShellDriver::new(gate, renderer, fps);
    let (_, renderer, timeline) = tokio::join!(
        gate.start_with(loader),
        driver.run(),
        record_transitions(gate.transitions(), since),
    );
    ColdStart { renderer, timeline }
}

/// A [`ShellRenderer`] that logs frames and keeps counts
#[derive(Debug, Default)]
pub struct TraceRenderer {
    pub splash_frames: u64,
    pub layout_passes: u32,
    pub main_frames: u64,
    /// Layout passes that fail before one succeeds
    pub layout_delay: u32,
    /// Most recent splash frame
    pub last_splash: Option<SplashFrame>,
}

impl TraceRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an invalid layout for the first `passes` attempts (builder pattern)
    pub fn with_layout_delay(mut self, passes: u32) -> Self {
        self.layout_delay = passes;
        self
    }
}

impl ShellRenderer for TraceRenderer {
    fn render_splash(&mut self, frame: SplashFrame) {
        self.splash_frames += 1;
        self.last_splash = Some(frame);
        tracing::trace!(
            state = %frame.state,
            opacity = frame.opacity,
            scale = frame.scale,
            "splash frame"
        );
    }

    fn layout_main(&mut self) -> bool {
        self.layout_passes += 1;
        let valid = self.layout_passes > self.layout_delay;
        tracing::debug!(pass = self.layout_passes, valid, "main layout");
        valid
    }

    fn render_main(&mut self) {
        self.main_frames += 1;
        tracing::debug!("main frame");
    }
}
