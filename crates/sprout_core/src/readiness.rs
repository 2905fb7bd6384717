//! Application readiness gate
//!
//! Decides exactly when the main UI may replace the splash screen.
//!
//! ```text
//!  NotReady ──assets──▶ Animating ──animation ∧ dwell──▶ Ready ──commit()──▶ Committed
//! ```
//!
//! - Assets: the first [`ReadinessGate::on_assets_loaded`] signal wins. A
//!   failed load counts as loaded (fail-open) and is logged.
//! - Animating: the intro animation and the dwell timer run concurrently.
//!   The gate waits for both (join), so whichever finishes later decides when
//!   `Ready` is reached.
//! - Ready: the splash is still mounted. The shell lays out the main UI and
//!   then calls [`ReadinessGate::commit`].
//! - Committed: terminal. The platform splash surface is released as part of
//!   this transition and nowhere else.
//!
//! State only moves forward. Every transition is a compare-and-advance on a
//! `watch` channel, so concurrent callers cannot apply the same transition
//! twice. The watch channel only keeps the latest state; every transition is
//! also published, in order, on a broadcast feed ([`ReadinessGate::transitions`]).

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use sprout_animation::{IntroAnimation, IntroValues};
use tokio::sync::{broadcast, watch};
use tokio::time::Instant;

use crate::assets::{AssetLoader, AssetOutcome};
use crate::config::ReadinessConfig;
use crate::splash::{SplashHold, SplashSurface};

/// Where the startup sequence is
///
/// Ordered: `NotReady < Animating < Ready < Committed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReadinessState {
    /// Waiting on assets
    NotReady,
    /// Intro animation and dwell timer running
    Animating,
    /// Animation and dwell both done; splash still mounted
    Ready,
    /// Main UI mounted and platform splash released
    Committed,
}

impl ReadinessState {
    /// Whether the shell should be showing splash content
    pub fn shows_splash(self) -> bool {
        self != ReadinessState::Committed
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReadinessState::NotReady => "not-ready",
            ReadinessState::Animating => "animating",
            ReadinessState::Ready => "ready",
            ReadinessState::Committed => "committed",
        }
    }
}

impl fmt::Display for ReadinessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One applied transition, as published on [`ReadinessGate::transitions`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StateChange {
    pub from: ReadinessState,
    pub to: ReadinessState,
    pub at: Instant,
}

/// Room for every transition a gate can make
const CHANGE_CAPACITY: usize = 4;

/// Clears the started flag if `start` is dropped before it finishes
struct StartGuard<'a> {
    started: &'a AtomicBool,
    armed: bool,
}

impl<'a> StartGuard<'a> {
    fn new(started: &'a AtomicBool) -> Self {
        Self {
            started,
            armed: true,
        }
    }

    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for StartGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!("ReadinessGate: start cancelled");
            self.started.store(false, Ordering::Release);
        }
    }
}

/// The readiness gate
///
/// One gate per app lifetime: it is created in `NotReady` at process start
/// and never goes back. A full restart creates a new gate.
#[derive(Debug)]
pub struct ReadinessGate {
    state: watch::Sender<ReadinessState>,
    changes: broadcast::Sender<StateChange>,
    assets: watch::Sender<Option<AssetOutcome>>,
    started: AtomicBool,
    intro: IntroAnimation,
    splash: Mutex<Option<SplashHold>>,
    dwell: Duration,
}

impl ReadinessGate {
    /// Create a gate and take hold of the platform splash surface
    pub fn new(config: ReadinessConfig, surface: Arc<dyn SplashSurface>) -> Self {
        let (state, _) = watch::channel(ReadinessState::NotReady);
        let (changes, _) = broadcast::channel(CHANGE_CAPACITY);
        let (assets, _) = watch::channel(None);

        tracing::debug!(
            dwell_ms = config.dwell.as_millis() as u64,
            "ReadinessGate: created"
        );

        Self {
            state,
            changes,
            assets,
            started: AtomicBool::new(false),
            intro: IntroAnimation::new(config.intro),
            splash: Mutex::new(Some(SplashHold::acquire(surface))),
            dwell: config.dwell,
        }
    }

    /// Current state (pure read, safe to poll at any rate)
    pub fn current_state(&self) -> ReadinessState {
        *self.state.borrow()
    }

    /// Observe the latest state without polling
    ///
    /// States that are passed through quickly may be skipped; use
    /// [`transitions`](Self::transitions) to see every one.
    pub fn subscribe(&self) -> watch::Receiver<ReadinessState> {
        self.state.subscribe()
    }

    /// Every transition applied after this call, in order
    pub fn transitions(&self) -> broadcast::Receiver<StateChange> {
        self.changes.subscribe()
    }

    /// Live, read-only intro animation values for the splash view
    pub fn intro_values(&self) -> IntroValues {
        self.intro.values()
    }

    /// Wait until the gate is at or past `target`
    pub async fn reached(&self, target: ReadinessState) -> ReadinessState {
        let mut rx = self.state.subscribe();
        let reached = match rx.wait_for(|state| *state >= target).await {
            Ok(state) => *state,
            Err(_) => self.current_state(),
        };
        reached
    }

    /// Record that asset loading finished
    ///
    /// Failures are accepted like successes. Only the first signal counts;
    /// later ones, or any signal once the gate has left `NotReady`, are
    /// ignored. Returns whether this call was recorded.
    pub fn on_assets_loaded(&self, outcome: AssetOutcome) -> bool {
        let state = self.current_state();
        if state != ReadinessState::NotReady {
            tracing::debug!(%state, "ReadinessGate: asset signal ignored");
            return false;
        }

        let recorded = self.assets.send_if_modified(|slot| {
            if slot.is_some() {
                return false;
            }
            *slot = Some(outcome);
            true
        });
        if !recorded {
            tracing::debug!("ReadinessGate: duplicate asset signal ignored");
        }
        recorded
    }

    /// Run the startup sequence up to `Ready`
    ///
    /// Waits for the asset signal, moves to `Animating`, then plays the intro
    /// (after a reset) alongside the dwell timer and moves to `Ready` once
    /// both are done. While a call is in flight, other calls return the
    /// current state immediately. A call that is dropped before finishing
    /// (for example by a timeout) lets the next call pick up from the
    /// current state; an interrupted intro replays from the start.
    pub async fn start(&self) -> ReadinessState {
        if self.started.swap(true, Ordering::AcqRel) {
            tracing::debug!(state = %self.current_state(), "ReadinessGate: already started");
            return self.current_state();
        }
        let guard = StartGuard::new(&self.started);

        if self.current_state() == ReadinessState::NotReady {
            let mut assets = self.assets.subscribe();
            let outcome = match assets.wait_for(Option::is_some).await {
                Ok(slot) => (*slot).clone().unwrap_or(Ok(())),
                Err(_) => Ok(()),
            };
            if let Err(failure) = &outcome {
                tracing::warn!(
                    error = %failure,
                    "ReadinessGate: asset loading failed, continuing with available assets"
                );
            }
            self.advance(ReadinessState::NotReady, ReadinessState::Animating);
        }

        if self.current_state() == ReadinessState::Animating {
            let began = Instant::now();
            self.intro.reset();
            let (played, ()) = tokio::join!(
                self.intro
                    .play(|| tracing::debug!("ReadinessGate: intro animation finished")),
                tokio::time::sleep(self.dwell),
            );
            if let Err(err) = played {
                tracing::warn!(error = %err, "ReadinessGate: intro animation did not play");
            }

            self.on_dwell_and_animation_settled();
            tracing::info!(
                elapsed_ms = began.elapsed().as_millis() as u64,
                "ReadinessGate: splash sequence settled"
            );
        }

        guard.disarm();
        self.current_state()
    }

    /// Run `loader` and [`start`](Self::start) together
    ///
    /// The loader's outcome is fed to [`on_assets_loaded`](Self::on_assets_loaded).
    pub async fn start_with<L: AssetLoader>(&self, loader: &L) -> ReadinessState {
        let load = async {
            let outcome = loader.load().await;
            self.on_assets_loaded(outcome);
        };
        let ((), state) = tokio::join!(load, self.start());
        state
    }

    /// Animation and dwell have both completed
    pub(crate) fn on_dwell_and_animation_settled(&self) -> bool {
        self.advance(ReadinessState::Animating, ReadinessState::Ready)
    }

    /// Hand off to the main UI
    ///
    /// Call once the main content has a valid layout. Moves `Ready → Committed`
    /// and releases the platform splash surface; in any other state this is a
    /// no-op. Returns whether the hand-off happened on this call.
    pub fn commit(&self) -> bool {
        if !self.advance(ReadinessState::Ready, ReadinessState::Committed) {
            tracing::debug!(state = %self.current_state(), "ReadinessGate: commit ignored");
            return false;
        }

        let hold = self
            .splash
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(hold) = hold {
            hold.release();
        }
        true
    }

    fn advance(&self, from: ReadinessState, to: ReadinessState) -> bool {
        let advanced = self.state.send_if_modified(|state| {
            if *state != from {
                return false;
            }
            *state = to;
            // Published under the watch lock so the feed stays in order
            let _ = self.changes.send(StateChange {
                from,
                to,
                at: Instant::now(),
            });
            true
        });
        if advanced {
            tracing::info!(%from, %to, "ReadinessGate: transition");
        }
        advanced
    }
}
