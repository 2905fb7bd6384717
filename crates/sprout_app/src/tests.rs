//! End-to-end cold start tests
//!
//! Gate, asset loading and shell driver run together on virtual time.

use crate::prelude::*;
use crate::shell::Transition;
use sprout_animation::{IntroConfig, SpringConfig};
use sprout_core::{AssetLoadFailure, DelayedAssets};
use std::sync::Arc;
use std::time::Duration;

const FPS: u32 = 60;

fn timing(dwell_ms: u64, fade_ms: u64) -> ReadinessConfig {
    ReadinessConfig {
        dwell: Duration::from_millis(dwell_ms),
        intro: IntroConfig {
            opacity_duration: Duration::from_millis(fade_ms),
            scale_spring: SpringConfig::new(600.0, 40.0, 1.0),
            ..IntroConfig::default()
        },
    }
}

fn at(timeline: &[Transition], state: ReadinessState) -> Duration {
    timeline
        .iter()
        .find(|t| t.state == state)
        .map(|t| t.at)
        .unwrap_or_else(|| panic!("{state} missing from {timeline:?}"))
}

fn states(timeline: &[Transition]) -> Vec<ReadinessState> {
    timeline.iter().map(|t| t.state).collect()
}

#[tokio::test(start_paused = true)]
async fn test_cold_start_dwell_bound() {
    let splash = Arc::new(LoggingSplash::new());
    let gate = ReadinessGate::new(timing(2000, 800), splash.clone());
    assert!(splash.is_held());

    let run = cold_start(&gate, &ImmediateAssets, TraceRenderer::new(), FPS).await;

    assert_eq!(
        states(&run.timeline),
        vec![
            ReadinessState::Animating,
            ReadinessState::Ready,
            ReadinessState::Committed
        ]
    );
    let ready = at(&run.timeline, ReadinessState::Ready);
    assert!(ready >= Duration::from_millis(2000), "{ready:?}");
    assert!(ready < Duration::from_millis(2050), "{ready:?}");

    // Committed on the next frame after a valid layout
    let committed = at(&run.timeline, ReadinessState::Committed);
    assert!(committed >= ready);
    assert!(committed - ready < Duration::from_millis(50));

    assert_eq!(splash.hide_count(), 1);
    assert!(!splash.is_held());
    assert_eq!(run.renderer.main_frames, 1);
    assert_eq!(run.renderer.layout_passes, 1);
}

#[tokio::test(start_paused = true)]
async fn test_cold_start_animation_bound() {
    let gate = ReadinessGate::new(timing(2000, 3000), Arc::new(LoggingSplash::new()));

    let run = cold_start(&gate, &ImmediateAssets, TraceRenderer::new(), FPS).await;

    let ready = at(&run.timeline, ReadinessState::Ready);
    assert!(ready >= Duration::from_millis(3000), "{ready:?}");
    assert!(ready < Duration::from_millis(3050), "{ready:?}");
}

#[tokio::test(start_paused = true)]
async fn test_last_splash_frame_is_fully_revealed() {
    let gate = ReadinessGate::new(timing(500, 300), Arc::new(LoggingSplash::new()));

    let run = cold_start(&gate, &ImmediateAssets, TraceRenderer::new(), FPS).await;

    let last = run.renderer.last_splash.unwrap();
    assert_eq!(last.state, ReadinessState::Ready);
    assert_eq!(last.opacity, 1.0);
    assert_eq!(last.scale, 1.0);
    assert!(run.renderer.splash_frames > 20);
}

#[tokio::test(start_paused = true)]
async fn test_slow_assets_delay_animating() {
    let gate = ReadinessGate::new(timing(1000, 300), Arc::new(LoggingSplash::new()));
    let loader = DelayedAssets::succeeding(Duration::from_millis(700));

    let run = cold_start(&gate, &loader, TraceRenderer::new(), FPS).await;

    let animating = at(&run.timeline, ReadinessState::Animating);
    let ready = at(&run.timeline, ReadinessState::Ready);
    assert!(animating >= Duration::from_millis(700), "{animating:?}");
    assert!(ready - animating >= Duration::from_millis(1000));
    assert!(ready - animating < Duration::from_millis(1050));
}

#[tokio::test(start_paused = true)]
async fn test_failed_assets_still_hand_off() {
    let dir = tempfile::tempdir().unwrap();
    let loader = FsAssetLoader::new(dir.path()).font("fonts/missing.ttf");
    let splash = Arc::new(LoggingSplash::new());
    let gate = ReadinessGate::new(timing(400, 200), splash.clone());

    let run = cold_start(&gate, &loader, TraceRenderer::new(), FPS).await;

    assert_eq!(run.timeline.len(), 3);
    assert_eq!(gate.current_state(), ReadinessState::Committed);
    assert_eq!(splash.hide_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failing_loader_timeline_matches_success() {
    let failing = DelayedAssets::failing(
        Duration::from_millis(100),
        AssetLoadFailure::Other("cdn unreachable".to_string()),
    );
    let gate = ReadinessGate::new(timing(600, 300), Arc::new(LoggingSplash::new()));

    let run = cold_start(&gate, &failing, TraceRenderer::new(), FPS).await;

    let ready = at(&run.timeline, ReadinessState::Ready);
    assert!(ready >= Duration::from_millis(700), "{ready:?}");
    assert!(ready < Duration::from_millis(750), "{ready:?}");
}

#[tokio::test(start_paused = true)]
async fn test_slow_layout_keeps_splash_up() {
    let splash = Arc::new(LoggingSplash::new());
    let gate = ReadinessGate::new(timing(300, 200), splash.clone());
    let renderer = TraceRenderer::new().with_layout_delay(5);

    let run = cold_start(&gate, &ImmediateAssets, renderer, FPS).await;

    let ready = at(&run.timeline, ReadinessState::Ready);
    let committed = at(&run.timeline, ReadinessState::Committed);
    // Five invalid passes, one frame each
    assert!(committed - ready >= Duration::from_millis(5 * 16));
    assert_eq!(run.renderer.layout_passes, 6);
    assert_eq!(splash.hide_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_commit_after_hand_off_is_noop() {
    let splash = Arc::new(LoggingSplash::new());
    let gate = ReadinessGate::new(timing(200, 100), splash.clone());

    cold_start(&gate, &ImmediateAssets, TraceRenderer::new(), FPS).await;

    assert!(!gate.commit());
    assert_eq!(gate.current_state(), ReadinessState::Committed);
    assert_eq!(splash.hide_count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_config_file_drives_timing() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(crate::config::CONFIG_FILE);
    std::fs::write(
        &path,
        "[splash]\ndwell_ms = 1200\n\n[intro]\nopacity_duration_ms = 400\n\n[assets]\nfonts = []\nimages = []\n",
    )
    .unwrap();

    let config = SproutConfig::load(&path).unwrap();
    let loader = FsAssetLoader::from_config(&config.assets, config.asset_root(dir.path()));
    let gate = ReadinessGate::new(config.readiness().unwrap(), Arc::new(LoggingSplash::new()));

    let run = cold_start(&gate, &loader, TraceRenderer::new(), config.intro.fps).await;

    let ready = at(&run.timeline, ReadinessState::Ready);
    assert!(ready >= Duration::from_millis(1200), "{ready:?}");
    assert!(ready < Duration::from_millis(1250), "{ready:?}");
}
