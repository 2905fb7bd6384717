//! Sprout CLI
//!
//! Run a headless cold start through the readiness gate and inspect the
//! effective startup configuration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use sprout_app::config::CONFIG_FILE;
use sprout_app::prelude::*;
use sprout_app::logging;

#[derive(Parser)]
#[command(name = "sprout")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sprout app shell: splash, readiness gate and hand-off", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate a cold start and print the state timeline
    Run {
        /// Path to sprout.toml
        #[arg(short, long, default_value = CONFIG_FILE)]
        config: PathBuf,

        /// Override the splash dwell time
        #[arg(long)]
        dwell_ms: Option<u64>,

        /// Apply a timing preset before overrides
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,

        /// Do not touch the filesystem for assets
        #[arg(long)]
        skip_assets: bool,
    },

    /// Print the effective configuration as TOML
    Config {
        /// Path to sprout.toml
        #[arg(short, long, default_value = CONFIG_FILE)]
        config: PathBuf,

        /// Apply a timing preset
        #[arg(short, long, value_enum)]
        preset: Option<Preset>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Commands::Run {
            config,
            dwell_ms,
            preset,
            skip_assets,
        } => cmd_run(&config, dwell_ms, preset, skip_assets).await,

        Commands::Config { config, preset } => cmd_config(&config, preset),
    }
}

fn load_config(path: &Path, preset: Option<Preset>) -> Result<SproutConfig> {
    let mut config = SproutConfig::load(path)
        .with_context(|| format!("Failed to load {}", path.display()))?;
    if let Some(preset) = preset {
        config.apply_preset(preset);
    }
    Ok(config)
}

async fn cmd_run(
    path: &Path,
    dwell_ms: Option<u64>,
    preset: Option<Preset>,
    skip_assets: bool,
) -> Result<()> {
    let mut config = load_config(path, preset)?;
    if let Some(dwell_ms) = dwell_ms {
        config.splash.dwell_ms = dwell_ms;
    }

    let readiness = config.readiness().context("Invalid startup timing")?;
    let background = config
        .splash
        .background_rgb()
        .context("Invalid splash background")?;
    info!(
        dwell_ms = config.splash.dwell_ms,
        fade_ms = config.intro.opacity_duration_ms,
        logo = %config.splash.logo,
        ?background,
        "Starting cold start"
    );

    let splash = Arc::new(LoggingSplash::new());
    let gate = ReadinessGate::new(readiness, splash.clone());
    let renderer = TraceRenderer::new();
    let fps = config.intro.fps;

    let run = if skip_assets {
        cold_start(&gate, &ImmediateAssets, renderer, fps).await
    } else {
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        let loader = FsAssetLoader::from_config(&config.assets, config.asset_root(base));
        info!(root = %loader.root().display(), "Loading assets");
        cold_start(&gate, &loader, renderer, fps).await
    };

    println!("timeline:");
    for transition in &run.timeline {
        println!("  {transition}");
    }
    println!(
        "frames: {} splash, {} main ({} layout passes)",
        run.renderer.splash_frames, run.renderer.main_frames, run.renderer.layout_passes
    );

    if splash.hide_count() != 1 {
        anyhow::bail!("platform splash hidden {} times", splash.hide_count());
    }
    let total = run
        .timeline
        .last()
        .map(|t| t.at)
        .unwrap_or(Duration::ZERO);
    info!(total_ms = total.as_millis() as u64, "Hand-off complete");
    Ok(())
}

fn cmd_config(path: &Path, preset: Option<Preset>) -> Result<()> {
    let config = load_config(path, preset)?;
    config.readiness().context("Invalid startup timing")?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}
