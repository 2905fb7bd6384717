//! Sprout configuration file handling
//!
//! Startup behaviour is configured in `sprout.toml`:
//!
//! ```toml
//! [splash]
//! dwell_ms = 4000
//! background = "#ffffff"
//! logo = "images/logo.png"
//!
//! [intro]
//! opacity_duration_ms = 2000
//! easing = "ease-in-out"
//! spring_tension = 25.0
//! spring_friction = 7.0
//! fps = 60
//! max_duration_ms = 10000
//!
//! [assets]
//! root = "assets"
//! fonts = ["fonts/SpaceMono-Regular.ttf"]
//! images = ["images/logo.png"]
//! ```
//!
//! Every key is optional. A missing file means all defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use sprout_animation::{Easing, IntroConfig, SpringConfig};
use sprout_core::ReadinessConfig;

use crate::error::{Result, SproutError};

/// Conventional config file name
pub const CONFIG_FILE: &str = "sprout.toml";

/// Top-level `sprout.toml`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct SproutConfig {
    pub splash: SplashSection,
    pub intro: IntroSection,
    pub assets: AssetsSection,
}

/// `[splash]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SplashSection {
    /// Minimum splash time once assets are loaded
    pub dwell_ms: u64,
    /// Splash background colour (`#rrggbb`)
    pub background: String,
    /// Logo image, relative to the asset root
    pub logo: String,
}

impl Default for SplashSection {
    fn default() -> Self {
        Self {
            dwell_ms: 4000,
            background: "#ffffff".to_string(),
            logo: "images/logo.png".to_string(),
        }
    }
}

impl SplashSection {
    /// Parse [`background`](Self::background) into RGB
    pub fn background_rgb(&self) -> Result<[u8; 3]> {
        let invalid = || SproutError::ConfigValue {
            key: "splash.background",
            reason: format!("expected #rrggbb, got {:?}", self.background),
        };

        let hex = self.background.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        Ok([channel(0)?, channel(2)?, channel(4)?])
    }
}

/// `[intro]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct IntroSection {
    pub opacity_duration_ms: u64,
    pub easing: Easing,
    /// Origami tension of the scale spring
    pub spring_tension: f32,
    /// Origami friction of the scale spring
    pub spring_friction: f32,
    pub fps: u32,
    pub max_duration_ms: u64,
}

impl Default for IntroSection {
    fn default() -> Self {
        Self {
            opacity_duration_ms: 2000,
            easing: Easing::EaseInOut,
            spring_tension: 25.0,
            spring_friction: 7.0,
            fps: 60,
            max_duration_ms: 10_000,
        }
    }
}

/// `[assets]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct AssetsSection {
    /// Asset root, relative to the directory holding `sprout.toml`
    pub root: PathBuf,
    /// Fonts that must load before the intro starts
    pub fonts: Vec<String>,
    /// Images that must load before the intro starts
    pub images: Vec<String>,
}

impl Default for AssetsSection {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            fonts: vec!["fonts/SpaceMono-Regular.ttf".to_string()],
            images: vec!["images/logo.png".to_string()],
        }
    }
}

/// Named timing presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// 2s dwell, 1.5s fade, tension 20 / friction 6
    Brisk,
    /// 4s dwell, 2s fade, tension 25 / friction 7
    #[default]
    Relaxed,
}

impl SproutConfig {
    /// Load from `path`, falling back to defaults if the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| SproutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Overwrite the timing keys with a preset's values
    pub fn apply_preset(&mut self, preset: Preset) {
        let (dwell_ms, fade_ms, tension, friction) = match preset {
            Preset::Brisk => (2000, 1500, 20.0, 6.0),
            Preset::Relaxed => (4000, 2000, 25.0, 7.0),
        };
        self.splash.dwell_ms = dwell_ms;
        self.intro.opacity_duration_ms = fade_ms;
        self.intro.spring_tension = tension;
        self.intro.spring_friction = friction;
    }

    /// Asset root resolved against `base` (usually the config file's directory)
    pub fn asset_root(&self, base: &Path) -> PathBuf {
        base.join(&self.assets.root)
    }

    /// Validated timing for the readiness gate
    pub fn readiness(&self) -> Result<ReadinessConfig> {
        let intro = &self.intro;
        if intro.fps == 0 {
            return Err(SproutError::ConfigValue {
                key: "intro.fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if intro.max_duration_ms == 0 {
            return Err(SproutError::ConfigValue {
                key: "intro.max_duration_ms",
                reason: "must be positive".to_string(),
            });
        }

        let spring = SpringConfig::from_origami(intro.spring_tension, intro.spring_friction);
        if spring.stiffness.is_nan() || spring.stiffness <= 0.0 {
            return Err(SproutError::ConfigValue {
                key: "intro.spring_tension",
                reason: format!("{} gives a non-positive stiffness", intro.spring_tension),
            });
        }
        if spring.damping.is_nan() || spring.damping < 0.0 {
            return Err(SproutError::ConfigValue {
                key: "intro.spring_friction",
                reason: format!("{} gives a negative damping", intro.spring_friction),
            });
        }

        Ok(ReadinessConfig {
            dwell: Duration::from_millis(self.splash.dwell_ms),
            intro: IntroConfig {
                opacity_duration: Duration::from_millis(intro.opacity_duration_ms),
                opacity_easing: intro.easing,
                scale_spring: spring,
                fps: intro.fps,
                max_duration: Duration::from_millis(intro.max_duration_ms),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_relaxed_preset() {
        let config = SproutConfig::default();
        assert_eq!(config.readiness().unwrap(), ReadinessConfig::relaxed());
    }

    #[test]
    fn test_brisk_preset() {
        let mut config = SproutConfig::default();
        config.apply_preset(Preset::Brisk);
        assert_eq!(config.readiness().unwrap(), ReadinessConfig::brisk());

        config.apply_preset(Preset::Relaxed);
        assert_eq!(config.readiness().unwrap(), ReadinessConfig::relaxed());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SproutConfig::from_toml_str(
            r#"
            [splash]
            dwell_ms = 2500

            [intro]
            easing = "linear"
            "#,
        )
        .unwrap();

        assert_eq!(config.splash.dwell_ms, 2500);
        assert_eq!(config.splash.background, "#ffffff");
        assert_eq!(config.intro.easing, Easing::Linear);
        assert_eq!(config.intro.opacity_duration_ms, 2000);
        assert_eq!(config.assets, AssetsSection::default());

        let readiness = config.readiness().unwrap();
        assert_eq!(readiness.dwell, Duration::from_millis(2500));
    }

    #[test]
    fn test_round_trips_through_toml() {
        let mut config = SproutConfig::default();
        config.apply_preset(Preset::Brisk);
        config.assets.fonts.push("fonts/Inter.ttf".to_string());

        let text = config.to_toml_string().unwrap();
        assert!(text.contains("dwell_ms = 2000"));
        assert_eq!(SproutConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = SproutConfig::from_toml_str("[intro]\nfps = 0")
            .unwrap()
            .readiness()
            .unwrap_err();
        assert!(err.to_string().contains("intro.fps"));

        let err = SproutConfig::from_toml_str("[intro]\nspring_tension = -100.0")
            .unwrap()
            .readiness()
            .unwrap_err();
        assert!(err.to_string().contains("intro.spring_tension"));

        assert!(SproutConfig::from_toml_str("[splash]\ndwell_ms = \"soon\"").is_err());
    }

    #[test]
    fn test_background_rgb() {
        let mut splash = SplashSection::default();
        assert_eq!(splash.background_rgb().unwrap(), [255, 255, 255]);

        splash.background = "#1e90ff".to_string();
        assert_eq!(splash.background_rgb().unwrap(), [0x1e, 0x90, 0xff]);

        splash.background = "white".to_string();
        assert!(splash.background_rgb().is_err());
        splash.background = "#fff".to_string();
        assert!(splash.background_rgb().is_err());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = SproutConfig::load(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, SproutConfig::default());
    }

    #[test]
    fn test_load_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[assets]\nroot = \"static\"\nfonts = []\n").unwrap();

        let config = SproutConfig::load(&path).unwrap();
        assert!(config.assets.fonts.is_empty());
        assert_eq!(config.asset_root(dir.path()), dir.path().join("static"));
    }
}
