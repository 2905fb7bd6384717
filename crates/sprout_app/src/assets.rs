//! Filesystem asset loader
//!
//! Reads the fonts and images listed in `[assets]` and checks that each one
//! actually decodes, so a truncated font is reported before first paint rather
//! than surfacing as missing glyphs later.

use std::path::{Path, PathBuf};

use sprout_core::{AssetLoadFailure, AssetLoader, AssetOutcome};
use tokio::time::Instant;

use crate::config::AssetsSection;

/// Loads required fonts and images from an asset root
#[derive(Debug, Clone, Default)]
pub struct FsAssetLoader {
    root: PathBuf,
    fonts: Vec<String>,
    images: Vec<String>,
}

impl FsAssetLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fonts: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Build from the `[assets]` section with an already-resolved root
    pub fn from_config(section: &AssetsSection, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            fonts: section.fonts.clone(),
            images: section.images.clone(),
        }
    }

    /// Require a font (builder pattern)
    pub fn font(mut self, path: impl Into<String>) -> Self {
        self.fonts.push(path.into());
        self
    }

    /// Require an image (builder pattern)
    pub fn image(mut self, path: impl Into<String>) -> Self {
        self.images.push(path.into());
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn read(&self, rel: &str) -> Result<Vec<u8>, AssetLoadFailure> {
        let path = self.root.join(rel);
        tokio::fs::read(&path)
            .await
            .map_err(|err| AssetLoadFailure::from_io(path.display().to_string(), &err))
    }

    async fn load_font(&self, rel: &str) -> AssetOutcome {
        let data = self.read(rel).await?;
        let face = ttf_parser::Face::parse(&data, 0).map_err(|e| AssetLoadFailure::Decode {
            path: rel.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(
            font = rel,
            glyphs = face.number_of_glyphs(),
            "FsAssetLoader: font ok"
        );
        Ok(())
    }

    async fn load_image(&self, rel: &str) -> AssetOutcome {
        let data = self.read(rel).await?;
        let img = image::load_from_memory(&data).map_err(|e| AssetLoadFailure::Decode {
            path: rel.to_string(),
            reason: e.to_string(),
        })?;
        tracing::debug!(
            image = rel,
            width = img.width(),
            height = img.height(),
            "FsAssetLoader: image ok"
        );
        Ok(())
    }
}

impl AssetLoader for FsAssetLoader {
    async fn load(&self) -> AssetOutcome {
        let started = Instant::now();

        for font in &self.fonts {
            self.load_font(font).await?;
        }
        for image in &self.images {
            self.load_image(image).await?;
        }

        tracing::info!(
            fonts = self.fonts.len(),
            images = self.images.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "FsAssetLoader: assets loaded"
        );
        Ok(())
    }
}
