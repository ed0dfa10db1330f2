//! Render settings: optional JSON file merged with command-line flags.

use crate::cli::Args;
use crate::scenes::SceneKind;
use anyhow::{ensure, Context, Result};
use ember_renderer::RenderConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

const DEFAULT_WIDTH: u32 = 400;
const DEFAULT_HEIGHT: u32 = 400;
const DEFAULT_OUTPUT: &str = "ember.ppm";
/// Upper bound on the 8-bit RGB output, three bytes per pixel.
const MAX_IMAGE_BYTES: u64 = u32::MAX as u64;

/// Contents of a settings file. Every field is optional.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub samples_per_pixel: Option<u32>,
    pub max_depth: Option<u32>,
    pub seed: Option<u64>,
    pub scene: Option<SceneKind>,
    pub output: Option<PathBuf>,
}

impl Settings {
    /// Read settings from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read settings file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid settings in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}

/// Fully resolved description of one render.
#[derive(Debug, Clone)]
pub struct RenderJob {
    pub scene: SceneKind,
    pub width: u32,
    pub height: u32,
    pub output: PathBuf,
    pub config: RenderConfig,
}

impl RenderJob {
    /// Merge flags over file settings over defaults.
    pub fn resolve(args: &Args, settings: &Settings) -> Result<Self> {
        let defaults = RenderConfig::default();

        let width = args.width.or(settings.width).unwrap_or(DEFAULT_WIDTH);
        let height = args.height.or(settings.height).unwrap_or(DEFAULT_HEIGHT);
        ensure!(width > 0 && height > 0, "image size must be non-zero, got {width}x{height}");
        ensure!(
            width as u64 * height as u64 * 3 <= MAX_IMAGE_BYTES,
            "image size {width}x{height} is too large"
        );

        let samples_per_pixel = args
            .samples_per_pixel
            .or(settings.samples_per_pixel)
            .unwrap_or(defaults.samples_per_pixel);
        ensure!(samples_per_pixel > 0, "samples per pixel must be at least 1");

        let config = RenderConfig {
            samples_per_pixel,
            max_depth: args.max_depth.or(settings.max_depth).unwrap_or(defaults.max_depth),
            seed: args.seed.or(settings.seed).unwrap_or(defaults.seed),
            ..defaults
        };

        Ok(Self {
            scene: args.scene.or(settings.scene).unwrap_or_default(),
            width,
            height,
            output: args
                .output
                .clone()
                .or_else(|| settings.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            config,
        })
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}
