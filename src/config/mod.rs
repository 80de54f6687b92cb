//! Configuration file support for sketchboard.
//!
//! This module handles loading and validating user settings from the
//! configuration file located at `~/.config/sketchboard/config.toml`.
//! Settings include drawing defaults, canvas dimensions, grid appearance,
//! session persistence, and the gallery directory.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ColorSpec, SessionCompression, SessionStorageMode};
pub use types::{CanvasConfig, DrawingConfig, GalleryConfig, GridConfig, SessionConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML
/// file. All fields have sensible defaults and will use those if not
/// specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_thickness = 3.0
/// default_font_size = 24.0
///
/// [canvas]
/// width = 1024
/// height = 640
/// background = "white"
///
/// [grid]
/// enabled = true
/// spacing = 25.0
///
/// [session]
/// enabled = true
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing tool defaults (color, thickness, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas surface settings (dimensions, background)
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Grid overlay settings
    #[serde(default)]
    pub grid: GridConfig,

    /// Session persistence settings
    #[serde(default)]
    pub session: SessionConfig,

    /// Gallery settings for saved rasterizations
    #[serde(default)]
    pub gallery: GalleryConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// This method ensures that user-provided config values won't cause
    /// rendering issues. Invalid values are clamped to the nearest valid
    /// value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `default_thickness`: 1.0 - 20.0
    /// - `default_font_size`: 8.0 - 72.0
    /// - `grid.spacing`: 4.0 - 256.0
    /// - `canvas.width`/`canvas.height`: 64 - 8192
    fn validate_and_clamp(&mut self) {
        // Thickness: 1.0 - 20.0
        if !(1.0..=20.0).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to 1.0-20.0 range",
                self.drawing.default_thickness
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(1.0, 20.0);
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 72.0);
        }

        // Grid spacing: 4.0 - 256.0
        if !(4.0..=256.0).contains(&self.grid.spacing) {
            log::warn!(
                "Invalid grid spacing {:.1}, clamping to 4.0-256.0 range",
                self.grid.spacing
            );
            self.grid.spacing = self.grid.spacing.clamp(4.0, 256.0);
        }

        // Canvas dimensions: 64 - 8192
        if !(64..=8192).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 64-8192 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(64, 8192);
        }
        if !(64..=8192).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 64-8192 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(64, 8192);
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/sketchboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined
    /// (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("sketchboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from file, or returns defaults if not found.
    ///
    /// Attempts to read and parse the config file at
    /// `~/.config/sketchboard/config.toml`. If the file doesn't exist,
    /// returns a Config with default values. All loaded values are validated
    /// and clamped to acceptable ranges.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path.
    ///
    /// Used by the CLI's `--config` flag and by tests.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLACK, WHITE};

    #[test]
    fn defaults_are_sane() {
        let config = Config::default();
        assert_eq!(config.drawing.default_thickness, 3.0);
        assert_eq!(config.drawing.default_color.to_color(), BLACK);
        assert_eq!(config.canvas.background.to_color(), WHITE);
        assert_eq!(config.canvas.width, 1024);
        assert_eq!(config.canvas.height, 640);
        assert!(!config.grid.enabled);
        assert!(!config.session.enabled);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_thickness = 7.5

            [grid]
            enabled = true
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_thickness, 7.5);
        assert!(config.grid.enabled);
        assert_eq!(config.grid.spacing, 25.0);
        assert_eq!(config.drawing.default_font_size, 24.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [drawing]
            default_thickness = 99.0
            default_font_size = 1.0

            [grid]
            spacing = 1.0

            [canvas]
            width = 16
            height = 100000
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.drawing.default_thickness, 20.0);
        assert_eq!(config.drawing.default_font_size, 8.0);
        assert_eq!(config.grid.spacing, 4.0);
        assert_eq!(config.canvas.width, 64);
        assert_eq!(config.canvas.height, 8192);
    }

    #[test]
    fn rgb_background_parses() {
        let config: Config = toml::from_str(
            r#"
            [canvas]
            background = [0, 0, 0]
            "#,
        )
        .unwrap();
        assert_eq!(config.canvas.background.to_color(), BLACK);
    }
}
