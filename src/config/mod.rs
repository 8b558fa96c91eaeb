//! Configuration file support for lazymask.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/lazymask/config.toml`. Settings include brush and smoothing
//! defaults, surface sizing, the frame clock and interface colors.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{BrushConfig, FrameConfig, StyleConfig, SurfaceConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [brush]
/// brush_radius = 27.5
/// lazy_radius = 10.0
/// friction = 10.0
/// enabled = true
///
/// [surface]
/// device_pixel_ratio = 2.0
/// resize_debounce_ms = 500
///
/// [frame]
/// frame_interval_ms = 16
///
/// [style]
/// mask_color = "white"
/// ink_color = [10, 3, 2]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Brush size and smoothing behaviour
    #[serde(default)]
    pub brush: BrushConfig,

    /// Surface sizing and scale caps
    #[serde(default)]
    pub surface: SurfaceConfig,

    /// Frame clock
    #[serde(default)]
    pub frame: FrameConfig,

    /// Mask and interface colors
    #[serde(default)]
    pub style: StyleConfig,
}

fn clamp_f64(name: &str, value: &mut f64, min: f64, max: f64) {
    if !(min..=max).contains(&*value) {
        log::warn!("Invalid {name} {value:.2}, clamping to {min}-{max} range");
        *value = if value.is_nan() { min } else { (*value).clamp(min, max) };
    }
}

fn clamp_u64(name: &str, value: &mut u64, min: u64, max: u64) {
    if !(min..=max).contains(&*value) {
        log::warn!("Invalid {name} {value}, clamping to {min}-{max} range");
        *value = (*value).clamp(min, max);
    }
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush_radius`, `lazy_radius`: 1.0 - 200.0
    /// - `friction`: 1.0 - 100.0
    /// - `device_pixel_ratio`: 0.5 - 8.0
    /// - `draw_max_scale`, `interface_max_scale`: 1.0 - 4.0
    /// - `width`, `height`: 1 - 16384
    /// - `resize_debounce_ms`: 0 - 5000
    /// - `frame_interval_ms`: 4 - 100
    /// - `idle_guide_alpha`: 0.0 - 1.0
    pub fn validate_and_clamp(&mut self) {
        clamp_f64("brush_radius", &mut self.brush.brush_radius, 1.0, 200.0);
        clamp_f64("lazy_radius", &mut self.brush.lazy_radius, 1.0, 200.0);
        clamp_f64("friction", &mut self.brush.friction, 1.0, 100.0);

        clamp_f64(
            "device_pixel_ratio",
            &mut self.surface.device_pixel_ratio,
            0.5,
            8.0,
        );
        clamp_f64("draw_max_scale", &mut self.surface.draw_max_scale, 1.0, 4.0);
        clamp_f64(
            "interface_max_scale",
            &mut self.surface.interface_max_scale,
            1.0,
            4.0,
        );

        let mut width = u64::from(self.surface.width);
        clamp_u64("width", &mut width, 1, 16384);
        self.surface.width = width as u32;
        let mut height = u64::from(self.surface.height);
        clamp_u64("height", &mut height, 1, 16384);
        self.surface.height = height as u32;

        clamp_u64(
            "resize_debounce_ms",
            &mut self.surface.resize_debounce_ms,
            0,
            5000,
        );
        clamp_u64("frame_interval_ms", &mut self.frame.frame_interval_ms, 4, 100);
        clamp_f64("idle_guide_alpha", &mut self.style.idle_guide_alpha, 0.0, 1.0);
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/lazymask/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("lazymask");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
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

    /// Loads and validates configuration from an explicit path.
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

    /// JSON schema describing the configuration file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_yields_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.brush.brush_radius, 27.5);
        assert_eq!(config.brush.lazy_radius, 10.0);
        assert_eq!(config.brush.friction, 10.0);
        assert!(config.brush.enabled);
        assert_eq!(config.surface.draw_max_scale, 2.0);
        assert_eq!(config.surface.resize_debounce_ms, 500);
        assert_eq!(config.frame.frame_interval_ms, 16);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config: Config = toml::from_str(
            r#"
            [brush]
            brush_radius = 0.0
            friction = 250.0

            [surface]
            width = 0
            draw_max_scale = 9.0

            [frame]
            frame_interval_ms = 1
            "#,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.brush.brush_radius, 1.0);
        assert_eq!(config.brush.friction, 100.0);
        assert_eq!(config.surface.width, 1);
        assert_eq!(config.surface.draw_max_scale, 4.0);
        assert_eq!(config.frame.frame_interval_ms, 4);
    }

    #[test]
    fn load_from_reads_colors_and_validates() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[style]\nmask_color = [255, 0, 0]\n[brush]\nlazy_radius = 500.0"
        )
        .unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.style.mask_color, ColorSpec::Rgb([255, 0, 0]));
        assert_eq!(config.brush.lazy_radius, 200.0);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[brush\nbrush_radius = ").unwrap();
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = serde_json::to_string(&Config::json_schema()).unwrap();
        assert!(schema.contains("brush_radius"));
        assert!(schema.contains("resize_debounce_ms"));
    }
}
