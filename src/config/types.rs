//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Brush and smoothing settings.
///
/// These mirror the editor's inbound options; the host may still change them
/// at runtime through the editor API.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BrushConfig {
    /// Painted stroke radius in logical pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_brush_radius")]
    pub brush_radius: f64,

    /// Length of the string between pointer and brush (valid range: 1.0 - 200.0)
    #[serde(default = "default_lazy_radius")]
    pub lazy_radius: f64,

    /// Drawing lag on a 0-100 scale, divided by 100 while the pointer is held
    /// (valid range: 1.0 - 100.0; 100 = no lag)
    #[serde(default = "default_friction")]
    pub friction: f64,

    /// Enable lazy smoothing; when off the brush tracks the pointer 1:1
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            brush_radius: default_brush_radius(),
            lazy_radius: default_lazy_radius(),
            friction: default_friction(),
            enabled: default_enabled(),
        }
    }
}

/// Surface sizing settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Initial container width in logical pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Initial container height in logical pixels
    #[serde(default = "default_height")]
    pub height: u32,

    /// Platform device pixel ratio (valid range: 0.5 - 8.0)
    #[serde(default = "default_device_pixel_ratio")]
    pub device_pixel_ratio: f64,

    /// Scale cap for the stroke and mask surfaces (valid range: 1.0 - 4.0)
    #[serde(default = "default_draw_max_scale")]
    pub draw_max_scale: f64,

    /// Scale cap for the interface surface (valid range: 1.0 - 4.0)
    #[serde(default = "default_interface_max_scale")]
    pub interface_max_scale: f64,

    /// Quiet period before a container resize is applied, in ms (valid range: 0 - 5000)
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            device_pixel_ratio: default_device_pixel_ratio(),
            draw_max_scale: default_draw_max_scale(),
            interface_max_scale: default_interface_max_scale(),
            resize_debounce_ms: default_resize_debounce_ms(),
        }
    }
}

/// Frame clock settings.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct FrameConfig {
    /// Interval between frame callbacks in ms (valid range: 4 - 100)
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

/// Colors for the mask and the interface layer.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StyleConfig {
    /// Mask paint and brush footprint color
    #[serde(default = "default_mask_color")]
    pub mask_color: ColorSpec,

    /// Pointer dot and tensioned guide color
    #[serde(default = "default_ink_color")]
    pub ink_color: ColorSpec,

    /// Opacity of the guide while slack (valid range: 0.0 - 1.0)
    #[serde(default = "default_idle_guide_alpha")]
    pub idle_guide_alpha: f64,

    /// Brush centre dot color
    #[serde(default = "default_brush_dot_color")]
    pub brush_dot_color: ColorSpec,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            mask_color: default_mask_color(),
            ink_color: default_ink_color(),
            idle_guide_alpha: default_idle_guide_alpha(),
            brush_dot_color: default_brush_dot_color(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_brush_radius() -> f64 {
    27.5
}

fn default_lazy_radius() -> f64 {
    10.0
}

fn default_friction() -> f64 {
    10.0
}

fn default_enabled() -> bool {
    true
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    768
}

fn default_device_pixel_ratio() -> f64 {
    1.0
}

fn default_draw_max_scale() -> f64 {
    2.0
}

fn default_interface_max_scale() -> f64 {
    3.0
}

fn default_resize_debounce_ms() -> u64 {
    500
}

fn default_frame_interval_ms() -> u64 {
    16
}

fn default_mask_color() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_ink_color() -> ColorSpec {
    ColorSpec::Name("ink".to_string())
}

fn default_idle_guide_alpha() -> f64 {
    0.3
}

fn default_brush_dot_color() -> ColorSpec {
    ColorSpec::Name("graphite".to_string())
}
