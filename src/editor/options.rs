//! Inbound editor options.

use crate::config::Config;
use crate::draw::{Color, GuideStyle, ScaleLimits, WHITE};

/// Options a host hands to the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorOptions {
    /// Painted stroke radius in logical pixels; strokes are twice this wide.
    pub brush_radius: f64,
    /// Lazy radius (guide string length) in logical pixels.
    pub lazy_radius: f64,
    /// Drawing lag on a 0-100 scale; divided by 100 while the pointer is held.
    pub friction: f64,
    /// Opaque value; changing it clears the mask.
    pub clear_signal: u64,
    /// Lazy smoothing on/off.
    pub enabled: bool,
    /// Paint color for strokes.
    pub mask_color: Color,
    pub guide_style: GuideStyle,
    pub scale_limits: ScaleLimits,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            brush_radius: 27.5,
            lazy_radius: 10.0,
            friction: 10.0,
            clear_signal: 0,
            enabled: true,
            mask_color: WHITE,
            guide_style: GuideStyle::default(),
            scale_limits: ScaleLimits::default(),
        }
    }
}

impl EditorOptions {
    /// Builds options from a validated configuration.
    pub fn from_config(config: &Config) -> Self {
        let mask_color = config.style.mask_color.to_color();
        let ink = config.style.ink_color.to_color();

        Self {
            brush_radius: config.brush.brush_radius,
            lazy_radius: config.brush.lazy_radius,
            friction: config.brush.friction,
            clear_signal: 0,
            enabled: config.brush.enabled,
            mask_color,
            guide_style: GuideStyle {
                brush_fill: mask_color,
                pointer_dot: ink,
                guide_tensioned: ink,
                guide_idle: ink.with_alpha(config.style.idle_guide_alpha),
                brush_dot: config.style.brush_dot_color.to_color(),
            },
            scale_limits: ScaleLimits {
                draw_max_scale: config.surface.draw_max_scale,
                interface_max_scale: config.surface.interface_max_scale,
            },
        }
    }

    /// Friction coefficient for the brush model while the pointer is held.
    pub fn drawing_friction(&self) -> f64 {
        self.friction / 100.0
    }
}
