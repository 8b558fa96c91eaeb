//! RGBA color type and predefined color constants.

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use lazymask::draw::Color;
/// let white = Color { r: 1.0, g: 1.0, b: 1.0, a: 1.0 };
/// let faint = Color::new(0.0, 0.0, 0.0, 0.3);
/// assert!(faint.a < white.a);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub const fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color from 0-255 channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
            a: 1.0,
        }
    }

    /// Returns the same color with a different alpha.
    pub const fn with_alpha(self, a: f64) -> Self {
        Self { a, ..self }
    }

    /// Installs this color as the context's source.
    pub fn apply(&self, ctx: &cairo::Context) {
        ctx.set_source_rgba(self.r, self.g, self.b, self.a);
    }
}

// ============================================================================
// Predefined Color Constants
// ============================================================================

/// Mask paint and brush footprint color.
pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Pure black.
pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);

/// Near-black used for the pointer dot and the tensioned guide (#0a0302).
pub const INK: Color = Color::new(10.0 / 255.0, 3.0 / 255.0, 2.0 / 255.0, 1.0);

/// Dark grey used for the brush centre dot (#222222).
pub const GRAPHITE: Color = Color::new(34.0 / 255.0, 34.0 / 255.0, 34.0 / 255.0, 1.0);

pub const RED: Color = Color::new(1.0, 0.0, 0.0, 1.0);

pub const GREEN: Color = Color::new(0.0, 1.0, 0.0, 1.0);

pub const BLUE: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Fully transparent color
pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb8_conversion_scales_to_unit_range() {
        let c = Color::from_rgb8(255, 0, 51);
        assert_eq!(c.r, 1.0);
        assert_eq!(c.g, 0.0);
        assert!((c.b - 0.2).abs() < 1e-9);
        assert_eq!(c.a, 1.0);
    }

    #[test]
    fn with_alpha_keeps_channels() {
        let c = BLACK.with_alpha(0.3);
        assert_eq!((c.r, c.g, c.b, c.a), (0.0, 0.0, 0.0, 0.3));
    }
}
