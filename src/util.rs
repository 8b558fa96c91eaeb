//! Utility functions for colors and 2D geometry.
//!
//! This module provides:
//! - Color-name mapping used by the configuration file (constants live in draw::color)
//! - The [`Point`] type shared by input, brush and rasterization code
//! - Axis-aligned [`Rect`] bounds used when inspecting painted pixels

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "white", "black", "ink", "graphite", "red", "green", "blue"
/// - "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "ink" => Some(INK),
        "graphite" => Some(GRAPHITE),
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// A position in logical (canvas-local) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance_to(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(self, other: Point) -> Point {
        Point {
            x: self.x + (other.x - self.x) / 2.0,
            y: self.y + (other.y - self.y) / 2.0,
        }
    }

    /// Linear interpolation towards `other` (`t = 0` stays, `t = 1` arrives).
    pub fn lerp(self, other: Point, t: f64) -> Point {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle in integer pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x - min_x;
        let height = max_y - min_y;
        Self::new(min_x, min_y, width, height)
    }

    /// Returns true if the pixel at `(x, y)` lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_is_halfway() {
        let mid = Point::new(0.0, 0.0).midpoint(Point::new(10.0, -4.0));
        assert_eq!(mid, Point::new(5.0, -2.0));
    }

    #[test]
    fn distance_uses_euclidean_norm() {
        let d = Point::new(1.0, 1.0).distance_to(Point::new(4.0, 5.0));
        assert!((d - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn rect_rejects_empty_area() {
        assert!(Rect::new(0, 0, 0, 10).is_none());
        assert!(Rect::from_min_max(5, 5, 4, 9).is_none());
        let rect = Rect::from_min_max(2, 3, 6, 8).unwrap();
        assert_eq!((rect.width, rect.height), (4, 5));
        assert!(rect.contains(2, 3));
        assert!(!rect.contains(6, 3));
    }

    #[test]
    fn color_names_resolve_case_insensitively() {
        assert_eq!(name_to_color("White").unwrap(), WHITE);
        assert_eq!(name_to_color("INK").unwrap(), INK);
        assert!(name_to_color("chartreuse").is_none());
    }
}
