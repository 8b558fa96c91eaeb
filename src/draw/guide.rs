//! Interface-layer feedback: brush footprint, pointer dot and guide string.

use super::catenary::catenary_curve;
use super::color::{Color, BLACK, GRAPHITE, INK, WHITE};
use crate::error::SurfaceError;
use crate::util::Point;

/// Pull offsets at or below this are drawn as a slack guide.
pub const SLACK_THRESHOLD: f64 = -0.1;

/// Radius of the dot drawn under the raw pointer.
const POINTER_DOT_RADIUS: f64 = 4.0;
/// Radius of the dot drawn at the brush centre.
const BRUSH_DOT_RADIUS: f64 = 2.0;
const GUIDE_LINE_WIDTH: f64 = 1.5;
const DASH_LENGTH: f64 = 5.0;

/// Colors used on the interface layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuideStyle {
    pub brush_fill: Color,
    pub pointer_dot: Color,
    pub guide_tensioned: Color,
    pub guide_idle: Color,
    pub brush_dot: Color,
}

impl Default for GuideStyle {
    fn default() -> Self {
        Self {
            brush_fill: WHITE,
            pointer_dot: INK,
            guide_tensioned: INK,
            guide_idle: BLACK.with_alpha(0.3),
            brush_dot: GRAPHITE,
        }
    }
}

/// How hard the pointer is pulling on the brush.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tension {
    /// `max(distance - radius, SLACK_THRESHOLD)`.
    pub pull_offset: f64,
    /// Scale applied to the dash pattern.
    pub stretch: f64,
}

impl Tension {
    pub fn new(distance: f64, radius: f64) -> Self {
        let pull_offset = (distance - radius).max(SLACK_THRESHOLD);
        Self {
            pull_offset,
            stretch: pull_offset / radius + 1.0,
        }
    }

    pub fn is_tensioned(&self) -> bool {
        self.pull_offset > SLACK_THRESHOLD
    }
}

/// Draws the per-frame pointer feedback. Writes nothing persistent.
#[derive(Debug, Clone)]
pub struct GuideRenderer {
    style: GuideStyle,
    brush_radius: f64,
}

impl GuideRenderer {
    pub fn new(style: GuideStyle, brush_radius: f64) -> Self {
        Self {
            style,
            brush_radius,
        }
    }

    pub fn brush_radius(&self) -> f64 {
        self.brush_radius
    }

    pub fn set_brush_radius(&mut self, brush_radius: f64) {
        self.brush_radius = brush_radius;
    }

    /// Renders onto an already cleared interface context.
    ///
    /// `radius` is the lazy radius, which doubles as the guide string length.
    /// The string is only drawn while smoothing is enabled.
    pub fn render(
        &self,
        ctx: &cairo::Context,
        brush: Point,
        pointer: Point,
        radius: f64,
        smoothing_enabled: bool,
    ) -> Result<(), SurfaceError> {
        fill_dot(ctx, brush, self.brush_radius, self.style.brush_fill)?;
        fill_dot(ctx, pointer, POINTER_DOT_RADIUS, self.style.pointer_dot)?;

        if smoothing_enabled {
            let tension = Tension::new(brush.distance_to(pointer), radius);
            let dash = DASH_LENGTH * tension.stretch.max(0.05);

            ctx.save()?;
            ctx.new_path();
            ctx.set_line_width(GUIDE_LINE_WIDTH);
            ctx.set_line_cap(cairo::LineCap::Round);
            ctx.set_dash(&[dash, dash], 0.0);
            let color = if tension.is_tensioned() {
                self.style.guide_tensioned
            } else {
                self.style.guide_idle
            };
            color.apply(ctx);
            catenary_curve(brush, pointer, radius).trace(ctx);
            let stroked = ctx.stroke();
            ctx.restore()?;
            stroked?;
        }

        fill_dot(ctx, brush, BRUSH_DOT_RADIUS, self.style.brush_dot)
    }
}

fn fill_dot(
    ctx: &cairo::Context,
    center: Point,
    radius: f64,
    color: Color,
) -> Result<(), SurfaceError> {
    ctx.new_path();
    color.apply(ctx);
    ctx.arc(center.x, center.y, radius, 0.0, std::f64::consts::PI * 2.0);
    ctx.fill()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Surface, SurfaceRole};

    #[test]
    fn slack_when_pointer_within_radius() {
        let tension = Tension::new(3.0, 10.0);
        assert_eq!(tension.pull_offset, SLACK_THRESHOLD);
        assert!(!tension.is_tensioned());
        assert!((tension.stretch - 0.99).abs() < 1e-9);
    }

    #[test]
    fn tensioned_when_pulled_to_radius() {
        let tension = Tension::new(10.0, 10.0);
        assert!(tension.is_tensioned());
        assert_eq!(tension.stretch, 1.0);

        let stretched = Tension::new(15.0, 10.0);
        assert_eq!(stretched.stretch, 1.5);
    }

    #[test]
    fn render_paints_indicators() {
        let surface = Surface::new(SurfaceRole::Interface, 100, 100, 1.0, 3.0).unwrap();
        let ctx = surface.context().unwrap();
        let renderer = GuideRenderer::new(GuideStyle::default(), 10.0);
        renderer
            .render(&ctx, Point::new(30.0, 30.0), Point::new(70.0, 30.0), 20.0, true)
            .unwrap();
        drop(ctx);

        let mask = surface.mask();
        assert_eq!(mask.alpha_at(30.0, 30.0).unwrap(), 255);
        assert_eq!(mask.alpha_at(70.0, 30.0).unwrap(), 255);
        assert_eq!(mask.alpha_at(5.0, 90.0).unwrap(), 0);
    }

    #[test]
    fn guide_string_hidden_when_smoothing_disabled() {
        let surface = Surface::new(SurfaceRole::Interface, 100, 40, 1.0, 3.0).unwrap();
        let ctx = surface.context().unwrap();
        let renderer = GuideRenderer::new(GuideStyle::default(), 5.0);
        renderer
            .render(&ctx, Point::new(10.0, 20.0), Point::new(90.0, 20.0), 10.0, false)
            .unwrap();
        drop(ctx);

        // Midway between brush and pointer nothing is drawn.
        assert_eq!(surface.mask().alpha_at(50.0, 20.0).unwrap(), 0);
    }
}
