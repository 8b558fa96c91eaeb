//! Stroke buffering and midpoint-smoothed rasterization.

use super::color::Color;
use super::path::quad_to;
use crate::error::SurfaceError;
use crate::util::Point;

/// Brush positions collected for the stroke in progress.
///
/// A buffer only exists while a stroke is being drawn; the editor drops it on
/// release instead of clearing it.
#[derive(Debug, Clone)]
pub struct StrokeBuffer {
    points: Vec<Point>,
}

impl StrokeBuffer {
    /// Starts a stroke at `first`.
    pub fn new(first: Point) -> Self {
        Self {
            points: vec![first],
        }
    }

    pub fn append_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Renders `points` as one smooth stroke.
///
/// Each adjacent pair contributes a quadratic segment that uses the earlier
/// raw point as control and their midpoint as end; the path then finishes
/// with a straight segment to the last raw point. Needs at least two points.
pub fn rasterize(
    ctx: &cairo::Context,
    points: &[Point],
    line_width: f64,
    color: Color,
) -> Result<(), SurfaceError> {
    if points.len() < 2 {
        return Err(SurfaceError::DegenerateGeometry(points.len()));
    }

    color.apply(ctx);
    ctx.set_line_width(line_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.new_path();
    let mut current = points[0];
    ctx.move_to(current.x, current.y);

    for pair in points.windows(2) {
        let mid = pair[0].midpoint(pair[1]);
        quad_to(ctx, current, pair[0], mid);
        current = mid;
    }

    let last = points[points.len() - 1];
    ctx.line_to(last.x, last.y);
    ctx.stroke()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{Surface, SurfaceRole, WHITE};

    fn surface(width: u32, height: u32, scale: f64) -> Surface {
        Surface::new(SurfaceRole::Transient, width, height, scale, 2.0).unwrap()
    }

    #[test]
    fn single_point_is_degenerate() {
        let s = surface(10, 10, 1.0);
        let ctx = s.context().unwrap();
        let result = rasterize(&ctx, &[Point::new(1.0, 1.0)], 4.0, WHITE);
        assert!(matches!(result, Err(SurfaceError::DegenerateGeometry(1))));
        drop(ctx);
        assert_eq!(s.mask().painted_pixels().unwrap(), 0);
    }

    #[test]
    fn stroke_covers_points_without_gaps() {
        let radius = 5.0;
        let offset = 30.0;
        let raw = [(0.0, 0.0), (10.0, 0.0), (20.0, 10.0)];
        let points: Vec<Point> = raw
            .iter()
            .map(|&(x, y)| Point::new(x + offset, y + offset))
            .collect();

        let s = surface(80, 80, 1.0);
        let ctx = s.context().unwrap();
        rasterize(&ctx, &points, radius * 2.0, WHITE).unwrap();
        drop(ctx);

        let mask = s.mask();
        let bounds = mask.painted_bounds().unwrap().expect("stroke painted");
        // Every point expanded by the brush radius lies inside the painted box.
        for p in &points {
            assert!(f64::from(bounds.x) <= p.x - radius + 1.0);
            assert!(f64::from(bounds.y) <= p.y - radius + 1.0);
            assert!(f64::from(bounds.x + bounds.width) >= p.x + radius - 1.0);
            assert!(f64::from(bounds.y + bounds.height) >= p.y + radius - 1.0);
        }

        // Walk each raw segment; every sample must be painted.
        for pair in points.windows(2) {
            for step in 0..=20 {
                let p = pair[0].lerp(pair[1], f64::from(step) / 20.0);
                assert!(
                    mask.alpha_at(p.x, p.y).unwrap() > 0,
                    "gap at ({}, {})",
                    p.x,
                    p.y
                );
            }
        }
    }

    #[test]
    fn stroke_lands_at_same_logical_spot_at_any_scale() {
        let points = [Point::new(10.0, 10.0), Point::new(30.0, 10.0)];
        let mut boxes = Vec::new();
        for scale in [1.0, 2.0] {
            let s = surface(50, 30, scale);
            let ctx = s.context().unwrap();
            rasterize(&ctx, &points, 6.0, WHITE).unwrap();
            drop(ctx);
            boxes.push(s.mask().painted_bounds().unwrap().unwrap());
        }
        // Backing resolution differs; placement may only differ by edge antialiasing.
        let (a, b) = (boxes[0], boxes[1]);
        assert!((a.x - b.x).abs() <= 1);
        assert!((a.y - b.y).abs() <= 1);
        assert!((a.width - b.width).abs() <= 2);
        assert!((a.height - b.height).abs() <= 2);
        assert!((a.x - 7).abs() <= 1 && (a.y - 7).abs() <= 1);
    }

    #[test]
    fn buffer_keeps_insertion_order() {
        let mut buffer = StrokeBuffer::new(Point::new(0.0, 0.0));
        buffer.append_point(Point::new(1.0, 0.0));
        buffer.append_point(Point::new(2.0, 0.0));
        assert_eq!(buffer.len(), 3);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.points()[2], Point::new(2.0, 0.0));
    }
}
