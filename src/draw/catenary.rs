//! Hanging-chain curve between two points, used for the guide string.
//!
//! A chain of fixed length hangs between the brush and the pointer. When the
//! points are at least a chain length apart the chain is taut (a straight
//! segment); otherwise it sags along `y = a·cosh((x − ox)/a) + oy`.

use super::path::quad_to;
use crate::util::Point;

/// Samples taken along a sagging chain.
const SEGMENTS: usize = 50;
/// Newton iterations for the catenary parameter.
const ITERATION_LIMIT: usize = 6;
const EPSILON: f64 = 1e-6;
/// Below this horizontal separation the chain is treated as vertical.
const MIN_HORIZONTAL: f64 = 0.01;

/// Geometry of the guide string, ready to be traced onto a context.
#[derive(Debug, Clone, PartialEq)]
pub enum GuideCurve {
    /// Taut chain.
    Straight { start: Point, end: Point },
    /// Slack chain as chained quadratic segments `(control, end)`.
    Sag {
        start: Point,
        segments: Vec<(Point, Point)>,
    },
}

impl GuideCurve {
    /// Appends the curve to the context's current path.
    pub fn trace(&self, ctx: &cairo::Context) {
        match self {
            GuideCurve::Straight { start, end } => {
                ctx.move_to(start.x, start.y);
                ctx.line_to(end.x, end.y);
            }
            GuideCurve::Sag { start, segments } => {
                ctx.move_to(start.x, start.y);
                let mut current = *start;
                for &(ctrl, end) in segments {
                    quad_to(ctx, current, ctrl, end);
                    current = end;
                }
            }
        }
    }

    /// Lowest point on screen (largest y) among the curve's defining points.
    pub fn lowest_y(&self) -> f64 {
        match self {
            GuideCurve::Straight { start, end } => start.y.max(end.y),
            GuideCurve::Sag { start, segments } => segments
                .iter()
                .map(|(_, end)| end.y)
                .fold(start.y, f64::max),
        }
    }
}

/// Computes the chain of `chain_length` hanging between `a` and `b`.
pub fn catenary_curve(a: Point, b: Point, chain_length: f64) -> GuideCurve {
    let (p1, p2) = if a.x > b.x { (b, a) } else { (a, b) };

    if p1.distance_to(p2) >= chain_length {
        return GuideCurve::Straight { start: p1, end: p2 };
    }

    let h = p2.x - p1.x;
    if h <= MIN_HORIZONTAL {
        let ctrl = Point::new((p1.x + p2.x) * 0.5, (p1.y + p2.y + chain_length) * 0.5);
        return GuideCurve::Sag {
            start: p1,
            segments: vec![(ctrl, p2)],
        };
    }

    let v = p2.y - p1.y;
    // Screen y grows downwards, so the parameter is negated to sag towards +y.
    let a = -catenary_parameter(h, v, chain_length);
    let x = (a * ((chain_length + v) / (chain_length - v)).ln() - h) * 0.5;
    let y = a * (x / a).cosh();
    let offset_x = p1.x - x;
    let offset_y = p1.y - y;

    let sample = |px: f64| Point::new(px, a * ((px - offset_x) / a).cosh() + offset_y);

    let mut samples = Vec::with_capacity(SEGMENTS + 1);
    samples.push(sample(p1.x));
    let steps = (SEGMENTS - 1) as f64;
    for i in 0..SEGMENTS - 1 {
        samples.push(sample(p1.x + h * (i as f64 + 0.5) / steps));
    }
    samples.push(sample(p2.x));

    let segments = samples[1..]
        .chunks_exact(2)
        .map(|pair| (pair[0], pair[1]))
        .collect();

    GuideCurve::Sag {
        start: samples[0],
        segments,
    }
}

/// Solves `sinh(x) = m·x` for the catenary with horizontal span `h`,
/// vertical span `v` and arc length `length`; returns `h / (2x)`.
fn catenary_parameter(h: f64, v: f64, length: f64) -> f64 {
    let m = (length * length - v * v).sqrt() / h;
    let mut x = m.acosh() + 1.0;
    let mut prev = -1.0;
    let mut count = 0;

    while (x - prev).abs() > EPSILON && count < ITERATION_LIMIT {
        prev = x;
        x -= (x.sinh() - m * x) / (x.cosh() - m);
        count += 1;
    }

    h / (2.0 * x)
}
