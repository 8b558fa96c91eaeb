//! Path helpers missing from Cairo's API.

use crate::util::Point;

/// Appends a quadratic Bézier from `from` through control `ctrl` to `to`.
///
/// Cairo only has cubic curves, so the control point is elevated to two
/// cubic controls at 2/3 of the way towards it from each end.
pub fn quad_to(ctx: &cairo::Context, from: Point, ctrl: Point, to: Point) {
    let c1 = from.lerp(ctrl, 2.0 / 3.0);
    let c2 = to.lerp(ctrl, 2.0 / 3.0);
    ctx.curve_to(c1.x, c1.y, c2.x, c2.y, to.x, to.y);
}
