//! Lazy brush physics.

use log::warn;

use crate::util::Point;

/// Movement below this distance (logical px) does not count as "moved".
pub const MOVE_EPSILON: f64 = 1e-3;

/// Smallest radius accepted by [`LazyBrush`].
const MIN_RADIUS: f64 = 1e-3;

/// Per-update tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateOptions {
    /// Fraction of the remaining distance covered when the pointer is within
    /// the radius: 1.0 snaps, smaller values lag. Clamped to `0.0..=1.0`.
    pub friction: f64,
    /// Teleport both pointer and brush to the target, ignoring the radius.
    pub snap: bool,
}

impl Default for UpdateOptions {
    fn default() -> Self {
        Self {
            friction: 1.0,
            snap: false,
        }
    }
}

impl UpdateOptions {
    pub fn with_friction(friction: f64) -> Self {
        Self {
            friction,
            snap: false,
        }
    }

    pub fn snap() -> Self {
        Self {
            friction: 1.0,
            snap: true,
        }
    }
}

/// Brush position that lags the pointer within a radius.
#[derive(Debug, Clone)]
pub struct LazyBrush {
    brush: Point,
    pointer: Point,
    radius: f64,
    enabled: bool,
    last_moved_distance: f64,
}

impl LazyBrush {
    /// Creates an enabled brush resting on `initial`.
    pub fn new(initial: Point, radius: f64) -> Self {
        let radius = if radius.is_finite() && radius >= MIN_RADIUS {
            radius
        } else {
            warn!("Invalid lazy radius {radius}, using {MIN_RADIUS}");
            MIN_RADIUS
        };

        Self {
            brush: initial,
            pointer: initial,
            radius,
            enabled: true,
            last_moved_distance: 0.0,
        }
    }

    /// Moves the pointer to `target` and lets the brush follow.
    ///
    /// Returns whether the brush moved.
    pub fn update(&mut self, target: Point, options: UpdateOptions) -> bool {
        self.pointer = target;

        let next = if options.snap || !self.enabled {
            target
        } else {
            let distance = self.brush.distance_to(target);
            if distance > self.radius {
                // Dragged: keep the brush exactly one radius behind the pointer.
                target.lerp(self.brush, self.radius / distance)
            } else {
                self.brush.lerp(target, options.friction.clamp(0.0, 1.0))
            }
        };

        self.last_moved_distance = self.brush.distance_to(next);
        self.brush = next;
        self.has_moved()
    }

    /// Current brush position.
    pub fn position(&self) -> Point {
        self.brush
    }

    /// Latest target handed to [`LazyBrush::update`].
    pub fn pointer(&self) -> Point {
        self.pointer
    }

    /// Distance between the brush and the latest target.
    pub fn distance_to_target(&self) -> f64 {
        self.brush.distance_to(self.pointer)
    }

    /// Whether the last update moved the brush by more than [`MOVE_EPSILON`].
    pub fn has_moved(&self) -> bool {
        self.last_moved_distance > MOVE_EPSILON
    }

    /// Distance the brush travelled during the last update.
    pub fn last_moved_distance(&self) -> f64 {
        self.last_moved_distance
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Changes the lazy radius. Non-positive or non-finite values are ignored.
    pub fn set_radius(&mut self, radius: f64) -> bool {
        if !radius.is_finite() || radius < MIN_RADIUS {
            warn!("Ignoring invalid lazy radius {radius}");
            return false;
        }
        self.radius = radius;
        true
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn brush_never_trails_beyond_radius() {
        let mut brush = LazyBrush::new(Point::new(0.0, 0.0), 10.0);
        let targets = [
            (50.0, 0.0),
            (53.0, 4.0),
            (-20.0, 80.0),
            (-19.0, 81.0),
            (300.0, -40.0),
            (300.0, -40.0),
            (0.0, 0.0),
        ];

        for (x, y) in targets {
            for friction in [1.0, 0.1, 0.0] {
                brush.update(Point::new(x, y), UpdateOptions::with_friction(friction));
                assert!(
                    brush.distance_to_target() <= brush.radius() + EPS,
                    "brush {:?} too far from ({x}, {y})",
                    brush.position()
                );
            }
        }
    }

    #[test]
    fn dragged_brush_sits_exactly_one_radius_behind() {
        let mut brush = LazyBrush::new(Point::new(0.0, 0.0), 10.0);
        assert!(brush.update(Point::new(30.0, 0.0), UpdateOptions::default()));
        let pos = brush.position();
        assert!((pos.x - 20.0).abs() < EPS);
        assert!(pos.y.abs() < EPS);
        assert!((brush.last_moved_distance() - 20.0).abs() < EPS);
    }

    #[test]
    fn friction_eases_inside_radius() {
        let mut brush = LazyBrush::new(Point::new(0.0, 0.0), 10.0);
        brush.update(Point::new(5.0, 0.0), UpdateOptions::with_friction(0.1));
        assert!((brush.position().x - 0.5).abs() < EPS);

        brush.update(Point::new(5.0, 0.0), UpdateOptions::with_friction(1.0));
        assert_eq!(brush.position(), Point::new(5.0, 0.0));
    }

    #[test]
    fn disabled_brush_tracks_target_exactly() {
        let mut brush = LazyBrush::new(Point::new(0.0, 0.0), 25.0);
        brush.disable();
        assert!(!brush.is_enabled());

        let target = Point::new(3.25, 7.5);
        assert!(brush.update(target, UpdateOptions::with_friction(0.1)));
        assert_eq!(brush.position(), target);
        assert_eq!(brush.distance_to_target(), 0.0);

        brush.enable();
        assert!(brush.is_enabled());
    }

    #[test]
    fn has_moved_is_false_when_resting() {
        let mut brush = LazyBrush::new(Point::new(10.0, 10.0), 10.0);
        assert!(!brush.update(Point::new(10.0, 10.0), UpdateOptions::default()));
        assert!(!brush.has_moved());

        // Inside the radius with zero friction the brush stays put.
        assert!(!brush.update(Point::new(12.0, 10.0), UpdateOptions::with_friction(0.0)));
        assert_eq!(brush.position(), Point::new(10.0, 10.0));
    }

    #[test]
    fn snap_ignores_radius() {
        let mut brush = LazyBrush::new(Point::new(0.0, 0.0), 10.0);
        assert!(brush.update(Point::new(100.0, 100.0), UpdateOptions::snap()));
        assert_eq!(brush.position(), Point::new(100.0, 100.0));
        assert_eq!(brush.pointer(), Point::new(100.0, 100.0));
    }

    #[test]
    fn invalid_radius_is_rejected() {
        let mut brush = LazyBrush::new(Point::default(), 10.0);
        assert!(!brush.set_radius(0.0));
        assert!(!brush.set_radius(-3.0));
        assert!(!brush.set_radius(f64::NAN));
        assert_eq!(brush.radius(), 10.0);
        assert!(brush.set_radius(4.0));
        assert_eq!(brush.radius(), 4.0);

        let clamped = LazyBrush::new(Point::default(), -1.0);
        assert!(clamped.radius() > 0.0);
    }
}
