//! Latest-sample pointer tracking in canvas-local coordinates.

use log::trace;

use super::events::{PointerEvent, PointerPhase};
use crate::util::Point;

/// Canvas-local pointer position. Only the latest one is kept.
pub type PointerSample = Point;

/// Lightweight state mutated by pointer callbacks between frames.
///
/// Everything here is cheap to write; the frame loop reads it and performs
/// all heavier work (brush update, stroke growth, compositing).
#[derive(Debug, Clone)]
pub struct PointerTracker {
    /// Container's top-left corner in viewport coordinates.
    origin: Point,
    sample: PointerSample,
    pressed: bool,
    sync_requested: bool,
    settle_requested: bool,
}

impl PointerTracker {
    pub fn new(initial: PointerSample) -> Self {
        Self {
            origin: Point::default(),
            sample: initial,
            pressed: false,
            sync_requested: false,
            settle_requested: false,
        }
    }

    /// Updates the container origin used to localize client coordinates.
    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = Point::new(x, y);
    }

    /// Records a move in viewport coordinates.
    ///
    /// Negative canvas-local values are clamped to zero; values beyond the
    /// canvas are kept and simply draw outside the visible area.
    pub fn on_move(&mut self, client_x: f64, client_y: f64) {
        self.sample = Point::new(
            (client_x - self.origin.x).max(0.0),
            (client_y - self.origin.y).max(0.0),
        );
    }

    pub fn on_press(&mut self) {
        self.pressed = true;
    }

    pub fn on_release(&mut self) {
        self.pressed = false;
    }

    /// Applies a unified mouse/touch event.
    pub fn handle(&mut self, event: PointerEvent) {
        trace!("{:?} {:?} at ({}, {})", event.source, event.phase, event.client_x, event.client_y);
        match event.phase {
            PointerPhase::Move => self.on_move(event.client_x, event.client_y),
            PointerPhase::Press => {
                self.on_move(event.client_x, event.client_y);
                if !event.source.can_hover() {
                    self.sync_requested = true;
                }
                self.on_press();
            }
            PointerPhase::Release => {
                self.on_release();
                if !event.source.can_hover() {
                    self.settle_requested = true;
                }
            }
        }
    }

    pub fn sample(&self) -> PointerSample {
        self.sample
    }

    /// Moves the sample directly (canvas-local), e.g. to recentre after a resize.
    pub fn place(&mut self, sample: PointerSample) {
        self.sample = sample;
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Returns and clears the request to teleport the brush onto the sample.
    pub fn take_sync_request(&mut self) -> bool {
        std::mem::take(&mut self.sync_requested)
    }

    /// Returns and clears the request to park the sample on the brush.
    pub fn take_settle_request(&mut self) -> bool {
        std::mem::take(&mut self.settle_requested)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localizes_against_container_origin() {
        let mut tracker = PointerTracker::new(Point::default());
        tracker.set_origin(100.0, 50.0);
        tracker.on_move(130.0, 75.5);
        assert_eq!(tracker.sample(), Point::new(30.0, 25.5));
    }

    #[test]
    fn clamps_negative_but_keeps_far_coordinates() {
        let mut tracker = PointerTracker::new(Point::default());
        tracker.set_origin(10.0, 10.0);
        tracker.on_move(0.0, 5000.0);
        assert_eq!(tracker.sample(), Point::new(0.0, 4990.0));
    }

    #[test]
    fn mouse_press_does_not_request_sync() {
        let mut tracker = PointerTracker::new(Point::default());
        tracker.handle(PointerEvent::mouse(PointerPhase::Press, 4.0, 4.0));
        assert!(tracker.is_pressed());
        assert!(!tracker.take_sync_request());

        tracker.handle(PointerEvent::mouse(PointerPhase::Release, 4.0, 4.0));
        assert!(!tracker.is_pressed());
        assert!(!tracker.take_settle_request());
    }

    #[test]
    fn touch_requests_sync_and_settle_once() {
        let mut tracker = PointerTracker::new(Point::default());
        tracker.handle(PointerEvent::touch(PointerPhase::Press, 12.0, 8.0));
        assert_eq!(tracker.sample(), Point::new(12.0, 8.0));
        assert!(tracker.take_sync_request());
        assert!(!tracker.take_sync_request());

        tracker.handle(PointerEvent::touch(PointerPhase::Release, 12.0, 8.0));
        assert!(tracker.take_settle_request());
        assert!(!tracker.take_settle_request());
    }
}
