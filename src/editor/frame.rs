use log::{debug, trace};

use super::core::Editor;
use super::state::DrawingState;
use crate::brush::UpdateOptions;
use crate::draw::{StrokeBuffer, SurfaceRole, SurfaceSet, rasterize};

impl Editor {
    /// Runs one frame.
    ///
    /// Order within a frame:
    /// 1. move the brush toward the latest pointer sample
    /// 2. advance the stroke state machine, growing or finishing the stroke
    /// 3. settle the pointer onto the brush after a touch release
    /// 4. redraw the interface layer
    ///
    /// Surface failures are logged and recorded in [`Editor::health`];
    /// a frame never aborts the loop.
    pub fn tick(&mut self) {
        self.frames += 1;
        let pressed = self.tracker.is_pressed();

        if self.tracker.take_sync_request() {
            trace!("Snapping brush to touch point");
            self.brush.update(self.tracker.sample(), UpdateOptions::snap());
        } else {
            let friction = if pressed || self.state.is_holding() {
                self.options.drawing_friction()
            } else {
                1.0
            };
            self.brush
                .update(self.tracker.sample(), UpdateOptions::with_friction(friction));
        }

        self.advance_state(pressed);

        if !pressed && self.tracker.take_settle_request() {
            let parked = self.brush.position();
            self.tracker.place(parked);
            self.brush.update(parked, UpdateOptions::snap());
        }

        self.draw_interface();
    }

    fn advance_state(&mut self, pressed: bool) {
        let state = match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle if pressed => DrawingState::Pressed,
            other => other,
        };

        self.state = match state {
            DrawingState::Pressed if !pressed => DrawingState::Idle,
            DrawingState::Pressed if self.brush.has_moved() || !self.brush.is_enabled() => {
                debug!("Stroke started at {:?}", self.brush.position());
                DrawingState::Drawing {
                    stroke: StrokeBuffer::new(self.brush.position()),
                }
            }
            DrawingState::Drawing { stroke } if !pressed => {
                self.finish_stroke(&stroke);
                DrawingState::Idle
            }
            DrawingState::Drawing { mut stroke } => {
                if self.brush.has_moved() {
                    stroke.append_point(self.brush.position());
                    self.render_stroke(&stroke);
                }
                DrawingState::Drawing { stroke }
            }
            other => other,
        };
    }

    /// Clears the transient layer and redraws the whole stroke onto it.
    fn render_stroke(&mut self, stroke: &StrokeBuffer) {
        if stroke.len() < 2 {
            return;
        }
        let line_width = self.options.brush_radius * 2.0;
        let color = self.options.mask_color;

        self.surfaces.guarded(SurfaceRole::Transient, |surfaces| {
            let transient = surfaces.require(SurfaceRole::Transient)?;
            transient.clear()?;
            let ctx = transient.context()?;
            rasterize(&ctx, stroke.points(), line_width, color)
        });
    }

    /// Final rasterization of a released stroke, then merge into the mask.
    fn finish_stroke(&mut self, stroke: &StrokeBuffer) {
        self.render_stroke(stroke);
        if stroke.len() < 2 {
            debug!("Stroke released without movement, nothing to merge");
            return;
        }
        self.surfaces.guarded(
            SurfaceRole::Persistent,
            SurfaceSet::merge_transient_into_persistent,
        );
        debug!("Stroke of {} points merged", stroke.len());
    }

    fn draw_interface(&mut self) {
        let brush = self.brush.position();
        let pointer = self.brush.pointer();
        let radius = self.brush.radius();
        let smoothing = self.brush.is_enabled();
        let guide = &self.guide;

        self.surfaces.guarded(SurfaceRole::Interface, |surfaces| {
            let interface = surfaces.require(SurfaceRole::Interface)?;
            interface.clear()?;
            let ctx = interface.context()?;
            guide.render(&ctx, brush, pointer, radius, smoothing)
        });
    }
}
