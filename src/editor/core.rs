//! Editor state shared by the frame loop and the host-facing setters.

use std::io::Write;

use log::{debug, info, warn};

use super::options::EditorOptions;
use super::state::{DrawingState, EditorPhase};
use crate::brush::{LazyBrush, UpdateOptions};
use crate::draw::{GuideRenderer, MaskImage, SurfaceHealth, SurfaceRole, SurfaceSet};
use crate::error::EditorError;
use crate::input::{PointerEvent, PointerTracker};
use crate::util::Point;

/// The mask painting editor.
///
/// Owns the three drawing surfaces, the lazy brush, the pointer tracker and
/// the stroke state machine. Pointer events only touch the tracker; all
/// drawing happens in [`Editor::tick`].
pub struct Editor {
    pub(super) surfaces: SurfaceSet,
    pub(super) brush: LazyBrush,
    pub(super) tracker: PointerTracker,
    pub(super) state: DrawingState,
    pub(super) guide: GuideRenderer,
    pub(super) options: EditorOptions,
    pub(super) device_pixel_ratio: f64,
    pub(super) frames: u64,
}

impl Editor {
    /// Creates an editor without surfaces. Frames are no-ops until [`Editor::resize`].
    pub fn unmounted(options: EditorOptions) -> Self {
        let mut brush = LazyBrush::new(Point::default(), options.lazy_radius);
        if !options.enabled {
            brush.disable();
        }

        Self {
            surfaces: SurfaceSet::new(options.scale_limits),
            brush,
            tracker: PointerTracker::new(Point::default()),
            state: DrawingState::Idle,
            guide: GuideRenderer::new(options.guide_style, options.brush_radius),
            options,
            device_pixel_ratio: 1.0,
            frames: 0,
        }
    }

    /// Creates an editor and mounts surfaces at the given logical size.
    pub fn new(
        options: EditorOptions,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    ) -> Result<Self, EditorError> {
        let mut editor = Self::unmounted(options);
        editor.resize(width, height, device_pixel_ratio)?;
        Ok(editor)
    }

    /// Reallocates all surfaces for a new container size.
    ///
    /// The mask is cleared and any in-progress stroke is abandoned. When the
    /// pointer is not held, pointer and brush are recentred on the canvas.
    pub fn resize(
        &mut self,
        width: u32,
        height: u32,
        device_pixel_ratio: f64,
    ) -> Result<(), EditorError> {
        self.surfaces.resize(width, height, device_pixel_ratio)?;
        self.device_pixel_ratio = device_pixel_ratio;

        if self.state.stroke().is_some() {
            debug!("Resize dropped the stroke in progress");
            self.state = DrawingState::Pressed;
        }

        if !self.tracker.is_pressed() {
            let center = Point::new(f64::from(width) / 2.0, f64::from(height) / 2.0);
            self.tracker.place(center);
            self.brush.update(center, UpdateOptions::snap());
        }
        Ok(())
    }

    /// Feeds a pointer event. Cheap; the next frame acts on it.
    pub fn pointer_event(&mut self, event: PointerEvent) {
        self.tracker.handle(event);
    }

    /// Sets the container's viewport offset used to localize client coordinates.
    pub fn set_container_origin(&mut self, x: f64, y: f64) {
        self.tracker.set_origin(x, y);
    }

    /// Applies a new clear signal. A changed value erases the mask.
    pub fn set_clear_signal(&mut self, signal: u64) {
        if signal == self.options.clear_signal {
            return;
        }
        self.options.clear_signal = signal;
        self.clear();
    }

    /// Erases transient and persistent layers.
    pub fn clear(&mut self) {
        info!("Clearing mask");
        self.surfaces.guarded(SurfaceRole::Persistent, SurfaceSet::clear_all);
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.options.enabled = enabled;
        if enabled {
            self.brush.enable();
        } else {
            self.brush.disable();
        }
    }

    pub fn set_lazy_radius(&mut self, radius: f64) -> bool {
        let accepted = self.brush.set_radius(radius);
        if accepted {
            self.options.lazy_radius = radius;
        }
        accepted
    }

    /// Changes the painted stroke radius. Non-positive values are ignored.
    pub fn set_brush_radius(&mut self, radius: f64) -> bool {
        if !radius.is_finite() || radius <= 0.0 {
            warn!("Ignoring invalid brush radius {radius}");
            return false;
        }
        self.options.brush_radius = radius;
        self.guide.set_brush_radius(radius);
        true
    }

    /// Changes friction (0-100 scale). Values outside the range are clamped.
    pub fn set_friction(&mut self, friction: f64) {
        if friction.is_nan() {
            warn!("Ignoring NaN friction");
            return;
        }
        self.options.friction = friction.clamp(0.0, 100.0);
    }

    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    pub fn phase(&self) -> EditorPhase {
        self.state.phase()
    }

    /// Number of points in the stroke in progress, if any.
    pub fn stroke_len(&self) -> Option<usize> {
        self.state.stroke().map(|stroke| stroke.len())
    }

    pub fn brush(&self) -> &LazyBrush {
        &self.brush
    }

    pub fn pointer(&self) -> Point {
        self.tracker.sample()
    }

    pub fn is_mounted(&self) -> bool {
        self.surfaces.logical_size() != (0, 0)
    }

    pub fn logical_size(&self) -> (u32, u32) {
        self.surfaces.logical_size()
    }

    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// Handle over the persistent mask, if mounted.
    pub fn mask(&self) -> Option<MaskImage> {
        self.surfaces.mask()
    }

    /// Encodes the mask as PNG into `stream`.
    pub fn write_mask_png<W: Write>(&self, stream: &mut W) -> Result<(), EditorError> {
        let surface = self.surfaces.require(SurfaceRole::Persistent)?;
        surface.mask().write_png(stream)?;
        debug!(
            "Exported {}x{} mask",
            surface.physical_width(),
            surface.physical_height()
        );
        Ok(())
    }

    /// Read-only view of the interface layer, for hosts that composite it.
    pub fn interface_image(&self) -> Option<MaskImage> {
        self.surfaces
            .surface(SurfaceRole::Interface)
            .map(|surface| surface.mask())
    }

    pub fn health(&self) -> &SurfaceHealth {
        self.surfaces.health()
    }

    pub fn frame_count(&self) -> u64 {
        self.frames
    }
}
