//! Three-layer surface management (interface, transient stroke, persistent mask).

use log::{debug, info, warn};

use super::surface::{MaskImage, Surface, SurfaceRole};
use crate::error::{EditorError, SurfaceError};

/// Per-surface device scale caps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleLimits {
    /// Cap for the transient and persistent drawing surfaces.
    pub draw_max_scale: f64,
    /// Cap for the interface surface (guide, indicators).
    pub interface_max_scale: f64,
}

impl Default for ScaleLimits {
    fn default() -> Self {
        Self {
            draw_max_scale: 2.0,
            interface_max_scale: 3.0,
        }
    }
}

/// Failure bookkeeping for each surface role.
///
/// The frame loop swallows surface errors; this is how a host can still tell
/// that a layer has stopped rendering.
#[derive(Debug, Clone, Default)]
pub struct SurfaceHealth {
    last_error: [Option<String>; 3],
    failures: [u64; 3],
}

impl SurfaceHealth {
    pub fn record_ok(&mut self, role: SurfaceRole) {
        self.last_error[role.index()] = None;
    }

    pub fn record_failure(&mut self, role: SurfaceRole, err: &SurfaceError) {
        let i = role.index();
        self.failures[i] += 1;
        self.last_error[i] = Some(err.to_string());
    }

    /// True when the most recent operation on every surface succeeded.
    pub fn is_healthy(&self) -> bool {
        self.last_error.iter().all(Option::is_none)
    }

    /// Error from the most recent failed operation on `role`, cleared by the next success.
    pub fn last_error(&self, role: SurfaceRole) -> Option<&str> {
        self.last_error[role.index()].as_deref()
    }

    /// Total failures recorded for `role` since the editor was created.
    pub fn failure_count(&self, role: SurfaceRole) -> u64 {
        self.failures[role.index()]
    }
}

/// Owns the three stacked surfaces and keeps them sized together.
///
/// Surfaces start unmounted (`None`) until the first [`SurfaceSet::resize`];
/// operations on an unmounted surface report
/// [`SurfaceError::ContextUnavailable`].
pub struct SurfaceSet {
    interface: Option<Surface>,
    transient: Option<Surface>,
    persistent: Option<Surface>,
    logical_width: u32,
    logical_height: u32,
    limits: ScaleLimits,
    health: SurfaceHealth,
}

impl SurfaceSet {
    /// Creates an unmounted set.
    pub fn new(limits: ScaleLimits) -> Self {
        Self {
            interface: None,
            transient: None,
            persistent: None,
            logical_width: 0,
            logical_height: 0,
            limits,
            health: SurfaceHealth::default(),
        }
    }

    pub fn logical_size(&self) -> (u32, u32) {
        (self.logical_width, self.logical_height)
    }

    pub fn limits(&self) -> ScaleLimits {
        self.limits
    }

    /// Recreates all three surfaces at the new logical size.
    ///
    /// Recreated surfaces start transparent, so the mask is cleared.
    pub fn resize(
        &mut self,
        logical_width: u32,
        logical_height: u32,
        device_pixel_ratio: f64,
    ) -> Result<(), EditorError> {
        if logical_width == 0 || logical_height == 0 {
            return Err(EditorError::InvalidSize {
                width: logical_width,
                height: logical_height,
            });
        }

        info!(
            "Resizing surfaces to {logical_width}x{logical_height} (device pixel ratio {device_pixel_ratio})"
        );

        self.logical_width = logical_width;
        self.logical_height = logical_height;

        for role in SurfaceRole::ALL {
            let cap = match role {
                SurfaceRole::Interface => self.limits.interface_max_scale,
                SurfaceRole::Transient | SurfaceRole::Persistent => self.limits.draw_max_scale,
            };
            let created = Surface::new(role, logical_width, logical_height, device_pixel_ratio, cap);
            let slot = match created {
                Ok(surface) => {
                    self.health.record_ok(role);
                    Some(surface)
                }
                Err(err) => {
                    warn!("Failed to create {role} surface: {err}");
                    self.health.record_failure(role, &err);
                    None
                }
            };
            *self.slot_mut(role) = slot;
        }

        Ok(())
    }

    fn slot_mut(&mut self, role: SurfaceRole) -> &mut Option<Surface> {
        match role {
            SurfaceRole::Interface => &mut self.interface,
            SurfaceRole::Transient => &mut self.transient,
            SurfaceRole::Persistent => &mut self.persistent,
        }
    }

    /// Returns the surface for `role` if it is mounted.
    pub fn surface(&self, role: SurfaceRole) -> Option<&Surface> {
        match role {
            SurfaceRole::Interface => self.interface.as_ref(),
            SurfaceRole::Transient => self.transient.as_ref(),
            SurfaceRole::Persistent => self.persistent.as_ref(),
        }
    }

    /// Like [`SurfaceSet::surface`] but reports a missing surface as an error.
    pub fn require(&self, role: SurfaceRole) -> Result<&Surface, SurfaceError> {
        self.surface(role)
            .ok_or_else(|| SurfaceError::ContextUnavailable {
                role,
                reason: "surface is not mounted".to_string(),
            })
    }

    /// Paints the transient layer onto the persistent layer at 1:1 logical
    /// coordinates, then clears the transient layer.
    pub fn merge_transient_into_persistent(&self) -> Result<(), SurfaceError> {
        let transient = self.require(SurfaceRole::Transient)?;
        let persistent = self.require(SurfaceRole::Persistent)?;

        let ctx = persistent.context()?;
        // Undo the transient's own scale so its backing store maps onto logical units.
        let scale = transient.device_scale();
        ctx.scale(1.0 / scale, 1.0 / scale);
        ctx.set_source_surface(transient.image(), 0.0, 0.0)?;
        ctx.paint()?;
        drop(ctx);

        transient.clear()?;
        debug!("Merged transient stroke into mask");
        Ok(())
    }

    /// Erases the transient and persistent layers.
    pub fn clear_all(&self) -> Result<(), SurfaceError> {
        self.require(SurfaceRole::Transient)?.clear()?;
        self.require(SurfaceRole::Persistent)?.clear()?;
        Ok(())
    }

    /// Handle over the persistent mask pixels.
    pub fn mask(&self) -> Option<MaskImage> {
        self.persistent.as_ref().map(Surface::mask)
    }

    /// Runs `op` and records its outcome against `role`; failures are logged and swallowed.
    pub fn guarded<T>(
        &mut self,
        role: SurfaceRole,
        op: impl FnOnce(&Self) -> Result<T, SurfaceError>,
    ) -> Option<T> {
        match op(self) {
            Ok(value) => {
                self.health.record_ok(role);
                Some(value)
            }
            Err(err) => {
                debug!("Skipping {role} step this frame: {err}");
                self.health.record_failure(role, &err);
                None
            }
        }
    }

    pub fn health(&self) -> &SurfaceHealth {
        &self.health
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paint_square(set: &SurfaceSet, role: SurfaceRole, x: f64, y: f64, size: f64) {
        let ctx = set.surface(role).unwrap().context().unwrap();
        ctx.set_source_rgba(1.0, 1.0, 1.0, 1.0);
        ctx.rectangle(x, y, size, size);
        ctx.fill().unwrap();
    }

    #[test]
    fn unmounted_set_reports_unavailable_context() {
        let set = SurfaceSet::new(ScaleLimits::default());
        assert!(set.surface(SurfaceRole::Persistent).is_none());
        assert!(matches!(
            set.merge_transient_into_persistent(),
            Err(SurfaceError::ContextUnavailable {
                role: SurfaceRole::Transient,
                ..
            })
        ));
        assert!(set.mask().is_none());
    }

    #[test]
    fn resize_creates_all_layers_with_their_own_caps() {
        let mut set = SurfaceSet::new(ScaleLimits::default());
        set.resize(100, 50, 4.0).unwrap();

        let interface = set.surface(SurfaceRole::Interface).unwrap();
        let transient = set.surface(SurfaceRole::Transient).unwrap();
        let persistent = set.surface(SurfaceRole::Persistent).unwrap();

        assert_eq!(interface.device_scale(), 3.0);
        assert_eq!(transient.device_scale(), 2.0);
        assert_eq!(persistent.device_scale(), 2.0);
        for surface in [interface, transient, persistent] {
            assert_eq!(surface.logical_width(), 100);
            assert_eq!(surface.logical_height(), 50);
        }
        assert_eq!(set.logical_size(), (100, 50));
    }

    #[test]
    fn zero_size_is_rejected() {
        let mut set = SurfaceSet::new(ScaleLimits::default());
        assert!(matches!(
            set.resize(0, 10, 1.0),
            Err(EditorError::InvalidSize { width: 0, height: 10 })
        ));
    }

    #[test]
    fn merge_moves_transient_paint_into_mask() {
        let mut set = SurfaceSet::new(ScaleLimits::default());
        set.resize(40, 40, 2.0).unwrap();
        paint_square(&set, SurfaceRole::Transient, 10.0, 10.0, 5.0);

        set.merge_transient_into_persistent().unwrap();

        let mask = set.mask().unwrap();
        assert_eq!(mask.painted_bounds().unwrap(), crate::util::Rect::new(10, 10, 5, 5));
        let transient = set.surface(SurfaceRole::Transient).unwrap().mask();
        assert_eq!(transient.painted_pixels().unwrap(), 0);
    }

    #[test]
    fn clear_all_is_idempotent() {
        let mut set = SurfaceSet::new(ScaleLimits::default());
        set.resize(20, 20, 1.0).unwrap();
        paint_square(&set, SurfaceRole::Persistent, 0.0, 0.0, 10.0);
        paint_square(&set, SurfaceRole::Transient, 5.0, 5.0, 10.0);

        set.clear_all().unwrap();
        let once = set.mask().unwrap().painted_pixels().unwrap();
        set.clear_all().unwrap();
        let twice = set.mask().unwrap().painted_pixels().unwrap();

        assert_eq!(once, 0);
        assert_eq!(once, twice);
    }

    #[test]
    fn resize_drops_mask_content() {
        let mut set = SurfaceSet::new(ScaleLimits::default());
        set.resize(20, 20, 1.0).unwrap();
        paint_square(&set, SurfaceRole::Persistent, 0.0, 0.0, 10.0);
        set.resize(30, 30, 1.0).unwrap();
        assert_eq!(set.mask().unwrap().painted_pixels().unwrap(), 0);
    }

    #[test]
    fn guarded_records_health() {
        let mut set = SurfaceSet::new(ScaleLimits::default());
        let out = set.guarded(SurfaceRole::Persistent, |s| s.clear_all());
        assert!(out.is_none());
        assert!(!set.health().is_healthy());
        assert_eq!(set.health().failure_count(SurfaceRole::Persistent), 1);
        assert!(set.health().last_error(SurfaceRole::Persistent).is_some());

        set.resize(10, 10, 1.0).unwrap();
        assert!(set.guarded(SurfaceRole::Persistent, |s| s.clear_all()).is_some());
        assert!(set.health().is_healthy());
        assert_eq!(set.health().failure_count(SurfaceRole::Persistent), 1);
    }
}
