//! Device-scale-aware Cairo image surfaces and the mask handle exposed to hosts.

use std::fmt;
use std::io::Write;

use log::trace;

use crate::error::SurfaceError;
use crate::util::Rect;

/// The three stacked layers the editor draws on (top to bottom).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SurfaceRole {
    /// Brush footprint, pointer dot and guide curve; redrawn every frame.
    Interface,
    /// The stroke currently being drawn; cleared after each merge.
    Transient,
    /// Accumulated mask content.
    Persistent,
}

impl SurfaceRole {
    pub const ALL: [SurfaceRole; 3] = [
        SurfaceRole::Interface,
        SurfaceRole::Transient,
        SurfaceRole::Persistent,
    ];

    pub(crate) fn index(self) -> usize {
        match self {
            SurfaceRole::Interface => 0,
            SurfaceRole::Transient => 1,
            SurfaceRole::Persistent => 2,
        }
    }
}

impl fmt::Display for SurfaceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SurfaceRole::Interface => "interface",
            SurfaceRole::Transient => "transient",
            SurfaceRole::Persistent => "persistent",
        };
        f.write_str(name)
    }
}

/// Resolves the device scale a surface should use given the platform ratio and the cap.
///
/// Non-finite or non-positive ratios fall back to 1.0.
pub fn effective_scale(device_pixel_ratio: f64, max_scale: f64) -> f64 {
    let ratio = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
        device_pixel_ratio
    } else {
        1.0
    };
    ratio.min(max_scale)
}

/// A drawable layer with a logical coordinate system and a scaled backing store.
///
/// The backing [`cairo::ImageSurface`] is `logical × scale` pixels; every
/// context handed out by [`Surface::context`] is pre-scaled so callers always
/// draw in logical units.
pub struct Surface {
    role: SurfaceRole,
    logical_width: u32,
    logical_height: u32,
    device_scale: f64,
    image: cairo::ImageSurface,
}

impl Surface {
    /// Allocates a transparent surface for `role`.
    pub fn new(
        role: SurfaceRole,
        logical_width: u32,
        logical_height: u32,
        device_pixel_ratio: f64,
        max_scale: f64,
    ) -> Result<Self, SurfaceError> {
        let device_scale = effective_scale(device_pixel_ratio, max_scale);
        let physical_width = (f64::from(logical_width) * device_scale).round() as i32;
        let physical_height = (f64::from(logical_height) * device_scale).round() as i32;

        let image =
            cairo::ImageSurface::create(cairo::Format::ARgb32, physical_width, physical_height)
                .map_err(|err| SurfaceError::ContextUnavailable {
                    role,
                    reason: err.to_string(),
                })?;

        trace!(
            "Allocated {role} surface {logical_width}x{logical_height} @{device_scale}x ({physical_width}x{physical_height} px)"
        );

        Ok(Self {
            role,
            logical_width,
            logical_height,
            device_scale,
            image,
        })
    }

    pub fn role(&self) -> SurfaceRole {
        self.role
    }

    pub fn logical_width(&self) -> u32 {
        self.logical_width
    }

    pub fn logical_height(&self) -> u32 {
        self.logical_height
    }

    pub fn device_scale(&self) -> f64 {
        self.device_scale
    }

    pub fn physical_width(&self) -> i32 {
        self.image.width()
    }

    pub fn physical_height(&self) -> i32 {
        self.image.height()
    }

    /// Backing store, for compositing onto another surface.
    pub fn image(&self) -> &cairo::ImageSurface {
        &self.image
    }

    /// Returns a drawing context pre-scaled by the device scale.
    pub fn context(&self) -> Result<cairo::Context, SurfaceError> {
        let ctx =
            cairo::Context::new(&self.image).map_err(|err| SurfaceError::ContextUnavailable {
                role: self.role,
                reason: err.to_string(),
            })?;
        ctx.scale(self.device_scale, self.device_scale);
        Ok(ctx)
    }

    /// Erases every pixel back to transparent.
    pub fn clear(&self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Read-only handle over this surface's pixels.
    pub fn mask(&self) -> MaskImage {
        MaskImage {
            image: self.image.clone(),
            logical_width: self.logical_width,
            logical_height: self.logical_height,
            device_scale: self.device_scale,
        }
    }
}

/// Read-only view of the persistent surface handed to the host.
///
/// The handle shares the backing store, so it observes later strokes until the
/// surfaces are recreated by a resize.
#[derive(Clone)]
pub struct MaskImage {
    image: cairo::ImageSurface,
    logical_width: u32,
    logical_height: u32,
    device_scale: f64,
}

impl MaskImage {
    pub fn logical_width(&self) -> u32 {
        self.logical_width
    }

    pub fn logical_height(&self) -> u32 {
        self.logical_height
    }

    pub fn device_scale(&self) -> f64 {
        self.device_scale
    }

    pub fn physical_width(&self) -> i32 {
        self.image.width()
    }

    pub fn physical_height(&self) -> i32 {
        self.image.height()
    }

    /// Calls `f(x, y, alpha)` for every physical pixel.
    fn for_each_alpha<F: FnMut(i32, i32, u8)>(&self, mut f: F) -> Result<(), SurfaceError> {
        let width = self.image.width();
        let height = self.image.height();
        let stride = self.image.stride() as usize;

        self.image.with_data(|data| {
            if data.is_empty() {
                return;
            }
            for y in 0..height {
                let row = y as usize * stride;
                for x in 0..width {
                    let i = row + x as usize * 4;
                    // ARGB32 is stored as native-endian u32 with alpha in the top byte.
                    let px = u32::from_ne_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
                    f(x, y, (px >> 24) as u8);
                }
            }
        })?;
        Ok(())
    }

    /// Number of physical pixels with non-zero alpha.
    pub fn painted_pixels(&self) -> Result<usize, SurfaceError> {
        let mut count = 0;
        self.for_each_alpha(|_, _, alpha| {
            if alpha > 0 {
                count += 1;
            }
        })?;
        Ok(count)
    }

    /// Alpha of the physical pixel covering the logical point `(x, y)`.
    pub fn alpha_at(&self, x: f64, y: f64) -> Result<u8, SurfaceError> {
        let px = (x * self.device_scale).floor() as i32;
        let py = (y * self.device_scale).floor() as i32;
        let mut found = 0;
        self.for_each_alpha(|cx, cy, alpha| {
            if cx == px && cy == py {
                found = alpha;
            }
        })?;
        Ok(found)
    }

    /// Logical bounding box of all painted pixels, or `None` for an empty mask.
    pub fn painted_bounds(&self) -> Result<Option<Rect>, SurfaceError> {
        let mut bounds: Option<(i32, i32, i32, i32)> = None;
        self.for_each_alpha(|x, y, alpha| {
            if alpha == 0 {
                return;
            }
            bounds = Some(match bounds {
                None => (x, y, x + 1, y + 1),
                Some((min_x, min_y, max_x, max_y)) => {
                    (min_x.min(x), min_y.min(y), max_x.max(x + 1), max_y.max(y + 1))
                }
            });
        })?;

        Ok(bounds.and_then(|(min_x, min_y, max_x, max_y)| {
            let s = self.device_scale;
            Rect::from_min_max(
                (f64::from(min_x) / s).floor() as i32,
                (f64::from(min_y) / s).floor() as i32,
                (f64::from(max_x) / s).ceil() as i32,
                (f64::from(max_y) / s).ceil() as i32,
            )
        }))
    }

    /// Encodes the physical pixels as PNG.
    pub fn write_png<W: Write>(&self, stream: &mut W) -> Result<(), cairo::IoError> {
        self.image.write_to_png(stream)
    }
}
