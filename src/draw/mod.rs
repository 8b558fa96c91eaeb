//! Rendering primitives and surface management (Cairo-based).
//!
//! This module defines the drawing layer of the mask editor:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`Surface`] / [`SurfaceSet`]: the three stacked, device-scale-aware layers
//! - [`stroke`]: midpoint-smoothed stroke rasterization
//! - [`GuideRenderer`]: pointer, brush and guide-string feedback
//! - [`MaskImage`]: read-only handle over the painted mask

pub mod catenary;
pub mod color;
pub mod guide;
pub mod path;
pub mod stroke;
pub mod surface;
pub mod surface_set;

// Re-export commonly used types at module level
pub use color::Color;
pub use guide::{GuideRenderer, GuideStyle, Tension};
pub use stroke::{StrokeBuffer, rasterize};
pub use surface::{MaskImage, Surface, SurfaceRole, effective_scale};
pub use surface_set::{ScaleLimits, SurfaceHealth, SurfaceSet};

pub use color::{BLACK, GRAPHITE, INK, TRANSPARENT, WHITE};
