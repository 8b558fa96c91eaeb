//! Lazy-brush mask painting engine.
//!
//! The editor keeps three stacked Cairo surfaces (interface feedback, the
//! stroke in progress and the accumulated mask), smooths pointer input with
//! a lazy brush and exposes the painted mask as a [`draw::MaskImage`].
//!
//! [`editor::Editor`] is the synchronous core; [`editor::EditorLoop`]
//! schedules it on a calloop event loop.

pub mod brush;
pub mod config;
pub mod draw;
pub mod editor;
pub mod error;
pub mod input;
pub mod replay;
pub mod util;

pub use config::Config;
pub use editor::{Editor, EditorLoop, EditorOptions};
pub use error::{EditorError, SurfaceError};
