//! Pointer input normalization.
//!
//! This module turns backend mouse and touch events into a single stream of
//! canvas-local samples plus a pressed flag. Event callbacks only ever touch
//! this lightweight state; the frame loop consumes it.

pub mod events;
pub mod tracker;

// Re-export commonly used types at module level
pub use events::{PointerEvent, PointerPhase, PointerSource};
pub use tracker::{PointerSample, PointerTracker};
