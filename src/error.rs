//! Error types for surface rendering and editor setup.

use thiserror::Error;

use crate::draw::SurfaceRole;

/// Per-operation failures inside the frame loop.
///
/// The frame loop never propagates these to the host; they are logged and
/// recorded in [`SurfaceHealth`](crate::draw::SurfaceHealth) instead.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The surface has not been created yet, or Cairo refused to give us a context.
    #[error("{role} surface has no usable drawing context: {reason}")]
    ContextUnavailable { role: SurfaceRole, reason: String },

    /// Fewer than two points were available for rasterization.
    #[error("stroke needs at least two points, got {0}")]
    DegenerateGeometry(usize),

    #[error("cairo drawing failed: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface pixels are not readable: {0}")]
    Pixels(#[from] cairo::BorrowError),
}

/// Errors surfaced to the host while setting up or driving the editor.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("event loop failure: {0}")]
    EventLoop(#[from] calloop::Error),

    #[error("failed to register event source: {0}")]
    Registration(String),

    #[error("mask export failed: {0}")]
    Export(#[from] cairo::IoError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}
