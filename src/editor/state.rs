//! Drawing state machine.

use crate::draw::StrokeBuffer;

/// Stroke lifecycle as seen by the frame loop.
///
/// The stroke buffer lives inside [`DrawingState::Drawing`], so leaving that
/// state drops it.
#[derive(Debug)]
pub enum DrawingState {
    /// Pointer not held.
    Idle,
    /// Pointer held, but the brush has not started moving yet.
    Pressed,
    /// Stroke in progress.
    Drawing {
        /// Brush positions collected so far
        stroke: StrokeBuffer,
    },
}

/// Payload-free view of [`DrawingState`] for hosts and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Idle,
    Pressed,
    Drawing,
}

impl DrawingState {
    pub fn phase(&self) -> EditorPhase {
        match self {
            DrawingState::Idle => EditorPhase::Idle,
            DrawingState::Pressed => EditorPhase::Pressed,
            DrawingState::Drawing { .. } => EditorPhase::Drawing,
        }
    }

    /// Whether the pointer is considered held (pressed or drawing).
    pub fn is_holding(&self) -> bool {
        !matches!(self, DrawingState::Idle)
    }

    /// Current stroke, if one is in progress.
    pub fn stroke(&self) -> Option<&StrokeBuffer> {
        match self {
            DrawingState::Drawing { stroke } => Some(stroke),
            _ => None,
        }
    }
}
