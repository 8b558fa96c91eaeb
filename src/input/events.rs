//! Generic pointer event types for mouse and touch input.

/// Kind of device that produced a pointer event.
///
/// Callers branch on the capabilities below rather than on the device kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerSource {
    /// Mouse, pen or trackpad: reports position while hovering
    Mouse,
    /// Finger on a touch screen: only reports position while in contact
    Touch,
}

impl PointerSource {
    /// Whether the device reports movement before a press.
    ///
    /// Devices that cannot hover need the brush moved onto the contact point
    /// when pressed, and the pointer parked on the brush when lifted.
    pub fn can_hover(self) -> bool {
        matches!(self, PointerSource::Mouse)
    }
}

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerPhase {
    Press,
    Move,
    Release,
}

/// A positioned pointer event in viewport (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub source: PointerSource,
    pub phase: PointerPhase,
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerEvent {
    pub fn new(source: PointerSource, phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        Self {
            source,
            phase,
            client_x,
            client_y,
        }
    }

    pub fn mouse(phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        Self::new(PointerSource::Mouse, phase, client_x, client_y)
    }

    pub fn touch(phase: PointerPhase, client_x: f64, client_y: f64) -> Self {
        Self::new(PointerSource::Touch, phase, client_x, client_y)
    }
}
