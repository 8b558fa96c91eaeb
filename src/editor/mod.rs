//! The mask editor: stroke state machine, frame loop and scheduling.
//!
//! [`Editor`] is the synchronous core; call [`Editor::tick`] once per frame.
//! [`EditorLoop`] wraps it in a calloop event loop with a frame timer and
//! input channels for hosts that want it scheduled for them.

mod core;
mod debounce;
mod frame;
mod options;
mod scheduler;
mod state;

pub use core::Editor;
pub use debounce::{ContainerSize, ResizeDebouncer};
pub use options::EditorOptions;
pub use scheduler::{EditorLoop, LoopData};
pub use state::{DrawingState, EditorPhase};
