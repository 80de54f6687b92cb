//! Input handling and the drawing state machine.
//!
//! This module translates pointer and keyboard events into editing actions.
//! It owns the shape collection, the undo/redo history, the selection and the
//! viewport, and manages the state machine for the different drawing modes
//! (idle, drawing, text input, moving a shape).

pub mod events;
pub mod state;
pub mod tool;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use state::{DrawingState, InputState};
pub use tool::Tool;
