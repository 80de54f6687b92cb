//! Drawing tool selection.

use serde::{Deserialize, Serialize};

/// Drawing tool selection.
///
/// The active tool determines what a pointer drag does: construct a shape,
/// place text, erase, or select and move an existing shape. The tool/style
/// panel of the embedding front-end sets this through
/// [`crate::input::InputState::set_tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    /// Freehand drawing - follows the pointer path (default)
    #[default]
    Pen,
    /// Rectangle outline - from corner to corner
    Rect,
    /// Ellipse outline - anchored at the drag origin
    Ellipse,
    /// Text placement - click to anchor, type, confirm with Return
    Text,
    /// Eraser - paints opaque white at double width
    Eraser,
    /// Select/move - click a shape to select it, drag to translate it
    Select,
}
