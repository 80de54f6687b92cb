//! Frame container for managing collections of shapes.

use super::shape::Shape;
use serde::{Deserialize, Serialize};

/// Container for all shapes in the current drawing.
///
/// Manages a collection of [`Shape`]s and provides operations like adding,
/// removing, and clearing shapes. Acts as the drawing canvas state; a shape's
/// identity is its index in `shapes`, and the vec order is the z-order
/// (first = bottom layer, last = top layer).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Frame {
    /// Vector of all shapes in draw order
    pub shapes: Vec<Shape>,
}

impl Frame {
    /// Creates a new empty frame with no shapes.
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Removes all shapes from the frame, clearing the canvas.
    pub fn clear(&mut self) {
        self.shapes.clear();
    }

    /// Adds a new shape to the frame (drawn on top of existing shapes).
    pub fn add_shape(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// Attempts to add a shape, enforcing a maximum shape count when `max` > 0.
    ///
    /// Returns `true` if the shape was added, `false` if the limit would be exceeded.
    pub fn try_add_shape(&mut self, shape: Shape, max: usize) -> bool {
        if max == 0 || self.shapes.len() < max {
            self.shapes.push(shape);
            true
        } else {
            false
        }
    }

    /// Removes and returns the shape at `index`, shifting later shapes down.
    ///
    /// Returns `None` when the index is out of bounds.
    pub fn remove_shape(&mut self, index: usize) -> Option<Shape> {
        if index < self.shapes.len() {
            Some(self.shapes.remove(index))
        } else {
            None
        }
    }

    /// Number of shapes in the frame.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// True when the frame holds no shapes.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
