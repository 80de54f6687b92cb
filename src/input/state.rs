//! Drawing state machine and editor state management.

use super::events::{Key, MouseButton};
use super::tool::Tool;
use crate::draw::{Color, FontStyle, Frame, History, Shape, TextAlign, Viewport, render_scene};

/// Current drawing mode state machine.
///
/// Tracks whether the user is idle, actively drawing a shape, entering text,
/// or dragging an existing shape. State transitions occur based on pointer
/// and keyboard events.
#[derive(Debug)]
pub enum DrawingState {
    /// Not actively drawing - waiting for user input
    Idle,
    /// Actively drawing a shape (pointer button held down)
    Drawing {
        /// Which tool is being used for this shape
        tool: Tool,
        /// Anchor X coordinate (where the pointer went down), canvas space
        start_x: f64,
        /// Anchor Y coordinate, canvas space
        start_y: f64,
        /// Latest pointer X coordinate, canvas space
        cur_x: f64,
        /// Latest pointer Y coordinate, canvas space
        cur_y: f64,
        /// Accumulated points for freehand/eraser strokes
        points: Vec<(f64, f64)>,
    },
    /// Text input mode - user is typing text to place on the canvas
    TextInput {
        /// X coordinate where text will be anchored
        x: f64,
        /// Y coordinate where text will be anchored
        y: f64,
        /// Accumulated text buffer
        buffer: String,
    },
    /// Dragging the selected shape with the select tool
    MovingShape {
        /// Index of the shape being dragged
        index: usize,
        /// Last pointer X coordinate, canvas space
        last_x: f64,
        /// Last pointer Y coordinate, canvas space
        last_y: f64,
        /// Whether the drag has translated the shape at all
        moved: bool,
    },
}

/// Main editor state containing the whole drawing session.
///
/// This struct holds the current frame (all drawn shapes), the undo/redo
/// history, the selection, the viewport, and the active tool settings. It
/// processes all pointer and keyboard events; the renderer and the
/// persistence layer only read from it.
///
/// All incoming pointer coordinates are device coordinates relative to the
/// canvas surface; they are mapped through the viewport's inverse zoom
/// transform before any capture or hit-testing.
pub struct InputState {
    /// All committed shapes, in z-order
    pub frame: Frame,
    /// Snapshot undo/redo log over the frame
    pub history: History,
    /// Index of the selected shape, if any
    pub selection: Option<usize>,
    /// Zoom and grid state
    pub viewport: Viewport,
    /// Tool used for the next pointer gesture
    pub active_tool: Tool,
    /// Current drawing color
    pub current_color: Color,
    /// Current pen/line thickness in pixels
    pub current_thickness: f64,
    /// Current font size for the text tool
    pub current_font_size: f64,
    /// Current font family and style flags for the text tool
    pub current_font: FontStyle,
    /// Current horizontal alignment for the text tool
    pub current_align: TextAlign,
    /// Canvas background color
    pub background: Color,
    /// Canvas width in pixels (canvas space, zoom-independent)
    pub canvas_width: u32,
    /// Canvas height in pixels (canvas space, zoom-independent)
    pub canvas_height: u32,
    /// Current drawing mode state machine
    pub state: DrawingState,
    /// Whether the display needs to be redrawn
    pub needs_redraw: bool,
}

impl InputState {
    /// Creates a new editor state with the specified defaults.
    ///
    /// The frame starts empty and the history starts with the empty baseline
    /// snapshot, so undoing every committed mutation returns to this state.
    #[allow(clippy::too_many_arguments)]
    pub fn with_defaults(
        color: Color,
        thickness: f64,
        font_size: f64,
        font: FontStyle,
        background: Color,
        viewport: Viewport,
        canvas_width: u32,
        canvas_height: u32,
    ) -> Self {
        Self {
            frame: Frame::new(),
            history: History::new(),
            selection: None,
            viewport,
            active_tool: Tool::Pen,
            current_color: color,
            current_thickness: thickness,
            current_font_size: font_size,
            current_font: font,
            current_align: TextAlign::Left,
            background,
            canvas_width,
            canvas_height,
            state: DrawingState::Idle,
            needs_redraw: true,
        }
    }

    /// Creates an editor state from loaded configuration values.
    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::with_defaults(
            config.drawing.default_color.to_color(),
            config.drawing.default_thickness,
            config.drawing.default_font_size,
            FontStyle::new(config.drawing.font_family.clone(), false, false, false),
            config.canvas.background.to_color(),
            Viewport::new(config.grid.enabled, config.grid.spacing),
            config.canvas.width,
            config.canvas.height,
        )
    }

    // ------------------------------------------------------------------
    // Tool/style panel collaborator
    // ------------------------------------------------------------------

    /// Switches the active tool, cancelling any in-progress gesture.
    pub fn set_tool(&mut self, tool: Tool) {
        if self.active_tool == tool {
            return;
        }
        self.active_tool = tool;
        // Reset drawing state to prevent partial shapes crossing tools
        self.state = DrawingState::Idle;
        self.needs_redraw = true;
        log::debug!("Active tool set to {:?}", tool);
    }

    /// Sets the drawing color used for new shapes.
    pub fn set_color(&mut self, color: Color) {
        self.current_color = color;
        self.needs_redraw = true;
    }

    /// Sets the pen thickness, clamped to the 1.0-20.0 range.
    pub fn set_thickness(&mut self, thickness: f64) {
        self.current_thickness = thickness.clamp(1.0, 20.0);
        self.needs_redraw = true;
    }

    /// Sets the text font size, clamped to the 8.0-72.0 range.
    pub fn set_font_size(&mut self, size: f64) {
        self.current_font_size = size.clamp(8.0, 72.0);
        self.needs_redraw = true;
    }

    /// Sets the font family and style flags used for new text shapes.
    pub fn set_font_style(&mut self, font: FontStyle) {
        self.current_font = font;
        self.needs_redraw = true;
    }

    /// Sets the horizontal alignment used for new text shapes.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.current_align = align;
        self.needs_redraw = true;
    }

    /// Updates canvas dimensions (canvas space, zoom-independent).
    pub fn update_canvas_dimensions(&mut self, width: u32, height: u32) {
        self.canvas_width = width;
        self.canvas_height = height;
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Viewport controls
    // ------------------------------------------------------------------

    /// Zooms in one multiplicative step.
    pub fn zoom_in(&mut self) {
        self.viewport.zoom_in();
        self.needs_redraw = true;
    }

    /// Zooms out one multiplicative step.
    pub fn zoom_out(&mut self) {
        self.viewport.zoom_out();
        self.needs_redraw = true;
    }

    /// Resets zoom to 1.0.
    pub fn zoom_reset(&mut self) {
        self.viewport.zoom_reset();
        self.needs_redraw = true;
    }

    /// Toggles grid visibility.
    pub fn toggle_grid(&mut self) {
        self.viewport.toggle_grid();
        self.needs_redraw = true;
    }

    // ------------------------------------------------------------------
    // Pointer events
    // ------------------------------------------------------------------

    /// Processes a pointer button press at device coordinates.
    ///
    /// # Behavior
    /// - Left press while Idle: starts a gesture for the active tool
    ///   (drawing, text anchor placement, or selection/drag)
    /// - Left press during text input: moves the pending text anchor
    /// - Right press: cancels the current gesture
    pub fn on_pointer_press(&mut self, button: MouseButton, device_x: f64, device_y: f64) {
        let (x, y) = self.viewport.to_canvas(device_x, device_y);

        match button {
            MouseButton::Left => {
                if matches!(self.state, DrawingState::Idle) {
                    match self.active_tool {
                        Tool::Pen | Tool::Rect | Tool::Ellipse | Tool::Eraser => {
                            self.state = DrawingState::Drawing {
                                tool: self.active_tool,
                                start_x: x,
                                start_y: y,
                                cur_x: x,
                                cur_y: y,
                                points: vec![(x, y)],
                            };
                        }
                        Tool::Text => {
                            self.state = DrawingState::TextInput {
                                x,
                                y,
                                buffer: String::new(),
                            };
                        }
                        Tool::Select => match self.hit_test(x, y) {
                            Some(index) => {
                                self.selection = Some(index);
                                self.state = DrawingState::MovingShape {
                                    index,
                                    last_x: x,
                                    last_y: y,
                                    moved: false,
                                };
                            }
                            None => {
                                self.selection = None;
                            }
                        },
                    }
                    self.needs_redraw = true;
                } else if let DrawingState::TextInput { x: tx, y: ty, .. } = &mut self.state {
                    // Reposition the pending text anchor
                    *tx = x;
                    *ty = y;
                    self.needs_redraw = true;
                }
            }
            MouseButton::Right => {
                // Cancel whatever gesture is in flight
                if !matches!(self.state, DrawingState::Idle) {
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
            }
            MouseButton::Middle => {}
        }
    }

    /// Processes pointer motion (dragging) at device coordinates.
    ///
    /// # Behavior
    /// - Drawing with pen/eraser: appends the point to the stroke, coalescing
    ///   identical successive points
    /// - Drawing a rectangle/ellipse: tracks the current corner for live
    ///   extent recomputation (any drag direction)
    /// - Moving a shape: translates it by the pointer delta
    pub fn on_pointer_motion(&mut self, device_x: f64, device_y: f64) {
        let (x, y) = self.viewport.to_canvas(device_x, device_y);

        match &mut self.state {
            DrawingState::Drawing {
                tool,
                cur_x,
                cur_y,
                points,
                ..
            } => {
                if matches!(tool, Tool::Pen | Tool::Eraser) {
                    // Coalesce identical successive points only
                    if points.last() != Some(&(x, y)) {
                        points.push((x, y));
                    }
                }
                *cur_x = x;
                *cur_y = y;
                self.needs_redraw = true;
            }
            DrawingState::MovingShape {
                index,
                last_x,
                last_y,
                moved,
            } => {
                let dx = x - *last_x;
                let dy = y - *last_y;
                if dx != 0.0 || dy != 0.0 {
                    if let Some(shape) = self.frame.shapes.get_mut(*index) {
                        shape.translate(dx, dy);
                        *moved = true;
                    }
                    *last_x = x;
                    *last_y = y;
                    self.needs_redraw = true;
                }
            }
            _ => {}
        }
    }

    /// Processes a pointer button release at device coordinates.
    ///
    /// Releasing the left button while drawing commits the in-progress shape:
    /// it is appended at the top of the z-order and a history entry is
    /// recorded. Freehand/eraser strokes with fewer than two points are
    /// discarded silently. Releasing after a drag commits the translation.
    pub fn on_pointer_release(&mut self, button: MouseButton, device_x: f64, device_y: f64) {
        if button != MouseButton::Left {
            return;
        }

        let (x, y) = self.viewport.to_canvas(device_x, device_y);

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Drawing {
                tool,
                start_x,
                start_y,
                points,
                ..
            } => {
                if let Some(shape) = self.build_committed_shape(tool, start_x, start_y, x, y, points)
                {
                    self.frame.add_shape(shape);
                    self.push_history();
                }
                self.needs_redraw = true;
            }
            DrawingState::MovingShape { moved, .. } => {
                if moved {
                    self.push_history();
                }
                self.needs_redraw = true;
            }
            other => {
                // Text input survives pointer release; put it back.
                self.state = other;
            }
        }
    }

    /// Builds the final shape for a completed drawing gesture.
    ///
    /// Returns `None` for degenerate strokes (fewer than two recorded
    /// points), which are dropped without surfacing an error.
    fn build_committed_shape(
        &self,
        tool: Tool,
        start_x: f64,
        start_y: f64,
        end_x: f64,
        end_y: f64,
        points: Vec<(f64, f64)>,
    ) -> Option<Shape> {
        match tool {
            Tool::Pen => {
                if points.len() < 2 {
                    log::debug!("Discarding freehand stroke with {} point(s)", points.len());
                    return None;
                }
                Some(Shape::Freehand {
                    points,
                    color: self.current_color,
                    thick: self.current_thickness,
                })
            }
            Tool::Eraser => {
                if points.len() < 2 {
                    log::debug!("Discarding eraser stroke with {} point(s)", points.len());
                    return None;
                }
                Some(Shape::Eraser {
                    points,
                    thick: self.current_thickness,
                })
            }
            Tool::Rect => {
                // Normalize to handle dragging in any direction
                let (x, w) = if end_x >= start_x {
                    (start_x, end_x - start_x)
                } else {
                    (end_x, start_x - end_x)
                };
                let (y, h) = if end_y >= start_y {
                    (start_y, end_y - start_y)
                } else {
                    (end_y, start_y - end_y)
                };
                Some(Shape::Rect {
                    x,
                    y,
                    w,
                    h,
                    color: self.current_color,
                    thick: self.current_thickness,
                })
            }
            Tool::Ellipse => Some(Shape::Ellipse {
                x: start_x,
                y: start_y,
                w: end_x - start_x,
                h: end_y - start_y,
                color: self.current_color,
                thick: self.current_thickness,
            }),
            // Text and select gestures never come through the drawing path
            Tool::Text | Tool::Select => None,
        }
    }

    // ------------------------------------------------------------------
    // Keyboard events (text affordance)
    // ------------------------------------------------------------------

    /// Processes a key press.
    ///
    /// Keys are only meaningful while entering text (typing, Return to
    /// confirm, Escape to cancel) or to cancel an in-progress drawing
    /// gesture with Escape.
    pub fn on_key_press(&mut self, key: Key) {
        match &mut self.state {
            DrawingState::TextInput { x, y, buffer } => match key {
                Key::Char(c) => {
                    buffer.push(c);
                    self.needs_redraw = true;
                }
                Key::Backspace => {
                    buffer.pop();
                    self.needs_redraw = true;
                }
                Key::Return => {
                    // Empty confirmation is rejected: no empty-text shapes.
                    if buffer.is_empty() {
                        log::debug!("Discarding empty text entry");
                        self.state = DrawingState::Idle;
                    } else {
                        let (x, y, text) = (*x, *y, buffer.clone());
                        self.state = DrawingState::Idle;
                        let shape = Shape::Text {
                            x,
                            y,
                            text,
                            color: self.current_color,
                            size: self.current_font_size,
                            font: self.current_font.clone(),
                            align: self.current_align,
                        };
                        self.frame.add_shape(shape);
                        self.push_history();
                    }
                    self.needs_redraw = true;
                }
                Key::Escape => {
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
                Key::Unknown => {}
            },
            DrawingState::Drawing { .. } | DrawingState::MovingShape { .. } => {
                if key == Key::Escape {
                    self.state = DrawingState::Idle;
                    self.needs_redraw = true;
                }
            }
            DrawingState::Idle => {}
        }
    }

    // ------------------------------------------------------------------
    // Editing operations
    // ------------------------------------------------------------------

    /// Restores the previous history snapshot, if any.
    ///
    /// A no-op at the earliest entry. Cancels any in-progress gesture and
    /// clears the selection when it no longer references a valid index.
    pub fn undo(&mut self) {
        if let Some(restored) = self.history.undo().cloned() {
            self.frame = restored;
            self.state = DrawingState::Idle;
            self.validate_selection();
            self.needs_redraw = true;
        }
    }

    /// Restores the next history snapshot, if any.
    ///
    /// Only valid when no new action was committed since the last undo.
    pub fn redo(&mut self) {
        if let Some(restored) = self.history.redo().cloned() {
            self.frame = restored;
            self.state = DrawingState::Idle;
            self.validate_selection();
            self.needs_redraw = true;
        }
    }

    /// Empties the shape collection and records the empty state.
    ///
    /// Prior history stays intact, so an undo restores the pre-clear
    /// drawing. A no-op when the canvas is already empty.
    pub fn clear_canvas(&mut self) {
        if self.frame.is_empty() {
            return;
        }
        self.frame.clear();
        self.selection = None;
        self.state = DrawingState::Idle;
        self.push_history();
        log::info!("Canvas cleared");
    }

    /// Removes the selected shape, if any, and records a history entry.
    ///
    /// Shapes after the removed index shift down by one; the selection is
    /// cleared. A no-op (not an error) without a selection.
    pub fn delete_selected(&mut self) {
        let Some(index) = self.selection.take() else {
            return;
        };
        if self.frame.remove_shape(index).is_some() {
            self.push_history();
        }
        self.needs_redraw = true;
    }

    /// Returns the topmost shape whose bounding box contains the canvas-space
    /// point, if any.
    pub fn hit_test(&self, x: f64, y: f64) -> Option<usize> {
        self.frame
            .shapes
            .iter()
            .enumerate()
            .rev()
            .find(|(_, shape)| {
                shape
                    .bounding_box()
                    .is_some_and(|bounds| bounds.contains(x, y))
            })
            .map(|(index, _)| index)
    }

    /// Returns the shape currently being authored, for live preview.
    ///
    /// - `Some(Shape)` while drawing, or while typing a non-empty text buffer
    /// - `None` when idle, dragging a shape, or before any text was typed
    pub fn provisional_shape(&self) -> Option<Shape> {
        match &self.state {
            DrawingState::Drawing {
                tool,
                start_x,
                start_y,
                cur_x,
                cur_y,
                points,
            } => match tool {
                Tool::Pen => Some(Shape::Freehand {
                    points: points.clone(),
                    color: self.current_color,
                    thick: self.current_thickness,
                }),
                Tool::Eraser => Some(Shape::Eraser {
                    points: points.clone(),
                    thick: self.current_thickness,
                }),
                Tool::Rect => Some(Shape::Rect {
                    x: *start_x,
                    y: *start_y,
                    w: cur_x - start_x,
                    h: cur_y - start_y,
                    color: self.current_color,
                    thick: self.current_thickness,
                }),
                Tool::Ellipse => Some(Shape::Ellipse {
                    x: *start_x,
                    y: *start_y,
                    w: cur_x - start_x,
                    h: cur_y - start_y,
                    color: self.current_color,
                    thick: self.current_thickness,
                }),
                Tool::Text | Tool::Select => None,
            },
            DrawingState::TextInput { x, y, buffer } if !buffer.is_empty() => Some(Shape::Text {
                x: *x,
                y: *y,
                text: buffer.clone(),
                color: self.current_color,
                size: self.current_font_size,
                font: self.current_font.clone(),
                align: self.current_align,
            }),
            _ => None,
        }
    }

    /// Renders the editing view (shapes, grid, selection, in-progress shape)
    /// to a Cairo context of the given device dimensions.
    pub fn render(&self, ctx: &cairo::Context, width: i32, height: i32) {
        render_scene(
            ctx,
            &self.frame,
            self.selection,
            self.provisional_shape().as_ref(),
            &self.viewport,
            self.background,
            width,
            height,
        );
    }

    /// Records the current frame as the newest history snapshot.
    fn push_history(&mut self) {
        self.history.record(&self.frame);
        self.needs_redraw = true;
    }

    /// Clears the selection when it no longer points inside the collection.
    fn validate_selection(&mut self) {
        if let Some(index) = self.selection
            && index >= self.frame.len()
        {
            self.selection = None;
        }
    }
}
