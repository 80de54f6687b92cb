//! Shape definitions for the sketch canvas.

use super::color::Color;
use super::font::{FontStyle, TextAlign};
use crate::util::Rect;
use serde::{Deserialize, Serialize};

/// Factor applied to an eraser stroke's stored width when rendering.
///
/// Eraser marks paint opaque white at double the pen width; they are layered
/// like any other shape rather than destructively erasing pixels.
pub const ERASER_WIDTH_FACTOR: f64 = 2.0;

/// Represents a drawable shape on the canvas.
///
/// Each variant represents a different drawing tool/primitive with its specific
/// parameters. All coordinates are in canvas space (unscaled by zoom). Shape
/// identity is the index in the owning [`super::Frame`]; the collection order
/// is the z-order (later = drawn on top).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum Shape {
    /// Freehand drawing - polyline connecting pointer drag points
    Freehand {
        /// Sequence of (x, y) coordinates traced by the pointer
        points: Vec<(f64, f64)>,
        /// Stroke color
        color: Color,
        /// Line thickness in pixels
        thick: f64,
    },
    /// Rectangle outline, stored with a normalized (positive) extent
    Rect {
        /// Top-left X coordinate
        x: f64,
        /// Top-left Y coordinate
        y: f64,
        /// Width in pixels
        w: f64,
        /// Height in pixels
        h: f64,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        thick: f64,
    },
    /// Circle anchored at the drag origin.
    ///
    /// `w`/`h` are the signed drag extents; the radius is the length of the
    /// box diagonal, so the circle always passes through the drag corner.
    Ellipse {
        /// Anchor (drag origin) X coordinate
        x: f64,
        /// Anchor (drag origin) Y coordinate
        y: f64,
        /// Signed drag extent on X
        w: f64,
        /// Signed drag extent on Y
        h: f64,
        /// Border color
        color: Color,
        /// Border thickness in pixels
        thick: f64,
    },
    /// Text annotation
    Text {
        /// Baseline anchor X coordinate (interpreted per `align`)
        x: f64,
        /// Baseline anchor Y coordinate
        y: f64,
        /// Text content to display
        text: String,
        /// Text color
        color: Color,
        /// Font size in points
        size: f64,
        /// Font family and style flags (bold, italic, underline)
        font: FontStyle,
        /// Horizontal alignment of the text relative to the anchor
        align: TextAlign,
    },
    /// Eraser mark - opaque white polyline at double width
    Eraser {
        /// Sequence of (x, y) coordinates traced by the pointer
        points: Vec<(f64, f64)>,
        /// Pen thickness at creation time (rendered at twice this width)
        thick: f64,
    },
}

impl Shape {
    /// Returns the axis-aligned bounding box for this shape, expanded to cover
    /// stroke width.
    ///
    /// The returned rectangle is used for hit-testing with the select tool and
    /// for drawing the selection outline. Returns `None` only when the shape
    /// has no drawable area (e.g., degenerate data).
    pub fn bounding_box(&self) -> Option<Rect> {
        match self {
            Shape::Freehand { points, thick, .. } => bounding_box_for_points(points, *thick),
            Shape::Rect {
                x, y, w, h, thick, ..
            } => bounding_box_for_rect(*x, *y, *w, *h, *thick),
            Shape::Ellipse {
                x, y, w, h, thick, ..
            } => bounding_box_for_ellipse(*x, *y, *w, *h, *thick),
            Shape::Text {
                x,
                y,
                text,
                size,
                font,
                align,
                ..
            } => bounding_box_for_text(*x, *y, text, *size, font, *align),
            Shape::Eraser { points, thick } => {
                bounding_box_for_points(points, *thick * ERASER_WIDTH_FACTOR)
            }
        }
    }

    /// Translates the shape by the given delta, in canvas space.
    ///
    /// Used by the select tool to drag shapes; every stored coordinate moves,
    /// so the shape's geometry is otherwise unchanged.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self {
            Shape::Freehand { points, .. } | Shape::Eraser { points, .. } => {
                for (px, py) in points.iter_mut() {
                    *px += dx;
                    *py += dy;
                }
            }
            Shape::Rect { x, y, .. } | Shape::Ellipse { x, y, .. } | Shape::Text { x, y, .. } => {
                *x += dx;
                *y += dy;
            }
        }
    }
}

fn stroke_padding(thick: f64) -> f64 {
    (thick / 2.0).max(1.0)
}

pub(crate) fn bounding_box_for_points(points: &[(f64, f64)], thick: f64) -> Option<Rect> {
    if points.is_empty() {
        return None;
    }
    let mut min_x = points[0].0;
    let mut max_x = points[0].0;
    let mut min_y = points[0].1;
    let mut max_y = points[0].1;

    for &(x, y) in &points[1..] {
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);
    }

    let padding = stroke_padding(thick);
    ensure_positive_rect(
        min_x - padding,
        min_y - padding,
        max_x + padding,
        max_y + padding,
    )
}

pub(crate) fn bounding_box_for_rect(x: f64, y: f64, w: f64, h: f64, thick: f64) -> Option<Rect> {
    let padding = stroke_padding(thick);

    let x2 = x + w;
    let y2 = y + h;

    let min_x = x.min(x2) - padding;
    let max_x = x.max(x2) + padding;
    let min_y = y.min(y2) - padding;
    let max_y = y.max(y2) + padding;

    ensure_positive_rect(min_x, min_y, max_x, max_y)
}

pub(crate) fn bounding_box_for_ellipse(x: f64, y: f64, w: f64, h: f64, thick: f64) -> Option<Rect> {
    let radius = (w * w + h * h).sqrt();
    let padding = stroke_padding(thick);

    ensure_positive_rect(
        x - radius - padding,
        y - radius - padding,
        x + radius + padding,
        y + radius + padding,
    )
}

pub(crate) fn bounding_box_for_text(
    x: f64,
    y: f64,
    text: &str,
    size: f64,
    font: &FontStyle,
    align: TextAlign,
) -> Option<Rect> {
    if text.is_empty() {
        return None;
    }

    // Use a tiny image surface for measurement; the layout is all we need.
    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1).ok()?;
    let ctx = cairo::Context::new(&surface).ok()?;

    let layout = pangocairo::functions::create_layout(&ctx);

    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    let (ink_rect, logical_rect) = layout.extents();

    // Convert Pango units to floats
    let scale = pango::SCALE as f64;
    let ink_x = ink_rect.x() as f64 / scale;
    let ink_y = ink_rect.y() as f64 / scale;
    let ink_width = ink_rect.width() as f64 / scale;
    let ink_height = ink_rect.height() as f64 / scale;
    let logical_width = logical_rect.width() as f64 / scale;
    let baseline = layout.baseline() as f64 / scale;

    // The anchor is the baseline start; alignment shifts the draw origin
    // against the logical (rendered) width, matching the renderer.
    let base_x = x + align.offset(logical_width);
    let base_y = y - baseline;

    let min_x = base_x + ink_x;
    let max_x = min_x + ink_width;
    let min_y = base_y + ink_y;
    let mut max_y = min_y + ink_height;

    // Underline sits below the baseline; include it in the bounds.
    if font.underline {
        max_y = max_y.max(y + size * 0.1 + size * 0.06);
    }

    ensure_positive_rect(min_x - 1.0, min_y - 1.0, max_x + 1.0, max_y + 1.0)
}

fn ensure_positive_rect(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Rect> {
    let max_x = if max_x - min_x < 1.0 {
        min_x + 1.0
    } else {
        max_x
    };
    let max_y = if max_y - min_y < 1.0 {
        min_y + 1.0
    } else {
        max_y
    };
    Rect::from_min_max(min_x, min_y, max_x, max_y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::WHITE;

    #[test]
    fn freehand_bounding_box_expands_with_thickness() {
        let shape = Shape::Freehand {
            points: vec![(10.0, 20.0), (30.0, 40.0)],
            color: WHITE,
            thick: 6.0,
        };

        let rect = shape.bounding_box().expect("freehand should have bounds");
        assert_eq!(rect.x, 7.0);
        assert_eq!(rect.y, 17.0);
        assert_eq!(rect.width, 26.0);
        assert_eq!(rect.height, 26.0);
    }

    #[test]
    fn eraser_bounding_box_uses_doubled_width() {
        let pen = Shape::Freehand {
            points: vec![(0.0, 0.0), (10.0, 0.0)],
            color: WHITE,
            thick: 4.0,
        };
        let eraser = Shape::Eraser {
            points: vec![(0.0, 0.0), (10.0, 0.0)],
            thick: 4.0,
        };

        let pen_rect = pen.bounding_box().unwrap();
        let eraser_rect = eraser.bounding_box().unwrap();
        assert!(eraser_rect.width > pen_rect.width);
        assert_eq!(eraser_rect.x, -4.0);
        assert_eq!(eraser_rect.width, 18.0);
    }

    #[test]
    fn rect_bounding_box_covers_negative_extent() {
        let shape = Shape::Rect {
            x: 50.0,
            y: 40.0,
            w: -30.0,
            h: -20.0,
            color: WHITE,
            thick: 2.0,
        };

        let rect = shape.bounding_box().expect("rect should have bounds");
        assert_eq!(rect.x, 19.0);
        assert_eq!(rect.y, 19.0);
        assert_eq!(rect.width, 32.0);
        assert_eq!(rect.height, 22.0);
    }

    #[test]
    fn ellipse_bounding_box_uses_diagonal_radius() {
        let shape = Shape::Ellipse {
            x: 100.0,
            y: 100.0,
            w: 3.0,
            h: 4.0,
            color: WHITE,
            thick: 2.0,
        };

        // radius = hypot(3, 4) = 5, padding = 1
        let rect = shape.bounding_box().expect("ellipse should have bounds");
        assert_eq!(rect.x, 94.0);
        assert_eq!(rect.y, 94.0);
        assert_eq!(rect.width, 12.0);
        assert_eq!(rect.height, 12.0);
    }

    #[test]
    fn text_bounding_box_is_non_zero() {
        let shape = Shape::Text {
            x: 10.0,
            y: 20.0,
            text: "Hello".to_string(),
            color: WHITE,
            size: 24.0,
            font: FontStyle::default(),
            align: TextAlign::Left,
        };

        let rect = shape.bounding_box().expect("text should have bounds");
        assert!(rect.width > 0.0);
        assert!(rect.height > 0.0);
        assert!(rect.y <= 20.0);
    }

    #[test]
    fn text_alignment_shifts_bounds_left() {
        let make = |align| Shape::Text {
            x: 200.0,
            y: 50.0,
            text: "Hello".to_string(),
            color: WHITE,
            size: 24.0,
            font: FontStyle::default(),
            align,
        };

        let left = make(TextAlign::Left).bounding_box().unwrap();
        let center = make(TextAlign::Center).bounding_box().unwrap();
        let right = make(TextAlign::Right).bounding_box().unwrap();

        assert!(center.x < left.x);
        assert!(right.x < center.x);
        assert!((left.width - right.width).abs() < 0.5);
    }

    #[test]
    fn empty_text_has_no_bounds() {
        let shape = Shape::Text {
            x: 0.0,
            y: 0.0,
            text: String::new(),
            color: WHITE,
            size: 24.0,
            font: FontStyle::default(),
            align: TextAlign::Left,
        };
        assert!(shape.bounding_box().is_none());
    }

    #[test]
    fn translate_moves_every_point() {
        let mut stroke = Shape::Freehand {
            points: vec![(1.0, 2.0), (3.0, 4.0)],
            color: WHITE,
            thick: 2.0,
        };
        stroke.translate(10.0, -2.0);
        if let Shape::Freehand { points, .. } = &stroke {
            assert_eq!(points[0], (11.0, 0.0));
            assert_eq!(points[1], (13.0, 2.0));
        } else {
            unreachable!();
        }

        let mut rect = Shape::Rect {
            x: 5.0,
            y: 5.0,
            w: 10.0,
            h: 10.0,
            color: WHITE,
            thick: 1.0,
        };
        rect.translate(-5.0, 5.0);
        if let Shape::Rect { x, y, w, h, .. } = rect {
            assert_eq!((x, y, w, h), (0.0, 10.0, 10.0, 10.0));
        } else {
            unreachable!();
        }
    }
}
