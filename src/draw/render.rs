//! Cairo-based rendering for the sketch canvas.
//!
//! The scene renderer is a pure function of (shape collection, selection,
//! in-progress shape, viewport): it clears the surface, optionally draws the
//! grid, then paints every shape in z-order, the dashed selection outline,
//! and finally the provisional shape on top.

use super::color::{Color, GRID_GRAY, WHITE};
use super::font::FontStyle;
use super::frame::Frame;
use super::shape::{ERASER_WIDTH_FACTOR, Shape};
use super::viewport::Viewport;
use crate::util::Rect;

/// Outward inset of the dashed selection outline from the shape bounds.
const SELECTION_MARGIN: f64 = 6.0;
/// Dash on/off length for the selection outline, in canvas pixels.
const SELECTION_DASH: f64 = 4.0;
/// Selection outline color.
const SELECTION_COLOR: Color = Color {
    r: 0.15,
    g: 0.45,
    b: 0.95,
    a: 1.0,
};

/// Renders the full editing view of the canvas.
///
/// `width`/`height` are the device dimensions of the target surface; the zoom
/// factor of `viewport` is applied as a context scale, so all shape geometry
/// stays in canvas space.
#[allow(clippy::too_many_arguments)]
pub fn render_scene(
    ctx: &cairo::Context,
    frame: &Frame,
    selection: Option<usize>,
    provisional: Option<&Shape>,
    viewport: &Viewport,
    background: Color,
    width: i32,
    height: i32,
) {
    ctx.set_source_rgba(background.r, background.g, background.b, background.a);
    let _ = ctx.paint();

    ctx.save().ok();
    ctx.scale(viewport.zoom, viewport.zoom);

    if viewport.show_grid {
        // The scaled context shrinks the visible extent by the zoom factor.
        let extent_w = width as f64 / viewport.zoom;
        let extent_h = height as f64 / viewport.zoom;
        render_grid(ctx, viewport.grid_spacing, extent_w, extent_h);
    }

    render_shapes(ctx, &frame.shapes);

    if let Some(index) = selection
        && let Some(shape) = frame.shapes.get(index)
        && let Some(bounds) = shape.bounding_box()
    {
        render_selection_outline(ctx, &bounds);
    }

    if let Some(shape) = provisional {
        render_shape(ctx, shape);
    }

    ctx.restore().ok();
}

/// Renders all shapes in a collection to a Cairo context.
///
/// Shapes are drawn in the order they appear (first shape = bottom layer).
pub fn render_shapes(ctx: &cairo::Context, shapes: &[Shape]) {
    for shape in shapes {
        render_shape(ctx, shape);
    }
}

/// Renders a single shape to a Cairo context.
///
/// Dispatches to the appropriate internal rendering function based on shape
/// type. Handles all variants: Freehand, Rect, Ellipse, Text, and Eraser.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape) {
    match shape {
        Shape::Freehand {
            points,
            color,
            thick,
        } => {
            render_freehand_borrowed(ctx, points, *color, *thick);
        }
        Shape::Rect {
            x,
            y,
            w,
            h,
            color,
            thick,
        } => {
            render_rect(ctx, *x, *y, *w, *h, *color, *thick);
        }
        Shape::Ellipse {
            x,
            y,
            w,
            h,
            color,
            thick,
        } => {
            render_ellipse(ctx, *x, *y, *w, *h, *color, *thick);
        }
        Shape::Text {
            x,
            y,
            text,
            color,
            size,
            font,
            align,
        } => {
            render_text(ctx, *x, *y, text, *color, *size, font, *align);
        }
        Shape::Eraser { points, thick } => {
            // Opaque white at double width; covers earlier shapes rather than
            // destructively erasing pixels.
            render_freehand_borrowed(ctx, points, WHITE, *thick * ERASER_WIDTH_FACTOR);
        }
    }
}

/// Draws grid lines at `spacing` canvas-pixel intervals over the extent.
fn render_grid(ctx: &cairo::Context, spacing: f64, extent_w: f64, extent_h: f64) {
    if spacing <= 0.0 {
        return;
    }

    ctx.set_source_rgba(GRID_GRAY.r, GRID_GRAY.g, GRID_GRAY.b, GRID_GRAY.a);
    ctx.set_line_width(1.0);

    let mut x = spacing;
    while x < extent_w {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, extent_h);
        x += spacing;
    }

    let mut y = spacing;
    while y < extent_h {
        ctx.move_to(0.0, y);
        ctx.line_to(extent_w, y);
        y += spacing;
    }

    let _ = ctx.stroke();
}

/// Draws a dashed rectangle around the selected shape's bounds.
fn render_selection_outline(ctx: &cairo::Context, bounds: &Rect) {
    let outline = bounds.inflate(SELECTION_MARGIN);

    ctx.save().ok();
    ctx.set_source_rgba(
        SELECTION_COLOR.r,
        SELECTION_COLOR.g,
        SELECTION_COLOR.b,
        SELECTION_COLOR.a,
    );
    ctx.set_line_width(1.5);
    ctx.set_dash(&[SELECTION_DASH, SELECTION_DASH], 0.0);
    ctx.rectangle(outline.x, outline.y, outline.width, outline.height);
    let _ = ctx.stroke();
    ctx.restore().ok();
}

/// Render freehand stroke (polyline through points)
///
/// This function accepts a borrowed slice, avoiding clones when rendering the
/// in-progress stroke on every frame.
pub fn render_freehand_borrowed(
    ctx: &cairo::Context,
    points: &[(f64, f64)],
    color: Color,
    thick: f64,
) {
    if points.is_empty() {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    let (x0, y0) = points[0];
    ctx.move_to(x0, y0);

    for &(x, y) in &points[1..] {
        ctx.line_to(x, y);
    }

    let _ = ctx.stroke();
}

/// Render a rectangle (outline)
fn render_rect(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, color: Color, thick: f64) {
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.set_line_join(cairo::LineJoin::Miter);

    // Committed rectangles are normalized, but the in-progress rectangle can
    // carry a negative extent while dragging up/left.
    let (norm_x, norm_w) = if w >= 0.0 { (x, w) } else { (x + w, -w) };
    let (norm_y, norm_h) = if h >= 0.0 { (y, h) } else { (y + h, -h) };

    ctx.rectangle(norm_x, norm_y, norm_w, norm_h);
    let _ = ctx.stroke();
}

/// Render an ellipse: a circle anchored at the drag origin whose radius is
/// the length of the drag-box diagonal.
fn render_ellipse(ctx: &cairo::Context, x: f64, y: f64, w: f64, h: f64, color: Color, thick: f64) {
    let radius = (w * w + h * h).sqrt();
    if radius <= 0.0 {
        return;
    }

    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    ctx.set_line_width(thick);
    ctx.arc(x, y, radius, 0.0, 2.0 * std::f64::consts::PI);
    let _ = ctx.stroke();
}

/// Renders text at a specified position using Pango.
///
/// The anchor (x, y) is the baseline start, shifted left by half or all of
/// the rendered width for center/right alignment. Bold and italic flags feed
/// the font description; the underline flag draws a separate line segment
/// measured against the rendered text width.
#[allow(clippy::too_many_arguments)]
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font: &FontStyle,
    align: super::font::TextAlign,
) {
    if text.is_empty() {
        return;
    }

    // Save context state to prevent settings from leaking to other drawing operations
    ctx.save().ok();

    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);

    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    let scale = pango::SCALE as f64;
    let (_, logical_rect) = layout.extents();
    let text_width = logical_rect.width() as f64 / scale;

    // Pango measures from the top-left; we anchor on the baseline.
    let baseline = layout.baseline() as f64 / scale;
    let draw_x = x + align.offset(text_width);
    let draw_y = y - baseline;

    ctx.move_to(draw_x, draw_y);
    ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    pangocairo::functions::show_layout(ctx, &layout);

    if font.underline {
        let underline_y = y + size * 0.1;
        ctx.set_line_width((size * 0.06).max(1.0));
        ctx.set_line_cap(cairo::LineCap::Butt);
        ctx.move_to(draw_x, underline_y);
        ctx.line_to(draw_x + text_width, underline_y);
        let _ = ctx.stroke();
    }

    ctx.restore().ok();
}
