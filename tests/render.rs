use cairo::{Context, Format, ImageSurface};
use sketchboard::draw::color::{BLACK, RED, WHITE};
use sketchboard::draw::{FontStyle, Frame, Shape, TextAlign, Viewport, render_scene};
use sketchboard::input::{InputState, MouseButton, Tool};
use sketchboard::session;

fn make_input_state() -> InputState {
    InputState::with_defaults(
        BLACK,
        4.0,
        24.0,
        FontStyle::default(),
        WHITE,
        Viewport::default(),
        200,
        200,
    )
}

fn surface_with_context(width: i32, height: i32) -> (ImageSurface, Context) {
    let surface = ImageSurface::create(Format::ARgb32, width, height).unwrap();
    let ctx = Context::new(&surface).unwrap();
    (surface, ctx)
}

/// Returns the (r, g, b) bytes of the pixel at (x, y).
fn pixel_at(surface: &mut ImageSurface, x: usize, y: usize) -> (u8, u8, u8) {
    let stride = surface.stride() as usize;
    let data = surface.data().unwrap();
    let offset = y * stride + x * 4;
    // ARgb32 is stored as one native-endian u32 per pixel
    let px = u32::from_ne_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ]);
    (
        ((px >> 16) & 0xff) as u8,
        ((px >> 8) & 0xff) as u8,
        (px & 0xff) as u8,
    )
}

fn count_non_background(surface: &mut ImageSurface) -> usize {
    let stride = surface.stride() as usize;
    let width = surface.width() as usize;
    let height = surface.height() as usize;
    let data = surface.data().unwrap();

    let mut count = 0;
    for y in 0..height {
        for x in 0..width {
            let offset = y * stride + x * 4;
            let px = u32::from_ne_bytes([
                data[offset],
                data[offset + 1],
                data[offset + 2],
                data[offset + 3],
            ]);
            if px != 0xffff_ffff {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn empty_scene_is_plain_background() {
    let input = make_input_state();
    let (mut surface, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    assert_eq!(count_non_background(&mut surface), 0);
    assert_eq!(pixel_at(&mut surface, 50, 50), (255, 255, 255));
}

#[test]
fn committed_shapes_paint_pixels() {
    let mut input = make_input_state();
    input.set_tool(Tool::Rect);
    input.on_pointer_press(MouseButton::Left, 20.0, 20.0);
    input.on_pointer_motion(80.0, 80.0);
    input.on_pointer_release(MouseButton::Left, 80.0, 80.0);

    let (mut surface, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    assert!(count_non_background(&mut surface) > 0);
    // The rect border passes through (50, 20); its interior stays white
    let (r, g, b) = pixel_at(&mut surface, 50, 20);
    assert!(r < 128 && g < 128 && b < 128);
    assert_eq!(pixel_at(&mut surface, 50, 50), (255, 255, 255));
}

#[test]
fn grid_renders_when_enabled() {
    let mut input = make_input_state();

    let (mut without_grid, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    input.toggle_grid();
    let (mut with_grid, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    assert_eq!(count_non_background(&mut without_grid), 0);
    assert!(count_non_background(&mut with_grid) > 0);
}

#[test]
fn selection_outline_adds_chrome() {
    let mut input = make_input_state();
    input.set_tool(Tool::Rect);
    input.on_pointer_press(MouseButton::Left, 40.0, 40.0);
    input.on_pointer_motion(60.0, 60.0);
    input.on_pointer_release(MouseButton::Left, 60.0, 60.0);

    let (mut unselected, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    input.set_tool(Tool::Select);
    input.on_pointer_press(MouseButton::Left, 50.0, 50.0);
    input.on_pointer_release(MouseButton::Left, 50.0, 50.0);
    assert_eq!(input.selection, Some(0));

    let (mut selected, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    assert!(count_non_background(&mut selected) > count_non_background(&mut unselected));
}

#[test]
fn provisional_shape_is_drawn_live() {
    let mut input = make_input_state();
    input.on_pointer_press(MouseButton::Left, 10.0, 50.0);
    input.on_pointer_motion(90.0, 50.0);

    let (mut surface, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);

    // Nothing committed yet, but the in-progress stroke is visible
    assert!(input.frame.is_empty());
    let (r, _, _) = pixel_at(&mut surface, 50, 50);
    assert!(r < 128);
}

#[test]
fn zoom_scales_the_rendered_scene() {
    let mut frame = Frame::new();
    frame.add_shape(Shape::Rect {
        x: 150.0,
        y: 150.0,
        w: 20.0,
        h: 20.0,
        color: RED,
        thick: 3.0,
    });

    // At zoom 1.0 the rect lies outside a 100x100 surface
    let viewport = Viewport::default();
    let (mut surface, ctx) = surface_with_context(100, 100);
    render_scene(&ctx, &frame, None, None, &viewport, WHITE, 100, 100);
    drop(ctx);
    assert_eq!(count_non_background(&mut surface), 0);

    // Zoomed out to 0.5 it becomes visible
    let mut zoomed_out = Viewport::default();
    zoomed_out.zoom = 0.5;
    let (mut surface, ctx) = surface_with_context(100, 100);
    render_scene(&ctx, &frame, None, None, &zoomed_out, WHITE, 100, 100);
    drop(ctx);
    assert!(count_non_background(&mut surface) > 0);
}

#[test]
fn eraser_paints_over_earlier_shapes() {
    let mut input = make_input_state();

    // A black stroke across the middle...
    input.on_pointer_press(MouseButton::Left, 10.0, 50.0);
    input.on_pointer_motion(90.0, 50.0);
    input.on_pointer_release(MouseButton::Left, 90.0, 50.0);

    let (mut surface, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);
    let (r, _, _) = pixel_at(&mut surface, 50, 50);
    assert!(r < 128);

    // ...is covered by an eraser stroke over the same path
    input.set_tool(Tool::Eraser);
    input.on_pointer_press(MouseButton::Left, 10.0, 50.0);
    input.on_pointer_motion(90.0, 50.0);
    input.on_pointer_release(MouseButton::Left, 90.0, 50.0);

    let (mut surface, ctx) = surface_with_context(100, 100);
    input.render(&ctx, 100, 100);
    drop(ctx);
    assert_eq!(pixel_at(&mut surface, 50, 50), (255, 255, 255));
}

#[test]
fn text_with_styles_renders_pixels() {
    let mut frame = Frame::new();
    frame.add_shape(Shape::Text {
        x: 10.0,
        y: 60.0,
        text: "Hi".to_string(),
        color: BLACK,
        size: 32.0,
        font: FontStyle::new("Sans", true, true, true),
        align: TextAlign::Left,
    });

    let viewport = Viewport::default();
    let (mut surface, ctx) = surface_with_context(120, 100);
    render_scene(&ctx, &frame, None, None, &viewport, WHITE, 120, 100);
    drop(ctx);

    assert!(count_non_background(&mut surface) > 0);
}

#[test]
fn export_renders_native_scale_regardless_of_zoom() {
    let temp = tempfile::tempdir().unwrap();

    let mut input = make_input_state();
    input.set_tool(Tool::Rect);
    input.on_pointer_press(MouseButton::Left, 20.0, 20.0);
    input.on_pointer_motion(80.0, 80.0);
    input.on_pointer_release(MouseButton::Left, 80.0, 80.0);

    let at_default = temp.path().join("default.png");
    session::export_png(&input, &at_default).unwrap();

    input.zoom_in();
    input.zoom_in();
    input.toggle_grid();
    let at_zoom = temp.path().join("zoomed.png");
    session::export_png(&input, &at_zoom).unwrap();

    let default_bytes = std::fs::read(&at_default).unwrap();
    let zoom_bytes = std::fs::read(&at_zoom).unwrap();
    assert_eq!(&default_bytes[..8], b"\x89PNG\r\n\x1a\n");
    // The on-screen zoom and grid must not leak into the export
    assert_eq!(default_bytes, zoom_bytes);
}

#[test]
fn export_excludes_selection_outline() {
    let temp = tempfile::tempdir().unwrap();

    let mut input = make_input_state();
    input.set_tool(Tool::Rect);
    input.on_pointer_press(MouseButton::Left, 20.0, 20.0);
    input.on_pointer_motion(80.0, 80.0);
    input.on_pointer_release(MouseButton::Left, 80.0, 80.0);

    let unselected = temp.path().join("plain.png");
    session::export_png(&input, &unselected).unwrap();

    input.set_tool(Tool::Select);
    input.on_pointer_press(MouseButton::Left, 50.0, 20.0);
    input.on_pointer_release(MouseButton::Left, 50.0, 20.0);
    assert_eq!(input.selection, Some(0));

    let selected = temp.path().join("selected.png");
    session::export_png(&input, &selected).unwrap();

    assert_eq!(
        std::fs::read(&unselected).unwrap(),
        std::fs::read(&selected).unwrap()
    );
}

#[test]
fn gallery_saves_and_lists_snapshots() {
    let temp = tempfile::tempdir().unwrap();
    let gallery = session::Gallery::new(temp.path().join("gallery"));

    let mut input = make_input_state();
    input.on_pointer_press(MouseButton::Left, 10.0, 10.0);
    input.on_pointer_motion(60.0, 60.0);
    input.on_pointer_release(MouseButton::Left, 60.0, 60.0);

    assert!(gallery.list().unwrap().is_empty());

    let first = gallery.save(&input).unwrap();
    let second = gallery.save(&input).unwrap();
    assert_ne!(first, second);

    let entries = gallery.list().unwrap();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert!(entry.size_bytes > 0);
        assert_eq!(
            entry.path.extension().and_then(|e| e.to_str()),
            Some("png")
        );
    }
}
