//! Raster export of the canvas content.
//!
//! Export always renders at native scale (zoom 1.0) regardless of the
//! on-screen zoom, and contains only the drawing itself: no grid lines and
//! no selection outline.

use crate::draw::{Viewport, render_scene};
use crate::input::InputState;
use std::fs::{self, File};
use std::path::Path;
use thiserror::Error;

/// Failures while rasterizing or writing the canvas image.
///
/// All of these are recoverable: the editor state is never touched by an
/// export, so callers report the error and carry on.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Surface or context creation failed
    #[error("failed to prepare render surface: {0}")]
    Cairo(#[from] cairo::Error),

    /// PNG encoding failed
    #[error("failed to encode png: {0}")]
    Png(#[from] cairo::IoError),

    /// Creating or writing the output file failed
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Renders the drawing into an image surface at native scale.
///
/// The surface has the canvas dimensions of the editor state; the current
/// zoom, grid and selection are deliberately ignored.
pub fn render_to_surface(input: &InputState) -> Result<cairo::ImageSurface, ExportError> {
    let width = input.canvas_width as i32;
    let height = input.canvas_height as i32;

    let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
    let ctx = cairo::Context::new(&surface)?;

    let viewport = Viewport {
        zoom: 1.0,
        show_grid: false,
        grid_spacing: input.viewport.grid_spacing,
    };
    render_scene(
        &ctx,
        &input.frame,
        None,
        None,
        &viewport,
        input.background,
        width,
        height,
    );
    drop(ctx);

    Ok(surface)
}

/// Writes the drawing to `path` as a PNG file.
///
/// Parent directories are created as needed. The editor state is read-only
/// here; a failed export leaves everything untouched.
pub fn export_png(input: &InputState, path: &Path) -> Result<(), ExportError> {
    let surface = render_to_surface(input)?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }

    let mut file = File::create(path)?;
    surface.write_to_png(&mut file)?;

    log::info!("Exported canvas to {}", path.display());
    Ok(())
}
