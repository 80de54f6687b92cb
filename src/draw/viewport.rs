//! Zoom and grid state for the canvas view.

use serde::{Deserialize, Serialize};

/// Minimum allowed zoom factor.
pub const MIN_ZOOM: f64 = 0.1;
/// Maximum allowed zoom factor.
pub const MAX_ZOOM: f64 = 5.0;
/// Multiplicative step applied by zoom in/out.
pub const ZOOM_STEP: f64 = 1.25;

/// View state affecting only the render transform.
///
/// Shapes are stored and mutated in unscaled canvas space; the zoom factor
/// scales the rendered output visually. Incoming device coordinates must be
/// mapped through [`Viewport::to_canvas`] before any hit-testing or point
/// capture, or selection and drawing will misalign with the visible cursor
/// at non-1.0 zoom. There is no pan model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Current zoom factor, kept within [`MIN_ZOOM`, `MAX_ZOOM`]
    pub zoom: f64,
    /// Whether grid lines are drawn under the shapes
    pub show_grid: bool,
    /// Grid line interval in canvas pixels
    pub grid_spacing: f64,
}

impl Viewport {
    /// Creates a viewport at 1.0 zoom with the given grid settings.
    pub fn new(show_grid: bool, grid_spacing: f64) -> Self {
        Self {
            zoom: 1.0,
            show_grid,
            grid_spacing,
        }
    }

    /// Multiplies the zoom factor by one step, clamped to the upper bound.
    pub fn zoom_in(&mut self) {
        self.zoom = (self.zoom * ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Divides the zoom factor by one step, clamped to the lower bound.
    pub fn zoom_out(&mut self) {
        self.zoom = (self.zoom / ZOOM_STEP).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Resets the zoom factor to 1.0.
    pub fn zoom_reset(&mut self) {
        self.zoom = 1.0;
    }

    /// Toggles grid visibility.
    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    /// Maps device coordinates (relative to the canvas surface) into canvas
    /// space by applying the inverse zoom transform.
    pub fn to_canvas(&self, device_x: f64, device_y: f64) -> (f64, f64) {
        (device_x / self.zoom, device_y / self.zoom)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(false, 25.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_steps_are_multiplicative_and_clamped() {
        let mut viewport = Viewport::default();
        viewport.zoom_in();
        assert!((viewport.zoom - 1.25).abs() < 1e-9);

        for _ in 0..50 {
            viewport.zoom_in();
        }
        assert_eq!(viewport.zoom, MAX_ZOOM);

        for _ in 0..100 {
            viewport.zoom_out();
        }
        assert_eq!(viewport.zoom, MIN_ZOOM);

        viewport.zoom_reset();
        assert_eq!(viewport.zoom, 1.0);
    }

    #[test]
    fn device_coordinates_divide_by_zoom() {
        let mut viewport = Viewport::default();
        viewport.zoom = 2.0;
        assert_eq!(viewport.to_canvas(100.0, 100.0), (50.0, 50.0));

        viewport.zoom = 0.5;
        assert_eq!(viewport.to_canvas(100.0, 40.0), (200.0, 80.0));
    }

    #[test]
    fn grid_toggle_flips_flag() {
        let mut viewport = Viewport::default();
        assert!(!viewport.show_grid);
        viewport.toggle_grid();
        assert!(viewport.show_grid);
        viewport.toggle_grid();
        assert!(!viewport.show_grid);
    }
}
