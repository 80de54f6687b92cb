//! Configuration type definitions.

use super::enums::{ColorSpec, SessionCompression, SessionStorageMode};
use serde::{Deserialize, Serialize};

/// Drawing-related settings.
///
/// Controls the default appearance of drawing tools when the canvas first
/// opens. The embedding front-end's tool panel changes these at runtime.
#[derive(Debug, Serialize, Deserialize)]
pub struct DrawingConfig {
    /// Default pen color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_color")]
    pub default_color: ColorSpec,

    /// Default pen thickness in pixels (valid range: 1.0 - 20.0)
    #[serde(default = "default_thickness")]
    pub default_thickness: f64,

    /// Default font size for the text tool in points (valid range: 8.0 - 72.0)
    #[serde(default = "default_font_size")]
    pub default_font_size: f64,

    /// Font family name for text rendering (e.g., "Sans", "Monospace", "JetBrains Mono")
    /// Falls back to "Sans" if the specified font is not available
    /// Note: Install fonts system-wide and reference by family name
    #[serde(default = "default_font_family")]
    pub font_family: String,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            default_thickness: default_thickness(),
            default_font_size: default_font_size(),
            font_family: default_font_family(),
        }
    }
}

/// Canvas surface settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 64 - 8192)
    #[serde(default = "default_canvas_width")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 64 - 8192)
    #[serde(default = "default_canvas_height")]
    pub height: u32,

    /// Canvas background color. Note that eraser marks paint opaque white,
    /// so non-white backgrounds will show them.
    #[serde(default = "default_background")]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_width(),
            height: default_canvas_height(),
            background: default_background(),
        }
    }
}

/// Grid overlay settings.
#[derive(Debug, Serialize, Deserialize)]
pub struct GridConfig {
    /// Whether the grid is visible when the canvas opens
    #[serde(default)]
    pub enabled: bool,

    /// Grid line interval in canvas pixels (valid range: 4.0 - 256.0)
    #[serde(default = "default_grid_spacing")]
    pub spacing: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            spacing: default_grid_spacing(),
        }
    }
}

/// Session persistence settings.
///
/// Controls whether and where the current drawing is saved between runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Persist the drawing across runs
    #[serde(default)]
    pub enabled: bool,

    /// Where the session file lives (auto, config, custom)
    #[serde(default)]
    pub storage: SessionStorageMode,

    /// Directory used when `storage = "custom"` (supports a leading `~/`)
    #[serde(default)]
    pub custom_directory: Option<String>,

    /// Restore pen color, thickness, font and zoom along with the shapes
    #[serde(default = "default_true")]
    pub restore_tool_state: bool,

    /// Maximum number of shapes loaded from a session file (0 = unlimited)
    #[serde(default = "default_max_shapes")]
    pub max_shapes: usize,

    /// Refuse to load session files larger than this many MiB
    #[serde(default = "default_max_file_size_mb")]
    pub max_file_size_mb: u64,

    /// Gzip compression mode (auto, on, off)
    #[serde(default)]
    pub compress: SessionCompression,

    /// Auto mode gzips payloads above this many KiB
    #[serde(default = "default_auto_compress_threshold_kb")]
    pub auto_compress_threshold_kb: u64,

    /// Number of rotated backups to keep (0 disables backups)
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            storage: SessionStorageMode::default(),
            custom_directory: None,
            restore_tool_state: default_true(),
            max_shapes: default_max_shapes(),
            max_file_size_mb: default_max_file_size_mb(),
            compress: SessionCompression::default(),
            auto_compress_threshold_kb: default_auto_compress_threshold_kb(),
            backup_retention: default_backup_retention(),
        }
    }
}

/// Gallery settings for saved rasterizations.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GalleryConfig {
    /// Directory for saved PNG snapshots (supports a leading `~/`).
    /// Defaults to `sketchboard/gallery` under the user data directory.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_thickness() -> f64 {
    3.0
}

fn default_font_size() -> f64 {
    24.0
}

fn default_font_family() -> String {
    "Sans".to_string()
}

fn default_canvas_width() -> u32 {
    1024
}

fn default_canvas_height() -> u32 {
    640
}

fn default_background() -> ColorSpec {
    ColorSpec::Name("white".to_string())
}

fn default_grid_spacing() -> f64 {
    25.0
}

fn default_true() -> bool {
    true
}

fn default_max_shapes() -> usize {
    10_000
}

fn default_max_file_size_mb() -> u64 {
    10
}

fn default_auto_compress_threshold_kb() -> u64 {
    100
}

fn default_backup_retention() -> usize {
    1
}
