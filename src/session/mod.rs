//! Session persistence and raster output.
//!
//! Converts the in-memory drawing into a serialised representation, writes it
//! to disk with locking, optional compression, and backup rotation, restores
//! it on request, and produces the raster artifacts (PNG export, gallery
//! snapshots) the canvas hands to its persistence collaborators.

pub mod export;
pub mod gallery;
mod options;
mod snapshot;
mod storage;

pub use export::{ExportError, export_png, render_to_surface};
pub use gallery::{Gallery, GalleryEntry};
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, SessionOptions, options_from_config,
};
pub use snapshot::{
    SketchSnapshot, ToolStateSnapshot, apply_snapshot, load_snapshot, save_snapshot,
    snapshot_from_input,
};
pub use storage::{ClearOutcome, SessionInspection, clear_session, inspect_session};
