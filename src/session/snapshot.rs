use super::options::{CompressionMode, SessionOptions};
use crate::draw::{Color, FontStyle, Frame, TextAlign, viewport};
use crate::input::{InputState, Tool};
use anyhow::{Context, Result};
use chrono::Utc;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use fs2::FileExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;

const CURRENT_VERSION: u32 = 1;

/// Captured state suitable for serialisation or restoration.
#[derive(Debug, Clone)]
pub struct SketchSnapshot {
    pub frame: Option<Frame>,
    pub tool_state: Option<ToolStateSnapshot>,
}

impl SketchSnapshot {
    fn is_empty(&self) -> bool {
        self.frame.as_ref().is_none_or(|frame| frame.is_empty()) && self.tool_state.is_none()
    }
}

/// Persisted tool settings restored alongside the drawing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolStateSnapshot {
    pub active_tool: Tool,
    pub current_color: Color,
    pub current_thickness: f64,
    pub current_font_size: f64,
    pub current_font: FontStyle,
    pub current_align: TextAlign,
    pub zoom: f64,
    pub show_grid: bool,
}

/// On-disk representation of a session file.
#[derive(Debug, Serialize, Deserialize)]
struct SessionFile {
    version: u32,
    saved_at: String,
    #[serde(default)]
    frame: Option<Frame>,
    #[serde(default)]
    tool_state: Option<ToolStateSnapshot>,
}

pub(crate) struct LoadedSnapshot {
    pub snapshot: SketchSnapshot,
    pub compressed: bool,
}

/// Builds a snapshot of the current editor state.
///
/// Returns `None` when there is nothing worth persisting (empty drawing and
/// tool-state restoration disabled).
pub fn snapshot_from_input(input: &InputState, options: &SessionOptions) -> Option<SketchSnapshot> {
    let frame = if options.enabled && !input.frame.is_empty() {
        Some(input.frame.clone())
    } else {
        None
    };

    let tool_state = options.restore_tool_state.then(|| ToolStateSnapshot {
        active_tool: input.active_tool,
        current_color: input.current_color,
        current_thickness: input.current_thickness,
        current_font_size: input.current_font_size,
        current_font: input.current_font.clone(),
        current_align: input.current_align,
        zoom: input.viewport.zoom,
        show_grid: input.viewport.show_grid,
    });

    let snapshot = SketchSnapshot { frame, tool_state };
    if snapshot.is_empty() {
        return None;
    }
    Some(snapshot)
}

/// Serialises the current editor state to the configured session file.
///
/// The write is atomic (tmp file + rename) and holds an exclusive lock on
/// the side-channel lock file. Depending on the compression mode, the JSON
/// payload is gzipped. One backup of the previous session file is rotated
/// when retention allows it. Returns `false` when nothing was persisted.
pub fn save_snapshot(input: &InputState, options: &SessionOptions) -> Result<bool> {
    let Some(mut snapshot) = snapshot_from_input(input, options) else {
        debug!("Nothing to persist; skipping session save");
        return Ok(false);
    };

    enforce_shape_limit(&mut snapshot, options.max_shapes);

    fs::create_dir_all(&options.base_dir).with_context(|| {
        format!(
            "failed to create session directory {}",
            options.base_dir.display()
        )
    })?;

    let session_file = SessionFile {
        version: CURRENT_VERSION,
        saved_at: Utc::now().to_rfc3339(),
        frame: snapshot.frame,
        tool_state: snapshot.tool_state,
    };

    let json_bytes = serde_json::to_vec(&session_file).context("failed to serialise session")?;

    let should_compress = match options.compression {
        CompressionMode::On => true,
        CompressionMode::Off => false,
        CompressionMode::Auto => json_bytes.len() as u64 > options.auto_compress_threshold_bytes,
    };

    let payload = if should_compress {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder
            .write_all(&json_bytes)
            .context("failed to compress session payload")?;
        encoder.finish().context("failed to finish gzip stream")?
    } else {
        json_bytes.clone()
    };

    let lock_path = options.lock_file_path();
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open session lock file {}", lock_path.display()))?;
    lock_file
        .lock_exclusive()
        .with_context(|| format!("failed to acquire exclusive lock {}", lock_path.display()))?;

    let result = write_session_file(&payload, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock session file {}: {}",
            lock_path.display(),
            err
        )
    });

    result?;

    info!(
        "Session saved to {} ({} bytes, compression={})",
        options.session_file_path().display(),
        json_bytes.len(),
        should_compress
    );

    Ok(true)
}

fn write_session_file(payload: &[u8], options: &SessionOptions) -> Result<()> {
    let session_path = options.session_file_path();
    let backup_path = options.backup_file_path();
    let tmp_path = options.base_dir.join(format!("{}.json.tmp", options.file_stem));

    {
        let mut tmp = File::create(&tmp_path).with_context(|| {
            format!("failed to create temporary session file {}", tmp_path.display())
        })?;
        tmp.write_all(payload)
            .context("failed to write session payload")?;
        tmp.sync_all().ok();
    }

    if session_path.exists() {
        if options.backup_retention > 0 {
            if backup_path.exists() {
                fs::remove_file(&backup_path).ok();
            }
            fs::rename(&session_path, &backup_path).with_context(|| {
                format!(
                    "failed to rotate previous session file {} -> {}",
                    session_path.display(),
                    backup_path.display()
                )
            })?;
        } else {
            fs::remove_file(&session_path).ok();
        }
    }

    fs::rename(&tmp_path, &session_path).with_context(|| {
        format!(
            "failed to move temporary session file {} -> {}",
            tmp_path.display(),
            session_path.display()
        )
    })?;

    Ok(())
}

/// Attempt to load a previously saved session.
pub fn load_snapshot(options: &SessionOptions) -> Result<Option<SketchSnapshot>> {
    if !options.enabled && !options.restore_tool_state {
        debug!("Session persistence disabled; skipping load");
        return Ok(None);
    }

    let session_path = options.session_file_path();
    if !session_path.exists() {
        debug!(
            "No session file present at {}, skipping load",
            session_path.display()
        );
        return Ok(None);
    }

    let metadata = fs::metadata(&session_path)
        .with_context(|| format!("failed to stat session file {}", session_path.display()))?;
    if metadata.len() > options.max_file_size_bytes {
        warn!(
            "Session file {} is {} bytes which exceeds the configured limit ({} bytes); refusing to load",
            session_path.display(),
            metadata.len(),
            options.max_file_size_bytes
        );
        return Ok(None);
    }

    let lock_path = options.lock_file_path();
    let lock_file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(&lock_path)
        .with_context(|| format!("failed to open session lock file {}", lock_path.display()))?;
    lock_file
        .lock_shared()
        .with_context(|| format!("failed to acquire shared lock {}", lock_path.display()))?;

    let result = load_snapshot_inner(&session_path, options);

    lock_file.unlock().unwrap_or_else(|err| {
        warn!(
            "failed to unlock session file {}: {}",
            lock_path.display(),
            err
        )
    });

    match result? {
        Some(loaded) => Ok(Some(loaded.snapshot)),
        None => Ok(None),
    }
}

pub(crate) fn load_snapshot_inner(
    session_path: &Path,
    options: &SessionOptions,
) -> Result<Option<LoadedSnapshot>> {
    let mut file_bytes = Vec::new();
    {
        let mut file = File::open(session_path)
            .with_context(|| format!("failed to open session file {}", session_path.display()))?;
        file.read_to_end(&mut file_bytes)
            .context("failed to read session file")?;
    }

    let compressed = is_gzip(&file_bytes);
    let decompressed = if compressed {
        let mut decoder = GzDecoder::new(&file_bytes[..]);
        let mut out = Vec::new();
        decoder
            .read_to_end(&mut out)
            .context("failed to decompress session file")?;
        out
    } else {
        file_bytes
    };

    let session_file: SessionFile =
        serde_json::from_slice(&decompressed).context("failed to parse session json")?;

    let mut snapshot = SketchSnapshot {
        frame: session_file.frame,
        tool_state: session_file.tool_state,
    };

    enforce_shape_limit(&mut snapshot, options.max_shapes);

    if snapshot.is_empty() {
        debug!(
            "Loaded session file at {} but it contained no data",
            session_path.display()
        );
        return Ok(None);
    }

    Ok(Some(LoadedSnapshot {
        snapshot,
        compressed,
    }))
}

/// Apply a session snapshot to the live [`InputState`].
///
/// Restoring the drawing resets the undo history with the loaded frame as
/// its new baseline; restored tool values are re-clamped to their valid
/// ranges in case the file was edited by hand.
pub fn apply_snapshot(input: &mut InputState, snapshot: SketchSnapshot, options: &SessionOptions) {
    if options.enabled
        && let Some(frame) = snapshot.frame
    {
        input.frame = frame;
        input.history.reset(&input.frame);
        input.selection = None;
        input.needs_redraw = true;
    }

    if options.restore_tool_state
        && let Some(tool_state) = snapshot.tool_state
    {
        input.active_tool = tool_state.active_tool;
        input.current_color = tool_state.current_color;
        input.current_thickness = tool_state.current_thickness.clamp(1.0, 20.0);
        input.current_font_size = tool_state.current_font_size.clamp(8.0, 72.0);
        input.current_font = tool_state.current_font;
        input.current_align = tool_state.current_align;
        input.viewport.zoom = tool_state.zoom.clamp(viewport::MIN_ZOOM, viewport::MAX_ZOOM);
        input.viewport.show_grid = tool_state.show_grid;
        input.needs_redraw = true;
    }
}

fn enforce_shape_limit(snapshot: &mut SketchSnapshot, max_shapes: usize) {
    if max_shapes == 0 {
        return;
    }
    if let Some(frame) = snapshot.frame.as_mut()
        && frame.len() > max_shapes
    {
        warn!(
            "Session frame holds {} shapes, truncating to the configured limit of {}",
            frame.len(),
            max_shapes
        );
        frame.shapes.truncate(max_shapes);
    }
}

fn is_gzip(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes[0] == 0x1f && bytes[1] == 0x8b
}
