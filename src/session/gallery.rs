//! Gallery of saved canvas rasterizations.
//!
//! Saved drawings are plain PNG snapshots of the canvas pixel content; the
//! list is display-only and never parsed back into shapes.

use super::export;
use crate::config::GalleryConfig;
use crate::input::InputState;
use anyhow::{Context, Result};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// One saved rasterization on disk.
#[derive(Debug, Clone)]
pub struct GalleryEntry {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub modified: Option<SystemTime>,
}

/// Directory of saved canvas snapshots.
#[derive(Debug, Clone)]
pub struct Gallery {
    dir: PathBuf,
}

impl Gallery {
    /// Creates a gallery rooted at the given directory.
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Resolves the gallery directory from configuration.
    ///
    /// Defaults to `sketchboard/gallery` under the user data directory when
    /// no directory is configured.
    pub fn from_config(config: &GalleryConfig) -> Result<Self> {
        let dir = match &config.directory {
            Some(raw) => super::options::expand_tilde(raw),
            None => dirs::data_dir()
                .context("Could not find data directory")?
                .join("sketchboard")
                .join("gallery"),
        };
        Ok(Self::new(dir))
    }

    /// Directory this gallery saves into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves a PNG snapshot of the current canvas and returns its path.
    ///
    /// File names are timestamped (`sketch-YYYYMMDD-HHMMSS.png`); a numeric
    /// suffix keeps rapid consecutive saves from colliding. Failures (e.g.
    /// the disk filling up) are reported to the caller and leave the editor
    /// state untouched.
    pub fn save(&self, input: &InputState) -> Result<PathBuf> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create gallery directory {}", self.dir.display()))?;

        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        let mut path = self.dir.join(format!("sketch-{stamp}.png"));
        let mut counter = 1;
        while path.exists() {
            path = self.dir.join(format!("sketch-{stamp}-{counter}.png"));
            counter += 1;
        }

        export::export_png(input, &path)
            .with_context(|| format!("failed to save snapshot to {}", path.display()))?;

        log::info!("Saved drawing snapshot to {}", path.display());
        Ok(path)
    }

    /// Lists saved snapshots, newest first.
    ///
    /// A missing gallery directory is an empty gallery, not an error.
    pub fn list(&self) -> Result<Vec<GalleryEntry>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("failed to read gallery directory {}", self.dir.display())
                });
            }
        };

        let mut saved = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some("png") {
                continue;
            }
            let metadata = entry.metadata()?;
            saved.push(GalleryEntry {
                path,
                size_bytes: metadata.len(),
                modified: metadata.modified().ok(),
            });
        }

        saved.sort_by(|a, b| b.modified.cmp(&a.modified));
        Ok(saved)
    }
}
