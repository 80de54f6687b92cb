use clap::{ArgAction, Parser};
use sketchboard::config::Config;
use sketchboard::input::InputState;
use sketchboard::session::{self, Gallery, SessionOptions};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sketchboard")]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("SKETCHBOARD_GIT_HASH"), ")"))]
#[command(about = "Canvas sketching engine with undo/redo, zoom, and PNG export")]
struct Cli {
    /// Path to the configuration file (defaults to ~/.config/sketchboard/config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the session file (overrides the [session] storage settings)
    #[arg(long, short = 's', value_name = "FILE")]
    session: Option<PathBuf>,

    /// Export the drawing to a PNG at native scale and exit
    #[arg(long, short = 'e', value_name = "FILE")]
    export: Option<PathBuf>,

    /// Save a PNG snapshot of the drawing into the gallery and exit
    #[arg(long, action = ArgAction::SetTrue)]
    snapshot: bool,

    /// List images saved in the gallery directory
    #[arg(long, action = ArgAction::SetTrue)]
    gallery: bool,

    /// Print details about the persisted session
    #[arg(long, action = ArgAction::SetTrue)]
    inspect: bool,

    /// Remove the persisted session (including its backup)
    #[arg(long, action = ArgAction::SetTrue)]
    clear_session: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let config_dir = match &cli.config {
        Some(path) => path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
        None => Config::get_config_path()?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };

    let mut options = session::options_from_config(&config.session, &config_dir)?;
    if let Some(path) = &cli.session {
        options = SessionOptions::with_file(path);
    }

    let has_action = cli.export.is_some()
        || cli.snapshot
        || cli.gallery
        || cli.inspect
        || cli.clear_session;

    if !has_action {
        println!("sketchboard: canvas sketching engine");
        println!();
        println!("Usage:");
        println!("  sketchboard --export FILE     Render the saved drawing to a PNG");
        println!("  sketchboard --snapshot        Save a PNG snapshot into the gallery");
        println!("  sketchboard --gallery         List saved gallery images");
        println!("  sketchboard --inspect         Show session file details");
        println!("  sketchboard --clear-session   Remove the persisted session");
        println!("  sketchboard --help            Show all flags");
        println!();
        println!("The drawing surface itself is provided by an embedding front-end");
        println!("driving the sketchboard library; this binary operates on the");
        println!("persisted session and raster artifacts.");
        return Ok(());
    }

    if cli.clear_session {
        let outcome = session::clear_session(&options)?;
        if outcome.removed_session {
            println!("Removed session file {}", options.session_file_path().display());
        } else {
            println!("No session file at {}", options.session_file_path().display());
        }
        if outcome.removed_backup {
            println!("Removed backup {}", options.backup_file_path().display());
        }
    }

    if cli.inspect {
        print_inspection(&options)?;
    }

    if cli.gallery {
        let gallery = Gallery::from_config(&config.gallery)?;
        let entries = gallery.list()?;
        if entries.is_empty() {
            println!("Gallery {} is empty", gallery.dir().display());
        } else {
            println!("Gallery {} ({} images):", gallery.dir().display(), entries.len());
            for entry in entries {
                println!(
                    "  {}  {} bytes  {}",
                    entry
                        .path
                        .file_name()
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_default(),
                    entry.size_bytes,
                    format_time(entry.modified),
                );
            }
        }
    }

    if cli.export.is_some() || cli.snapshot {
        let mut input = InputState::from_config(&config);

        match session::load_snapshot(&options) {
            Ok(Some(snapshot)) => session::apply_snapshot(&mut input, snapshot, &options),
            Ok(None) => {
                log::warn!(
                    "No saved drawing at {}; rendering an empty canvas",
                    options.session_file_path().display()
                );
            }
            Err(err) => {
                log::warn!("Failed to load session: {err:#}");
            }
        }

        if let Some(path) = &cli.export {
            session::export_png(&input, path)?;
            println!("Exported {} shapes to {}", input.frame.len(), path.display());
        }

        if cli.snapshot {
            let gallery = Gallery::from_config(&config.gallery)?;
            match gallery.save(&input) {
                Ok(path) => println!("Saved snapshot to {}", path.display()),
                // Snapshot failures (e.g. disk full) are reported, not fatal
                Err(err) => log::warn!("Could not save snapshot: {err:#}"),
            }
        }
    }

    Ok(())
}

fn print_inspection(options: &SessionOptions) -> anyhow::Result<()> {
    let inspection = session::inspect_session(options)?;

    println!("Session file: {}", inspection.session_path.display());
    if !inspection.exists {
        println!("  (not present)");
        return Ok(());
    }

    if let Some(size) = inspection.size_bytes {
        println!("  Size: {size} bytes");
    }
    println!("  Modified: {}", format_time(inspection.modified));
    println!("  Compressed: {}", inspection.compressed);
    match inspection.shape_count {
        Some(count) => println!("  Shapes: {count}"),
        None => println!("  Shapes: (unreadable)"),
    }
    println!("  Tool state saved: {}", inspection.tool_state_present);
    if inspection.backup_exists {
        println!("  Backup: {}", inspection.backup_path.display());
    }

    Ok(())
}

fn format_time(time: Option<std::time::SystemTime>) -> String {
    match time {
        Some(time) => chrono::DateTime::<chrono::Local>::from(time)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
        None => "unknown".to_string(),
    }
}
