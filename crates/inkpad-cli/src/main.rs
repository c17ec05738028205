//! Inkpad command line tool.
//!
//! Replays recorded gestures through the canvas controller and exports the
//! resulting canvas as PNG.

mod script;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inkpad_core::{CanvasConfig, CanvasController, CanvasImage, ImageSize};
use inkpad_render::{PixmapSurface, decode_png, encode_png};
use script::Script;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Parser)]
#[command(name = "inkpad", version, about = "Freehand canvas gesture replay")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Replay a gesture script and write the final canvas as PNG
    Replay {
        /// Gesture script (JSON)
        script: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Canvas configuration (JSON); defaults are used when omitted
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// PNG used as the base image; overrides the script's canvas size
        #[arg(short, long)]
        background: Option<PathBuf>,
    },
    /// Print the default canvas configuration as JSON
    DefaultConfig,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            script,
            output,
            config,
            background,
        } => run_replay(&script, &output, config.as_deref(), background.as_deref()),
        Command::DefaultConfig => {
            println!("{}", CanvasConfig::default().to_json()?);
            Ok(())
        }
    }
}

fn run_replay(
    script_path: &Path,
    output: &Path,
    config_path: Option<&Path>,
    background: Option<&Path>,
) -> Result<()> {
    let json = fs::read_to_string(script_path)
        .with_context(|| format!("Failed to read {}", script_path.display()))?;
    let script = Script::from_json(&json)?;

    let config = match config_path {
        Some(path) => CanvasConfig::load(path)?,
        None => CanvasConfig::default(),
    };

    let base = match background {
        Some(path) => {
            let bytes =
                fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
            decode_png(&bytes).with_context(|| format!("Failed to decode {}", path.display()))?
        }
        None => CanvasImage::blank(ImageSize::new(script.width, script.height)),
    };
    log::info!(
        "Replaying {} operations on a {}x{} canvas",
        script.operations.len(),
        base.width(),
        base.height()
    );

    let mut controller = CanvasController::with_base_image(PixmapSurface::new(), base, config)?;
    let summary = script::replay(&mut controller, &script.operations)?;
    if controller.is_drawing() {
        log::warn!("Script ended with a gesture still in progress; it was not committed");
    }
    log::info!(
        "Replay done: {} accepted, {} ignored, {} history steps, {} redraws",
        summary.accepted,
        summary.ignored,
        summary.history_steps,
        summary.redraws
    );

    let png_data = encode_png(controller.current_image())?;
    fs::write(output, png_data)
        .with_context(|| format!("Failed to write {}", output.display()))?;
    log::info!("Exported PNG to: {}", output.display());
    Ok(())
}
