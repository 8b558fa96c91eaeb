use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;

use lazymask::replay::{self, ReplayTiming, Script};
use lazymask::{Config, Editor, EditorLoop, EditorOptions};

#[derive(Parser, Debug)]
#[command(name = "lazymask")]
#[command(version, about = "Replay a pointer script through the lazy-brush mask editor")]
struct Cli {
    /// Pointer script (TOML with [[step]] entries)
    #[arg(long, short = 's', value_name = "FILE")]
    script: PathBuf,

    /// Where to write the painted mask (PNG)
    #[arg(long, short = 'o', value_name = "FILE")]
    output: PathBuf,

    /// Config file to use instead of ~/.config/lazymask/config.toml
    #[arg(long, short = 'c', value_name = "FILE")]
    config: Option<PathBuf>,

    /// Canvas width in logical pixels
    #[arg(long, value_name = "PX")]
    width: Option<u32>,

    /// Canvas height in logical pixels
    #[arg(long, value_name = "PX")]
    height: Option<u32>,

    /// Device pixel ratio
    #[arg(long, value_name = "RATIO")]
    scale: Option<f64>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let script = Script::load(&cli.script)?;

    let width = cli.width.unwrap_or(config.surface.width);
    let height = cli.height.unwrap_or(config.surface.height);
    let scale = cli.scale.unwrap_or(config.surface.device_pixel_ratio);

    let timing = ReplayTiming {
        frame_interval: Duration::from_millis(config.frame.frame_interval_ms),
        resize_delay: Duration::from_millis(config.surface.resize_debounce_ms),
    };

    log::info!("Canvas {width}x{height} at device pixel ratio {scale}");
    let editor = Editor::new(EditorOptions::from_config(&config), width, height, scale)
        .context("Failed to create editor surfaces")?;
    let mut editor_loop = EditorLoop::new(editor, timing.frame_interval, timing.resize_delay)
        .context("Failed to set up the frame loop")?;

    replay::run(&script, &mut editor_loop, timing)?;

    let editor = editor_loop.shutdown();
    if !editor.health().is_healthy() {
        log::warn!("Some surfaces reported errors during replay");
    }

    let mask = editor.mask().context("Mask surface is not available")?;
    let file = File::create(&cli.output)
        .with_context(|| format!("Failed to create {}", cli.output.display()))?;
    let mut writer = BufWriter::new(file);
    editor
        .write_mask_png(&mut writer)
        .with_context(|| format!("Failed to write mask to {}", cli.output.display()))?;
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", cli.output.display()))?;

    log::info!(
        "Wrote {}x{} mask ({} painted pixels) to {}",
        mask.physical_width(),
        mask.physical_height(),
        mask.painted_pixels().unwrap_or(0),
        cli.output.display()
    );
    println!("{}", cli.output.display());

    Ok(())
}
