//! Pointer script replay.
//!
//! A script is a TOML file with a list of `[[step]]` tables:
//!
//! ```toml
//! [[step]]
//! event = "move"
//! x = 10.0
//! y = 10.0
//! frames = 5
//!
//! [[step]]
//! event = "press"
//! source = "touch"
//! x = 10.0
//! y = 10.0
//!
//! [[step]]
//! event = "resize"
//! width = 640
//! height = 480
//!
//! [[step]]
//! event = "clear"
//! ```
//!
//! Each step is delivered through the [`EditorLoop`] channels, then `frames`
//! frames (default 1) are run before the next step.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;

use crate::editor::{ContainerSize, EditorLoop};
use crate::input::{PointerEvent, PointerPhase, PointerSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepEvent {
    Move,
    Press,
    Release,
    Resize,
    Clear,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepSource {
    #[default]
    Mouse,
    Touch,
}

impl From<StepSource> for PointerSource {
    fn from(source: StepSource) -> Self {
        match source {
            StepSource::Mouse => PointerSource::Mouse,
            StepSource::Touch => PointerSource::Touch,
        }
    }
}

fn default_frames() -> u64 {
    1
}

/// One scripted event plus the number of frames to run after it.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    pub event: StepEvent,
    #[serde(default)]
    pub source: StepSource,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_frames")]
    pub frames: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl Step {
    fn pointer_event(&self) -> Option<PointerEvent> {
        let phase = match self.event {
            StepEvent::Move => PointerPhase::Move,
            StepEvent::Press => PointerPhase::Press,
            StepEvent::Release => PointerPhase::Release,
            StepEvent::Resize | StepEvent::Clear => return None,
        };
        Some(PointerEvent::new(self.source.into(), phase, self.x, self.y))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    #[serde(default, rename = "step")]
    pub steps: Vec<Step>,
}

impl Script {
    pub fn parse(source: &str) -> Result<Self> {
        let script: Script = toml::from_str(source).context("Failed to parse pointer script")?;
        for (i, step) in script.steps.iter().enumerate() {
            if step.event == StepEvent::Resize && (step.width.is_none() || step.height.is_none()) {
                anyhow::bail!("Step {} is a resize without width and height", i + 1);
            }
        }
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let source = fs::read_to_string(path)
            .with_context(|| format!("Failed to read pointer script {}", path.display()))?;
        Self::parse(&source).with_context(|| format!("Invalid pointer script {}", path.display()))
    }

    /// Total frames the script asks for, excluding resize settling time.
    pub fn frame_count(&self) -> u64 {
        self.steps.iter().map(|step| step.frames).sum()
    }
}

/// Timing used while replaying.
#[derive(Debug, Clone, Copy)]
pub struct ReplayTiming {
    pub frame_interval: Duration,
    pub resize_delay: Duration,
}

/// Feeds `script` through `editor_loop`, dispatching frames in real time.
pub fn run(script: &Script, editor_loop: &mut EditorLoop, timing: ReplayTiming) -> Result<()> {
    let pointer = editor_loop.pointer_sender();
    let resize = editor_loop.resize_sender();
    let mut clear_signal = editor_loop.editor().options().clear_signal;

    info!("Replaying {} steps", script.steps.len());
    for (i, step) in script.steps.iter().enumerate() {
        debug!("Step {}: {:?}", i + 1, step);
        match step.event {
            StepEvent::Resize => {
                let (Some(width), Some(height)) = (step.width, step.height) else {
                    continue;
                };
                let ratio = editor_loop.editor().device_pixel_ratio();
                resize
                    .send(ContainerSize::new(width, height, ratio))
                    .context("Editor loop closed the resize channel")?;
                editor_loop.run_for(timing.resize_delay)?;
                while editor_loop.resize_pending() {
                    editor_loop.run_frames(1)?;
                }
            }
            StepEvent::Clear => {
                clear_signal = clear_signal.wrapping_add(1);
                editor_loop.editor_mut().set_clear_signal(clear_signal);
            }
            StepEvent::Move | StepEvent::Press | StepEvent::Release => {
                if let Some(event) = step.pointer_event() {
                    pointer
                        .send(event)
                        .context("Editor loop closed the pointer channel")?;
                    editor_loop.flush_input()?;
                }
            }
        }
        editor_loop.run_frames(step.frames)?;
    }

    Ok(())
}
