//! The frame loop: script input in, rendered frames and settings commits out.

#[cfg(test)]
#[path = "shell_test.rs"]
mod shell_test;

use std::io::BufRead;

use tracing::{debug, error, info};
use twod_canvas::config::ConfigError;
use twod_canvas::engine::{Action, Engine};
use twod_canvas::input::HeldKeys;
use twod_canvas::render::RenderError;
use twod_canvas::settings::SettingsStore;

use crate::clock::FrameClock;
use crate::script::{ScriptError, ScriptReader, Step};
use crate::snapshot::SnapshotError;

#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("configuration error: {0}")]
    Render(#[from] RenderError),
    #[error(transparent)]
    Script(#[from] ScriptError),
    #[error("could not open script {path}: {source}")]
    OpenScript {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// What a finished run did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub frames: u64,
    pub commits: u32,
    /// Ended by a quit request rather than end of input or frame limit.
    pub quit: bool,
}

/// Owns the engine for the lifetime of the editor session.
pub struct Shell<R> {
    engine: Engine,
    store: SettingsStore,
    script: ScriptReader<R>,
    clock: FrameClock,
    max_frames: Option<u64>,
    held: HeldKeys,
    /// Frames still to run before the script is read again.
    waiting: u32,
    script_done: bool,
    summary: RunSummary,
}

impl<R: BufRead> Shell<R> {
    pub fn new(engine: Engine, store: SettingsStore, script: ScriptReader<R>, clock: FrameClock) -> Self {
        Self {
            engine,
            store,
            script,
            clock,
            max_frames: None,
            held: HeldKeys::default(),
            waiting: 0,
            script_done: false,
            summary: RunSummary::default(),
        }
    }

    /// Stop after `max_frames` frames even if input remains.
    #[must_use]
    pub fn with_max_frames(mut self, max_frames: Option<u64>) -> Self {
        self.max_frames = max_frames;
        self
    }

    #[must_use]
    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    /// Run frames until quit, end of script, or the frame limit.
    ///
    /// A drag still held when the loop stops is finished and its change saved.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] on a malformed script or an unrenderable scene.
    pub fn run(&mut self) -> Result<RunSummary, ShellError> {
        while self.frame()? {
            self.clock.wait();
        }
        for action in self.engine.end_drag() {
            self.apply(action);
        }
        info!(frames = self.summary.frames, commits = self.summary.commits, "frame loop finished");
        Ok(self.summary)
    }

    /// Run one frame, returning whether another should follow.
    ///
    /// # Errors
    ///
    /// Returns [`ShellError`] on a malformed script or an unrenderable scene.
    pub fn frame(&mut self) -> Result<bool, ShellError> {
        self.engine.begin_frame();

        if self.waiting > 0 {
            self.waiting -= 1;
        } else if !self.script_done {
            self.drain_input()?;
        }

        self.engine.tick(self.held);
        self.engine.render()?;
        self.summary.frames += 1;

        let limit_reached = self.max_frames.is_some_and(|max| self.summary.frames >= max);
        let input_exhausted = self.script_done && self.waiting == 0;
        Ok(!(self.summary.quit || input_exhausted || limit_reached))
    }

    /// Apply script steps until a wait, a quit, or end of input.
    fn drain_input(&mut self) -> Result<(), ShellError> {
        while let Some(step) = self.script.next_step()? {
            match step {
                Step::Hold(keys) => self.held = keys,
                Step::Wait(0) => {}
                Step::Wait(frames) => {
                    // This frame is the first of the wait.
                    self.waiting = frames - 1;
                    return Ok(());
                }
                Step::Event(event) => {
                    for action in self.engine.handle_event(event) {
                        self.apply(action);
                    }
                    if self.summary.quit {
                        return Ok(());
                    }
                }
            }
        }
        debug!("script exhausted");
        self.script_done = true;
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => {
                info!("quit requested");
                self.summary.quit = true;
            }
            Action::CommitSettings(settings) => match self.store.save(&settings) {
                Ok(()) => self.summary.commits += 1,
                Err(e) => error!(error = %e, "failed to save settings"),
            },
        }
    }
}
