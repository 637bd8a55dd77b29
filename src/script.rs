//! JSON-lines input scripts.
//!
//! Each non-empty line is one step: an [`InputEvent`] object, a
//! `{"type":"hold", ...}` object replacing the held arrow keys, or a
//! `{"type":"wait","frames":n}` object advancing `n` frames. Lines starting
//! with `#` are comments.

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::io::{self, BufRead};

use serde::Deserialize;
use serde_json::Value;
use twod_canvas::input::{HeldKeys, InputEvent};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("script read failed: {0}")]
    Io(#[from] io::Error),
    #[error("script line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    Event(InputEvent),
    Hold(HeldKeys),
    Wait(u32),
}

#[derive(Deserialize)]
struct WaitStep {
    frames: u32,
}

/// Parse one line; `None` for blank lines and comments.
///
/// # Errors
///
/// Returns the JSON error if the line is not a valid step.
pub fn parse_step(line: &str) -> Result<Option<Step>, serde_json::Error> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let value = serde_json::from_str::<Value>(trimmed)?;
    let step = match value.get("type").and_then(Value::as_str) {
        Some("hold") => Step::Hold(serde_json::from_value(value)?),
        Some("wait") => Step::Wait(serde_json::from_value::<WaitStep>(value)?.frames),
        _ => Step::Event(serde_json::from_value(value)?),
    };
    Ok(Some(step))
}

/// Pulls steps from a line-oriented reader.
pub struct ScriptReader<R> {
    reader: R,
    line: usize,
    buf: String,
}

impl<R: BufRead> ScriptReader<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: 0, buf: String::new() }
    }

    /// The next step, or `None` at end of input.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError`] on a read failure or a malformed line.
    pub fn next_step(&mut self) -> Result<Option<Step>, ScriptError> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let parsed = parse_step(&self.buf).map_err(|source| ScriptError::Parse { line: self.line, source })?;
            if let Some(step) = parsed {
                return Ok(Some(step));
            }
        }
    }
}
