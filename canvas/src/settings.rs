//! Grid settings and their JSON file store.
//!
//! The settings file is a flat JSON object:
//!
//! ```json
//! {
//!     "grid_color": [255, 255, 255],
//!     "grid_alpha": 127,
//!     "tile_size": 32
//! }
//! ```
//!
//! Loading merges each known key over the defaults independently, so a file
//! with one bad value keeps the good ones. Unknown keys are carried through in
//! [`GridSettings::extra`] and written back on save. Loading never fails: any
//! problem falls back to defaults with a log line.

#[cfg(test)]
#[path = "settings_test.rs"]
mod settings_test;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{info, warn};

use crate::color::Rgb8;
use crate::consts::{DEFAULT_GRID_ALPHA, DEFAULT_GRID_COLOR, DEFAULT_TILE_SIZE};

const KEY_COLOR: &str = "grid_color";
const KEY_ALPHA: &str = "grid_alpha";
const KEY_TILE_SIZE: &str = "tile_size";

/// Errors from reading or writing the settings file.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("settings io failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("settings file must contain a JSON object")]
    NotAnObject,
}

/// Persisted grid appearance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridSettings {
    /// Line color; authoritative over any HSV projection.
    #[serde(rename = "grid_color")]
    pub color: Rgb8,
    /// Line opacity, 0 (invisible) to 255 (opaque).
    #[serde(rename = "grid_alpha")]
    pub alpha: u8,
    /// Tile size in pixels before zoom.
    pub tile_size: u32,
    /// Keys this version does not understand, preserved across save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            color: Rgb8::from(DEFAULT_GRID_COLOR),
            alpha: DEFAULT_GRID_ALPHA,
            tile_size: DEFAULT_TILE_SIZE,
            extra: Map::new(),
        }
    }
}

impl GridSettings {
    /// Restore the default color and alpha. Tile size and unknown keys are kept.
    pub fn reset_grid(&mut self) {
        self.color = Rgb8::from(DEFAULT_GRID_COLOR);
        self.alpha = DEFAULT_GRID_ALPHA;
    }

    /// Build settings from a parsed JSON object, merging each key over the defaults.
    ///
    /// Color channels and alpha are clamped into `0..=255`. A tile size below 1
    /// or a value of the wrong shape falls back to that key's default.
    #[must_use]
    pub fn from_json_object(mut object: Map<String, Value>) -> Self {
        let mut settings = Self::default();

        if let Some(raw) = object.remove(KEY_COLOR) {
            match parse_color(&raw) {
                Some(color) => settings.color = color,
                None => warn!(value = %raw, "invalid grid_color; using default"),
            }
        }
        if let Some(raw) = object.remove(KEY_ALPHA) {
            match raw.as_f64().map(clamp_channel) {
                Some(alpha) => settings.alpha = alpha,
                None => warn!(value = %raw, "invalid grid_alpha; using default"),
            }
        }
        if let Some(raw) = object.remove(KEY_TILE_SIZE) {
            match raw.as_f64().and_then(parse_tile_size) {
                Some(tile_size) => settings.tile_size = tile_size,
                None => warn!(value = %raw, "invalid tile_size; using default"),
            }
        }

        settings.extra = object;
        settings
    }

    /// Parse a settings document.
    ///
    /// # Errors
    ///
    /// Returns an error if `raw` is not valid JSON or not a JSON object.
    pub fn from_json_str(raw: &str) -> Result<Self, SettingsError> {
        match serde_json::from_str::<Value>(raw)? {
            Value::Object(object) => Ok(Self::from_json_object(object)),
            _ => Err(SettingsError::NotAnObject),
        }
    }

    /// Render as pretty JSON with 4-space indentation.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_string(&self) -> Result<String, SettingsError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }
}

fn parse_color(raw: &Value) -> Option<Rgb8> {
    let channels = raw.as_array()?;
    if channels.len() != 3 {
        return None;
    }
    let r = channels[0].as_f64().map(clamp_channel)?;
    let g = channels[1].as_f64().map(clamp_channel)?;
    let b = channels[2].as_f64().map(clamp_channel)?;
    Some(Rgb8::new(r, g, b))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_channel(value: f64) -> u8 {
    value.clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_tile_size(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 1.0 {
        return None;
    }
    Some(value.min(f64::from(u32::MAX)) as u32)
}

/// Reads and writes [`GridSettings`] at a fixed path.
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load settings, falling back to defaults on any problem.
    ///
    /// A missing file is the first-run case: defaults are written out so the
    /// user has a file to edit. Failing to write them is only logged.
    #[must_use]
    pub fn load(&self) -> GridSettings {
        match self.try_load() {
            Ok(settings) => {
                info!(path = %self.path.display(), "settings loaded");
                settings
            }
            Err(SettingsError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!(path = %self.path.display(), "settings file not found; using defaults");
                let defaults = GridSettings::default();
                if let Err(e) = self.save(&defaults) {
                    warn!(error = %e, "could not write default settings");
                }
                defaults
            }
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "unreadable settings; using defaults");
                GridSettings::default()
            }
        }
    }

    /// Load settings, reporting why the file could not be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not JSON, or is not an object.
    pub fn try_load(&self) -> Result<GridSettings, SettingsError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| self.io_error(source))?;
        GridSettings::from_json_str(&raw)
    }

    /// Write `settings` to the file, replacing its contents.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, settings: &GridSettings) -> Result<(), SettingsError> {
        let json = settings.to_json_string()?;
        fs::write(&self.path, json).map_err(|source| self.io_error(source))?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }

    fn io_error(&self, source: io::Error) -> SettingsError {
        SettingsError::Io { path: self.path.clone(), source }
    }
}
