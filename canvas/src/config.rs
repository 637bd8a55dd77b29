//! Editor configuration parsed from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::env::VarError;
use std::path::PathBuf;
use std::str::FromStr;

use crate::consts::{
    DEFAULT_FRAME_RATE, DEFAULT_SETTINGS_FILE, DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, MENU_WIDTH, PAN_SPEED,
    ZOOM_STEP,
};

pub const ENV_SETTINGS_FILE: &str = "TWOD_SETTINGS_FILE";
pub const ENV_PAN_SPEED: &str = "TWOD_PAN_SPEED";
pub const ENV_ZOOM_STEP: &str = "TWOD_ZOOM_STEP";
pub const ENV_FRAME_RATE: &str = "TWOD_FRAME_RATE";
pub const ENV_WINDOW_WIDTH: &str = "TWOD_WINDOW_WIDTH";
pub const ENV_WINDOW_HEIGHT: &str = "TWOD_WINDOW_HEIGHT";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: String, value: String },
    #[error("{key} must be positive, got {value}")]
    NotPositive { key: String, value: String },
}

/// Tunables that were module-level constants in earlier editors.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    pub settings_path: PathBuf,
    /// Pan distance per tick at zoom 1.0.
    pub pan_speed: f64,
    /// Multiplicative zoom per wheel notch.
    pub zoom_step: f64,
    pub frame_rate: u32,
    pub window_width: u32,
    pub window_height: u32,
    pub menu_width: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_FILE),
            pan_speed: PAN_SPEED,
            zoom_step: ZOOM_STEP,
            frame_rate: DEFAULT_FRAME_RATE,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            menu_width: MENU_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Build config from the process environment.
    ///
    /// Optional:
    /// - `TWOD_SETTINGS_FILE`: default `editor_settings.json`
    /// - `TWOD_PAN_SPEED`: default 5.0
    /// - `TWOD_ZOOM_STEP`: default 1.1, must be greater than 1
    /// - `TWOD_FRAME_RATE`: default 60
    /// - `TWOD_WINDOW_WIDTH` / `TWOD_WINDOW_HEIGHT`: default 800 x 600
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a variable is set but cannot be used.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| match std::env::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(VarError::NotPresent) => Ok(None),
            Err(VarError::NotUnicode(raw)) => {
                Err(ConfigError::Invalid { key: key.to_owned(), value: raw.to_string_lossy().into_owned() })
            }
        })
    }

    /// Build config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the lookup fails or a value cannot be used.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<Option<String>, ConfigError>,
    {
        let defaults = Self::default();

        let settings_path = lookup(ENV_SETTINGS_FILE)?.map_or(defaults.settings_path, PathBuf::from);
        let pan_speed = parse_or(&lookup, ENV_PAN_SPEED, defaults.pan_speed)?;
        let zoom_step = parse_or(&lookup, ENV_ZOOM_STEP, defaults.zoom_step)?;
        let frame_rate = parse_or(&lookup, ENV_FRAME_RATE, defaults.frame_rate)?;
        let window_width = parse_or(&lookup, ENV_WINDOW_WIDTH, defaults.window_width)?;
        let window_height = parse_or(&lookup, ENV_WINDOW_HEIGHT, defaults.window_height)?;

        if !(pan_speed.is_finite() && pan_speed >= 0.0) {
            return Err(ConfigError::NotPositive { key: ENV_PAN_SPEED.into(), value: pan_speed.to_string() });
        }
        if !(zoom_step.is_finite() && zoom_step > 1.0) {
            return Err(ConfigError::NotPositive { key: ENV_ZOOM_STEP.into(), value: zoom_step.to_string() });
        }
        if frame_rate == 0 {
            return Err(ConfigError::NotPositive { key: ENV_FRAME_RATE.into(), value: "0".into() });
        }

        Ok(Self { settings_path, pan_speed, zoom_step, frame_rate, window_width, window_height, ..defaults })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Result<Option<String>, ConfigError>,
    T: FromStr,
{
    match lookup(key)? {
        None => Ok(default),
        Some(raw) => raw.trim().parse::<T>().map_err(|_| ConfigError::Invalid { key: key.to_owned(), value: raw }),
    }
}
