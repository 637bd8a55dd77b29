//! Viewport, grid and color-picker core for the 2D level editor.
//!
//! This crate owns everything about the editor that is not a window: the
//! pan/zoom camera and the grid lines it produces, the HSV color model behind
//! the color wheel, the settings panel layout and its gestures, settings
//! persistence, and a software renderer. The host binary feeds it
//! [`input::InputEvent`]s, presents the rendered [`render::Framebuffer`], and
//! persists the resulting [`engine::Action`]s.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`camera`] | Pan/zoom camera and coordinate conversions |
//! | [`grid`] | Grid line placement for a camera and window |
//! | [`color`] | RGB/HSV conversions and wheel angle mapping |
//! | [`picker`] | Color wheel raster, drag sampling and cursor |
//! | [`slider`] | Transparency slider mapping |
//! | [`layout`] | Settings panel hit-test rectangles |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`render`] | Drawing surface trait, software framebuffer, scene drawing |
//! | [`settings`] | Grid settings and the JSON settings file |
//! | [`config`] | Environment-driven engine configuration |
//! | [`consts`] | Shared numeric constants (zoom limits, layout metrics, defaults) |

pub mod camera;
pub mod color;
pub mod config;
pub mod consts;
pub mod engine;
pub mod grid;
pub mod input;
pub mod layout;
pub mod picker;
pub mod render;
pub mod settings;
pub mod slider;
