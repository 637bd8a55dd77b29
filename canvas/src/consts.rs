//! Shared numeric constants for the canvas crate.

// ── Camera ──────────────────────────────────────────────────────

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.2;

/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 4.0;

/// Multiplicative zoom step applied per wheel notch.
pub const ZOOM_STEP: f64 = 1.1;

/// Pan distance in screen pixels per tick at zoom 1.0.
pub const PAN_SPEED: f64 = 5.0;

// ── Settings defaults ───────────────────────────────────────────

/// Default grid color (white).
pub const DEFAULT_GRID_COLOR: [u8; 3] = [255, 255, 255];

/// Default grid alpha (roughly 50% transparent).
pub const DEFAULT_GRID_ALPHA: u8 = 127;

/// Default tile size in pixels before zoom.
pub const DEFAULT_TILE_SIZE: u32 = 32;

/// Default settings file name, relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "editor_settings.json";

// ── Window / frame loop ─────────────────────────────────────────

pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub const DEFAULT_FRAME_RATE: u32 = 60;

// ── Side menu layout ────────────────────────────────────────────

/// Width of the right-hand side menu in pixels.
pub const MENU_WIDTH: f64 = 300.0;

/// Padding between panel elements.
pub const MENU_PADDING: f64 = 10.0;

/// Top offset of the first line of menu text.
pub const MENU_TOP: f64 = 30.0;

/// Fixed advance of one glyph for layout purposes.
pub const GLYPH_WIDTH: f64 = 9.0;

/// Fixed height of one line of text for layout purposes.
pub const LINE_HEIGHT: f64 = 17.0;

/// Vertical gap after a plain text line.
pub const LINE_GAP: f64 = 5.0;

/// Side length of the current-color swatch.
pub const SWATCH_SIZE: f64 = 40.0;

/// Vertical padding inside buttons.
pub const BUTTON_PADDING_Y: f64 = 5.0;

// ── Slider ──────────────────────────────────────────────────────

pub const SLIDER_TRACK_HEIGHT: f64 = 8.0;
pub const SLIDER_HANDLE_RADIUS: f64 = 8.0;

/// Alpha change per `+` / `-` key press.
pub const ALPHA_KEY_STEP: u8 = 10;

// ── Color wheel ─────────────────────────────────────────────────

/// Inset between the raster edge and the painted wheel, leaving room for the outline ring.
pub const WHEEL_RIM_INSET: i64 = 2;

/// Pointer distance (pixels) under which the wheel reports zero saturation.
pub const WHEEL_CENTER_DEADZONE: f64 = 1.0;

pub const CURSOR_OUTER_RADIUS: f64 = 8.0;
pub const CURSOR_INNER_RADIUS: f64 = 6.0;
pub const CURSOR_RING_WIDTH: f64 = 2.0;
