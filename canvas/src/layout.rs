//! Side-menu layout: hit-test rectangles and text anchors for one frame.
//!
//! Layout is a pure function of window size and the few settings that move
//! widgets (the alpha slider handle). The engine computes it once per frame
//! before dispatching that frame's input, and the renderer draws from the
//! same value, so a click is never tested against a stale rectangle.
//!
//! Text is measured with a fixed glyph advance ([`GLYPH_WIDTH`] x
//! [`LINE_HEIGHT`]); actual glyph rendering belongs to the surface.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use crate::camera::Point;
use crate::consts::{
    BUTTON_PADDING_Y, GLYPH_WIDTH, LINE_GAP, LINE_HEIGHT, MENU_PADDING, MENU_TOP, SLIDER_TRACK_HEIGHT, SWATCH_SIZE,
};
use crate::slider;

pub const SETTINGS_TITLE: &str = "SETTINGS MENU ('1' to close)";
pub const EDITOR_MENU_TITLE: &str = "EDITOR MENU ('0' to close)";
pub const GRID_HEADER: &str = "Grid Settings:";
pub const COLOR_BUTTON_LABEL: &str = "Toggle Color Picker (Click)";
pub const RESET_BUTTON_LABEL: &str = "RESET GRID SETTINGS (and Save)";
pub const LANGUAGE_HEADER: &str = "Languages settings:";
pub const LANGUAGE_LINES: [&str; 2] = ["Reset Languages (Coming Soon)", "Add Languages (Community Script .lang2D)"];
pub const EDITOR_MENU_LINES: [&str; 2] = ["(Area for Tile/Object Selection)", "(Soon...)"];

/// Axis-aligned rectangle in screen pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `2 * half` centred on `center`.
    #[must_use]
    pub fn around(center: Point, half: f64) -> Self {
        Self::new(center.x - half, center.y - half, half * 2.0, half * 2.0)
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half-open containment: left/top edges inside, right/bottom edges outside.
    #[must_use]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x < self.right() && p.y >= self.y && p.y < self.bottom()
    }

    /// Closed containment: all four edges inside.
    #[must_use]
    pub fn contains_closed(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Width of `text` under the fixed layout metric.
#[must_use]
pub fn text_width(text: &str) -> f64 {
    let glyphs = u32::try_from(text.chars().count()).unwrap_or(u32::MAX);
    f64::from(glyphs) * GLYPH_WIDTH
}

/// Button sized to fit `label` with padding, anchored at `(x, y)`.
fn button_rect(x: f64, y: f64, label: &str) -> Rect {
    Rect::new(x, y, text_width(label) + MENU_PADDING * 2.0, LINE_HEIGHT + BUTTON_PADDING_Y * 2.0)
}

/// Every rectangle and text anchor of the settings side panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettingsLayout {
    /// The side panel background.
    pub panel: Rect,
    pub title: Point,
    pub header: Point,
    /// Square bounding box of the color wheel; also its click region.
    pub picker: Rect,
    pub swatch: Rect,
    pub color_label: Point,
    pub color_button: Rect,
    pub alpha_label: Point,
    pub slider_track: Rect,
    /// Hit box around the slider handle at the current alpha.
    pub slider_handle: Rect,
    pub reset_button: Rect,
    pub language_header: Point,
    pub language_lines: [Point; 2],
}

impl SettingsLayout {
    /// Lay out the settings panel docked to the right edge of the window.
    #[must_use]
    pub fn compute(window_width: f64, window_height: f64, menu_width: f64, alpha: u8) -> Self {
        let pad = MENU_PADDING;
        let menu_x = window_width - menu_width;
        let left = menu_x + pad;
        let inner_width = (menu_width - pad * 2.0).max(0.0);

        let panel = Rect::new(menu_x, 0.0, menu_width, window_height);

        let mut y = MENU_TOP;
        let title = Point::new(left, y);
        y += LINE_HEIGHT + pad * 2.0;

        let header = Point::new(left, y);
        y += LINE_HEIGHT + pad;

        let picker = Rect::new(left, y, inner_width, inner_width);
        y += inner_width + pad;

        let swatch = Rect::new(left, y, SWATCH_SIZE, SWATCH_SIZE);
        let color_label = Point::new(left + SWATCH_SIZE + pad, y + (SWATCH_SIZE - LINE_HEIGHT) / 2.0);
        y += SWATCH_SIZE + pad;

        let color_button = button_rect(left, y, COLOR_BUTTON_LABEL);
        y += color_button.height + pad * 2.0;

        let alpha_label = Point::new(left, y);
        y += LINE_HEIGHT + LINE_GAP;

        let slider_track = Rect::new(left, y, inner_width, SLIDER_TRACK_HEIGHT);
        let slider_handle = slider::handle_rect(slider_track, alpha);
        y += SLIDER_TRACK_HEIGHT + pad * 2.0;

        let reset_button = button_rect(left, y, RESET_BUTTON_LABEL);
        y += reset_button.height + pad * 2.0;

        let language_header = Point::new(left, y);
        y += LINE_HEIGHT + pad;
        let first_line = Point::new(left, y);
        y += LINE_HEIGHT + LINE_GAP;
        let second_line = Point::new(left, y);

        Self {
            panel,
            title,
            header,
            picker,
            swatch,
            color_label,
            color_button,
            alpha_label,
            slider_track,
            slider_handle,
            reset_button,
            language_header,
            language_lines: [first_line, second_line],
        }
    }
}
