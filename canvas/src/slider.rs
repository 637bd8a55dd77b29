//! Transparency slider: pointer x to grid alpha, and the handle geometry.

#[cfg(test)]
#[path = "slider_test.rs"]
mod slider_test;

use crate::camera::Point;
use crate::consts::SLIDER_HANDLE_RADIUS;
use crate::layout::Rect;
use crate::settings::GridSettings;

/// Alpha selected by a pointer at `pointer_x` over `track`.
///
/// The pointer is clamped into the track, so dragging past either end pins
/// the value at 0 or 255. A zero-width track always yields 0.
#[must_use]
pub fn alpha_at(track: Rect, pointer_x: f64) -> u8 {
    if track.width <= 0.0 {
        return 0;
    }
    let clamped = pointer_x.clamp(track.x, track.right());
    let ratio = (clamped - track.x) / track.width;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let alpha = (ratio * 255.0).clamp(0.0, 255.0) as u8;
    alpha
}

/// Center of the handle for `alpha`.
#[must_use]
pub fn handle_center(track: Rect, alpha: u8) -> Point {
    let ratio = f64::from(alpha) / 255.0;
    let x = track.x + (ratio * track.width).trunc();
    let y = track.y + (track.height / 2.0).floor();
    Point::new(x, y)
}

/// Square hit box around the handle for `alpha`.
#[must_use]
pub fn handle_rect(track: Rect, alpha: u8) -> Rect {
    Rect::around(handle_center(track, alpha), SLIDER_HANDLE_RADIUS)
}

/// Apply one slider sample to `settings`, returning whether alpha changed.
pub fn apply_sample(track: Rect, pointer_x: f64, settings: &mut GridSettings) -> bool {
    let alpha = alpha_at(track, pointer_x);
    if settings.alpha == alpha {
        return false;
    }
    settings.alpha = alpha;
    true
}

/// Raise alpha by `step`, saturating at 255.
#[must_use]
pub fn nudge_up(alpha: u8, step: u8) -> u8 {
    alpha.saturating_add(step)
}

/// Lower alpha by `step`, saturating at 0.
#[must_use]
pub fn nudge_down(alpha: u8, step: u8) -> u8 {
    alpha.saturating_sub(step)
}
