#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use tracing::debug;

use crate::consts::{ZOOM_MAX, ZOOM_MIN};
use crate::input::HeldKeys;

/// A point in either screen or world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Camera state for pan/zoom over the infinite grid.
///
/// `x` / `y` are pan offsets in screen pixels: a world point at the origin
/// appears at `(x, y)` on screen, so increasing them slides the visible world
/// right/down (the view looks further left/up).
/// `zoom` is a scale factor (1.0 = no zoom), always within
/// [`ZOOM_MIN`]..=[`ZOOM_MAX`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { x: 0.0, y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Convert a screen-space point (pixels) to world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        Point {
            x: (screen.x - self.x) / self.zoom,
            y: (screen.y - self.y) / self.zoom,
        }
    }

    /// Convert a world-space point to screen coordinates (pixels).
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        Point {
            x: world.x * self.zoom + self.x,
            y: world.y * self.zoom + self.y,
        }
    }

    /// Translate the camera without changing zoom.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// Per-tick pan distance for `base_speed`, scaled so a held key covers
    /// the same world distance at every zoom level.
    #[must_use]
    pub fn pan_step(&self, base_speed: f64) -> f64 {
        base_speed / self.zoom
    }

    /// Apply one tick of keyboard panning for the currently held arrows.
    ///
    /// Left/up increase the offsets, right/down decrease them; opposing keys
    /// cancel out.
    pub fn pan_held(&mut self, held: HeldKeys, base_speed: f64) {
        let step = self.pan_step(base_speed);
        let mut dx = 0.0;
        let mut dy = 0.0;
        if held.left {
            dx += step;
        }
        if held.right {
            dx -= step;
        }
        if held.up {
            dy += step;
        }
        if held.down {
            dy -= step;
        }
        self.pan_by(dx, dy);
    }

    /// Multiply zoom by `factor`, clamped to [`ZOOM_MIN`]..=[`ZOOM_MAX`].
    ///
    /// Non-finite or non-positive factors are ignored.
    pub fn zoom_by(&mut self, factor: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            debug!(factor, "ignoring invalid zoom factor");
            return;
        }
        self.zoom = (self.zoom * factor).clamp(ZOOM_MIN, ZOOM_MAX);
    }

    /// One zoom-in notch.
    pub fn zoom_in(&mut self, step: f64) {
        self.zoom_by(step);
    }

    /// One zoom-out notch; the inverse of [`Camera::zoom_in`] away from the bounds.
    pub fn zoom_out(&mut self, step: f64) {
        if step.is_finite() && step > 0.0 {
            self.zoom_by(1.0 / step);
        }
    }
}
