//! Color model: RGB/RGBA pixel values and HSV conversions.
//!
//! RGB is the authoritative color representation (it is what gets persisted).
//! HSV is a projection used by the color wheel: hue is the polar angle around
//! the wheel center and saturation the normalized distance from it. Every
//! function here is pure so the wheel raster can be memoized on geometry alone.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::consts::WHEEL_CENTER_DEADZONE;

/// An opaque 8-bit-per-channel color.
///
/// Serialized as a 3-element integer array, matching the `grid_color` key of
/// the settings file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Attach an alpha channel.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Rgba8 {
        Rgba8 { r: self.r, g: self.g, b: self.b, a }
    }
}

impl From<[u8; 3]> for Rgb8 {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

/// An 8-bit color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel.
    #[must_use]
    pub const fn rgb(self) -> Rgb8 {
        Rgb8 { r: self.r, g: self.g, b: self.b }
    }
}

impl From<Rgb8> for Rgba8 {
    fn from(c: Rgb8) -> Self {
        c.with_alpha(u8::MAX)
    }
}

/// Hue in degrees `[0, 360)`, saturation and value in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Hsv {
    /// Pure white: no hue, no saturation, full value.
    pub const WHITE: Self = Self { h: 0.0, s: 0.0, v: 1.0 };

    #[must_use]
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to RGB with [`hsv_to_rgb`].
    #[must_use]
    pub fn to_rgb(self) -> Rgb8 {
        hsv_to_rgb(self.h, self.s, self.v)
    }
}

impl Default for Hsv {
    fn default() -> Self {
        Self::WHITE
    }
}

/// Convert an HSV triple to 8-bit RGB.
///
/// Hue is wrapped into `[0, 360)` first (non-finite hue counts as 0);
/// saturation and value are clamped into `[0, 1]`. Chromatic channels are
/// truncated after scaling by 255, while the achromatic (`s == 0`) gray is
/// rounded.
#[must_use]
pub fn hsv_to_rgb(h: f64, s: f64, v: f64) -> Rgb8 {
    let s = clamp_unit(s);
    let v = clamp_unit(v);

    if s == 0.0 {
        let gray = channel_round(v);
        return Rgb8::new(gray, gray, gray);
    }

    let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
    let sector = (h / 60.0).floor();
    let f = h / 60.0 - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - f * s);
    let t = v * (1.0 - (1.0 - f) * s);

    #[allow(clippy::cast_possible_truncation)]
    let (r, g, b) = match (sector as i64).rem_euclid(6) {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    };

    Rgb8::new(channel_trunc(r), channel_trunc(g), channel_trunc(b))
}

/// Convert 8-bit RGB back to HSV.
///
/// Grays (including black and white) report `h = 0, s = 0`.
#[must_use]
pub fn rgb_to_hsv(color: Rgb8) -> Hsv {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    if delta == 0.0 {
        return Hsv::new(0.0, 0.0, max);
    }

    let h = if max == r {
        60.0 * ((g - b) / delta)
    } else if max == g {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };

    Hsv::new(h.rem_euclid(360.0), delta / max, max)
}

/// Polar angle of `(dx, dy)` in degrees, wrapped into `[0, 360)`.
///
/// Screen y grows downward, so increasing hue runs clockwise on screen.
#[must_use]
pub fn hue_at(dx: f64, dy: f64) -> f64 {
    (dy.atan2(dx).to_degrees() + 360.0).rem_euclid(360.0)
}

/// Map a pointer position over a color wheel to hue and saturation.
///
/// Value is always 1.0: the wheel only encodes hue and saturation.
/// Saturation saturates at 1.0 outside the circle, and is forced to zero
/// within [`WHEEL_CENTER_DEADZONE`] of the center where hue is undefined.
#[must_use]
pub fn pointer_to_hsv(pointer: Point, center: Point, radius: f64) -> Hsv {
    let dx = pointer.x - center.x;
    let dy = pointer.y - center.y;
    let distance = dx.hypot(dy);

    let s = if distance <= WHEEL_CENTER_DEADZONE || radius <= 0.0 {
        0.0
    } else {
        (distance / radius).min(1.0)
    };

    Hsv::new(hue_at(dx, dy), s, 1.0)
}

fn clamp_unit(x: f64) -> f64 {
    if x.is_nan() { 0.0 } else { x.clamp(0.0, 1.0) }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_trunc(x: f64) -> u8 {
    (x * 255.0).clamp(0.0, 255.0) as u8
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn channel_round(x: f64) -> u8 {
    (x * 255.0).round().clamp(0.0, 255.0) as u8
}
