//! HSV color wheel widget.
//!
//! The wheel maps polar position to color: angle is hue, distance from the
//! center is saturation, value is fixed at 1.0. Pointer samples update the
//! tracked HSV and, when the derived RGB differs, the grid color. The wheel
//! raster depends only on its size, so it is rendered once per size and
//! reused across frames.

#[cfg(test)]
#[path = "picker_test.rs"]
mod picker_test;

use tracing::debug;

use crate::camera::Point;
use crate::color::{Hsv, Rgb8, Rgba8, hsv_to_rgb, hue_at, pointer_to_hsv, rgb_to_hsv};
use crate::consts::{CURSOR_INNER_RADIUS, CURSOR_OUTER_RADIUS, CURSOR_RING_WIDTH, WHEEL_RIM_INSET};
use crate::layout::Rect;
use crate::render::Surface;
use crate::settings::GridSettings;

/// A rendered color wheel: row-major RGBA pixels, transparent outside the circle.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelRaster {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgba8>,
    /// Painted radius in pixels; 0 when the raster is too small to hold a wheel.
    pub radius: i64,
}

impl WheelRaster {
    /// Pixel at `(x, y)`, or `None` outside the raster.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied()
    }

    /// Integer center used when painting.
    #[must_use]
    pub fn center(&self) -> (i64, i64) {
        (i64::from(self.width / 2), i64::from(self.height / 2))
    }
}

/// Paint a `width` x `height` color wheel.
///
/// Each pixel inside the circle gets `hsv_to_rgb(hue, distance / radius, 1.0)`
/// with hue and distance measured from the integer center exactly as a
/// pointer would be. The radius is inset from the raster edge to leave room
/// for an outline ring.
#[must_use]
pub fn render_wheel(width: u32, height: u32) -> WheelRaster {
    let (cx, cy) = (i64::from(width / 2), i64::from(height / 2));
    let radius = cx.min(cy) - WHEEL_RIM_INSET;
    let mut pixels = vec![Rgba8::TRANSPARENT; width as usize * height as usize];

    if radius > 0 {
        #[allow(clippy::cast_precision_loss)]
        let r = radius as f64;
        for y in 0..height {
            for x in 0..width {
                #[allow(clippy::cast_precision_loss)]
                let dx = (i64::from(x) - cx) as f64;
                #[allow(clippy::cast_precision_loss)]
                let dy = (i64::from(y) - cy) as f64;
                let distance = dx.hypot(dy);
                if distance <= r {
                    let color = hsv_to_rgb(hue_at(dx, dy), distance / r, 1.0);
                    pixels[y as usize * width as usize + x as usize] = color.into();
                }
            }
        }
    }

    WheelRaster { width, height, pixels, radius: radius.max(0) }
}

/// Color wheel interaction state.
///
/// The widget does not own its rectangle: layout supplies it every frame.
#[derive(Debug, Clone, Default)]
pub struct ColorPicker {
    hsv: Hsv,
    cache: Option<WheelRaster>,
}

impl ColorPicker {
    /// Start with the cursor re-derived from `color`.
    #[must_use]
    pub fn new(color: Rgb8) -> Self {
        Self { hsv: rgb_to_hsv(color), cache: None }
    }

    /// The last sampled (or re-derived) HSV.
    #[must_use]
    pub fn hsv(&self) -> Hsv {
        self.hsv
    }

    /// Re-derive the cursor from an authoritative RGB color.
    pub fn sync_from_rgb(&mut self, color: Rgb8) {
        self.hsv = rgb_to_hsv(color);
    }

    /// Whether `pointer` is inside the wheel's square bounding box, edges
    /// included, so the rim points at `center ± radius` are reachable.
    ///
    /// Drags may start in the corners outside the circle.
    #[must_use]
    pub fn contains_point(rect: Rect, pointer: Point) -> bool {
        rect.contains_closed(pointer)
    }

    /// Apply one drag sample at `pointer` over the wheel at `rect`.
    ///
    /// Pointers outside the bounding box are ignored. Returns whether the
    /// grid color changed.
    pub fn on_drag(&mut self, rect: Rect, pointer: Point, settings: &mut GridSettings) -> bool {
        if !Self::contains_point(rect, pointer) {
            return false;
        }
        self.hsv = pointer_to_hsv(pointer, rect.center(), rect.width / 2.0);
        let rgb = self.hsv.to_rgb();
        if settings.color == rgb {
            return false;
        }
        debug!(h = self.hsv.h, s = self.hsv.s, ?rgb, "wheel sample changed grid color");
        settings.color = rgb;
        true
    }

    /// The wheel raster for a `width` x `height` box, rendered on first use
    /// and again only when the size changes.
    pub fn wheel(&mut self, width: u32, height: u32) -> &WheelRaster {
        let stale = match &self.cache {
            Some(raster) => raster.width != width || raster.height != height,
            None => true,
        };
        if stale {
            debug!(width, height, "rendering color wheel");
            self.cache = Some(render_wheel(width, height));
        }
        self.cache.get_or_insert_with(|| render_wheel(width, height))
    }

    /// Screen position of the cursor for the current HSV over `rect`.
    #[must_use]
    pub fn cursor_position(&self, rect: Rect) -> Point {
        cursor_position(self.hsv, rect)
    }

    /// Draw the two-tone cursor ring (dark outside, light inside).
    pub fn draw_cursor<S: Surface + ?Sized>(&self, surface: &mut S, rect: Rect) {
        let p = self.cursor_position(rect);
        let at = Point::new(p.x.trunc(), p.y.trunc());
        surface.draw_circle_outline(at, CURSOR_OUTER_RADIUS, CURSOR_RING_WIDTH, Rgb8::BLACK.into());
        surface.draw_circle_outline(at, CURSOR_INNER_RADIUS, CURSOR_RING_WIDTH, Rgb8::WHITE.into());
    }
}

/// Cursor position for `hsv` over a wheel in `rect` with radius `rect.width / 2`.
#[must_use]
pub fn cursor_position(hsv: Hsv, rect: Rect) -> Point {
    let center = rect.center();
    let radius = rect.width / 2.0;
    let distance = (hsv.s * radius).clamp(0.0, radius.max(0.0));
    let angle = hsv.h.to_radians();
    Point::new(center.x + distance * angle.cos(), center.y + distance * angle.sin())
}
