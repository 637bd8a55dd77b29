//! Rendering: draws the editor scene onto a [`Surface`].
//!
//! The [`Surface`] trait is the drawing capability the scene targets.
//! [`Framebuffer`] implements it on a `vello_cpu` render context and is what
//! the shell and the tests draw into. Points handed to line and circle
//! primitives address pixels: `(3, 4)` is the pixel whose top-left corner is
//! at `(3, 4)`, so one-pixel lines land on whole pixels.
//!
//! Drawing receives read-only views of camera, settings and layout. The only
//! mutable input is the [`ColorPicker`], whose wheel raster is memoized.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::fmt;

use peniko::{Blob, ImageAlphaType, ImageData, ImageFormat, ImageQuality, ImageSampler};
use vello_cpu::kurbo::{Affine, BezPath, Cap, Circle, Rect as PixelRect, Shape, Stroke};
use vello_cpu::{Image, ImageSource, Pixmap, RenderContext};

use crate::camera::{Camera, Point};
use crate::color::{Rgb8, Rgba8};
use crate::consts::{BUTTON_PADDING_Y, LINE_GAP, LINE_HEIGHT, MENU_PADDING, MENU_TOP, SLIDER_HANDLE_RADIUS};
use crate::grid::{GridError, GridLines};
use crate::input::UiState;
use crate::layout::{
    COLOR_BUTTON_LABEL, EDITOR_MENU_LINES, EDITOR_MENU_TITLE, GRID_HEADER, LANGUAGE_HEADER, LANGUAGE_LINES,
    RESET_BUTTON_LABEL, Rect, SETTINGS_TITLE, SettingsLayout,
};
use crate::picker::{ColorPicker, WheelRaster};
use crate::settings::GridSettings;
use crate::slider;

/// Side panel background.
pub const PANEL_GRAY: Rgb8 = Rgb8::new(50, 50, 50);
/// Secondary text, slider track and reset button.
pub const LIGHT_GRAY: Rgb8 = Rgb8::new(150, 150, 150);
/// Color toggle button while the picker is closed.
pub const BUTTON_OFF: Rgb8 = Rgb8::new(100, 200, 100);
/// Color toggle button while the picker is open.
pub const BUTTON_ON: Rgb8 = Rgb8::new(255, 100, 100);

/// Top-left anchor of the status line.
const STATUS_ANCHOR: Point = Point { x: 10.0, y: 10.0 };

/// Flattening tolerance for circles, in pixels.
const CURVE_TOLERANCE: f64 = 0.1;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Grid(#[from] GridError),
}

/// A text string placed on a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub at: Point,
    pub color: Rgb8,
}

/// Screen pixel coordinate for a float position (truncating toward zero).
#[allow(clippy::cast_possible_truncation)]
fn px(v: f64) -> i64 {
    v as i64
}

/// Non-negative pixel extent for a float size.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn extent(v: f64) -> u32 {
    v.clamp(0.0, f64::from(u32::MAX)) as u32
}

/// Immediate-mode 2D drawing target.
///
/// All coordinates are screen pixels; drawing outside the surface is clipped.
/// Colors composite source-over with straight alpha.
pub trait Surface {
    /// Width and height in pixels.
    fn size(&self) -> (u32, u32);

    /// Discard everything drawn so far and fill with an opaque color.
    fn clear(&mut self, color: Rgb8);

    fn fill_rect(&mut self, rect: Rect, color: Rgba8);

    /// One-pixel border just inside `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Rgba8);

    /// One-pixel line covering both endpoint pixels.
    fn draw_line(&mut self, from: Point, to: Point, color: Rgba8);

    /// Ring of thickness `width` whose outermost pixels are `radius` from
    /// the `center` pixel.
    ///
    /// A width at or above the radius fills the disc.
    fn draw_circle_outline(&mut self, center: Point, radius: f64, width: f64, color: Rgba8);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.draw_circle_outline(center, radius, radius, color);
    }

    /// Composite `raster` with its top-left corner at `(x, y)`.
    fn blit_raster(&mut self, raster: &WheelRaster, x: i64, y: i64);

    /// Start a group that is composited with `opacity` when popped.
    ///
    /// Overlapping shapes inside the group cover each other instead of
    /// accumulating alpha.
    fn push_opacity(&mut self, opacity: f32);

    fn pop_layer(&mut self);

    /// Place a line of text with its top-left corner at `at`.
    fn draw_text(&mut self, text: &str, at: Point, color: Rgb8);

    /// Finish pending drawing. Called once at the end of every frame.
    fn present(&mut self) {}
}

/// Software RGBA8 surface backed by a `vello_cpu` render context.
///
/// Drawing is recorded into the context and rasterized into the pixmap on
/// [`Surface::present`]; [`Framebuffer::pixel`] reads the last presented
/// frame. Text is recorded as [`TextRun`]s rather than rasterized.
pub struct Framebuffer {
    width: u16,
    height: u16,
    ctx: RenderContext,
    pixmap: Pixmap,
    texts: Vec<TextRun>,
}

impl fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("texts", &self.texts.len())
            .finish_non_exhaustive()
    }
}

impl Framebuffer {
    /// A presented surface of the given size, cleared to opaque black.
    ///
    /// Each side is clamped to `1..=65535`.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let (width, height) = (dimension(width), dimension(height));
        let mut frame = Self {
            width,
            height,
            ctx: RenderContext::new(width, height),
            pixmap: Pixmap::new(width, height),
            texts: Vec::new(),
        };
        frame.clear(Rgb8::BLACK);
        frame.present();
        frame
    }

    /// Reallocate for a new window size, discarding contents.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
    }

    /// Straight-alpha color at `(x, y)` as of the last present.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        if x >= u32::from(self.width) || y >= u32::from(self.height) {
            return None;
        }
        let idx = y as usize * usize::from(self.width) + x as usize;
        self.pixmap.data().get(idx).map(|p| demultiply(p.r, p.g, p.b, p.a))
    }

    /// Text placed since the last [`Surface::clear`], in draw order.
    #[must_use]
    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Row-major straight-alpha RGBA bytes of the last present, four per pixel.
    #[must_use]
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixmap
            .data()
            .iter()
            .flat_map(|p| {
                let c = demultiply(p.r, p.g, p.b, p.a);
                [c.r, c.g, c.b, c.a]
            })
            .collect()
    }

    fn set_color(&mut self, color: Rgba8) {
        self.ctx.set_paint(peniko::Color::from_rgba8(color.r, color.g, color.b, color.a));
    }
}

fn dimension(v: u32) -> u16 {
    u16::try_from(v).unwrap_or(u16::MAX).max(1)
}

/// Center of the pixel addressed by `p`.
fn pixel_center(p: Point) -> (f64, f64) {
    (p.x.floor() + 0.5, p.y.floor() + 0.5)
}

#[allow(clippy::cast_possible_truncation)]
fn demultiply(r: u8, g: u8, b: u8, a: u8) -> Rgba8 {
    if a == 0 {
        return Rgba8::TRANSPARENT;
    }
    let (a16, half) = (u16::from(a), u16::from(a) / 2);
    let channel = |c: u8| ((u16::from(c) * 255 + half) / a16).min(255) as u8;
    Rgba8::new(channel(r), channel(g), channel(b), a)
}

impl Surface for Framebuffer {
    fn size(&self) -> (u32, u32) {
        (u32::from(self.width), u32::from(self.height))
    }

    fn clear(&mut self, color: Rgb8) {
        self.ctx.reset();
        self.ctx.set_transform(Affine::IDENTITY);
        self.texts.clear();
        self.set_color(color.into());
        self.ctx.fill_rect(&PixelRect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height)));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba8) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        self.set_color(color);
        let (x0, y0) = (rect.x.trunc(), rect.y.trunc());
        let (x1, y1) = (rect.right().trunc(), rect.bottom().trunc());
        self.ctx.fill_rect(&PixelRect::new(x0, y0, x1, y1));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Rgba8) {
        let (x0, y0) = (rect.x.trunc(), rect.y.trunc());
        let (x1, y1) = (rect.right().trunc(), rect.bottom().trunc());
        if x1 <= x0 || y1 <= y0 {
            return;
        }
        self.set_color(color);
        let edges = [
            PixelRect::new(x0, y0, x1, y0 + 1.0),
            PixelRect::new(x0, (y1 - 1.0).max(y0 + 1.0), x1, y1),
            PixelRect::new(x0, y0 + 1.0, x0 + 1.0, y1 - 1.0),
            PixelRect::new((x1 - 1.0).max(x0 + 1.0), y0 + 1.0, x1, y1 - 1.0),
        ];
        for edge in edges.iter().filter(|e| e.width() > 0.0 && e.height() > 0.0) {
            self.ctx.fill_rect(edge);
        }
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Rgba8) {
        let mut path = BezPath::new();
        path.move_to(pixel_center(from));
        path.line_to(pixel_center(to));
        self.set_color(color);
        self.ctx.set_stroke(Stroke::new(1.0).with_caps(Cap::Square));
        self.ctx.stroke_path(&path);
    }

    fn draw_circle_outline(&mut self, center: Point, radius: f64, width: f64, color: Rgba8) {
        if radius <= 0.0 || width <= 0.0 {
            return;
        }
        let center = pixel_center(center);
        self.set_color(color);
        if width >= radius {
            let disc = Circle::new(center, radius + 0.5).to_path(CURVE_TOLERANCE);
            self.ctx.fill_path(&disc);
        } else {
            // Pixel centers at distances in (radius - width, radius] are covered.
            let ring = Circle::new(center, radius + 0.5 - width / 2.0).to_path(CURVE_TOLERANCE);
            self.ctx.set_stroke(Stroke::new(width));
            self.ctx.stroke_path(&ring);
        }
    }

    #[allow(clippy::cast_precision_loss)]
    fn blit_raster(&mut self, raster: &WheelRaster, x: i64, y: i64) {
        if raster.width == 0 || raster.height == 0 {
            return;
        }
        let bytes: Vec<u8> = raster.pixels.iter().flat_map(|p| [p.r, p.g, p.b, p.a]).collect();
        let data = ImageData {
            data: Blob::from(bytes),
            format: ImageFormat::Rgba8,
            alpha_type: ImageAlphaType::Alpha,
            width: raster.width,
            height: raster.height,
        };
        let image = Image {
            image: ImageSource::from_peniko_image_data(&data),
            sampler: ImageSampler { quality: ImageQuality::Low, ..ImageSampler::default() },
        };
        self.ctx.set_transform(Affine::translate((x as f64, y as f64)));
        self.ctx.set_paint(image);
        self.ctx.fill_rect(&PixelRect::new(0.0, 0.0, f64::from(raster.width), f64::from(raster.height)));
        self.ctx.set_transform(Affine::IDENTITY);
    }

    fn push_opacity(&mut self, opacity: f32) {
        self.ctx.push_layer(None, None, Some(opacity.clamp(0.0, 1.0)), None, None);
    }

    fn pop_layer(&mut self) {
        self.ctx.pop_layer();
    }

    fn draw_text(&mut self, text: &str, at: Point, color: Rgb8) {
        self.texts.push(TextRun { text: text.to_owned(), at, color });
    }

    fn present(&mut self) {
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut self.pixmap);
    }
}

/// Read-only state needed to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Scene<'a> {
    pub camera: &'a Camera,
    pub settings: &'a GridSettings,
    pub ui: UiState,
    pub layout: &'a SettingsLayout,
}

/// Draw the full frame: background, grid, side menu, status line.
///
/// # Errors
///
/// Returns [`RenderError::Grid`] if the tile size and zoom give no usable
/// grid step.
pub fn draw<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>, picker: &mut ColorPicker) -> Result<(), RenderError> {
    let (width, height) = surface.size();

    // Layer 1: background.
    surface.clear(Rgb8::BLACK);

    // Layer 2: grid overlay.
    let lines = scene.camera.grid_lines(f64::from(width), f64::from(height), f64::from(scene.settings.tile_size))?;
    draw_grid(surface, &lines, scene.settings.color.with_alpha(scene.settings.alpha));

    // Layer 3: side menu.
    if scene.ui.side_menu_open() {
        surface.fill_rect(scene.layout.panel, PANEL_GRAY.into());
        if scene.ui.editor_menu_open {
            draw_editor_menu(surface, scene.layout.panel);
        } else {
            draw_settings(surface, scene, picker);
        }
    }

    // Layer 4: status line.
    let status = format!(
        "Zoom: {:.2} | Cam: ({:.0}, {:.0}) | T_Size: {}",
        scene.camera.zoom, scene.camera.x, scene.camera.y, scene.settings.tile_size
    );
    surface.draw_text(&status, STATUS_ANCHOR, LIGHT_GRAY);

    surface.present();
    Ok(())
}

/// Composite the grid as a single translucent layer.
///
/// Lines are drawn opaque inside an opacity group, so a pixel where two
/// lines cross is composited once.
pub fn draw_grid<S: Surface + ?Sized>(surface: &mut S, lines: &GridLines, color: Rgba8) {
    if color.a == 0 {
        return;
    }
    surface.push_opacity(f32::from(color.a) / 255.0);
    let opaque = Rgba8 { a: u8::MAX, ..color };
    for seg in lines.segments() {
        surface.draw_line(seg.from, seg.to, opaque);
    }
    surface.pop_layer();
}

fn draw_editor_menu<S: Surface + ?Sized>(surface: &mut S, panel: Rect) {
    let left = panel.x + MENU_PADDING;
    let mut y = MENU_TOP;
    surface.draw_text(EDITOR_MENU_TITLE, Point::new(left, y), Rgb8::WHITE);
    y += LINE_HEIGHT + MENU_PADDING;
    for line in EDITOR_MENU_LINES {
        surface.draw_text(line, Point::new(left, y), LIGHT_GRAY);
        y += LINE_HEIGHT + LINE_GAP;
    }
}

fn draw_settings<S: Surface + ?Sized>(surface: &mut S, scene: &Scene<'_>, picker: &mut ColorPicker) {
    let layout = scene.layout;
    let settings = scene.settings;

    surface.draw_text(SETTINGS_TITLE, layout.title, Rgb8::WHITE);
    surface.draw_text(GRID_HEADER, layout.header, LIGHT_GRAY);

    // Wheel, outline ring, cursor.
    let rect = layout.picker;
    let (origin_x, origin_y) = (px(rect.x), px(rect.y));
    let raster = picker.wheel(extent(rect.width), extent(rect.height));
    surface.blit_raster(raster, origin_x, origin_y);
    let (cx, cy) = raster.center();
    #[allow(clippy::cast_precision_loss)]
    let (outline_center, outline_radius) =
        (Point::new((origin_x + cx) as f64, (origin_y + cy) as f64), (raster.radius + 1) as f64);
    surface.draw_circle_outline(outline_center, outline_radius, 1.0, Rgb8::WHITE.into());
    if scene.ui.picker_open {
        picker.draw_cursor(surface, rect);
    }

    // Swatch and RGB label.
    let c = settings.color;
    surface.fill_rect(layout.swatch, c.into());
    surface.stroke_rect(layout.swatch, Rgb8::WHITE.into());
    surface.draw_text(&format!("Current RGB: [{}, {}, {}]", c.r, c.g, c.b), layout.color_label, Rgb8::WHITE);

    // Picker toggle.
    let (button_fill, label_color) =
        if scene.ui.picker_open { (BUTTON_ON, Rgb8::BLACK) } else { (BUTTON_OFF, Rgb8::WHITE) };
    surface.fill_rect(layout.color_button, button_fill.into());
    surface.draw_text(COLOR_BUTTON_LABEL, button_label_anchor(layout.color_button), label_color);

    // Transparency slider.
    surface.draw_text(&format!("Transparency (0-255): {}", settings.alpha), layout.alpha_label, Rgb8::WHITE);
    surface.fill_rect(layout.slider_track, LIGHT_GRAY.into());
    surface.fill_circle(slider::handle_center(layout.slider_track, settings.alpha), SLIDER_HANDLE_RADIUS, Rgb8::WHITE.into());

    // Reset.
    surface.fill_rect(layout.reset_button, LIGHT_GRAY.into());
    surface.draw_text(RESET_BUTTON_LABEL, button_label_anchor(layout.reset_button), Rgb8::BLACK);

    // Languages placeholder.
    surface.draw_text(LANGUAGE_HEADER, layout.language_header, LIGHT_GRAY);
    for (line, at) in LANGUAGE_LINES.iter().zip(layout.language_lines) {
        surface.draw_text(line, at, Rgb8::WHITE);
    }
}

fn button_label_anchor(button: Rect) -> Point {
    Point::new(button.x + MENU_PADDING, button.y + BUTTON_PADDING_Y)
}
