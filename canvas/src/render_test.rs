use super::*;

const OPAQUE_BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
const OPAQUE_WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);

fn scene_parts(width: f64, height: f64) -> (Camera, GridSettings, SettingsLayout) {
    let settings = GridSettings::default();
    let layout = SettingsLayout::compute(width, height, 300.0, settings.alpha);
    (Camera::default(), settings, layout)
}

fn texts(fb: &Framebuffer) -> Vec<&str> {
    fb.texts().iter().map(|t| t.text.as_str()).collect()
}

/// Every channel within `tolerance` of `expected`; edges are anti-aliased.
#[track_caller]
fn assert_near(fb: &Framebuffer, x: u32, y: u32, expected: Rgba8, tolerance: u8) {
    let got = fb.pixel(x, y).unwrap();
    let close = |a: u8, b: u8| a.abs_diff(b) <= tolerance;
    assert!(
        close(got.r, expected.r) && close(got.g, expected.g) && close(got.b, expected.b) && close(got.a, expected.a),
        "pixel ({x}, {y}) = {got:?}, expected {expected:?}"
    );
}

// =============================================================
// Framebuffer primitives
// =============================================================

#[test]
fn new_framebuffer_is_opaque_black() {
    let fb = Framebuffer::new(4, 3);
    assert_eq!(fb.size(), (4, 3));
    assert_eq!(fb.pixel(3, 2), Some(OPAQUE_BLACK));
    assert_eq!(fb.pixel(4, 0), None);
    assert_eq!(fb.to_rgba_bytes().len(), 4 * 3 * 4);
}

#[test]
fn zero_sized_framebuffer_keeps_one_pixel() {
    let fb = Framebuffer::new(0, 0);
    assert_eq!(fb.size(), (1, 1));
}

#[test]
fn drawing_is_visible_after_present() {
    let mut fb = Framebuffer::new(4, 4);
    fb.fill_rect(Rect::new(0.0, 0.0, 2.0, 2.0), OPAQUE_WHITE);
    assert_eq!(fb.pixel(0, 0), Some(OPAQUE_BLACK));
    fb.present();
    assert_eq!(fb.pixel(0, 0), Some(OPAQUE_WHITE));
}

#[test]
fn drawing_off_surface_is_clipped() {
    let mut fb = Framebuffer::new(4, 4);
    fb.fill_rect(Rect::new(-10.0, -10.0, 12.0, 12.0), OPAQUE_WHITE);
    fb.present();
    assert_eq!(fb.pixel(1, 1), Some(OPAQUE_WHITE));
    assert_eq!(fb.pixel(2, 2), Some(OPAQUE_BLACK));
}

#[test]
fn translucent_fill_composites_over_background() {
    let mut fb = Framebuffer::new(4, 4);
    fb.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), Rgba8::new(255, 255, 255, 127));
    fb.present();
    assert_near(&fb, 2, 2, Rgba8::new(127, 127, 127, 255), 1);
}

#[test]
fn stroke_rect_draws_inner_border() {
    let mut fb = Framebuffer::new(10, 10);
    fb.stroke_rect(Rect::new(2.0, 2.0, 4.0, 4.0), OPAQUE_WHITE);
    fb.present();
    assert_eq!(fb.pixel(2, 2), Some(OPAQUE_WHITE));
    assert_eq!(fb.pixel(5, 5), Some(OPAQUE_WHITE));
    assert_eq!(fb.pixel(2, 4), Some(OPAQUE_WHITE));
    assert_eq!(fb.pixel(3, 3), Some(OPAQUE_BLACK));
    assert_eq!(fb.pixel(6, 6), Some(OPAQUE_BLACK));
}

#[test]
fn line_includes_both_endpoints() {
    let mut fb = Framebuffer::new(10, 10);
    fb.draw_line(Point::new(1.0, 1.0), Point::new(4.0, 1.0), OPAQUE_WHITE);
    fb.present();
    for x in 1..=4 {
        assert_eq!(fb.pixel(x, 1), Some(OPAQUE_WHITE), "x={x}");
    }
    assert_eq!(fb.pixel(5, 1), Some(OPAQUE_BLACK));
    assert_eq!(fb.pixel(2, 0), Some(OPAQUE_BLACK));
    assert_eq!(fb.pixel(2, 2), Some(OPAQUE_BLACK));
}

#[test]
fn diagonal_line_lights_the_diagonal() {
    let mut fb = Framebuffer::new(10, 10);
    fb.draw_line(Point::new(0.0, 0.0), Point::new(6.0, 6.0), OPAQUE_WHITE);
    fb.present();
    for i in 1..=5 {
        assert!(fb.pixel(i, i).unwrap().r > 128, "i={i}");
    }
    assert_eq!(fb.pixel(5, 0), Some(OPAQUE_BLACK));
}

#[test]
fn circle_outline_is_a_ring() {
    let mut fb = Framebuffer::new(40, 40);
    fb.draw_circle_outline(Point::new(20.0, 20.0), 8.0, 2.0, OPAQUE_WHITE);
    fb.present();
    assert_near(&fb, 28, 20, OPAQUE_WHITE, 8);
    assert_near(&fb, 27, 20, OPAQUE_WHITE, 8);
    assert_near(&fb, 20, 12, OPAQUE_WHITE, 8);
    assert_near(&fb, 25, 20, OPAQUE_BLACK, 8);
    assert_eq!(fb.pixel(20, 20), Some(OPAQUE_BLACK));
    assert_near(&fb, 30, 20, OPAQUE_BLACK, 8);
}

#[test]
fn fill_circle_covers_center() {
    let mut fb = Framebuffer::new(20, 20);
    fb.fill_circle(Point::new(10.0, 10.0), 3.0, OPAQUE_WHITE);
    fb.present();
    assert_eq!(fb.pixel(10, 10), Some(OPAQUE_WHITE));
    assert_near(&fb, 13, 10, OPAQUE_WHITE, 8);
    assert_near(&fb, 15, 10, OPAQUE_BLACK, 8);
}

#[test]
fn opacity_group_composites_overlaps_once() {
    let mut fb = Framebuffer::new(10, 10);
    fb.push_opacity(0.5);
    fb.fill_rect(Rect::new(0.0, 0.0, 6.0, 6.0), OPAQUE_WHITE);
    fb.fill_rect(Rect::new(3.0, 3.0, 6.0, 6.0), OPAQUE_WHITE);
    fb.pop_layer();
    fb.present();
    assert_near(&fb, 1, 1, Rgba8::new(128, 128, 128, 255), 1);
    assert_near(&fb, 4, 4, Rgba8::new(128, 128, 128, 255), 1);
    assert_eq!(fb.pixel(8, 8), Some(OPAQUE_BLACK));
}

#[test]
fn raster_blit_skips_transparent_pixels() {
    let mut raster = WheelRaster { width: 2, height: 1, pixels: vec![Rgba8::TRANSPARENT; 2], radius: 0 };
    raster.pixels[1] = Rgba8::new(255, 0, 0, 255);
    let mut fb = Framebuffer::new(6, 4);
    fb.blit_raster(&raster, 3, 2);
    fb.present();
    assert_eq!(fb.pixel(3, 2), Some(OPAQUE_BLACK));
    assert_eq!(fb.pixel(4, 2), Some(Rgba8::new(255, 0, 0, 255)));
    assert_eq!(fb.pixel(5, 2), Some(OPAQUE_BLACK));
}

#[test]
fn clear_resets_pixels_and_text() {
    let mut fb = Framebuffer::new(2, 2);
    fb.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), OPAQUE_WHITE);
    fb.draw_text("hello", Point::new(0.0, 0.0), Rgb8::WHITE);
    fb.clear(Rgb8::BLACK);
    fb.present();
    assert_eq!(fb.pixel(0, 0), Some(OPAQUE_BLACK));
    assert!(fb.texts().is_empty());
}

// =============================================================
// Scene
// =============================================================

#[test]
fn grid_crossings_are_composited_once() {
    let mut fb = Framebuffer::new(100, 50);
    let (camera, mut settings, layout) = scene_parts(100.0, 50.0);
    settings.tile_size = 25;
    let scene = Scene { camera: &camera, settings: &settings, ui: UiState::default(), layout: &layout };
    draw(&mut fb, &scene, &mut ColorPicker::default()).unwrap();

    let line = Rgba8::new(127, 127, 127, 255);
    assert_near(&fb, 0, 0, line, 1);
    assert_near(&fb, 25, 25, line, 1);
    assert_near(&fb, 0, 10, line, 1);
    assert_near(&fb, 10, 0, line, 1);
    assert_eq!(fb.pixel(10, 10), Some(OPAQUE_BLACK));
    assert_eq!(fb.pixel(24, 10), Some(OPAQUE_BLACK));
}

#[test]
fn status_line_is_drawn_last() {
    let mut fb = Framebuffer::new(800, 600);
    let (mut camera, settings, layout) = scene_parts(800.0, 600.0);
    camera.x = -12.4;
    camera.y = 40.0;
    camera.zoom = 1.21;
    let scene = Scene { camera: &camera, settings: &settings, ui: UiState::default(), layout: &layout };
    draw(&mut fb, &scene, &mut ColorPicker::default()).unwrap();

    let last = fb.texts().last().unwrap();
    assert_eq!(last.text, "Zoom: 1.21 | Cam: (-12, 40) | T_Size: 32");
    assert_eq!(last.at, Point::new(10.0, 10.0));
    assert_eq!(last.color, LIGHT_GRAY);
}

#[test]
fn settings_panel_draws_wheel_and_labels() {
    let mut fb = Framebuffer::new(800, 600);
    let (camera, settings, layout) = scene_parts(800.0, 600.0);
    let ui = UiState { settings_menu_open: true, ..UiState::default() };
    let scene = Scene { camera: &camera, settings: &settings, ui, layout: &layout };
    draw(&mut fb, &scene, &mut ColorPicker::default()).unwrap();

    let t = texts(&fb);
    assert!(t.contains(&SETTINGS_TITLE));
    assert!(t.contains(&"Current RGB: [255, 255, 255]"));
    assert!(t.contains(&"Transparency (0-255): 127"));
    assert!(t.contains(&RESET_BUTTON_LABEL));
    assert!(!t.contains(&EDITOR_MENU_TITLE));

    // Panel background in the left padding column.
    assert_eq!(fb.pixel(505, 590), Some(Rgba8::new(50, 50, 50, 255)));
    // Wheel rim at 3 o'clock is pure red; the outline ring sits just outside it.
    assert_near(&fb, 788, 234, Rgba8::new(255, 0, 0, 255), 2);
    assert_near(&fb, 789, 234, OPAQUE_WHITE, 8);
}

#[test]
fn picker_cursor_only_when_open() {
    let (camera, settings, layout) = scene_parts(800.0, 600.0);
    let mut picker = ColorPicker::default();

    let mut closed = Framebuffer::new(800, 600);
    let ui = UiState { settings_menu_open: true, ..UiState::default() };
    draw(&mut closed, &Scene { camera: &camera, settings: &settings, ui, layout: &layout }, &mut picker).unwrap();

    let mut open = Framebuffer::new(800, 600);
    let ui = UiState { settings_menu_open: true, picker_open: true, ..UiState::default() };
    draw(&mut open, &Scene { camera: &camera, settings: &settings, ui, layout: &layout }, &mut picker).unwrap();

    // White cursor sits at the wheel center (650, 234); its dark outer ring is 7px out.
    assert!(closed.pixel(657, 234).unwrap().r > 100);
    assert_near(&open, 657, 234, OPAQUE_BLACK, 8);
}

#[test]
fn editor_menu_shows_placeholder() {
    let mut fb = Framebuffer::new(800, 600);
    let (camera, settings, layout) = scene_parts(800.0, 600.0);
    let ui = UiState { editor_menu_open: true, ..UiState::default() };
    draw(&mut fb, &Scene { camera: &camera, settings: &settings, ui, layout: &layout }, &mut ColorPicker::default())
        .unwrap();

    let t = texts(&fb);
    assert_eq!(t[..3], [EDITOR_MENU_TITLE, EDITOR_MENU_LINES[0], EDITOR_MENU_LINES[1]]);
    assert!(!t.contains(&SETTINGS_TITLE));
}

#[test]
fn zero_tile_size_is_a_grid_error() {
    let mut fb = Framebuffer::new(10, 10);
    let (camera, mut settings, layout) = scene_parts(10.0, 10.0);
    settings.tile_size = 0;
    let scene = Scene { camera: &camera, settings: &settings, ui: UiState::default(), layout: &layout };
    let err = draw(&mut fb, &scene, &mut ColorPicker::default()).unwrap_err();
    assert!(matches!(err, RenderError::Grid(GridError::NonPositiveStep { .. })));
}
