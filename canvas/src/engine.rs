use tracing::{debug, info};

use crate::camera::{Camera, Point};
use crate::config::EngineConfig;
use crate::consts::ALPHA_KEY_STEP;
use crate::input::{Button, DragState, HeldKeys, InputEvent, Key, UiState, WheelDirection};
use crate::layout::SettingsLayout;
use crate::picker::ColorPicker;
use crate::render::{self, Framebuffer, RenderError, Scene, Surface};
use crate::settings::GridSettings;
use crate::slider;

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Leave the frame loop.
    Quit,
    /// Persist these settings. Emitted only at gesture ends and discrete edits.
    CommitSettings(GridSettings),
}

/// Core editor state: all logic that doesn't depend on a window.
///
/// Separated from [`Engine`] so it can be tested without a pixel buffer.
#[derive(Debug, Clone)]
pub struct EngineCore {
    pub config: EngineConfig,
    pub settings: GridSettings,
    pub camera: Camera,
    pub ui: UiState,
    pub drag: DragState,
    pub picker: ColorPicker,
    /// Hit-test geometry for the current frame.
    pub layout: SettingsLayout,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl EngineCore {
    #[must_use]
    pub fn new(config: EngineConfig, settings: GridSettings) -> Self {
        let viewport_width = f64::from(config.window_width);
        let viewport_height = f64::from(config.window_height);
        let layout = SettingsLayout::compute(viewport_width, viewport_height, config.menu_width, settings.alpha);
        Self {
            picker: ColorPicker::new(settings.color),
            config,
            settings,
            camera: Camera::default(),
            ui: UiState::default(),
            drag: DragState::Idle,
            layout,
            viewport_width,
            viewport_height,
        }
    }

    /// Recompute this frame's layout. Call before dispatching the frame's input.
    pub fn begin_frame(&mut self) {
        self.layout = SettingsLayout::compute(
            self.viewport_width,
            self.viewport_height,
            self.config.menu_width,
            self.settings.alpha,
        );
    }

    /// Continuous per-tick updates: keyboard panning.
    pub fn tick(&mut self, held: HeldKeys) {
        if held.any() {
            self.camera.pan_held(held, self.config.pan_speed);
        }
    }

    // --- Input events ---

    pub fn handle_event(&mut self, event: InputEvent) -> Vec<Action> {
        match event {
            InputEvent::Quit => self.quit(),
            InputEvent::Resize { width, height } => {
                self.set_viewport(width, height);
                Vec::new()
            }
            InputEvent::KeyDown { key } => self.on_key_down(key),
            InputEvent::PointerDown { x, y, button } => self.on_pointer_down(Point::new(x, y), button),
            InputEvent::PointerUp { button } => self.on_pointer_up(button),
            InputEvent::PointerMove { x, y } => self.on_pointer_move(Point::new(x, y)),
            InputEvent::Wheel { direction } => {
                self.on_wheel(direction);
                Vec::new()
            }
        }
    }

    /// Update viewport dimensions and the layout that depends on them.
    pub fn set_viewport(&mut self, width: f64, height: f64) {
        self.viewport_width = width.max(0.0).floor();
        self.viewport_height = height.max(0.0).floor();
        info!(width = self.viewport_width, height = self.viewport_height, "viewport resized");
        self.begin_frame();
    }

    pub fn on_key_down(&mut self, key: Key) -> Vec<Action> {
        match key {
            Key::Escape => self.quit(),
            Key::Digit0 => {
                self.ui.toggle_editor_menu();
                debug!(open = self.ui.editor_menu_open, "editor menu toggled");
                Vec::new()
            }
            Key::Digit1 => {
                self.ui.toggle_settings_menu();
                debug!(open = self.ui.settings_menu_open, "settings menu toggled");
                Vec::new()
            }
            Key::Plus if self.ui.settings_menu_open => {
                self.settings.alpha = slider::nudge_up(self.settings.alpha, ALPHA_KEY_STEP);
                vec![self.commit()]
            }
            Key::Minus if self.ui.settings_menu_open => {
                self.settings.alpha = slider::nudge_down(self.settings.alpha, ALPHA_KEY_STEP);
                vec![self.commit()]
            }
            _ => Vec::new(),
        }
    }

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary || !self.ui.settings_menu_open {
            return Vec::new();
        }

        let layout = self.layout;
        let mut actions = Vec::new();

        if layout.slider_handle.contains(screen_pt) {
            self.drag = DragState::Slider { changed: false };
            let changed = slider::apply_sample(layout.slider_track, screen_pt.x, &mut self.settings);
            self.drag.note_sample(changed);
        }

        if layout.reset_button.contains(screen_pt) {
            self.settings.reset_grid();
            self.picker.sync_from_rgb(self.settings.color);
            info!("grid settings reset");
            actions.push(self.commit());
        }

        if layout.color_button.contains(screen_pt) {
            self.ui.picker_open = !self.ui.picker_open;
            info!(open = self.ui.picker_open, "color picker toggled");
        }

        if self.ui.picker_open && ColorPicker::contains_point(layout.picker, screen_pt) {
            self.drag = DragState::Wheel { changed: false };
            let changed = self.picker.on_drag(layout.picker, screen_pt, &mut self.settings);
            self.drag.note_sample(changed);
        }

        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let changed = match self.drag {
            DragState::Idle => return Vec::new(),
            DragState::Slider { .. } if self.ui.settings_menu_open => {
                slider::apply_sample(self.layout.slider_track, screen_pt.x, &mut self.settings)
            }
            DragState::Wheel { .. } if self.ui.picker_open => {
                self.picker.on_drag(self.layout.picker, screen_pt, &mut self.settings)
            }
            // Menu closed mid-drag: the gesture stays open but samples freeze.
            DragState::Slider { .. } | DragState::Wheel { .. } => false,
        };
        self.drag.note_sample(changed);
        Vec::new()
    }

    /// End any drag. The gesture's net change, if any, is committed here.
    pub fn on_pointer_up(&mut self, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        self.end_drag()
    }

    /// Finish any active gesture, committing its net change.
    ///
    /// Quitting and running out of input are gesture boundaries too.
    pub fn end_drag(&mut self) -> Vec<Action> {
        if self.drag.finish() { vec![self.commit()] } else { Vec::new() }
    }

    fn quit(&mut self) -> Vec<Action> {
        let mut actions = self.end_drag();
        actions.push(Action::Quit);
        actions
    }

    pub fn on_wheel(&mut self, direction: WheelDirection) {
        match direction {
            WheelDirection::Up => self.camera.zoom_in(self.config.zoom_step),
            WheelDirection::Down => self.camera.zoom_out(self.config.zoom_step),
        }
        debug!(zoom = self.camera.zoom, "zoom changed");
    }

    // --- Render ---

    /// Draw the current state to `surface`.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Grid`] if the tile size gives no usable grid step.
    pub fn render<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), RenderError> {
        let scene = Scene { camera: &self.camera, settings: &self.settings, ui: self.ui, layout: &self.layout };
        render::draw(surface, &scene, &mut self.picker)
    }

    fn commit(&self) -> Action {
        Action::CommitSettings(self.settings.clone())
    }
}

/// The full editor engine. Wraps [`EngineCore`] and owns the frame's pixels.
#[derive(Debug)]
pub struct Engine {
    frame: Framebuffer,
    pub core: EngineCore,
}

impl Engine {
    #[must_use]
    pub fn new(config: EngineConfig, settings: GridSettings) -> Self {
        let frame = Framebuffer::new(config.window_width, config.window_height);
        Self { frame, core: EngineCore::new(config, settings) }
    }

    pub fn begin_frame(&mut self) {
        self.core.begin_frame();
    }

    pub fn handle_event(&mut self, event: InputEvent) -> Vec<Action> {
        if let InputEvent::Resize { width, height } = event {
            self.frame.resize(pixels(width), pixels(height));
        }
        self.core.handle_event(event)
    }

    pub fn tick(&mut self, held: HeldKeys) {
        self.core.tick(held);
    }

    pub fn end_drag(&mut self) -> Vec<Action> {
        self.core.end_drag()
    }

    /// Draw the current state into the owned framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if the scene cannot be drawn.
    pub fn render(&mut self) -> Result<(), RenderError> {
        self.core.render(&mut self.frame)
    }

    /// The last rendered frame.
    #[must_use]
    pub fn frame(&self) -> &Framebuffer {
        &self.frame
    }

    #[must_use]
    pub fn settings(&self) -> &GridSettings {
        &self.core.settings
    }

    #[must_use]
    pub fn camera(&self) -> Camera {
        self.core.camera
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixels(v: f64) -> u32 {
    v.clamp(0.0, f64::from(u32::MAX)) as u32
}
