//! Input model: discrete events, held keys, menu state, and the drag gesture state machine.
//!
//! `InputEvent` is what the windowing layer (or a recorded script) feeds the
//! engine. `HeldKeys` is the polled snapshot used for continuous panning.
//! `DragState` tracks the active gesture between pointer-down and pointer-up:
//! samples are applied eagerly on every motion event, and the gesture end is
//! the only point where settings get committed.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use serde::Deserialize;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Button {
    /// Left mouse button.
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button.
    Secondary,
}

/// Keys the editor reacts to on key-down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    /// Toggles the editor menu.
    Digit0,
    /// Toggles the settings menu.
    Digit1,
    /// `+` / `=`: raise grid alpha.
    Plus,
    /// `-`: lower grid alpha.
    Minus,
    Left,
    Right,
    Up,
    Down,
    /// Anything else; ignored.
    #[serde(other)]
    Other,
}

/// Scroll wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WheelDirection {
    Up,
    Down,
}

/// A discrete input event.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    Quit,
    Resize { width: f64, height: f64 },
    KeyDown { key: Key },
    PointerDown { x: f64, y: f64, button: Button },
    PointerUp { button: Button },
    PointerMove { x: f64, y: f64 },
    Wheel { direction: WheelDirection },
}

/// Arrow keys currently held, polled once per tick.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// Whether any arrow is held.
    #[must_use]
    pub fn any(self) -> bool {
        self.left || self.right || self.up || self.down
    }
}

/// Which side menu and picker are visible.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiState {
    /// Editor menu (`0`).
    pub editor_menu_open: bool,
    /// Settings menu (`1`).
    pub settings_menu_open: bool,
    /// Color picker cursor and wheel interaction.
    pub picker_open: bool,
}

impl UiState {
    /// Toggle the editor menu; closes the settings menu and picker.
    pub fn toggle_editor_menu(&mut self) {
        self.editor_menu_open = !self.editor_menu_open;
        self.settings_menu_open = false;
        self.picker_open = false;
    }

    /// Toggle the settings menu; closes the editor menu and picker.
    pub fn toggle_settings_menu(&mut self) {
        self.settings_menu_open = !self.settings_menu_open;
        self.editor_menu_open = false;
        self.picker_open = false;
    }

    /// Whether any side menu is showing.
    #[must_use]
    pub fn side_menu_open(self) -> bool {
        self.editor_menu_open || self.settings_menu_open
    }
}

/// The active pointer gesture.
///
/// Drag state is independent of where the pointer is: a release anywhere
/// ends the gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Dragging the transparency slider handle.
    Slider {
        /// Whether any sample so far changed the settings.
        changed: bool,
    },
    /// Dragging the color wheel cursor.
    Wheel {
        /// Whether any sample so far changed the settings.
        changed: bool,
    },
}

impl DragState {
    #[must_use]
    pub fn is_dragging(self) -> bool {
        !matches!(self, Self::Idle)
    }

    /// Record the outcome of one sample.
    pub fn note_sample(&mut self, sample_changed: bool) {
        match self {
            Self::Slider { changed } | Self::Wheel { changed } => *changed |= sample_changed,
            Self::Idle => {}
        }
    }

    /// End the gesture, returning whether it changed anything.
    pub fn finish(&mut self) -> bool {
        let changed = match *self {
            Self::Slider { changed } | Self::Wheel { changed } => changed,
            Self::Idle => false,
        };
        *self = Self::Idle;
        changed
    }
}
