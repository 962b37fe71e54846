//! Input abstraction layer.
//!
//! Normalizes the host's mouse, wheel and keyboard events into a unified
//! `InputEvent` enum consumed by the interaction controller. Coordinates are
//! screen pixels (`clientX`/`clientY` in a browser host).

/// Modifier keys held during an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    /// ⌘ on macOS, Ctrl elsewhere.
    pub fn command(&self) -> bool {
        self.ctrl || self.meta
    }
}

/// A normalized input event on the canvas surface.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Button pressed over the canvas or over a node card.
    PointerDown { x: f64, y: f64 },

    /// Pointer moved over the canvas.
    PointerMove { x: f64, y: f64 },

    /// Button released anywhere.
    PointerUp,

    /// Pointer left the canvas container; treated like a release.
    PointerLeave,

    /// Wheel / trackpad scroll. Deltas follow DOM `WheelEvent` sign
    /// conventions (positive `dy` scrolls down).
    Wheel { dx: f64, dy: f64, modifiers: Modifiers },

    /// Click on a node card (fires after the matching release).
    Click,
}

impl InputEvent {
    pub fn pointer_down(x: f64, y: f64) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f64, y: f64) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn wheel(dx: f64, dy: f64, modifiers: Modifiers) -> Self {
        Self::Wheel { dx, dy, modifiers }
    }

    /// Extract position if this is a positioned pointer event.
    pub fn position(&self) -> Option<(f64, f64)> {
        match self {
            Self::PointerDown { x, y } | Self::PointerMove { x, y } => Some((*x, *y)),
            _ => None,
        }
    }
}
