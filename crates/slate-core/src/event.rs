#![forbid(unsafe_code)]

//! Canonical input/event types.
//!
//! The host adapter translates its native pointer/keyboard events into these
//! before handing them to the editor session. All events derive `Clone`,
//! `PartialEq`, and `Eq` for use in tests and pattern matching.
//!
//! # Design Notes
//!
//! - Pointer coordinates are already in canvas space (0-indexed, top-left
//!   origin); the host applies any zoom or letterboxing transform first.
//! - Key events are expected to be withheld by the host while one of its
//!   own text inputs has focus.

use bitflags::bitflags;

/// Canonical input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A pointer sample. Press and release are distinguished by the
    /// button state edge between consecutive samples.
    Pointer(PointerEvent),

    /// A keyboard event.
    Key(KeyEvent),
}

/// One pointer sample in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    /// X coordinate in canvas units.
    pub x: i32,

    /// Y coordinate in canvas units.
    pub y: i32,

    /// Whether the primary button is held during this sample.
    pub primary_down: bool,
}

impl PointerEvent {
    /// Create a new pointer sample.
    #[must_use]
    pub const fn new(x: i32, y: i32, primary_down: bool) -> Self {
        Self { x, y, primary_down }
    }

    /// A sample with the primary button held.
    #[must_use]
    pub const fn pressed(x: i32, y: i32) -> Self {
        Self::new(x, y, true)
    }

    /// A sample with no button held.
    #[must_use]
    pub const fn released(x: i32, y: i32) -> Self {
        Self::new(x, y, false)
    }
}

/// A keyboard event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that was pressed.
    pub key: EditorKey,

    /// Modifier keys held during the event.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event with no modifiers.
    #[must_use]
    pub const fn new(key: EditorKey) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    /// Create a key event with modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Check if Shift is held.
    #[must_use]
    pub const fn shift(&self) -> bool {
        self.modifiers.contains(Modifiers::SHIFT)
    }
}

/// The keys the editor reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKey {
    /// Up arrow key.
    Up,

    /// Down arrow key.
    Down,

    /// Left arrow key.
    Left,

    /// Right arrow key.
    Right,

    /// Escape key.
    Escape,
}

bitflags! {
    /// Modifier keys that can be held during a key event.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// No modifiers.
        const NONE  = 0b0000;
        /// Shift key.
        const SHIFT = 0b0001;
        /// Alt/Option key.
        const ALT   = 0b0010;
        /// Control key.
        const CTRL  = 0b0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::NONE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_constructors() {
        let pressed = PointerEvent::pressed(10, 20);
        assert!(pressed.primary_down);
        assert_eq!((pressed.x, pressed.y), (10, 20));

        let released = PointerEvent::released(10, 20);
        assert!(!released.primary_down);
    }

    #[test]
    fn key_event_shift() {
        let plain = KeyEvent::new(EditorKey::Right);
        assert!(!plain.shift());

        let shifted = KeyEvent::new(EditorKey::Right).with_modifiers(Modifiers::SHIFT);
        assert!(shifted.shift());
    }

    #[test]
    fn key_event_combined_modifiers() {
        let event = KeyEvent::new(EditorKey::Up).with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert!(event.shift());
        assert!(event.modifiers.contains(Modifiers::CTRL));
        assert!(!event.modifiers.contains(Modifiers::ALT));
    }

    #[test]
    fn modifiers_default() {
        assert_eq!(Modifiers::default(), Modifiers::NONE);
    }

    #[test]
    fn event_is_clone_and_eq() {
        let event = InputEvent::Key(KeyEvent::new(EditorKey::Escape));
        assert_eq!(event, event.clone());
    }
}
