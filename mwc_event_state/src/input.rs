// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer and keyboard input vocabulary.
//!
//! These types mirror the parts of DOM `PointerEvent` / `KeyboardEvent` the
//! controllers actually look at, and nothing else. Hosts translate their native
//! events into them at the boundary.

use core::num::NonZeroU64;

use kurbo::Point;

/// Pointer identifier for tracking a press across events.
pub type PointerId = NonZeroU64;

/// Mouse button identifier, using DOM numbering (`0` is the primary button).
pub type Button = u8;

/// The primary (usually left) mouse button.
pub const PRIMARY_BUTTON: Button = 0;

const DEFAULT_POINTER_ID: PointerId = NonZeroU64::MIN;

/// Kind of device that produced a pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PointerKind {
    /// A mouse or trackpad.
    Mouse,
    /// A stylus.
    Pen,
    /// A finger on a touch surface.
    Touch,
}

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was produced.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt / Option key.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows key.
        const META    = 0b0000_1000;
    }
}

/// A pointer event as seen by interaction controllers.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Identifier of the pointer that produced this event.
    pub pointer_id: PointerId,
    /// Device kind.
    pub kind: PointerKind,
    /// Button involved in the event (only meaningful for mice).
    pub button: Button,
    /// Whether this is the primary pointer of its kind.
    pub is_primary: bool,
    /// Position in the same coordinate space as the host's bounding rect.
    pub position: Point,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Event timestamp in milliseconds.
    pub time: u64,
}

impl PointerEvent {
    /// A primary-button mouse event at `position`.
    pub fn mouse(position: Point, time: u64) -> Self {
        Self::new(PointerKind::Mouse, position, time)
    }

    /// A primary touch event at `position`.
    pub fn touch(position: Point, time: u64) -> Self {
        Self::new(PointerKind::Touch, position, time)
    }

    /// A primary pen event at `position`.
    pub fn pen(position: Point, time: u64) -> Self {
        Self::new(PointerKind::Pen, position, time)
    }

    fn new(kind: PointerKind, position: Point, time: u64) -> Self {
        Self {
            pointer_id: DEFAULT_POINTER_ID,
            kind,
            button: PRIMARY_BUTTON,
            is_primary: true,
            position,
            modifiers: Modifiers::empty(),
            time,
        }
    }

    /// Returns this event with a different pointer id.
    #[must_use]
    pub fn with_pointer_id(mut self, pointer_id: PointerId) -> Self {
        self.pointer_id = pointer_id;
        self
    }

    /// Returns this event with a different button.
    #[must_use]
    pub fn with_button(mut self, button: Button) -> Self {
        self.button = button;
        self
    }

    /// Returns this event with the given modifiers held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns this event marked as coming from a non-primary pointer.
    #[must_use]
    pub fn non_primary(mut self) -> Self {
        self.is_primary = false;
        self
    }

    /// Whether the event came from a touch surface.
    pub fn is_touch(&self) -> bool {
        self.kind == PointerKind::Touch
    }
}

/// Logical key, after keyboard layout has been applied.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// The space bar.
    Space,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// A key that produces a printable character.
    Character(char),
    /// Any other key (modifiers, function keys, ...).
    Other,
}

impl Key {
    /// Parse a DOM `KeyboardEvent.key` value.
    ///
    /// Single-character values become [`Key::Character`], except `" "` which is
    /// [`Key::Space`]. Unknown named keys become [`Key::Other`].
    pub fn from_dom_key(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            "Tab" => Self::Tab,
            "Backspace" => Self::Backspace,
            "Delete" | "Del" => Self::Delete,
            "ArrowUp" | "Up" => Self::ArrowUp,
            "ArrowDown" | "Down" => Self::ArrowDown,
            "ArrowLeft" | "Left" => Self::ArrowLeft,
            "ArrowRight" | "Right" => Self::ArrowRight,
            "Home" => Self::Home,
            "End" => Self::End,
            "PageUp" => Self::PageUp,
            "PageDown" => Self::PageDown,
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Self::Character(c),
                    _ => Self::Other,
                }
            }
        }
    }

    /// Whether this is one of the four arrow keys.
    pub fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::ArrowUp | Self::ArrowDown | Self::ArrowLeft | Self::ArrowRight
        )
    }
}

/// A keydown as seen by interaction controllers.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// Whether an earlier handler already prevented the default action.
    pub default_prevented: bool,
}

impl KeyEvent {
    /// A keydown with no modifiers.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
            default_prevented: false,
        }
    }

    /// A keydown for a printable character.
    pub fn character(c: char) -> Self {
        Self::new(Key::Character(c))
    }

    /// Returns this event with the given modifiers held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Returns this event marked as already default-prevented.
    #[must_use]
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }

    /// Whether a shortcut modifier (Control, Alt or Meta) is held.
    pub fn has_shortcut_modifier(&self) -> bool {
        self.modifiers
            .intersects(Modifiers::CONTROL | Modifiers::ALT | Modifiers::META)
    }
}

/// Inline text direction of a host element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextDirection {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}

impl TextDirection {
    /// The horizontal arrow that moves toward the inline end.
    pub fn inline_end_key(self) -> Key {
        match self {
            Self::Ltr => Key::ArrowRight,
            Self::Rtl => Key::ArrowLeft,
        }
    }

    /// The horizontal arrow that moves toward the inline start.
    pub fn inline_start_key(self) -> Key {
        match self {
            Self::Ltr => Key::ArrowLeft,
            Self::Rtl => Key::ArrowRight,
        }
    }

    /// Whether this is right-to-left.
    pub fn is_rtl(self) -> bool {
        self == Self::Rtl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_keys_parse() {
        assert_eq!(Key::from_dom_key("Enter"), Key::Enter);
        assert_eq!(Key::from_dom_key(" "), Key::Space);
        assert_eq!(Key::from_dom_key("o"), Key::Character('o'));
        assert_eq!(Key::from_dom_key("Shift"), Key::Other);
        assert_eq!(Key::from_dom_key(""), Key::Other);
    }

    #[test]
    fn direction_mirrors_horizontal_arrows() {
        assert_eq!(TextDirection::Ltr.inline_end_key(), Key::ArrowRight);
        assert_eq!(TextDirection::Rtl.inline_end_key(), Key::ArrowLeft);
        assert_eq!(TextDirection::Rtl.inline_start_key(), Key::ArrowRight);
    }

    #[test]
    fn shortcut_modifiers_exclude_shift() {
        let shifted = KeyEvent::character('A').with_modifiers(Modifiers::SHIFT);
        assert!(!shifted.has_shortcut_modifier());
        let chord = KeyEvent::character('a').with_modifiers(Modifiers::CONTROL);
        assert!(chord.has_shortcut_modifier());
    }
}
