// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard dispatch for roving-tabindex lists.

use mwc_event_state::{Key, KeyEvent, TextDirection};
use tracing::trace;

use crate::{
    ListItem, activate_first_item, activate_last_item, activate_next_item,
    activate_previous_item, active_item,
};

/// Axis along which a list lays out its items.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ListOrientation {
    /// Items stack top to bottom; Up/Down move.
    #[default]
    Vertical,
    /// Items flow along the inline axis; Left/Right move, mirrored in RTL.
    Horizontal,
}

/// Result of [`ListController::on_keydown`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ListKeyOutcome {
    /// The key was a navigation key for this list; the caller should prevent
    /// its default action.
    pub handled: bool,
    /// Index of the item that is active after the key.
    pub active: Option<usize>,
}

/// Maps navigation keys onto the list helpers.
///
/// | key | effect |
/// |---|---|
/// | Down (vertical) / inline-end arrow (horizontal) | next item, wrapping |
/// | Up (vertical) / inline-start arrow (horizontal) | previous item, wrapping |
/// | Home | first item |
/// | End | last item |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ListController {
    /// Layout axis.
    pub orientation: ListOrientation,
    /// Text direction, used to mirror horizontal arrows.
    pub direction: TextDirection,
    /// Whether next/previous wrap around the ends.
    pub wrap: bool,
}

impl ListController {
    /// A wrapping vertical list.
    pub fn vertical() -> Self {
        Self {
            orientation: ListOrientation::Vertical,
            direction: TextDirection::Ltr,
            wrap: true,
        }
    }

    /// A wrapping horizontal list laid out in `direction`.
    pub fn horizontal(direction: TextDirection) -> Self {
        Self {
            orientation: ListOrientation::Horizontal,
            direction,
            wrap: true,
        }
    }

    /// Handle a keydown over `items`.
    pub fn on_keydown<T: ListItem>(
        &self,
        event: &KeyEvent,
        items: &mut [T],
        is_activatable: impl Fn(&T) -> bool,
    ) -> ListKeyOutcome {
        if event.default_prevented || event.has_shortcut_modifier() {
            return ListKeyOutcome::default();
        }
        let Some(step) = self.step_for(event.key) else {
            return ListKeyOutcome::default();
        };
        let current = active_item(items, &is_activatable);
        let active = match step {
            Step::Next => activate_next_item(items, current, &is_activatable, self.wrap),
            Step::Previous => activate_previous_item(items, current, &is_activatable, self.wrap),
            Step::First => activate_first_item(items, &is_activatable),
            Step::Last => activate_last_item(items, &is_activatable),
        };
        trace!(?step, ?current, ?active, "list navigation");
        ListKeyOutcome {
            handled: true,
            active: active.or(current),
        }
    }

    fn step_for(&self, key: Key) -> Option<Step> {
        match (self.orientation, key) {
            (_, Key::Home) => Some(Step::First),
            (_, Key::End) => Some(Step::Last),
            (ListOrientation::Vertical, Key::ArrowDown) => Some(Step::Next),
            (ListOrientation::Vertical, Key::ArrowUp) => Some(Step::Previous),
            (ListOrientation::Horizontal, key) if key == self.direction.inline_end_key() => {
                Some(Step::Next)
            }
            (ListOrientation::Horizontal, key) if key == self.direction.inline_start_key() => {
                Some(Step::Previous)
            }
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum Step {
    Next,
    Previous,
    First,
    Last,
}
