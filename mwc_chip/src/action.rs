// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One clickable region of a chip.

use mwc_event_state::{Key, KeyEvent};
use tracing::trace;

/// Which part of a chip an action is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ActionType {
    /// The chip body.
    #[default]
    Primary,
    /// The trailing icon button, usually "remove".
    Trailing,
}

/// What caused an interaction.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InteractionTrigger {
    /// Unknown or synthesized.
    #[default]
    Unspecified,
    /// A pointer click.
    Click,
    /// The Backspace key.
    BackspaceKey,
    /// The Delete key.
    DeleteKey,
    /// The space bar.
    SpacebarKey,
    /// The Enter key.
    EnterKey,
}

impl InteractionTrigger {
    fn from_key(key: Key) -> Self {
        match key {
            Key::Enter => Self::EnterKey,
            Key::Space => Self::SpacebarKey,
            Key::Backspace => Self::BackspaceKey,
            Key::Delete => Self::DeleteKey,
            _ => Self::Unspecified,
        }
    }

    /// Whether the trigger is one of the removal keys.
    pub fn is_removal_key(self) -> bool {
        matches!(self, Self::BackspaceKey | Self::DeleteKey)
    }
}

/// How an action takes part in keyboard focus.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FocusBehavior {
    /// In the tab order.
    Focusable,
    /// In the tab order and focused now.
    FocusableAndFocused,
    /// Out of the tab order.
    #[default]
    NotFocusable,
}

/// Attributes an action reads and writes on its element.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ChipAttribute {
    /// Native `disabled`.
    Disabled,
    /// `aria-disabled`.
    AriaDisabled,
    /// `aria-selected`.
    AriaSelected,
    /// `aria-hidden`.
    AriaHidden,
    /// `tabindex`.
    TabIndex,
}

impl ChipAttribute {
    /// The DOM attribute name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Disabled => "disabled",
            Self::AriaDisabled => "aria-disabled",
            Self::AriaSelected => "aria-selected",
            Self::AriaHidden => "aria-hidden",
            Self::TabIndex => "tabindex",
        }
    }
}

/// Events an action emits.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ChipActionEvent {
    /// The action was activated.
    Interaction {
        /// Which action.
        source: ActionType,
        /// What activated it.
        trigger: InteractionTrigger,
    },
    /// A navigation key was pressed on the action.
    Navigation {
        /// Which action.
        source: ActionType,
        /// The key, left to the chip set to interpret.
        key: Key,
    },
}

/// Host side of a [`ChipAction`].
pub trait ChipActionAdapter {
    /// Current value of `attribute`, `None` when absent.
    fn attribute(&self, _attribute: ChipAttribute) -> Option<&str> {
        None
    }

    /// Set `attribute` to `value`.
    fn set_attribute(&mut self, _attribute: ChipAttribute, _value: &str) {}

    /// Remove `attribute`.
    fn remove_attribute(&mut self, _attribute: ChipAttribute) {}

    /// Give the element keyboard focus.
    fn focus(&mut self) {}

    /// Deliver an action event.
    fn emit(&mut self, _event: ChipActionEvent) {}
}

/// An adapter that ignores every call.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopChipActionAdapter;

impl ChipActionAdapter for NoopChipActionAdapter {}

/// Explicit state of an action, written through to attributes.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChipActionState {
    /// Whether the action is disabled.
    pub disabled: bool,
    /// Whether the action is selected. Only meaningful for selectable actions.
    pub selected: bool,
    /// Whether the action is hidden from assistive technology.
    pub hidden: bool,
    /// Last focus behavior applied.
    pub focus: FocusBehavior,
}

/// Result of [`ChipAction::handle_keydown`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct ChipKeyOutcome {
    /// The caller should prevent the key's default action.
    pub prevent_default: bool,
    /// The event the key produced.
    pub event: Option<ChipActionEvent>,
}

/// State and keyboard dispatch for one chip action.
#[derive(Debug)]
pub struct ChipAction<A> {
    adapter: A,
    action_type: ActionType,
    selectable: bool,
    removable: bool,
    state: ChipActionState,
}

impl<A: ChipActionAdapter> ChipAction<A> {
    /// A new action. Trailing actions are removable.
    pub fn new(adapter: A, action_type: ActionType) -> Self {
        Self {
            adapter,
            action_type,
            selectable: false,
            removable: action_type == ActionType::Trailing,
            state: ChipActionState::default(),
        }
    }

    /// Make the action selectable, as in filter chips.
    #[must_use]
    pub fn selectable(mut self) -> Self {
        self.selectable = true;
        self
    }

    /// Set whether Backspace and Delete activate the action.
    #[must_use]
    pub fn removable(mut self, removable: bool) -> Self {
        self.removable = removable;
        self
    }

    /// The adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Which part of the chip this is.
    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    /// Whether the action carries a selected state.
    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Whether Backspace and Delete activate the action.
    pub fn is_removable(&self) -> bool {
        self.removable
    }

    /// Current state.
    pub fn state(&self) -> ChipActionState {
        self.state
    }

    /// Whether the action is disabled.
    pub fn is_disabled(&self) -> bool {
        self.state.disabled
    }

    /// Whether the action is selected.
    pub fn is_selected(&self) -> bool {
        self.selectable && self.state.selected
    }

    /// Whether the action can take keyboard focus.
    pub fn is_focusable(&self) -> bool {
        !self.state.disabled && !self.state.hidden
    }

    /// Re-read state from the element's attributes.
    ///
    /// Use this once when binding to markup that already carries state. The
    /// action is disabled if `aria-disabled` is `"true"` or `disabled` is present.
    pub fn sync_from_adapter(&mut self) {
        let is_true = |value: Option<&str>| value == Some("true");
        let adapter = &self.adapter;
        self.state = ChipActionState {
            disabled: is_true(adapter.attribute(ChipAttribute::AriaDisabled))
                || adapter.attribute(ChipAttribute::Disabled).is_some(),
            selected: self.selectable && is_true(adapter.attribute(ChipAttribute::AriaSelected)),
            hidden: is_true(adapter.attribute(ChipAttribute::AriaHidden)),
            focus: match adapter.attribute(ChipAttribute::TabIndex) {
                Some("0") => FocusBehavior::Focusable,
                _ => FocusBehavior::NotFocusable,
            },
        };
        trace!(action = ?self.action_type, state = ?self.state, "chip action synced");
    }

    /// Disable or enable the action.
    ///
    /// Selectable actions use `aria-disabled` so they stay perceivable inside
    /// listbox semantics; others use the native `disabled` attribute.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.state.disabled = disabled;
        if self.selectable {
            let value = if disabled { "true" } else { "false" };
            self.adapter.set_attribute(ChipAttribute::AriaDisabled, value);
        } else if disabled {
            self.adapter.set_attribute(ChipAttribute::Disabled, "");
        } else {
            self.adapter.remove_attribute(ChipAttribute::Disabled);
        }
    }

    /// Select or deselect the action. Ignored for non-selectable actions.
    pub fn set_selected(&mut self, selected: bool) {
        if !self.selectable {
            return;
        }
        self.state.selected = selected;
        let value = if selected { "true" } else { "false" };
        self.adapter.set_attribute(ChipAttribute::AriaSelected, value);
    }

    /// Hide the action from assistive technology, or show it again.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.state.hidden = hidden;
        if hidden {
            self.adapter.set_attribute(ChipAttribute::AriaHidden, "true");
        } else {
            self.adapter.remove_attribute(ChipAttribute::AriaHidden);
        }
    }

    /// Apply `behavior`. Returns `false`, changing nothing, if the action is not
    /// focusable.
    pub fn set_focus(&mut self, behavior: FocusBehavior) -> bool {
        if !self.is_focusable() {
            return false;
        }
        self.state.focus = behavior;
        match behavior {
            FocusBehavior::Focusable => {
                self.adapter.set_attribute(ChipAttribute::TabIndex, "0");
            }
            FocusBehavior::FocusableAndFocused => {
                self.adapter.set_attribute(ChipAttribute::TabIndex, "0");
                self.adapter.focus();
            }
            FocusBehavior::NotFocusable => {
                self.adapter.set_attribute(ChipAttribute::TabIndex, "-1");
            }
        }
        true
    }

    /// The action was clicked.
    pub fn handle_click(&mut self) -> Option<ChipActionEvent> {
        if self.state.disabled {
            return None;
        }
        Some(self.emit_interaction(InteractionTrigger::Click))
    }

    /// A key was pressed on the action.
    ///
    /// Enter and Space activate it; Backspace and Delete activate it when it is
    /// removable. Arrows, Home and End become navigation events. A disabled
    /// action still navigates but never activates.
    pub fn handle_keydown(&mut self, event: &KeyEvent) -> ChipKeyOutcome {
        if event.default_prevented {
            return ChipKeyOutcome::default();
        }
        let key = event.key;
        let activates = match key {
            Key::Enter | Key::Space => true,
            Key::Backspace | Key::Delete => self.removable,
            _ => false,
        };
        if activates {
            if self.state.disabled {
                return ChipKeyOutcome::default();
            }
            let event = self.emit_interaction(InteractionTrigger::from_key(key));
            return ChipKeyOutcome {
                prevent_default: true,
                event: Some(event),
            };
        }
        if key.is_arrow() || matches!(key, Key::Home | Key::End) {
            let event = ChipActionEvent::Navigation {
                source: self.action_type,
                key,
            };
            self.adapter.emit(event);
            return ChipKeyOutcome {
                prevent_default: true,
                event: Some(event),
            };
        }
        ChipKeyOutcome::default()
    }

    fn emit_interaction(&mut self, trigger: InteractionTrigger) -> ChipActionEvent {
        let event = ChipActionEvent::Interaction {
            source: self.action_type,
            trigger,
        };
        trace!(?event, "chip action interaction");
        self.adapter.emit(event);
        event
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use alloc::string::{String, ToString};
    use alloc::vec::Vec;

    use super::*;

    #[derive(Debug, Default)]
    pub(crate) struct RecordingAdapter {
        pub(crate) attributes: Vec<(ChipAttribute, String)>,
        pub(crate) events: Vec<ChipActionEvent>,
        pub(crate) focus_count: u32,
    }

    impl RecordingAdapter {
        pub(crate) fn with(attributes: &[(ChipAttribute, &str)]) -> Self {
            Self {
                attributes: attributes
                    .iter()
                    .map(|(attribute, value)| (*attribute, value.to_string()))
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl ChipActionAdapter for RecordingAdapter {
        fn attribute(&self, attribute: ChipAttribute) -> Option<&str> {
            self.attributes
                .iter()
                .find(|(name, _)| *name == attribute)
                .map(|(_, value)| value.as_str())
        }

        fn set_attribute(&mut self, attribute: ChipAttribute, value: &str) {
            self.remove_attribute(attribute);
            self.attributes.push((attribute, value.to_string()));
        }

        fn remove_attribute(&mut self, attribute: ChipAttribute) {
            self.attributes.retain(|(name, _)| *name != attribute);
        }

        fn focus(&mut self) {
            self.focus_count += 1;
        }

        fn emit(&mut self, event: ChipActionEvent) {
            self.events.push(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::test_util::RecordingAdapter;
    use super::*;

    fn primary() -> ChipAction<RecordingAdapter> {
        ChipAction::new(RecordingAdapter::default(), ActionType::Primary)
    }

    #[test]
    fn disabled_read_back_accepts_either_attribute() {
        let mut aria = ChipAction::new(
            RecordingAdapter::with(&[(ChipAttribute::AriaDisabled, "true")]),
            ActionType::Primary,
        );
        aria.sync_from_adapter();
        assert!(aria.is_disabled());

        let mut native = ChipAction::new(
            RecordingAdapter::with(&[(ChipAttribute::Disabled, "")]),
            ActionType::Primary,
        );
        native.sync_from_adapter();
        assert!(native.is_disabled());

        let mut enabled = ChipAction::new(
            RecordingAdapter::with(&[(ChipAttribute::AriaDisabled, "false")]),
            ActionType::Primary,
        );
        enabled.sync_from_adapter();
        assert!(!enabled.is_disabled());
    }

    #[test]
    fn selectable_actions_disable_through_aria() {
        let mut filter = primary().selectable();
        filter.set_disabled(true);
        assert_eq!(filter.adapter().attribute(ChipAttribute::AriaDisabled), Some("true"));
        assert_eq!(filter.adapter().attribute(ChipAttribute::Disabled), None);

        let mut plain = primary();
        plain.set_disabled(true);
        assert_eq!(plain.adapter().attribute(ChipAttribute::Disabled), Some(""));
        plain.set_disabled(false);
        assert_eq!(plain.adapter().attribute(ChipAttribute::Disabled), None);
        assert!(!plain.is_disabled());
    }

    #[test]
    fn selection_only_applies_to_selectable_actions() {
        let mut plain = primary();
        plain.set_selected(true);
        assert!(!plain.is_selected());
        assert_eq!(plain.adapter().attribute(ChipAttribute::AriaSelected), None);

        let mut filter = primary().selectable();
        filter.set_selected(true);
        assert!(filter.is_selected());
        assert_eq!(filter.adapter().attribute(ChipAttribute::AriaSelected), Some("true"));
    }

    #[test]
    fn focus_behaviors_write_tabindex() {
        let mut action = primary();
        assert!(action.set_focus(FocusBehavior::FocusableAndFocused));
        assert_eq!(action.adapter().attribute(ChipAttribute::TabIndex), Some("0"));
        assert_eq!(action.adapter().focus_count, 1);

        action.set_focus(FocusBehavior::NotFocusable);
        assert_eq!(action.adapter().attribute(ChipAttribute::TabIndex), Some("-1"));

        action.set_hidden(true);
        assert!(!action.set_focus(FocusBehavior::Focusable));
        assert_eq!(action.adapter().attribute(ChipAttribute::TabIndex), Some("-1"));

        action.set_hidden(false);
        action.set_disabled(true);
        assert!(!action.is_focusable());
    }

    #[test]
    fn activation_keys_and_removal_keys() {
        let mut action = primary();
        let enter = action.handle_keydown(&KeyEvent::new(Key::Enter));
        assert!(enter.prevent_default);
        assert_eq!(
            enter.event,
            Some(ChipActionEvent::Interaction {
                source: ActionType::Primary,
                trigger: InteractionTrigger::EnterKey,
            })
        );
        // The primary action is not removable.
        assert_eq!(
            action.handle_keydown(&KeyEvent::new(Key::Backspace)),
            ChipKeyOutcome::default()
        );

        let mut trailing = ChipAction::new(RecordingAdapter::default(), ActionType::Trailing);
        let delete = trailing.handle_keydown(&KeyEvent::new(Key::Delete));
        assert_eq!(
            delete.event,
            Some(ChipActionEvent::Interaction {
                source: ActionType::Trailing,
                trigger: InteractionTrigger::DeleteKey,
            })
        );
        assert_eq!(trailing.adapter().events.len(), 1);
    }

    #[test]
    fn navigation_keys_carry_the_key() {
        let mut action = primary();
        for key in [Key::ArrowLeft, Key::ArrowDown, Key::Home, Key::End] {
            let outcome = action.handle_keydown(&KeyEvent::new(key));
            assert!(outcome.prevent_default);
            assert_eq!(
                outcome.event,
                Some(ChipActionEvent::Navigation {
                    source: ActionType::Primary,
                    key,
                })
            );
        }
        let other = action.handle_keydown(&KeyEvent::character('x'));
        assert_eq!(other, ChipKeyOutcome::default());
    }

    #[test]
    fn disabled_actions_ignore_activation() {
        let mut action = primary();
        action.set_disabled(true);
        assert_eq!(action.handle_click(), None);
        assert_eq!(action.handle_keydown(&KeyEvent::new(Key::Space)).event, None);
        assert!(action.handle_keydown(&KeyEvent::new(Key::ArrowRight)).event.is_some());

        action.set_disabled(false);
        assert_eq!(
            action.handle_click(),
            Some(ChipActionEvent::Interaction {
                source: ActionType::Primary,
                trigger: InteractionTrigger::Click,
            })
        );
    }

    #[test]
    fn noop_adapter_is_inert() {
        let mut action = ChipAction::new(NoopChipActionAdapter, ActionType::Trailing);
        action.sync_from_adapter();
        assert!(!action.is_disabled());
        assert!(action.handle_click().is_some());
    }
}
