// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A chip: a primary action, an optional trailing action, and the enter and
//! exit animations that bracket its life in a chip set.

use alloc::string::String;

use mwc_event_state::{Key, KeyEvent, TextDirection};
use tracing::{debug, trace};

use crate::action::{
    ActionType, ChipAction, ChipActionAdapter, ChipActionEvent, ChipKeyOutcome, FocusBehavior,
    InteractionTrigger,
};

/// A chip animation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ChipAnimation {
    /// The chip is being added.
    Enter,
    /// The chip is being removed.
    Exit,
}

/// Events a chip emits for its chip set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChipEvent {
    /// An action was activated.
    Interaction {
        /// Which action.
        source: ActionType,
        /// What activated it.
        trigger: InteractionTrigger,
        /// Whether the primary action is selectable.
        selectable: bool,
        /// Whether the primary action is selected.
        selected: bool,
        /// Whether the chip set should remove the chip.
        should_remove: bool,
    },
    /// A navigation key the chip could not handle itself.
    Navigation {
        /// Which action had focus.
        source: ActionType,
        /// The key.
        key: Key,
        /// Direction the chip is laid out in.
        direction: TextDirection,
    },
    /// An animation ended.
    Animation {
        /// Which animation.
        animation: ChipAnimation,
        /// Text to announce to assistive technology, if any.
        announcement: Option<String>,
    },
}

/// Host side of a [`Chip`].
pub trait ChipAdapter {
    /// Text direction of the chip.
    fn text_direction(&self) -> TextDirection {
        TextDirection::Ltr
    }

    /// Start or stop showing `animation`.
    fn set_animating(&mut self, _animation: ChipAnimation, _running: bool) {}

    /// Deliver a chip event.
    fn emit(&mut self, _event: ChipEvent) {}
}

/// An adapter that ignores every call.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopChipAdapter;

impl ChipAdapter for NoopChipAdapter {}

/// Composes a chip's actions and forwards what they cannot handle.
#[derive(Debug)]
pub struct Chip<A, X> {
    adapter: A,
    primary: ChipAction<X>,
    trailing: Option<ChipAction<X>>,
    animation: Option<ChipAnimation>,
    addition_announcement: Option<String>,
    removal_announcement: Option<String>,
}

impl<A: ChipAdapter, X: ChipActionAdapter> Chip<A, X> {
    /// A chip with only a primary action.
    pub fn new(adapter: A, primary: ChipAction<X>) -> Self {
        Self {
            adapter,
            primary,
            trailing: None,
            animation: None,
            addition_announcement: None,
            removal_announcement: None,
        }
    }

    /// Add a trailing action.
    #[must_use]
    pub fn with_trailing(mut self, trailing: ChipAction<X>) -> Self {
        self.trailing = Some(trailing);
        self
    }

    /// Set the texts announced when the enter and exit animations end.
    #[must_use]
    pub fn with_announcements(mut self, added: Option<String>, removed: Option<String>) -> Self {
        self.addition_announcement = added;
        self.removal_announcement = removed;
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

    /// The action of type `action`, if the chip has one.
    pub fn action(&self, action: ActionType) -> Option<&ChipAction<X>> {
        match action {
            ActionType::Primary => Some(&self.primary),
            ActionType::Trailing => self.trailing.as_ref(),
        }
    }

    /// The action of type `action`, mutably.
    pub fn action_mut(&mut self, action: ActionType) -> Option<&mut ChipAction<X>> {
        match action {
            ActionType::Primary => Some(&mut self.primary),
            ActionType::Trailing => self.trailing.as_mut(),
        }
    }

    /// Whether every action is disabled.
    pub fn is_disabled(&self) -> bool {
        self.primary.is_disabled() && self.trailing.as_ref().is_none_or(ChipAction::is_disabled)
    }

    /// Disable or enable every action.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.primary.set_disabled(disabled);
        if let Some(trailing) = &mut self.trailing {
            trailing.set_disabled(disabled);
        }
    }

    /// Whether the primary action is selected.
    pub fn is_selected(&self) -> bool {
        self.primary.is_selected()
    }

    /// Select or deselect the primary action.
    pub fn set_selected(&mut self, selected: bool) {
        self.primary.set_selected(selected);
    }

    /// Whether `action` exists and can take focus.
    pub fn is_action_focusable(&self, action: ActionType) -> bool {
        self.action(action).is_some_and(ChipAction::is_focusable)
    }

    /// Apply `behavior` to `action`. Returns `false` if nothing changed.
    pub fn set_action_focus(&mut self, action: ActionType, behavior: FocusBehavior) -> bool {
        self.action_mut(action)
            .is_some_and(|action| action.set_focus(behavior))
    }

    /// Take every action out of the tab order.
    pub fn remove_focus(&mut self) {
        self.primary.set_focus(FocusBehavior::NotFocusable);
        if let Some(trailing) = &mut self.trailing {
            trailing.set_focus(FocusBehavior::NotFocusable);
        }
    }

    /// `action` was clicked.
    pub fn handle_click(&mut self, action: ActionType) {
        let event = self.action_mut(action).and_then(ChipAction::handle_click);
        if let Some(event) = event {
            self.handle_action_event(event);
        }
    }

    /// A key was pressed on `action`.
    pub fn handle_keydown(&mut self, action: ActionType, event: &KeyEvent) -> ChipKeyOutcome {
        let Some(target) = self.action_mut(action) else {
            return ChipKeyOutcome::default();
        };
        let outcome = target.handle_keydown(event);
        if let Some(event) = outcome.event {
            self.handle_action_event(event);
        }
        outcome
    }

    fn handle_action_event(&mut self, event: ChipActionEvent) {
        match event {
            ChipActionEvent::Interaction { source, trigger } => {
                let should_remove = source == ActionType::Trailing || trigger.is_removal_key();
                let event = ChipEvent::Interaction {
                    source,
                    trigger,
                    selectable: self.primary.is_selectable(),
                    selected: self.primary.is_selected(),
                    should_remove,
                };
                trace!(?event, "chip interaction");
                self.adapter.emit(event);
            }
            ChipActionEvent::Navigation { source, key } => self.navigate(source, key),
        }
    }

    fn navigate(&mut self, source: ActionType, key: Key) {
        let direction = self.adapter.text_direction();
        let target = match source {
            ActionType::Primary if key == direction.inline_end_key() => ActionType::Trailing,
            ActionType::Trailing if key == direction.inline_start_key() => ActionType::Primary,
            _ => source,
        };
        if target != source && self.is_action_focusable(target) {
            self.set_action_focus(source, FocusBehavior::NotFocusable);
            self.set_action_focus(target, FocusBehavior::FocusableAndFocused);
            trace!(?source, ?target, "chip focus moved between actions");
            return;
        }
        self.adapter.emit(ChipEvent::Navigation {
            source,
            key,
            direction,
        });
    }

    /// The running animation, if any.
    pub fn animation(&self) -> Option<ChipAnimation> {
        self.animation
    }

    /// Start `animation`, replacing any running one.
    pub fn start_animation(&mut self, animation: ChipAnimation) {
        if let Some(running) = self.animation.replace(animation) {
            self.adapter.set_animating(running, false);
        }
        debug!(?animation, "chip animation started");
        self.adapter.set_animating(animation, true);
    }

    /// `animation` ended. Ignored unless it is the running one.
    pub fn animation_finished(&mut self, animation: ChipAnimation) {
        if self.animation != Some(animation) {
            return;
        }
        self.animation = None;
        self.adapter.set_animating(animation, false);
        let announcement = match animation {
            ChipAnimation::Enter => self.addition_announcement.clone(),
            ChipAnimation::Exit => self.removal_announcement.clone(),
        };
        debug!(?animation, "chip animation finished");
        self.adapter.emit(ChipEvent::Animation {
            animation,
            announcement,
        });
    }
}
