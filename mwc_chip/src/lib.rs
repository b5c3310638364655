// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Chip: chip actions and the chip that composes them.
//!
//! A chip has a primary action and, for input chips, a trailing "remove" action.
//! Each [`ChipAction`] keeps its disabled, selected and focus state in an explicit
//! [`ChipActionState`] and writes it through to element attributes; the only
//! attribute read is [`ChipAction::sync_from_adapter`], used when binding to
//! existing markup.
//!
//! Keys map onto two kinds of event:
//!
//! - Enter and Space activate an action. Backspace and Delete activate removable
//!   actions. Activation is reported with an [`InteractionTrigger`].
//! - Arrows, Home and End are navigation. A [`Chip`] first tries to move focus
//!   between its own actions (mirrored in right-to-left layouts) and otherwise
//!   hands the key to its chip set as a [`ChipEvent::Navigation`].
//!
//! ```rust
//! use mwc_chip::{
//!     ActionType, Chip, ChipAction, NoopChipActionAdapter, NoopChipAdapter,
//! };
//! use mwc_event_state::{Key, KeyEvent};
//!
//! let mut chip = Chip::new(
//!     NoopChipAdapter,
//!     ChipAction::new(NoopChipActionAdapter, ActionType::Primary),
//! )
//! .with_trailing(ChipAction::new(NoopChipActionAdapter, ActionType::Trailing));
//!
//! let outcome = chip.handle_keydown(ActionType::Trailing, &KeyEvent::new(Key::Delete));
//! assert!(outcome.prevent_default);
//!
//! chip.set_disabled(true);
//! assert!(chip.is_disabled());
//! assert!(!chip.is_action_focusable(ActionType::Primary));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod action;
mod chip;

pub use action::{
    ActionType, ChipAction, ChipActionAdapter, ChipActionEvent, ChipActionState, ChipAttribute,
    ChipKeyOutcome, FocusBehavior, InteractionTrigger, NoopChipActionAdapter,
};
pub use chip::{Chip, ChipAdapter, ChipAnimation, ChipEvent, NoopChipAdapter};
