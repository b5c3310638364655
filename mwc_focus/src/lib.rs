// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Focus: list navigation primitives.
//!
//! This crate models keyboard navigation over an ordered list of items using the
//! *roving tabindex* pattern:
//!
//! - Every item implements [`ListItem`]: it can be disabled, it has a tab index,
//!   and it can take focus.
//! - At most one item is *active*: it holds tab index `0` and is the one the Tab
//!   key lands on. All others hold `-1`.
//! - Activation and focus happen together ([`activate_item`]). Deactivation only
//!   clears the tab index; it never touches visual selection.
//!
//! The free functions are pure apart from the tab-index and focus calls they make,
//! and all of them tolerate empty lists and out-of-range indices by returning
//! `None`. [`ListController`] maps keys onto them.
//!
//! ## Minimal example
//!
//! ```rust
//! use mwc_focus::{ListItem, activate_next_item, active_item, is_item_not_disabled};
//!
//! struct Item { disabled: bool, tab_index: i32 }
//!
//! impl ListItem for Item {
//!     fn is_disabled(&self) -> bool { self.disabled }
//!     fn tab_index(&self) -> i32 { self.tab_index }
//!     fn set_tab_index(&mut self, tab_index: i32) { self.tab_index = tab_index; }
//!     fn focus(&mut self) {}
//! }
//!
//! let mut items = vec![
//!     Item { disabled: false, tab_index: 0 },
//!     Item { disabled: true, tab_index: -1 },
//!     Item { disabled: false, tab_index: -1 },
//! ];
//!
//! let active = active_item(&items, is_item_not_disabled);
//! assert_eq!(active, Some(0));
//! // The disabled item is skipped.
//! assert_eq!(activate_next_item(&mut items, active, is_item_not_disabled, true), Some(2));
//! assert_eq!(items[0].tab_index, -1);
//! assert_eq!(items[2].tab_index, 0);
//! ```
//!
//! This crate is `no_std`.

#![no_std]

mod list;

pub use list::{ListController, ListKeyOutcome, ListOrientation};

/// An entry in a navigable list.
pub trait ListItem {
    /// Whether the item is disabled.
    fn is_disabled(&self) -> bool;
    /// Current tab index; `0` marks the active item.
    fn tab_index(&self) -> i32;
    /// Set the tab index.
    fn set_tab_index(&mut self, tab_index: i32);
    /// Move keyboard focus to the item.
    fn focus(&mut self);
}

/// Default activatable predicate: the item is not disabled.
pub fn is_item_not_disabled<T: ListItem>(item: &T) -> bool {
    !item.is_disabled()
}

/// Index of the next activatable item after `index`.
///
/// Scans forward, skipping items for which `is_activatable` is false. With
/// `wrap`, the scan continues from the start of the list; without it, a scan that
/// would cross the end returns `None`. When no other item qualifies, `index`
/// itself is returned, even if it is not activatable.
///
/// Returns `None` for an empty list or an out-of-range `index`.
pub fn next_item<T>(
    items: &[T],
    index: usize,
    is_activatable: impl Fn(&T) -> bool,
    wrap: bool,
) -> Option<usize> {
    let len = items.len();
    if index >= len {
        return None;
    }
    for step in 1..len {
        let next = (index + step) % len;
        if next < index && !wrap {
            return None;
        }
        if is_activatable(&items[next]) {
            return Some(next);
        }
    }
    Some(index)
}

/// Index of the previous activatable item before `index`.
///
/// Mirror image of [`next_item`].
pub fn prev_item<T>(
    items: &[T],
    index: usize,
    is_activatable: impl Fn(&T) -> bool,
    wrap: bool,
) -> Option<usize> {
    let len = items.len();
    if index >= len {
        return None;
    }
    for step in 1..len {
        let prev = (index + len - step) % len;
        if prev > index && !wrap {
            return None;
        }
        if is_activatable(&items[prev]) {
            return Some(prev);
        }
    }
    Some(index)
}

/// Make `items[index]` the active item: tab index `0` and focus.
///
/// Any other item holding tab index `0` is demoted to `-1` so at most one item is
/// tabbable. Returns `None` if `index` is out of range.
pub fn activate_item<T: ListItem>(items: &mut [T], index: usize) -> Option<usize> {
    if index >= items.len() {
        return None;
    }
    for (i, item) in items.iter_mut().enumerate() {
        if i != index && item.tab_index() == 0 {
            item.set_tab_index(-1);
        }
    }
    let item = &mut items[index];
    item.set_tab_index(0);
    item.focus();
    Some(index)
}

/// Activate the first activatable item.
pub fn activate_first_item<T: ListItem>(
    items: &mut [T],
    is_activatable: impl Fn(&T) -> bool,
) -> Option<usize> {
    let index = items.iter().position(is_activatable)?;
    activate_item(items, index)
}

/// Activate the last activatable item.
pub fn activate_last_item<T: ListItem>(
    items: &mut [T],
    is_activatable: impl Fn(&T) -> bool,
) -> Option<usize> {
    let index = items.iter().rposition(is_activatable)?;
    activate_item(items, index)
}

/// Index of the activatable item holding tab index `0`.
pub fn active_item<T: ListItem>(items: &[T], is_activatable: impl Fn(&T) -> bool) -> Option<usize> {
    items
        .iter()
        .position(|item| item.tab_index() == 0 && is_activatable(item))
}

/// Demote the active item to tab index `-1`, returning its index.
pub fn deactivate_active_item<T: ListItem>(
    items: &mut [T],
    is_activatable: impl Fn(&T) -> bool,
) -> Option<usize> {
    let index = active_item(items, is_activatable)?;
    items[index].set_tab_index(-1);
    Some(index)
}

/// Activate the item after `active`, or the first item if nothing is active.
pub fn activate_next_item<T: ListItem>(
    items: &mut [T],
    active: Option<usize>,
    is_activatable: impl Fn(&T) -> bool,
    wrap: bool,
) -> Option<usize> {
    match active {
        Some(index) => {
            let next = next_item(items, index, &is_activatable, wrap)?;
            activate_item(items, next)
        }
        None => activate_first_item(items, is_activatable),
    }
}

/// Activate the item before `active`, or the last item if nothing is active.
pub fn activate_previous_item<T: ListItem>(
    items: &mut [T],
    active: Option<usize>,
    is_activatable: impl Fn(&T) -> bool,
    wrap: bool,
) -> Option<usize> {
    match active {
        Some(index) => {
            let prev = prev_item(items, index, &is_activatable, wrap)?;
            activate_item(items, prev)
        }
        None => activate_last_item(items, is_activatable),
    }
}
