// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Selection: single-selection coordination for radio-like controls.
//!
//! Elements that share a `name` form a group in which at most one member is
//! checked. A [`SingleSelectionController`] tracks the members of every group in
//! one scope and settles a group whenever a member's checked state changes:
//!
//! - checking a member unchecks every other member of its group;
//! - the checked member is the only tabbable one, or every member is tabbable
//!   when none is checked;
//! - arrow keys move the selection to the next or previous enabled member in
//!   document order, wrapping around.
//!
//! The controller never owns elements. It holds element keys `K` and reaches the
//! host through [`CheckableHost`], passed to each call.
//!
//! ## Scopes
//!
//! Groups are scoped: by default every element in a document shares one
//! controller, and an element can be narrowed to its own root. Controllers are
//! kept in a [`SelectionRegistry`], created on first access and dropped
//! explicitly.
//!
//! ```rust
//! use core::cmp::Ordering;
//! use mwc_event_state::Scope;
//! use mwc_selection::{CheckableHost, SelectionRegistry};
//!
//! struct Radio { name: &'static str, checked: bool, tabbable: bool }
//! struct Doc { radios: Vec<Radio> }
//!
//! impl CheckableHost<usize> for Doc {
//!     fn name(&self, e: usize) -> Option<&str> { Some(self.radios[e].name) }
//!     fn is_checked(&self, e: usize) -> bool { self.radios[e].checked }
//!     fn set_checked(&mut self, e: usize, checked: bool) { self.radios[e].checked = checked; }
//!     fn set_tabbable(&mut self, e: usize, tabbable: bool) { self.radios[e].tabbable = tabbable; }
//!     fn compare_document_position(&self, a: usize, b: usize) -> Ordering { a.cmp(&b) }
//! }
//!
//! let mut doc = Doc {
//!     radios: (0..3).map(|_| Radio { name: "size", checked: false, tabbable: true }).collect(),
//! };
//! let mut registry: SelectionRegistry<u32, usize> = SelectionRegistry::new();
//! let selection = registry.get_or_default(Scope::Global);
//! for e in 0..3 {
//!     selection.register(&mut doc, e);
//! }
//!
//! doc.radios[1].checked = true;
//! selection.update(&mut doc, 1);
//! doc.radios[2].checked = true;
//! selection.update(&mut doc, 2);
//!
//! assert_eq!(selection.selected("size"), Some(2));
//! assert!(!doc.radios[1].checked);
//! assert!(doc.radios[2].tabbable && !doc.radios[1].tabbable);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::cmp::Ordering;
use core::fmt::Debug;
use core::hash::Hash;

use hashbrown::HashMap;
use mwc_event_state::{Key, KeyEvent, Scope, ScopeRegistry, TextDirection};
use tracing::{debug, trace};

/// Selection controllers keyed by scope.
///
/// `R` identifies a root; `K` identifies an element.
pub type SelectionRegistry<R, K> = ScopeRegistry<Scope<R>, SingleSelectionController<K>>;

/// Host access to checkable elements.
pub trait CheckableHost<K> {
    /// The group name of `element`. Unnamed elements are never grouped.
    fn name(&self, element: K) -> Option<&str>;

    /// Whether `element` is checked.
    fn is_checked(&self, element: K) -> bool;

    /// Set the checked state of `element`.
    fn set_checked(&mut self, element: K, checked: bool);

    /// Whether `element` is disabled. Disabled members are skipped by keyboard
    /// navigation.
    fn is_disabled(&self, _element: K) -> bool {
        false
    }

    /// Make `element` reachable with Tab (tab index `0`) or not (`-1`).
    fn set_tabbable(&mut self, element: K, tabbable: bool);

    /// Order of `a` relative to `b` in the document.
    fn compare_document_position(&self, a: K, b: K) -> Ordering;

    /// Text direction at `element`; mirrors the horizontal arrows.
    fn text_direction(&self, _element: K) -> TextDirection {
        TextDirection::Ltr
    }

    /// Move focus to `element`.
    fn focus(&mut self, _element: K) {}

    /// Run the element's click behavior. Hosts that emit `change` events do so
    /// here.
    fn click(&mut self, element: K) {
        self.set_checked(element, true);
    }
}

#[derive(Clone, Debug)]
struct Group<K> {
    members: Vec<K>,
    ordered: Option<Vec<K>>,
    selected: Option<K>,
}

impl<K: Copy + Eq> Group<K> {
    fn new() -> Self {
        Self {
            members: Vec::new(),
            ordered: None,
            selected: None,
        }
    }

    fn ordered(&mut self, host: &impl CheckableHost<K>) -> &[K] {
        let members = &self.members;
        self.ordered.get_or_insert_with(|| {
            let mut ordered = members.clone();
            ordered.sort_by(|&a, &b| host.compare_document_position(a, b));
            ordered
        })
    }
}

/// Direction of a keyboard selection move.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Move {
    Next,
    Previous,
}

/// Coordinates every selection group in one scope.
///
/// All mutations take `&mut self`, and the host is borrowed only for the length
/// of a call, so a settle can never be re-entered from a host callback.
#[derive(Clone, Debug)]
pub struct SingleSelectionController<K> {
    groups: HashMap<String, Group<K>>,
    member_of: HashMap<K, String>,
}

impl<K: Copy + Eq + Hash + Debug> Default for SingleSelectionController<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash + Debug> SingleSelectionController<K> {
    /// A controller with no groups.
    pub fn new() -> Self {
        Self {
            groups: HashMap::new(),
            member_of: HashMap::new(),
        }
    }

    /// Add `element` to the group named by the host.
    ///
    /// Returns `true` if the element was newly registered. Registering twice is a
    /// no-op, as is registering an unnamed element. The group is settled as by
    /// [`update`](Self::update), so a member that arrives checked unchecks the
    /// rest of its group.
    pub fn register(&mut self, host: &mut impl CheckableHost<K>, element: K) -> bool {
        if self.member_of.contains_key(&element) {
            return false;
        }
        let Some(name) = host.name(element).map(String::from) else {
            return false;
        };
        let group = self.groups.entry(name.clone()).or_insert_with(Group::new);
        group.members.push(element);
        group.ordered = None;
        trace!(?element, name = name.as_str(), "registered selection member");
        self.member_of.insert(element, name);
        self.update(host, element);
        true
    }

    /// Remove `element` from its group.
    ///
    /// Returns `true` if it was registered. A group left empty is dropped.
    pub fn unregister(&mut self, element: K) -> bool {
        let Some(name) = self.member_of.remove(&element) else {
            return false;
        };
        if let Some(group) = self.groups.get_mut(name.as_str()) {
            group.members.retain(|&member| member != element);
            group.ordered = None;
            if group.selected == Some(element) {
                group.selected = None;
            }
            if group.members.is_empty() {
                self.groups.remove(name.as_str());
                debug!(name = name.as_str(), "dropped empty selection group");
            }
        }
        trace!(?element, "unregistered selection member");
        true
    }

    /// Settle the group of `element` after its checked state changed.
    ///
    /// If `element` is checked, every other member is unchecked. Afterwards the
    /// checked member is the only tabbable one, or all members are tabbable when
    /// none is checked. Unregistered elements are ignored.
    pub fn update(&mut self, host: &mut impl CheckableHost<K>, element: K) {
        let Some(name) = self.member_of.get(&element) else {
            return;
        };
        let Some(group) = self.groups.get_mut(name.as_str()) else {
            return;
        };
        if host.is_checked(element) {
            for &member in &group.members {
                if member != element && host.is_checked(member) {
                    host.set_checked(member, false);
                }
            }
            group.selected = Some(element);
        } else if group.selected == Some(element) {
            group.selected = None;
        }

        let checked = group
            .members
            .iter()
            .copied()
            .find(|&member| host.is_checked(member));
        for &member in &group.members {
            host.set_tabbable(member, checked.is_none_or(|checked| checked == member));
        }
        trace!(?element, selected = ?group.selected, "settled selection group");
    }

    /// Select the enabled member after `element` in document order, wrapping.
    ///
    /// The new member is focused and clicked, then its group is settled.
    /// Returns the member that was selected.
    pub fn select_next(&mut self, host: &mut impl CheckableHost<K>, element: K) -> Option<K> {
        self.select_neighbor(host, element, Move::Next)
    }

    /// Select the enabled member before `element` in document order, wrapping.
    pub fn select_previous(&mut self, host: &mut impl CheckableHost<K>, element: K) -> Option<K> {
        self.select_neighbor(host, element, Move::Previous)
    }

    fn select_neighbor(
        &mut self,
        host: &mut impl CheckableHost<K>,
        element: K,
        direction: Move,
    ) -> Option<K> {
        let next = {
            let name = self.member_of.get(&element)?;
            let group = self.groups.get_mut(name.as_str())?;
            let order = group.ordered(&*host);
            let len = order.len();
            let position = order.iter().position(|&member| member == element)?;
            (1..len)
                .map(|step| match direction {
                    Move::Next => order[(position + step) % len],
                    Move::Previous => order[(position + len - step) % len],
                })
                .find(|&member| !host.is_disabled(member))?
        };
        debug!(from = ?element, to = ?next, "keyboard selection");
        host.focus(next);
        host.click(next);
        self.update(host, next);
        Some(next)
    }

    /// Handle a keydown whose target is `target`.
    ///
    /// Down and the inline-end arrow select the next member; Up and the
    /// inline-start arrow select the previous one. Returns `true` when the key
    /// was handled and its default action should be prevented.
    pub fn on_keydown(
        &mut self,
        host: &mut impl CheckableHost<K>,
        target: K,
        event: &KeyEvent,
    ) -> bool {
        if event.default_prevented || !self.member_of.contains_key(&target) {
            return false;
        }
        let direction = host.text_direction(target);
        let step = match event.key {
            Key::ArrowDown => Move::Next,
            Key::ArrowUp => Move::Previous,
            key if key == direction.inline_end_key() => Move::Next,
            key if key == direction.inline_start_key() => Move::Previous,
            _ => return false,
        };
        self.select_neighbor(host, target, step);
        true
    }

    /// The selected member of the group `name`.
    pub fn selected(&self, name: &str) -> Option<K> {
        self.groups.get(name).and_then(|group| group.selected)
    }

    /// Members of the group `name`, in document order.
    pub fn members(&mut self, host: &impl CheckableHost<K>, name: &str) -> &[K] {
        match self.groups.get_mut(name) {
            Some(group) => group.ordered(host),
            None => &[],
        }
    }

    /// Whether `element` is registered.
    pub fn is_registered(&self, element: K) -> bool {
        self.member_of.contains_key(&element)
    }

    /// Number of groups with at least one member.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use mwc_event_state::Modifiers;

    #[derive(Clone, Debug)]
    struct Radio {
        name: Option<&'static str>,
        checked: bool,
        disabled: bool,
        tabbable: bool,
        clicks: u32,
    }

    /// Radios in document order by index, except where `order` says otherwise.
    #[derive(Debug, Default)]
    struct Doc {
        radios: Vec<Radio>,
        order: Vec<usize>,
        rtl: bool,
        focused: Option<usize>,
    }

    impl Doc {
        fn new(names: &[&'static str]) -> Self {
            Self {
                radios: names
                    .iter()
                    .map(|&name| Radio {
                        name: Some(name),
                        checked: false,
                        disabled: false,
                        tabbable: true,
                        clicks: 0,
                    })
                    .collect(),
                order: (0..names.len()).collect(),
                ..Self::default()
            }
        }

        fn checked(&self) -> Vec<bool> {
            self.radios.iter().map(|radio| radio.checked).collect()
        }
    }

    impl CheckableHost<usize> for Doc {
        fn name(&self, element: usize) -> Option<&str> {
            self.radios[element].name
        }

        fn is_checked(&self, element: usize) -> bool {
            self.radios[element].checked
        }

        fn set_checked(&mut self, element: usize, checked: bool) {
            self.radios[element].checked = checked;
        }

        fn is_disabled(&self, element: usize) -> bool {
            self.radios[element].disabled
        }

        fn set_tabbable(&mut self, element: usize, tabbable: bool) {
            self.radios[element].tabbable = tabbable;
        }

        fn compare_document_position(&self, a: usize, b: usize) -> Ordering {
            let rank = |e| self.order.iter().position(|&o| o == e);
            rank(a).cmp(&rank(b))
        }

        fn text_direction(&self, _element: usize) -> TextDirection {
            if self.rtl {
                TextDirection::Rtl
            } else {
                TextDirection::Ltr
            }
        }

        fn focus(&mut self, element: usize) {
            self.focused = Some(element);
        }

        fn click(&mut self, element: usize) {
            self.radios[element].clicks += 1;
            self.radios[element].checked = true;
        }
    }

    fn registered(doc: &mut Doc) -> SingleSelectionController<usize> {
        let mut selection = SingleSelectionController::new();
        for e in 0..doc.radios.len() {
            selection.register(doc, e);
        }
        selection
    }

    fn check(selection: &mut SingleSelectionController<usize>, doc: &mut Doc, e: usize) {
        doc.radios[e].checked = true;
        selection.update(doc, e);
    }

    #[test]
    fn checking_one_unchecks_the_rest_of_its_group_only() {
        // a1, a2, a3, b1
        let mut doc = Doc::new(&["a", "a", "a", "b"]);
        let mut selection = registered(&mut doc);

        check(&mut selection, &mut doc, 1);
        check(&mut selection, &mut doc, 0);

        assert_eq!(doc.checked(), vec![true, false, false, false]);
        assert_eq!(selection.selected("a"), Some(0));
        assert_eq!(selection.selected("b"), None);
    }

    #[test]
    fn at_most_one_checked_after_any_sequence() {
        let mut doc = Doc::new(&["a", "a", "a", "a"]);
        let mut selection = registered(&mut doc);
        for &e in &[2, 0, 3, 3, 1, 0, 2] {
            check(&mut selection, &mut doc, e);
            let checked = doc.radios.iter().filter(|radio| radio.checked).count();
            assert!(checked <= 1, "{checked} radios checked after checking {e}");
        }
    }

    #[test]
    fn only_the_checked_member_is_tabbable() {
        let mut doc = Doc::new(&["a", "a", "a"]);
        let mut selection = registered(&mut doc);
        check(&mut selection, &mut doc, 2);
        let tabbable: Vec<bool> = doc.radios.iter().map(|radio| radio.tabbable).collect();
        assert_eq!(tabbable, vec![false, false, true]);

        doc.radios[2].checked = false;
        selection.update(&mut doc, 2);
        assert!(doc.radios.iter().all(|radio| radio.tabbable));
        assert_eq!(selection.selected("a"), None);
    }

    #[test]
    fn register_is_idempotent_and_unregister_drops_empty_groups() {
        let mut doc = Doc::new(&["a", "b"]);
        let mut selection = registered(&mut doc);
        assert!(!selection.register(&mut doc, 0));
        assert_eq!(selection.members(&doc, "a"), &[0]);
        assert_eq!(selection.group_count(), 2);

        assert!(selection.unregister(1));
        assert!(!selection.unregister(1));
        assert_eq!(selection.group_count(), 1);
        assert!(!selection.is_registered(1));
    }

    #[test]
    fn unregister_clears_selection() {
        let mut doc = Doc::new(&["a", "a"]);
        let mut selection = registered(&mut doc);
        check(&mut selection, &mut doc, 1);
        selection.unregister(1);
        assert_eq!(selection.selected("a"), None);
    }

    #[test]
    fn registering_checked_members_settles_the_group() {
        let mut doc = Doc::new(&["a", "a", "a", "b"]);
        doc.radios[0].checked = true;
        doc.radios[1].checked = true;
        doc.radios[3].checked = true;
        let selection = registered(&mut doc);

        assert_eq!(doc.checked(), vec![false, true, false, true]);
        assert_eq!(selection.selected("a"), Some(1));
        assert_eq!(selection.selected("b"), Some(3));
        let tabbable: Vec<bool> = doc.radios.iter().map(|radio| radio.tabbable).collect();
        assert_eq!(tabbable, vec![false, true, false, true]);
    }

    #[test]
    fn unnamed_elements_are_not_grouped() {
        let mut doc = Doc::new(&["a"]);
        doc.radios[0].name = None;
        let mut selection = SingleSelectionController::new();
        assert!(!selection.register(&mut doc, 0));
        assert_eq!(selection.group_count(), 0);
    }

    #[test]
    fn arrows_follow_document_order_and_skip_disabled() {
        let mut doc = Doc::new(&["a", "a", "a", "a"]);
        // Document order: 3, 0, 1, 2.
        doc.order = vec![3, 0, 1, 2];
        doc.radios[1].disabled = true;
        let mut selection = registered(&mut doc);
        check(&mut selection, &mut doc, 0);

        assert!(selection.on_keydown(&mut doc, 0, &KeyEvent::new(Key::ArrowDown)));
        assert_eq!(selection.selected("a"), Some(2));
        assert_eq!(doc.focused, Some(2));
        assert_eq!(doc.radios[2].clicks, 1);
        assert!(!doc.radios[0].checked);

        // Wraps from the last member to the first.
        assert_eq!(selection.select_next(&mut doc, 2), Some(3));
        assert_eq!(selection.select_previous(&mut doc, 3), Some(2));
        assert_eq!(doc.checked(), vec![false, false, true, false]);
    }

    #[test]
    fn horizontal_arrows_mirror_in_rtl() {
        let mut doc = Doc::new(&["a", "a", "a"]);
        doc.rtl = true;
        let mut selection = registered(&mut doc);
        assert!(selection.on_keydown(&mut doc, 1, &KeyEvent::new(Key::ArrowLeft)));
        assert_eq!(selection.selected("a"), Some(2));
        assert!(selection.on_keydown(&mut doc, 2, &KeyEvent::new(Key::ArrowRight)));
        assert_eq!(selection.selected("a"), Some(1));
    }

    #[test]
    fn keys_on_unregistered_targets_are_ignored() {
        let mut doc = Doc::new(&["a", "a"]);
        let mut selection = SingleSelectionController::new();
        selection.register(&mut doc, 0);
        assert!(!selection.on_keydown(&mut doc, 1, &KeyEvent::new(Key::ArrowDown)));
        assert!(!selection.on_keydown(&mut doc, 0, &KeyEvent::new(Key::Enter)));
        assert!(!selection.on_keydown(
            &mut doc,
            0,
            &KeyEvent::new(Key::ArrowDown).prevented()
        ));
        // A lone member still claims the arrow.
        assert!(selection.on_keydown(
            &mut doc,
            0,
            &KeyEvent::new(Key::ArrowDown).with_modifiers(Modifiers::SHIFT)
        ));
        assert_eq!(doc.radios[0].clicks, 0);
    }

    #[test]
    fn registry_reuses_controllers_per_scope() {
        let mut doc = Doc::new(&["a", "a"]);
        let mut registry: SelectionRegistry<u8, usize> = SelectionRegistry::new();
        registry.get_or_default(Scope::Global).register(&mut doc, 0);
        registry.get_or_default(Scope::Root(7)).register(&mut doc, 1);
        assert!(registry.get_or_default(Scope::Global).is_registered(0));
        assert!(!registry.get_or_default(Scope::Global).is_registered(1));
        assert_eq!(registry.len(), 2);
        assert!(registry.remove(&Scope::Root(7)).is_some());
    }
}
