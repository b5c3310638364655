// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested menus.
//!
//! A [`MenuTree`] owns a set of [`Menu`]s, some of which open from an item of
//! another menu. It routes input to the right level and runs the choreography
//! between levels:
//!
//! - Hovering a trigger item opens its submenu after
//!   [`SubMenuConfig::hover_open_delay_ms`]; leaving it closes the submenu after
//!   [`SubMenuConfig::hover_close_delay_ms`] unless the pointer reaches the
//!   submenu first. A zero delay runs the same transition at once.
//! - The inline-end arrow, Enter or Space on a trigger item opens its submenu with
//!   the first item active. The inline-start arrow or Escape inside a submenu
//!   closes it and hands focus back to the trigger.
//! - While a submenu is open its parent's typeahead is suspended and the parent
//!   tolerates focus moving nowhere.
//!
//! Closing walks the nesting with [`mwc_responder`]: the closing menu is the
//! target, enclosing menus are bubble steps. Escape and the exit arrow stop at the
//! first enclosing menu, so only one level closes. Choosing an item keeps going
//! and closes the whole chain.

use alloc::vec::Vec;

use mwc_event_state::timer::earliest;
use mwc_event_state::{Key, KeyEvent, Timer};
use mwc_focus::ListItem;
use mwc_responder::chain::bubble_path;
use mwc_responder::dispatcher;
use mwc_responder::types::{Outcome, ParentLookup, Phase};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::corner::Corner;
use crate::error::MenuError;
use crate::menu::{
    CloseReason, DefaultFocus, Menu, MenuAdapter, MenuItem, MenuKeyOutcome, ParentSignal,
    RelatedTarget,
};
use crate::outside_click::OutsideClickListeners;

/// Default hover delay before a submenu opens or closes, in milliseconds.
pub const DEFAULT_HOVER_DELAY_MS: u64 = 400;

/// Identifies a menu in a [`MenuTree`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MenuId(usize);

impl MenuId {
    /// Position of the menu in its tree, in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Options for a submenu and its trigger item.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SubMenuConfig {
    /// Hover time before the submenu opens.
    pub hover_open_delay_ms: u64,
    /// Time after the pointer leaves before the submenu closes.
    pub hover_close_delay_ms: u64,
    /// Corner of the trigger item the submenu attaches to.
    pub anchor_corner: Corner,
    /// Corner of the submenu pinned to the trigger item.
    pub menu_corner: Corner,
}

impl Default for SubMenuConfig {
    fn default() -> Self {
        Self {
            hover_open_delay_ms: DEFAULT_HOVER_DELAY_MS,
            hover_close_delay_ms: DEFAULT_HOVER_DELAY_MS,
            anchor_corner: Corner::StartEnd,
            menu_corner: Corner::StartStart,
        }
    }
}

#[derive(Clone, Debug)]
struct Trigger {
    parent: MenuId,
    item: usize,
    config: SubMenuConfig,
    open_timer: Timer,
    close_timer: Timer,
}

#[derive(Debug)]
struct Node<A: MenuAdapter> {
    menu: Menu<A>,
    trigger: Option<Trigger>,
    children: SmallVec<[MenuId; 4]>,
}

/// An arena of nested menus.
#[derive(Debug)]
pub struct MenuTree<A: MenuAdapter> {
    nodes: Vec<Node<A>>,
    listeners: OutsideClickListeners<A::Scope, MenuId>,
}

impl<A: MenuAdapter> Default for MenuTree<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: MenuAdapter> ParentLookup<MenuId> for MenuTree<A> {
    fn parent_of(&self, node: &MenuId) -> Option<MenuId> {
        let trigger = self.nodes.get(node.0)?.trigger.as_ref()?;
        Some(trigger.parent)
    }
}

impl<A: MenuAdapter> MenuTree<A> {
    /// An empty tree.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            listeners: OutsideClickListeners::new(),
        }
    }

    /// Add a top-level menu.
    pub fn add_root(&mut self, menu: Menu<A>) -> MenuId {
        let id = MenuId(self.nodes.len());
        self.nodes.push(Node {
            menu,
            trigger: None,
            children: SmallVec::new(),
        });
        debug!(?id, "added root menu");
        id
    }

    /// Add `menu` as the submenu opened by item `item` of `parent`.
    ///
    /// The submenu is made quick, leaves focus restoration and outside clicks to
    /// its ancestors, and takes its corners from `config`.
    pub fn add_submenu(
        &mut self,
        parent: MenuId,
        item: usize,
        mut menu: Menu<A>,
        config: SubMenuConfig,
    ) -> Result<MenuId, MenuError> {
        let len = self.node(parent)?.menu.adapter().items().len();
        if item >= len {
            return Err(MenuError::ItemOutOfRange {
                menu: parent,
                item,
                len,
            });
        }
        if self.submenu_of(parent, item).is_some() {
            return Err(MenuError::DuplicateSubmenu { menu: parent, item });
        }

        let menu_config = menu.config_mut();
        menu_config.quick = true;
        menu_config.skip_restore_focus = true;
        menu_config.stay_open_on_outside_click = true;
        menu_config.default_focus = DefaultFocus::None;
        menu_config.anchor_corner = config.anchor_corner;
        menu_config.menu_corner = config.menu_corner;

        let id = MenuId(self.nodes.len());
        self.nodes.push(Node {
            menu,
            trigger: Some(Trigger {
                parent,
                item,
                config,
                open_timer: Timer::new(),
                close_timer: Timer::new(),
            }),
            children: SmallVec::new(),
        });
        self.node_mut(parent)?.children.push(id);
        debug!(?id, ?parent, item, "added submenu");
        Ok(id)
    }

    fn node(&self, id: MenuId) -> Result<&Node<A>, MenuError> {
        self.nodes.get(id.0).ok_or(MenuError::UnknownMenu(id))
    }

    fn node_mut(&mut self, id: MenuId) -> Result<&mut Node<A>, MenuError> {
        self.nodes.get_mut(id.0).ok_or(MenuError::UnknownMenu(id))
    }

    /// The menu `id`.
    pub fn menu(&self, id: MenuId) -> Option<&Menu<A>> {
        self.nodes.get(id.0).map(|node| &node.menu)
    }

    /// The menu `id`, mutably.
    pub fn menu_mut(&mut self, id: MenuId) -> Option<&mut Menu<A>> {
        self.nodes.get_mut(id.0).map(|node| &mut node.menu)
    }

    /// Number of menus in the tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the tree has no menus.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether menu `id` is opening or open.
    pub fn is_open(&self, id: MenuId) -> bool {
        self.menu(id).is_some_and(Menu::is_open)
    }

    /// The menu containing the trigger of submenu `id`.
    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.parent_of(&id)
    }

    /// The submenu opened by item `item` of `menu`.
    pub fn submenu_of(&self, menu: MenuId, item: usize) -> Option<MenuId> {
        let node = self.nodes.get(menu.0)?;
        node.children.iter().copied().find(|child| {
            self.nodes
                .get(child.0)
                .and_then(|child| child.trigger.as_ref())
                .is_some_and(|trigger| trigger.item == item)
        })
    }

    /// Outside-click listeners of open menus, by scope.
    pub fn listeners(&self) -> &OutsideClickListeners<A::Scope, MenuId> {
        &self.listeners
    }

    fn sync_listener(&mut self, id: MenuId) {
        let Some(menu) = self.menu(id) else {
            return;
        };
        let scope = menu.adapter().scope();
        if menu.wants_outside_clicks() {
            self.listeners.listen(scope, id);
        } else {
            self.listeners.unlisten(&scope, id);
        }
    }

    /// Open menu `id`.
    ///
    /// A submenu opens as if from the keyboard, with its first item active.
    /// Returns `false` if it was already open or its parent is closed.
    pub fn show(&mut self, id: MenuId) -> Result<bool, MenuError> {
        if self.node(id)?.trigger.is_some() {
            return Ok(self.open_submenu(id, DefaultFocus::FirstItem));
        }
        let opened = self.node_mut(id)?.menu.show();
        self.sync_listener(id);
        Ok(opened)
    }

    fn open_submenu(&mut self, id: MenuId, focus: DefaultFocus) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        let Some(trigger) = node.trigger.as_mut() else {
            return false;
        };
        trigger.open_timer.cancel();
        trigger.close_timer.cancel();
        let (parent, item) = (trigger.parent, trigger.item);
        let already_open = node.menu.is_open();
        if already_open || !self.is_open(parent) {
            return false;
        }

        if let Some(parent_menu) = self.menu_mut(parent) {
            parent_menu.handle_signal(ParentSignal::DeactivateItems);
            parent_menu.handle_signal(ParentSignal::RequestActivation(item));
            if let Some(trigger_item) = parent_menu.adapter_mut().items_mut().get_mut(item) {
                trigger_item.set_selected(true);
            }
            parent_menu.handle_signal(ParentSignal::SuspendTypeahead);
            parent_menu.handle_signal(ParentSignal::StayOpenOnFocusout);
        }
        let Some(menu) = self.menu_mut(id) else {
            return false;
        };
        menu.config_mut().default_focus = focus;
        let opened = menu.show();
        self.sync_listener(id);
        debug!(?id, ?parent, ?focus, "submenu opened");
        opened
    }

    /// Close `id` and its open submenus, then tell its parent. Returns `true` if
    /// `id` was open.
    fn close_node(&mut self, id: MenuId, reason: CloseReason) -> bool {
        let Some(node) = self.nodes.get_mut(id.0) else {
            return false;
        };
        let children = node.children.clone();
        if let Some(trigger) = node.trigger.as_mut() {
            trigger.open_timer.cancel();
            trigger.close_timer.cancel();
        }
        let trigger = node.trigger.as_ref().map(|trigger| (trigger.parent, trigger.item));

        for child in children {
            if self.is_open(child) {
                self.close_node(child, CloseReason::Programmatic);
            }
        }

        let was_open = self.menu_mut(id).is_some_and(|menu| menu.close(reason));
        self.sync_listener(id);

        if let Some((parent, item)) = trigger {
            if let Some(parent_menu) = self.menu_mut(parent) {
                parent_menu.handle_signal(ParentSignal::ResumeTypeahead);
                parent_menu.handle_signal(ParentSignal::CloseOnFocusout);
                if let Some(trigger_item) = parent_menu.adapter_mut().items_mut().get_mut(item) {
                    trigger_item.set_selected(false);
                    if !reason.returns_to_trigger() {
                        trigger_item.set_tab_index(-1);
                    }
                }
                if reason.returns_to_trigger() {
                    parent_menu.handle_signal(ParentSignal::RequestActivation(item));
                }
            }
        }
        trace!(?id, ?reason, was_open, "menu node closed");
        was_open
    }

    /// Close `id` and propagate to enclosing menus as `reason` dictates.
    ///
    /// Returns every menu that closed, innermost first.
    pub fn close(&mut self, id: MenuId, reason: CloseReason) -> Result<Vec<MenuId>, MenuError> {
        self.node(id)?;
        Ok(self.close_chain(id, reason))
    }

    fn close_chain(&mut self, id: MenuId, reason: CloseReason) -> Vec<MenuId> {
        let path = bubble_path(id, &*self);
        let mut closed = Vec::new();
        let stopped = dispatcher::run(&path, &mut closed, |step, closed| {
            match step.phase {
                Phase::Target => {
                    self.close_node(step.node, reason);
                    closed.push(step.node);
                }
                Phase::Bubble if !reason.bubbles() => return Outcome::Stop,
                Phase::Bubble => {
                    if self.close_node(step.node, reason) {
                        closed.push(step.node);
                    }
                }
            }
            Outcome::Continue
        });
        if let Some(step) = stopped {
            trace!(at = ?step.node, ?reason, "close handled below");
        }
        closed
    }

    /// Handle a keydown inside menu `id`.
    ///
    /// Keys never reach enclosing menus: the tree dispatches only to `id`.
    pub fn keydown(
        &mut self,
        id: MenuId,
        event: &KeyEvent,
        now: u64,
    ) -> Result<MenuKeyOutcome, MenuError> {
        let node = self.node(id)?;
        if event.default_prevented || !node.menu.is_open() {
            return Ok(MenuKeyOutcome::default());
        }
        let direction = node.menu.adapter().text_direction();
        let is_submenu = node.trigger.is_some();
        let typing = node.menu.typeahead().is_typing_ahead();

        let opens_submenu = event.key == direction.inline_end_key()
            || event.key == Key::Enter
            || (event.key == Key::Space && !typing);
        if opens_submenu {
            let child = node
                .menu
                .active_item()
                .and_then(|active| self.submenu_of(id, active));
            if let Some(child) = child {
                self.open_submenu(child, DefaultFocus::FirstItem);
                return Ok(MenuKeyOutcome {
                    prevent_default: true,
                    ..MenuKeyOutcome::default()
                });
            }
        }

        if is_submenu && event.key == direction.inline_start_key() {
            let reason = CloseReason::Keydown(event.key);
            self.close_chain(id, reason);
            return Ok(MenuKeyOutcome {
                prevent_default: true,
                closed: Some(reason),
                selected: None,
            });
        }

        let outcome = self.node_mut(id)?.menu.on_keydown(event, now);
        if let Some(reason) = outcome.closed {
            self.close_chain(id, reason);
        }
        Ok(outcome)
    }

    /// An item of menu `id` was clicked.
    ///
    /// A trigger item opens its submenu; any other item is chosen. Returns every
    /// menu that closed.
    pub fn item_activated(&mut self, id: MenuId, item: usize) -> Result<Vec<MenuId>, MenuError> {
        self.node(id)?;
        if let Some(child) = self.submenu_of(id, item) {
            self.open_submenu(child, DefaultFocus::ListRoot);
            return Ok(Vec::new());
        }
        let closed = self.node_mut(id)?.menu.select_item(item);
        Ok(match closed {
            Some(reason) => self.close_chain(id, reason),
            None => Vec::new(),
        })
    }

    /// Focus left menu `id`. Returns every menu that closed.
    pub fn focusout(
        &mut self,
        id: MenuId,
        related: RelatedTarget,
    ) -> Result<Vec<MenuId>, MenuError> {
        if self.node_mut(id)?.menu.on_focusout(related) {
            Ok(self.close_chain(id, CloseReason::Focusout))
        } else {
            Ok(Vec::new())
        }
    }

    /// A click happened in `scope`. Every listening menu whose subtree does not
    /// contain the click closes. Returns every menu that closed.
    pub fn outside_click(
        &mut self,
        scope: A::Scope,
        path_contains: impl Fn(MenuId) -> bool,
    ) -> Vec<MenuId> {
        let targets: SmallVec<[MenuId; 4]> = self
            .listeners
            .listeners(&scope)
            .iter()
            .copied()
            .filter(|&menu| !path_contains(menu))
            .collect();
        let mut closed = Vec::new();
        for menu in targets {
            closed.extend(self.close_chain(menu, CloseReason::OutsideClick));
        }
        closed
    }

    /// The pointer entered item `item` of menu `id`.
    pub fn pointer_enter_item(&mut self, id: MenuId, item: usize, now: u64) -> Result<(), MenuError> {
        self.node(id)?;
        let Some(child) = self.submenu_of(id, item) else {
            return Ok(());
        };
        let open = self.is_open(child);
        if let Some(trigger) = self.node_mut(child)?.trigger.as_mut() {
            trigger.close_timer.cancel();
            if !open {
                trigger.open_timer.schedule(now, trigger.config.hover_open_delay_ms);
            }
        }
        self.advance(now);
        Ok(())
    }

    /// The pointer left item `item` of menu `id`.
    pub fn pointer_leave_item(&mut self, id: MenuId, item: usize, now: u64) -> Result<(), MenuError> {
        self.node(id)?;
        let Some(child) = self.submenu_of(id, item) else {
            return Ok(());
        };
        self.schedule_hover_close(child, now);
        self.advance(now);
        Ok(())
    }

    /// The pointer entered the surface of menu `id`.
    pub fn pointer_enter_menu(&mut self, id: MenuId) -> Result<(), MenuError> {
        if let Some(trigger) = self.node_mut(id)?.trigger.as_mut() {
            trigger.close_timer.cancel();
        }
        Ok(())
    }

    /// The pointer left the surface of menu `id`.
    pub fn pointer_leave_menu(&mut self, id: MenuId, now: u64) -> Result<(), MenuError> {
        self.node(id)?;
        self.schedule_hover_close(id, now);
        self.advance(now);
        Ok(())
    }

    fn schedule_hover_close(&mut self, id: MenuId, now: u64) {
        let open = self.is_open(id);
        let Some(trigger) = self.nodes.get_mut(id.0).and_then(|node| node.trigger.as_mut()) else {
            return;
        };
        trigger.open_timer.cancel();
        if open {
            trigger.close_timer.schedule(now, trigger.config.hover_close_delay_ms);
        }
    }

    /// Fire every deadline due at `now`: hover timers and typeahead buffers.
    pub fn advance(&mut self, now: u64) {
        for index in 0..self.nodes.len() {
            let id = MenuId(index);
            let (open_due, close_due) = match self
                .nodes
                .get_mut(index)
                .and_then(|node| node.trigger.as_mut())
            {
                Some(trigger) => (
                    trigger.open_timer.take_due(now),
                    trigger.close_timer.take_due(now),
                ),
                None => (false, false),
            };
            if open_due {
                self.open_submenu(id, DefaultFocus::ListRoot);
            }
            if close_due {
                self.close_chain(id, CloseReason::PointerLeave);
            }
            if let Some(menu) = self.menu_mut(id) {
                menu.advance(now);
            }
        }
    }

    /// The earliest pending deadline across the tree.
    pub fn next_deadline(&self) -> Option<u64> {
        earliest(self.nodes.iter().flat_map(|node| {
            let (open, close) = match &node.trigger {
                Some(trigger) => (trigger.open_timer.deadline(), trigger.close_timer.deadline()),
                None => (None, None),
            };
            [open, close, node.menu.next_deadline()]
        }))
    }

    /// Tear down menu `id`: close it and its submenus without notifying
    /// enclosing menus beyond its own trigger, and clear every pending hover
    /// deadline in its subtree.
    pub fn disconnect(&mut self, id: MenuId) -> Result<(), MenuError> {
        self.node(id)?;
        self.close_node(id, CloseReason::Programmatic);
        let mut stack: SmallVec<[MenuId; 8]> = SmallVec::new();
        stack.push(id);
        while let Some(current) = stack.pop() {
            let Some(node) = self.nodes.get_mut(current.0) else {
                continue;
            };
            if let Some(trigger) = node.trigger.as_mut() {
                trigger.open_timer.cancel();
                trigger.close_timer.cancel();
            }
            stack.extend(node.children.iter().copied());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::test_util::TestAdapter;
    use crate::menu::{MenuConfig, MenuEvent};
    use alloc::vec;

    fn quick() -> MenuConfig {
        MenuConfig {
            quick: true,
            ..MenuConfig::default()
        }
    }

    fn menu(labels: &[&'static str]) -> Menu<TestAdapter> {
        let mut adapter = TestAdapter::with_items(labels);
        adapter.active_element = Some(42);
        Menu::with_config(adapter, quick())
    }

    /// A > B > C, where A item 1 opens B and B item 0 opens C.
    fn nested() -> (MenuTree<TestAdapter>, MenuId, MenuId, MenuId) {
        let mut tree = MenuTree::new();
        let a = tree.add_root(menu(&["New", "Open recent", "Save"]));
        let b = tree
            .add_submenu(a, 1, menu(&["Projects", "Files"]), SubMenuConfig::default())
            .unwrap();
        let c = tree
            .add_submenu(b, 0, menu(&["Alpha", "Beta"]), SubMenuConfig::default())
            .unwrap();
        (tree, a, b, c)
    }

    fn key(key: Key) -> KeyEvent {
        KeyEvent::new(key)
    }

    fn open_all(tree: &mut MenuTree<TestAdapter>, a: MenuId, b: MenuId) {
        tree.show(a).unwrap();
        tree.keydown(a, &key(Key::ArrowDown), 0).unwrap();
        tree.keydown(a, &key(Key::ArrowRight), 0).unwrap();
        tree.keydown(b, &key(Key::ArrowRight), 0).unwrap();
    }

    #[test]
    fn keyboard_opens_each_level_with_first_item_active() {
        let (mut tree, a, b, c) = nested();
        open_all(&mut tree, a, b);
        assert!(tree.is_open(a) && tree.is_open(b) && tree.is_open(c));
        assert_eq!(tree.menu(c).unwrap().active_item(), Some(0));
        let a_menu = tree.menu(a).unwrap();
        assert!(a_menu.adapter().items[1].selected);
        assert!(!a_menu.typeahead().is_enabled());
    }

    #[test]
    fn escape_closes_only_the_innermost_level() {
        let (mut tree, a, b, c) = nested();
        open_all(&mut tree, a, b);
        let trigger_focus = tree.menu(b).unwrap().adapter().items[0].focus_count;

        let outcome = tree.keydown(c, &key(Key::Escape), 0).unwrap();
        assert_eq!(outcome.closed, Some(CloseReason::Keydown(Key::Escape)));
        assert!(!tree.is_open(c));
        assert!(tree.is_open(b) && tree.is_open(a));

        let b_menu = tree.menu(b).unwrap();
        assert_eq!(b_menu.active_item(), Some(0));
        assert_eq!(b_menu.adapter().items[0].focus_count, trigger_focus + 1);
        assert!(!b_menu.adapter().items[0].selected);
        assert!(b_menu.typeahead().is_enabled());
    }

    #[test]
    fn exit_arrow_mirrors_in_rtl() {
        let (mut tree, a, b, c) = nested();
        open_all(&mut tree, a, b);
        tree.menu_mut(c).unwrap().adapter_mut().rtl = true;
        // In RTL, Left is the enter arrow, so it does not close C.
        tree.keydown(c, &key(Key::ArrowLeft), 0).unwrap();
        assert!(tree.is_open(c));
        tree.keydown(c, &key(Key::ArrowRight), 0).unwrap();
        assert!(!tree.is_open(c));
        assert!(tree.is_open(b));
    }

    #[test]
    fn choosing_an_item_closes_the_whole_chain() {
        let (mut tree, a, b, c) = nested();
        open_all(&mut tree, a, b);
        let outcome = tree.keydown(c, &key(Key::Enter), 0).unwrap();
        assert_eq!(outcome.selected, Some(0));
        assert!(!tree.is_open(a) && !tree.is_open(b) && !tree.is_open(c));
        assert!(
            tree.menu(c)
                .unwrap()
                .adapter()
                .events
                .contains(&MenuEvent::ItemSelected(0))
        );
        // Only the root restores focus.
        assert_eq!(tree.menu(a).unwrap().adapter().focused, Some(42));
        assert_eq!(tree.menu(c).unwrap().adapter().focused, None);
    }

    #[test]
    fn clicking_items_opens_or_chooses() {
        let (mut tree, a, b, c) = nested();
        tree.show(a).unwrap();
        assert!(tree.item_activated(a, 1).unwrap().is_empty());
        assert!(tree.is_open(b));
        assert_eq!(tree.menu(b).unwrap().adapter().root_focus_count, 1);

        let closed = tree.item_activated(b, 1).unwrap();
        assert_eq!(closed, vec![b, a]);
        assert!(!tree.is_open(c));
    }

    #[test]
    fn closing_a_parent_closes_open_submenus() {
        let (mut tree, a, b, c) = nested();
        open_all(&mut tree, a, b);
        tree.close(a, CloseReason::Programmatic).unwrap();
        assert!(!tree.is_open(a) && !tree.is_open(b) && !tree.is_open(c));
    }

    #[test]
    fn hover_opens_and_closes_after_delays() {
        let (mut tree, a, b, _) = nested();
        tree.show(a).unwrap();
        tree.pointer_enter_item(a, 1, 1_000).unwrap();
        assert!(!tree.is_open(b));
        assert_eq!(tree.next_deadline(), Some(1_400));
        tree.advance(1_399);
        assert!(!tree.is_open(b));
        tree.advance(1_400);
        assert!(tree.is_open(b));
        assert_eq!(tree.menu(b).unwrap().adapter().root_focus_count, 1);

        // Leaving the trigger for the submenu keeps it open.
        tree.pointer_leave_item(a, 1, 2_000).unwrap();
        tree.pointer_enter_menu(b).unwrap();
        tree.advance(3_000);
        assert!(tree.is_open(b));

        tree.pointer_leave_menu(b, 3_000).unwrap();
        tree.advance(3_400);
        assert!(!tree.is_open(b));
        assert!(tree.is_open(a));
        assert!(tree.menu(a).unwrap().typeahead().is_enabled());
        assert_eq!(tree.next_deadline(), None);
    }

    #[test]
    fn leaving_before_the_open_delay_cancels_it() {
        let (mut tree, a, b, _) = nested();
        tree.show(a).unwrap();
        tree.pointer_enter_item(a, 1, 0).unwrap();
        tree.pointer_leave_item(a, 1, 100).unwrap();
        tree.advance(1_000);
        assert!(!tree.is_open(b));
    }

    #[test]
    fn zero_delays_take_the_same_path_synchronously() {
        let mut tree = MenuTree::new();
        let a = tree.add_root(menu(&["One", "Two"]));
        let config = SubMenuConfig {
            hover_open_delay_ms: 0,
            hover_close_delay_ms: 0,
            ..SubMenuConfig::default()
        };
        let b = tree.add_submenu(a, 0, menu(&["Inner"]), config).unwrap();
        tree.show(a).unwrap();
        tree.pointer_enter_item(a, 0, 5).unwrap();
        assert!(tree.is_open(b));
        tree.pointer_leave_item(a, 0, 6).unwrap();
        assert!(!tree.is_open(b));
    }

    #[test]
    fn open_submenu_lets_parent_tolerate_detached_focusout() {
        let (mut tree, a, b, _) = nested();
        tree.show(a).unwrap();
        tree.item_activated(a, 1).unwrap();
        assert!(tree.focusout(a, RelatedTarget::Nothing).unwrap().is_empty());
        assert!(tree.is_open(a));

        tree.close(b, CloseReason::Keydown(Key::Escape)).unwrap();
        assert_eq!(tree.focusout(a, RelatedTarget::Nothing).unwrap(), vec![a]);
    }

    #[test]
    fn keys_in_a_submenu_do_not_reach_its_parent() {
        let (mut tree, a, b, _) = nested();
        tree.show(a).unwrap();
        tree.item_activated(a, 1).unwrap();
        tree.keydown(b, &KeyEvent::character('f'), 0).unwrap();
        assert_eq!(tree.menu(b).unwrap().active_item(), Some(1));
        assert!(!tree.menu(a).unwrap().typeahead().is_typing_ahead());
        assert_eq!(tree.menu(a).unwrap().active_item(), Some(1));
    }

    #[test]
    fn outside_clicks_close_listening_roots() {
        let (mut tree, a, b, _) = nested();
        tree.show(a).unwrap();
        tree.item_activated(a, 1).unwrap();
        // Submenus leave outside clicks to their root.
        assert_eq!(tree.listeners().listeners(&()), &[a]);

        assert!(tree.outside_click((), |menu| menu == a).is_empty());
        let closed = tree.outside_click((), |_| false);
        assert_eq!(closed, vec![a]);
        assert!(!tree.is_open(b));
        assert!(tree.listeners().listeners(&()).is_empty());
    }

    #[test]
    fn showing_twice_registers_one_listener() {
        let (mut tree, a, _, _) = nested();
        assert!(tree.show(a).unwrap());
        assert!(!tree.show(a).unwrap());
        assert_eq!(tree.listeners().listeners(&()).len(), 1);
    }

    #[test]
    fn disconnect_clears_pending_deadlines() {
        let (mut tree, a, b, _) = nested();
        tree.show(a).unwrap();
        tree.pointer_enter_item(a, 1, 0).unwrap();
        tree.keydown(a, &KeyEvent::character('s'), 0).unwrap();
        assert!(tree.next_deadline().is_some());
        tree.disconnect(a).unwrap();
        assert_eq!(tree.next_deadline(), None);
        tree.advance(10_000);
        assert!(!tree.is_open(b));
    }

    #[test]
    fn misuse_is_reported() {
        let (mut tree, a, _, _) = nested();
        let stray = MenuId(99);
        assert_eq!(tree.show(stray), Err(MenuError::UnknownMenu(stray)));
        assert_eq!(
            tree.add_submenu(a, 1, menu(&["X"]), SubMenuConfig::default()),
            Err(MenuError::DuplicateSubmenu { menu: a, item: 1 })
        );
        assert_eq!(
            tree.add_submenu(a, 7, menu(&["X"]), SubMenuConfig::default()),
            Err(MenuError::ItemOutOfRange {
                menu: a,
                item: 7,
                len: 3
            })
        );
        assert_eq!(tree.parent(a), None);
    }
}
