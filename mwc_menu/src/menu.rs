// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single menu: surface lifecycle, keyboard handling, and focus bookkeeping.

use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect, Size};
use mwc_event_state::{Key, KeyEvent, TextDirection};
use mwc_focus::{
    ListController, ListItem, activate_first_item, activate_item, activate_last_item,
    active_item, deactivate_active_item, is_item_not_disabled,
};
use mwc_typeahead::{Typeahead, TypeaheadConfig, TypeaheadItem};
use tracing::{debug, trace};

use crate::corner::{Corner, Placement, position_menu};

/// Default typeahead buffer time for menus, in milliseconds.
pub const DEFAULT_TYPEAHEAD_DELAY_MS: u64 = 200;

/// An entry in a menu.
pub trait MenuItem: TypeaheadItem {
    /// Mark the item as the selected path, for example while its submenu is open.
    fn set_selected(&mut self, _selected: bool) {}

    /// Whether choosing this item leaves the menu open.
    fn keep_open(&self) -> bool {
        false
    }
}

/// Host side of a [`Menu`].
pub trait MenuAdapter {
    /// A focusable element outside the menu.
    type Element: Copy + Eq + Debug;
    /// The scope whose document-level listeners this menu uses.
    type Scope: Copy + Eq + Hash + Debug;
    /// The menu's items.
    type Item: MenuItem;

    /// Items in display order.
    fn items(&self) -> &[Self::Item];

    /// Items in display order, mutably.
    fn items_mut(&mut self) -> &mut [Self::Item];

    /// Scope of the document or root the menu is rendered in.
    fn scope(&self) -> Self::Scope;

    /// The element holding focus, captured when the menu opens.
    fn active_element(&self) -> Option<Self::Element> {
        None
    }

    /// Move focus to `element`.
    fn focus_element(&mut self, _element: Self::Element) {}

    /// Move focus to the list itself rather than an item.
    fn focus_list_root(&mut self) {}

    /// Text direction of the menu.
    fn text_direction(&self) -> TextDirection {
        TextDirection::Ltr
    }

    /// Deliver a menu event.
    fn emit(&mut self, _event: MenuEvent) {}
}

/// An item type with no values, for menus without items.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoItem {}

impl ListItem for NoItem {
    fn is_disabled(&self) -> bool {
        match *self {}
    }

    fn tab_index(&self) -> i32 {
        match *self {}
    }

    fn set_tab_index(&mut self, _tab_index: i32) {
        match *self {}
    }

    fn focus(&mut self) {
        match *self {}
    }
}

impl TypeaheadItem for NoItem {
    fn typeahead_text(&self) -> &str {
        match *self {}
    }
}

impl MenuItem for NoItem {}

/// An adapter that has no items and ignores every call.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopMenuAdapter;

impl MenuAdapter for NoopMenuAdapter {
    type Element = ();
    type Scope = ();
    type Item = NoItem;

    fn items(&self) -> &[NoItem] {
        &[]
    }

    fn items_mut(&mut self) -> &mut [NoItem] {
        &mut []
    }

    fn scope(&self) -> Self::Scope {}
}

/// Why a menu closed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CloseReason {
    /// A key closed it: Escape, Tab, or a submenu's exit arrow.
    Keydown(Key),
    /// An item was chosen.
    ClickSelection,
    /// Focus left the menu.
    Focusout,
    /// A click landed outside the menu.
    OutsideClick,
    /// The pointer left a submenu and its trigger.
    PointerLeave,
    /// The host asked.
    Programmatic,
}

impl CloseReason {
    /// Whether the close propagates to every enclosing menu.
    pub fn bubbles(self) -> bool {
        matches!(self, Self::ClickSelection | Self::Keydown(Key::Tab))
    }

    /// Whether a closing submenu hands focus back to its trigger item.
    pub fn returns_to_trigger(self) -> bool {
        matches!(self, Self::Keydown(key) if key == Key::Escape || key.is_arrow())
    }
}

/// Events a menu emits through [`MenuAdapter::emit`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    /// The menu started to open.
    Opening,
    /// The menu finished opening.
    Opened,
    /// The menu started to close.
    Closing(CloseReason),
    /// The menu finished closing.
    Closed(CloseReason),
    /// The item at this index was chosen.
    ItemSelected(usize),
}

/// What receives focus when a menu opens.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DefaultFocus {
    /// Leave focus alone.
    None,
    /// The list itself.
    ListRoot,
    /// The first enabled item.
    #[default]
    FirstItem,
    /// The last enabled item.
    LastItem,
}

/// Visibility phase of a menu surface.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum SurfacePhase {
    /// Hidden.
    #[default]
    Closed,
    /// Visible, open transition running.
    Opening,
    /// Visible.
    Open,
    /// Close transition running.
    Closing,
}

/// Where focus went when it left the menu.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RelatedTarget {
    /// Another element inside the menu or its anchor.
    InsideMenu,
    /// An element outside the menu.
    Elsewhere,
    /// No element; focus moved somewhere the document cannot name.
    Nothing,
}

/// Requests a nested submenu sends to the menu that contains its trigger.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParentSignal {
    /// Clear every item's active and selected markers.
    DeactivateItems,
    /// Make the item at this index the active, focused one.
    RequestActivation(usize),
    /// Stop interpreting keystrokes as typeahead.
    SuspendTypeahead,
    /// Interpret keystrokes as typeahead again.
    ResumeTypeahead,
    /// Ignore focusout events with no related target.
    StayOpenOnFocusout,
    /// Close on focusout events with no related target again.
    CloseOnFocusout,
}

/// Options for a [`Menu`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MenuConfig {
    /// Skip open and close transitions.
    pub quick: bool,
    /// Do not return focus to the previously focused element on close.
    pub skip_restore_focus: bool,
    /// Focus target once the menu has opened.
    pub default_focus: DefaultFocus,
    /// Ignore clicks outside the menu.
    pub stay_open_on_outside_click: bool,
    /// Ignore focus leaving the menu.
    pub stay_open_on_focusout: bool,
    /// Typeahead buffer time.
    pub typeahead_delay_ms: u64,
    /// Corner of the anchor the menu attaches to.
    pub anchor_corner: Corner,
    /// Corner of the menu pinned to the anchor.
    pub menu_corner: Corner,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            quick: false,
            skip_restore_focus: false,
            default_focus: DefaultFocus::FirstItem,
            stay_open_on_outside_click: false,
            stay_open_on_focusout: false,
            typeahead_delay_ms: DEFAULT_TYPEAHEAD_DELAY_MS,
            anchor_corner: Corner::EndStart,
            menu_corner: Corner::StartStart,
        }
    }
}

/// Result of [`Menu::on_keydown`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct MenuKeyOutcome {
    /// The caller should prevent the key's default action.
    pub prevent_default: bool,
    /// The key closed the menu.
    pub closed: Option<CloseReason>,
    /// The key chose this item.
    pub selected: Option<usize>,
}

/// One menu surface and its list.
#[derive(Debug)]
pub struct Menu<A: MenuAdapter> {
    adapter: A,
    config: MenuConfig,
    phase: SurfacePhase,
    restore_focus: Option<A::Element>,
    pending_close: Option<CloseReason>,
    typeahead: Typeahead,
    tolerate_detached_focusout: bool,
}

impl<A: MenuAdapter> Menu<A> {
    /// A closed menu with the default configuration.
    pub fn new(adapter: A) -> Self {
        Self::with_config(adapter, MenuConfig::default())
    }

    /// A closed menu with `config`.
    pub fn with_config(adapter: A, config: MenuConfig) -> Self {
        Self {
            adapter,
            config,
            phase: SurfacePhase::Closed,
            restore_focus: None,
            pending_close: None,
            typeahead: Typeahead::with_config(TypeaheadConfig {
                buffer_time_ms: config.typeahead_delay_ms,
            }),
            tolerate_detached_focusout: false,
        }
    }

    /// The adapter.
    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// The adapter, mutably.
    pub fn adapter_mut(&mut self) -> &mut A {
        &mut self.adapter
    }

    /// Current configuration.
    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    /// Configuration, mutably. Changes apply to the next open, close, or key.
    pub fn config_mut(&mut self) -> &mut MenuConfig {
        &mut self.config
    }

    /// Visibility phase.
    pub fn phase(&self) -> SurfacePhase {
        self.phase
    }

    /// Whether the menu is opening or open.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, SurfacePhase::Opening | SurfacePhase::Open)
    }

    /// Whether the menu currently needs document-level click notifications.
    pub fn wants_outside_clicks(&self) -> bool {
        self.is_open() && !self.config.stay_open_on_outside_click
    }

    /// The menu's typeahead controller.
    pub fn typeahead(&self) -> &Typeahead {
        &self.typeahead
    }

    /// Index of the active item.
    pub fn active_item(&self) -> Option<usize> {
        active_item(self.adapter.items(), is_item_not_disabled)
    }

    /// Make the item at `index` active and focus it.
    pub fn activate_item(&mut self, index: usize) -> Option<usize> {
        activate_item(self.adapter.items_mut(), index)
    }

    /// Open the menu. Returns `false` if it was already open.
    ///
    /// The focused element is captured here and restored on close.
    pub fn show(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.restore_focus = self.adapter.active_element();
        self.pending_close = None;
        if self.config.default_focus != DefaultFocus::None {
            deactivate_active_item(self.adapter.items_mut(), is_item_not_disabled);
        }
        debug!(quick = self.config.quick, "menu opening");
        self.adapter.emit(MenuEvent::Opening);
        if self.config.quick {
            self.finish_open();
        } else {
            self.phase = SurfacePhase::Opening;
        }
        true
    }

    /// The open or close transition ended.
    pub fn animation_finished(&mut self) {
        match self.phase {
            SurfacePhase::Opening => self.finish_open(),
            SurfacePhase::Closing => {
                let reason = self.pending_close.take().unwrap_or(CloseReason::Programmatic);
                self.finish_close(reason);
            }
            SurfacePhase::Closed | SurfacePhase::Open => {}
        }
    }

    /// Close the menu. Returns `false` if it was not open.
    pub fn close(&mut self, reason: CloseReason) -> bool {
        if !self.is_open() {
            return false;
        }
        self.typeahead.cancel();
        debug!(?reason, "menu closing");
        self.adapter.emit(MenuEvent::Closing(reason));
        let restore = self.restore_focus.take();
        if !self.config.skip_restore_focus {
            if let Some(element) = restore {
                self.adapter.focus_element(element);
            }
        }
        if self.config.quick {
            self.finish_close(reason);
        } else {
            self.phase = SurfacePhase::Closing;
            self.pending_close = Some(reason);
        }
        true
    }

    fn finish_open(&mut self) {
        self.phase = SurfacePhase::Open;
        match self.config.default_focus {
            DefaultFocus::None => {}
            DefaultFocus::ListRoot => self.adapter.focus_list_root(),
            DefaultFocus::FirstItem => {
                activate_first_item(self.adapter.items_mut(), is_item_not_disabled);
            }
            DefaultFocus::LastItem => {
                activate_last_item(self.adapter.items_mut(), is_item_not_disabled);
            }
        }
        debug!("menu opened");
        self.adapter.emit(MenuEvent::Opened);
    }

    fn finish_close(&mut self, reason: CloseReason) {
        self.phase = SurfacePhase::Closed;
        debug!(?reason, "menu closed");
        self.adapter.emit(MenuEvent::Closed(reason));
    }

    /// Choose the item at `index`.
    ///
    /// Emits [`MenuEvent::ItemSelected`] and closes the menu unless the item
    /// keeps it open. Returns the close reason if the menu closed. Disabled or
    /// missing items are ignored.
    pub fn select_item(&mut self, index: usize) -> Option<CloseReason> {
        let item = self.adapter.items().get(index)?;
        if item.is_disabled() {
            return None;
        }
        let keep_open = item.keep_open();
        trace!(index, keep_open, "menu item chosen");
        self.adapter.emit(MenuEvent::ItemSelected(index));
        if keep_open {
            return None;
        }
        self.close(CloseReason::ClickSelection)
            .then_some(CloseReason::ClickSelection)
    }

    /// Handle a keydown inside the menu.
    ///
    /// Typeahead sees the key first. Escape and Tab close the menu, Enter and
    /// Space choose the active item, and the remaining navigation keys move
    /// through the list.
    pub fn on_keydown(&mut self, event: &KeyEvent, now: u64) -> MenuKeyOutcome {
        if event.default_prevented || !self.is_open() {
            return MenuKeyOutcome::default();
        }
        self.typeahead.set_buffer_time(self.config.typeahead_delay_ms);
        let typed = self
            .typeahead
            .on_keydown(event, self.adapter.items_mut(), now);
        if typed.consumed {
            return MenuKeyOutcome {
                prevent_default: typed.prevent_default,
                ..MenuKeyOutcome::default()
            };
        }
        match event.key {
            Key::Escape | Key::Tab => {
                let reason = CloseReason::Keydown(event.key);
                MenuKeyOutcome {
                    prevent_default: event.key == Key::Escape,
                    closed: self.close(reason).then_some(reason),
                    selected: None,
                }
            }
            Key::Enter | Key::Space => {
                let Some(index) = self.active_item() else {
                    return MenuKeyOutcome::default();
                };
                MenuKeyOutcome {
                    prevent_default: true,
                    closed: self.select_item(index),
                    selected: Some(index),
                }
            }
            _ => {
                let list = ListController::vertical();
                let nav = list.on_keydown(event, self.adapter.items_mut(), is_item_not_disabled);
                MenuKeyOutcome {
                    prevent_default: nav.handled,
                    ..MenuKeyOutcome::default()
                }
            }
        }
    }

    /// Focus left the menu. Returns `true` if the menu closed.
    pub fn on_focusout(&mut self, related: RelatedTarget) -> bool {
        if !self.is_open() || self.config.stay_open_on_focusout {
            return false;
        }
        match related {
            RelatedTarget::InsideMenu => false,
            RelatedTarget::Nothing if self.tolerate_detached_focusout => false,
            RelatedTarget::Nothing | RelatedTarget::Elsewhere => self.close(CloseReason::Focusout),
        }
    }

    /// A document-level click happened. `path_contains_menu` tells whether the
    /// click's path includes the menu. Returns `true` if the menu closed.
    pub fn on_outside_click(&mut self, path_contains_menu: bool) -> bool {
        if path_contains_menu || !self.wants_outside_clicks() {
            return false;
        }
        self.close(CloseReason::OutsideClick)
    }

    /// Apply a request from a nested submenu.
    pub fn handle_signal(&mut self, signal: ParentSignal) {
        trace!(?signal, "menu signal");
        match signal {
            ParentSignal::DeactivateItems => {
                for item in self.adapter.items_mut() {
                    item.set_tab_index(-1);
                    item.set_selected(false);
                }
            }
            ParentSignal::RequestActivation(index) => {
                self.activate_item(index);
            }
            ParentSignal::SuspendTypeahead => self.typeahead.set_enabled(false),
            ParentSignal::ResumeTypeahead => self.typeahead.set_enabled(true),
            ParentSignal::StayOpenOnFocusout => self.tolerate_detached_focusout = true,
            ParentSignal::CloseOnFocusout => self.tolerate_detached_focusout = false,
        }
    }

    /// Fire due deadlines.
    pub fn advance(&mut self, now: u64) {
        self.typeahead.advance(now);
    }

    /// The next pending deadline.
    pub fn next_deadline(&self) -> Option<u64> {
        self.typeahead.next_deadline()
    }

    /// Where to place a `size`d menu against `anchor`, kept inside `viewport`.
    pub fn position(&self, anchor: Rect, size: Size, viewport: Rect) -> Point {
        let placement = Placement {
            anchor_corner: self.config.anchor_corner,
            menu_corner: self.config.menu_corner,
            direction: self.adapter.text_direction(),
        };
        position_menu(anchor, size, placement, viewport)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use alloc::vec::Vec;

    use super::*;

    #[derive(Clone, Debug)]
    pub(crate) struct TestItem {
        pub(crate) label: &'static str,
        pub(crate) disabled: bool,
        pub(crate) tab_index: i32,
        pub(crate) selected: bool,
        pub(crate) keep_open: bool,
        pub(crate) focus_count: u32,
    }

    impl ListItem for TestItem {
        fn is_disabled(&self) -> bool {
            self.disabled
        }

        fn tab_index(&self) -> i32 {
            self.tab_index
        }

        fn set_tab_index(&mut self, tab_index: i32) {
            self.tab_index = tab_index;
        }

        fn focus(&mut self) {
            self.focus_count += 1;
        }
    }

    impl TypeaheadItem for TestItem {
        fn typeahead_text(&self) -> &str {
            self.label
        }
    }

    impl MenuItem for TestItem {
        fn set_selected(&mut self, selected: bool) {
            self.selected = selected;
        }

        fn keep_open(&self) -> bool {
            self.keep_open
        }
    }

    #[derive(Debug, Default)]
    pub(crate) struct TestAdapter {
        pub(crate) items: Vec<TestItem>,
        pub(crate) active_element: Option<u32>,
        pub(crate) focused: Option<u32>,
        pub(crate) root_focus_count: u32,
        pub(crate) events: Vec<MenuEvent>,
        pub(crate) rtl: bool,
    }

    impl TestAdapter {
        pub(crate) fn with_items(labels: &[&'static str]) -> Self {
            Self {
                items: labels
                    .iter()
                    .map(|&label| TestItem {
                        label,
                        disabled: false,
                        tab_index: -1,
                        selected: false,
                        keep_open: false,
                        focus_count: 0,
                    })
                    .collect(),
                ..Self::default()
            }
        }
    }

    impl MenuAdapter for TestAdapter {
        type Element = u32;
        type Scope = ();
        type Item = TestItem;

        fn items(&self) -> &[TestItem] {
            &self.items
        }

        fn items_mut(&mut self) -> &mut [TestItem] {
            &mut self.items
        }

        fn scope(&self) -> Self::Scope {}

        fn active_element(&self) -> Option<u32> {
            self.active_element
        }

        fn focus_element(&mut self, element: u32) {
            self.focused = Some(element);
        }

        fn focus_list_root(&mut self) {
            self.root_focus_count += 1;
        }

        fn text_direction(&self) -> TextDirection {
            if self.rtl {
                TextDirection::Rtl
            } else {
                TextDirection::Ltr
            }
        }

        fn emit(&mut self, event: MenuEvent) {
            self.events.push(event);
        }
    }
}
