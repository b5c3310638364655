// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Menu: menu surfaces and nested submenus.
//!
//! - [`Menu`] is one surface: it opens and closes (with or without a transition),
//!   captures and restores focus, resolves its default focus, and handles keys
//!   with typeahead first and list navigation second.
//! - [`MenuTree`] nests menus. It opens submenus from trigger items on hover,
//!   click or the keyboard, keeps a parent's typeahead quiet while a child is
//!   open, and decides how far a close travels up the chain.
//! - [`corner`] places a menu against its anchor by logical corners, mirrored in
//!   right-to-left layouts and flipped when the viewport is too small.
//!
//! Menus talk to their host through a [`MenuAdapter`]. Time is supplied by the
//! caller in milliseconds; call [`MenuTree::advance`] at
//! [`MenuTree::next_deadline`] to fire hover and typeahead timers.
//!
//! ## Example
//!
//! ```rust
//! use mwc_event_state::{Key, KeyEvent};
//! use mwc_focus::ListItem;
//! use mwc_menu::{Menu, MenuAdapter, MenuConfig, MenuItem, MenuTree, SubMenuConfig};
//! use mwc_typeahead::TypeaheadItem;
//!
//! struct Entry { label: &'static str, tab_index: i32 }
//!
//! impl ListItem for Entry {
//!     fn is_disabled(&self) -> bool { false }
//!     fn tab_index(&self) -> i32 { self.tab_index }
//!     fn set_tab_index(&mut self, tab_index: i32) { self.tab_index = tab_index; }
//!     fn focus(&mut self) {}
//! }
//! impl TypeaheadItem for Entry {
//!     fn typeahead_text(&self) -> &str { self.label }
//! }
//! impl MenuItem for Entry {}
//!
//! struct Host { items: Vec<Entry> }
//!
//! impl MenuAdapter for Host {
//!     type Element = u32;
//!     type Scope = ();
//!     type Item = Entry;
//!     fn items(&self) -> &[Entry] { &self.items }
//!     fn items_mut(&mut self) -> &mut [Entry] { &mut self.items }
//!     fn scope(&self) -> Self::Scope {}
//! }
//!
//! fn host(labels: &[&'static str]) -> Host {
//!     Host { items: labels.iter().map(|&label| Entry { label, tab_index: -1 }).collect() }
//! }
//!
//! let quick = MenuConfig { quick: true, ..MenuConfig::default() };
//! let mut tree = MenuTree::new();
//! let file = tree.add_root(Menu::with_config(host(&["Open", "Recent"]), quick));
//! let recent = tree
//!     .add_submenu(file, 1, Menu::new(host(&["a.txt", "b.txt"])), SubMenuConfig::default())
//!     .unwrap();
//!
//! tree.show(file).unwrap();
//! tree.keydown(file, &KeyEvent::new(Key::ArrowDown), 0).unwrap();
//! tree.keydown(file, &KeyEvent::new(Key::ArrowRight), 0).unwrap();
//! assert!(tree.is_open(recent));
//!
//! // Escape closes only the submenu and hands focus back to "Recent".
//! tree.keydown(recent, &KeyEvent::new(Key::Escape), 0).unwrap();
//! assert!(!tree.is_open(recent));
//! assert_eq!(tree.menu(file).unwrap().active_item(), Some(1));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod corner;
mod error;
mod menu;
mod outside_click;
mod tree;

pub use corner::{Corner, Placement};
pub use error::MenuError;
pub use menu::{
    CloseReason, DEFAULT_TYPEAHEAD_DELAY_MS, DefaultFocus, Menu, MenuAdapter, MenuConfig,
    MenuEvent, MenuItem, MenuKeyOutcome, NoItem, NoopMenuAdapter, ParentSignal, RelatedTarget,
    SurfacePhase,
};
pub use outside_click::OutsideClickListeners;
pub use tree::{DEFAULT_HOVER_DELAY_MS, MenuId, MenuTree, SubMenuConfig};
