// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Typeahead: type-to-search over a roving-tabindex list.
//!
//! [`Typeahead`] turns printable keystrokes into a short-lived search buffer and
//! activates the first item whose label starts with it. The active item is the
//! one holding tab index `0`, the same marker [`mwc_focus`] uses, so typeahead and
//! arrow-key navigation share one notion of "where the user is".
//!
//! ## Session lifecycle
//!
//! - A session begins on a character key. Space, Enter, Escape and the arrows are
//!   navigation keys and never begin a session.
//! - On begin, every item's label is snapshotted (trimmed, lowercased) and the
//!   active item is dimmed (tab index `-1`) while its position is remembered.
//! - Each keystroke appends to the buffer and re-arms the expiry deadline. When
//!   the deadline passes, [`Typeahead::advance`] ends the session.
//! - Enter, Escape, Tab, Home, End or an arrow ends the session at once; the
//!   caller then handles the key as usual.
//! - A keystroke that matches nothing ends the session and gives the remembered
//!   item its marker back without moving focus.
//!
//! ## Matching
//!
//! Matches are enabled items whose label starts with the buffer, ordered by how
//! far *ahead* of the remembered item they sit (wrapping around the end). A fresh
//! one-character query whose best match is the remembered item advances to the
//! next match instead, so pressing `o` repeatedly cycles through every item
//! starting with "o".
//!
//! ## Example
//!
//! ```rust
//! use mwc_event_state::KeyEvent;
//! use mwc_focus::ListItem;
//! use mwc_typeahead::{Typeahead, TypeaheadItem};
//!
//! struct Fruit { label: &'static str, tab_index: i32 }
//!
//! impl ListItem for Fruit {
//!     fn is_disabled(&self) -> bool { false }
//!     fn tab_index(&self) -> i32 { self.tab_index }
//!     fn set_tab_index(&mut self, tab_index: i32) { self.tab_index = tab_index; }
//!     fn focus(&mut self) {}
//! }
//!
//! impl TypeaheadItem for Fruit {
//!     fn typeahead_text(&self) -> &str { self.label }
//! }
//!
//! let mut fruit: Vec<Fruit> = ["Apple", "Banana", "Cherry"]
//!     .into_iter()
//!     .map(|label| Fruit { label, tab_index: -1 })
//!     .collect();
//!
//! let mut typeahead = Typeahead::new();
//! let outcome = typeahead.on_keydown(&KeyEvent::character('b'), &mut fruit, 0);
//! assert_eq!(outcome.selected, Some(1));
//! assert_eq!(fruit[1].tab_index, 0);
//!
//! // The buffer expires after the configured delay.
//! assert!(typeahead.advance(typeahead.next_deadline().unwrap()));
//! assert!(!typeahead.is_typing_ahead());
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use mwc_event_state::{Key, KeyEvent, Timer};
use mwc_focus::{ListItem, activate_item};
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Default time a typeahead buffer survives without a keystroke, in milliseconds.
pub const DEFAULT_BUFFER_TIME_MS: u64 = 50;

/// A list entry that can be found by typing its label.
pub trait TypeaheadItem: ListItem {
    /// Text matched against the buffer. Leading and trailing whitespace is ignored.
    fn typeahead_text(&self) -> &str;
}

/// Tuning for [`Typeahead`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TypeaheadConfig {
    /// How long the buffer survives without a keystroke.
    pub buffer_time_ms: u64,
}

impl Default for TypeaheadConfig {
    fn default() -> Self {
        Self {
            buffer_time_ms: DEFAULT_BUFFER_TIME_MS,
        }
    }
}

/// Result of [`Typeahead::on_keydown`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TypeaheadOutcome {
    /// The key was taken as typeahead input.
    pub consumed: bool,
    /// The caller should prevent the key's default action.
    pub prevent_default: bool,
    /// Index of the item this keystroke activated.
    pub selected: Option<usize>,
}

#[derive(Clone, Debug)]
struct Record {
    index: usize,
    text: String,
}

/// Typeahead state for one list.
#[derive(Clone, Debug)]
pub struct Typeahead {
    config: TypeaheadConfig,
    enabled: bool,
    typing: bool,
    buffer: String,
    records: Vec<Record>,
    last_active: Option<usize>,
    expiry: Timer,
}

impl Default for Typeahead {
    fn default() -> Self {
        Self::new()
    }
}

impl Typeahead {
    /// An enabled controller with the default buffer time.
    pub fn new() -> Self {
        Self::with_config(TypeaheadConfig::default())
    }

    /// An enabled controller with `config`.
    pub fn with_config(config: TypeaheadConfig) -> Self {
        Self {
            config,
            enabled: true,
            typing: false,
            buffer: String::new(),
            records: Vec::new(),
            last_active: None,
            expiry: Timer::new(),
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &TypeaheadConfig {
        &self.config
    }

    /// Change the buffer time; takes effect on the next keystroke.
    pub fn set_buffer_time(&mut self, buffer_time_ms: u64) {
        self.config.buffer_time_ms = buffer_time_ms;
    }

    /// Whether keystrokes are being interpreted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Suspend or resume the controller. Suspending ends any running session.
    pub fn set_enabled(&mut self, enabled: bool) {
        if !enabled && self.typing {
            self.finish();
        }
        self.enabled = enabled;
    }

    /// Whether a session is running.
    pub fn is_typing_ahead(&self) -> bool {
        self.typing
    }

    /// The lowercased keystrokes of the running session.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// When the running session expires.
    pub fn next_deadline(&self) -> Option<u64> {
        self.expiry.deadline()
    }

    /// Expire the session if its deadline has passed. Returns `true` if a session
    /// ended.
    pub fn advance(&mut self, now: u64) -> bool {
        if self.expiry.take_due(now) && self.typing {
            self.finish();
            true
        } else {
            false
        }
    }

    /// End any running session immediately.
    pub fn cancel(&mut self) {
        if self.typing {
            self.finish();
        }
    }

    /// Feed a keydown.
    pub fn on_keydown<T: TypeaheadItem>(
        &mut self,
        event: &KeyEvent,
        items: &mut [T],
        now: u64,
    ) -> TypeaheadOutcome {
        if !self.enabled || event.default_prevented || event.has_shortcut_modifier() {
            return TypeaheadOutcome::default();
        }
        if self.typing {
            self.continue_session(event, items, now)
        } else {
            self.begin(event, items, now)
        }
    }

    fn begin<T: TypeaheadItem>(
        &mut self,
        event: &KeyEvent,
        items: &mut [T],
        now: u64,
    ) -> TypeaheadOutcome {
        if !matches!(event.key, Key::Character(_)) {
            return TypeaheadOutcome::default();
        }
        self.typing = true;
        self.records = items
            .iter()
            .enumerate()
            .map(|(index, item)| Record {
                index,
                text: item.typeahead_text().trim().to_lowercase(),
            })
            .collect();
        self.last_active = items.iter().position(|item| item.tab_index() == 0);
        if let Some(index) = self.last_active {
            items[index].set_tab_index(-1);
        }
        debug!(
            records = self.records.len(),
            last_active = ?self.last_active,
            "typeahead session started"
        );
        self.search(event, items, now)
    }

    fn continue_session<T: TypeaheadItem>(
        &mut self,
        event: &KeyEvent,
        items: &mut [T],
        now: u64,
    ) -> TypeaheadOutcome {
        match event.key {
            Key::Character(_) | Key::Space => self.search(event, items, now),
            Key::Enter | Key::Escape | Key::Tab | Key::Home | Key::End => {
                self.finish();
                TypeaheadOutcome::default()
            }
            key if key.is_arrow() => {
                self.finish();
                TypeaheadOutcome::default()
            }
            _ => TypeaheadOutcome::default(),
        }
    }

    fn search<T: TypeaheadItem>(
        &mut self,
        event: &KeyEvent,
        items: &mut [T],
        now: u64,
    ) -> TypeaheadOutcome {
        let prevent_default = event.key == Key::Space;
        match event.key {
            Key::Character(c) => self.buffer.extend(c.to_lowercase()),
            Key::Space => self.buffer.push(' '),
            _ => {}
        }
        self.expiry.schedule(now, self.config.buffer_time_ms);

        let count = self.records.len();
        let last_active = self.last_active;
        let ahead_of_active = |index: usize| match last_active {
            Some(active) => (index + count - active) % count,
            None => index,
        };
        let mut matches: SmallVec<[usize; 8]> = self
            .records
            .iter()
            .filter(|record| record.text.starts_with(self.buffer.as_str()))
            .filter(|record| items.get(record.index).is_some_and(|item| !item.is_disabled()))
            .map(|record| record.index)
            .collect();
        matches.sort_unstable_by_key(|&index| ahead_of_active(index));

        let Some(&best) = matches.first() else {
            trace!(buffer = %self.buffer, "typeahead found no match");
            if let Some(item) = last_active.and_then(|index| items.get_mut(index)) {
                item.set_tab_index(0);
            }
            self.finish();
            return TypeaheadOutcome {
                consumed: true,
                prevent_default,
                selected: None,
            };
        };
        let fresh_query = self.buffer.chars().count() == 1;
        let next = if fresh_query && Some(best) == last_active {
            matches.get(1).copied().unwrap_or(best)
        } else {
            best
        };
        trace!(buffer = %self.buffer, next, "typeahead match");
        self.last_active = Some(next);
        TypeaheadOutcome {
            consumed: true,
            prevent_default,
            selected: activate_item(items, next),
        }
    }

    fn finish(&mut self) {
        self.expiry.cancel();
        self.typing = false;
        self.buffer.clear();
        self.records.clear();
        debug!(last_active = ?self.last_active, "typeahead session ended");
    }
}
