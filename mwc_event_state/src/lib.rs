// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Event State: the low-level interaction state shared by Material controllers.
//!
//! This crate holds the pieces every other controller in the workspace builds on:
//!
//! - [`input`]: a small, framework-neutral vocabulary for pointer and key events
//!   ([`PointerEvent`], [`KeyEvent`], [`Key`], [`Modifiers`]) and for
//!   [`TextDirection`], which several controllers consult to mirror arrow keys.
//! - [`timer`]: [`Timer`], a cancellable one-shot deadline. Controllers never own a
//!   clock; they arm deadlines from event timestamps and fire them from an
//!   `advance(now)` call made by the host.
//! - [`scope`]: [`ScopeRegistry`], an explicit get-or-create map keyed by an opaque
//!   scope id, for the few process-wide singletons (selection groups, outside-click
//!   listeners) that are shared per document or per root.
//! - [`press`]: [`PressController`], which folds pointer, touch, mouse and synthetic
//!   click input into one `begin_press` / `end_press` contract.
//!
//! ## Time
//!
//! All timestamps are milliseconds on a caller-chosen monotonic clock. A host wires
//! controllers to its event loop like this:
//!
//! 1. Forward input events (each carrying its own `time`).
//! 2. After each call, ask the controller for `next_deadline()` and schedule a
//!    wake-up for that instant.
//! 3. On wake-up, call `advance(now)`.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::Point;
//! use mwc_event_state::press::{PressAdapter, PressController, PressEnd};
//! use mwc_event_state::PointerEvent;
//!
//! #[derive(Default)]
//! struct Button { presses: u32, completed: u32 }
//!
//! impl PressAdapter for Button {
//!     type ActionData = ();
//!     fn begin_press(&mut self, _origin: Option<&PointerEvent>) { self.presses += 1; }
//!     fn end_press(&mut self, end: PressEnd<()>) {
//!         if !end.cancelled { self.completed += 1; }
//!     }
//! }
//!
//! let mut press = PressController::new(Button::default());
//!
//! // A touch tap: down, then up 50ms later (before the 150ms touch delay).
//! press.on_pointer_down(&PointerEvent::touch(Point::new(4.0, 4.0), 0));
//! press.on_pointer_up(&PointerEvent::touch(Point::new(4.0, 4.0), 50));
//! assert_eq!(press.adapter().presses, 1);
//!
//! // The synthetic click that follows a touch ends the press.
//! press.on_click(None);
//! assert_eq!(press.adapter().completed, 1);
//! assert_eq!(press.next_deadline(), None);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//! - `serde`: derives `Serialize`/`Deserialize` for configuration and input enums.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod input;
pub mod press;
pub mod scope;
pub mod timer;

pub use input::{
    Button, Key, KeyEvent, Modifiers, PRIMARY_BUTTON, PointerEvent, PointerId, PointerKind,
    TextDirection,
};
pub use scope::{Scope, ScopeRegistry};
pub use timer::Timer;
