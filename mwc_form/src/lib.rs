// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Form: form association for custom controls.
//!
//! A form reads a control's value synchronously, at submit time or whenever
//! script builds a [`FormData`]. A [`FormBridge`] therefore pushes a control's
//! [`FormValue`] and saved state to its [`FormInternals`] inside every mutation
//! it observes: `name` and `disabled` setters, attribute changes, and
//! [`FormBridge::update`] closures. Nothing is deferred.
//!
//! The bridge also drives the two lifecycle callbacks a form sends back:
//!
//! - [`FormBridge::form_reset`] returns the control to its attribute-declared
//!   default, not to whatever value it last had.
//! - [`FormBridge::form_state_restore`] hands text and file states to the
//!   control's primitive restore path and entry lists to its entry path. A
//!   control without the matching path reports [`FormError::UnsupportedState`].
//!
//! ```rust
//! use mwc_form::{FormBridge, FormData, FormEntryValue, FormValue, InMemoryInternals, TextFieldControl};
//!
//! let mut email = FormBridge::new(TextFieldControl::new(), InMemoryInternals::new());
//! email.set_name(Some("email"));
//! email.connect();
//!
//! email.update(|field| field.set_value("ada@example.com"));
//! assert_eq!(email.internals().value(), Some(&FormValue::text("ada@example.com")));
//!
//! let mut data = FormData::new();
//! email.append_to(&mut data);
//! assert_eq!(data.get("email"), Some(&FormEntryValue::Text("ada@example.com".into())));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bridge;
mod controls;
mod error;
mod internals;
mod value;

pub use bridge::{FormAssociated, FormBridge, collect_form_data};
pub use controls::{CheckboxControl, SliderControl, TextFieldControl};
pub use error::FormError;
pub use internals::{FormInternals, InMemoryInternals, NoopInternals};
pub use value::{FileHandle, FormData, FormEntry, FormEntryValue, FormValue, StateShape};
