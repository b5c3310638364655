// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! MWC Responder: typed message propagation along a parent chain.
//!
//! ## Overview
//!
//! Controllers that sit inside each other (a list inside a menu inside a submenu
//! inside another menu) talk to each other by sending messages *up* the nesting,
//! the way custom DOM events bubble. This crate provides that mechanism without a
//! DOM:
//!
//! - [`ParentLookup`](types::ParentLookup) describes the nesting.
//! - [`chain`] turns a target into a target → bubble sequence of
//!   [`Dispatch`](types::Dispatch) entries.
//! - [`dispatcher::run`] walks a sequence, calling your handler for each entry,
//!   and stops as soon as a handler returns [`Outcome::Stop`](types::Outcome::Stop).
//!
//! Stopping is explicit: a level that fully handles a message (for example, a
//! submenu closing itself on Escape) returns `Stop`, and its ancestors never see
//! the message. A level that wants the whole chain to react returns `Continue`.
//!
//! ## Example
//!
//! ```
//! use mwc_responder::chain::bubble_path;
//! use mwc_responder::dispatcher;
//! use mwc_responder::types::{Outcome, ParentLookup};
//!
//! // 3 is nested in 2, which is nested in 1.
//! struct Nesting;
//! impl ParentLookup<u32> for Nesting {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//! }
//!
//! let seq = bubble_path(3, &Nesting);
//! let mut reached = Vec::new();
//! // Level 2 handles the message; level 1 never sees it.
//! let stopped = dispatcher::run(&seq, &mut reached, |d, reached| {
//!     reached.push(d.node);
//!     if d.node == 2 { Outcome::Stop } else { Outcome::Continue }
//! });
//! assert_eq!(reached, vec![3, 2]);
//! assert_eq!(stopped.map(|d| d.node), Some(2));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod chain;
pub mod dispatcher;
pub mod types;
