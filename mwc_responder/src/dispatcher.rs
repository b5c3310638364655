// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a propagation sequence and honor stop outcomes.
//!
//! The dispatcher executes a handler for each step in a sequence built by
//! [`chain`](crate::chain) and applies one rule:
//!
//! - [`Outcome::Stop`] aborts propagation immediately; later steps are skipped.
//!
//! Anything richer ("handled", "default prevented", which level closed) lives on
//! the message value you pass to [`run`], not in [`Outcome`].
//!
//! ## Example: record which levels reacted
//!
//! ```
//! use mwc_responder::dispatcher;
//! use mwc_responder::types::{Dispatch, Outcome, Phase};
//!
//! #[derive(Default)]
//! struct Close {
//!     closed: Vec<u32>,
//!     isolated: bool,
//! }
//!
//! let seq = vec![Dispatch::target(3), Dispatch::bubble(2), Dispatch::bubble(1)];
//!
//! let mut msg = Close { isolated: true, ..Close::default() };
//! let stopped = dispatcher::run(&seq, &mut msg, |d, msg| {
//!     match d.phase {
//!         Phase::Target => {
//!             msg.closed.push(d.node);
//!             Outcome::Continue
//!         }
//!         // The first ancestor absorbs an isolated close.
//!         _ if msg.isolated => Outcome::Stop,
//!         _ => {
//!             msg.closed.push(d.node);
//!             Outcome::Continue
//!         }
//!     }
//! });
//!
//! assert_eq!(msg.closed, vec![3]);
//! assert_eq!(stopped.map(|d| d.node), Some(2));
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a propagation sequence and honor stop outcomes.
///
/// - `seq`: a target step followed by bubble steps, as produced by
///   [`chain::bubble_path`](crate::chain::bubble_path).
/// - `message`: a mutable payload carried across handler calls.
/// - `handler`: per-step callback; its [`Outcome`] controls propagation.
///
/// Returns `None` if every step was visited, or `Some(step)` with the step whose
/// handler returned [`Outcome::Stop`].
pub fn run<'a, K, M>(
    seq: &'a [Dispatch<K>],
    message: &mut M,
    mut handler: impl FnMut(&Dispatch<K>, &mut M) -> Outcome,
) -> Option<&'a Dispatch<K>> {
    for d in seq {
        match handler(d, message) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
