// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build propagation sequences from a [`ParentLookup`].
//!
//! Paths are reconstructed by walking `parent_of` until a root is reached. A
//! lookup that loops back onto a node already on the path is cut at that point,
//! so a malformed nesting yields a short path rather than an endless one.

use alloc::vec::Vec;

use smallvec::SmallVec;

use crate::types::{Dispatch, ParentLookup};

/// Nodes from `target` up to its root, target first.
pub fn path_to_root<K, P>(target: K, lookup: &P) -> SmallVec<[K; 8]>
where
    K: Copy + Eq,
    P: ParentLookup<K> + ?Sized,
{
    let mut path: SmallVec<[K; 8]> = SmallVec::new();
    path.push(target);
    let mut current = target;
    while let Some(parent) = lookup.parent_of(&current) {
        if path.contains(&parent) {
            break;
        }
        path.push(parent);
        current = parent;
    }
    path
}

/// Target step followed by bubble steps for each ancestor, innermost first.
///
/// This is the shape of a message that a nested controller sends to the
/// controllers that contain it.
pub fn bubble_path<K, P>(target: K, lookup: &P) -> Vec<Dispatch<K>>
where
    K: Copy + Eq,
    P: ParentLookup<K> + ?Sized,
{
    let path = path_to_root(target, lookup);
    let mut seq = Vec::with_capacity(path.len());
    seq.push(Dispatch::target(target));
    seq.extend(path.iter().skip(1).map(|&node| Dispatch::bubble(node)));
    seq
}
