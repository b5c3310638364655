// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types: phases, outcomes, dispatch entries, and parent lookup.

/// Propagation phase of a dispatch entry.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// At the node the message was sent from.
    Target,
    /// Target → root, after the target handled the message.
    Bubble,
}

/// Handler result controlling propagation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Keep propagating.
    Continue,
    /// Stop here; later entries are not visited.
    Stop,
}

/// One step of a propagation sequence.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Dispatch<K> {
    /// Phase of this step.
    pub phase: Phase,
    /// Node visited at this step.
    pub node: K,
}

impl<K> Dispatch<K> {
    /// A target-phase step.
    pub fn target(node: K) -> Self {
        Self {
            phase: Phase::Target,
            node,
        }
    }

    /// A bubble-phase step.
    pub fn bubble(node: K) -> Self {
        Self {
            phase: Phase::Bubble,
            node,
        }
    }
}

/// Describes how nodes nest.
pub trait ParentLookup<K> {
    /// The node that contains `node`, or `None` at a root.
    fn parent_of(&self, node: &K) -> Option<K>;
}

/// A lookup where every node is a root.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoParent;

impl<K> ParentLookup<K> for NoParent {
    fn parent_of(&self, _node: &K) -> Option<K> {
        None
    }
}
