// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scope-keyed registries for per-document or per-root singletons.
//!
//! A few controllers are shared by every element in a scope: one selection
//! coordinator per document (or per shadow root), one set of outside-click
//! listeners per document. [`ScopeRegistry`] is the explicit map that owns them.
//! Entries are created on first access and live until the host removes them;
//! nothing is collected implicitly.

use core::hash::Hash;

use hashbrown::HashMap;

/// Where a shared controller lives.
///
/// `R` is whatever the host uses to identify a root (for example a shadow
/// root handle).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Scope<R> {
    /// One instance for the whole document.
    Global,
    /// One instance per root.
    Root(R),
}

impl<R> Scope<R> {
    /// The scope for an element that either opts into the global scope or is
    /// narrowed to its own root.
    pub fn for_element(global: bool, root: R) -> Self {
        if global { Self::Global } else { Self::Root(root) }
    }
}

/// Get-or-create map from scope id to a shared value.
#[derive(Clone, Debug)]
pub struct ScopeRegistry<S, V> {
    entries: HashMap<S, V>,
}

impl<S: Eq + Hash, V> ScopeRegistry<S, V> {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// The value for `scope`, creating it with `create` on first access.
    ///
    /// Repeated calls for the same scope return the same instance.
    pub fn get_or_insert_with(&mut self, scope: S, create: impl FnOnce() -> V) -> &mut V {
        self.entries.entry(scope).or_insert_with(create)
    }

    /// The value for `scope`, if it has been created.
    pub fn get(&self, scope: &S) -> Option<&V> {
        self.entries.get(scope)
    }

    /// Mutable access to the value for `scope`, if it has been created.
    pub fn get_mut(&mut self, scope: &S) -> Option<&mut V> {
        self.entries.get_mut(scope)
    }

    /// Drop the value for `scope`, returning it.
    pub fn remove(&mut self, scope: &S) -> Option<V> {
        self.entries.remove(scope)
    }

    /// Whether a value exists for `scope`.
    pub fn contains(&self, scope: &S) -> bool {
        self.entries.contains_key(scope)
    }

    /// Number of live scopes.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no scope has been created yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over all live values.
    pub fn values_mut(&mut self) -> impl Iterator<Item = &mut V> {
        self.entries.values_mut()
    }
}

impl<S: Eq + Hash, V: Default> ScopeRegistry<S, V> {
    /// The value for `scope`, creating a default one on first access.
    pub fn get_or_default(&mut self, scope: S) -> &mut V {
        self.entries.entry(scope).or_default()
    }
}

impl<S: Eq + Hash, V> Default for ScopeRegistry<S, V> {
    fn default() -> Self {
        Self::new()
    }
}
