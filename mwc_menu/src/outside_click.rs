// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Document-level click listeners for closing open menus.

use core::hash::Hash;

use mwc_event_state::ScopeRegistry;
use smallvec::SmallVec;

/// Which menus listen for clicks in each scope.
///
/// A menu listens only while it is open. Listening twice is a no-op, so a
/// host that re-runs its wiring does not close a menu twice for one click.
/// A scope's entry is dropped when its last listener leaves.
#[derive(Clone, Debug)]
pub struct OutsideClickListeners<S, M> {
    scopes: ScopeRegistry<S, SmallVec<[M; 4]>>,
}

impl<S: Eq + Hash, M: Copy + Eq> Default for OutsideClickListeners<S, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Eq + Hash, M: Copy + Eq> OutsideClickListeners<S, M> {
    /// No listeners.
    pub fn new() -> Self {
        Self {
            scopes: ScopeRegistry::new(),
        }
    }

    /// Start listening for `menu` in `scope`. Returns `true` if it was not
    /// already listening.
    pub fn listen(&mut self, scope: S, menu: M) -> bool {
        let menus = self.scopes.get_or_insert_with(scope, SmallVec::new);
        if menus.contains(&menu) {
            return false;
        }
        menus.push(menu);
        true
    }

    /// Stop listening for `menu` in `scope`. Returns `true` if it was listening.
    pub fn unlisten(&mut self, scope: &S, menu: M) -> bool {
        let Some(menus) = self.scopes.get_mut(scope) else {
            return false;
        };
        let before = menus.len();
        menus.retain(|listening| *listening != menu);
        let removed = menus.len() != before;
        if menus.is_empty() {
            self.scopes.remove(scope);
        }
        removed
    }

    /// Menus listening in `scope`, in the order they started listening.
    pub fn listeners(&self, scope: &S) -> &[M] {
        match self.scopes.get(scope) {
            Some(menus) => menus,
            None => &[],
        }
    }

    /// Whether `menu` listens in `scope`.
    pub fn is_listening(&self, scope: &S, menu: M) -> bool {
        self.listeners(scope).contains(&menu)
    }

    /// Number of scopes with at least one listener.
    pub fn scope_count(&self) -> usize {
        self.scopes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listening_is_idempotent() {
        let mut listeners: OutsideClickListeners<u8, u32> = OutsideClickListeners::new();
        assert!(listeners.listen(0, 1));
        assert!(!listeners.listen(0, 1));
        assert_eq!(listeners.listeners(&0), &[1]);
    }

    #[test]
    fn scopes_are_independent_and_dropped_when_empty() {
        let mut listeners: OutsideClickListeners<u8, u32> = OutsideClickListeners::new();
        listeners.listen(0, 1);
        listeners.listen(1, 1);
        listeners.listen(1, 2);
        assert_eq!(listeners.scope_count(), 2);

        assert!(listeners.unlisten(&0, 1));
        assert!(!listeners.unlisten(&0, 1));
        assert_eq!(listeners.scope_count(), 1);
        assert!(listeners.is_listening(&1, 2));
        assert!(listeners.listeners(&0).is_empty());
    }
}
