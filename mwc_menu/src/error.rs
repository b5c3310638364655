// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::tree::MenuId;

/// Misuse of a [`MenuTree`](crate::MenuTree).
#[derive(Copy, Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum MenuError {
    /// The id does not name a menu in this tree.
    #[error("unknown menu {0:?}")]
    UnknownMenu(MenuId),
    /// The item already opens a submenu.
    #[error("item {item} of menu {menu:?} already has a submenu")]
    DuplicateSubmenu {
        /// Menu containing the item.
        menu: MenuId,
        /// Index of the item.
        item: usize,
    },
    /// The item index is past the end of the menu.
    #[error("item {item} is out of range for menu {menu:?} with {len} items")]
    ItemOutOfRange {
        /// Menu the index was meant for.
        menu: MenuId,
        /// Offending index.
        item: usize,
        /// Number of items in the menu.
        len: usize,
    },
}
