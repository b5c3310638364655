// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Anchor positioning.
//!
//! A menu is placed by pinning one of its corners to one of its anchor's corners.
//! Corners are named block side first, then inline side, so
//! [`Corner::EndStart`] is the bottom-left corner in a left-to-right layout and
//! the bottom-right corner in a right-to-left one.

use kurbo::{Point, Rect, Size};
use mwc_event_state::TextDirection;

/// A logical corner of a box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    /// Block start, inline start.
    StartStart,
    /// Block start, inline end.
    StartEnd,
    /// Block end, inline start.
    EndStart,
    /// Block end, inline end.
    EndEnd,
}

impl Corner {
    fn from_sides(block_end: bool, inline_end: bool) -> Self {
        match (block_end, inline_end) {
            (false, false) => Self::StartStart,
            (false, true) => Self::StartEnd,
            (true, false) => Self::EndStart,
            (true, true) => Self::EndEnd,
        }
    }

    /// Whether the corner is on the block-end (bottom) side.
    pub fn is_block_end(self) -> bool {
        matches!(self, Self::EndStart | Self::EndEnd)
    }

    /// Whether the corner is on the inline-end side.
    pub fn is_inline_end(self) -> bool {
        matches!(self, Self::StartEnd | Self::EndEnd)
    }

    /// The corner on the opposite block side.
    #[must_use]
    pub fn flip_block(self) -> Self {
        Self::from_sides(!self.is_block_end(), self.is_inline_end())
    }

    /// The corner on the opposite inline side.
    #[must_use]
    pub fn flip_inline(self) -> Self {
        Self::from_sides(self.is_block_end(), !self.is_inline_end())
    }
}

/// Which corners meet, and in which text direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Placement {
    /// Corner of the anchor the menu attaches to.
    pub anchor_corner: Corner,
    /// Corner of the menu pinned to the anchor.
    pub menu_corner: Corner,
    /// Text direction used to resolve inline sides.
    pub direction: TextDirection,
}

impl Placement {
    fn flip_block(self) -> Self {
        Self {
            anchor_corner: self.anchor_corner.flip_block(),
            menu_corner: self.menu_corner.flip_block(),
            ..self
        }
    }

    fn flip_inline(self) -> Self {
        Self {
            anchor_corner: self.anchor_corner.flip_inline(),
            menu_corner: self.menu_corner.flip_inline(),
            ..self
        }
    }
}

/// Top-left position of a `menu`-sized box with `placement` against `anchor`.
pub fn menu_origin(anchor: Rect, menu: Size, placement: Placement) -> Point {
    let rtl = placement.direction.is_rtl();
    let anchor_x = if placement.anchor_corner.is_inline_end() != rtl {
        anchor.x1
    } else {
        anchor.x0
    };
    let anchor_y = if placement.anchor_corner.is_block_end() {
        anchor.y1
    } else {
        anchor.y0
    };
    let x = if placement.menu_corner.is_inline_end() != rtl {
        anchor_x - menu.width
    } else {
        anchor_x
    };
    let y = if placement.menu_corner.is_block_end() {
        anchor_y - menu.height
    } else {
        anchor_y
    };
    Point::new(x, y)
}

/// Like [`menu_origin`], but flips to the opposite side on an axis where the
/// menu would leave `viewport` and the flipped position overflows less.
pub fn position_menu(anchor: Rect, menu: Size, placement: Placement, viewport: Rect) -> Point {
    let origin = menu_origin(anchor, menu, placement);
    let mut x = origin.x;
    let mut y = origin.y;

    let block = |y: f64| overflow(y, menu.height, viewport.y0, viewport.y1);
    if block(y) > 0.0 {
        let flipped = menu_origin(anchor, menu, placement.flip_block()).y;
        if block(flipped) < block(y) {
            y = flipped;
        }
    }

    let inline = |x: f64| overflow(x, menu.width, viewport.x0, viewport.x1);
    if inline(x) > 0.0 {
        let flipped = menu_origin(anchor, menu, placement.flip_inline()).x;
        if inline(flipped) < inline(x) {
            x = flipped;
        }
    }
    Point::new(x, y)
}

fn overflow(start: f64, extent: f64, low: f64, high: f64) -> f64 {
    (low - start).max(0.0) + (start + extent - high).max(0.0)
}
