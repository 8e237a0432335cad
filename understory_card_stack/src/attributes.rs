// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-item layout attributes: the base layout's input and the card stack's output.

use kurbo::{Affine, Rect};

/// Attributes of one item as produced by the [`BaseLayout`](crate::BaseLayout).
///
/// This is the read-only input of the card stack transform. The base layout
/// keeps ownership of its own records; the card stack only ever reads them
/// and builds a fresh [`ItemAttributes`] from them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RawAttributes {
    index: usize,
    frame: Rect,
    z_index: i32,
}

impl RawAttributes {
    /// Creates raw attributes for the item at `index`.
    #[must_use]
    pub const fn new(index: usize, frame: Rect, z_index: i32) -> Self {
        Self {
            index,
            frame,
            z_index,
        }
    }

    /// Row of the item within the single section.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Frame assigned by the base layout, in content coordinates.
    #[must_use]
    pub const fn frame(&self) -> Rect {
        self.frame
    }

    /// Stacking index assigned by the base layout.
    #[must_use]
    pub const fn z_index(&self) -> i32 {
        self.z_index
    }
}

/// Attributes of one card after the stack transform, owned by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemAttributes {
    /// Row of the item within the single section.
    pub index: usize,
    /// Final frame, in content coordinates.
    pub frame: Rect,
    /// Transform applied around the frame's centre when rendering.
    pub transform: Affine,
    /// Stacking index. Higher is drawn on top.
    pub z_index: i32,
}

impl From<&RawAttributes> for ItemAttributes {
    fn from(raw: &RawAttributes) -> Self {
        Self {
            index: raw.index,
            frame: raw.frame,
            transform: Affine::IDENTITY,
            z_index: raw.z_index,
        }
    }
}
