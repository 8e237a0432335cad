// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The base layout seam and a uniform single-column flow implementation.

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Insets, Rect, Size};

use crate::RawAttributes;

/// The underlying arrangement that a [`CardStackLayout`](crate::CardStackLayout) post-processes.
///
/// Implementations place items in natural document order down a single
/// column. The card stack never mutates what they return; it copies each
/// record into an [`ItemAttributes`](crate::ItemAttributes) and transforms that.
pub trait BaseLayout {
    /// Number of sections. The card stack only accepts exactly one.
    fn section_count(&self) -> usize {
        1
    }

    /// Number of items in the (single) section.
    fn item_count(&self) -> usize;

    /// Returns `true` if there are no items.
    fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Vertical gap between consecutive items.
    fn item_spacing(&self) -> f64;

    /// Total size of the laid-out content.
    fn content_size(&self) -> Size;

    /// Raw attributes of every item whose frame intersects `rect`, in index order.
    ///
    /// Frames that only touch `rect` along an edge do not intersect it.
    fn attributes_in_rect(&self, rect: Rect) -> Vec<RawAttributes>;

    /// Raw attributes of the item at `index`, or `None` if it is out of range.
    fn attributes_at(&self, index: usize) -> Option<RawAttributes>;
}

/// A [`BaseLayout`] of uniformly sized items stacked top to bottom.
///
/// Item `i` starts at `section_inset.y0 + i * (item_size.height + spacing)` and is
/// centred horizontally within the column width minus the horizontal section insets.
#[derive(Clone, Copy, Debug)]
pub struct FlowColumn {
    len: usize,
    item_size: Size,
    spacing: f64,
    width: f64,
    section_inset: Insets,
}

fn clamp_extent(extent: f64) -> f64 {
    // Finite negatives clamp to `0.0`; NaNs are left for the debug asserts.
    if extent.is_sign_negative() {
        0.0
    } else {
        extent
    }
}

impl FlowColumn {
    /// Creates a column of `len` items of `item_size`, separated by `spacing`.
    ///
    /// The column is exactly as wide as one item until [`FlowColumn::set_width`] is called.
    #[must_use]
    pub fn new(len: usize, item_size: Size, spacing: f64) -> Self {
        let item_size = Size::new(clamp_extent(item_size.width), clamp_extent(item_size.height));
        Self {
            len,
            item_size,
            spacing: clamp_extent(spacing),
            width: item_size.width,
            section_inset: Insets::ZERO,
        }
    }

    /// Returns this column with the given section inset.
    #[must_use]
    pub fn with_section_inset(mut self, section_inset: Insets) -> Self {
        self.section_inset = section_inset;
        self
    }

    /// Sets the number of items.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
    }

    /// Sets the size shared by all items.
    pub fn set_item_size(&mut self, item_size: Size) {
        debug_assert!(
            item_size.is_finite(),
            "FlowColumn item sizes must be finite; got {item_size:?}"
        );
        self.item_size = Size::new(clamp_extent(item_size.width), clamp_extent(item_size.height));
    }

    /// Returns the size shared by all items.
    #[must_use]
    pub const fn item_size(&self) -> Size {
        self.item_size
    }

    /// Sets the vertical gap between items.
    pub fn set_spacing(&mut self, spacing: f64) {
        debug_assert!(
            spacing.is_finite(),
            "FlowColumn spacing must be finite; got {spacing:?}"
        );
        self.spacing = clamp_extent(spacing);
    }

    /// Sets the width of the column, usually the width of the host container.
    pub fn set_width(&mut self, width: f64) {
        debug_assert!(
            width.is_finite(),
            "FlowColumn width must be finite; got {width:?}"
        );
        self.width = clamp_extent(width);
    }

    fn stride(&self) -> f64 {
        self.item_size.height + self.spacing
    }

    fn frame_of(&self, index: usize) -> Rect {
        let inner_width = self.width - self.section_inset.x0 - self.section_inset.x1;
        let x = self.section_inset.x0 + (inner_width - self.item_size.width) / 2.0;
        let y = self.section_inset.y0 + index as f64 * self.stride();
        Rect::from_origin_size((x, y), self.item_size)
    }

    /// Index of the item whose slot starts at or before `offset`, clamped to `0..len`.
    fn index_at_offset(&self, offset: f64) -> usize {
        let stride = self.stride();
        if self.len == 0 || stride <= 0.0 {
            return 0;
        }
        let ratio = (offset - self.section_inset.y0) / stride;
        #[allow(
            clippy::cast_possible_truncation,
            reason = "Index is clamped to bounds immediately after the cast"
        )]
        let i = ratio.floor() as isize;
        i.clamp(0, self.len as isize - 1) as usize
    }
}

impl BaseLayout for FlowColumn {
    fn item_count(&self) -> usize {
        self.len
    }

    fn item_spacing(&self) -> f64 {
        self.spacing
    }

    fn content_size(&self) -> Size {
        let items = if self.len == 0 {
            0.0
        } else {
            self.len as f64 * self.stride() - self.spacing
        };
        Size::new(
            self.width,
            self.section_inset.y0 + items + self.section_inset.y1,
        )
    }

    fn attributes_in_rect(&self, rect: Rect) -> Vec<RawAttributes> {
        let mut out = Vec::new();
        if self.len == 0 || self.item_size.height <= 0.0 {
            return out;
        }
        let column = self.frame_of(0);
        if column.x1 <= rect.x0 || column.x0 >= rect.x1 {
            return out;
        }
        let mut index = self.index_at_offset(rect.y0);
        while index < self.len {
            let frame = self.frame_of(index);
            if frame.y0 >= rect.y1 {
                break;
            }
            // Skip a slot whose item ends in the spacing gap above `rect`.
            if frame.y1 > rect.y0 {
                out.push(RawAttributes::new(index, frame, 0));
            }
            index += 1;
        }
        out
    }

    fn attributes_at(&self, index: usize) -> Option<RawAttributes> {
        // Collapsed items are never reported, matching the rect query.
        (index < self.len && self.item_size.height > 0.0)
            .then(|| RawAttributes::new(index, self.frame_of(index), 0))
    }
}
