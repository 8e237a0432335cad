// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live scroll state of the host container.

use kurbo::{Insets, Point, Rect, Size};

/// Snapshot of the scroll container hosting the card stack.
///
/// Hosts hand a fresh snapshot to
/// [`CardStackLayout::set_scroll_state`](crate::CardStackLayout::set_scroll_state)
/// whenever the container scrolls or resizes. The layout never writes back to
/// it: paging corrections are returned, and applying them is up to the host.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollState {
    /// Content offset, i.e. the origin of the container's bounds.
    pub offset: Point,
    /// Size of the container's viewport.
    pub viewport: Size,
    /// Content inset. `x0` is the left inset and `y0` the top inset.
    pub content_inset: Insets,
    /// Whether the container's own paging is turned on.
    ///
    /// Must be `false` while attached to a card stack.
    pub native_paging: bool,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self {
            offset: Point::ZERO,
            viewport: Size::ZERO,
            content_inset: Insets::ZERO,
            native_paging: false,
        }
    }
}

impl ScrollState {
    /// Creates a scroll state with no inset and native paging off.
    #[must_use]
    pub fn new(offset: Point, viewport: Size) -> Self {
        Self {
            offset,
            viewport,
            ..Self::default()
        }
    }

    /// Returns this state with the given content inset.
    #[must_use]
    pub fn with_content_inset(mut self, content_inset: Insets) -> Self {
        self.content_inset = content_inset;
        self
    }

    /// Visible bounds of the container in content coordinates.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(self.offset, self.viewport)
    }

    /// Top edge of the visible viewport, below the top inset.
    #[must_use]
    pub fn visible_top(&self) -> f64 {
        self.bounds().y0 + self.content_inset.y0
    }
}
