// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapping flings to whole cards.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::{Point, Vec2};

use crate::{CardStackConfig, ScrollState};

/// Factor applied to the release velocity before counting flicked pages.
pub const FLICK_DAMPING: f64 = 0.4;

/// Damped flicks of at most this many pages are treated as staying on the current page.
pub const FLICK_THRESHOLD: f64 = 1.0;

/// Scroll distance of one card: its height plus the gap to the next one.
#[must_use]
pub fn page_height(card_height: f64, item_spacing: f64) -> f64 {
    card_height + item_spacing
}

/// Resolves where a fling should come to rest.
///
/// With paging disabled, `proposed` is returned untouched. Otherwise the
/// target is anchored on the *current* offset in `scroll` (not on
/// `proposed`): the current page is rounded towards the direction of travel,
/// then advanced by the damped velocity rounded to whole pages. Flicks that
/// round to [`FLICK_THRESHOLD`] pages or fewer do not advance at all.
///
/// Paging is vertical only; `proposed.x` is passed through.
#[must_use]
pub fn resolve_target(
    proposed: Point,
    velocity: Vec2,
    scroll: &ScrollState,
    config: &CardStackConfig,
    item_spacing: f64,
) -> Point {
    if !config.paging_enabled {
        return proposed;
    }
    let page = page_height(config.card_height, item_spacing);
    if page <= 0.0 {
        return proposed;
    }

    let approximate_page = scroll.offset.y / page;
    let current_page = if velocity.y < 0.0 {
        approximate_page.floor()
    } else {
        approximate_page.ceil()
    };
    let flicked = (velocity.y * FLICK_DAMPING).round();
    let flicked_pages = if flicked.abs() > FLICK_THRESHOLD {
        flicked
    } else {
        0.0
    };
    let target_y = (current_page + flicked_pages) * page - scroll.content_inset.y0;

    tracing::debug!(
        current_page,
        flicked_pages,
        target_y,
        velocity = velocity.y,
        "resolved paging target"
    );
    Point::new(proposed.x, target_y)
}

/// Index of the card closest to being pinned at the top for `offset_y`.
///
/// Returns `None` when there are no cards. Offsets before the first or past
/// the last card clamp to that card.
#[must_use]
pub fn page_at_offset(
    offset_y: f64,
    inset_top: f64,
    page_height: f64,
    len: usize,
) -> Option<usize> {
    if len == 0 {
        return None;
    }
    if page_height <= 0.0 {
        return Some(0);
    }
    let ratio = (offset_y + inset_top) / page_height;
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Index is clamped to bounds immediately after the cast"
    )]
    let i = ratio.round() as isize;
    Some(i.clamp(0, len as isize - 1) as usize)
}

/// Scroll offset that pins card `index` to the top of the viewport.
#[must_use]
pub fn offset_for_page(index: usize, page_height: f64, inset_top: f64) -> f64 {
    index as f64 * page_height - inset_top
}
