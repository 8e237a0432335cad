// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-item card stack transform.

use kurbo::{Affine, Point, Rect, Vec2};

use crate::{CardStackConfig, ItemAttributes, RawAttributes, ScrollState};

/// Vertical offset, per stacking level, applied to a card that peeks out
/// from beneath the current one.
pub const PEEK_STEP: f64 = 10.0;

/// Progress of a card towards being fully covered, given its pinned and natural `y`.
///
/// `0.0` while the card still sits at its natural position; `1.0` once it
/// has been pinned for a full card height.
fn stack_progress(final_y: f64, natural_y: f64, height: f64) -> f64 {
    if height > 0.0 {
        (final_y - natural_y) / height
    } else {
        0.0
    }
}

/// Builds the stack transform for a card at the given progress.
///
/// `depth` is the stacking index the base layout assigned to the item.
fn stack_transform(progress: f64, depth: i32, config: &CardStackConfig) -> Affine {
    let Some(intensity) = config.first_item_transform else {
        return Affine::IDENTITY;
    };
    let scale = 1.0 - progress * intensity;
    let mut transform = Affine::scale_non_uniform(scale, 1.0);
    if config.previous_card_visible {
        let peek = progress * f64::from(depth.saturating_add(1)) * PEEK_STEP;
        transform = transform * Affine::translate(Vec2::new(0.0, peek));
    }
    transform
}

/// Applies the card stack effect to one item.
///
/// - A card whose natural position has scrolled above the visible top is
///   pinned there, so the next card slides over it.
/// - Once a card has scrolled past the top by more than a full page (card
///   height plus `item_spacing` plus the top inset), it is released back to
///   its natural position instead of staying pinned.
/// - While pinned, the card is scaled down horizontally (and optionally
///   shifted down to peek out) in proportion to how far it has been covered.
/// - Every card is centred horizontally in the viewport, and its stacking
///   index is its row so later cards draw over earlier ones.
///
/// The result is a new value; `raw` is left as is.
#[must_use]
pub fn transform_item(
    raw: &RawAttributes,
    scroll: &ScrollState,
    config: &CardStackConfig,
    item_spacing: f64,
) -> ItemAttributes {
    let frame = raw.frame();
    let natural_y = frame.y0;
    let height = frame.height();
    let inset = scroll.content_inset;

    let mut min_y = scroll.visible_top();
    if min_y > natural_y + height + item_spacing + inset.y0 {
        min_y = 0.0;
    }
    let final_y = min_y.max(natural_y);
    let progress = stack_progress(final_y, natural_y, height);

    let x = scroll.viewport.width / 2.0 - frame.width() / 2.0 - inset.x0;
    let mut attrs = ItemAttributes::from(raw);
    attrs.transform = stack_transform(progress, raw.z_index(), config);
    attrs.frame = Rect::from_origin_size(Point::new(x, final_y), frame.size());
    attrs.z_index = i32::try_from(raw.index()).unwrap_or(i32::MAX);
    attrs
}
