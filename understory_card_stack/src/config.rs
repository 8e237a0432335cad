// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration for the card stack effect and paging.

use crate::LayoutError;

/// Tunable parameters of a [`CardStackLayout`](crate::CardStackLayout).
///
/// The owning controller may change these at any time through the layout's
/// setters, which validate the new value and invalidate the layout. Line
/// spacing is not part of this struct: it belongs to the
/// [`BaseLayout`](crate::BaseLayout) and is only read here.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CardStackConfig {
    /// Stack scale intensity.
    ///
    /// When `Some(t)`, a card pinned to the viewport top is scaled horizontally
    /// by `1 - progress * t` as the next card slides over it. `None` disables
    /// the stack transform entirely.
    pub first_item_transform: Option<f64>,
    /// Whether flings snap to whole cards.
    pub paging_enabled: bool,
    /// Height of every card, in the same units as the scroll offset.
    ///
    /// Must be finite and greater than zero. The default of `0.0` means
    /// "unset" and is rejected by [`CardStackConfig::validate`].
    pub card_height: f64,
    /// Whether the card beneath the current one is shifted down to peek out,
    /// or kept hidden directly behind it.
    pub previous_card_visible: bool,
}

impl Default for CardStackConfig {
    fn default() -> Self {
        Self {
            first_item_transform: None,
            paging_enabled: true,
            card_height: 0.0,
            previous_card_visible: true,
        }
    }
}

impl CardStackConfig {
    /// Creates a configuration with the given card height and default settings otherwise.
    #[must_use]
    pub fn with_card_height(card_height: f64) -> Self {
        Self {
            card_height,
            ..Self::default()
        }
    }

    /// Checks that the configuration can drive a layout pass.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !self.card_height.is_finite() || self.card_height <= 0.0 {
            return Err(LayoutError::InvalidCardHeight(self.card_height));
        }
        if let Some(t) = self.first_item_transform
            && !t.is_finite()
        {
            return Err(LayoutError::InvalidItemTransform(t));
        }
        Ok(())
    }
}
