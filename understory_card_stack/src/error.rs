// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported when a card stack is misconfigured or misintegrated.

/// Integration and configuration errors.
///
/// These are never produced by the per-frame queries. They surface when a
/// [`CardStackLayout`](crate::CardStackLayout) is built, reconfigured,
/// attached to a scroll state, or prepared for a layout pass.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The card height is zero, negative, or not finite.
    #[error("card height must be finite and greater than zero; got {0}")]
    InvalidCardHeight(f64),
    /// The stack scale intensity is not finite.
    #[error("first item transform must be finite; got {0}")]
    InvalidItemTransform(f64),
    /// The base layout reports a section count other than one.
    #[error("card stack expects exactly one section; base layout has {0}")]
    SectionCount(usize),
    /// The host container still pages natively, which fights with
    /// [`CardStackLayout::target_offset`](crate::CardStackLayout::target_offset).
    #[error("host container paging must be disabled when the card stack pages")]
    NativePagingEnabled,
}
