// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_card_stack --heading-base-level=0

//! Understory Card Stack: layout and paging for vertically swiped card stacks.
//!
//! This crate turns a plain single-column arrangement of equally tall cards
//! into a "card swiper": the card at the top of the viewport stays pinned
//! while the next one slides over it, the covered card shrinks (and can peek
//! out from beneath), and flings snap to whole cards.
//!
//! The core concepts are:
//!
//! - [`BaseLayout`]: the underlying arrangement the card stack post-processes.
//!   [`FlowColumn`] is a ready-made implementation for uniform cards.
//! - [`CardStackConfig`]: stack intensity, card height, paging, and whether the
//!   previous card peeks out. Validated whenever it is set.
//! - [`ScrollState`]: a snapshot of the host's scroll offset, viewport, and
//!   content inset.
//! - [`transform_item`] and [`resolve_target`]: the pure per-card transform and
//!   fling-snapping functions.
//! - [`CardStackLayout`]: a small controller wrapping all of the above. It
//!   invalidates itself on scroll, caches rect queries, and answers item,
//!   appear/disappear, and paging queries.
//!
//! This crate deliberately does **not** know about views, gestures, or
//! animation. Host frameworks are responsible for:
//!
//! - Handing a fresh [`ScrollState`] to [`CardStackLayout::set_scroll_state`]
//!   whenever the container scrolls or resizes.
//! - Placing cells from the returned [`ItemAttributes`]: the frame, then the
//!   transform around the frame's centre, drawn in `z_index` order.
//! - Animating the container to [`CardStackLayout::target_offset`] when a
//!   fling ends, with the container's own paging turned off.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size, Vec2};
//! use understory_card_stack::{CardStackConfig, CardStackLayout, FlowColumn, ScrollState};
//!
//! // Ten 300×400 cards, 12 units apart.
//! let column = FlowColumn::new(10, Size::new(300.0, 400.0), 12.0);
//! let config = CardStackConfig {
//!     first_item_transform: Some(0.05),
//!     ..CardStackConfig::with_card_height(400.0)
//! };
//! let mut stack = CardStackLayout::new(column, config).unwrap();
//!
//! // The host scrolled half a card down.
//! let scroll = ScrollState::new(Point::new(0.0, 200.0), Size::new(320.0, 640.0));
//! stack.set_scroll_state(scroll).unwrap();
//!
//! // The first card is pinned to the top and has started to shrink.
//! let cards = stack.attributes_in_rect(scroll.bounds());
//! assert_eq!(cards[0].frame.y0, 200.0);
//! assert!(cards[0].transform.as_coeffs()[0] < 1.0);
//!
//! // A hard downward fling lands exactly on a card boundary.
//! let target = stack.target_offset(Point::new(0.0, 900.0), Vec2::new(0.0, 6.0));
//! assert_eq!(target.y % 412.0, 0.0);
//! ```
//!
//! All positions live in the host's content coordinate space (typically
//! logical pixels) and are expected to be finite.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod attributes;
mod config;
mod error;
mod flow;
mod layout;
mod paging;
mod scroll;
mod transform;

pub use attributes::{ItemAttributes, RawAttributes};
pub use config::CardStackConfig;
pub use error::LayoutError;
pub use flow::{BaseLayout, FlowColumn};
pub use layout::CardStackLayout;
pub use paging::{
    FLICK_DAMPING, FLICK_THRESHOLD, offset_for_page, page_at_offset, page_height, resolve_target,
};
pub use scroll::ScrollState;
pub use transform::{PEEK_STEP, transform_item};
