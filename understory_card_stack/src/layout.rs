// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A controller that owns a [`BaseLayout`], the card stack configuration, and scroll state.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size, Vec2};

use crate::paging::{offset_for_page, page_at_offset, page_height, resolve_target};
use crate::{
    BaseLayout, CardStackConfig, ItemAttributes, LayoutError, ScrollState, transform_item,
};

/// Card stack layout over a single-column [`BaseLayout`].
///
/// This type:
/// - validates its configuration and integration once, up front, and again
///   whenever either is changed,
/// - tracks the host's live [`ScrollState`] and invalidates itself whenever
///   it changes, since the stack effect depends on the scroll position,
/// - caches the most recent rect query until the next invalidation,
/// - answers single-item, appear/disappear, and paging queries.
///
/// It does not know about views or gestures; hosts feed it scroll snapshots
/// and place their cells from the returned [`ItemAttributes`].
#[derive(Debug)]
pub struct CardStackLayout<B: BaseLayout> {
    base: B,
    config: CardStackConfig,
    scroll: ScrollState,

    dirty: bool,
    cached_rect: Rect,
    cached: Vec<ItemAttributes>,
}

impl<B: BaseLayout> CardStackLayout<B> {
    /// Creates a card stack over `base`.
    ///
    /// Fails if `config` does not validate or `base` has more or fewer than one section.
    pub fn new(base: B, config: CardStackConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        check_sections(&base)?;
        Ok(Self {
            base,
            config,
            scroll: ScrollState::default(),
            dirty: true,
            cached_rect: Rect::ZERO,
            cached: Vec::new(),
        })
    }

    /// Returns a shared reference to the base layout.
    #[must_use]
    pub fn base(&self) -> &B {
        &self.base
    }

    /// Returns a mutable reference to the base layout, invalidating the layout.
    pub fn base_mut(&mut self) -> &mut B {
        self.invalidate();
        &mut self.base
    }

    /// Returns the current configuration.
    #[must_use]
    pub const fn config(&self) -> &CardStackConfig {
        &self.config
    }

    /// Replaces the configuration.
    ///
    /// An invalid configuration is rejected and the current one kept.
    pub fn set_config(&mut self, config: CardStackConfig) -> Result<(), LayoutError> {
        if let Err(err) = config.validate() {
            tracing::debug!(%err, "rejected card stack configuration");
            return Err(err);
        }
        if config != self.config {
            self.config = config;
            self.invalidate();
        }
        Ok(())
    }

    /// Sets the stack scale intensity; `None` turns the stack transform off.
    pub fn set_first_item_transform(&mut self, intensity: Option<f64>) -> Result<(), LayoutError> {
        self.set_config(CardStackConfig {
            first_item_transform: intensity,
            ..self.config
        })
    }

    /// Turns fling snapping on or off.
    pub fn set_paging_enabled(&mut self, enabled: bool) {
        if enabled != self.config.paging_enabled {
            self.config.paging_enabled = enabled;
            self.invalidate();
        }
    }

    /// Sets the height of every card.
    pub fn set_card_height(&mut self, card_height: f64) -> Result<(), LayoutError> {
        self.set_config(CardStackConfig {
            card_height,
            ..self.config
        })
    }

    /// Sets whether the previous card peeks out from beneath the current one.
    pub fn set_previous_card_visible(&mut self, visible: bool) {
        if visible != self.config.previous_card_visible {
            self.config.previous_card_visible = visible;
            self.invalidate();
        }
    }

    /// Returns the last scroll snapshot handed to [`CardStackLayout::set_scroll_state`].
    #[must_use]
    pub const fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    /// Updates the host's scroll snapshot.
    ///
    /// Returns `Ok(true)` if the snapshot differs from the previous one, in
    /// which case the layout has been invalidated. Fails without storing the
    /// snapshot if the host still pages natively.
    pub fn set_scroll_state(&mut self, scroll: ScrollState) -> Result<bool, LayoutError> {
        if scroll.native_paging {
            return Err(LayoutError::NativePagingEnabled);
        }
        if scroll == self.scroll {
            return Ok(false);
        }
        self.scroll = scroll;
        self.invalidate();
        Ok(true)
    }

    /// Marks cached attributes stale.
    pub fn invalidate(&mut self) {
        if !self.dirty {
            tracing::trace!("card stack invalidated");
        }
        self.dirty = true;
    }

    /// Returns `true` if the next rect query will recompute attributes.
    #[must_use]
    pub const fn needs_layout(&self) -> bool {
        self.dirty
    }

    /// Checks the integration preconditions at the start of a layout pass.
    ///
    /// The base layout may have changed through [`CardStackLayout::base_mut`]
    /// since construction, so the section count is checked again here.
    pub fn prepare(&self) -> Result<(), LayoutError> {
        check_sections(&self.base)?;
        if self.scroll.native_paging {
            return Err(LayoutError::NativePagingEnabled);
        }
        tracing::trace!(
            items = self.base.item_count(),
            offset_y = self.scroll.offset.y,
            "preparing card stack layout"
        );
        Ok(())
    }

    /// Total size of the scrollable content.
    #[must_use]
    pub fn content_size(&self) -> Size {
        self.base.content_size()
    }

    /// Scroll distance of one card.
    #[must_use]
    pub fn page_height(&self) -> f64 {
        page_height(self.config.card_height, self.base.item_spacing())
    }

    /// Transformed attributes of every card whose base frame intersects `rect`.
    ///
    /// The result is cached until the layout is invalidated or a different
    /// `rect` is requested. It is empty while the base layout has more or
    /// fewer than one section.
    pub fn attributes_in_rect(&mut self, rect: Rect) -> &[ItemAttributes] {
        if self.dirty || rect != self.cached_rect {
            self.cached.clear();
            self.cached_rect = rect;
            self.dirty = false;
            if let Err(err) = check_sections(&self.base) {
                tracing::debug!(%err, "card stack query refused");
                return &self.cached;
            }
            let base = self.base.attributes_in_rect(rect);
            let spacing = self.base.item_spacing();
            self.cached.extend(
                base.iter()
                    .map(|raw| transform_item(raw, &self.scroll, &self.config, spacing)),
            );
        }
        &self.cached
    }

    /// Transformed attributes of the card at `index`.
    ///
    /// Returns `None` when the stack is empty, `index` is out of range, or the
    /// base layout has more or fewer than one section.
    #[must_use]
    pub fn attributes_at(&self, index: usize) -> Option<ItemAttributes> {
        if self.base.is_empty() || check_sections(&self.base).is_err() {
            return None;
        }
        let raw = self.base.attributes_at(index)?;
        Some(transform_item(
            &raw,
            &self.scroll,
            &self.config,
            self.base.item_spacing(),
        ))
    }

    /// Attributes a card animates in from when inserted: its resting attributes.
    #[must_use]
    pub fn appearing_attributes(&self, index: usize) -> Option<ItemAttributes> {
        self.attributes_at(index)
    }

    /// Attributes a card animates out to when removed: its resting attributes.
    #[must_use]
    pub fn disappearing_attributes(&self, index: usize) -> Option<ItemAttributes> {
        self.attributes_at(index)
    }

    /// Where a fling released at `velocity` should come to rest.
    ///
    /// See [`resolve_target`] for the snapping rules. While the base layout
    /// has more or fewer than one section, `proposed` is returned unchanged.
    #[must_use]
    pub fn target_offset(&self, proposed: Point, velocity: Vec2) -> Point {
        if check_sections(&self.base).is_err() {
            return proposed;
        }
        resolve_target(
            proposed,
            velocity,
            &self.scroll,
            &self.config,
            self.base.item_spacing(),
        )
    }

    /// Index of the card currently pinned (or nearest to pinned) at the top.
    #[must_use]
    pub fn focused_index(&self) -> Option<usize> {
        page_at_offset(
            self.scroll.offset.y,
            self.scroll.content_inset.y0,
            self.page_height(),
            self.base.item_count(),
        )
    }

    /// Scroll offset that brings card `index` to the top, clamping `index` to the stack.
    ///
    /// Returns `None` when the stack is empty.
    #[must_use]
    pub fn offset_for_index(&self, index: usize) -> Option<f64> {
        let len = self.base.item_count();
        if len == 0 {
            return None;
        }
        Some(offset_for_page(
            index.min(len - 1),
            self.page_height(),
            self.scroll.content_inset.y0,
        ))
    }
}

fn check_sections<B: BaseLayout>(base: &B) -> Result<(), LayoutError> {
    match base.section_count() {
        1 => Ok(()),
        n => Err(LayoutError::SectionCount(n)),
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Affine, Insets, Point, Rect, Size, Vec2};

    use super::CardStackLayout;
    use crate::{BaseLayout, CardStackConfig, FlowColumn, LayoutError, RawAttributes, ScrollState};

    fn stack(len: usize) -> CardStackLayout<FlowColumn> {
        let column = FlowColumn::new(len, Size::new(200.0, 100.0), 10.0);
        let config = CardStackConfig {
            first_item_transform: Some(0.05),
            ..CardStackConfig::with_card_height(100.0)
        };
        CardStackLayout::new(column, config).unwrap()
    }

    fn at(y: f64) -> ScrollState {
        ScrollState::new(Point::new(0.0, y), Size::new(320.0, 480.0))
    }

    #[derive(Debug)]
    struct TwoSections;

    impl BaseLayout for TwoSections {
        fn section_count(&self) -> usize {
            2
        }
        fn item_count(&self) -> usize {
            0
        }
        fn item_spacing(&self) -> f64 {
            0.0
        }
        fn content_size(&self) -> Size {
            Size::ZERO
        }
        fn attributes_in_rect(&self, _rect: Rect) -> Vec<RawAttributes> {
            Vec::new()
        }
        fn attributes_at(&self, _index: usize) -> Option<RawAttributes> {
            None
        }
    }

    #[test]
    fn construction_validates_config_and_sections() {
        let column = FlowColumn::new(3, Size::new(200.0, 100.0), 10.0);
        assert_eq!(
            CardStackLayout::new(column, CardStackConfig::default()).unwrap_err(),
            LayoutError::InvalidCardHeight(0.0)
        );
        assert_eq!(
            CardStackLayout::new(TwoSections, CardStackConfig::with_card_height(10.0))
                .unwrap_err(),
            LayoutError::SectionCount(2)
        );
    }

    #[test]
    fn native_paging_is_refused() {
        let mut layout = stack(3);
        let scroll = ScrollState {
            native_paging: true,
            ..at(0.0)
        };
        assert_eq!(
            layout.set_scroll_state(scroll),
            Err(LayoutError::NativePagingEnabled)
        );
        assert_eq!(layout.scroll_state(), &ScrollState::default());
        assert_eq!(layout.prepare(), Ok(()));
    }

    #[test]
    fn scrolling_invalidates_cached_attributes() {
        let mut layout = stack(5);
        let rect = Rect::new(0.0, 0.0, 320.0, 480.0);
        assert_eq!(layout.set_scroll_state(at(0.0)), Ok(true));
        assert_eq!(layout.attributes_in_rect(rect)[0].frame.y0, 0.0);
        assert!(!layout.needs_layout());

        assert_eq!(layout.set_scroll_state(at(0.0)), Ok(false));
        assert!(!layout.needs_layout());

        assert_eq!(layout.set_scroll_state(at(40.0)), Ok(true));
        assert!(layout.needs_layout());
        let first = layout.attributes_in_rect(rect)[0];
        assert_eq!(first.frame.y0, 40.0);
        assert_ne!(first.transform, Affine::IDENTITY);
    }

    #[test]
    fn config_setters_invalidate_and_reject_bad_values() {
        let mut layout = stack(5);
        let rect = Rect::new(0.0, 0.0, 320.0, 480.0);
        let _ = layout.attributes_in_rect(rect);
        assert!(!layout.needs_layout());

        layout.set_previous_card_visible(false);
        assert!(layout.needs_layout());
        let _ = layout.attributes_in_rect(rect);

        assert_eq!(
            layout.set_card_height(0.0),
            Err(LayoutError::InvalidCardHeight(0.0))
        );
        assert_eq!(layout.config().card_height, 100.0);
        assert!(!layout.needs_layout());

        layout.set_first_item_transform(None).unwrap();
        assert!(layout.needs_layout());
        layout.set_scroll_state(at(40.0)).unwrap();
        assert_eq!(layout.attributes_in_rect(rect)[0].transform, Affine::IDENTITY);
    }

    #[test]
    fn single_item_queries_match_the_rect_query() {
        let mut layout = stack(5);
        layout.set_scroll_state(at(70.0)).unwrap();
        let bulk = layout
            .attributes_in_rect(Rect::new(0.0, 70.0, 320.0, 550.0))
            .to_vec();
        for attrs in &bulk {
            assert_eq!(layout.attributes_at(attrs.index), Some(*attrs));
            assert_eq!(layout.appearing_attributes(attrs.index), Some(*attrs));
            assert_eq!(layout.disappearing_attributes(attrs.index), Some(*attrs));
        }
        assert_eq!(layout.attributes_at(5), None);
    }

    #[test]
    fn empty_stack_has_no_attributes() {
        let mut layout = stack(0);
        layout.set_scroll_state(at(0.0)).unwrap();
        for index in [0, 1, 100] {
            assert_eq!(layout.attributes_at(index), None);
            assert_eq!(layout.appearing_attributes(index), None);
        }
        assert!(layout.attributes_in_rect(Rect::new(0.0, 0.0, 320.0, 480.0)).is_empty());
        assert_eq!(layout.focused_index(), None);
        assert_eq!(layout.offset_for_index(0), None);
    }

    #[test]
    fn target_offset_uses_live_scroll_and_spacing() {
        let mut layout = stack(10);
        layout
            .set_scroll_state(at(0.0).with_content_inset(Insets::new(0.0, 20.0, 0.0, 0.0)))
            .unwrap();
        let target = layout.target_offset(Point::new(4.0, 900.0), Vec2::new(0.0, -5.0));
        assert_eq!(target, Point::new(4.0, -240.0));

        layout.set_paging_enabled(false);
        let target = layout.target_offset(Point::new(4.0, 900.0), Vec2::new(0.0, -5.0));
        assert_eq!(target, Point::new(4.0, 900.0));
    }

    #[test]
    fn focused_index_tracks_scroll_to_card_offsets() {
        let mut layout = stack(4);
        assert_eq!(layout.offset_for_index(2), Some(220.0));
        assert_eq!(layout.offset_for_index(9), Some(330.0));
        layout.set_scroll_state(at(220.0)).unwrap();
        assert_eq!(layout.focused_index(), Some(2));
        assert_eq!(layout.content_size(), Size::new(200.0, 430.0));
    }

    #[derive(Debug)]
    struct Sectioned {
        sections: usize,
        column: FlowColumn,
    }

    impl BaseLayout for Sectioned {
        fn section_count(&self) -> usize {
            self.sections
        }
        fn item_count(&self) -> usize {
            self.column.item_count()
        }
        fn item_spacing(&self) -> f64 {
            self.column.item_spacing()
        }
        fn content_size(&self) -> Size {
            self.column.content_size()
        }
        fn attributes_in_rect(&self, rect: Rect) -> Vec<RawAttributes> {
            self.column.attributes_in_rect(rect)
        }
        fn attributes_at(&self, index: usize) -> Option<RawAttributes> {
            self.column.attributes_at(index)
        }
    }

    #[test]
    fn sections_are_checked_again_after_base_changes() {
        let base = Sectioned {
            sections: 1,
            column: FlowColumn::new(3, Size::new(100.0, 100.0), 10.0),
        };
        let mut layout = CardStackLayout::new(base, CardStackConfig::with_card_height(100.0))
            .unwrap();
        layout.set_scroll_state(at(0.0)).unwrap();
        let rect = Rect::new(0.0, 0.0, 320.0, 300.0);
        assert_eq!(layout.prepare(), Ok(()));
        assert_eq!(layout.attributes_in_rect(rect).len(), 3);

        layout.base_mut().sections = 2;
        assert_eq!(layout.prepare(), Err(LayoutError::SectionCount(2)));
        assert!(layout.attributes_in_rect(rect).is_empty());
        assert_eq!(layout.attributes_at(0), None);
        assert_eq!(layout.appearing_attributes(1), None);
        let proposed = Point::new(0.0, 345.0);
        assert_eq!(
            layout.target_offset(proposed, Vec2::new(0.0, -5.0)),
            proposed
        );

        layout.base_mut().sections = 1;
        assert_eq!(layout.prepare(), Ok(()));
        assert_eq!(layout.attributes_in_rect(rect).len(), 3);
        assert!(layout.attributes_at(0).is_some());
    }
}
