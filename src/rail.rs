// Scroll rail controller for the Top Discounts strip.
//
// Offsets and widths are layout units; the terminal view maps ten units to one column.

pub const CARD_WIDTH: i32 = 250;
pub const CARD_GAP: i32 = 16;
pub const CARDS_PER_STEP: i32 = 3;
pub const SCROLL_STEP: i32 = (CARD_WIDTH + CARD_GAP) * CARDS_PER_STEP;
pub const RIGHT_SLACK: i32 = 10;
pub const UNITS_PER_COLUMN: i32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDirection {
    Left,
    Right,
}

/// The scrollable region itself. It clamps its own offset the way a browser
/// scroll container does; the controller never clamps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrollRegion {
    offset: i32,
    scroll_width: i32,
    visible_width: i32,
}

impl ScrollRegion {
    pub fn offset(&self) -> i32 {
        self.offset
    }

    #[cfg(test)]
    pub fn scroll_width(&self) -> i32 {
        self.scroll_width
    }

    pub fn visible_width(&self) -> i32 {
        self.visible_width
    }

    /// Sets the offset, clamped to the scrollable range. Returns true when it
    /// moved, which is what counts as a scroll event.
    pub fn set_offset(&mut self, offset: i32) -> bool {
        let max = (self.scroll_width - self.visible_width).max(0);
        let clamped = offset.clamp(0, max);
        let moved = clamped != self.offset;
        self.offset = clamped;
        moved
    }

    /// Resizes the content for `cards` cards.
    pub fn set_card_count(&mut self, cards: usize) -> bool {
        self.scroll_width = content_width(cards);
        self.set_offset(self.offset)
    }

    /// Resizes the viewport, in terminal columns.
    pub fn set_visible_columns(&mut self, columns: u16) -> bool {
        self.visible_width = i32::from(columns) * UNITS_PER_COLUMN;
        self.set_offset(self.offset)
    }
}

/// Total width of `cards` cards laid out with gaps between them.
pub fn content_width(cards: usize) -> i32 {
    let n = cards as i32;
    if n == 0 { 0 } else { n * CARD_WIDTH + (n - 1) * CARD_GAP }
}

/// Left/right affordances for a scroll region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRail {
    can_scroll_left: bool,
    can_scroll_right: bool,
}

impl ScrollRail {
    pub fn new() -> Self {
        Self {
            can_scroll_left: false,
            can_scroll_right: true,
        }
    }

    pub fn can_scroll_left(&self) -> bool {
        self.can_scroll_left
    }

    pub fn can_scroll_right(&self) -> bool {
        self.can_scroll_right
    }

    /// Recomputes both affordances from the region's current geometry.
    pub fn check(&mut self, region: &ScrollRegion) {
        self.can_scroll_left = region.offset > 0;
        self.can_scroll_right = region.offset < region.scroll_width - region.visible_width - RIGHT_SLACK;
    }

    /// Shifts the region by three cards and re-checks if it actually moved.
    pub fn scroll_by(&mut self, region: &mut ScrollRegion, direction: ScrollDirection) {
        let delta = match direction {
            ScrollDirection::Left => -SCROLL_STEP,
            ScrollDirection::Right => SCROLL_STEP,
        };
        if region.set_offset(region.offset + delta) {
            self.check(region);
        }
    }
}

impl Default for ScrollRail {
    fn default() -> Self {
        Self::new()
    }
}
