//! Focus tracking for the horizontally paged "Popular" carousel
//!
//! The focused page is published through a `watch` cell so dependents
//! (the background crossfade) observe every change, not only the end of a
//! scroll gesture. The fractional position is kept next to it for styling.

use tokio::sync::watch;

/// Width of one carousel page (poster width)
pub const PAGE_WIDTH: f32 = 200.0;

/// Leading padding so the focused poster sits off the left edge
pub const CONTENT_PADDING: f32 = 100.0;

/// Visual parameters for a single carousel item
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemStyle {
    /// Rotation in degrees (negative = tilted left)
    pub rotation: f32,
    pub alpha: f32,
    pub scale: f32,
    /// Extra top padding pushing unfocused posters down
    pub drop: f32,
}

impl ItemStyle {
    const FOCUSED: ItemStyle = ItemStyle {
        rotation: 0.0,
        alpha: 1.0,
        scale: 1.0,
        drop: 0.0,
    };

    const UNFOCUSED_ROTATION: f32 = 10.0;
    const UNFOCUSED_ALPHA: f32 = 0.7;
    const UNFOCUSED_SCALE: f32 = 0.75;
    const UNFOCUSED_DROP: f32 = 30.0;
}

#[derive(Debug)]
pub struct CarouselController {
    count: usize,
    page_width: f32,
    /// Fractional page under the snap point, follows the scroll offset
    position: f32,
    focus: watch::Sender<usize>,
}

impl CarouselController {
    pub fn new(count: usize, page_width: f32) -> Self {
        let (focus, _) = watch::channel(0);
        Self {
            count,
            page_width,
            position: 0.0,
            focus,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// Focused index, `None` while the list is empty
    pub fn focused(&self) -> Option<usize> {
        let index = *self.focus.borrow();
        (index < self.count).then_some(index)
    }

    /// Fractional in-flight position, for styling only
    pub fn position(&self) -> f32 {
        self.position
    }

    /// Observe focus changes
    pub fn subscribe(&self) -> watch::Receiver<usize> {
        self.focus.subscribe()
    }

    /// Replace the item count, re-clamping focus into the new range
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        let index = *self.focus.borrow();
        let clamped = self.clamp(index as isize);
        self.position = self.position.min(self.max_position());
        self.publish(clamped);
    }

    /// Settle on a page. Out-of-range indices clamp to the nearest bound.
    ///
    /// Returns `true` if the focused index changed.
    pub fn on_page_settled(&mut self, index: isize) -> bool {
        let index = self.clamp(index);
        self.position = index as f32;
        self.publish(index)
    }

    /// Track a horizontal scroll offset (in pixels, relative to the start of
    /// the first page). Focus follows whichever page is closest to the snap
    /// point, so it changes mid-gesture just like a pager's current page.
    pub fn on_scrolled(&mut self, offset_x: f32) -> bool {
        if self.count == 0 || self.page_width <= 0.0 {
            self.position = 0.0;
            return false;
        }

        self.position = (offset_x / self.page_width).clamp(0.0, self.max_position());
        let index = self.clamp(self.position.round() as isize);
        self.publish(index)
    }

    /// Snap the fractional position onto the focused page once scrolling
    /// stops. Returns `true` if the view has to be scrolled to get there.
    pub fn settle(&mut self) -> bool {
        let target = self.focused().unwrap_or(0) as f32;
        let moved = self.position != target;
        self.position = target;
        moved
    }

    /// Horizontal offset that puts the focused page under the snap point
    pub fn scroll_offset(&self) -> f32 {
        *self.focus.borrow() as f32 * self.page_width
    }

    /// Style of the item at `index`, interpolated from the fractional position
    pub fn item_style(&self, index: usize) -> ItemStyle {
        let distance = (index as f32 - self.position).clamp(-1.0, 1.0);
        let t = distance.abs();

        ItemStyle {
            rotation: distance * ItemStyle::UNFOCUSED_ROTATION,
            alpha: lerp(ItemStyle::FOCUSED.alpha, ItemStyle::UNFOCUSED_ALPHA, t),
            scale: lerp(ItemStyle::FOCUSED.scale, ItemStyle::UNFOCUSED_SCALE, t),
            drop: lerp(ItemStyle::FOCUSED.drop, ItemStyle::UNFOCUSED_DROP, t),
        }
    }

    fn max_position(&self) -> f32 {
        self.count.saturating_sub(1) as f32
    }

    fn clamp(&self, index: isize) -> usize {
        if self.count == 0 {
            return 0;
        }
        index.clamp(0, self.count as isize - 1) as usize
    }

    fn publish(&self, index: usize) -> bool {
        self.focus.send_if_modified(|current| {
            if *current == index {
                false
            } else {
                *current = index;
                true
            }
        })
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}
