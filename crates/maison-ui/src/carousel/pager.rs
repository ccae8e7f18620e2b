//! Headless carousel state.
//!
//! The pager knows nothing about the DOM or timers. Time is passed in as
//! milliseconds so autoplay can be driven by a browser timeout in the
//! component and by plain numbers in tests.

/// Default autoplay interval.
pub const DEFAULT_INTERVAL_MS: u64 = 5_000;
/// Default space between cards.
pub const DEFAULT_GAP_PX: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerOptions {
    pub auto_play: bool,
    pub interval_ms: u64,
    pub gap_px: f64,
    /// Caps card width when there are fewer items than cards per page.
    pub max_card_width: Option<f64>,
}

impl Default for PagerOptions {
    fn default() -> Self {
        Self {
            auto_play: true,
            interval_ms: DEFAULT_INTERVAL_MS,
            gap_px: DEFAULT_GAP_PX,
            max_card_width: None,
        }
    }
}

/// Width of one card: `percent`% of the track minus `gap_offset_px`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ItemWidth {
    pub percent: f64,
    pub gap_offset_px: f64,
    pub max_px: Option<f64>,
}

impl ItemWidth {
    /// Inline style for a card.
    pub fn to_style(&self) -> String {
        let basis = format!("calc({:.4}% - {:.2}px)", self.percent, self.gap_offset_px);
        let mut style = format!("flex: 0 0 {basis}; width: {basis};");
        if let Some(max) = self.max_px {
            style.push_str(&format!(" max-width: {max}px;"));
        }
        style
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Pager {
    len: usize,
    cards_per_page: usize,
    index: usize,
    options: PagerOptions,
    /// When the next autoplay tick is due, if autoplay is running.
    deadline: Option<u64>,
}

impl Pager {
    pub fn new(len: usize, cards_per_page: usize, options: PagerOptions, now: u64) -> Self {
        let mut pager = Self {
            len,
            cards_per_page: cards_per_page.max(1),
            index: 0,
            options,
            deadline: None,
        };
        pager.reschedule(now);
        pager
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn cards_per_page(&self) -> usize {
        self.cards_per_page
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn options(&self) -> &PagerOptions {
        &self.options
    }

    /// More items than fit: arrows and dots are shown.
    pub fn shows_controls(&self) -> bool {
        self.len > self.cards_per_page
    }

    /// Entering cards animate only when the window actually moves.
    pub fn animates(&self) -> bool {
        self.shows_controls()
    }

    pub fn autoplay_active(&self) -> bool {
        self.options.auto_play && self.shows_controls()
    }

    pub fn visible_count(&self) -> usize {
        self.cards_per_page.min(self.len)
    }

    /// Item indices in the window, wrapping past the end.
    pub fn visible_indices(&self) -> Vec<usize> {
        (0..self.visible_count())
            .map(|offset| (self.index + offset) % self.len)
            .collect()
    }

    /// Number of dots: `max(0, len - cards_per_page + 1)`.
    pub fn total_positions(&self) -> usize {
        (self.len + 1).saturating_sub(self.cards_per_page)
    }

    /// The highlighted dot. The index keeps counting past the last dot
    /// while wrapping, so the dot is the index modulo the dot count.
    pub fn active_dot(&self) -> Option<usize> {
        match self.total_positions() {
            0 => None,
            positions => Some(self.index % positions),
        }
    }

    pub fn is_dot_active(&self, dot: usize) -> bool {
        self.active_dot() == Some(dot)
    }

    pub fn item_width(&self) -> ItemWidth {
        let cpp = self.cards_per_page as f64;
        ItemWidth {
            percent: 100.0 / cpp,
            gap_offset_px: self.options.gap_px * (cpp - 1.0) / cpp,
            max_px: if self.len < self.cards_per_page {
                self.options.max_card_width
            } else {
                None
            },
        }
    }

    /// When autoplay will next advance, if it is running.
    pub fn next_deadline(&self) -> Option<u64> {
        self.deadline
    }

    pub fn next(&mut self, now: u64) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + 1) % self.len;
        self.reschedule(now);
    }

    pub fn prev(&mut self, now: u64) {
        if self.len == 0 {
            return;
        }
        self.index = (self.index + self.len - 1) % self.len;
        self.reschedule(now);
    }

    /// Jump to `index`, reduced modulo the item count.
    pub fn go_to(&mut self, index: usize, now: u64) {
        if self.len == 0 {
            return;
        }
        self.index = index % self.len;
        self.reschedule(now);
    }

    /// Advance if the autoplay deadline has passed. Returns whether the
    /// index moved.
    pub fn tick(&mut self, now: u64) -> bool {
        match self.deadline {
            Some(due) if now >= due && self.autoplay_active() => {
                self.index = (self.index + 1) % self.len;
                self.reschedule(now);
                true
            }
            _ => false,
        }
    }

    /// Viewport crossed a breakpoint.
    pub fn set_cards_per_page(&mut self, cards_per_page: usize, now: u64) {
        let cards_per_page = cards_per_page.max(1);
        if cards_per_page != self.cards_per_page {
            self.cards_per_page = cards_per_page;
            self.reschedule(now);
        }
    }

    pub fn set_auto_play(&mut self, auto_play: bool, now: u64) {
        if auto_play != self.options.auto_play {
            self.options.auto_play = auto_play;
            self.reschedule(now);
        }
    }

    /// Replace the item count, keeping the index in range.
    pub fn set_len(&mut self, len: usize, now: u64) {
        if len != self.len {
            self.len = len;
            self.index = if len == 0 { 0 } else { self.index % len };
            self.reschedule(now);
        }
    }

    fn reschedule(&mut self, now: u64) {
        self.deadline = self
            .autoplay_active()
            .then(|| now.saturating_add(self.options.interval_ms));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pager(len: usize, cpp: usize) -> Pager {
        Pager::new(len, cpp, PagerOptions::default(), 0)
    }

    #[test]
    fn test_empty_pager() {
        let mut p = pager(0, 3);
        assert!(p.visible_indices().is_empty());
        assert!(!p.shows_controls());
        assert_eq!(p.next_deadline(), None);
        assert_eq!(p.active_dot(), None);
        p.next(10);
        p.prev(10);
        p.go_to(4, 10);
        assert_eq!(p.index(), 0);
    }

    #[test]
    fn test_window_wraps() {
        let mut p = pager(5, 3);
        p.go_to(3, 0);
        assert_eq!(p.visible_indices(), vec![3, 4, 0]);
        p.go_to(12, 0);
        assert_eq!(p.index(), 2);
    }

    #[test]
    fn test_dot_quirk() {
        let mut p = pager(6, 4);
        assert_eq!(p.total_positions(), 3);
        p.go_to(4, 0);
        assert_eq!(p.active_dot(), Some(1));
        assert!(p.is_dot_active(1));
    }

    #[test]
    fn test_item_width() {
        let p = pager(8, 4);
        let w = p.item_width();
        assert_eq!(w.percent, 25.0);
        assert_eq!(w.gap_offset_px, 12.0);
        assert_eq!(w.max_px, None);
        assert_eq!(w.to_style(), "flex: 0 0 calc(25.0000% - 12.00px); width: calc(25.0000% - 12.00px);");
    }

    #[test]
    fn test_autoplay_disabled() {
        let options = PagerOptions {
            auto_play: false,
            ..Default::default()
        };
        let mut p = Pager::new(10, 2, options, 0);
        assert_eq!(p.next_deadline(), None);
        assert!(!p.tick(100_000));

        p.set_auto_play(true, 50);
        assert_eq!(p.next_deadline(), Some(5_050));
    }

    #[test]
    fn test_set_len_keeps_index_valid() {
        let mut p = pager(10, 2);
        p.go_to(8, 0);
        p.set_len(3, 0);
        assert_eq!(p.index(), 2);
        p.set_len(0, 0);
        assert_eq!(p.index(), 0);
        assert_eq!(p.next_deadline(), None);
    }
}
