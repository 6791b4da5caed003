//! # PanelScroll
//!
//! Scroll position for the bordered side panels. A panel follows its newest
//! line until the user scrolls up, and picks the tail back up once scrolled
//! to the bottom again.

use crate::tui::component::EventHandler;
use crate::tui::event::TuiEvent;

#[derive(Debug, Clone, PartialEq)]
pub struct PanelScroll {
    pub offset: u16,
    /// When true, the offset tracks the last line on every render
    pub follow_tail: bool,
    /// Largest valid offset at the last render
    max_offset: u16,
    /// Inner height at the last render, used as the page size
    viewport_height: u16,
}

impl Default for PanelScroll {
    fn default() -> Self {
        Self::new()
    }
}

impl PanelScroll {
    pub fn new() -> Self {
        Self {
            offset: 0,
            follow_tail: true,
            max_offset: 0,
            viewport_height: 0,
        }
    }

    /// Records the content and viewport size and returns the offset to draw at.
    pub fn resolve(&mut self, content_height: usize, viewport_height: u16) -> u16 {
        let overflow = content_height.saturating_sub(viewport_height as usize);
        self.max_offset = u16::try_from(overflow).unwrap_or(u16::MAX);
        self.viewport_height = viewport_height;

        if self.follow_tail || self.offset >= self.max_offset {
            self.offset = self.max_offset;
            self.follow_tail = true;
        }
        self.offset
    }

    fn scroll_by(&mut self, delta: i32) {
        let next = (i32::from(self.offset) + delta).clamp(0, i32::from(self.max_offset));
        self.offset = u16::try_from(next).unwrap_or(0);
        self.follow_tail = self.offset >= self.max_offset;
    }
}

impl EventHandler for PanelScroll {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        let page = i32::from(self.viewport_height.max(1));
        match event {
            TuiEvent::ScrollUp => self.scroll_by(-1),
            TuiEvent::ScrollDown => self.scroll_by(1),
            TuiEvent::ScrollPageUp => self.scroll_by(-page),
            TuiEvent::ScrollPageDown => self.scroll_by(page),
            _ => {}
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn follows_tail_until_scrolled_up() {
        let mut scroll = PanelScroll::new();
        assert_eq!(scroll.resolve(20, 5), 15);
        assert_eq!(scroll.resolve(25, 5), 20);

        scroll.handle_event(&TuiEvent::ScrollUp);
        assert_eq!(scroll.offset, 19);
        assert!(!scroll.follow_tail);

        // New content no longer drags the view along.
        assert_eq!(scroll.resolve(30, 5), 19);
    }

    #[test]
    fn page_up_stops_at_top() {
        let mut scroll = PanelScroll::new();
        scroll.resolve(12, 5);
        for _ in 0..5 {
            scroll.handle_event(&TuiEvent::ScrollPageUp);
        }
        assert_eq!(scroll.offset, 0);
        assert_eq!(scroll.resolve(12, 5), 0);
    }

    #[test]
    fn scrolling_back_down_repins() {
        let mut scroll = PanelScroll::new();
        scroll.resolve(12, 5);
        scroll.handle_event(&TuiEvent::ScrollPageUp);
        assert!(!scroll.follow_tail);

        scroll.handle_event(&TuiEvent::ScrollPageDown);
        assert!(scroll.follow_tail);
        assert_eq!(scroll.resolve(14, 5), 9);
    }

    #[test]
    fn content_that_fits_never_scrolls() {
        let mut scroll = PanelScroll::new();
        assert_eq!(scroll.resolve(3, 5), 0);
        scroll.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(scroll.offset, 0);
        assert!(scroll.follow_tail);
    }
}
