//! # MessageList Component
//!
//! Scrollable view of the conversation's chat bubbles.
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent scroll state and layout cache)
//! and the message slice as props. Messages are immutable once appended, so
//! cached heights stay valid until the width changes or the conversation is
//! replaced.
//!
//! ```text
//! ╭ you · 10:02 ──────────────╮
//! │ Book Alice for Friday     │
//! ╰───────────────────────────╯
//! ╭ assistant · 10:02 ────────╮
//! │ Done, 3pm with Ravi.      │
//! ╰───────────────────────────╯
//!  ⠙ Assistant is typing…
//! ```

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::conversation;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::Message;
use crate::tui::event::TuiEvent;

pub const EMPTY_PLACEHOLDER: &str = "Start a conversation to schedule an interview";
pub const TYPING_TEXT: &str = "Assistant is typing…";

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
/// Rows reserved under the last bubble for the typing indicator.
const TYPING_ROWS: u16 = 1;

/// Layout and scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    pub layout: LayoutCache,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            layout: LayoutCache::new(),
            stick_to_bottom: true,
            viewport_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.layout.total_height().saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Re-engage auto-scroll once the user has scrolled back to the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Scrollable conversation view component.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub messages: &'a [conversation::Message],
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        messages: &'a [conversation::Message],
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            messages,
            is_loading,
            spinner_frame,
        }
    }

    fn render_placeholder(&self, frame: &mut Frame, area: Rect) {
        if area.height == 0 {
            return;
        }
        let row = Rect::new(area.x, area.y + area.height / 2, area.width, 1);
        frame.render_widget(
            Paragraph::new(EMPTY_PLACEHOLDER)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray)),
            row,
        );
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.messages.is_empty() && !self.is_loading {
            self.state.layout.clear();
            self.render_placeholder(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // scrollbar column

        // 1. Update layout cache
        let layout = &mut self.state.layout;
        let reusable = layout.reusable_count(self.messages.len(), content_width);
        layout.heights.truncate(reusable);
        for message in self.messages.iter().skip(layout.heights.len()) {
            layout
                .heights
                .push(Message::calculate_height(message, content_width));
        }
        layout.rebuild_prefix_heights();
        layout.update_metadata(self.messages.len(), content_width);

        let total_height = self.state.layout.total_height();
        let typing_rows = if self.is_loading { TYPING_ROWS } else { 0 };
        let canvas_height = total_height + typing_rows;

        // 2. Clamp scroll offset
        self.state.viewport_height = area.height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let scroll_offset = self.state.scroll_state.offset().y;
        let visible_range = self.state.layout.visible_range(scroll_offset, area.height);

        // 3. Render visible bubbles into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, canvas_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let mut y_offset: u16 = if visible_range.start > 0 {
            self.state.layout.prefix_heights[visible_range.start - 1]
        } else {
            0
        };

        for i in visible_range {
            let height = self.state.layout.heights[i];
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(Message::new(&self.messages[i]), rect);
            y_offset += height;
        }

        if self.is_loading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            scroll_view.render_widget(
                Paragraph::new(format!(" {spinner} {TYPING_TEXT}")).style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                ),
                Rect::new(0, total_height, content_width, TYPING_ROWS),
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

/// Implemented on the state because `MessageList` is rebuilt every frame.
impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}

/// Cached bubble heights for the current width.
pub struct LayoutCache {
    pub heights: Vec<u16>,
    pub prefix_heights: Vec<u16>,
    message_count: usize,
    content_width: u16,
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutCache {
    pub fn new() -> Self {
        Self {
            heights: Vec::new(),
            prefix_heights: Vec::new(),
            message_count: 0,
            content_width: 0,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// How many cached heights are still valid.
    ///
    /// Messages are append-only, so everything cached stays valid unless
    /// the width changed or the list shrank (a new conversation).
    pub fn reusable_count(&self, message_count: usize, content_width: u16) -> usize {
        if self.content_width != content_width || message_count < self.message_count {
            return 0;
        }
        self.heights.len().min(message_count)
    }

    pub fn update_metadata(&mut self, message_count: usize, content_width: u16) {
        self.message_count = message_count;
        self.content_width = content_width;
    }

    pub fn rebuild_prefix_heights(&mut self) {
        self.prefix_heights = self
            .heights
            .iter()
            .scan(0u16, |acc, &h| {
                *acc = acc.saturating_add(h);
                Some(*acc)
            })
            .collect();
    }

    pub fn total_height(&self) -> u16 {
        self.prefix_heights.last().copied().unwrap_or(0)
    }

    /// Indices of messages that intersect the viewport, with half a screen
    /// of slack on each side.
    pub fn visible_range(&self, scroll_offset: u16, viewport_height: u16) -> std::ops::Range<usize> {
        let buffer = viewport_height / 2;
        let buffered_start = scroll_offset.saturating_sub(buffer);
        let buffered_end = scroll_offset
            .saturating_add(viewport_height)
            .saturating_add(buffer);

        let start = self
            .prefix_heights
            .partition_point(|&end| end <= buffered_start);
        let end = self
            .prefix_heights
            .partition_point(|&end| end < buffered_end)
            .saturating_add(1)
            .min(self.prefix_heights.len());

        start..end
    }
}
