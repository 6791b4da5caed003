use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::calendar::format_clock;
use crate::core::conversation::{self, Role};
use crate::tui::component::Component;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// A stateless component that renders one chat bubble.
///
/// Created fresh each frame by `MessageList`. User bubbles are green,
/// assistant bubbles blue, and the fixed server-error reply red. The
/// border title carries the speaker and the `HH:MM` send time.
///
/// [`calculate_height`](Self::calculate_height) predicts the rendered
/// height with `textwrap` options matching ratatui's `Paragraph` wrapping,
/// so the list can lay out its scroll view without rendering.
#[derive(Clone, Copy)]
pub struct Message<'a> {
    pub message: &'a conversation::Message,
}

impl<'a> Message<'a> {
    pub fn new(message: &'a conversation::Message) -> Self {
        Self { message }
    }

    /// Calculate the height required for this message given a width.
    pub fn calculate_height(message: &conversation::Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            // Too narrow for borders and padding; still take one row.
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options);
        (lines.len() as u16).max(1) + VERTICAL_OVERHEAD
    }

    fn style(&self) -> Style {
        match self.message.role {
            Role::User => Style::default().fg(Color::Green),
            Role::Assistant if self.message.text == conversation::SERVER_ERROR_TEXT => {
                Style::default().fg(Color::Red)
            }
            Role::Assistant => Style::default().fg(Color::Blue),
        }
    }

    fn title(&self) -> String {
        let speaker = match self.message.role {
            Role::User => "you",
            Role::Assistant => "assistant",
        };
        let clock = format_clock(self.message.timestamp);
        if clock.is_empty() {
            speaker.to_string()
        } else {
            format!("{speaker} · {clock}")
        }
    }
}

impl<'a> Widget for Message<'a> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let style = self.style();
        let border_style = style.add_modifier(Modifier::DIM);

        let block = Block::bordered()
            .title(self.title())
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(border_style)
            .title_style(border_style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        Paragraph::new(self.message.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(inner_area, buf);
    }
}

impl<'a> Component for Message<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(*self, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_message(role: Role, text: &str) -> conversation::Message {
        conversation::Message {
            role,
            text: text.to_string(),
            timestamp: 0,
        }
    }

    #[test]
    fn calculate_height_empty_content_returns_border_height() {
        let msg = make_message(Role::User, "");
        assert_eq!(Message::calculate_height(&msg, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_whitespace_only_treated_as_empty() {
        let msg = make_message(Role::User, "   \n\t  ");
        assert_eq!(Message::calculate_height(&msg, 80), VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_zero_width_returns_minimum() {
        let msg = make_message(Role::Assistant, "Hello world");
        assert_eq!(Message::calculate_height(&msg, 0), 1);
        assert_eq!(Message::calculate_height(&msg, HORIZONTAL_OVERHEAD), 1);
    }

    #[test]
    fn calculate_height_wraps_at_width_boundary() {
        let msg = make_message(Role::User, "Hello world");
        // content width 5: "Hello" | "world"
        assert_eq!(Message::calculate_height(&msg, 9), 2 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn calculate_height_breaks_long_words() {
        let msg = make_message(Role::User, "abcdefghij");
        // content width 4: "abcd" | "efgh" | "ij"
        assert_eq!(Message::calculate_height(&msg, 8), 3 + VERTICAL_OVERHEAD);
    }

    #[test]
    fn roles_get_distinct_colors() {
        let user = make_message(Role::User, "hi");
        let reply = make_message(Role::Assistant, "hello");
        let failure = make_message(Role::Assistant, conversation::SERVER_ERROR_TEXT);
        assert_eq!(Message::new(&user).style().fg, Some(Color::Green));
        assert_eq!(Message::new(&reply).style().fg, Some(Color::Blue));
        assert_eq!(Message::new(&failure).style().fg, Some(Color::Red));
    }

    #[test]
    fn title_names_speaker_and_time() {
        let user = make_message(Role::User, "hi");
        assert_eq!(Message::new(&user).title(), "you · 05:30");
        let reply = make_message(Role::Assistant, "hello");
        assert!(Message::new(&reply).title().starts_with("assistant"));
    }
}
