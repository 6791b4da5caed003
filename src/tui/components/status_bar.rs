//! # StatusBar Component
//!
//! One line above the chat: the active agent, the conversation id and the
//! key hints.
//!
//! ```text
//! Active agent: SchedulingAgent   conv 3f2a9c1e   Ctrl+N new · Tab calendar
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::component::Component;

const HINTS: &str =
    "Enter send · Ctrl+J newline · Ctrl+N new · F3 panels · Tab calendar · Ctrl+C quit";
/// Leading characters of the conversation id to show.
const ID_PREFIX_LEN: usize = 8;

pub struct StatusBar<'a> {
    pub active_agent: &'a str,
    pub conversation_id: &'a str,
}

impl<'a> StatusBar<'a> {
    pub fn new(active_agent: &'a str, conversation_id: &'a str) -> Self {
        Self {
            active_agent,
            conversation_id,
        }
    }

    fn line(&self) -> Line<'a> {
        let short_id: String = self.conversation_id.chars().take(ID_PREFIX_LEN).collect();
        Line::from(vec![
            Span::styled("Active agent: ", Style::default().fg(Color::Gray)),
            Span::styled(
                self.active_agent,
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("   conv {short_id}"), Style::default().fg(Color::DarkGray)),
            Span::styled(format!("   {HINTS}"), Style::default().fg(Color::DarkGray)),
        ])
    }
}

impl<'a> Component for StatusBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        frame.render_widget(Paragraph::new(self.line()), area);
    }
}
