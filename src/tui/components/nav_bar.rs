//! # NavBar Component
//!
//! Top line: one tab per view, the active one highlighted, and the console
//! name right-aligned when there is room.
//!
//! ```text
//!  Interview assistant   Calendar                 Interview scheduling console
//! ```
//!
//! Stateless: the active view and status text are props.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::View;
use crate::tui::component::Component;

const TAGLINE: &str = "Interview scheduling console";

pub struct NavBar<'a> {
    pub active: View,
    pub status_message: &'a str,
}

impl<'a> NavBar<'a> {
    pub fn new(active: View, status_message: &'a str) -> Self {
        Self {
            active,
            status_message,
        }
    }

    fn tab(&self, view: View) -> Span<'static> {
        let label = format!(" {} ", view.label());
        if view == self.active {
            Span::styled(
                label,
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(label, Style::default().fg(Color::Gray))
        }
    }
}

impl<'a> Component for NavBar<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            self.tab(View::Assistant),
            Span::raw(" "),
            self.tab(View::Calendar),
        ];
        if !self.status_message.is_empty() {
            spans.push(Span::styled(
                format!("  {}", self.status_message),
                Style::default().fg(Color::DarkGray),
            ));
        }
        let tabs = Line::from(spans);

        let tagline_width = TAGLINE.len() as u16 + 1;
        if area.width > tabs.width() as u16 + tagline_width {
            let [left, right] =
                Layout::horizontal([Constraint::Min(0), Constraint::Length(tagline_width)])
                    .areas(area);
            frame.render_widget(Paragraph::new(tabs), left);
            frame.render_widget(
                Paragraph::new(Span::styled(TAGLINE, Style::default().fg(Color::DarkGray))),
                right,
            );
        } else {
            frame.render_widget(Paragraph::new(tabs), area);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(width: u16, active: View, status: &str) -> String {
        let backend = TestBackend::new(width, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                NavBar::new(active, status).render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn shows_both_tabs_and_tagline() {
        let text = render_text(100, View::Assistant, "");
        assert!(text.contains("Interview assistant"));
        assert!(text.contains("Calendar"));
        assert!(text.contains(TAGLINE));
    }

    #[test]
    fn narrow_terminal_drops_tagline() {
        let text = render_text(40, View::Calendar, "");
        assert!(text.contains("Calendar"));
        assert!(!text.contains(TAGLINE));
    }

    #[test]
    fn active_tab_is_highlighted() {
        let nav = NavBar::new(View::Calendar, "");
        assert_eq!(nav.tab(View::Calendar).style.bg, Some(Color::Cyan));
        assert_eq!(nav.tab(View::Assistant).style.bg, None);
    }

    #[test]
    fn status_message_is_shown() {
        let text = render_text(120, View::Assistant, "New conversation");
        assert!(text.contains("New conversation"));
    }
}
