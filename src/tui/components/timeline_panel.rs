//! # TimelinePanel Component
//!
//! Agent hand-offs for the current conversation, oldest first. Follows the
//! newest entry when the list outgrows the panel until the user scrolls
//! back (F3 focuses the panel).
//!
//! ```text
//! ╭ Agent timeline (2) ───────────────╮
//! │ ● IntentDetectionAgent  10:00:00  │
//! │ ● SchedulingAgent       10:00:03  │
//! ╰───────────────────────────────────╯
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::api::TraceEvent;
use crate::core::timeline::agent_events;
use crate::tui::component::Component;
use crate::tui::components::panel_scroll::PanelScroll;

pub const EMPTY_TEXT: &str = "No activity yet";

pub struct TimelinePanel<'a> {
    pub timeline: &'a [TraceEvent],
    pub active_agent: &'a str,
    pub scroll: &'a mut PanelScroll,
    pub focused: bool,
}

impl<'a> TimelinePanel<'a> {
    pub fn new(
        timeline: &'a [TraceEvent],
        active_agent: &'a str,
        scroll: &'a mut PanelScroll,
    ) -> Self {
        Self {
            timeline,
            active_agent,
            scroll,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let agents: Vec<_> = agent_events(self.timeline).collect();
        let last = agents.len().saturating_sub(1);
        agents
            .into_iter()
            .enumerate()
            .map(|(i, agent)| {
                // Only the newest entry is the live agent.
                let (marker, name_style) = if i == last && agent.name == self.active_agent {
                    ("● ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                } else {
                    ("○ ", Style::default().fg(Color::Gray))
                };
                let mut spans = vec![
                    Span::styled(marker, name_style),
                    Span::styled(agent.name.as_str(), name_style),
                ];
                if let Some(ts) = agent.timestamp.as_deref() {
                    spans.push(Span::styled(
                        format!("  {ts}"),
                        Style::default().fg(Color::DarkGray),
                    ));
                }
                Line::from(spans)
            })
            .collect()
    }
}

impl<'a> Component for TimelinePanel<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = self.lines();
        let title = format!("Agent timeline ({})", lines.len());
        let border = if self.focused { Color::Cyan } else { Color::DarkGray };
        let block = Block::bordered()
            .title(title)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border))
            .padding(Padding::horizontal(1));

        if lines.is_empty() {
            let placeholder = Paragraph::new(EMPTY_TEXT)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let offset = self.scroll.resolve(lines.len(), block.inner(area).height);
        frame.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), area);
    }
}
