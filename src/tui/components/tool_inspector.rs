//! # ToolInspector Component
//!
//! Tool invocations for the current conversation. Each entry shows the
//! tool name with a status badge, the run window, and the call input as
//! pretty-printed JSON capped at `MAX_INPUT_LINES`. Follows the newest tool
//! until scrolled back with the panel focused.
//!
//! ```text
//! ╭ Tools (1) ─────────────────────────╮
//! │ ⚙ calendar_read  [success]         │
//! │   10:00:01 → 10:00:02              │
//! │   {                                │
//! │     "input": {                     │
//! │       "candidate": "Alice"         │
//! │     }                              │
//! │   }                                │
//! ╰────────────────────────────────────╯
//! ```

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::api::ToolTrace;
use crate::tui::component::Component;
use crate::tui::components::panel_scroll::PanelScroll;

pub const EMPTY_TEXT: &str = "No tools used yet";
/// Max lines of pretty-printed input per tool.
const MAX_INPUT_LINES: usize = 10;

const fn tool_style() -> Style {
    Style::new().fg(Color::Yellow)
}
const fn detail_style() -> Style {
    Style::new().fg(Color::DarkGray)
}
const fn overflow_style() -> Style {
    Style::new().fg(Color::DarkGray).add_modifier(Modifier::DIM)
}

pub struct ToolInspector<'a> {
    pub tools: &'a [ToolTrace],
    pub scroll: &'a mut PanelScroll,
    pub focused: bool,
}

impl<'a> ToolInspector<'a> {
    pub fn new(tools: &'a [ToolTrace], scroll: &'a mut PanelScroll) -> Self {
        Self {
            tools,
            scroll,
            focused: false,
        }
    }

    pub fn focused(mut self, focused: bool) -> Self {
        self.focused = focused;
        self
    }

    fn lines(&self) -> Vec<Line<'a>> {
        let mut lines = Vec::new();
        for (i, tool) in self.tools.iter().enumerate() {
            if i > 0 {
                lines.push(Line::default());
            }

            let status = tool.status.as_deref().unwrap_or("pending");
            lines.push(Line::from(vec![
                Span::styled("⚙ ", tool_style()),
                Span::styled(tool.tool_name.as_str(), tool_style().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::styled(format!("[{status}]"), status_style(tool)),
            ]));

            lines.push(Line::from(Span::styled(
                format!("  {}", run_window(tool)),
                detail_style(),
            )));

            let input = serde_json::json!({ "input": tool.input });
            for text in format_json_pretty(&input, MAX_INPUT_LINES) {
                let style = if text.starts_with("… +") {
                    overflow_style()
                } else {
                    Style::default()
                };
                lines.push(Line::from(Span::styled(format!("  {text}"), style)));
            }
        }
        lines
    }
}

fn status_style(tool: &ToolTrace) -> Style {
    match tool.status.as_deref().map(str::to_ascii_lowercase).as_deref() {
        Some("success") => Style::new().fg(Color::Green),
        Some("error" | "failed" | "failure") => Style::new().fg(Color::Red),
        _ => Style::new().fg(Color::Yellow),
    }
}

/// `started → finished`, falling back to the single event timestamp.
fn run_window(tool: &ToolTrace) -> String {
    match (tool.started_at.as_deref(), tool.finished_at.as_deref()) {
        (Some(start), Some(end)) => format!("{start} → {end}"),
        (Some(start), None) => format!("{start} → …"),
        (None, Some(end)) => format!("? → {end}"),
        (None, None) => tool.timestamp.clone().unwrap_or_else(|| "-".to_string()),
    }
}

/// Pretty-print a JSON value, capping output at `max_lines`.
fn format_json_pretty(value: &serde_json::Value, max_lines: usize) -> Vec<String> {
    let formatted =
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string());

    let all_lines: Vec<&str> = formatted.lines().collect();
    let total = all_lines.len();

    if total <= max_lines {
        all_lines.iter().map(|l| l.to_string()).collect()
    } else {
        let take = max_lines.saturating_sub(1);
        let mut result: Vec<String> = all_lines[..take].iter().map(|l| l.to_string()).collect();
        result.push(format!("… +{} lines", total - take));
        result
    }
}

impl<'a> Component for ToolInspector<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(format!("Tools ({})", self.tools.len()))
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                Style::new().fg(Color::Cyan)
            } else {
                detail_style()
            })
            .padding(Padding::horizontal(1));

        if self.tools.is_empty() {
            let placeholder = Paragraph::new(EMPTY_TEXT).style(detail_style()).block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        let lines = self.lines();
        let offset = self.scroll.resolve(lines.len(), block.inner(area).height);
        frame.render_widget(Paragraph::new(lines).block(block).scroll((offset, 0)), area);
    }
}
