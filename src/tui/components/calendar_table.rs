//! # CalendarTable Component
//!
//! Read-only table of interviews, already filtered by the caller.
//!
//! ```text
//! ╭ Interviews (2 of 5) ──────────────────────────────────────────────╮
//! │ #   Candidate     Interviewer  Time                      Status   │
//! │ 1   Alice Smith   7            01/05/2024, 10:00:00 am   scheduled│
//! │ 2   cand-9        8            -                         pending  │
//! ╰───────────────────────────────────────────────────────────────────╯
//! ```
//!
//! Selection lives in `CalendarTableState` so it survives re-renders; the
//! arrow keys move it and the table scrolls to keep it visible.

use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Cell, Paragraph, Row, Table, TableState};

use crate::api::Interview;
use crate::core::calendar::format_time;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

pub const LOADING_TEXT: &str = "Loading interviews…";
pub const EMPTY_TEXT: &str = "No interviews found";

const PAGE_ROWS: usize = 10;

#[derive(Default)]
pub struct CalendarTableState {
    pub table: TableState,
}

impl CalendarTableState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.table = TableState::default();
    }

    fn step(&mut self, delta: isize) {
        let next = match self.table.selected() {
            None => 0,
            Some(current) => (current as isize + delta).max(0) as usize,
        };
        self.table.select(Some(next));
    }
}

impl EventHandler for CalendarTableState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.step(-1),
            TuiEvent::ScrollDown => self.step(1),
            TuiEvent::ScrollPageUp => self.step(-(PAGE_ROWS as isize)),
            TuiEvent::ScrollPageDown => self.step(PAGE_ROWS as isize),
            _ => {}
        }
        None
    }
}

pub struct CalendarTable<'a> {
    pub state: &'a mut CalendarTableState,
    /// Rows to show (after filtering)
    pub rows: &'a [&'a Interview],
    /// Size of the unfiltered list
    pub total: usize,
    pub is_loading: bool,
}

impl<'a> CalendarTable<'a> {
    pub fn new(
        state: &'a mut CalendarTableState,
        rows: &'a [&'a Interview],
        total: usize,
        is_loading: bool,
    ) -> Self {
        Self {
            state,
            rows,
            total,
            is_loading,
        }
    }

    fn title(&self) -> String {
        if self.rows.len() == self.total {
            format!("Interviews ({})", self.total)
        } else {
            format!("Interviews ({} of {})", self.rows.len(), self.total)
        }
    }
}

fn status_style(interview: &Interview) -> Style {
    if interview.is_scheduled() {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Yellow)
    }
}

fn table_row(index: usize, interview: &Interview) -> Row<'static> {
    Row::new(vec![
        Cell::from((index + 1).to_string()),
        Cell::from(interview.candidate_display().to_string()),
        Cell::from(interview.interviewer_id.clone()),
        Cell::from(format_time(interview.scheduled_time.as_deref())),
        Cell::from(interview.status.clone()).style(status_style(interview)),
    ])
}

impl<'a> Component for CalendarTable<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::bordered()
            .title(self.title())
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        if self.is_loading || self.rows.is_empty() {
            let text = if self.is_loading { LOADING_TEXT } else { EMPTY_TEXT };
            let placeholder = Paragraph::new(text)
                .style(Style::default().fg(Color::DarkGray))
                .block(block);
            frame.render_widget(placeholder, area);
            return;
        }

        // Clamp selection to the (possibly re-filtered) row count.
        if let Some(selected) = self.state.table.selected() {
            let last = self.rows.len() - 1;
            if selected > last {
                self.state.table.select(Some(last));
            }
        }

        let header = Row::new(vec!["#", "Candidate", "Interviewer", "Time", "Status"])
            .style(Style::default().add_modifier(Modifier::BOLD))
            .bottom_margin(0);

        let rows = self
            .rows
            .iter()
            .enumerate()
            .map(|(i, interview)| table_row(i, interview));

        let widths = [
            Constraint::Length(4),
            Constraint::Fill(2),
            Constraint::Fill(1),
            Constraint::Length(24),
            Constraint::Length(11),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .column_spacing(1)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

        frame.render_stateful_widget(table, area, &mut self.state.table);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::interview;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(rows: &[&Interview], total: usize, is_loading: bool) -> String {
        let backend = TestBackend::new(90, 8);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut state = CalendarTableState::new();
        terminal
            .draw(|f| CalendarTable::new(&mut state, rows, total, is_loading).render(f, f.area()))
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
    fn renders_rows_with_formatted_time() {
        let alice = interview("1", Some("Alice Smith"), "7");
        let nameless = interview("2", None, "8");
        let text = render_text(&[&alice, &nameless], 2, false);

        assert!(text.contains("Interviews (2)"));
        assert!(text.contains("Candidate"));
        assert!(text.contains("Alice Smith"));
        assert!(text.contains("cand-2"));
        assert!(text.contains("01/05/2024, 10:00:00 am"));
        assert!(text.contains("scheduled"));
    }

    #[test]
    fn filtered_title_shows_counts() {
        let alice = interview("1", Some("Alice"), "7");
        let text = render_text(&[&alice], 5, false);
        assert!(text.contains("Interviews (1 of 5)"));
    }

    #[test]
    fn empty_and_loading_states() {
        assert!(render_text(&[], 0, false).contains(EMPTY_TEXT));
        assert!(render_text(&[], 0, true).contains(LOADING_TEXT));
    }

    #[test]
    fn status_styles() {
        let mut row = interview("1", None, "7");
        assert_eq!(status_style(&row).fg, Some(Color::Green));
        row.status = "pending".to_string();
        assert_eq!(status_style(&row).fg, Some(Color::Yellow));
    }

    #[test]
    fn selection_moves_and_stops_at_top() {
        let mut state = CalendarTableState::new();
        state.handle_event(&TuiEvent::ScrollDown);
        state.handle_event(&TuiEvent::ScrollDown);
        assert_eq!(state.table.selected(), Some(1));
        state.handle_event(&TuiEvent::ScrollPageUp);
        assert_eq!(state.table.selected(), Some(0));
    }
}
