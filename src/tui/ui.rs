use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};

use crate::View;
use crate::core::state::App;
use crate::tui::{Focus, TuiState};
use crate::tui::component::Component;
use crate::tui::components::{
    CalendarTable, MessageList, NavBar, StatusBar, TimelinePanel, ToolInspector,
};

/// Below this width the activity column is dropped so the chat stays usable.
const MIN_WIDTH_FOR_SIDEBAR: u16 = 80;
/// Height of the calendar search field.
const SEARCH_HEIGHT: u16 = 3;

/// Renders one frame.
///
/// ```text
/// ┌ nav ──────────────────────────────────────────────────┐
/// │ status                           │ agent timeline     │
/// │ messages                         │                    │
/// │                                  ├────────────────────┤
/// │                                  │ tool inspector     │
/// │ input                            │                    │
/// └───────────────────────────────────────────────────────┘
/// ```
pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let [nav_area, body_area] = Layout::vertical([Length(1), Min(0)]).areas(frame.area());

    NavBar::new(app.view, &app.status_message).render(frame, nav_area);

    match app.view {
        View::Assistant => draw_assistant(frame, body_area, app, tui, spinner_frame),
        View::Calendar => draw_calendar(frame, body_area, app, tui),
    }
}

fn draw_assistant(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min, Percentage};

    let (chat_area, side_area) = if area.width >= MIN_WIDTH_FOR_SIDEBAR {
        let [chat, side] = Layout::horizontal([Percentage(62), Percentage(38)]).areas(area);
        (chat, Some(side))
    } else {
        // Hidden panels cannot hold the scroll focus.
        tui.focus = Focus::Messages;
        (area, None)
    };

    let session = &app.conversation.session;
    let input_height = tui.input_box.calculate_height(chat_area.width);
    let [status_area, messages_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(chat_area);

    StatusBar::new(&session.active_agent, &session.conversation_id).render(frame, status_area);
    MessageList::new(
        &mut tui.message_list,
        &session.messages,
        app.conversation.is_loading,
        spinner_frame,
    )
    .render(frame, messages_area);
    tui.input_box.render(frame, input_area);

    if let Some(side) = side_area {
        let [timeline_area, tools_area] =
            Layout::vertical([Percentage(40), Min(0)]).areas(side);
        TimelinePanel::new(&session.timeline, &session.active_agent, &mut tui.timeline_scroll)
            .focused(tui.focus == Focus::Timeline)
            .render(frame, timeline_area);
        ToolInspector::new(&session.tool_logs, &mut tui.tool_scroll)
            .focused(tui.focus == Focus::Tools)
            .render(frame, tools_area);
    }
}

fn draw_calendar(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [search_area, table_area] = Layout::vertical([Length(SEARCH_HEIGHT), Min(0)]).areas(area);

    tui.search_box.render(frame, search_area);

    let rows = app.calendar.filtered();
    CalendarTable::new(
        &mut tui.calendar_table,
        &rows,
        app.calendar.items.len(),
        app.calendar.is_loading,
    )
    .render(frame, table_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::ChatResponse;
    use crate::core::action::{Action, update};
    use crate::test_support::{agent_event, interview, tool_event};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(app: &App, width: u16) -> String {
        let backend = TestBackend::new(width, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut tui = TuiState::new();
        terminal.draw(|f| draw_ui(f, app, &mut tui, 0)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn fresh_assistant_view_shows_empty_states() {
        let app = App::new();
        let text = render(&app, 120);
        assert!(text.contains("Active agent: -"));
        assert!(text.contains("Start a conversation to schedule an interview"));
        assert!(text.contains("No activity yet"));
        assert!(text.contains("No tools used yet"));
    }

    #[test]
    fn assistant_view_reflects_merged_response() {
        let mut app = App::new();
        let Some(pending) = app.conversation.begin_send("Book Alice") else {
            panic!("send should start");
        };
        update(
            &mut app,
            Action::ChatCompleted {
                generation: pending.generation,
                result: Ok(ChatResponse {
                    reply: Some("Booked for Friday".to_string()),
                    trace: Some(vec![agent_event("SchedulingAgent"), tool_event("calendar_read")]),
                    ..Default::default()
                }),
            },
        );

        let text = render(&app, 120);
        assert!(text.contains("Active agent: SchedulingAgent"));
        assert!(text.contains("Booked for Friday"));
        assert!(text.contains("Agent timeline (1)"));
        assert!(text.contains("calendar_read"));
    }

    #[test]
    fn narrow_terminal_hides_sidebar() {
        let app = App::new();
        let text = render(&app, 60);
        assert!(!text.contains("No tools used yet"));
    }

    #[test]
    fn narrow_terminal_returns_focus_to_messages() {
        let app = App::new();
        let mut tui = TuiState::new();
        tui.focus = Focus::Tools;
        let mut terminal = Terminal::new(TestBackend::new(60, 30)).unwrap();
        terminal.draw(|f| draw_ui(f, &app, &mut tui, 0)).unwrap();
        assert_eq!(tui.focus, Focus::Messages);
    }

    #[test]
    fn calendar_view_shows_table() {
        let mut app = App::new();
        app.view = View::Calendar;
        app.calendar.items = vec![interview("1", Some("Alice Smith"), "7")];
        let text = render(&app, 120);
        assert!(text.contains("Search"));
        assert!(text.contains("Alice Smith"));
        assert!(text.contains("01/05/2024, 10:00:00 am"));
    }
}
