//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//! terminal event ──→ component ──→ Action ─┐
//! background task ──→ mpsc ──→ Action ─────┼──→ update() ──→ Effect
//!                                          │                  ├── SpawnChat      → tokio task
//!                                          │                  ├── FetchInterviews → tokio task
//!                                          └── store.sync() ←─┘
//! ```
//!
//! Every action is followed by `SnapshotStore::sync`, which is the only
//! writer of the snapshot slot.
//!
//! ## Redraw Strategy
//!
//! - **Animating** (a chat request or fetch is in flight): draws every ~80ms
//!   so the typing spinner moves.
//! - **Idle**: sleeps up to 500ms, only redraws on events or terminal resize.
//!
//! A `SteadyBlock` cursor style is used instead of a blinking cursor because
//! ratatui's `set_cursor_position` resets the terminal's blink timer on every
//! `draw()` call.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;

use crate::View;
use crate::api::SchedulerBackend;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::conversation::PendingChat;
use crate::core::state::App;
use crate::core::store::SnapshotStore;
use crate::tui::component::EventHandler;
use crate::tui::components::{
    CalendarTableState, InputBox, InputEvent, MessageListState, PanelScroll,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// Which assistant-view pane receives scroll events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Messages,
    Timeline,
    Tools,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Messages => Focus::Timeline,
            Focus::Timeline => Focus::Tools,
            Focus::Tools => Focus::Messages,
        }
    }
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub search_box: InputBox,
    pub calendar_table: CalendarTableState,
    pub focus: Focus,
    pub timeline_scroll: PanelScroll,
    pub tool_scroll: PanelScroll,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new("Message"),
            search_box: InputBox::search("Search by id, candidate or interviewer"),
            calendar_table: CalendarTableState::new(),
            focus: Focus::Messages,
            timeline_scroll: PanelScroll::new(),
            tool_scroll: PanelScroll::new(),
        }
    }

    /// Drops presentation state tied to the previous conversation.
    fn reset_conversation(&mut self) {
        self.message_list = MessageListState::new();
        self.input_box.clear();
        self.focus = Focus::Messages;
        self.timeline_scroll = PanelScroll::new();
        self.tool_scroll = PanelScroll::new();
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Kitty keyboard protocol lets Shift+Enter through; terminals without
        // it ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
    }
}

/// Owns the pieces the event loop threads through every action.
struct Runtime {
    app: App,
    tui: TuiState,
    store: SnapshotStore,
    backend: Arc<dyn SchedulerBackend>,
    tx: mpsc::Sender<Action>,
}

impl Runtime {
    /// Applies an action, performs its effect, and syncs the snapshot.
    /// Returns true when the loop should exit.
    fn dispatch(&mut self, action: Action) -> bool {
        let effect = update(&mut self.app, action);
        self.store.sync(&self.app.conversation.session);

        match effect {
            Effect::None => false,
            Effect::Quit => true,
            Effect::SpawnChat(pending) => {
                spawn_chat(self.backend.clone(), pending, self.tx.clone());
                false
            }
            Effect::FetchInterviews { seq } => {
                spawn_fetch(self.backend.clone(), seq, self.tx.clone());
                false
            }
        }
    }

    fn handle_event(&mut self, event: TuiEvent) -> bool {
        match event {
            TuiEvent::ForceQuit => self.dispatch(Action::Quit),
            TuiEvent::Resize => false,
            TuiEvent::NextView => self.switch_view(None),
            TuiEvent::ShowAssistant => self.switch_view(Some(View::Assistant)),
            TuiEvent::ShowCalendar => self.switch_view(Some(View::Calendar)),
            TuiEvent::NewConversation => {
                self.tui.reset_conversation();
                self.dispatch(Action::NewConversation)
            }
            TuiEvent::Refresh => self.dispatch(Action::RefreshInterviews),
            TuiEvent::CycleFocus => {
                if self.app.view == View::Assistant {
                    self.tui.focus = self.tui.focus.next();
                    debug!("Scroll focus: {:?}", self.tui.focus);
                }
                false
            }
            TuiEvent::ScrollUp
            | TuiEvent::ScrollDown
            | TuiEvent::ScrollPageUp
            | TuiEvent::ScrollPageDown => {
                match (self.app.view, self.tui.focus) {
                    (View::Calendar, _) => self.tui.calendar_table.handle_event(&event),
                    (View::Assistant, Focus::Messages) => {
                        self.tui.message_list.handle_event(&event)
                    }
                    (View::Assistant, Focus::Timeline) => {
                        self.tui.timeline_scroll.handle_event(&event)
                    }
                    (View::Assistant, Focus::Tools) => self.tui.tool_scroll.handle_event(&event),
                };
                false
            }
            TuiEvent::Escape if self.app.view == View::Calendar => {
                self.tui.search_box.clear();
                self.tui.calendar_table.reset();
                self.dispatch(Action::CalendarQueryChanged(String::new()))
            }
            _ => match self.app.view {
                View::Assistant => match self.tui.input_box.handle_event(&event) {
                    Some(InputEvent::Submit(text)) => {
                        self.tui.message_list.stick_to_bottom = true;
                        self.dispatch(Action::Submit(text))
                    }
                    _ => false,
                },
                View::Calendar => match self.tui.search_box.handle_event(&event) {
                    Some(InputEvent::ContentChanged) => {
                        self.tui.calendar_table.reset();
                        let query = self.tui.search_box.buffer.clone();
                        self.dispatch(Action::CalendarQueryChanged(query))
                    }
                    _ => false,
                },
            },
        }
    }

    fn switch_view(&mut self, target: Option<View>) -> bool {
        let action = match target {
            Some(view) => Action::SwitchView(view),
            None => Action::NextView,
        };
        let quit = self.dispatch(action);
        // Entering the calendar starts from an empty query.
        if self.app.calendar.query.is_empty() {
            self.tui.search_box.clear();
            self.tui.calendar_table.reset();
        }
        quit
    }

    fn is_animating(&self) -> bool {
        self.app.conversation.is_loading || self.app.calendar.is_loading
    }
}

pub fn run(
    config: &ResolvedConfig,
    backend: Arc<dyn SchedulerBackend>,
    mut store: SnapshotStore,
) -> std::io::Result<()> {
    let mut app = App::new();
    if let Some(snapshot) = store.load() {
        app.conversation.restore(snapshot);
    }

    let (tx, rx) = mpsc::channel();
    let mut rt = Runtime {
        app,
        tui: TuiState::new(),
        store,
        backend,
        tx,
    };
    rt.dispatch(Action::SwitchView(config.start_view));

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let start_time = std::time::Instant::now();
    let mut needs_redraw = true;

    loop {
        rt.tui.input_box.disabled = rt.app.conversation.is_loading;

        let animating = rt.is_animating();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &rt.app, &mut rt.tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating {
            std::time::Duration::from_millis(80)
        } else {
            std::time::Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain everything pending before the next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if rt.handle_event(event) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }

        // Results from background tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if rt.dispatch(action) {
                should_quit = true;
                break;
            }
        }

        if should_quit {
            break;
        }
    }

    rt.store.sync(&rt.app.conversation.session);

    ratatui::restore();
    Ok(())
}

fn spawn_chat(backend: Arc<dyn SchedulerBackend>, pending: PendingChat, tx: mpsc::Sender<Action>) {
    info!(
        "Spawning chat request (conversation {}, generation {})",
        pending.request.conversation_id, pending.generation
    );
    tokio::spawn(async move {
        let result = backend.chat(&pending.request).await;
        let action = Action::ChatCompleted {
            generation: pending.generation,
            result,
        };
        if tx.send(action).is_err() {
            warn!("Failed to deliver chat response: receiver dropped");
        }
    });
}

fn spawn_fetch(backend: Arc<dyn SchedulerBackend>, seq: u64, tx: mpsc::Sender<Action>) {
    info!("Spawning interview fetch #{}", seq);
    tokio::spawn(async move {
        let result = backend.list_interviews().await;
        if tx.send(Action::InterviewsLoaded { seq, result }).is_err() {
            warn!("Failed to deliver interviews: receiver dropped");
        }
    });
}
