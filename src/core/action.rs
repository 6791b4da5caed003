//! # Actions
//!
//! Everything that can happen in the console becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend answers? That's `Action::ChatCompleted { .. }`.
//!
//! The `update()` function applies an action to the state and returns the
//! `Effect` the caller must perform. No I/O happens here: network calls and
//! snapshot writes are done by the adapter that owns the event loop.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```

use log::debug;

use crate::View;
use crate::api::{ApiError, ChatResponse, Interview};
use crate::core::conversation::PendingChat;
use crate::core::state::App;

#[derive(Debug)]
pub enum Action {
    /// User submitted the input box.
    Submit(String),
    /// A chat request finished (either way).
    ChatCompleted {
        generation: u64,
        result: Result<ChatResponse, ApiError>,
    },
    NewConversation,
    SwitchView(View),
    NextView,
    CalendarQueryChanged(String),
    RefreshInterviews,
    InterviewsLoaded {
        seq: u64,
        result: Result<Vec<Interview>, ApiError>,
    },
    Quit,
}

/// Side effect requested by `update`.
#[derive(Debug, PartialEq)]
pub enum Effect {
    None,
    /// Run this chat request in the background.
    SpawnChat(PendingChat),
    /// Fetch `GET /interviews`, tagging the result with `seq`.
    FetchInterviews { seq: u64 },
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::Submit(text) => match app.conversation.begin_send(&text) {
            Some(pending) => {
                app.status_message = "Waiting for the assistant…".to_string();
                Effect::SpawnChat(pending)
            }
            None => Effect::None,
        },
        Action::ChatCompleted { generation, result } => {
            if app.conversation.apply_response(generation, result) {
                app.status_message.clear();
            }
            Effect::None
        }
        Action::NewConversation => {
            app.conversation.start_new();
            app.status_message = "New conversation".to_string();
            Effect::None
        }
        Action::SwitchView(view) => enter_view(app, view),
        Action::NextView => {
            let next = app.view.next();
            enter_view(app, next)
        }
        Action::CalendarQueryChanged(query) => {
            app.calendar.query = query;
            Effect::None
        }
        Action::RefreshInterviews => Effect::FetchInterviews {
            seq: app.calendar.begin_fetch(),
        },
        Action::InterviewsLoaded { seq, result } => {
            app.calendar.apply_fetch(seq, result);
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

/// Showing the calendar (re)loads it, like a freshly mounted view.
fn enter_view(app: &mut App, view: View) -> Effect {
    let entering_calendar = view == View::Calendar && app.view != View::Calendar;
    app.view = view;

    if entering_calendar {
        app.calendar.query.clear();
        return Effect::FetchInterviews {
            seq: app.calendar.begin_fetch(),
        };
    }
    Effect::None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::conversation::SERVER_ERROR_TEXT;
    use crate::test_support::{agent_event, interview};

    #[test]
    fn submit_spawns_chat() {
        let mut app = App::new();
        let effect = update(&mut app, Action::Submit("hello".to_string()));
        match effect {
            Effect::SpawnChat(pending) => {
                assert_eq!(pending.request.user_message, "hello");
                assert_eq!(pending.generation, app.conversation.generation());
            }
            other => panic!("Expected SpawnChat, got {:?}", other),
        }
        assert!(app.conversation.is_loading);
    }

    #[test]
    fn blank_submit_has_no_effect() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Submit("   ".to_string())), Effect::None);
        assert!(app.conversation.session.messages.is_empty());
    }

    #[test]
    fn submit_while_loading_is_dropped() {
        let mut app = App::new();
        update(&mut app, Action::Submit("first".to_string()));
        assert_eq!(update(&mut app, Action::Submit("second".to_string())), Effect::None);
        assert_eq!(app.conversation.session.messages.len(), 1);
    }

    #[test]
    fn chat_completed_merges_response() {
        let mut app = App::new();
        let Effect::SpawnChat(pending) = update(&mut app, Action::Submit("hi".to_string())) else {
            panic!("Expected SpawnChat");
        };
        update(
            &mut app,
            Action::ChatCompleted {
                generation: pending.generation,
                result: Ok(ChatResponse {
                    reply: Some("Hello".to_string()),
                    trace: Some(vec![agent_event("ConversationAgent")]),
                    ..Default::default()
                }),
            },
        );
        assert_eq!(app.conversation.session.active_agent, "ConversationAgent");
        assert!(!app.conversation.is_loading);
        assert!(app.status_message.is_empty());
    }

    #[test]
    fn chat_failure_becomes_error_message() {
        let mut app = App::new();
        let Effect::SpawnChat(pending) = update(&mut app, Action::Submit("hi".to_string())) else {
            panic!("Expected SpawnChat");
        };
        update(
            &mut app,
            Action::ChatCompleted {
                generation: pending.generation,
                result: Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }),
            },
        );
        let last = app.conversation.session.messages.last().unwrap();
        assert_eq!(last.text, SERVER_ERROR_TEXT);
        assert!(!app.conversation.is_loading);
    }

    #[test]
    fn new_conversation_during_request_discards_late_reply() {
        let mut app = App::new();
        let Effect::SpawnChat(pending) = update(&mut app, Action::Submit("hi".to_string())) else {
            panic!("Expected SpawnChat");
        };
        update(&mut app, Action::NewConversation);
        update(
            &mut app,
            Action::ChatCompleted {
                generation: pending.generation,
                result: Ok(ChatResponse {
                    reply: Some("late".to_string()),
                    ..Default::default()
                }),
            },
        );
        assert!(app.conversation.session.messages.is_empty());
        assert!(!app.conversation.is_loading);
    }

    #[test]
    fn entering_calendar_fetches() {
        let mut app = App::new();
        let effect = update(&mut app, Action::SwitchView(View::Calendar));
        assert!(matches!(effect, Effect::FetchInterviews { .. }));
        assert_eq!(app.view, View::Calendar);
        assert!(app.calendar.is_loading);
    }

    #[test]
    fn entering_assistant_does_not_fetch() {
        let mut app = App::new();
        update(&mut app, Action::SwitchView(View::Calendar));
        assert_eq!(update(&mut app, Action::NextView), Effect::None);
        assert_eq!(app.view, View::Assistant);
    }

    #[test]
    fn interviews_loaded_and_filtered() {
        let mut app = App::new();
        let Effect::FetchInterviews { seq } = update(&mut app, Action::SwitchView(View::Calendar))
        else {
            panic!("Expected FetchInterviews");
        };
        update(
            &mut app,
            Action::InterviewsLoaded {
                seq,
                result: Ok(vec![
                    interview("1", Some("Alice Smith"), "10"),
                    interview("2", Some("Bob Jones"), "11"),
                ]),
            },
        );
        update(&mut app, Action::CalendarQueryChanged("alice".to_string()));

        let rows = app.calendar.filtered();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
        assert!(!app.calendar.is_loading);
    }

    #[test]
    fn refresh_bumps_fetch_sequence() {
        let mut app = App::new();
        let Effect::FetchInterviews { seq: first } = update(&mut app, Action::RefreshInterviews)
        else {
            panic!("Expected FetchInterviews");
        };
        let Effect::FetchInterviews { seq: second } = update(&mut app, Action::RefreshInterviews)
        else {
            panic!("Expected FetchInterviews");
        };
        assert!(second > first);
    }

    #[test]
    fn quit_returns_quit() {
        let mut app = App::new();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
