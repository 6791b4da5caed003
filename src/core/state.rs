//! # Application State
//!
//! Core business state for the console. Domain logic only, no TUI types.
//! Presentation state (scroll offsets, input buffer) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── conversation: Conversation   // session + in-flight flag + generation
//! ├── calendar: CalendarState      // interviews, query, loading
//! ├── view: View                   // which top-level view is showing
//! └── status_message: String       // transient status text
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use crate::View;
use crate::core::calendar::CalendarState;
use crate::core::conversation::Conversation;

pub struct App {
    pub conversation: Conversation,
    pub calendar: CalendarState,
    pub view: View,
    pub status_message: String,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            conversation: Conversation::new(),
            calendar: CalendarState::new(),
            view: View::Assistant,
            status_message: String::new(),
        }
    }
}
