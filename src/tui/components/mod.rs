//! # TUI Components
//!
//! All UI pieces of the terminal interface.
//!
//! ## Stateless Components (Props-Based Rendering)
//!
//! Created fresh each frame from borrowed state:
//! - `NavBar`: view tabs and status text
//! - `StatusBar`: active agent and conversation id
//! - `Message`: one chat bubble
//! - `TimelinePanel`: agent hand-offs
//! - `ToolInspector`: tool invocations with their input
//!
//! ## Stateful Components (Event-Driven)
//!
//! Keep local state across frames and implement `EventHandler`:
//! - `InputBox`: chat composer and calendar search field
//! - `MessageList`: scrollable bubbles with a layout cache
//! - `CalendarTable`: interview table with a row selection
//! - `PanelScroll`: scroll position shared by the timeline and tool panels
//!
//! Components receive data as props, never by reaching into `App`:
//!
//! ```rust,ignore
//! StatusBar::new(&session.active_agent, &session.conversation_id).render(frame, area);
//! ```
//!
//! ```text
//! components/
//! ├── mod.rs            (this file)
//! ├── nav_bar.rs        (view tabs)
//! ├── status_bar.rs     (active agent line)
//! ├── message.rs        (single bubble)
//! ├── message_list.rs   (scrollable bubbles)
//! ├── input_box.rs      (text field)
//! ├── timeline_panel.rs (agent timeline)
//! ├── tool_inspector.rs (tool log)
//! ├── panel_scroll.rs   (side panel scrolling)
//! └── calendar_table.rs (interview table)
//! ```

pub mod calendar_table;
pub mod input_box;
pub mod message;
pub mod message_list;
mod nav_bar;
pub mod panel_scroll;
mod status_bar;
pub mod timeline_panel;
pub mod tool_inspector;

pub use calendar_table::{CalendarTable, CalendarTableState};
pub use input_box::{InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use nav_bar::NavBar;
pub use panel_scroll::PanelScroll;
pub use status_bar::StatusBar;
pub use timeline_panel::TimelinePanel;
pub use tool_inspector::ToolInspector;
