//! # Conversation State
//!
//! Owns everything the assistant view shows: conversation id, message log,
//! active agent, agent timeline and tool log, plus the in-flight flag.
//!
//! ```text
//! begin_send(text)                       apply_response(generation, result)
//!   ├── blank / loading? → None            ├── stale generation? → dropped
//!   ├── push user Message                  ├── Ok  → merge trace + reply
//!   ├── is_loading = true                  ├── Err → "Server error."
//!   └── PendingChat { generation, req }    └── is_loading = false
//! ```
//!
//! A reset bumps `generation`, so a response that was already in flight when
//! the user started over is recognised as stale and ignored.
//!
//! Persistence is not done here. The session is plain serde data; the
//! single writer (`SnapshotStore::sync`) is driven by whoever owns the
//! controller.

use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::api::{ApiError, ChatRequest, ChatResponse, SchedulerBackend, ToolTrace, TraceEvent};
use crate::core::timeline;

/// Shown in the status bar when no agent has spoken yet.
pub const IDLE_AGENT: &str = "-";
/// Assistant message substituted for any failed chat request.
pub const SERVER_ERROR_TEXT: &str = "Server error.";
/// Assistant message appended when the backend confirms a booking.
pub const SCHEDULED_TEXT: &str = "Interview scheduled successfully.";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One chat bubble. Immutable once appended.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Milliseconds since the Unix epoch.
    #[serde(rename = "ts", alias = "timestamp")]
    pub timestamp: i64,
}

impl Message {
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// The whole session, in exactly the shape written to the snapshot slot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSession {
    pub conversation_id: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default = "idle_agent")]
    pub active_agent: String,
    #[serde(default)]
    pub timeline: Vec<TraceEvent>,
    #[serde(default)]
    pub tool_logs: Vec<ToolTrace>,
}

fn idle_agent() -> String {
    IDLE_AGENT.to_string()
}

impl Default for ConversationSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ConversationSession {
    pub fn new() -> Self {
        Self {
            conversation_id: new_conversation_id(),
            messages: Vec::new(),
            active_agent: idle_agent(),
            timeline: Vec::new(),
            tool_logs: Vec::new(),
        }
    }

    /// True when there is nothing worth persisting.
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty() && self.timeline.is_empty() && self.tool_logs.is_empty()
    }
}

pub fn new_conversation_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// A chat request tagged with the generation it was issued under.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingChat {
    pub generation: u64,
    pub request: ChatRequest,
}

pub struct Conversation {
    pub session: ConversationSession,
    pub is_loading: bool,
    generation: u64,
    restore_attempted: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            session: ConversationSession::new(),
            is_loading: false,
            generation: 0,
            restore_attempted: false,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Guards and optimistic half of a send.
    ///
    /// Returns `None` (and changes nothing) for blank text or while a request
    /// is already in flight.
    pub fn begin_send(&mut self, text: &str) -> Option<PendingChat> {
        let text = text.trim();
        if text.is_empty() {
            debug!("Ignoring blank message");
            return None;
        }
        if self.is_loading {
            debug!("Ignoring send while a request is in flight");
            return None;
        }

        self.session.messages.push(Message::new(Role::User, text));
        self.is_loading = true;

        Some(PendingChat {
            generation: self.generation,
            request: ChatRequest {
                conversation_id: self.session.conversation_id.clone(),
                user_message: text.to_string(),
            },
        })
    }

    /// Merge half of a send. Returns false when the response was stale.
    pub fn apply_response(
        &mut self,
        generation: u64,
        result: Result<ChatResponse, ApiError>,
    ) -> bool {
        if generation != self.generation {
            info!(
                "Dropping stale chat response (generation {} != {})",
                generation, self.generation
            );
            return false;
        }

        match result {
            Ok(response) => self.merge(response),
            Err(e) => {
                warn!("Chat request failed: {}", e);
                self.session
                    .messages
                    .push(Message::new(Role::Assistant, SERVER_ERROR_TEXT));
            }
        }

        self.is_loading = false;
        true
    }

    fn merge(&mut self, response: ChatResponse) {
        if let Some(trace) = response.trace {
            if let Some(agent) = timeline::latest_agent(&trace) {
                self.session.active_agent = agent.name.clone();
            }

            let tools: Vec<ToolTrace> = timeline::tool_events(&trace).cloned().collect();
            info!(
                "Merging response: {} trace events, {} tool calls",
                trace.len(),
                tools.len()
            );
            self.session.tool_logs.extend(tools);
            self.session.timeline.extend(trace);
        }

        if let Some(reply) = response.reply.filter(|r| !r.is_empty()) {
            self.session
                .messages
                .push(Message::new(Role::Assistant, reply));
        }

        if response.success == Some(true) && response.interview_id.is_some() {
            self.session
                .messages
                .push(Message::new(Role::Assistant, SCHEDULED_TEXT));
        }
    }

    /// Full send for callers that can await inline (the headless CLI).
    pub async fn send_message(&mut self, backend: &dyn SchedulerBackend, text: &str) -> bool {
        let Some(pending) = self.begin_send(text) else {
            return false;
        };
        let result = backend.chat(&pending.request).await;
        self.apply_response(pending.generation, result)
    }

    /// Replaces the session with a fresh one and invalidates in-flight requests.
    pub fn start_new(&mut self) {
        self.session = ConversationSession::new();
        self.is_loading = false;
        self.generation += 1;
        self.restore_attempted = false;
        info!(
            "Started new conversation {} (generation {})",
            self.session.conversation_id, self.generation
        );
    }

    /// Loads a persisted session, replacing (not merging) the current one.
    ///
    /// Only happens once, and only while the message log is empty.
    pub fn restore(&mut self, snapshot: ConversationSession) -> bool {
        if self.restore_attempted || !self.session.messages.is_empty() {
            return false;
        }
        self.restore_attempted = true;

        info!(
            "Restored conversation {} ({} messages)",
            snapshot.conversation_id,
            snapshot.messages.len()
        );
        self.session = snapshot;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{ScriptedBackend, agent_event, tool_event};

    fn response(trace: Vec<TraceEvent>, reply: Option<&str>) -> ChatResponse {
        ChatResponse {
            reply: reply.map(str::to_string),
            trace: Some(trace),
            ..Default::default()
        }
    }

    #[test]
    fn blank_message_is_ignored() {
        let mut conv = Conversation::new();
        assert!(conv.begin_send("").is_none());
        assert!(conv.begin_send("   \n\t").is_none());
        assert!(conv.session.messages.is_empty());
        assert!(!conv.is_loading);
    }

    #[test]
    fn send_appends_user_message_optimistically() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("  Book Alice for Monday  ").unwrap();

        assert!(conv.is_loading);
        assert_eq!(conv.session.messages.len(), 1);
        assert_eq!(conv.session.messages[0].role, Role::User);
        assert_eq!(conv.session.messages[0].text, "Book Alice for Monday");
        assert_eq!(pending.request.user_message, "Book Alice for Monday");
        assert_eq!(pending.request.conversation_id, conv.session.conversation_id);
    }

    #[test]
    fn second_send_while_loading_is_noop() {
        let mut conv = Conversation::new();
        let first = conv.begin_send("first").unwrap();
        assert!(conv.begin_send("second").is_none());
        assert_eq!(conv.session.messages.len(), 1);

        conv.apply_response(first.generation, Ok(ChatResponse::default()));
        assert!(conv.begin_send("third").is_some());
    }

    #[test]
    fn agent_trace_sets_active_agent() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(
            pending.generation,
            Ok(response(vec![agent_event("ConversationAgent")], Some("Hello"))),
        );

        assert_eq!(conv.session.active_agent, "ConversationAgent");
        assert_eq!(conv.session.timeline.len(), 1);
        assert_eq!(conv.session.messages.len(), 2);
        assert_eq!(conv.session.messages[1].role, Role::Assistant);
        assert_eq!(conv.session.messages[1].text, "Hello");
        assert!(!conv.is_loading);
    }

    #[test]
    fn newest_agent_wins() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(
            pending.generation,
            Ok(response(
                vec![agent_event("IntentDetectionAgent"), agent_event("SchedulingAgent")],
                None,
            )),
        );
        assert_eq!(conv.session.active_agent, "SchedulingAgent");
    }

    #[test]
    fn trace_without_agent_keeps_active_agent() {
        let mut conv = Conversation::new();
        conv.session.active_agent = "AvailabilityAgent".to_string();
        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(pending.generation, Ok(response(vec![tool_event("t")], None)));
        assert_eq!(conv.session.active_agent, "AvailabilityAgent");
    }

    #[test]
    fn tool_log_grows_by_tool_count_in_order() {
        let mut conv = Conversation::new();
        conv.session.tool_logs.push(tool_event("earlier").as_tool().unwrap().clone());

        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(
            pending.generation,
            Ok(response(
                vec![
                    agent_event("A"),
                    tool_event("calendar_read"),
                    tool_event("timezone"),
                    agent_event("B"),
                    tool_event("notify"),
                ],
                Some("ok"),
            )),
        );

        let names: Vec<&str> = conv
            .session
            .tool_logs
            .iter()
            .map(|t| t.tool_name.as_str())
            .collect();
        assert_eq!(names, vec!["earlier", "calendar_read", "timezone", "notify"]);
        assert_eq!(conv.session.timeline.len(), 5);
    }

    #[test]
    fn missing_or_empty_reply_appends_nothing() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(pending.generation, Ok(response(vec![], Some(""))));
        assert_eq!(conv.session.messages.len(), 1);
    }

    #[test]
    fn confirmed_booking_appends_confirmation() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("book it").unwrap();
        conv.apply_response(
            pending.generation,
            Ok(ChatResponse {
                reply: Some("Booked.".to_string()),
                success: Some(true),
                interview_id: Some("17".to_string()),
                ..Default::default()
            }),
        );

        let texts: Vec<&str> = conv.session.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["book it", "Booked.", SCHEDULED_TEXT]);
    }

    #[test]
    fn success_without_interview_id_has_no_confirmation() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("book it").unwrap();
        conv.apply_response(
            pending.generation,
            Ok(ChatResponse {
                success: Some(true),
                ..Default::default()
            }),
        );
        assert_eq!(conv.session.messages.len(), 1);
    }

    #[test]
    fn failed_request_appends_one_error_message() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(
            pending.generation,
            Err(ApiError::Network("connection refused".to_string())),
        );

        assert_eq!(conv.session.messages.len(), 2);
        assert_eq!(conv.session.messages[1].role, Role::Assistant);
        assert_eq!(conv.session.messages[1].text, SERVER_ERROR_TEXT);
        assert!(!conv.is_loading);
    }

    #[test]
    fn start_new_resets_everything() {
        let mut conv = Conversation::new();
        let old_id = conv.session.conversation_id.clone();
        let pending = conv.begin_send("hi").unwrap();
        conv.apply_response(
            pending.generation,
            Ok(response(vec![agent_event("A"), tool_event("t")], Some("yo"))),
        );

        conv.start_new();

        assert_ne!(conv.session.conversation_id, old_id);
        assert!(conv.session.messages.is_empty());
        assert!(conv.session.timeline.is_empty());
        assert!(conv.session.tool_logs.is_empty());
        assert_eq!(conv.session.active_agent, IDLE_AGENT);
        assert!(!conv.is_loading);
    }

    #[test]
    fn stale_response_after_reset_is_dropped() {
        let mut conv = Conversation::new();
        let pending = conv.begin_send("hi").unwrap();
        conv.start_new();

        let merged = conv.apply_response(
            pending.generation,
            Ok(response(vec![agent_event("Late")], Some("late reply"))),
        );

        assert!(!merged);
        assert!(conv.session.messages.is_empty());
        assert_eq!(conv.session.active_agent, IDLE_AGENT);
    }

    #[test]
    fn restore_reproduces_snapshot() {
        let snapshot = ConversationSession {
            conversation_id: "c1".to_string(),
            messages: vec![Message {
                role: Role::User,
                text: "m1".to_string(),
                timestamp: 1_700_000_000_000,
            }],
            active_agent: "X".to_string(),
            timeline: vec![],
            tool_logs: vec![],
        };

        let mut conv = Conversation::new();
        assert!(conv.restore(snapshot.clone()));
        assert_eq!(conv.session, snapshot);
    }

    #[test]
    fn restore_happens_at_most_once() {
        let mut conv = Conversation::new();
        let mut first = ConversationSession::new();
        first.conversation_id = "first".to_string();
        let mut second = ConversationSession::new();
        second.conversation_id = "second".to_string();

        assert!(conv.restore(first));
        assert!(!conv.restore(second));
        assert_eq!(conv.session.conversation_id, "first");
    }

    #[test]
    fn restore_skipped_for_live_session() {
        let mut conv = Conversation::new();
        conv.begin_send("live").unwrap();
        assert!(!conv.restore(ConversationSession::new()));
        assert_eq!(conv.session.messages[0].text, "live");
    }

    #[test]
    fn snapshot_json_shape() {
        let session = ConversationSession {
            conversation_id: "c1".to_string(),
            messages: vec![],
            active_agent: "X".to_string(),
            timeline: vec![agent_event("X")],
            tool_logs: vec![],
        };
        let value = serde_json::to_value(&session).unwrap();
        assert_eq!(value["conversationId"], "c1");
        assert_eq!(value["activeAgent"], "X");
        assert!(value["toolLogs"].is_array());
        assert_eq!(value["timeline"][0]["type"], "agent");
    }

    #[test]
    fn send_message_round_trip_through_backend() {
        let backend = ScriptedBackend::new();
        backend.push_chat(Ok(response(vec![agent_event("ConversationAgent")], Some("Hi!"))));

        let mut conv = Conversation::new();
        let merged = tokio_test::block_on(conv.send_message(&backend, "hello"));

        assert!(merged);
        assert_eq!(conv.session.messages.len(), 2);
        let requests = backend.chat_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].user_message, "hello");
    }

    #[test]
    fn send_message_blank_issues_no_request() {
        let backend = ScriptedBackend::new();
        let mut conv = Conversation::new();
        let sent = tokio_test::block_on(conv.send_message(&backend, "  "));
        assert!(!sent);
        assert!(backend.chat_requests().is_empty());
    }
}
