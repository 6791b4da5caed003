//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{
    AgentTrace, ApiError, ChatRequest, ChatResponse, Interview, SchedulerBackend, ToolTrace,
    TraceEvent,
};

/// A backend that replays queued responses and records what it was sent.
#[derive(Default)]
pub struct ScriptedBackend {
    chat_responses: Mutex<VecDeque<Result<ChatResponse, ApiError>>>,
    chat_requests: Mutex<Vec<ChatRequest>>,
    interviews: Mutex<Option<Vec<Interview>>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_chat(&self, response: Result<ChatResponse, ApiError>) {
        self.chat_responses.lock().unwrap().push_back(response);
    }

    pub fn set_interviews(&self, items: Vec<Interview>) {
        *self.interviews.lock().unwrap() = Some(items);
    }

    pub fn chat_requests(&self) -> Vec<ChatRequest> {
        self.chat_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchedulerBackend for ScriptedBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        self.chat_requests.lock().unwrap().push(request.clone());
        self.chat_responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted response".to_string())))
    }

    async fn list_interviews(&self) -> Result<Vec<Interview>, ApiError> {
        self.interviews
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| ApiError::Network("no scripted interviews".to_string()))
    }
}

pub fn agent_event(name: &str) -> TraceEvent {
    TraceEvent::Agent(AgentTrace {
        name: name.to_string(),
        timestamp: Some("2024-05-01T10:00:00".to_string()),
        output: None,
    })
}

pub fn tool_event(name: &str) -> TraceEvent {
    TraceEvent::Tool(ToolTrace {
        tool_name: name.to_string(),
        status: Some("success".to_string()),
        input: serde_json::json!({ "candidate": "Alice" }),
        output: None,
        started_at: Some("10:00:01".to_string()),
        finished_at: Some("10:00:02".to_string()),
        timestamp: None,
    })
}

pub fn interview(id: &str, candidate_name: Option<&str>, interviewer_id: &str) -> Interview {
    Interview {
        id: id.to_string(),
        candidate_id: format!("cand-{id}"),
        candidate_name: candidate_name.map(str::to_string),
        interviewer_id: interviewer_id.to_string(),
        scheduled_time: Some("2024-05-01T04:30:00".to_string()),
        status: "scheduled".to_string(),
    }
}
