//! Wire types and the HTTP client for the scheduling backend.

pub mod client;
pub mod types;

pub use client::{ApiError, HttpBackend, SchedulerBackend};
pub use types::{AgentTrace, ChatRequest, ChatResponse, Interview, ToolTrace, TraceEvent};
