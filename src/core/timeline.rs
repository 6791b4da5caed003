//! Read-only projections over a conversation's trace events.
//!
//! The conversation owns the timeline and tool log; panels only ever look
//! at them through these helpers.

use crate::api::{AgentTrace, ToolTrace, TraceEvent};

/// Agent hand-offs, oldest first.
pub fn agent_events(timeline: &[TraceEvent]) -> impl Iterator<Item = &AgentTrace> {
    timeline.iter().filter_map(TraceEvent::as_agent)
}

/// Tool invocations, oldest first.
pub fn tool_events(trace: &[TraceEvent]) -> impl Iterator<Item = &ToolTrace> {
    trace.iter().filter_map(TraceEvent::as_tool)
}

/// The most recent agent event, searching from newest to oldest.
pub fn latest_agent(trace: &[TraceEvent]) -> Option<&AgentTrace> {
    trace.iter().rev().find_map(TraceEvent::as_agent)
}
