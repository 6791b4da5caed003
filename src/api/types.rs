//! Wire types for the scheduling backend.
//!
//! The backend is loose about its JSON: ids arrive as numbers or strings,
//! tool traces name the tool `name` or `tool_name`, and optional fields are
//! frequently absent or null. These types absorb that at the edge so the
//! rest of the crate works with plain Rust values.

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Request body for `POST /chat`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub conversation_id: String,
    pub user_message: String,
}

/// Response body for `POST /chat`. Unknown fields are ignored.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ChatResponse {
    #[serde(default)]
    pub reply: Option<String>,
    #[serde(default)]
    pub trace: Option<Vec<TraceEvent>>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub interview_id: Option<String>,
}

/// A backend-emitted record of an agent hand-off or a tool invocation.
///
/// Records of any other type, and agent or tool records this client cannot
/// read, are kept verbatim as `Unknown`. One odd entry never fails a whole
/// response, and the raw record survives a snapshot round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum TraceEvent {
    Agent(AgentTrace),
    Tool(ToolTrace),
    Unknown(serde_json::Value),
}

#[derive(Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownEvent {
    Agent(AgentTrace),
    Tool(ToolTrace),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum KnownEventRef<'a> {
    Agent(&'a AgentTrace),
    Tool(&'a ToolTrace),
}

impl Serialize for TraceEvent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            TraceEvent::Agent(agent) => KnownEventRef::Agent(agent).serialize(serializer),
            TraceEvent::Tool(tool) => KnownEventRef::Tool(tool).serialize(serializer),
            TraceEvent::Unknown(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for TraceEvent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = serde_json::Value::deserialize(deserializer)?;
        Ok(match KnownEvent::deserialize(&raw) {
            Ok(KnownEvent::Agent(agent)) => TraceEvent::Agent(agent),
            Ok(KnownEvent::Tool(tool)) => TraceEvent::Tool(tool),
            Err(e) => {
                log::debug!("Keeping unreadable trace event as-is: {}", e);
                TraceEvent::Unknown(raw)
            }
        })
    }
}

impl TraceEvent {
    pub fn as_agent(&self) -> Option<&AgentTrace> {
        match self {
            TraceEvent::Agent(agent) => Some(agent),
            _ => None,
        }
    }

    pub fn as_tool(&self) -> Option<&ToolTrace> {
        match self {
            TraceEvent::Tool(tool) => Some(tool),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AgentTrace {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ToolTrace {
    #[serde(alias = "name")]
    pub tool_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub input: serde_json::Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ToolTrace {
    pub fn succeeded(&self) -> bool {
        self.status.as_deref() == Some("success")
    }
}

/// One row of `GET /interviews`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Interview {
    #[serde(deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub candidate_id: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub candidate_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub interviewer_id: String,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub scheduled_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: String,
}

impl Interview {
    /// Candidate name if the backend sent one, otherwise the candidate id.
    pub fn candidate_display(&self) -> &str {
        match self.candidate_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.candidate_id,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.status.eq_ignore_ascii_case("scheduled")
    }
}

fn value_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

/// Accepts a string, number or bool and stores it as text. Null becomes "".
fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value))
}
