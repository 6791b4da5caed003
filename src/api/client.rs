use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::types::{ChatRequest, ChatResponse, Interview};

/// Errors that can occur while talking to the scheduling backend.
#[derive(Debug)]
pub enum ApiError {
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Backend answered with a non-success status.
    Api { status: u16, message: String },
    /// Response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The two calls the console makes against the backend.
#[async_trait]
pub trait SchedulerBackend: Send + Sync {
    /// Sends one chat turn.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError>;

    /// Lists every scheduled interview.
    async fn list_interviews(&self) -> Result<Vec<Interview>, ApiError>;
}

/// `SchedulerBackend` over HTTP JSON.
pub struct HttpBackend {
    base_url: String,
    client: reqwest::Client,
}

impl HttpBackend {
    /// `timeout` of `None` leaves requests unbounded.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Turns a non-success response into `ApiError::Api`, passing successes through.
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .await
            .unwrap_or_else(|_| "unknown error".to_string());
        warn!("Backend error: {} - {}", status, message);
        Err(ApiError::Api { status, message })
    }
}

#[async_trait]
impl SchedulerBackend for HttpBackend {
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        info!(
            "POST /chat: conversation_id={}, message_len={}",
            request.conversation_id,
            request.user_message.len()
        );

        let response = self
            .client
            .post(format!("{}/chat", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("/chat response status: {}", response.status());
        let response = Self::check_status(response).await?;

        response
            .json::<ChatResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }

    async fn list_interviews(&self) -> Result<Vec<Interview>, ApiError> {
        info!("GET /interviews");

        let response = self
            .client
            .get(format!("{}/interviews", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        debug!("/interviews response status: {}", response.status());
        let response = Self::check_status(response).await?;

        // The backend may answer `null` for an empty table.
        let items: Option<Vec<Interview>> = response
            .json()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))?;
        let items = items.unwrap_or_default();
        info!("Fetched {} interviews", items.len());
        Ok(items)
    }
}
