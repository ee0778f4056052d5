//! Wire types and errors for the chat-completions exchange.
//!
//! Request body: `{ model, messages, temperature, max_tokens }`.
//! Response body: `choices[0].message.content`. Any non-success status or
//! malformed body is a request failure.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use ritu_core::conversation::{ConversationMessage, MessageRole};

/// Errors produced by a completion call.
#[derive(Debug)]
pub enum CompletionError {
    /// The HTTP exchange failed or the endpoint returned a non-success status.
    Process {
        status_code: Option<u16>,
        message: String,
        is_retryable: bool,
        retry_after: Option<Duration>,
    },
    /// The response body could not be parsed.
    Parse(String),
    /// The response parsed but carried no content.
    EmptyResponse,
}

impl std::fmt::Display for CompletionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CompletionError::Process {
                status_code,
                message,
                ..
            } => match status_code {
                Some(status) => write!(f, "completion request failed ({status}): {message}"),
                None => write!(f, "completion request failed: {message}"),
            },
            CompletionError::Parse(message) => {
                write!(f, "failed to parse completion response: {message}")
            }
            CompletionError::EmptyResponse => {
                write!(f, "completion response contained no content")
            }
        }
    }
}

impl std::error::Error for CompletionError {}

/// A single message in the request body.
#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant",
            content: content.into(),
        }
    }
}

impl From<&ConversationMessage> for WireMessage {
    fn from(message: &ConversationMessage) -> Self {
        match message.role {
            MessageRole::User => WireMessage::user(message.content.clone()),
            MessageRole::Assistant => WireMessage::assistant(message.content.clone()),
        }
    }
}

/// The completion request body.
#[derive(Debug, Clone, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

#[derive(Deserialize)]
pub(crate) struct CompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

pub(crate) fn extract_text_response(
    response: CompletionResponse,
) -> Result<String, CompletionError> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(CompletionError::EmptyResponse)
}

/// Maps a non-success HTTP status and body to a `CompletionError`, preferring
/// the endpoint's structured error message when the body carries one.
pub(crate) fn map_http_error(
    status: u16,
    body: String,
    retry_after: Option<Duration>,
) -> CompletionError {
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|wrapper| wrapper.error.message)
        .unwrap_or(body);

    // 429 and 5xx are worth retrying; everything else is a caller bug.
    let is_retryable = status == 429 || (500..=599).contains(&status);

    CompletionError::Process {
        status_code: Some(status),
        message,
        is_retryable,
        retry_after,
    }
}

/// Parses an integer `Retry-After` header value.
///
/// Retry-After HTTP-date parsing is omitted for simplicity.
pub(crate) fn parse_retry_after(value: Option<&str>) -> Option<Duration> {
    value?.parse::<u64>().ok().map(Duration::from_secs)
}
