//! Custom error types for the BrowserAct client
//!
//! Splits remote failures (the service answered with its error envelope)
//! from transport and local failures, so callers can branch on the
//! service's numeric codes.

use serde::Deserialize;
use thiserror::Error;

/// Error codes the service uses for common failure modes.
pub mod codes {
    /// Invalid or missing bearer token.
    pub const INVALID_AUTHORIZATION: i64 = 401;
    /// The referenced agent does not exist.
    pub const AGENT_NOT_FOUND: i64 = 10010;
    /// The referenced task does not exist.
    pub const TASK_NOT_FOUND: i64 = 10112;
    /// The account already has the maximum number of running tasks.
    pub const RUNNING_TASKS_EXCEEDED: i64 = 10118;
    /// Lifecycle call on a task that already reached a terminal status.
    pub const TASK_COMPLETED: i64 = 10121;
    /// Resume called on a task that is not paused.
    pub const RESUME_REQUIRES_PAUSED: i64 = 10127;
}

/// JSON envelope the service returns for any non-2xx response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub code: i64,
    pub msg: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub ts: Option<i64>,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default, rename = "traceId")]
    pub trace_id: Option<String>,
}

/// Main error type for BrowserAct operations
#[derive(Error, Debug)]
pub enum BrowserActError {
    /// The service answered non-2xx with its structured error envelope
    #[error("API error {code}: {msg} (HTTP {status})")]
    Api {
        status: u16,
        code: i64,
        msg: String,
        trace_id: Option<String>,
    },

    /// Non-2xx response whose body is not the error envelope
    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Request parameters rejected before anything was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Generic error for other cases
    #[error("{0}")]
    Other(String),
}

/// Convenience Result type for BrowserAct operations
pub type Result<T> = std::result::Result<T, BrowserActError>;

impl BrowserActError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid-request error
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// The service's numeric error code, when this is a remote error.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            BrowserActError::Api { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Map a non-2xx response body to an error.
    ///
    /// Falls back to [`BrowserActError::Status`] when the body is not the
    /// service's JSON envelope (proxies, gateways, HTML error pages).
    pub fn from_error_body(status: u16, body: &str) -> Self {
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(envelope) => BrowserActError::Api {
                status,
                code: envelope.code,
                msg: envelope.msg,
                trace_id: envelope.trace_id,
            },
            Err(_) => BrowserActError::Status {
                status,
                body: body.to_string(),
            },
        }
    }
}
