use std::error::Error as _;

use reqwest::StatusCode;

/// Why a registry search produced no usable answer.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {message}")]
    Client { message: String },

    /// Connection or name resolution failed.
    #[error("registry unreachable: {message}")]
    Unreachable { message: String },

    #[error("registry request timed out: {message}")]
    Timeout { message: String },

    /// Any other I/O failure while talking to the registry.
    #[error("registry request failed: {message}")]
    Transport { message: String },

    #[error("registry responded with {0}")]
    Status(StatusCode),

    /// Body was not JSON or lacked the `objects` list.
    #[error("invalid registry response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl SearchError {
    pub(crate) fn from_request(err: reqwest::Error) -> Self {
        let message = describe(&err);
        if err.is_timeout() {
            Self::Timeout { message }
        } else if err.is_connect() {
            Self::Unreachable { message }
        } else if err.is_builder() {
            Self::Client { message }
        } else {
            Self::Transport { message }
        }
    }

    /// Short, stable name for the kind of failure.
    pub fn class_name(&self) -> &'static str {
        match self {
            Self::Client { .. } => "ClientError",
            Self::Unreachable { .. } => "Unreachable",
            Self::Timeout { .. } => "Timeout",
            Self::Transport { .. } => "TransportError",
            Self::Status(_) => "HttpStatus",
            Self::Decode(_) => "DecodeError",
        }
    }

    /// True when the registry could not be reached at all.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Unreachable { .. })
    }
}

// reqwest's Display stops at the outermost layer; DNS and connect details live
// further down the source chain.
fn describe(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
