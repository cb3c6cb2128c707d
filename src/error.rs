//! Error types returned by [`FastOtpClient`](crate::FastOtpClient).
//!
//! Nothing here ever carries the API key. URLs are built from the base URL
//! and path segments only, and headers are never formatted into messages.

use std::fmt;

use reqwest::{Method, StatusCode};

/// Boxed error produced by a [`Transport`](crate::transport::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

/// Client-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The client was set up with an unusable configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required call parameter was missing or malformed. No request was sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request could not be completed, or the service answered non-2xx.
    #[error("{method} request to {url} failed: {cause}")]
    RequestFailed {
        method: Method,
        url: String,
        #[source]
        cause: RequestFailure,
    },

    /// The service answered 2xx but the body was not valid JSON.
    #[error("Failed to decode response from {method} {url}: {source}")]
    Decode {
        method: Method,
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// HTTP status of a non-2xx answer, if that is what this error is.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::RequestFailed {
                cause: RequestFailure::Status { status, .. },
                ..
            } => Some(*status),
            _ => None,
        }
    }

    /// True when the service answered with a non-2xx status.
    pub fn is_status(&self) -> bool {
        self.status().is_some()
    }

    pub(crate) fn invalid_argument(name: &str) -> Self {
        Self::InvalidArgument(format!("`{name}` must not be empty"))
    }
}

/// Underlying reason for [`Error::RequestFailed`].
#[derive(Debug)]
pub enum RequestFailure {
    /// Connection, TLS, timeout or other transport-level failure.
    Transport(BoxError),
    /// The service answered with a non-2xx status. `body` is the raw text,
    /// kept for diagnostics only.
    Status { status: StatusCode, body: String },
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "transport error: {err}"),
            Self::Status { status, body } if body.is_empty() => {
                write!(f, "HTTP {status}")
            }
            Self::Status { status, body } => write!(f, "HTTP {status}: {body}"),
        }
    }
}

impl std::error::Error for RequestFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err.as_ref()),
            Self::Status { .. } => None,
        }
    }
}
