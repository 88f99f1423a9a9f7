use std::fmt;

use reqclass_core::{ErrorBody, ValidationError};
use thiserror::Error;

/// The four calls the API offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Classify,
    ClassifyFile,
    Analyze,
    Search,
}

impl Operation {
    /// Endpoint path, relative to the configured base URL.
    pub fn path(&self) -> &'static str {
        match self {
            Self::Classify => "/api/classify",
            Self::ClassifyFile => "/api/classify/file",
            Self::Analyze => "/api/analyze",
            Self::Search => "/api/search",
        }
    }

    /// Message shown when the server gives no usable `message`.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Classify => "An error occurred during classification",
            Self::ClassifyFile => "An error occurred while processing the file",
            Self::Analyze => "An error occurred during analysis",
            Self::Search => "An error occurred during search",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Classify => "classify",
            Self::ClassifyFile => "classify_file",
            Self::Analyze => "analyze",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request that never produced an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct TransportFailure(pub String);

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

/// Coarse tag of an [`OperationError`], for callers that only branch on kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Transport,
    Server,
}

/// Every way an operation can fail, normalized at the client boundary.
///
/// `Display` yields the user-displayable message and nothing else.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    /// Input rejected locally; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// No response, or a success response that could not be decoded.
    #[error("{message}")]
    Transport {
        operation: Operation,
        message: String,
        detail: String,
    },

    /// Non-2xx response.
    #[error("{message}")]
    Server {
        operation: Operation,
        status: u16,
        message: String,
    },
}

impl OperationError {
    pub(crate) fn transport(operation: Operation, detail: impl fmt::Display) -> Self {
        Self::Transport {
            operation,
            message: operation.default_message().to_string(),
            detail: detail.to_string(),
        }
    }

    /// Build a server error from a non-2xx body, using its `message` verbatim
    /// when present.
    pub(crate) fn server(operation: Operation, status: u16, body: &[u8]) -> Self {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.message().map(str::to_string))
            .unwrap_or_else(|| operation.default_message().to_string());
        Self::Server {
            operation,
            status,
            message,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Server { .. } => ErrorKind::Server,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}
