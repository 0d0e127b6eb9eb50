//! Error taxonomy shared by resolution and acquisition.
//!
//! Every failure is recoverable at the `Resolver` / `Acquirer` boundary; the
//! kind exists for logging and diagnostics, not for end users.

use thiserror::Error;

/// High-level classification of a [`FetchError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input or a URL that does not have the expected shape.
    InvalidInput,
    /// Network or HTTP failure talking to an API or asset host.
    UpstreamUnavailable,
    /// JSON or XML body missing the fields we rely on.
    UnexpectedShape,
    /// External muxer failed or timed out.
    MuxFailure,
    /// Local filesystem failure (media dir unwritable, disk full).
    Storage,
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Curl reported an error (timeout, connection, DNS, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// HTTP response had a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },

    #[error("unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("mux failed: {0}")]
    MuxFailure(String),

    #[error("storage: {0}")]
    Storage(#[from] std::io::Error),
}

impl FetchError {
    pub(crate) fn transport(url: &str, source: curl::Error) -> Self {
        FetchError::Transport {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn shape(msg: impl Into<String>) -> Self {
        FetchError::UnexpectedShape(msg.into())
    }

    /// Classify into the coarse kind used for logging.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FetchError::InvalidInput(_) => ErrorKind::InvalidInput,
            FetchError::Transport { .. } | FetchError::HttpStatus { .. } => {
                ErrorKind::UpstreamUnavailable
            }
            FetchError::UnexpectedShape(_) | FetchError::Json(_) | FetchError::Xml(_) => {
                ErrorKind::UnexpectedShape
            }
            FetchError::MuxFailure(_) => ErrorKind::MuxFailure,
            FetchError::Storage(_) => ErrorKind::Storage,
        }
    }
}

pub type Result<T> = std::result::Result<T, FetchError>;
