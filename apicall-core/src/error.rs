use thiserror::Error;

use crate::transport::TransportError;

/// Outcome of a single adapter call.
pub type ApiResult<T> = Result<T, ApiFailure>;

/// Every way a single outbound call can fail.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// The endpoint could not be turned into an absolute URL.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Connection, DNS or timeout error reported by the transport.
    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    /// The body was not JSON, or did not match the expected shape.
    #[error("failed to decode response body: {source} (body: {body})")]
    Decode {
        #[source]
        source: serde_json::Error,
        body: String,
    },

    /// The service answered, but the body carries its own error.
    #[error("{0}")]
    Application(String),
}

impl ApiFailure {
    pub(crate) fn decode(source: serde_json::Error, body: &str) -> Self {
        ApiFailure::Decode {
            source,
            body: truncate_body(body),
        }
    }

    /// The service-reported message, if this is an application failure.
    pub fn application_message(&self) -> Option<&str> {
        match self {
            ApiFailure::Application(message) => Some(message),
            _ => None,
        }
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }

    let mut end = MAX;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}
