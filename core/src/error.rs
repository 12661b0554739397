//! Error types for the Cachet API client.
//!
//! # Design
//! Every variant is terminal for the call that produced it; nothing in this
//! crate retries. Construction and validation errors are raised before any
//! network activity. Non-2xx responses land in `Http` with the status, the
//! headers and the best-effort parsed body.

use thiserror::Error;

use crate::response::ResponseBody;

/// Errors returned by `CachetClient` and `Cachet`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The client was configured with an empty domain.
    #[error("domain parameter must be specified as a non-empty string")]
    EmptyDomain,

    /// A path identifier or `body` required by the endpoint was not given.
    #[error("missing required parameter: {0}")]
    MissingParameter(String),

    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A typed payload could not be turned into JSON, or a response could
    /// not be read into the requested type.
    #[error("JSON conversion failed: {0}")]
    Json(#[from] serde_json::Error),

    /// DNS, connection, TLS, timeout or URL failure reported by the transport.
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The server answered with a status outside 200-299.
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        headers: Vec<(String, String)>,
        body: ResponseBody,
    },
}

impl ApiError {
    /// Status code of an `Http` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of an `Http` error.
    pub fn body(&self) -> Option<&ResponseBody> {
        match self {
            ApiError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_parameter_message_names_the_field() {
        let err = ApiError::MissingParameter("component".to_string());
        assert_eq!(err.to_string(), "missing required parameter: component");
    }

    #[test]
    fn http_error_exposes_status_and_body() {
        let err = ApiError::Http {
            status: 404,
            headers: Vec::new(),
            body: ResponseBody::Text("gone".to_string()),
        };
        assert!(err.is_not_found());
        assert_eq!(err.body(), Some(&ResponseBody::Text("gone".to_string())));
        assert_eq!(err.to_string(), "HTTP 404: gone");
    }

    #[test]
    fn validation_errors_have_no_status() {
        assert_eq!(ApiError::EmptyDomain.status(), None);
        assert!(!ApiError::EmptyDomain.is_not_found());
    }
}
