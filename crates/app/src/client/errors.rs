//! Orders API errors.

use reqwest::{Method, StatusCode};
use tableside::wire::DataShapeError;
use thiserror::Error;

/// Errors that can occur when talking to the order service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// An HTTP transport or serialization error occurred.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The configured base URL cannot be used to build endpoint URLs.
    #[error("invalid API base URL {url:?}: {reason}")]
    InvalidBaseUrl {
        /// URL as configured
        url: String,
        /// Why it was rejected
        reason: String,
    },

    /// A request body could not be serialized.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),

    /// The server returned a non-2xx response.
    #[error("{method} {path} failed with status {status}: {body}")]
    UnexpectedStatus {
        /// Request method
        method: Method,
        /// Request path relative to the base URL
        path: String,
        /// Response status
        status: StatusCode,
        /// Response body, possibly empty
        body: String,
    },

    /// A list endpoint returned something other than a list.
    #[error("unexpected response shape: {0}")]
    DataShape(#[from] DataShapeError),
}

impl ApiError {
    /// Whether the request never got a usable answer from the server.
    ///
    /// Shape violations are not network failures: the server answered, just not with a
    /// list.
    pub fn is_network_failure(&self) -> bool {
        !matches!(self, Self::DataShape(_))
    }
}

#[cfg(test)]
mod tests {
    use tableside::wire::DataShapeError;

    use super::*;

    #[test]
    fn only_shape_errors_are_not_network_failures() {
        let shape = ApiError::DataShape(DataShapeError::NotJson {
            what: "carts",
            reason: "expected value".to_string(),
        });
        let status = ApiError::UnexpectedStatus {
            method: Method::GET,
            path: "/cart/items".to_string(),
            status: StatusCode::BAD_GATEWAY,
            body: String::new(),
        };

        assert!(!shape.is_network_failure());
        assert!(status.is_network_failure());
    }
}
