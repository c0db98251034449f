//! Errors surfaced by the remote client.

use thiserror::Error;

/// Failure of a single round trip to the prioritization service.
///
/// The display output is what lands on the status line, so server-provided
/// diagnostic text is preserved verbatim. Nothing here is retried.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The request never produced a response.
    #[error("Request failed: {source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The service claimed success but the body was not an envelope.
    #[error("Failed to parse response: {source}, body: {body}")]
    InvalidBody {
        #[source]
        source: serde_json::Error,
        body: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display_keeps_code_and_body() {
        let err = RemoteError::Status {
            status: 400,
            body: "strategy unknown".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 400: strategy unknown");
    }
}
