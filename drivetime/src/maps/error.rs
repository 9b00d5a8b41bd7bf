//! Page fetch error types.

/// Errors fetching a directions page.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status
    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    /// The server answered with something other than text
    #[error("non-text response ({content_type}) from {url}")]
    NotText { content_type: String, url: String },

    /// No page is available for the requested route
    #[error("no page for {0}")]
    NotFound(String),
}

impl FetchError {
    /// Whether trying again later might succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Http(_) => true,
            FetchError::Status { status, .. } => *status == 429 || *status >= 500,
            FetchError::NotText { .. } | FetchError::NotFound(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = FetchError::Status {
            status: 503,
            url: "https://example.test/a".into(),
        };
        assert_eq!(err.to_string(), "unexpected status 503 from https://example.test/a");

        let err = FetchError::NotText {
            content_type: "image/png".into(),
            url: "u".into(),
        };
        assert_eq!(err.to_string(), "non-text response (image/png) from u");
    }

    #[test]
    fn retryable_statuses() {
        let status = |status| FetchError::Status {
            status,
            url: String::new(),
        };
        assert!(status(500).is_retryable());
        assert!(status(429).is_retryable());
        assert!(!status(404).is_retryable());
        assert!(!FetchError::NotFound("x".into()).is_retryable());
    }
}
