use std::time::Duration;

/// Errors that can occur when using scholar-compass.
///
/// Errors are organized by category:
/// - Configuration errors: detected at `build()` time
/// - Transport errors: HTTP failures talking to the backend
/// - Protocol errors: unexpected or malformed backend output
/// - Backend errors: failures the backend reported in-band
/// - Stream errors: terminal states of an analysis stream
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    // -------------------------------------------------------------------------
    // Configuration errors (detected at build() time)
    // -------------------------------------------------------------------------
    /// Invalid configuration provided to builder.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -------------------------------------------------------------------------
    // Transport errors
    // -------------------------------------------------------------------------
    /// HTTP error communicating with the backend.
    #[error("HTTP error: {0}")]
    Http(#[source] reqwest::Error),

    // -------------------------------------------------------------------------
    // Protocol errors
    // -------------------------------------------------------------------------
    /// Failed to parse JSON from a response body or stream frame.
    #[error("failed to parse JSON: {message}")]
    JsonParse {
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stream chunk was not valid UTF-8.
    #[error("invalid UTF-8 in stream at byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },

    // -------------------------------------------------------------------------
    // Backend errors (reported in-band by the API)
    // -------------------------------------------------------------------------
    /// The scholar is not in the backend database.
    ///
    /// Raised when any of the three visuals responses carries an `error`
    /// field, before any partial data is surfaced to the caller.
    #[error("scholar not found: {scholar}")]
    ScholarNotFound { scholar: String },

    /// The backend reported an error other than not-found.
    #[error("backend error: {message}")]
    Backend { message: String },

    // -------------------------------------------------------------------------
    // Stream errors
    // -------------------------------------------------------------------------
    /// The analysis stream terminated with an error frame.
    #[error("analysis failed: {message}")]
    Analysis { message: String },

    /// The byte stream ended before a `done` or `error` frame was seen.
    ///
    /// This distinguishes a dropped connection from a clean completion.
    #[error("analysis stream truncated before completion")]
    Truncated,

    // -------------------------------------------------------------------------
    // Runtime errors
    // -------------------------------------------------------------------------
    /// Request exceeded the configured timeout.
    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// Request was cancelled via its cancellation token.
    #[error("request cancelled")]
    Cancelled,
}

/// A specialized Result type for scholar-compass operations.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a JSON parse error with context from the raw text.
    pub fn json_parse(source: serde_json::Error, raw: &str) -> Self {
        Self::JsonParse {
            message: format!(
                "at position {}: {}",
                source.column(),
                raw.chars().take(100).collect::<String>()
            ),
            source,
        }
    }

    /// Check if this error means the scholar was not in the database.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::ScholarNotFound { .. })
    }

    /// Check if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::Timeout(_) | Error::Http(_) | Error::Truncated)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Http(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::JsonParse {
            message: err.to_string(),
            source: err,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }

    #[test]
    fn is_not_found_detection() {
        assert!(Error::ScholarNotFound {
            scholar: "Jane Doe".into()
        }
        .is_not_found());
        assert!(!Error::Backend {
            message: "boom".into()
        }
        .is_not_found());
        assert!(!Error::Truncated.is_not_found());
    }

    #[test]
    fn is_retryable_detection() {
        assert!(Error::Timeout(Duration::from_secs(30)).is_retryable());
        assert!(Error::Truncated.is_retryable());
        assert!(!Error::Cancelled.is_retryable());
        assert!(!Error::ScholarNotFound {
            scholar: "x".into()
        }
        .is_retryable());
    }

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: Error = json_err.into();
        assert!(matches!(err, Error::JsonParse { .. }));
    }

    #[test]
    fn json_parse_truncates_long_input() {
        let raw = "x".repeat(500);
        let source = serde_json::from_str::<serde_json::Value>(&raw).unwrap_err();
        let err = Error::json_parse(source, &raw);
        if let Error::JsonParse { message, .. } = err {
            assert!(message.len() < 200);
        } else {
            panic!("expected JsonParse");
        }
    }

    #[test]
    fn question_mark_operator_json() {
        fn fallible_json() -> Result<()> {
            let _: serde_json::Value = serde_json::from_str("not valid json")?;
            Ok(())
        }
        let result = fallible_json();
        assert!(matches!(result, Err(Error::JsonParse { .. })));
    }

    #[test]
    fn display_messages() {
        let err = Error::Analysis {
            message: "not found".into(),
        };
        assert_eq!(err.to_string(), "analysis failed: not found");
        assert_eq!(
            Error::Truncated.to_string(),
            "analysis stream truncated before completion"
        );
    }
}
