//! Response envelope for the visuals endpoints.
//!
//! Each visuals endpoint returns either `{"success": true, "data": ...}` or
//! `{"error": "..."}` (with a non-2xx status). The envelope is decoded
//! without consulting the HTTP status, since the error detail lives in the
//! body either way.

use serde::Deserialize;

use crate::{Error, Result};

/// Message the backend uses for an unknown scholar.
const NOT_FOUND_MESSAGE: &str = "Scholar not found";

/// Envelope for a visuals endpoint response.
///
/// Missing fields decode as `None`, so the payload type needs no
/// `Default` impl.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Present and `true` on success.
    pub success: Option<bool>,
    /// Endpoint-specific payload on success.
    pub data: Option<T>,
    /// Error message on failure.
    pub error: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the envelope into its payload.
    ///
    /// An `error` field short-circuits: `"Scholar not found"` maps to
    /// [`Error::ScholarNotFound`] carrying the queried name, anything else
    /// to [`Error::Backend`]. A response with neither `data` nor `error`
    /// is malformed and reported as a backend error.
    pub fn into_result(self, scholar: &str) -> Result<T> {
        if let Some(message) = self.error {
            if message == NOT_FOUND_MESSAGE {
                return Err(Error::ScholarNotFound {
                    scholar: scholar.to_string(),
                });
            }
            return Err(Error::Backend { message });
        }

        self.data.ok_or_else(|| Error::Backend {
            message: "response carried neither data nor error".to_string(),
        })
    }
}
