//! Analysis stream frame format.
//!
//! The analysis endpoint responds with a sequence of event frames, each
//! terminated by a blank line:
//!
//! ```text
//! data: {"content":"Professor Doe has "}
//!
//! data: {"content":"collaborated widely..."}
//!
//! data: {"done":true}
//! ```
//!
//! A frame's payload is one of three cases: a text delta to append, a
//! completion signal, or a terminal error message.

use serde::Deserialize;

use crate::{Error, Result};

/// Prefix carried by every event frame.
pub const DATA_PREFIX: &str = "data: ";

/// Delimiter between event frames.
pub const FRAME_DELIMITER: &str = "\n\n";

/// The decoded payload of one analysis stream frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisPayload {
    /// A text delta to append to the accumulated analysis.
    Content(String),
    /// The stream completed successfully.
    Done,
    /// The stream terminated with a backend-reported error.
    Error(String),
}

/// Raw JSON shape of a frame payload.
///
/// The backend emits exactly one of these fields per frame.
#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

impl AnalysisPayload {
    /// Parse one complete frame into a payload.
    ///
    /// Returns `Ok(None)` for frames that carry no event: frames without
    /// the `data: ` prefix, and payloads with an empty `content` field or
    /// `done: false` (the backend never emits these, but the reader must
    /// not turn them into spurious events).
    ///
    /// # Errors
    ///
    /// Returns [`Error::JsonParse`] if the payload after the prefix is not
    /// valid JSON. Malformed frames abort the stream rather than being
    /// silently skipped.
    pub fn parse_frame(frame: &str) -> Result<Option<Self>> {
        let json = match frame.strip_prefix(DATA_PREFIX) {
            Some(rest) => rest,
            None => return Ok(None),
        };

        let raw: RawPayload =
            serde_json::from_str(json).map_err(|e| Error::json_parse(e, json))?;

        // Dispatch order mirrors the backend contract: content, done, error.
        if let Some(content) = raw.content {
            if !content.is_empty() {
                return Ok(Some(AnalysisPayload::Content(content)));
            }
        }
        if raw.done == Some(true) {
            return Ok(Some(AnalysisPayload::Done));
        }
        if let Some(message) = raw.error {
            return Ok(Some(AnalysisPayload::Error(message)));
        }

        Ok(None)
    }

    /// Check if this payload terminates the stream.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AnalysisPayload::Done | AnalysisPayload::Error(_))
    }

    /// Get the text delta if this is a `Content` payload.
    pub fn content(&self) -> Option<&str> {
        match self {
            AnalysisPayload::Content(text) => Some(text),
            _ => None,
        }
    }
}
