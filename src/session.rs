//! Analysis sessions.
//!
//! This module provides [`AnalysisSession`], which owns the accumulated
//! analysis text for one streaming session and dispatches sink callbacks
//! as the stream progresses. Sessions are independent of one another;
//! starting a new session never disturbs an existing one.
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use scholar_compass::{AnalysisSession, AnalyzeRequest, LoggingSink, ScholarClient};
//!
//! let client = ScholarClient::new()?;
//! let visuals = client.fetch_visuals("Jane Doe").await?;
//! let stream = client.analyze(&AnalyzeRequest::new("Jane Doe", visuals)).await?;
//!
//! let mut session = AnalysisSession::new("Jane Doe", Arc::new(LoggingSink::new()));
//! let outcome = session.run(stream).await?;
//! println!("{}: {}", outcome.is_completed(), session.text());
//! ```

use std::sync::Arc;

use futures::StreamExt;

use crate::config::ScholarName;
use crate::sink::AnalysisSink;
use crate::stream::{AnalysisEvent, AnalysisOutcome, AnalysisStream};
use crate::Result;

/// One streaming analysis session.
///
/// A session owns its accumulated-text buffer: deltas are appended in
/// stream order, the buffer is never mutated otherwise, and it remains
/// readable after the stream ends. Run one stream per session; the buffer
/// is not reset between runs.
pub struct AnalysisSession {
    scholar: ScholarName,
    text: String,
    outcome: Option<AnalysisOutcome>,
    sink: Arc<dyn AnalysisSink>,
}

impl std::fmt::Debug for AnalysisSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisSession")
            .field("scholar", &self.scholar)
            .field("text_len", &self.text.len())
            .field("outcome", &self.outcome)
            .finish()
    }
}

impl AnalysisSession {
    /// Create a session for the given scholar with a rendering sink.
    pub fn new(scholar: impl Into<ScholarName>, sink: Arc<dyn AnalysisSink>) -> Self {
        Self {
            scholar: scholar.into(),
            text: String::new(),
            outcome: None,
            sink,
        }
    }

    /// Drive a stream to its terminal state.
    ///
    /// Each delta is appended to the session's text and forwarded to the
    /// sink together with the accumulated text. On a clean completion the
    /// sink's `on_complete` fires; a failed or truncated stream fires
    /// `on_error`. Transport and decode failures also fire `on_error`
    /// before the error is returned.
    pub async fn run(&mut self, mut stream: AnalysisStream) -> Result<AnalysisOutcome> {
        while let Some(event) = stream.next().await {
            let event = match event {
                Ok(event) => event,
                Err(e) => {
                    self.sink.on_error(&e.to_string());
                    return Err(e);
                }
            };

            match event {
                AnalysisEvent::Delta(delta) => {
                    self.text.push_str(&delta);
                    self.sink.on_delta(&delta, &self.text);
                }
                AnalysisEvent::Finished(outcome) => {
                    match &outcome {
                        AnalysisOutcome::Completed => self.sink.on_complete(&self.text),
                        AnalysisOutcome::Failed { message } => self.sink.on_error(message),
                        AnalysisOutcome::Truncated => {
                            self.sink.on_error(&crate::Error::Truncated.to_string());
                        }
                    }
                    self.outcome = Some(outcome.clone());
                    return Ok(outcome);
                }
            }
        }

        // The stream contract guarantees a Finished event; treat an
        // unterminated stream as truncation anyway.
        let outcome = AnalysisOutcome::Truncated;
        self.sink.on_error(&crate::Error::Truncated.to_string());
        self.outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Get the scholar this session analyzes.
    pub fn scholar(&self) -> &ScholarName {
        &self.scholar
    }

    /// Get the accumulated analysis text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the terminal outcome, if the session has finished.
    pub fn outcome(&self) -> Option<&AnalysisOutcome> {
        self.outcome.as_ref()
    }
}
