//! Analysis stream implementation.
//!
//! This module provides [`AnalysisStream`], which implements
//! [`futures::Stream`] to yield [`AnalysisEvent`]s from the analysis
//! endpoint's response body.

use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Duration;

use bytes::Bytes;
use futures::{Stream, StreamExt};
use tokio::time::timeout as tokio_timeout;
use tokio_util::sync::CancellationToken;

use super::decoder::FrameDecoder;
use crate::protocol::AnalysisPayload;
use crate::{Error, Result};

/// Terminal state of an analysis stream.
///
/// Every stream ends in exactly one of these; they let callers distinguish
/// a clean `done` frame from a dropped connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisOutcome {
    /// The backend sent a `done` frame.
    Completed,
    /// The backend sent an `error` frame with this message.
    Failed {
        message: String,
    },
    /// The byte stream ended before any terminal frame.
    Truncated,
}

impl AnalysisOutcome {
    /// Check if this is a clean completion.
    pub fn is_completed(&self) -> bool {
        matches!(self, AnalysisOutcome::Completed)
    }
}

/// An event from an analysis stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisEvent {
    /// A text fragment to append to the accumulated analysis.
    Delta(String),
    /// The stream reached its terminal state; no further events follow.
    Finished(AnalysisOutcome),
}

impl AnalysisEvent {
    /// Get the text if this is a delta event.
    pub fn delta(&self) -> Option<&str> {
        match self {
            AnalysisEvent::Delta(text) => Some(text),
            _ => None,
        }
    }
}

/// A stream of events from an analysis response.
///
/// Yields zero or more [`AnalysisEvent::Delta`]s followed by exactly one
/// [`AnalysisEvent::Finished`] (unless an `Err` aborts the stream first).
/// Implements [`futures::Stream`] for use with async combinators.
///
/// # Cancellation
///
/// Each stream carries a [`CancellationToken`], checked at every await
/// point. Cancelling it makes the next poll yield [`Error::Cancelled`].
/// Dropping the stream releases the underlying connection.
///
/// # Example
///
/// ```ignore
/// use futures::StreamExt;
/// use scholar_compass::{AnalysisEvent, AnalysisOutcome};
///
/// let mut stream = client.analyze(&request).await?;
/// while let Some(event) = stream.next().await {
///     match event? {
///         AnalysisEvent::Delta(text) => print!("{}", text),
///         AnalysisEvent::Finished(outcome) => {
///             assert!(outcome.is_completed());
///         }
///     }
/// }
/// ```
pub struct AnalysisStream {
    inner: Pin<Box<dyn Stream<Item = Result<AnalysisEvent>> + Send>>,
    token: CancellationToken,
}

impl AnalysisStream {
    /// Create a stream over a response body with a fresh cancellation token.
    pub fn new<S, E>(bytes: S) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: Into<Error> + Send,
    {
        Self::with_token(bytes, CancellationToken::new())
    }

    /// Create a stream over a response body, cancelled by `token`.
    ///
    /// Pass a token owned by the caller to cancel an in-flight analysis,
    /// e.g. when a new session supersedes the current one.
    pub fn with_token<S, E>(bytes: S, token: CancellationToken) -> Self
    where
        S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
        E: Into<Error> + Send,
    {
        let inner = read_events(bytes, token.clone());
        Self {
            inner: Box::pin(inner),
            token,
        }
    }

    /// Get the stream's cancellation token.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.token
    }

    /// Cancel the stream; the next poll yields [`Error::Cancelled`].
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Collect all deltas into the final analysis text.
    ///
    /// This is a convenience for callers that do not render incrementally.
    ///
    /// # Errors
    ///
    /// - [`Error::Analysis`] if the stream terminated with an error frame.
    /// - [`Error::Truncated`] if the stream ended without a terminal frame.
    pub async fn collect_text(mut self) -> Result<String> {
        let mut text = String::new();

        while let Some(event) = self.next().await {
            match event? {
                AnalysisEvent::Delta(delta) => text.push_str(&delta),
                AnalysisEvent::Finished(AnalysisOutcome::Completed) => return Ok(text),
                AnalysisEvent::Finished(AnalysisOutcome::Failed { message }) => {
                    return Err(Error::Analysis { message });
                }
                AnalysisEvent::Finished(AnalysisOutcome::Truncated) => {
                    return Err(Error::Truncated);
                }
            }
        }

        // The generator always yields a Finished event; reaching EOF here
        // means it was interrupted.
        Err(Error::Truncated)
    }
}

impl Stream for AnalysisStream {
    type Item = Result<AnalysisEvent>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

/// Decode a byte stream into analysis events, stopping at the first
/// terminal payload, cancellation, or decode failure.
fn read_events<S, E>(
    bytes: S,
    token: CancellationToken,
) -> impl Stream<Item = Result<AnalysisEvent>> + Send + 'static
where
    S: Stream<Item = std::result::Result<Bytes, E>> + Send + 'static,
    E: Into<Error> + Send,
{
    async_stream::stream! {
        let mut decoder = FrameDecoder::new();
        let mut bytes = std::pin::pin!(bytes);

        loop {
            let chunk = tokio::select! {
                biased;
                _ = token.cancelled() => {
                    yield Err(Error::Cancelled);
                    return;
                }
                chunk = bytes.next() => chunk,
            };

            let chunk = match chunk {
                Some(Ok(chunk)) => chunk,
                Some(Err(e)) => {
                    yield Err(e.into());
                    return;
                }
                // EOF without a terminal frame.
                None => break,
            };

            let payloads = match decoder.feed(&chunk) {
                Ok(payloads) => payloads,
                Err(e) => {
                    yield Err(e);
                    return;
                }
            };

            for payload in payloads {
                match payload {
                    AnalysisPayload::Content(text) => {
                        yield Ok(AnalysisEvent::Delta(text));
                    }
                    AnalysisPayload::Done => {
                        yield Ok(AnalysisEvent::Finished(AnalysisOutcome::Completed));
                        return;
                    }
                    AnalysisPayload::Error(message) => {
                        yield Ok(AnalysisEvent::Finished(AnalysisOutcome::Failed { message }));
                        return;
                    }
                }
            }
        }

        if let Some(partial) = decoder.finish() {
            tracing::debug!(bytes = partial.len(), "discarding partial frame at end of stream");
        }
        yield Ok(AnalysisEvent::Finished(AnalysisOutcome::Truncated));
    }
}

/// Run a future with a timeout.
///
/// Returns an error if the future doesn't complete within the specified
/// duration.
pub async fn with_timeout<F, T>(duration: Duration, future: F) -> Result<T>
where
    F: std::future::Future<Output = Result<T>>,
{
    match tokio_timeout(duration, future).await {
        Ok(result) => result,
        Err(_) => Err(Error::Timeout(duration)),
    }
}
