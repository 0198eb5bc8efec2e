//! Sink trait for rendering streamed analysis.

/// Receiver for analysis stream events.
///
/// Implementations receive callbacks as deltas arrive and when the stream
/// reaches its terminal state. This decouples the reader from any
/// particular rendering target, so streams can be consumed headless in
/// tests or drive a UI in an application.
///
/// # Implementation Notes
///
/// - Implementations must be lightweight; blocking delays stream processing.
/// - Methods have default empty implementations for selective handling.
/// - Callbacks are invoked synchronously, in stream order.
/// - A rendering sink should only auto-scroll its view if the view was
///   already near its bottom edge before the update, so a reader who
///   scrolled up is not yanked back down.
///
/// # Example
///
/// ```ignore
/// use scholar_compass::AnalysisSink;
///
/// struct DeltaCounter {
///     deltas: std::sync::atomic::AtomicUsize,
/// }
///
/// impl AnalysisSink for DeltaCounter {
///     fn on_delta(&self, _delta: &str, _accumulated: &str) {
///         self.deltas.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
///     }
/// }
/// ```
pub trait AnalysisSink: Send + Sync {
    /// Called for each text delta.
    ///
    /// # Arguments
    ///
    /// * `delta` - The fragment that just arrived
    /// * `accumulated` - The full analysis text so far, including `delta`
    fn on_delta(&self, delta: &str, accumulated: &str) {
        let _ = (delta, accumulated);
    }

    /// Called once when the stream completes cleanly.
    fn on_complete(&self, text: &str) {
        let _ = text;
    }

    /// Called once when the stream fails or is truncated.
    fn on_error(&self, message: &str) {
        let _ = message;
    }
}

/// Simple sink that logs stream progress using tracing.
///
/// # Example
///
/// ```ignore
/// use scholar_compass::{AnalysisSession, LoggingSink};
/// use std::sync::Arc;
///
/// let session = AnalysisSession::new("Jane Doe", Arc::new(LoggingSink::new()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct LoggingSink {
    level: LogLevel,
}

/// Log level for LoggingSink.
#[derive(Debug, Clone, Copy, Default)]
pub enum LogLevel {
    /// Log at trace level.
    Trace,
    /// Log at debug level (default).
    #[default]
    Debug,
    /// Log at info level.
    Info,
}

impl LoggingSink {
    /// Create a new logging sink with debug level.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a logging sink with a specific level.
    pub fn with_level(level: LogLevel) -> Self {
        Self { level }
    }
}

impl AnalysisSink for LoggingSink {
    fn on_delta(&self, delta: &str, accumulated: &str) {
        match self.level {
            LogLevel::Trace => {
                tracing::trace!(delta_len = delta.len(), total_len = accumulated.len(), "delta");
            }
            LogLevel::Debug => {
                tracing::debug!(delta_len = delta.len(), total_len = accumulated.len(), "delta");
            }
            LogLevel::Info => {
                tracing::info!(delta_len = delta.len(), total_len = accumulated.len(), "delta");
            }
        }
    }

    fn on_complete(&self, text: &str) {
        match self.level {
            LogLevel::Trace => tracing::trace!(total_len = text.len(), "analysis complete"),
            LogLevel::Debug => tracing::debug!(total_len = text.len(), "analysis complete"),
            LogLevel::Info => tracing::info!(total_len = text.len(), "analysis complete"),
        }
    }

    fn on_error(&self, message: &str) {
        // Failures always log at warn regardless of the configured level.
        tracing::warn!(message = %message, "analysis failed");
    }
}
