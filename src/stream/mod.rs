//! Streaming analysis reader.
//!
//! This module turns the analysis endpoint's byte stream into an ordered
//! sequence of text deltas with an explicit terminal outcome:
//!
//! - [`FrameDecoder`] does the incremental work: UTF-8 decoding across
//!   chunk boundaries, frame splitting, and payload parsing.
//! - [`AnalysisStream`] wraps an HTTP response body and implements
//!   [`futures::Stream`], yielding [`AnalysisEvent`]s until a terminal
//!   [`AnalysisOutcome`] is reached.

pub mod decoder;
pub mod response;

pub use decoder::FrameDecoder;
pub use response::{with_timeout, AnalysisEvent, AnalysisOutcome, AnalysisStream};
