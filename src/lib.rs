//! # scholar-compass
//!
//! Async client for the Scholar Compass backend: typed visuals fetches
//! and streamed scholar analysis.
//!
//! ## Features
//!
//! - **Typed visuals**: fetch a scholar's collaboration network, topic
//!   evolution, and venue statistics as strongly typed structures, all
//!   three joined concurrently and all-or-nothing.
//! - **Streamed analysis**: consume the server-sent analysis stream as
//!   an async stream of text deltas with a typed terminal outcome.
//! - **Chunking-invariant decoding**: frames and multi-byte UTF-8
//!   sequences may straddle network chunk boundaries freely.
//! - **Cancellation**: every stream carries a cancellation token checked
//!   at each await point.
//! - **Sessions and sinks**: [`AnalysisSession`] owns the accumulated
//!   text and drives an [`AnalysisSink`] for rendering.
//!
//! ## Quick Start
//!
//! ```ignore
//! use scholar_compass::{AnalyzeRequest, Result, ScholarClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ScholarClient::builder()
//!         .base_url("http://localhost:5000")
//!         .build()?;
//!
//!     let visuals = client.fetch_visuals("Jane Doe").await?;
//!     println!("{} collaborators", visuals.network.collaborator_count());
//!
//!     let text = client
//!         .analyze_and_collect(&AnalyzeRequest::new("Jane Doe", visuals))
//!         .await?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```ignore
//! use futures::StreamExt;
//! use scholar_compass::stream::AnalysisEvent;
//!
//! let mut stream = client.analyze(&request).await?;
//! while let Some(event) = stream.next().await {
//!     match event? {
//!         AnalysisEvent::Delta(text) => print!("{text}"),
//!         AnalysisEvent::Finished(outcome) => println!("\n[{outcome:?}]"),
//!     }
//! }
//! ```
//!
//! ## Sessions
//!
//! ```ignore
//! use std::sync::Arc;
//! use scholar_compass::{AnalysisSession, LoggingSink};
//!
//! let stream = client.analyze(&request).await?;
//! let mut session = AnalysisSession::new("Jane Doe", Arc::new(LoggingSink::new()));
//! let outcome = session.run(stream).await?;
//! println!("{:?}: {} chars", outcome, session.text().len());
//! ```

mod client;
pub mod config;
mod error;
pub mod protocol;
mod session;
pub mod sink;
pub mod stream;

pub use client::{ClientBuilder, ScholarClient};
pub use config::{ClientConfig, ClientConfigBuilder, ScholarName, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use protocol::{
    AnalysisPayload, AnalyzeRequest, CollaborationNetwork, NetworkEdge, NetworkNode,
    ScholarVisuals, TopicCount, TopicSeries, VenueCount, VenueStats, VenueTrend, VenueTypeCount,
};
pub use session::AnalysisSession;
pub use sink::{AnalysisSink, LogLevel, LoggingSink};
pub use stream::{AnalysisEvent, AnalysisOutcome, AnalysisStream};

// Re-exported for callers constructing external cancellation tokens.
pub use tokio_util::sync::CancellationToken;
