//! Wire types for the Scholar Compass backend API.
//!
//! The backend exposes four endpoints (see [`crate::config::endpoints`]):
//! three JSON visuals endpoints and one `text/event-stream` analysis
//! endpoint. This module defines the request bodies, the response envelope,
//! the visuals payloads, and the analysis stream frame format.

pub mod envelope;
pub mod frames;
pub mod requests;
pub mod visuals;

// Re-export commonly used types
pub use envelope::ApiEnvelope;
pub use frames::{AnalysisPayload, DATA_PREFIX, FRAME_DELIMITER};
pub use requests::{AnalyzeRequest, VisualsQuery};
pub use visuals::{
    clean_venue_name, topics_by_year, truncate_venue_name, CollaborationNetwork, NetworkEdge,
    NetworkNode, ScholarVisuals, TopicCount, TopicSeries, VenueCount, VenueStats, VenueTrend,
    VenueTypeCount,
};
