//! Request bodies for the backend endpoints.

use serde::Serialize;

use super::visuals::{CollaborationNetwork, ScholarVisuals, TopicCount, VenueStats};
use crate::config::ScholarName;

/// Body for the three visuals endpoints: `{"query": "<scholar name>"}`.
#[derive(Debug, Clone, Serialize)]
pub struct VisualsQuery {
    pub query: ScholarName,
}

impl VisualsQuery {
    /// Create a query for the given scholar.
    pub fn new(scholar: impl Into<ScholarName>) -> Self {
        Self {
            query: scholar.into(),
        }
    }
}

/// Body for the analysis endpoint.
///
/// The analysis is grounded in the visuals payloads, so the three fetches
/// must have completed before an analysis can be requested.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeRequest {
    pub scholar_name: ScholarName,
    pub network_data: CollaborationNetwork,
    pub topic_data: Vec<TopicCount>,
    pub venue_data: VenueStats,
}

impl AnalyzeRequest {
    /// Build an analysis request from previously fetched visuals.
    pub fn new(scholar: impl Into<ScholarName>, visuals: ScholarVisuals) -> Self {
        Self {
            scholar_name: scholar.into(),
            network_data: visuals.network,
            topic_data: visuals.topics,
            venue_data: visuals.venues,
        }
    }
}
