//! Type-safe options for the Scholar Compass client.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Newtype for scholar names to prevent string mixups.
///
/// Construction trims surrounding whitespace, matching what the backend
/// expects in the `query` field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScholarName(pub String);

impl ScholarName {
    /// Create a new ScholarName from a string, trimming whitespace.
    pub fn new(name: impl Into<String>) -> Self {
        ScholarName(name.into().trim().to_string())
    }

    /// Get the scholar name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the name is empty after trimming.
    ///
    /// Empty queries are rejected before any request is issued.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ScholarName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ScholarName {
    fn from(s: String) -> Self {
        ScholarName::new(s)
    }
}

impl From<&str> for ScholarName {
    fn from(s: &str) -> Self {
        ScholarName::new(s)
    }
}

impl AsRef<str> for ScholarName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Backend API endpoint paths.
///
/// The four endpoints are external collaborators; this client does not
/// define the API, it consumes it.
pub mod endpoints {
    /// Collaboration network graph for a scholar.
    pub const COLLABORATION_NETWORK: &str = "/api/visuals/collaboration-network";
    /// Per-year topic counts for a scholar.
    pub const TOPIC_EVOLUTION: &str = "/api/visuals/topic-evolution";
    /// Venue statistics (top venues, type distribution, trends).
    pub const VENUE_STATS: &str = "/api/visuals/venue-stats";
    /// Streamed natural-language analysis (text/event-stream).
    pub const ANALYZE: &str = "/api/analyze";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scholar_name_trims() {
        let name = ScholarName::new("  Jane Doe \n");
        assert_eq!(name.as_str(), "Jane Doe");
    }

    #[test]
    fn scholar_name_empty_detection() {
        assert!(ScholarName::new("   ").is_empty());
        assert!(!ScholarName::new("x").is_empty());
    }

    #[test]
    fn scholar_name_display() {
        let name = ScholarName::from("Alan Turing");
        assert_eq!(name.to_string(), "Alan Turing");
        assert_eq!(name.as_ref(), "Alan Turing");
    }

    #[test]
    fn scholar_name_serializes_transparent() {
        let name = ScholarName::new("Grace Hopper");
        let json = serde_json::to_string(&name).unwrap();
        assert_eq!(json, "\"Grace Hopper\"");
    }

    #[test]
    fn endpoint_paths_are_absolute() {
        for path in [
            endpoints::COLLABORATION_NETWORK,
            endpoints::TOPIC_EVOLUTION,
            endpoints::VENUE_STATS,
            endpoints::ANALYZE,
        ] {
            assert!(path.starts_with("/api/"));
        }
    }
}
