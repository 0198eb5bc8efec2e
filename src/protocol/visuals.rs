//! Visuals payloads returned by the three JSON endpoints.
//!
//! Field names mirror the backend exactly so the payloads can be passed
//! back to the analysis endpoint untouched.

use serde::{Deserialize, Serialize};

/// Collaboration network graph for a scholar.
///
/// The first node is the queried scholar; the remaining nodes are their
/// strongest collaborators, connected by weighted edges.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollaborationNetwork {
    pub nodes: Vec<NetworkNode>,
    pub edges: Vec<NetworkEdge>,
    pub center_scholar: String,
}

impl CollaborationNetwork {
    /// Number of collaborators in the graph (excludes the center node).
    pub fn collaborator_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// One author in the collaboration graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkNode {
    pub id: String,
    pub name: String,
    /// Display size hint computed by the backend from collaboration weight.
    #[serde(rename = "symbolSize")]
    pub symbol_size: u32,
    /// 0 for the center scholar, 1 for collaborators.
    pub category: u32,
    /// Collaboration count; absent on the center node.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub draggable: Option<bool>,
}

/// One co-authorship edge, weighted by shared paper count.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkEdge {
    pub source: String,
    pub target: String,
    pub value: u64,
}

/// Paper count for one topic in one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicCount {
    pub year: i32,
    pub topic: String,
    pub count: u64,
}

/// One topic's counts aligned to a shared year axis.
///
/// Produced by [`topics_by_year`]; `counts[i]` is the paper count for
/// the `i`-th year of the axis, zero where the topic has no papers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSeries {
    pub topic: String,
    pub counts: Vec<u64>,
}

/// Pivot flat `{year, topic, count}` rows into a sorted year axis and one
/// zero-filled series per topic, the shape a stacked-by-year chart wants.
///
/// Topics keep their first-appearance order. Duplicate rows for the same
/// topic and year are summed.
pub fn topics_by_year(rows: &[TopicCount]) -> (Vec<i32>, Vec<TopicSeries>) {
    let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let mut series: Vec<TopicSeries> = Vec::new();
    for row in rows {
        let idx = match years.binary_search(&row.year) {
            Ok(idx) => idx,
            Err(_) => continue,
        };
        match series.iter_mut().find(|s| s.topic == row.topic) {
            Some(entry) => entry.counts[idx] += row.count,
            None => {
                let mut counts = vec![0; years.len()];
                counts[idx] = row.count;
                series.push(TopicSeries {
                    topic: row.topic.clone(),
                    counts,
                });
            }
        }
    }

    (years, series)
}

/// Venue statistics: top venues, type distribution, and recent trends.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueStats {
    pub top_venues: Vec<VenueCount>,
    pub distribution: Vec<VenueTypeCount>,
    #[serde(default)]
    pub trends: Vec<VenueTrend>,
}

impl VenueStats {
    /// The `n` most published-in venues, in the backend's order. Names are
    /// returned as-is; pass them through [`clean_venue_name`] for display.
    pub fn top_venues(&self, n: usize) -> impl Iterator<Item = &VenueCount> {
        self.top_venues.iter().take(n)
    }

    /// Total papers across the type distribution.
    pub fn total_typed_papers(&self) -> u64 {
        self.distribution.iter().map(|d| d.count).sum()
    }
}

/// Publication count for one venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueCount {
    pub venue: String,
    pub count: u64,
}

/// Paper count for one venue type (`conference`, `journal`, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueTypeCount {
    #[serde(rename = "type")]
    pub venue_type: String,
    pub count: u64,
}

/// Publication count for one venue in one year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VenueTrend {
    pub venue: String,
    pub year: i32,
    pub count: u64,
}

/// The three visuals payloads for one scholar, fetched together.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScholarVisuals {
    pub network: CollaborationNetwork,
    pub topics: Vec<TopicCount>,
    pub venues: VenueStats,
}

/// Strip replacement characters, stray `?`, and control characters that
/// venue names imported from external indexes sometimes carry.
pub fn clean_venue_name(name: &str) -> String {
    name.chars()
        .filter(|&c| c != '?' && c != '\u{fffd}' && !c.is_control())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Clean a venue name and truncate it to `max_chars` for display labels.
pub fn truncate_venue_name(name: &str, max_chars: usize) -> String {
    let cleaned = clean_venue_name(name);
    if cleaned.chars().count() > max_chars {
        let truncated: String = cleaned.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        cleaned
    }
}
