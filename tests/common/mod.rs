//! Shared helpers for integration tests.

use std::sync::Mutex;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use scholar_compass::AnalysisSink;

pub const SCHOLAR: &str = "Jane Doe";

/// Collaboration network body in the backend's shape.
pub fn network_json() -> Value {
    json!({
        "nodes": [
            {
                "id": "Jane Doe",
                "name": "Jane Doe",
                "symbolSize": 30,
                "category": 0,
                "draggable": true
            },
            {
                "id": "John Roe",
                "name": "John Roe",
                "symbolSize": 18,
                "category": 1,
                "value": 12,
                "draggable": true
            }
        ],
        "edges": [
            {"source": "Jane Doe", "target": "John Roe", "value": 12}
        ],
        "center_scholar": "Jane Doe"
    })
}

/// Topic evolution body in the backend's shape.
pub fn topics_json() -> Value {
    json!([
        {"year": 2021, "topic": "graph learning", "count": 4},
        {"year": 2022, "topic": "graph learning", "count": 7},
        {"year": 2022, "topic": "retrieval", "count": 3}
    ])
}

/// Venue stats body in the backend's shape.
pub fn venues_json() -> Value {
    json!({
        "top_venues": [
            {"venue": "NeurIPS", "count": 9},
            {"venue": "ICML", "count": 5}
        ],
        "distribution": [
            {"type": "Conference", "count": 14},
            {"type": "Journal", "count": 3}
        ],
        "trends": [
            {"venue": "NeurIPS", "year": 2022, "count": 4}
        ]
    })
}

/// Wrap a body in the backend's success envelope.
pub fn ok_envelope(data: Value) -> Value {
    json!({"success": true, "data": data})
}

/// Mount the three visuals endpoints with successful responses.
pub async fn mount_visuals(server: &MockServer, scholar: &str) {
    mount_visual(server, scholar, "/api/visuals/collaboration-network", network_json()).await;
    mount_visual(server, scholar, "/api/visuals/topic-evolution", topics_json()).await;
    mount_visual(server, scholar, "/api/visuals/venue-stats", venues_json()).await;
}

/// Mount one visuals endpoint with a successful response.
pub async fn mount_visual(server: &MockServer, scholar: &str, endpoint: &str, data: Value) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .and(body_json(json!({"query": scholar})))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(data)))
        .mount(server)
        .await;
}

/// Mount one visuals endpoint with the backend's not-found response.
pub async fn mount_not_found(server: &MockServer, endpoint: &str) {
    Mock::given(method("POST"))
        .and(path(endpoint))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Scholar not found"})),
        )
        .mount(server)
        .await;
}

/// Build a raw event-stream body from `data: ` frames.
pub fn sse_body(payloads: &[&str]) -> String {
    let mut body = String::new();
    for payload in payloads {
        body.push_str("data: ");
        body.push_str(payload);
        body.push_str("\n\n");
    }
    body
}

/// Mount the analyze endpoint with a fixed event-stream body.
pub async fn mount_analyze(server: &MockServer, body: String) {
    Mock::given(method("POST"))
        .and(path("/api/analyze"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(body.into_bytes(), "text/event-stream"),
        )
        .mount(server)
        .await;
}

/// Sink that records every callback for assertions.
#[derive(Default)]
pub struct RecordingSink {
    pub deltas: Mutex<Vec<String>>,
    pub completed: Mutex<Option<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl AnalysisSink for RecordingSink {
    fn on_delta(&self, delta: &str, _accumulated: &str) {
        self.deltas.lock().unwrap().push(delta.to_string());
    }

    fn on_complete(&self, text: &str) {
        *self.completed.lock().unwrap() = Some(text.to_string());
    }

    fn on_error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }
}
