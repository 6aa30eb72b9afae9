//! Raw input event types. `ContactEvent` mirrors what a platform touch event
//! carries: the authoritative list of live touches plus a capability flag
//! from the renderer ("is this on the active image's surface?"). Traces of
//! these drive the replay CLI and the integration tests.

use serde::{Deserialize, Serialize};

use crate::config::ViewportConfig;
use crate::frame::NaturalSize;
use crate::registry::ContactPoint;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactEvent {
    /// The platform's authoritative list of currently pressed touches.
    pub touches: Vec<ContactPoint>,
    #[serde(default)]
    pub on_active_image: bool,
    #[serde(default)]
    pub timestamp_ms: u64,
}

/// One step of a recorded gesture trace.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TraceStep {
    Start(ContactEvent),
    Move(ContactEvent),
    End(ContactEvent),
    Tap {
        page_x: f64,
        page_y: f64,
        #[serde(default)]
        on_active_image: bool,
        #[serde(default)]
        timestamp_ms: u64,
    },
    /// One host animation frame (drives momentum decay).
    Frame,
}

/// A complete replayable session: viewer setup plus the event steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceFile {
    pub viewport: ViewportConfig,
    pub images: Vec<NaturalSize>,
    pub steps: Vec<TraceStep>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trace_round_trips_through_json() {
        let text = r#"{
            "viewport": {"width": 750.0, "height": 1000.0},
            "images": [{"width": 1500.0, "height": 1000.0}],
            "steps": [
                {"kind": "start", "touches": [{"id": 1, "page_x": 400.0, "page_y": 500.0}],
                 "on_active_image": true, "timestamp_ms": 100},
                {"kind": "tap", "page_x": 400.0, "page_y": 500.0, "on_active_image": true},
                {"kind": "frame"}
            ]
        }"#;
        let trace: TraceFile = serde_json::from_str(text).unwrap();
        assert_eq!(trace.images.len(), 1);
        assert_eq!(trace.steps.len(), 3);
        let back = serde_json::to_string(&trace).unwrap();
        let again: TraceFile = serde_json::from_str(&back).unwrap();
        assert_eq!(again.steps.len(), 3);
    }

    #[test]
    fn event_defaults_are_permissive() {
        let ev: ContactEvent = serde_json::from_str(r#"{"touches": []}"#).unwrap();
        assert!(!ev.on_active_image);
        assert_eq!(ev.timestamp_ms, 0);
    }
}
