//! Zoom/pan gesture sessions: single-finger pan deltas while zoomed, and
//! pinch growth anchored at the two-finger centroid. Sessions are created at
//! gesture start and discarded at gesture end.

use crate::frame::Rect;
use crate::geometry::{centroid, dist};
use crate::registry::ContactPoint;

/// Persistent zoomed-ness of the active image, distinct from the transient
/// gesture mode. Survives across gestures until toggled off or snapped back.
#[derive(Debug, Clone, Default)]
pub struct ZoomStatus {
    pub active: bool,
    /// Set when the zoom came from a pinch; double-tap then resets fully to
    /// the initial box instead of restoring an intermediate ratio.
    pub pinch_originated: bool,
    /// Tap point saved by the zoom-in double-tap, reused as the anchor when
    /// the zoom-out tap restores the prior ratio.
    pub tap_anchor: Option<(f64, f64)>,
}

impl ZoomStatus {
    pub fn clear(&mut self) {
        self.active = false;
        self.pinch_originated = false;
        self.tap_anchor = None;
    }
}

/// One single-finger pan while zoomed. Position accumulates per-sample
/// deltas; the start sample and time feed release velocity.
#[derive(Debug, Clone)]
pub struct ZoomSession {
    /// Box position, advanced by each pan delta.
    pub anchor_left: f64,
    pub anchor_top: f64,
    pub last_page_x: f64,
    pub last_page_y: f64,
    pub start_page_x: f64,
    pub start_page_y: f64,
    /// Armed on the first move sample, not at touch start.
    pub start_time_ms: Option<u64>,
    pub moved: bool,
}

impl ZoomSession {
    pub fn begin(box_left: f64, box_top: f64, page_x: f64, page_y: f64) -> Self {
        Self {
            anchor_left: box_left,
            anchor_top: box_top,
            last_page_x: page_x,
            last_page_y: page_y,
            start_page_x: page_x,
            start_page_y: page_y,
            start_time_ms: None,
            moved: false,
        }
    }

    /// Advance by the delta from the last sample; returns the new box
    /// position.
    pub fn pan_to(&mut self, page_x: f64, page_y: f64, now_ms: u64) -> (f64, f64) {
        if self.start_time_ms.is_none() {
            self.start_time_ms = Some(now_ms);
        }
        self.anchor_left += page_x - self.last_page_x;
        self.anchor_top += page_y - self.last_page_y;
        self.last_page_x = page_x;
        self.last_page_y = page_y;
        self.moved = true;
        (self.anchor_left, self.anchor_top)
    }
}

/// One pinch. The candidate box is recomputed from the rest box on every
/// move, so only the committed rest state survives the gesture.
#[derive(Debug, Clone)]
pub struct PinchSession {
    pub baseline_dist: f64,
    pub candidate: Option<Rect>,
}

impl PinchSession {
    pub fn begin(p1: &ContactPoint, p2: &ContactPoint) -> Self {
        Self {
            baseline_dist: pointer_dist(p1, p2),
            candidate: None,
        }
    }

    /// Grow the rest box by the raw finger-separation delta (linear pixel
    /// growth, not a ratio), re-anchored at the current centroid.
    pub fn update(&mut self, rest: &Rect, p1: &ContactPoint, p2: &ContactPoint) -> Option<Rect> {
        if rest.width <= 0.0 || rest.height <= 0.0 {
            return None;
        }
        let diff = pointer_dist(p1, p2) - self.baseline_dist;
        let (center_x, center_y) = centroid(&[*p1, *p2]);
        let rect = Rect {
            width: rest.width + diff,
            height: rest.height + diff,
            left: rest.left - diff * (center_x - rest.left) / rest.width,
            top: rest.top - diff * (center_y - rest.top) / rest.height,
        };
        self.candidate = Some(rect);
        Some(rect)
    }
}

fn pointer_dist(p1: &ContactPoint, p2: &ContactPoint) -> f64 {
    dist(
        (p1.page_x - p2.page_x).abs(),
        (p1.page_y - p2.page_y).abs(),
    )
}
