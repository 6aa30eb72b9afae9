//! Horizontal drag-to-switch-slide motion with rubber-band damping at the
//! filmstrip ends and snap-to-neighbor on release.

use log::debug;

use crate::geometry::damping;

/// Committed strip state plus the in-flight drag, if any.
#[derive(Debug)]
pub struct CarouselState {
    image_count: usize,
    viewport_width: f64,
    margin: f64,
    snap_threshold: f64,
    /// Sum of all slide widths plus inter-slide margins.
    content_width: f64,
    current_index: usize,
    /// Accumulated horizontal translation, never positive at rest.
    current_offset: f64,
    /// In-flight drag delta; zero when idle.
    pending_delta: f64,
    start_page_x: f64,
}

/// Outcome of a drag release, applied with the snap transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapResult {
    pub offset: f64,
    pub index: usize,
    /// Whether the index actually stepped (false on snap-back).
    pub advanced: bool,
}

impl CarouselState {
    pub fn new(image_count: usize, viewport_width: f64, margin: f64, snap_threshold: f64) -> Self {
        let mut state = Self {
            image_count,
            viewport_width,
            margin,
            snap_threshold,
            content_width: 0.0,
            current_index: 0,
            current_offset: 0.0,
            pending_delta: 0.0,
            start_page_x: 0.0,
        };
        state.recompute_content_width();
        state
    }

    fn recompute_content_width(&mut self) {
        let n = self.image_count as f64;
        self.content_width = self.viewport_width * n + (n - 1.0).max(0.0) * self.margin;
    }

    /// Re-inject the viewport on resize; the committed offset is realigned
    /// so the current slide stays in view.
    pub fn set_viewport_width(&mut self, viewport_width: f64) {
        self.viewport_width = viewport_width;
        self.recompute_content_width();
        self.current_offset = -(self.current_index as f64) * self.slide_stride();
        self.pending_delta = 0.0;
    }

    fn slide_stride(&self) -> f64 {
        self.viewport_width + self.margin
    }

    pub fn drag_start(&mut self, page_x: f64) {
        self.start_page_x = page_x;
        self.pending_delta = 0.0;
    }

    /// Compute the instantaneous strip offset for a drag sample. Overshoot
    /// past the first or last slide is fed through the damping curve.
    pub fn drag_move(&mut self, page_x: f64) -> f64 {
        let delta = page_x - self.start_page_x;
        self.pending_delta = delta;

        let proposed = self.current_offset + delta;
        let bound = self.content_width - self.viewport_width;
        if proposed > 0.0 {
            damping(proposed)
        } else if -proposed > bound {
            -(bound + damping(-proposed - bound))
        } else {
            proposed
        }
    }

    /// Commit the drag: step one slide when the delta clears the snap
    /// threshold (staying put at either end), otherwise revert.
    pub fn drag_end(&mut self) -> SnapResult {
        let delta = self.pending_delta;
        let mut offset = self.current_offset;
        let mut advanced = false;

        if delta.abs() > self.snap_threshold {
            if delta > 0.0 {
                if self.current_index > 0 {
                    self.current_index -= 1;
                    offset += self.slide_stride();
                    advanced = true;
                }
            } else if self.current_index + 1 < self.image_count {
                self.current_index += 1;
                offset -= self.slide_stride();
                advanced = true;
            }
        }

        self.current_offset = offset;
        self.pending_delta = 0.0;
        debug!(
            "drag end: delta {delta:.1} -> index {} offset {offset:.1}",
            self.current_index
        );
        SnapResult {
            offset,
            index: self.current_index,
            advanced,
        }
    }

    /// Discard an in-flight drag (a pinch stole the gesture).
    pub fn cancel_drag(&mut self) -> f64 {
        self.pending_delta = 0.0;
        self.current_offset
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn current_offset(&self) -> f64 {
        self.current_offset
    }

    pub fn pending_delta(&self) -> f64 {
        self.pending_delta
    }

    pub fn content_width(&self) -> f64 {
        self.content_width
    }
}
