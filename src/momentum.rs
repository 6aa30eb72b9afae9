//! Post-release momentum decay for a flicked, zoomed image.
//!
//! The decay is a plain value the host ticks through `step()`; the
//! orchestrator drops it when a new gesture starts, so a stale decay can
//! never write over live gesture state.

use log::debug;

use crate::config::{Tunables, ViewportConfig};
use crate::frame::Rect;
use crate::geometry::{clamp, dist};
use crate::zoom::ZoomSession;

/// Legal travel range for one axis. An axis whose box dimension exceeds the
/// viewport can travel within `[viewport - box, 0]`; otherwise it is pinned
/// to its current position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    pub fn for_axis(viewport: f64, size: f64, position: f64) -> Self {
        if size > viewport {
            Self {
                min: viewport - size,
                max: 0.0,
            }
        } else {
            Self {
                min: position,
                max: position,
            }
        }
    }

    fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One frame's outcome. `Finished` carries the final (clamped) position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    Moving { left: f64, top: f64 },
    Finished {
        left: f64,
        top: f64,
        hit_boundary: bool,
    },
}

/// Geometric speed decay projected along the release direction, clamped to
/// the image's travel range.
#[derive(Debug)]
pub struct MomentumDecay {
    speed: f64,
    rate: f64,
    unit_x: f64,
    unit_y: f64,
    left: f64,
    top: f64,
    x_range: AxisRange,
    y_range: AxisRange,
    min_speed: f64,
}

impl MomentumDecay {
    /// Build the decay from a finished pan. Returns `None` for degenerate
    /// releases: no movement, zero travel, zero duration, or a speed already
    /// below the stop threshold.
    pub fn from_release(
        session: &ZoomSession,
        rect: &Rect,
        viewport: &ViewportConfig,
        tunables: &Tunables,
        end_time_ms: u64,
    ) -> Option<Self> {
        if !session.moved {
            return None;
        }
        let start_time = session.start_time_ms?;
        let duration = end_time_ms.saturating_sub(start_time);
        let dx = session.start_page_x - session.last_page_x;
        let dy = session.start_page_y - session.last_page_y;
        let distance = dist(dx, dy);
        if duration == 0 || distance == 0.0 {
            return None;
        }

        let speed = distance / duration as f64 * tunables.momentum_frame_ms;
        if speed < tunables.momentum_min_speed {
            return None;
        }
        let rate = speed.min(tunables.momentum_rate_cap);

        let decay = Self {
            speed,
            rate,
            unit_x: dx / distance,
            unit_y: dy / distance,
            left: session.anchor_left,
            top: session.anchor_top,
            x_range: AxisRange::for_axis(viewport.width, rect.width, session.anchor_left),
            y_range: AxisRange::for_axis(viewport.height, rect.height, session.anchor_top),
            min_speed: tunables.momentum_min_speed,
        };
        debug!(
            "momentum: speed {:.2} rate {:.2} over {duration}ms",
            decay.speed, decay.rate
        );
        Some(decay)
    }

    /// Advance one frame: decay the speed, move along the release direction,
    /// clamp per axis. A clamp on either axis zeroes the remaining speed and
    /// finishes after applying the clamped position.
    pub fn step(&mut self) -> StepOutcome {
        self.speed -= self.speed / self.rate;
        self.left -= self.speed * self.unit_x;
        self.top -= self.speed * self.unit_y;

        let mut hit = false;
        if !self.x_range.contains(self.left) {
            self.left = clamp(self.left, self.x_range.min, self.x_range.max);
            hit = true;
        }
        if !self.y_range.contains(self.top) {
            self.top = clamp(self.top, self.y_range.min, self.y_range.max);
            hit = true;
        }

        if hit {
            self.speed = 0.0;
            StepOutcome::Finished {
                left: self.left,
                top: self.top,
                hit_boundary: true,
            }
        } else if self.speed < self.min_speed {
            self.speed = 0.0;
            StepOutcome::Finished {
                left: self.left,
                top: self.top,
                hit_boundary: false,
            }
        } else {
            StepOutcome::Moving {
                left: self.left,
                top: self.top,
            }
        }
    }
}
