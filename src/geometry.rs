//! Scalar math shared by the carousel and zoom engines.

use crate::registry::ContactPoint;

/// Overshoot breakpoints for the rubber-band curve, in px.
const DAMPING_STEPS: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 100.0];
/// Per-segment marginal rates; the segment below the first breakpoint is 1:1.
const DAMPING_RATES: [f64; 5] = [0.5, 0.4, 0.3, 0.2, 0.1];

pub fn dist(dx: f64, dy: f64) -> f64 {
    (dx * dx + dy * dy).sqrt()
}

/// Arithmetic mean of the contact positions. An empty set yields the origin
/// rather than NaN; callers are expected to pass at least one point.
pub fn centroid(points: &[ContactPoint]) -> (f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0);
    }
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    for p in points {
        sum_x += p.page_x;
        sum_y += p.page_y;
    }
    let n = points.len() as f64;
    (sum_x / n, sum_y / n)
}

/// Progressively resistive response to dragging past a boundary.
///
/// The first 20px pass through unchanged; each following 20px band
/// contributes at its own rate, summed cumulatively, so large overshoot
/// approaches a soft limit.
pub fn damping(value: f64) -> f64 {
    let mut scaled = value;
    let mut i = DAMPING_STEPS.len();
    while i > 0 {
        i -= 1;
        if value > DAMPING_STEPS[i] {
            scaled = (value - DAMPING_STEPS[i]) * DAMPING_RATES[i];
            for j in (1..=i).rev() {
                scaled += (DAMPING_STEPS[j] - DAMPING_STEPS[j - 1]) * DAMPING_RATES[j - 1];
            }
            scaled += DAMPING_STEPS[0];
            break;
        }
    }
    scaled
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}
