//! Gesture classification: one active interaction mode at a time.

use log::debug;

/// The single active interaction mode. Exactly one variant is ever in
/// effect; `Momentum` additionally requires all touches released.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    CarouselDrag,
    ImagePan,
    PinchZoom,
    Momentum,
}

/// Decide the mode for a fresh start event. Returns `None` when no rule
/// matches and the current mode should stand.
///
/// - one contact on a zoomed active image → pan
/// - one contact, image not zoomed → carousel drag
/// - two or more contacts on the active image → pinch (cancels drag/pan)
pub fn classify_start(
    contact_count: usize,
    zoomed: bool,
    on_active_image: bool,
) -> Option<GestureState> {
    let next = match contact_count {
        0 => None,
        1 if zoomed && on_active_image => Some(GestureState::ImagePan),
        1 if !zoomed => Some(GestureState::CarouselDrag),
        1 => None,
        _ if on_active_image => Some(GestureState::PinchZoom),
        _ => None,
    };
    if let Some(state) = next {
        debug!("classified start ({contact_count} contacts, zoomed={zoomed}) -> {state:?}");
    }
    next
}

/// Double-tap window tracking, independent of touch-count state.
#[derive(Debug)]
pub struct TapTracker {
    window_ms: u64,
    last_tap_ms: Option<u64>,
}

impl TapTracker {
    pub fn new(window_ms: u64) -> Self {
        Self {
            window_ms,
            last_tap_ms: None,
        }
    }

    /// Record a tap; true when it completes a double-tap (two taps within
    /// the window). The tap time is always recorded, so a triple tap reads
    /// as two overlapping doubles.
    pub fn register(&mut self, now_ms: u64) -> bool {
        let double = self
            .last_tap_ms
            .is_some_and(|last| now_ms.saturating_sub(last) < self.window_ms);
        self.last_tap_ms = Some(now_ms);
        double
    }
}
