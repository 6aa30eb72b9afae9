//! Per-image geometry: natural size, displayed box, zoom transform and the
//! layout-time box a zoomed image can reset to.

use serde::{Deserialize, Serialize};

use crate::config::ViewportConfig;

/// A displayed box in viewport-relative px.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: f64,
    pub height: f64,
}

/// One image of the filmstrip. `natural` is `None` until the loading
/// collaborator reports the intrinsic size; gestures are rejected until then.
#[derive(Debug, Clone)]
pub struct ImageFrame {
    pub index: usize,
    pub natural: Option<NaturalSize>,
    pub rect: Rect,
    /// Zoom ratio recorded by the last `apply_zoom`, used to restore the
    /// prior level on a second double-tap.
    pub scale: f64,
    /// Box computed at layout time; the rest-state lower bound.
    pub init: Rect,
}

impl ImageFrame {
    /// A frame whose image is still loading. No geometry yet.
    pub fn pending(index: usize) -> Self {
        Self {
            index,
            natural: None,
            rect: Rect::default(),
            scale: 1.0,
            init: Rect::default(),
        }
    }

    pub fn new(index: usize, natural: NaturalSize, viewport: &ViewportConfig) -> Self {
        let mut frame = Self::pending(index);
        frame.mark_loaded(natural, viewport);
        frame
    }

    pub fn is_loaded(&self) -> bool {
        self.natural.is_some()
    }

    /// Record the natural size and lay the image out inside the viewport.
    pub fn mark_loaded(&mut self, natural: NaturalSize, viewport: &ViewportConfig) {
        self.natural = Some(natural);
        self.layout(viewport);
    }

    /// Fit the box to the viewport along the natural aspect ratio, clamp to
    /// the viewport, center it, and record the result as `init`.
    pub fn layout(&mut self, viewport: &ViewportConfig) {
        let Some(natural) = self.natural else { return };
        let ratio = natural.width / natural.height;
        let mut width = viewport.width;
        let mut height = viewport.height;
        if natural.height * ratio > viewport.width {
            height = viewport.width / ratio;
        } else {
            width = viewport.height * ratio;
        }
        width = width.min(viewport.width);
        height = height.min(viewport.height);
        self.rect = Rect {
            width,
            height,
            left: (viewport.width - width) / 2.0,
            top: (viewport.height - height) / 2.0,
        };
        self.scale = 1.0;
        self.init = self.rect;
    }

    /// Scale the box to `natural * ratio`, anchored so `anchor` keeps its
    /// relative position inside the box (box center when `anchor` is `None`).
    /// Records the pre-zoom ratio in `scale` for the double-tap toggle.
    pub fn apply_zoom(&mut self, ratio: f64, anchor: Option<(f64, f64)>) {
        let Some(natural) = self.natural else { return };
        let Rect {
            width,
            height,
            left,
            top,
        } = self.rect;
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        let new_width = natural.width * ratio;
        let new_height = natural.height * ratio;
        let offset_width = new_width - width;
        let offset_height = new_height - height;
        self.scale = round2(width / natural.width);

        match anchor {
            Some((page_x, page_y)) => {
                self.rect.left -= offset_width * (page_x - left) / width;
                self.rect.top -= offset_height * (page_y - top) / height;
            }
            None => {
                self.rect.left -= offset_width / 2.0;
                self.rect.top -= offset_height / 2.0;
            }
        }
        self.rect.width = new_width;
        self.rect.height = new_height;
    }

    /// Snap back to the layout-time box.
    pub fn reset_init(&mut self) {
        self.rect = self.init;
        self.scale = 1.0;
    }

    /// Commit a pinched box as the new rest state, unless either dimension
    /// fell below `init`, in which case it snaps fully back. Returns true on
    /// snap-back.
    pub fn commit_pinch(&mut self, candidate: Rect) -> bool {
        if candidate.width < self.init.width || candidate.height < self.init.height {
            self.reset_init();
            true
        } else {
            self.rect = candidate;
            false
        }
    }

    pub fn move_to(&mut self, left: f64, top: f64) {
        self.rect.left = left;
        self.rect.top = top;
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: ViewportConfig = ViewportConfig {
        width: 750.0,
        height: 1000.0,
    };

    #[test]
    fn layout_fits_wide_image_to_viewport_width() {
        let frame = ImageFrame::new(
            0,
            NaturalSize {
                width: 1500.0,
                height: 1000.0,
            },
            &VIEWPORT,
        );
        assert_eq!(frame.rect.width, 750.0);
        assert_eq!(frame.rect.height, 500.0);
        assert_eq!(frame.rect.left, 0.0);
        assert_eq!(frame.rect.top, 250.0);
        assert_eq!(frame.init, frame.rect);
    }

    #[test]
    fn layout_fits_tall_image_to_viewport_height() {
        let frame = ImageFrame::new(
            0,
            NaturalSize {
                width: 500.0,
                height: 2000.0,
            },
            &VIEWPORT,
        );
        assert_eq!(frame.rect.height, 1000.0);
        assert_eq!(frame.rect.width, 250.0);
        assert_eq!(frame.rect.left, 250.0);
        assert_eq!(frame.rect.top, 0.0);
    }

    #[test]
    fn apply_zoom_doubles_against_natural_size() {
        let natural = NaturalSize {
            width: 1500.0,
            height: 1000.0,
        };
        let mut frame = ImageFrame::new(0, natural, &VIEWPORT);
        frame.apply_zoom(2.0, Some((375.0, 500.0)));
        assert_eq!(frame.rect.width, 3000.0);
        assert_eq!(frame.rect.height, 2000.0);
        // pre-zoom ratio was 750/1500
        assert_eq!(frame.scale, 0.5);
    }

    #[test]
    fn apply_zoom_keeps_anchor_at_same_relative_position() {
        let natural = NaturalSize {
            width: 1500.0,
            height: 1000.0,
        };
        let mut frame = ImageFrame::new(0, natural, &VIEWPORT);
        let before = frame.rect;
        let anchor = (500.0, 400.0);
        let rel_x = (anchor.0 - before.left) / before.width;
        let rel_y = (anchor.1 - before.top) / before.height;

        frame.apply_zoom(2.0, Some(anchor));
        let after = frame.rect;
        let rel_x2 = (anchor.0 - after.left) / after.width;
        let rel_y2 = (anchor.1 - after.top) / after.height;
        assert!((rel_x - rel_x2).abs() < 1e-9);
        assert!((rel_y - rel_y2).abs() < 1e-9);
    }

    #[test]
    fn apply_zoom_without_anchor_centers() {
        let natural = NaturalSize {
            width: 1500.0,
            height: 1000.0,
        };
        let mut frame = ImageFrame::new(0, natural, &VIEWPORT);
        let center_x = frame.rect.left + frame.rect.width / 2.0;
        frame.apply_zoom(2.0, None);
        assert!((frame.rect.left + frame.rect.width / 2.0 - center_x).abs() < 1e-9);
    }

    #[test]
    fn commit_pinch_snaps_back_below_init() {
        let natural = NaturalSize {
            width: 1500.0,
            height: 1000.0,
        };
        let mut frame = ImageFrame::new(0, natural, &VIEWPORT);
        let init = frame.init;
        let snapped = frame.commit_pinch(Rect {
            width: init.width - 1.0,
            height: init.height + 50.0,
            left: 10.0,
            top: 10.0,
        });
        assert!(snapped);
        assert_eq!(frame.rect, init);
    }

    #[test]
    fn commit_pinch_keeps_grown_box() {
        let natural = NaturalSize {
            width: 1500.0,
            height: 1000.0,
        };
        let mut frame = ImageFrame::new(0, natural, &VIEWPORT);
        let grown = Rect {
            width: frame.init.width + 100.0,
            height: frame.init.height + 100.0,
            left: -20.0,
            top: 100.0,
        };
        assert!(!frame.commit_pinch(grown));
        assert_eq!(frame.rect, grown);
    }

    #[test]
    fn pending_frame_ignores_zoom() {
        let mut frame = ImageFrame::pending(0);
        frame.apply_zoom(2.0, None);
        assert_eq!(frame.rect, Rect::default());
    }
}
