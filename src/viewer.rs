//! Viewer orchestrator: owns the registry, carousel and image frames,
//! routes raw contact events through the classifier to the active handler,
//! and pushes the resulting transforms to the renderer.
//!
//! Data flows one direction per event: raw touch batch → registry update →
//! classifier → handler mutates frame/carousel state → renderer write.

use log::debug;

use crate::carousel::CarouselState;
use crate::classifier::{GestureState, TapTracker, classify_start};
use crate::config::{Tunables, ViewportConfig};
use crate::error::ViewerError;
use crate::events::ContactEvent;
use crate::frame::{ImageFrame, NaturalSize};
use crate::momentum::{MomentumDecay, StepOutcome};
use crate::registry::TouchRegistry;
use crate::render::{Overlay, Renderer};
use crate::zoom::{PinchSession, ZoomSession, ZoomStatus};

pub struct Viewer<R: Renderer, O: Overlay> {
    tunables: Tunables,
    viewport: ViewportConfig,
    registry: TouchRegistry,
    carousel: CarouselState,
    frames: Vec<ImageFrame>,
    state: GestureState,
    zoom: ZoomStatus,
    pan: Option<ZoomSession>,
    pinch: Option<PinchSession>,
    momentum: Option<MomentumDecay>,
    taps: TapTracker,
    renderer: R,
    overlay: O,
}

impl<R: Renderer, O: Overlay> Viewer<R, O> {
    /// Build the per-image model array. A `None` source is an image whose
    /// natural size is not known yet; gestures on it are rejected until
    /// `mark_loaded` completes it.
    pub fn new(
        sources: &[Option<NaturalSize>],
        viewport: ViewportConfig,
        tunables: Tunables,
        renderer: R,
        overlay: O,
    ) -> Result<Self, ViewerError> {
        if sources.is_empty() {
            return Err(ViewerError::NoImages);
        }
        if !viewport.is_valid() {
            return Err(ViewerError::BadViewport);
        }

        let frames: Vec<ImageFrame> = sources
            .iter()
            .enumerate()
            .map(|(i, source)| match source {
                Some(natural) => ImageFrame::new(i, *natural, &viewport),
                None => ImageFrame::pending(i),
            })
            .collect();
        let carousel = CarouselState::new(
            frames.len(),
            viewport.width,
            tunables.slide_margin,
            tunables.snap_threshold,
        );
        let taps = TapTracker::new(tunables.double_tap_ms);

        let mut viewer = Self {
            tunables,
            viewport,
            registry: TouchRegistry::new(),
            carousel,
            frames,
            state: GestureState::Idle,
            zoom: ZoomStatus::default(),
            pan: None,
            pinch: None,
            momentum: None,
            taps,
            renderer,
            overlay,
        };
        viewer.renderer.set_strip_transition(0);
        viewer.renderer.set_strip_transform(0.0);
        viewer.render_all_boxes();
        Ok(viewer)
    }

    /// Complete a pending image once the loading collaborator knows its
    /// natural size.
    pub fn mark_loaded(&mut self, index: usize, natural: NaturalSize) -> Result<(), ViewerError> {
        let frame = self
            .frames
            .get_mut(index)
            .ok_or(ViewerError::BadIndex(index))?;
        frame.mark_loaded(natural, &self.viewport);
        let rect = frame.rect;
        self.renderer.set_image_box(index, &rect);
        Ok(())
    }

    pub fn handle_contacts_start(&mut self, ev: &ContactEvent) {
        self.registry.on_contacts_start(&ev.touches);

        // a newly started gesture always wins over a stale decay animation
        if self.momentum.take().is_some() {
            debug!("touch start cancels in-flight momentum");
            if self.state == GestureState::Momentum {
                self.state = GestureState::Idle;
            }
        }

        let count = self.registry.len();
        if count == 0 {
            return;
        }
        if !self.active_frame().is_loaded() {
            debug!(
                "gesture rejected: image {} has no natural size yet",
                self.carousel.current_index()
            );
            return;
        }

        match classify_start(count, self.zoom.active, ev.on_active_image) {
            Some(GestureState::PinchZoom) => self.begin_pinch(),
            Some(GestureState::ImagePan) => self.begin_pan(),
            Some(GestureState::CarouselDrag) => self.begin_drag(),
            _ => {}
        }
    }

    pub fn handle_contacts_move(&mut self, ev: &ContactEvent) {
        self.registry.on_contacts_move(&ev.touches);

        match self.state {
            GestureState::CarouselDrag => {
                let Some(c) = self.registry.first().copied() else {
                    return;
                };
                let offset = self.carousel.drag_move(c.page_x);
                self.renderer.set_strip_transition(0);
                self.renderer.set_strip_transform(offset);
            }
            GestureState::ImagePan => {
                let Some(c) = self.registry.first().copied() else {
                    return;
                };
                let idx = self.carousel.current_index();
                let Some(session) = self.pan.as_mut() else {
                    return;
                };
                let (left, top) = session.pan_to(c.page_x, c.page_y, ev.timestamp_ms);
                self.frames[idx].move_to(left, top);
                self.renderer.set_zoom_class(idx, false);
                let rect = self.frames[idx].rect;
                self.renderer.set_image_box(idx, &rect);
            }
            GestureState::PinchZoom => {
                let contacts = self.registry.current();
                if contacts.len() < 2 {
                    return;
                }
                let (p1, p2) = (contacts[0], contacts[1]);
                let idx = self.carousel.current_index();
                let rest = self.frames[idx].rect;
                let Some(session) = self.pinch.as_mut() else {
                    return;
                };
                if let Some(candidate) = session.update(&rest, &p1, &p2) {
                    self.renderer.set_zoom_class(idx, false);
                    self.renderer.set_image_box(idx, &candidate);
                }
            }
            _ => {}
        }
    }

    pub fn handle_contacts_end(&mut self, ev: &ContactEvent) {
        match self.state {
            GestureState::CarouselDrag => self.end_drag(),
            GestureState::ImagePan => self.end_pan(ev),
            GestureState::PinchZoom => self.end_pinch(),
            _ => {}
        }

        self.registry.on_contacts_end(&ev.touches);
        if self.state == GestureState::Momentum {
            return;
        }

        match self.registry.len() {
            0 => {
                self.state = GestureState::Idle;
                self.pan = None;
                self.pinch = None;
            }
            1 if self.zoom.active && self.active_frame().is_loaded() => {
                // re-derive the surviving contact's baseline so the
                // follow-up pan does not jump
                self.pinch = None;
                self.begin_pan();
            }
            1 => {
                self.state = GestureState::Idle;
                self.pinch = None;
            }
            _ => {
                if self.state == GestureState::PinchZoom {
                    // pinch continues on the surviving pair with a fresh
                    // baseline
                    let contacts = self.registry.current();
                    let (p1, p2) = (contacts[0], contacts[1]);
                    self.pinch = Some(PinchSession::begin(&p1, &p2));
                }
            }
        }
    }

    /// Double-tap detection input. Toggles between the double-tap zoom level
    /// and the prior state; a pinch-originated zoom always resets fully to
    /// the initial box.
    pub fn handle_tap(&mut self, page_x: f64, page_y: f64, on_active_image: bool, now_ms: u64) {
        if !on_active_image || !self.active_frame().is_loaded() {
            return;
        }
        if !self.taps.register(now_ms) {
            return;
        }
        if self.state == GestureState::ImagePan && self.pan.as_ref().is_some_and(|s| s.moved) {
            return;
        }
        if self.momentum.take().is_some() && self.state == GestureState::Momentum {
            self.state = GestureState::Idle;
        }

        let idx = self.carousel.current_index();
        if self.zoom.pinch_originated {
            self.frames[idx].reset_init();
            self.zoom.clear();
            self.renderer.set_zoom_class(idx, false);
            debug!("double-tap: pinch-zoomed image reset to initial box");
        } else if self.zoom.active {
            let anchor = self.zoom.tap_anchor;
            let scale = self.frames[idx].scale;
            self.frames[idx].apply_zoom(scale, anchor);
            self.zoom.active = false;
            self.renderer.set_zoom_class(idx, true);
            debug!("double-tap: restored ratio {scale}");
        } else {
            let ratio = self.tunables.double_tap_ratio;
            self.zoom.tap_anchor = Some((page_x, page_y));
            self.frames[idx].apply_zoom(ratio, Some((page_x, page_y)));
            self.zoom.active = true;
            self.renderer.set_zoom_class(idx, true);
            debug!("double-tap: zoomed to ratio {ratio} at ({page_x}, {page_y})");
        }
        let rect = self.frames[idx].rect;
        self.renderer.set_image_box(idx, &rect);
    }

    /// Host-driven animation tick. Only momentum decay runs here; the check
    /// at the top is what lets a new gesture invalidate a stale decay before
    /// its next write.
    pub fn on_frame(&mut self) {
        if self.state != GestureState::Momentum {
            self.momentum = None;
            return;
        }
        let Some(decay) = self.momentum.as_mut() else {
            self.state = GestureState::Idle;
            return;
        };

        let idx = self.carousel.current_index();
        match decay.step() {
            StepOutcome::Moving { left, top } => {
                self.frames[idx].move_to(left, top);
                let rect = self.frames[idx].rect;
                self.renderer.set_image_box(idx, &rect);
            }
            StepOutcome::Finished {
                left,
                top,
                hit_boundary,
            } => {
                self.frames[idx].move_to(left, top);
                let rect = self.frames[idx].rect;
                self.renderer.set_image_box(idx, &rect);
                if hit_boundary {
                    self.renderer.set_zoom_class(idx, true);
                }
                self.momentum = None;
                self.state = GestureState::Idle;
            }
        }
    }

    /// Re-inject the viewport on resize. Every frame is re-fit (zoom state
    /// reset) and the strip realigned to the current slide.
    pub fn set_viewport(&mut self, viewport: ViewportConfig) -> Result<(), ViewerError> {
        if !viewport.is_valid() {
            return Err(ViewerError::BadViewport);
        }
        self.viewport = viewport;
        self.state = GestureState::Idle;
        self.zoom.clear();
        self.pan = None;
        self.pinch = None;
        self.momentum = None;
        self.carousel.set_viewport_width(viewport.width);
        for frame in &mut self.frames {
            frame.layout(&viewport);
        }
        self.render_all_boxes();
        self.renderer.set_strip_transition(0);
        self.renderer.set_strip_transform(self.carousel.current_offset());
        Ok(())
    }

    pub fn show(&mut self) {
        self.overlay.show();
    }

    pub fn hide(&mut self) {
        self.overlay.hide();
    }

    /// Index of the active slide, for the hosting UI's "1/N" indicator.
    pub fn current_index(&self) -> usize {
        self.carousel.current_index()
    }

    pub fn image_count(&self) -> usize {
        self.frames.len()
    }

    pub fn gesture_state(&self) -> GestureState {
        self.state
    }

    pub fn is_zoomed(&self) -> bool {
        self.zoom.active
    }

    pub fn frame(&self, index: usize) -> Option<&ImageFrame> {
        self.frames.get(index)
    }

    pub fn active_frame(&self) -> &ImageFrame {
        &self.frames[self.carousel.current_index()]
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn overlay(&self) -> &O {
        &self.overlay
    }

    fn render_all_boxes(&mut self) {
        for i in 0..self.frames.len() {
            if self.frames[i].is_loaded() {
                let rect = self.frames[i].rect;
                self.renderer.set_image_box(i, &rect);
            }
        }
    }

    fn begin_drag(&mut self) {
        let Some(c) = self.registry.first().copied() else {
            return;
        };
        self.carousel.drag_start(c.page_x);
        self.state = GestureState::CarouselDrag;
    }

    fn begin_pan(&mut self) {
        let Some(c) = self.registry.first().copied() else {
            return;
        };
        let rect = self.active_frame().rect;
        self.pan = Some(ZoomSession::begin(rect.left, rect.top, c.page_x, c.page_y));
        self.state = GestureState::ImagePan;
    }

    fn begin_pinch(&mut self) {
        if self.state == GestureState::CarouselDrag {
            // the pinch steals the gesture; park the strip where it was
            // last committed
            let offset = self.carousel.cancel_drag();
            self.renderer.set_strip_transition(0);
            self.renderer.set_strip_transform(offset);
        }
        let contacts = self.registry.current();
        if contacts.len() < 2 {
            return;
        }
        let (p1, p2) = (contacts[0], contacts[1]);
        self.pan = None;
        self.pinch = Some(PinchSession::begin(&p1, &p2));
        self.zoom.active = true;
        self.zoom.pinch_originated = true;
        self.state = GestureState::PinchZoom;
        let idx = self.carousel.current_index();
        self.renderer.set_zoom_class(idx, false);
    }

    fn end_drag(&mut self) {
        let snap = self.carousel.drag_end();
        self.renderer
            .set_strip_transition(self.tunables.snap_duration_ms);
        self.renderer.set_strip_transform(snap.offset);
        self.state = GestureState::Idle;
    }

    fn end_pan(&mut self, ev: &ContactEvent) {
        let idx = self.carousel.current_index();
        self.renderer.set_zoom_class(idx, false);
        let Some(session) = self.pan.take() else {
            self.state = GestureState::Idle;
            return;
        };
        if !session.moved || !ev.touches.is_empty() {
            self.state = GestureState::Idle;
            return;
        }

        let rect = self.frames[idx].rect;
        match MomentumDecay::from_release(
            &session,
            &rect,
            &self.viewport,
            &self.tunables,
            ev.timestamp_ms,
        ) {
            Some(decay) => {
                self.momentum = Some(decay);
                self.state = GestureState::Momentum;
            }
            None => self.state = GestureState::Idle,
        }
    }

    fn end_pinch(&mut self) {
        let idx = self.carousel.current_index();
        self.renderer.set_zoom_class(idx, true);
        let Some(session) = self.pinch.take() else {
            return;
        };
        if let Some(candidate) = session.candidate {
            if self.frames[idx].commit_pinch(candidate) {
                self.zoom.clear();
                debug!("pinch ended below initial box; snapped back");
            }
            let rect = self.frames[idx].rect;
            self.renderer.set_image_box(idx, &rect);
        }
        // no candidate: a moveless pinch leaves the rest box and the zoomed
        // flags as they are
    }
}
