//! Presentation collaborators. The engine only ever talks to these traits;
//! side effects never feed back into gesture state.

use serde::Serialize;

use crate::frame::Rect;

/// Per-image / filmstrip presentation surface.
pub trait Renderer {
    /// Write an image's displayed box.
    fn set_image_box(&mut self, index: usize, rect: &Rect);
    /// Translate the filmstrip horizontally.
    fn set_strip_transform(&mut self, offset_x: f64);
    /// Transition duration for the next strip transform (0 = instantaneous).
    fn set_strip_transition(&mut self, duration_ms: u64);
    /// Toggle the zoom transition class on an image.
    fn set_zoom_class(&mut self, index: usize, on: bool);
}

/// Container show/hide fade lifecycle, orthogonal to gesture state.
pub trait Overlay {
    fn show(&mut self);
    fn hide(&mut self);
}

/// One recorded presentation side effect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum RenderOp {
    ImageBox {
        index: usize,
        width: f64,
        height: f64,
        left: f64,
        top: f64,
    },
    StripTransform {
        offset_x: f64,
    },
    StripTransition {
        duration_ms: u64,
    },
    ZoomClass {
        index: usize,
        on: bool,
    },
}

/// Renderer that records every call; used by tests and the replay CLI.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub ops: Vec<RenderOp>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }

    pub fn last_image_box(&self, index: usize) -> Option<Rect> {
        self.ops.iter().rev().find_map(|op| match op {
            RenderOp::ImageBox {
                index: i,
                width,
                height,
                left,
                top,
            } if *i == index => Some(Rect {
                width: *width,
                height: *height,
                left: *left,
                top: *top,
            }),
            _ => None,
        })
    }

    pub fn last_strip_transform(&self) -> Option<f64> {
        self.ops.iter().rev().find_map(|op| match op {
            RenderOp::StripTransform { offset_x } => Some(*offset_x),
            _ => None,
        })
    }
}

impl Renderer for RecordingRenderer {
    fn set_image_box(&mut self, index: usize, rect: &Rect) {
        self.ops.push(RenderOp::ImageBox {
            index,
            width: rect.width,
            height: rect.height,
            left: rect.left,
            top: rect.top,
        });
    }

    fn set_strip_transform(&mut self, offset_x: f64) {
        self.ops.push(RenderOp::StripTransform { offset_x });
    }

    fn set_strip_transition(&mut self, duration_ms: u64) {
        self.ops.push(RenderOp::StripTransition { duration_ms });
    }

    fn set_zoom_class(&mut self, index: usize, on: bool) {
        self.ops.push(RenderOp::ZoomClass { index, on });
    }
}

/// Overlay that tracks visibility without side effects.
#[derive(Debug, Default)]
pub struct NullOverlay {
    pub visible: bool,
}

impl Overlay for NullOverlay {
    fn show(&mut self) {
        self.visible = true;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}
