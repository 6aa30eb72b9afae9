//! flickview: gesture recognition and physics engine for a swipeable,
//! zoomable image carousel.
//!
//! The core is headless: it consumes identifier-tracked touch contacts and
//! host animation ticks, and emits box/transform writes through the
//! [`render::Renderer`] trait. Element creation, image loading and the
//! platform touch API live outside, behind collaborator traits.

pub mod carousel;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod error;
pub mod events;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod momentum;
pub mod registry;
pub mod render;
pub mod viewer;
pub mod zoom;

pub use classifier::GestureState;
pub use config::{Tunables, ViewportConfig};
pub use error::{ConfigError, ViewerError};
pub use events::{ContactEvent, TraceFile, TraceStep};
pub use frame::{ImageFrame, NaturalSize, Rect};
pub use registry::ContactPoint;
pub use render::{NullOverlay, Overlay, RecordingRenderer, Renderer};
pub use viewer::Viewer;
