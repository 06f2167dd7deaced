//! Detection overlay layout
//!
//! This crate turns one frame's object detections into a render list for a
//! live camera overlay: where to draw each box, where to put its label chip
//! and which color to fill it with.
//!
//! # Architecture
//!
//! Per frame, two stages run in sequence:
//!
//! 1. **Coordinate mapping**: boxes move from source-image pixels to surface
//!    pixels under a fit-center (aspect-preserving, letterboxed) transform.
//! 2. **Label layout**: each box gets a label above it, clamped into the
//!    viewport; labels are placed largest box first, and colliding labels try
//!    a fixed sequence of alternative positions.
//!
//! Both stages are pure. Nothing is carried between frames except immutable
//! style settings and color tables.
//!
//! # Module Structure
//!
//! - `geometry`: rectangles and sizes
//! - `mapper`: fit-center coordinate mapping
//! - `layout`: label placement, overlap resolution, colors, text measurement
//! - `detect`: detection data model, class names, detector backends
//! - `frame`: source frame dimensions and rotation normalization
//! - `pipeline`: detect → map → layout for one frame, with stats
//! - `config`: file + environment configuration
//! - `render` (feature `raster`): rasterize a render list

pub mod config;
pub mod detect;
pub mod frame;
pub mod geometry;
pub mod layout;
pub mod mapper;
pub mod pipeline;
#[cfg(feature = "raster")]
pub mod render;
pub mod stats;

pub use config::OverlayConfig;
pub use detect::{
    BackendRegistry, ClassNames, Detection, DetectorBackend, InferenceThresholds, StubBackend,
    SyntheticBackend, UNKNOWN_CLASS,
};
pub use frame::{FrameInfo, Rotation};
pub use geometry::{BoundingBox, Rect, Size};
pub use layout::{
    AdvanceMeasure, Color, LabelLayoutEngine, LabelStyle, LayoutReport, RenderItem, TextMeasure,
    TextStyle,
};
pub use mapper::CoordinateMapper;
pub use pipeline::{FrameOverlay, OverlayPipeline};
pub use stats::FrameStats;
