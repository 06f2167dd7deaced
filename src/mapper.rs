//! Fit-center mapping from source-image pixels to surface pixels.
//!
//! The whole source image is scaled uniformly to fit inside the surface and
//! centered, leaving letterbox bands on the axis with spare room.

use crate::geometry::{BoundingBox, Rect, Size};

/// Precomputed fit-center transform for one (source, surface) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateMapper {
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl CoordinateMapper {
    /// Builds the transform, or `None` when the source has a zero dimension.
    ///
    /// A zero-sized source means no frame has been captured yet; callers skip
    /// rendering for that frame.
    pub fn fit_center(source_width: u32, source_height: u32, view: Size) -> Option<Self> {
        if source_width == 0 || source_height == 0 {
            return None;
        }
        let source_width = source_width as f32;
        let source_height = source_height as f32;
        let scale = (view.width / source_width).min(view.height / source_height);
        Some(Self {
            scale,
            offset_x: (view.width - source_width * scale) / 2.0,
            offset_y: (view.height - source_height * scale) / 2.0,
        })
    }

    pub fn map_rect(&self, bbox: &BoundingBox) -> Rect {
        Rect::new(
            bbox.x * self.scale + self.offset_x,
            bbox.y * self.scale + self.offset_y,
            (bbox.x + bbox.width) * self.scale + self.offset_x,
            (bbox.y + bbox.height) * self.scale + self.offset_y,
        )
    }
}
