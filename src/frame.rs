//! Source frame description.
//!
//! Capture hardware usually delivers frames in sensor orientation. The
//! capture stage rotates pixels upright before inference, so detections and
//! the fit-center mapping both work in the upright size reported here.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

use crate::geometry::Size;

/// Clockwise rotation applied to bring a sensor frame upright.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn from_degrees(degrees: u32) -> Result<Self> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(anyhow!(
                "unsupported rotation {} (expected 0, 90, 180 or 270)",
                other
            )),
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True when width and height trade places.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Dimensions and orientation of one captured frame, in sensor space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInfo {
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
}

impl FrameInfo {
    pub fn new(width: u32, height: u32, rotation: Rotation) -> Self {
        Self {
            width,
            height,
            rotation,
        }
    }

    /// Frame that is already upright.
    pub fn upright(width: u32, height: u32) -> Self {
        Self::new(width, height, Rotation::Deg0)
    }

    /// `(width, height)` after rotation normalization.
    pub fn upright_dimensions(&self) -> (u32, u32) {
        if self.rotation.is_transposed() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn upright_size(&self) -> Size {
        let (width, height) = self.upright_dimensions();
        Size::new(width as f32, height as f32)
    }

    /// A frame with a zero dimension has not been captured yet.
    pub fn is_ready(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}
