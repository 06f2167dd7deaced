use serde::{Deserialize, Serialize};

use crate::geometry::BoundingBox;

/// One detected object instance, as produced by a detector backend.
///
/// Detections are immutable once built. Within a frame they are identified
/// only by their position in the list.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    class_id: u32,
    class_name: String,
    confidence: f32,
    bounding_box: BoundingBox,
}

impl Detection {
    pub fn new(
        class_id: u32,
        class_name: impl Into<String>,
        confidence: f32,
        bounding_box: BoundingBox,
    ) -> Self {
        Self {
            class_id,
            class_name: class_name.into(),
            confidence,
            bounding_box,
        }
    }

    /// Index into the loaded class-name table.
    pub fn class_id(&self) -> u32 {
        self.class_id
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Confidence in `[0, 1]`.
    pub fn confidence(&self) -> f32 {
        self.confidence
    }

    /// Box in source-image pixel coordinates.
    pub fn bounding_box(&self) -> &BoundingBox {
        &self.bounding_box
    }

    /// Confidence as a whole percentage, e.g. `"87%"`.
    pub fn confidence_text(&self) -> String {
        format!("{}%", (self.confidence * 100.0).round() as i32)
    }
}

/// Thresholds handed to the inference backend. The layout core never reads them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct InferenceThresholds {
    pub confidence: f32,
    pub nms: f32,
}

impl Default for InferenceThresholds {
    fn default() -> Self {
        Self {
            confidence: 0.25,
            nms: 0.45,
        }
    }
}
