use anyhow::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::detect::backend::DetectorBackend;
use crate::detect::names::ClassNames;
use crate::detect::result::{Detection, InferenceThresholds};
use crate::frame::FrameInfo;
use crate::geometry::BoundingBox;

const MAX_OBJECTS_PER_FRAME: usize = 12;
const COCO_CLASS_COUNT: u32 = 80;

/// Synthetic backend for demos. Emits seeded random boxes inside the frame.
pub struct SyntheticBackend {
    rng: StdRng,
    names: ClassNames,
    thresholds: InferenceThresholds,
}

impl SyntheticBackend {
    pub fn new(seed: u64) -> Self {
        Self::with_names(seed, ClassNames::default())
    }

    pub fn with_names(seed: u64, names: ClassNames) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            names,
            thresholds: InferenceThresholds::default(),
        }
    }
}

impl DetectorBackend for SyntheticBackend {
    fn name(&self) -> &'static str {
        "synthetic"
    }

    fn detect(&mut self, _pixels: &[u8], frame: &FrameInfo) -> Result<Vec<Detection>> {
        let size = frame.upright_size();
        if size.width < 2.0 || size.height < 2.0 {
            return Ok(Vec::new());
        }
        let class_count = if self.names.is_empty() {
            COCO_CLASS_COUNT
        } else {
            self.names.len() as u32
        };
        let count = self.rng.gen_range(0..=MAX_OBJECTS_PER_FRAME);
        let mut out = Vec::with_capacity(count);
        for _ in 0..count {
            let confidence: f32 = self.rng.gen_range(0.0..1.0);
            if confidence < self.thresholds.confidence {
                continue;
            }
            let width = self.rng.gen_range(1.0..size.width);
            let height = self.rng.gen_range(1.0..size.height);
            let x = self.rng.gen_range(0.0..=size.width - width);
            let y = self.rng.gen_range(0.0..=size.height - height);
            let class_id = self.rng.gen_range(0..class_count);
            out.push(self.names.detection(
                class_id,
                confidence,
                BoundingBox::new(x, y, width, height),
            ));
        }
        Ok(out)
    }

    fn set_thresholds(&mut self, thresholds: InferenceThresholds) {
        self.thresholds = thresholds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_produces_same_frames() {
        let frame = FrameInfo::upright(640, 480);
        let mut a = SyntheticBackend::new(42);
        let mut b = SyntheticBackend::new(42);
        for _ in 0..5 {
            assert_eq!(a.detect(&[], &frame).unwrap(), b.detect(&[], &frame).unwrap());
        }
    }

    #[test]
    fn boxes_stay_inside_the_frame() {
        let frame = FrameInfo::upright(320, 240);
        let mut backend = SyntheticBackend::new(3);
        for _ in 0..20 {
            for det in backend.detect(&[], &frame).unwrap() {
                let bbox = det.bounding_box();
                assert!(bbox.x >= 0.0 && bbox.y >= 0.0);
                assert!(bbox.x + bbox.width <= 320.0 + 1e-3);
                assert!(bbox.y + bbox.height <= 240.0 + 1e-3);
                assert!(det.confidence() >= 0.25);
            }
        }
    }
}
