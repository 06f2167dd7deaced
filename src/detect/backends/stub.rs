use std::collections::VecDeque;

use anyhow::Result;

use crate::detect::backend::DetectorBackend;
use crate::detect::result::{Detection, InferenceThresholds};
use crate::frame::FrameInfo;

/// Stub backend for testing. Replays queued detection lists, one per frame.
///
/// Once the queue is drained every further frame yields no detections.
/// Detections below the confidence threshold are filtered out, as a real
/// backend would.
#[derive(Default)]
pub struct StubBackend {
    script: VecDeque<Vec<Detection>>,
    thresholds: InferenceThresholds,
}

impl StubBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the detections returned for the next unscripted frame.
    pub fn push_frame(&mut self, detections: Vec<Detection>) {
        self.script.push_back(detections);
    }

    pub fn thresholds(&self) -> InferenceThresholds {
        self.thresholds
    }
}

impl DetectorBackend for StubBackend {
    fn name(&self) -> &'static str {
        "stub"
    }

    fn detect(&mut self, _pixels: &[u8], _frame: &FrameInfo) -> Result<Vec<Detection>> {
        let min_confidence = self.thresholds.confidence;
        Ok(self
            .script
            .pop_front()
            .unwrap_or_default()
            .into_iter()
            .filter(|det| det.confidence() >= min_confidence)
            .collect())
    }

    fn set_thresholds(&mut self, thresholds: InferenceThresholds) {
        self.thresholds = thresholds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    #[test]
    fn stub_backend_replays_script_then_goes_quiet() {
        let mut backend = StubBackend::new();
        let frame = FrameInfo::upright(640, 480);
        backend.push_frame(vec![
            Detection::new(0, "person", 0.9, BoundingBox::new(1.0, 2.0, 3.0, 4.0)),
            Detection::new(2, "car", 0.1, BoundingBox::new(5.0, 6.0, 7.0, 8.0)),
        ]);

        let first = backend.detect(&[], &frame).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].class_name(), "person");

        assert!(backend.detect(&[], &frame).unwrap().is_empty());
    }

    #[test]
    fn stub_backend_applies_confidence_threshold() {
        let mut backend = StubBackend::new();
        backend.set_thresholds(InferenceThresholds {
            confidence: 0.95,
            nms: 0.45,
        });
        backend.push_frame(vec![Detection::new(
            0,
            "person",
            0.9,
            BoundingBox::default(),
        )]);
        let out = backend.detect(&[], &FrameInfo::upright(1, 1)).unwrap();
        assert!(out.is_empty());
        assert_eq!(backend.thresholds().confidence, 0.95);
    }
}
