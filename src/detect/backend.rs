use anyhow::Result;

use crate::detect::result::{Detection, InferenceThresholds};
use crate::frame::FrameInfo;

/// Detector backend trait.
///
/// This is the seam to the neural-network collaborator. Implementations own
/// model loading and inference; the overlay core only consumes the returned
/// detections.
pub trait DetectorBackend: Send {
    /// Backend identifier.
    fn name(&self) -> &'static str;

    /// Run detection on an upright frame.
    ///
    /// Box coordinates are reported in the upright source space described by
    /// `frame.upright_size()`.
    fn detect(&mut self, pixels: &[u8], frame: &FrameInfo) -> Result<Vec<Detection>>;

    /// Update confidence / NMS thresholds for subsequent calls.
    fn set_thresholds(&mut self, thresholds: InferenceThresholds);

    /// Called by the registry before the backend becomes active.
    fn warm_up(&mut self) -> Result<()> {
        Ok(())
    }
}
