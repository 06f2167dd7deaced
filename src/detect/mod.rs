mod backend;
pub mod backends;
mod names;
mod registry;
mod result;

pub use backend::DetectorBackend;
pub use backends::{StubBackend, SyntheticBackend};
pub use names::{ClassNames, UNKNOWN_CLASS};
pub use registry::BackendRegistry;
pub use result::{Detection, InferenceThresholds};
