pub mod stub;
pub mod synthetic;

pub use stub::StubBackend;
pub use synthetic::SyntheticBackend;
