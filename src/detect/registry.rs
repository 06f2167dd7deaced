use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::detect::result::{Detection, InferenceThresholds};
use crate::frame::FrameInfo;

use super::backend::DetectorBackend;

/// Thread-safe registry of detector backends, one of which is active.
///
/// Backends are wrapped in `Mutex` because `DetectorBackend::detect` takes `&mut self`.
pub struct BackendRegistry {
    backends: HashMap<String, Arc<Mutex<dyn DetectorBackend>>>,
    active_name: Option<String>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
            active_name: None,
        }
    }

    /// Register a backend. The first registered backend becomes active and
    /// is warmed up.
    pub fn register<B: DetectorBackend + 'static>(&mut self, mut backend: B) -> Result<()> {
        let name = backend.name().to_string();
        if self.active_name.is_none() {
            backend.warm_up()?;
            self.active_name = Some(name.clone());
        }
        log::debug!("registered detector backend '{}'", name);
        self.backends.insert(name, Arc::new(Mutex::new(backend)));
        Ok(())
    }

    /// Switch the active backend by name, warming it up first.
    pub fn set_active(&mut self, name: &str) -> Result<()> {
        let backend = self
            .get(name)
            .ok_or_else(|| anyhow!("backend '{}' not registered", name))?;
        backend
            .lock()
            .map_err(|_| anyhow!("backend lock poisoned"))?
            .warm_up()?;
        self.active_name = Some(name.to_string());
        Ok(())
    }

    pub fn active_name(&self) -> Option<&str> {
        self.active_name.as_deref()
    }

    /// Get backend by name.
    pub fn get(&self, name: &str) -> Option<Arc<Mutex<dyn DetectorBackend>>> {
        self.backends.get(name).cloned()
    }

    /// Get the active backend.
    pub fn active(&self) -> Option<Arc<Mutex<dyn DetectorBackend>>> {
        self.active_name.as_ref().and_then(|name| self.get(name))
    }

    /// List registered backends, sorted by name.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.backends.keys().cloned().collect();
        names.sort();
        names
    }

    /// Push thresholds to every registered backend.
    pub fn set_thresholds(&self, thresholds: InferenceThresholds) -> Result<()> {
        for backend in self.backends.values() {
            backend
                .lock()
                .map_err(|_| anyhow!("backend lock poisoned"))?
                .set_thresholds(thresholds);
        }
        Ok(())
    }

    /// Run detection using the active backend.
    pub fn detect(&self, pixels: &[u8], frame: &FrameInfo) -> Result<Vec<Detection>> {
        let backend = self
            .active()
            .ok_or_else(|| anyhow!("no detector backend registered"))?;
        let mut guard = backend
            .lock()
            .map_err(|_| anyhow!("backend lock poisoned"))?;
        guard.detect(pixels, frame)
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
