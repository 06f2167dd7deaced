use std::path::Path;

use anyhow::{anyhow, Result};

use crate::detect::result::Detection;
use crate::geometry::BoundingBox;

/// Label used when a class id falls outside the loaded table.
pub const UNKNOWN_CLASS: &str = "Unknown";

/// Ordered class-name table for the active model.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassNames {
    names: Vec<String>,
}

impl ClassNames {
    pub fn new(names: Vec<String>) -> Self {
        Self { names }
    }

    /// Reads a newline-separated names file. Empty lines are skipped.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow!("failed to read class names {}: {}", path.display(), e))?;
        let names = Self::parse(&raw);
        if names.is_empty() {
            return Err(anyhow!("class names file {} is empty", path.display()));
        }
        log::info!("loaded {} class names from {}", names.len(), path.display());
        Ok(names)
    }

    pub fn parse(raw: &str) -> Self {
        let names = raw
            .lines()
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.is_empty())
            .map(|line| line.to_string())
            .collect();
        Self { names }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Name for `class_id`, or [`UNKNOWN_CLASS`] when out of range.
    pub fn resolve(&self, class_id: u32) -> &str {
        self.names
            .get(class_id as usize)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_CLASS)
    }

    /// Builds a detection with its class name looked up in this table.
    pub fn detection(
        &self,
        class_id: u32,
        confidence: f32,
        bounding_box: BoundingBox,
    ) -> Detection {
        Detection::new(class_id, self.resolve(class_id), confidence, bounding_box)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_blank_lines_and_carriage_returns() {
        let names = ClassNames::parse("person\r\nbicycle\n\ncar\n");
        assert_eq!(names.len(), 3);
        assert_eq!(names.resolve(0), "person");
        assert_eq!(names.resolve(1), "bicycle");
        assert_eq!(names.resolve(2), "car");
    }

    #[test]
    fn out_of_range_id_resolves_to_unknown() {
        let names = ClassNames::parse("person\n");
        assert_eq!(names.resolve(1), UNKNOWN_CLASS);
        assert_eq!(ClassNames::default().resolve(0), UNKNOWN_CLASS);

        let det = names.detection(7, 0.9, BoundingBox::default());
        assert_eq!(det.class_name(), UNKNOWN_CLASS);
        assert_eq!(det.class_id(), 7);
    }

    #[test]
    fn load_rejects_empty_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "\n\n").unwrap();
        assert!(ClassNames::load(file.path()).is_err());
    }
}
