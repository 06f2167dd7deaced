use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::detect::InferenceThresholds;
use crate::layout::{AdvanceMeasure, LabelLayoutEngine, LabelStyle};

#[derive(Debug, Deserialize, Default)]
struct OverlayConfigFile {
    class_names: Option<PathBuf>,
    thresholds: Option<ThresholdsConfigFile>,
    label: Option<LabelConfigFile>,
    text: Option<TextConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct ThresholdsConfigFile {
    confidence: Option<f32>,
    nms: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct LabelConfigFile {
    left_padding: Option<f32>,
    right_padding: Option<f32>,
    text_spacing: Option<f32>,
    height: Option<f32>,
    gap: Option<f32>,
    margin: Option<f32>,
    inset: Option<f32>,
}

#[derive(Debug, Deserialize, Default)]
struct TextConfigFile {
    class_name_advance: Option<f32>,
    confidence_advance: Option<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub class_names: Option<PathBuf>,
    pub thresholds: InferenceThresholds,
    pub label: LabelStyle,
    pub text: AdvanceMeasure,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            class_names: None,
            thresholds: InferenceThresholds::default(),
            label: LabelStyle::default(),
            text: AdvanceMeasure::default(),
        }
    }
}

impl OverlayConfig {
    /// Loads from the file named by `OVERLAY_CONFIG` (if set), then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("OVERLAY_CONFIG").ok();
        Self::load_from(config_path.as_deref().map(Path::new))
    }

    /// Loads from an explicit file (if any), then applies environment overrides.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let file_cfg = match path {
            Some(path) => read_config_file(path)?,
            None => OverlayConfigFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_env()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: OverlayConfigFile) -> Self {
        let defaults = Self::default();
        let thresholds = file.thresholds.unwrap_or_default();
        let label = file.label.unwrap_or_default();
        let text = file.text.unwrap_or_default();
        Self {
            class_names: file.class_names,
            thresholds: InferenceThresholds {
                confidence: thresholds
                    .confidence
                    .unwrap_or(defaults.thresholds.confidence),
                nms: thresholds.nms.unwrap_or(defaults.thresholds.nms),
            },
            label: LabelStyle {
                left_padding: label.left_padding.unwrap_or(defaults.label.left_padding),
                right_padding: label.right_padding.unwrap_or(defaults.label.right_padding),
                text_spacing: label.text_spacing.unwrap_or(defaults.label.text_spacing),
                height: label.height.unwrap_or(defaults.label.height),
                gap: label.gap.unwrap_or(defaults.label.gap),
                margin: label.margin.unwrap_or(defaults.label.margin),
                inset: label.inset.unwrap_or(defaults.label.inset),
            },
            text: AdvanceMeasure {
                class_name_advance: text
                    .class_name_advance
                    .unwrap_or(defaults.text.class_name_advance),
                confidence_advance: text
                    .confidence_advance
                    .unwrap_or(defaults.text.confidence_advance),
            },
        }
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var("OVERLAY_CONFIDENCE_THRESHOLD") {
            self.thresholds.confidence = parse_f32("OVERLAY_CONFIDENCE_THRESHOLD", &value)?;
        }
        if let Ok(value) = std::env::var("OVERLAY_NMS_THRESHOLD") {
            self.thresholds.nms = parse_f32("OVERLAY_NMS_THRESHOLD", &value)?;
        }
        if let Ok(path) = std::env::var("OVERLAY_CLASS_NAMES") {
            if !path.trim().is_empty() {
                self.class_names = Some(PathBuf::from(path));
            }
        }
        if let Ok(value) = std::env::var("OVERLAY_LABEL_HEIGHT") {
            self.label.height = parse_f32("OVERLAY_LABEL_HEIGHT", &value)?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("thresholds.confidence", self.thresholds.confidence),
            ("thresholds.nms", self.thresholds.nms),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(anyhow!("{} must be within [0, 1], got {}", name, value));
            }
        }
        for (name, value) in [
            ("label.left_padding", self.label.left_padding),
            ("label.right_padding", self.label.right_padding),
            ("label.text_spacing", self.label.text_spacing),
            ("label.height", self.label.height),
            ("label.gap", self.label.gap),
            ("label.margin", self.label.margin),
            ("label.inset", self.label.inset),
            ("text.class_name_advance", self.text.class_name_advance),
            ("text.confidence_advance", self.text.confidence_advance),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(anyhow!(
                    "{} must be a non-negative number, got {}",
                    name,
                    value
                ));
            }
        }
        Ok(())
    }

    /// Layout engine using the configured label style and text advances.
    pub fn engine(&self) -> LabelLayoutEngine<AdvanceMeasure> {
        LabelLayoutEngine::new(self.label, self.text)
    }
}

fn read_config_file(path: &Path) -> Result<OverlayConfigFile> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| anyhow!("failed to read config file {}: {}", path.display(), e))?;
    let is_toml = path.extension().and_then(|ext| ext.to_str()) == Some("toml");
    let cfg: OverlayConfigFile = if is_toml {
        toml::from_str(&raw)
            .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    } else {
        serde_json::from_str(&raw)
            .map_err(|e| anyhow!("invalid config file {}: {}", path.display(), e))?
    };
    Ok(cfg)
}

fn parse_f32(name: &str, value: &str) -> Result<f32> {
    value
        .trim()
        .parse()
        .map_err(|_| anyhow!("{} must be a number, got '{}'", name, value))
}
