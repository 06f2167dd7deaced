//! Text measurement seam.
//!
//! Label widths depend on the host's font metrics. Hosts plug their text
//! backend in through [`TextMeasure`]; [`AdvanceMeasure`] is a fixed-advance
//! fallback used by the CLI and tests.

use serde::{Deserialize, Serialize};

/// Which segment of a label is being measured. The two segments are set in
/// different fonts (bold class name, lighter and smaller confidence).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextStyle {
    ClassName,
    Confidence,
}

pub trait TextMeasure {
    /// Rendered width of `text` in surface pixels.
    fn text_width(&self, text: &str, style: TextStyle) -> f32;
}

impl<F> TextMeasure for F
where
    F: Fn(&str, TextStyle) -> f32,
{
    fn text_width(&self, text: &str, style: TextStyle) -> f32 {
        self(text, style)
    }
}

/// Monospace approximation: every character advances by a fixed amount.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AdvanceMeasure {
    pub class_name_advance: f32,
    pub confidence_advance: f32,
}

impl Default for AdvanceMeasure {
    fn default() -> Self {
        Self {
            class_name_advance: 20.0,
            confidence_advance: 13.0,
        }
    }
}

impl TextMeasure for AdvanceMeasure {
    fn text_width(&self, text: &str, style: TextStyle) -> f32 {
        let advance = match style {
            TextStyle::ClassName => self.class_name_advance,
            TextStyle::Confidence => self.confidence_advance,
        };
        text.chars().count() as f32 * advance
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_measure_counts_chars_not_bytes() {
        let measure = AdvanceMeasure {
            class_name_advance: 10.0,
            confidence_advance: 5.0,
        };
        assert_eq!(measure.text_width("café", TextStyle::ClassName), 40.0);
        assert_eq!(measure.text_width("87%", TextStyle::Confidence), 15.0);
    }

    #[test]
    fn closures_measure_text() {
        let measure = |text: &str, _style: TextStyle| text.len() as f32 * 2.0;
        assert_eq!(measure.text_width("dog", TextStyle::ClassName), 6.0);
    }
}
