//! Label and box colors.
//!
//! Well-known classes get a curated color; everything else indexes a small
//! fallback palette by class id, so a class keeps its color across frames.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Opaque color from `0xRRGGBB`.
    pub const fn from_rgb_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
            a: 0xff,
        }
    }

    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

const CATEGORY_COLORS: [(&str, Color); 15] = [
    ("person", Color::from_rgb_hex(0x5B9FED)),
    ("bicycle", Color::from_rgb_hex(0x4ECDC4)),
    ("car", Color::from_rgb_hex(0xFFB74D)),
    ("motorcycle", Color::from_rgb_hex(0xFF6B6B)),
    ("airplane", Color::from_rgb_hex(0x9B59B6)),
    ("bus", Color::from_rgb_hex(0xF39C12)),
    ("train", Color::from_rgb_hex(0xE74C3C)),
    ("truck", Color::from_rgb_hex(0x16A085)),
    ("boat", Color::from_rgb_hex(0x3498DB)),
    ("traffic light", Color::from_rgb_hex(0xE67E22)),
    ("stop sign", Color::from_rgb_hex(0xC0392B)),
    ("cat", Color::from_rgb_hex(0xF1C40F)),
    ("dog", Color::from_rgb_hex(0x8E44AD)),
    ("horse", Color::from_rgb_hex(0xD35400)),
    ("bird", Color::from_rgb_hex(0x27AE60)),
];

/// Fallback palette, indexed by `class_id % len`.
pub const FALLBACK_PALETTE: [Color; 10] = [
    Color::from_rgb_hex(0xFF6B6B), // soft red
    Color::from_rgb_hex(0x4ECDC4), // turquoise
    Color::from_rgb_hex(0x45B7D1), // sky blue
    Color::from_rgb_hex(0xF7DC6F), // soft yellow
    Color::from_rgb_hex(0xBB8FCE), // soft purple
    Color::from_rgb_hex(0x85C1E2), // light blue
    Color::from_rgb_hex(0xF8B500), // orange
    Color::from_rgb_hex(0x95E1D3), // mint
    Color::from_rgb_hex(0xF38181), // coral
    Color::from_rgb_hex(0xAA96DA), // lavender
];

fn category_colors() -> &'static HashMap<&'static str, Color> {
    static COLORS: OnceLock<HashMap<&'static str, Color>> = OnceLock::new();
    COLORS.get_or_init(|| CATEGORY_COLORS.into_iter().collect())
}

/// Curated color for a known class name, if any.
pub fn category_color(class_name: &str) -> Option<Color> {
    category_colors().get(class_name).copied()
}

pub fn fallback_color(class_id: u32) -> Color {
    FALLBACK_PALETTE[class_id as usize % FALLBACK_PALETTE.len()]
}

/// Fill color for a detection. Name lookup is exact and case-sensitive.
pub fn color_for(class_name: &str, class_id: u32) -> Color {
    category_color(class_name).unwrap_or_else(|| fallback_color(class_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_classes_ignore_class_id() {
        let person = Color::from_rgb_hex(0x5B9FED);
        assert_eq!(color_for("person", 0), person);
        assert_eq!(color_for("person", 57), person);
    }

    #[test]
    fn unknown_classes_wrap_around_palette() {
        assert_eq!(color_for("toaster", 3), FALLBACK_PALETTE[3]);
        assert_eq!(color_for("toaster", 13), FALLBACK_PALETTE[3]);
        assert_eq!(color_for("sofa", 3), color_for("toaster", 23));
        assert_ne!(color_for("toaster", 3), color_for("toaster", 4));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(color_for("Person", 1), FALLBACK_PALETTE[1]);
    }

    #[test]
    fn hex_unpacks_channels() {
        assert_eq!(Color::from_rgb_hex(0x123456).to_rgba(), [0x12, 0x34, 0x56, 0xff]);
    }
}
