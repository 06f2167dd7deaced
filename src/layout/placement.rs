//! Label placement and greedy overlap resolution.

use serde::{Deserialize, Serialize};

use crate::geometry::{Rect, Size};

/// Fixed label geometry, in surface pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelStyle {
    pub left_padding: f32,
    pub right_padding: f32,
    /// Space between the class name and the confidence text.
    pub text_spacing: f32,
    pub height: f32,
    /// Distance between a label and the box edge it is attached to.
    pub gap: f32,
    /// Minimum distance between a clamped label and the viewport edge.
    pub margin: f32,
    /// Offset used when a label is tucked inside its box.
    pub inset: f32,
}

impl Default for LabelStyle {
    fn default() -> Self {
        Self {
            left_padding: 15.0,
            right_padding: 15.0,
            text_spacing: 15.0,
            height: 44.0,
            gap: 4.0,
            margin: 4.0,
            inset: 4.0,
        }
    }
}

impl LabelStyle {
    pub fn label_width(&self, class_name_width: f32, confidence_width: f32) -> f32 {
        self.left_padding
            + class_name_width
            + self.text_spacing
            + confidence_width
            + self.right_padding
    }

    /// Preferred label rectangle for a box, clamped into the viewport.
    ///
    /// The label sits above the box, left-aligned with it. It is shifted
    /// left when it would run past the right edge, pinned to the left margin
    /// when that is not enough, and moved inside the top of the box when
    /// there is no room above. The label is never resized.
    pub fn default_rect(&self, box_rect: &Rect, label_width: f32, view: Size) -> Rect {
        let mut left = box_rect.left;
        let mut top = box_rect.top - self.height - self.gap;

        if left + label_width > view.width {
            left = view.width - label_width - self.margin;
        }
        if left < self.margin {
            left = self.margin;
        }
        if top < self.margin {
            top = box_rect.top + self.inset;
        }

        Rect::from_origin(left, top, label_width, self.height)
    }

    /// Alternative positions tried, in order, when the preferred one collides.
    ///
    /// Candidates are not clamped to the viewport.
    pub fn candidates(&self, box_rect: &Rect, label: &Rect) -> [Rect; 4] {
        let width = label.width();
        [
            // below the box
            label.moved_to(box_rect.left, box_rect.bottom + self.gap),
            // right of the box
            label.moved_to(box_rect.right + self.gap, box_rect.top),
            // left of the box
            label.moved_to(box_rect.left - width - self.gap, box_rect.top),
            // inside the top-right corner
            label.moved_to(box_rect.right - width - self.gap, box_rect.top + self.inset),
        ]
    }
}

/// Where one label ended up after overlap resolution.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub rect: Rect,
    /// Still intersects an earlier label after every candidate was tried.
    pub overlaps: bool,
    /// Number of positions tested, including the preferred one.
    pub evaluations: usize,
}

/// Places labels greedily in the given order.
///
/// Each label keeps its preferred rectangle unless it intersects a label
/// placed earlier, in which case the candidates are tried in turn. If all
/// of them collide the last candidate is kept anyway. Every input yields
/// exactly one placement.
pub fn resolve_overlaps(style: &LabelStyle, labels: &[(Rect, Rect)]) -> Vec<Placement> {
    let mut placed: Vec<Rect> = Vec::with_capacity(labels.len());
    let mut out = Vec::with_capacity(labels.len());

    for (box_rect, preferred) in labels {
        let mut rect = *preferred;
        let mut evaluations = 1;
        let mut overlaps = collides(&rect, &placed);

        if overlaps {
            for candidate in style.candidates(box_rect, preferred) {
                rect = candidate;
                evaluations += 1;
                overlaps = collides(&rect, &placed);
                if !overlaps {
                    break;
                }
            }
        }

        placed.push(rect);
        out.push(Placement {
            rect,
            overlaps,
            evaluations,
        });
    }

    out
}

fn collides(rect: &Rect, placed: &[Rect]) -> bool {
    placed.iter().any(|other| rect.intersects(other))
}
