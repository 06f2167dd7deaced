//! Detection overlay layout.
//!
//! Per frame, detections are mapped from source-image space onto the
//! drawing surface, given a label rectangle and a fill color, ordered by box
//! area (largest first) and then run through greedy label overlap
//! resolution. The engine holds only immutable style and measurement
//! settings, so every call is independent of the previous one.
//!
//! Consumers draw all box outlines in render-list order first, then all
//! labels on top.

pub mod palette;
pub mod placement;
pub mod text;

use serde::Serialize;

use crate::detect::Detection;
use crate::geometry::{Rect, Size};
use crate::mapper::CoordinateMapper;

pub use palette::{color_for, Color, FALLBACK_PALETTE};
pub use placement::{resolve_overlaps, LabelStyle, Placement};
pub use text::{AdvanceMeasure, TextMeasure, TextStyle};

/// One drawable detection: box, label chip and color.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderItem {
    /// Position of the detection in the input list.
    pub index: usize,
    pub class_id: u32,
    pub class_name: String,
    pub confidence_text: String,
    pub box_rect: Rect,
    pub label_rect: Rect,
    pub color: Color,
    /// The label still intersects an earlier one.
    pub label_overlaps: bool,
}

/// Bookkeeping from a single layout pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LayoutReport {
    pub position_evaluations: usize,
    pub overlapping_labels: usize,
}

pub struct LabelLayoutEngine<M = AdvanceMeasure> {
    style: LabelStyle,
    measure: M,
}

impl Default for LabelLayoutEngine<AdvanceMeasure> {
    fn default() -> Self {
        Self::new(LabelStyle::default(), AdvanceMeasure::default())
    }
}

impl<M: TextMeasure> LabelLayoutEngine<M> {
    pub fn new(style: LabelStyle, measure: M) -> Self {
        Self { style, measure }
    }

    pub fn style(&self) -> &LabelStyle {
        &self.style
    }

    /// Lays out one frame's detections.
    ///
    /// Returns an empty list when the source has a zero dimension (no frame
    /// captured yet) or there is nothing to draw.
    pub fn layout(
        &self,
        detections: &[Detection],
        source_width: u32,
        source_height: u32,
        view_width: f32,
        view_height: f32,
    ) -> Vec<RenderItem> {
        self.layout_with_report(
            detections,
            source_width,
            source_height,
            Size::new(view_width, view_height),
        )
        .0
    }

    pub fn layout_with_report(
        &self,
        detections: &[Detection],
        source_width: u32,
        source_height: u32,
        view: Size,
    ) -> (Vec<RenderItem>, LayoutReport) {
        let Some(mapper) = CoordinateMapper::fit_center(source_width, source_height, view) else {
            log::debug!(
                "skipping layout for {}x{} source (frame not ready)",
                source_width,
                source_height
            );
            return (Vec::new(), LayoutReport::default());
        };
        if detections.is_empty() {
            return (Vec::new(), LayoutReport::default());
        }

        let mut items: Vec<RenderItem> = detections
            .iter()
            .enumerate()
            .map(|(index, det)| self.prepare(index, det, &mapper, view))
            .collect();

        // Stable: equal areas keep input order.
        items.sort_by(|a, b| b.box_rect.area().total_cmp(&a.box_rect.area()));

        let labels: Vec<(Rect, Rect)> = items
            .iter()
            .map(|item| (item.box_rect, item.label_rect))
            .collect();
        let placements = resolve_overlaps(&self.style, &labels);

        let mut report = LayoutReport::default();
        for (item, placement) in items.iter_mut().zip(placements) {
            item.label_rect = placement.rect;
            item.label_overlaps = placement.overlaps;
            report.position_evaluations += placement.evaluations;
            if placement.overlaps {
                report.overlapping_labels += 1;
            }
        }

        if report.overlapping_labels > 0 {
            log::debug!(
                "{} of {} labels still overlap after resolution",
                report.overlapping_labels,
                items.len()
            );
        }
        (items, report)
    }

    /// Maps the box and computes the preferred label rectangle and color.
    fn prepare(
        &self,
        index: usize,
        det: &Detection,
        mapper: &CoordinateMapper,
        view: Size,
    ) -> RenderItem {
        let box_rect = mapper.map_rect(det.bounding_box());
        let confidence_text = det.confidence_text();
        let label_width = self.style.label_width(
            self.measure.text_width(det.class_name(), TextStyle::ClassName),
            self.measure.text_width(&confidence_text, TextStyle::Confidence),
        );
        RenderItem {
            index,
            class_id: det.class_id(),
            class_name: det.class_name().to_string(),
            confidence_text,
            label_rect: self.style.default_rect(&box_rect, label_width, view),
            box_rect,
            color: color_for(det.class_name(), det.class_id()),
            label_overlaps: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoundingBox;

    fn engine() -> LabelLayoutEngine {
        LabelLayoutEngine::new(
            LabelStyle::default(),
            AdvanceMeasure {
                class_name_advance: 10.0,
                confidence_advance: 10.0,
            },
        )
    }

    #[test]
    fn zero_source_or_empty_input_yields_nothing() {
        let det = Detection::new(0, "person", 0.9, BoundingBox::new(0.0, 0.0, 10.0, 10.0));
        assert!(engine().layout(&[det], 0, 480, 1080.0, 1920.0).is_empty());
        assert!(engine().layout(&[], 640, 480, 1080.0, 1920.0).is_empty());
    }

    #[test]
    fn label_width_uses_both_segments() {
        // "dog" (3 chars) and "50%" (3 chars) at 10px per char.
        let det = Detection::new(16, "dog", 0.5, BoundingBox::new(100.0, 100.0, 50.0, 50.0));
        let items = engine().layout(&[det], 640, 480, 1080.0, 1920.0);
        assert_eq!(items[0].label_rect.width(), 15.0 + 30.0 + 15.0 + 30.0 + 15.0);
        assert_eq!(items[0].label_rect.height(), 44.0);
        assert_eq!(items[0].confidence_text, "50%");
        assert_eq!(items[0].color, Color::from_rgb_hex(0x8E44AD));
    }

    #[test]
    fn equal_areas_keep_input_order() {
        let dets = vec![
            Detection::new(0, "a", 0.5, BoundingBox::new(0.0, 200.0, 20.0, 20.0)),
            Detection::new(1, "b", 0.5, BoundingBox::new(300.0, 200.0, 20.0, 20.0)),
        ];
        let items = engine().layout(&dets, 640, 480, 640.0, 480.0);
        let order: Vec<usize> = items.iter().map(|item| item.index).collect();
        assert_eq!(order, vec![0, 1]);
    }

    #[test]
    fn report_counts_evaluations() {
        let bbox = BoundingBox::new(100.0, 100.0, 50.0, 50.0);
        let dets = vec![Detection::new(0, "person", 0.9, bbox); 3];
        let (items, report) =
            engine().layout_with_report(&dets, 640, 480, Size::new(1080.0, 1920.0));
        assert_eq!(items.len(), 3);
        // first: default; second: default, below; third: default, below, right
        assert_eq!(report.position_evaluations, 1 + 2 + 3);
        assert_eq!(report.overlapping_labels, 0);
    }
}
