//! Per-frame glue: detect, then map and lay out the results.

use std::time::{Duration, Instant};

use anyhow::Result;

use crate::detect::BackendRegistry;
use crate::frame::FrameInfo;
use crate::geometry::Size;
use crate::layout::{AdvanceMeasure, LabelLayoutEngine, LayoutReport, RenderItem, TextMeasure};
use crate::stats::FrameStats;

/// Overlay produced for one frame.
#[derive(Clone, Debug)]
pub struct FrameOverlay {
    pub items: Vec<RenderItem>,
    pub report: LayoutReport,
    pub inference: Duration,
    /// Upright source dimensions the boxes were mapped from.
    pub source: (u32, u32),
}

pub struct OverlayPipeline<M = AdvanceMeasure> {
    registry: BackendRegistry,
    engine: LabelLayoutEngine<M>,
    stats: FrameStats,
}

impl<M: TextMeasure> OverlayPipeline<M> {
    pub fn new(registry: BackendRegistry, engine: LabelLayoutEngine<M>) -> Self {
        Self {
            registry,
            engine,
            stats: FrameStats::new(),
        }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BackendRegistry {
        &mut self.registry
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    /// Runs one frame through the active backend and the layout engine.
    ///
    /// Returns `Ok(None)` when the frame has a zero dimension; nothing is
    /// detected or drawn for it.
    pub fn process(
        &mut self,
        pixels: &[u8],
        frame: &FrameInfo,
        view: Size,
    ) -> Result<Option<FrameOverlay>> {
        if !frame.is_ready() {
            log::debug!("frame {}x{} not ready, skipping", frame.width, frame.height);
            return Ok(None);
        }

        let started = Instant::now();
        let detections = self.registry.detect(pixels, frame)?;
        let inference = started.elapsed();

        let (width, height) = frame.upright_dimensions();
        let (items, report) = self
            .engine
            .layout_with_report(&detections, width, height, view);
        self.stats.record(inference, items.len());

        log::debug!(
            "frame {}x{} (rotation {}): {} detections, {} position evaluations",
            width,
            height,
            frame.rotation.degrees(),
            items.len(),
            report.position_evaluations
        );

        Ok(Some(FrameOverlay {
            items,
            report,
            inference,
            source: (width, height),
        }))
    }
}
