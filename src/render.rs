//! Rasterizes a render list onto an RGBA image.
//!
//! Box outlines are drawn first in render-list order, then every label chip
//! on top, so labels are never hidden by another detection's outline. Text
//! glyphs are left to the host's text backend.

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect as PixelRect;

use crate::geometry::Rect;
use crate::layout::{Color, RenderItem};

pub fn draw_render_list(image: &mut RgbaImage, items: &[RenderItem], stroke: u32) {
    for item in items {
        stroke_rect(image, &item.box_rect, item.color, stroke);
    }
    for item in items {
        fill_rect(image, &item.label_rect, item.color);
    }
}

/// Smallest pixel rectangle covering `rect`, or `None` if it covers no pixel.
fn pixel_rect(rect: &Rect) -> Option<PixelRect> {
    if !rect.is_finite() {
        return None;
    }
    let left = rect.left.floor();
    let top = rect.top.floor();
    let width = rect.right.ceil() - left;
    let height = rect.bottom.ceil() - top;
    if width < 1.0 || height < 1.0 {
        return None;
    }
    Some(PixelRect::at(left as i32, top as i32).of_size(width as u32, height as u32))
}

/// Fills `rect`; parts outside the image are clipped.
pub fn fill_rect(image: &mut RgbaImage, rect: &Rect, color: Color) {
    if let Some(rect) = pixel_rect(rect) {
        draw_filled_rect_mut(image, rect, Rgba(color.to_rgba()));
    }
}

/// Outlines `rect` with edges `thickness` pixels wide, growing inward.
pub fn stroke_rect(image: &mut RgbaImage, rect: &Rect, color: Color, thickness: u32) {
    let Some(outer) = pixel_rect(rect) else {
        return;
    };
    let px = Rgba(color.to_rgba());
    for inset in 0..thickness.max(1) {
        let (Some(width), Some(height)) = (
            outer.width().checked_sub(2 * inset),
            outer.height().checked_sub(2 * inset),
        ) else {
            break;
        };
        if width == 0 || height == 0 {
            break;
        }
        let ring = PixelRect::at(outer.left() + inset as i32, outer.top() + inset as i32)
            .of_size(width, height);
        draw_hollow_rect_mut(image, ring, px);
    }
}
