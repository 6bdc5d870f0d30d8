//! Fitting content into a surface while keeping its aspect ratio.

use crate::svg::ViewBox;
use kurbo::{Affine, Rect, Vec2};

/// Share of each surface dimension the fitted content may occupy.
pub const FIT_MARGIN_RATIO: f64 = 0.9;

/// Scale and offset placing content centered on a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitTransform {
    /// Uniform scale from content units to device pixels.
    pub scale: f64,
    /// Horizontal offset in device pixels.
    pub offset_x: f64,
    /// Vertical offset in device pixels.
    pub offset_y: f64,
    /// Width of the fitted content in device pixels.
    pub target_width: f64,
    /// Height of the fitted content in device pixels.
    pub target_height: f64,
}

impl FitTransform {
    /// Fit content of `content_width` x `content_height` into a surface.
    ///
    /// Width is fitted first; if the resulting height exceeds the height
    /// budget the fit is recomputed from the height instead, so wide content
    /// is shrunk rather than cropped.
    pub fn fit(content_width: f64, content_height: f64, surface_width: f64, surface_height: f64) -> Self {
        let ratio = content_width / content_height;

        let mut target_width = surface_width * FIT_MARGIN_RATIO;
        let mut target_height = target_width / ratio;
        if target_height > surface_height * FIT_MARGIN_RATIO {
            target_height = surface_height * FIT_MARGIN_RATIO;
            target_width = target_height * ratio;
        }

        Self {
            scale: target_width / content_width,
            offset_x: (surface_width - target_width) / 2.0,
            offset_y: (surface_height - target_height) / 2.0,
            target_width,
            target_height,
        }
    }

    /// Fit a viewBox into a surface of the given pixel size.
    pub fn for_view_box(view_box: &ViewBox, surface_width: u32, surface_height: u32) -> Self {
        Self::fit(
            view_box.width,
            view_box.height,
            f64::from(surface_width),
            f64::from(surface_height),
        )
    }

    /// Affine mapping `(x, y)` to `(offset_x + x * scale, offset_y + y * scale)`.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(Vec2::new(self.offset_x, self.offset_y)) * Affine::scale(self.scale)
    }

    /// The device-space rectangle the fitted content occupies.
    pub fn target_rect(&self) -> Rect {
        Rect::new(
            self.offset_x,
            self.offset_y,
            self.offset_x + self.target_width,
            self.offset_y + self.target_height,
        )
    }
}
