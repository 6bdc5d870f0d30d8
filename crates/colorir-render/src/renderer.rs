//! Rasterizer trait abstraction.

use colorir_core::RasterSurface;
use colorir_core::color::Rgb;
use colorir_core::outline::ImageSourceError;
use kurbo::{Affine, BezPath};
use peniko::Color;
use thiserror::Error;

use crate::decode::DecodedImage;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("Invalid image reference: {0}")]
    Source(#[from] ImageSourceError),
    #[error("Image decode failed: {0}")]
    Decode(String),
    #[error("PNG encode failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RenderError>;

/// How a path is stroked. Always round caps and joins, anti-aliased.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    pub color: Color,
    /// Width in path units, scaled by the transform.
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: impl Into<Color>, width: f64) -> Self {
        Self {
            color: color.into(),
            width,
        }
    }

    /// Black outline stroke.
    pub fn outline(width: f64) -> Self {
        Self::new(Rgb::BLACK, width)
    }
}

/// Trait for rasterization backends.
///
/// Implementations draw directly into a [`RasterSurface`]'s premultiplied
/// pixels. The transform is per call; no drawing state survives a call.
pub trait Rasterizer {
    /// Stroke `path`, mapped through `transform`, onto `surface`.
    fn stroke_path(
        &mut self,
        surface: &mut RasterSurface,
        path: &BezPath,
        style: &StrokeStyle,
        transform: Affine,
    ) -> RenderResult<()>;

    /// Draw an image whose unit space is its pixel grid, mapped through
    /// `transform`, with bilinear filtering.
    fn draw_image(
        &mut self,
        surface: &mut RasterSurface,
        image: &DecodedImage,
        transform: Affine,
    ) -> RenderResult<()>;
}

impl<R: Rasterizer + ?Sized> Rasterizer for Box<R> {
    fn stroke_path(
        &mut self,
        surface: &mut RasterSurface,
        path: &BezPath,
        style: &StrokeStyle,
        transform: Affine,
    ) -> RenderResult<()> {
        (**self).stroke_path(surface, path, style, transform)
    }

    fn draw_image(
        &mut self,
        surface: &mut RasterSurface,
        image: &DecodedImage,
        transform: Affine,
    ) -> RenderResult<()> {
        (**self).draw_image(surface, image, transform)
    }
}
