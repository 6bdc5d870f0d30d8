//! Drawing outline documents onto a surface.

use colorir_core::fit::FitTransform;
use colorir_core::outline::{OutlineContent, OutlineDocument};
use colorir_core::svg::parse_outline;
use colorir_core::RasterSurface;

use crate::decode::DecodedImage;
use crate::renderer::{RenderError, RenderResult, Rasterizer, StrokeStyle};

/// Clear `surface` and draw `document` on it, fitted and centered.
///
/// Vector outlines are stroked with `style` in viewBox units. Malformed
/// markup draws nothing and is not an error. Returns the number of shapes
/// (or images) drawn.
pub fn render_outline<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    document: &OutlineDocument,
    surface: &mut RasterSurface,
    style: &StrokeStyle,
) -> RenderResult<usize> {
    if surface.is_empty() {
        return Err(RenderError::Surface(format!(
            "Cannot render {} onto an empty surface",
            document.id
        )));
    }
    surface.clear();

    match &document.content {
        OutlineContent::Vector(markup) => render_markup(rasterizer, markup, surface, style),
        OutlineContent::Raster(source) => {
            let image = DecodedImage::from_source(source).inspect_err(|e| {
                log::error!("Failed to load image for outline {}: {}", document.id, e);
            })?;
            let fit = FitTransform::fit(
                f64::from(image.width),
                f64::from(image.height),
                f64::from(surface.width()),
                f64::from(surface.height()),
            );
            rasterizer.draw_image(surface, &image, fit.to_affine())?;
            Ok(1)
        }
    }
}

fn render_markup<R: Rasterizer + ?Sized>(
    rasterizer: &mut R,
    markup: &str,
    surface: &mut RasterSurface,
    style: &StrokeStyle,
) -> RenderResult<usize> {
    let parsed = match parse_outline(markup) {
        Ok(parsed) => parsed,
        Err(e) => {
            log::debug!("Skipping malformed outline markup: {e}");
            return Ok(0);
        }
    };

    let transform = FitTransform::for_view_box(&parsed.view_box_or_default(), surface.width(), surface.height())
        .to_affine();

    let mut drawn = 0;
    for shape in &parsed.shapes {
        match shape.to_path() {
            Some(path) => {
                rasterizer.stroke_path(surface, &path, style, transform)?;
                drawn += 1;
            }
            None => log::debug!("Skipping unusable shape {shape:?}"),
        }
    }
    Ok(drawn)
}
