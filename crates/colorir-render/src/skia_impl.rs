//! CPU rasterizer backed by tiny-skia.

use colorir_core::RasterSurface;
use kurbo::{Affine, BezPath, PathEl};
use tiny_skia::{
    ColorU8, FilterQuality, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapMut,
    PixmapPaint, Stroke, Transform,
};

use crate::decode::DecodedImage;
use crate::renderer::{RenderError, RenderResult, Rasterizer, StrokeStyle};

/// Draws straight into a surface's pixel buffer with tiny-skia.
#[derive(Debug, Default, Clone, Copy)]
pub struct SkiaRasterizer;

impl SkiaRasterizer {
    pub fn new() -> Self {
        Self
    }
}

impl Rasterizer for SkiaRasterizer {
    fn stroke_path(
        &mut self,
        surface: &mut RasterSurface,
        path: &BezPath,
        style: &StrokeStyle,
        transform: Affine,
    ) -> RenderResult<()> {
        let Some(path) = to_skia_path(path) else {
            return Ok(());
        };
        let mut pixmap = pixmap_for(surface)?;

        let rgba = style.color.to_rgba8();
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgba.r, rgba.g, rgba.b, rgba.a);
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width as f32,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..Default::default()
        };

        pixmap.stroke_path(&path, &paint, &stroke, to_skia_transform(transform), None);
        Ok(())
    }

    fn draw_image(
        &mut self,
        surface: &mut RasterSurface,
        image: &DecodedImage,
        transform: Affine,
    ) -> RenderResult<()> {
        let mut source = Pixmap::new(image.width, image.height)
            .ok_or_else(|| RenderError::Surface("Failed to create image pixmap".into()))?;
        for (dst, src) in source.pixels_mut().iter_mut().zip(image.rgba.chunks_exact(4)) {
            *dst = ColorU8::from_rgba(src[0], src[1], src[2], src[3]).premultiply();
        }

        let mut pixmap = pixmap_for(surface)?;
        let paint = PixmapPaint {
            quality: FilterQuality::Bilinear,
            ..Default::default()
        };
        pixmap.draw_pixmap(0, 0, source.as_ref(), &paint, to_skia_transform(transform), None);
        Ok(())
    }
}

fn pixmap_for(surface: &mut RasterSurface) -> RenderResult<PixmapMut<'_>> {
    let (width, height) = (surface.width(), surface.height());
    PixmapMut::from_bytes(surface.data_mut(), width, height)
        .ok_or_else(|| RenderError::Surface(format!("Cannot draw into a {width}x{height} surface")))
}

/// kurbo's `[a b c d e f]` and tiny-skia's row form share the same order.
fn to_skia_transform(affine: Affine) -> Transform {
    let [a, b, c, d, e, f] = affine.as_coeffs();
    Transform::from_row(a as f32, b as f32, c as f32, d as f32, e as f32, f as f32)
}

fn to_skia_path(path: &BezPath) -> Option<Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => pb.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => pb.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(p1, p2) => pb.quad_to(p1.x as f32, p1.y as f32, p2.x as f32, p2.y as f32),
            PathEl::CurveTo(p1, p2, p3) => pb.cubic_to(
                p1.x as f32,
                p1.y as f32,
                p2.x as f32,
                p2.y as f32,
                p3.x as f32,
                p3.y as f32,
            ),
            PathEl::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorir_core::color::Rgb;
    use kurbo::{Line, Rect, Shape};

    fn opaque(surface: &RasterSurface, x: u32, y: u32) -> bool {
        surface.pixel(x, y).is_some_and(|px| px[3] > 0)
    }

    #[test]
    fn test_stroke_line() {
        let mut surface = RasterSurface::new(20, 20);
        let path = Line::new((2.0, 10.0), (18.0, 10.0)).to_path(0.1);
        SkiaRasterizer
            .stroke_path(&mut surface, &path, &StrokeStyle::new(Rgb::new(0, 0, 255), 4.0), Affine::IDENTITY)
            .unwrap();
        assert_eq!(surface.pixel(10, 10), Some([0, 0, 255, 255]));
        assert!(!opaque(&surface, 10, 2));
    }

    #[test]
    fn test_transform_is_applied() {
        let mut surface = RasterSurface::new(40, 40);
        let path = Line::new((1.0, 1.0), (9.0, 1.0)).to_path(0.1);
        SkiaRasterizer
            .stroke_path(&mut surface, &path, &StrokeStyle::outline(1.0), Affine::scale(4.0))
            .unwrap();
        // Scaled 4x: a 4px wide line centered on y = 4, from x = 4 to 36.
        assert_eq!(surface.pixel(20, 4), Some([0, 0, 0, 255]));
        assert!(!opaque(&surface, 20, 20));
    }

    #[test]
    fn test_empty_path_is_noop() {
        let mut surface = RasterSurface::new(4, 4);
        let before = surface.clone();
        SkiaRasterizer
            .stroke_path(&mut surface, &BezPath::new(), &StrokeStyle::outline(2.0), Affine::IDENTITY)
            .unwrap();
        assert_eq!(surface, before);
    }

    #[test]
    fn test_empty_surface_is_error() {
        let mut surface = RasterSurface::new(0, 0);
        let path = Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1);
        assert!(
            SkiaRasterizer
                .stroke_path(&mut surface, &path, &StrokeStyle::outline(2.0), Affine::IDENTITY)
                .is_err()
        );
    }

    #[test]
    fn test_draw_image_scaled() {
        let image = DecodedImage {
            width: 2,
            height: 2,
            rgba: [[255, 0, 0, 255]; 4].concat(),
        };
        let mut surface = RasterSurface::new(10, 10);
        SkiaRasterizer
            .draw_image(&mut surface, &image, Affine::translate((2.0, 2.0)) * Affine::scale(3.0))
            .unwrap();
        assert_eq!(surface.pixel(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(9, 9), Some([0, 0, 0, 0]));
    }
}
