//! PNG export of the drawing.

use colorir_core::RasterSurface;

use crate::renderer::{RenderError, RenderResult};

/// File name offered when saving a drawing.
pub const DEFAULT_EXPORT_NAME: &str = "meu-desenho.png";

/// Encode straight RGBA8 pixels as a PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder.write_header().map_err(|e| {
            log::error!("Failed to write PNG header: {:?}", e);
            RenderError::Encode(e.to_string())
        })?;

        writer.write_image_data(rgba_data).map_err(|e| {
            log::error!("Failed to write PNG data: {:?}", e);
            RenderError::Encode(e.to_string())
        })?;
    }

    Ok(png_data)
}

/// Encode the whole surface as a PNG.
pub fn export_png(surface: &RasterSurface) -> RenderResult<Vec<u8>> {
    if surface.is_empty() {
        return Err(RenderError::Surface("cannot export an empty surface".to_string()));
    }
    encode_png(&surface.to_rgba8(), surface.width(), surface.height())
}
