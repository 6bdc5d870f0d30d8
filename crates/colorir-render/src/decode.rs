//! Decoding raster outline images.

use colorir_core::outline::ImageSource;

use crate::renderer::{RenderError, RenderResult};

/// A decoded image as straight RGBA8, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl DecodedImage {
    /// Decode PNG, JPEG or WebP bytes.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let decoded = image::load_from_memory(bytes).map_err(|e| RenderError::Decode(e.to_string()))?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        if width == 0 || height == 0 {
            return Err(RenderError::Decode("image has no pixels".to_string()));
        }
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Resolve and decode an outline's image reference.
    pub fn from_source(source: &ImageSource) -> RenderResult<Self> {
        let bytes = source.encoded_bytes()?;
        Self::decode(&bytes)
    }

    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::encode_png;

    #[test]
    fn test_decode_png() {
        let pixels = [255, 0, 0, 255, 0, 0, 255, 128];
        let png = encode_png(&pixels, 2, 1).unwrap();
        let image = DecodedImage::decode(&png).unwrap();
        assert_eq!((image.width, image.height), (2, 1));
        assert_eq!(image.rgba, pixels.to_vec());
        assert!((image.aspect_ratio() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            DecodedImage::decode(b"not an image"),
            Err(RenderError::Decode(_))
        ));
        assert!(matches!(
            DecodedImage::from_source(&ImageSource::DataUrl("nope".into())),
            Err(RenderError::Source(_))
        ));
    }
}
