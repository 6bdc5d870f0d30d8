//! Colorir Render Library
//!
//! Rasterizer abstraction and implementations for Colorir.
//! The default implementation uses tiny-skia for CPU rasterization.

mod decode;
mod export;
mod outline;
mod renderer;

#[cfg(feature = "skia-renderer")]
mod skia_impl;

pub use decode::DecodedImage;
pub use export::{DEFAULT_EXPORT_NAME, encode_png, export_png};
pub use outline::render_outline;
pub use renderer::{Rasterizer, RenderError, RenderResult, StrokeStyle};

#[cfg(feature = "skia-renderer")]
pub use skia_impl::SkiaRasterizer;
