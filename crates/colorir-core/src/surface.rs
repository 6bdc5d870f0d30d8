//! The raster surface children draw and fill on.
//!
//! Pixels are stored as premultiplied RGBA8, row-major, which is the layout
//! rasterizers draw into directly. Accessors that hand colors to callers
//! convert to straight (unpremultiplied) RGBA. Fully opaque and fully
//! transparent pixels are identical in both forms.

use serde::{Deserialize, Serialize};

/// A straight-alpha RGBA8 pixel.
pub type Rgba = [u8; 4];

/// Mutable pixel grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterSurface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

/// A full copy of a surface's pixels, used for shape previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceSnapshot {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl SurfaceSnapshot {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

impl RasterSurface {
    /// Create a fully transparent surface.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; buffer_len(width, height)],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether the surface has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Resize the surface. Resizing always clears it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.data.clear();
        self.data.resize(buffer_len(width, height), 0);
    }

    /// Reset every pixel to transparent.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Whether `(x, y)` lies on the surface.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Straight RGBA of the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = self.offset(x, y);
        Some(demultiply([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    /// Overwrite the pixel at `(x, y)` with a straight RGBA color.
    /// Returns `false` outside the surface.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgba) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let i = self.offset(x, y);
        self.data[i..i + 4].copy_from_slice(&premultiply(color));
        true
    }

    /// Raw premultiplied bytes.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Raw premultiplied bytes, for rasterizers drawing in place.
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Copy out the whole surface as straight RGBA bytes.
    pub fn to_rgba8(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            out.extend_from_slice(&demultiply([px[0], px[1], px[2], px[3]]));
        }
        out
    }

    /// Replace the whole surface with straight RGBA bytes.
    ///
    /// The buffer must hold exactly `width * height * 4` bytes; otherwise the
    /// surface is left untouched and `false` is returned.
    pub fn write_rgba8(&mut self, rgba: &[u8]) -> bool {
        if rgba.len() != self.data.len() {
            return false;
        }
        for (dst, src) in self.data.chunks_exact_mut(4).zip(rgba.chunks_exact(4)) {
            dst.copy_from_slice(&premultiply([src[0], src[1], src[2], src[3]]));
        }
        true
    }

    /// Copy the current pixels.
    pub fn snapshot(&self) -> SurfaceSnapshot {
        SurfaceSnapshot {
            width: self.width,
            height: self.height,
            data: self.data.clone(),
        }
    }

    /// Put back pixels from a snapshot of the same size.
    /// Returns `false` (and changes nothing) if the sizes differ.
    pub fn restore(&mut self, snapshot: &SurfaceSnapshot) -> bool {
        if snapshot.width != self.width || snapshot.height != self.height {
            log::warn!(
                "Ignoring {}x{} snapshot for {}x{} surface",
                snapshot.width,
                snapshot.height,
                self.width,
                self.height
            );
            return false;
        }
        self.data.copy_from_slice(&snapshot.data);
        true
    }

    fn offset(&self, x: u32, y: u32) -> usize {
        (y as usize * self.width as usize + x as usize) * 4
    }
}

fn buffer_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * 4
}

/// Convert a straight RGBA color to premultiplied form.
pub fn premultiply([r, g, b, a]: Rgba) -> Rgba {
    if a == 255 {
        return [r, g, b, a];
    }
    let mul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
    [mul(r), mul(g), mul(b), a]
}

/// Convert a premultiplied RGBA color to straight form.
pub fn demultiply([r, g, b, a]: Rgba) -> Rgba {
    match a {
        0 => [0, 0, 0, 0],
        255 => [r, g, b, a],
        _ => {
            let div = |c: u8| ((u32::from(c) * 255 + u32::from(a) / 2) / u32::from(a)).min(255) as u8;
            [div(r), div(g), div(b), a]
        }
    }
}
