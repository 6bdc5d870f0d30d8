//! Flood fill over a raster surface.

use crate::color::Rgb;
use crate::surface::RasterSurface;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fill errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("Seed ({x}, {y}) is outside the {width}x{height} surface")]
    SeedOutOfBounds {
        x: i64,
        y: i64,
        width: u32,
        height: u32,
    },
}

/// Which neighbours a filled pixel spreads to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Connectivity {
    /// Left, right, up, down.
    #[default]
    Four,
    /// The four edge neighbours plus the diagonals.
    Eight,
}

impl Connectivity {
    const FOUR: [(i64, i64); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
    const EIGHT: [(i64, i64); 8] = [
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
    ];

    fn offsets(self) -> &'static [(i64, i64)] {
        match self {
            Connectivity::Four => &Self::FOUR,
            Connectivity::Eight => &Self::EIGHT,
        }
    }
}

/// How similar a pixel must be to the seed to be filled, and how the fill
/// spreads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillPolicy {
    /// Maximum absolute difference allowed on each of R, G, B and A.
    pub tolerance: u8,
    pub connectivity: Connectivity,
}

impl FillPolicy {
    /// Tight matching, edge neighbours only.
    pub const STRICT: FillPolicy = FillPolicy {
        tolerance: 10,
        connectivity: Connectivity::Four,
    };

    /// Looser matching that also crosses diagonals, closing thin
    /// anti-aliased rims at the cost of leaking through one-pixel diagonal
    /// gaps.
    pub const LENIENT: FillPolicy = FillPolicy {
        tolerance: 25,
        connectivity: Connectivity::Eight,
    };

    fn matches(&self, candidate: &[u8], seed: &[u8; 4]) -> bool {
        candidate
            .iter()
            .zip(seed)
            .all(|(c, s)| c.abs_diff(*s) <= self.tolerance)
    }
}

impl Default for FillPolicy {
    fn default() -> Self {
        Self::STRICT
    }
}

/// What a fill did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FillOutcome {
    /// Number of pixels recolored.
    pub filled: usize,
}

impl FillOutcome {
    pub fn is_noop(&self) -> bool {
        self.filled == 0
    }
}

/// Fill the region connected to `(seed_x, seed_y)` with `color`.
///
/// Pixels whose RGBA is within `policy.tolerance` of the seed on every
/// channel, and reachable from it through such pixels, become `color` at full
/// opacity. If the seed's RGB already equals `color` nothing happens. The
/// work happens on a straight-alpha copy which is written back in one batch.
pub fn flood_fill(
    surface: &mut RasterSurface,
    seed_x: i64,
    seed_y: i64,
    color: Rgb,
    policy: FillPolicy,
) -> Result<FillOutcome, FillError> {
    if !surface.contains(seed_x, seed_y) {
        return Err(FillError::SeedOutOfBounds {
            x: seed_x,
            y: seed_y,
            width: surface.width(),
            height: surface.height(),
        });
    }

    let width = i64::from(surface.width());
    let height = i64::from(surface.height());
    let index = |x: i64, y: i64| (y * width + x) as usize;

    let mut pixels = surface.to_rgba8();
    let seed_at = index(seed_x, seed_y) * 4;
    let seed: [u8; 4] = [
        pixels[seed_at],
        pixels[seed_at + 1],
        pixels[seed_at + 2],
        pixels[seed_at + 3],
    ];
    if seed[..3] == [color.r, color.g, color.b] {
        log::debug!("Fill at ({seed_x}, {seed_y}) is a no-op: seed already {color}");
        return Ok(FillOutcome { filled: 0 });
    }

    let fill = color.to_rgba();
    let mut visited = vec![false; (width * height) as usize];
    let mut stack = vec![(seed_x, seed_y)];
    let mut filled = 0;

    while let Some((x, y)) = stack.pop() {
        if x < 0 || y < 0 || x >= width || y >= height {
            continue;
        }
        let i = index(x, y);
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let px = &mut pixels[i * 4..i * 4 + 4];
        if !policy.matches(px, &seed) {
            continue;
        }
        px.copy_from_slice(&fill);
        filled += 1;

        for (dx, dy) in policy.connectivity.offsets() {
            stack.push((x + dx, y + dy));
        }
    }

    surface.write_rgba8(&pixels);
    log::debug!("Filled {filled} pixels from ({seed_x}, {seed_y}) with {color}");
    Ok(FillOutcome { filled })
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLACK: [u8; 4] = [0, 0, 0, 255];

    /// Surface with an opaque black square ring of side `side` at `(x0, y0)`.
    fn ring(width: u32, height: u32, x0: u32, y0: u32, side: u32) -> RasterSurface {
        let mut surface = RasterSurface::new(width, height);
        for i in 0..side {
            surface.set_pixel(x0 + i, y0, BLACK);
            surface.set_pixel(x0 + i, y0 + side - 1, BLACK);
            surface.set_pixel(x0, y0 + i, BLACK);
            surface.set_pixel(x0 + side - 1, y0 + i, BLACK);
        }
        surface
    }

    #[test]
    fn test_fill_blank_surface() {
        let mut surface = RasterSurface::new(10, 10);
        let outcome = flood_fill(&mut surface, 5, 5, RED, FillPolicy::STRICT).unwrap();
        assert_eq!(outcome.filled, 100);
        for y in 0..10 {
            for x in 0..10 {
                assert_eq!(surface.pixel(x, y), Some([255, 0, 0, 255]));
            }
        }
    }

    #[test]
    fn test_fill_stays_inside_ring() {
        let mut surface = ring(12, 12, 2, 2, 6);
        let outcome = flood_fill(&mut surface, 4, 4, RED, FillPolicy::STRICT).unwrap();
        assert_eq!(outcome.filled, 16);
        assert_eq!(surface.pixel(4, 4), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 2), Some(BLACK));
        assert_eq!(surface.pixel(0, 0), Some([0, 0, 0, 0]));
        assert_eq!(surface.pixel(11, 11), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_fill_is_idempotent() {
        let mut surface = ring(12, 12, 2, 2, 6);
        flood_fill(&mut surface, 4, 4, RED, FillPolicy::STRICT).unwrap();
        let once = surface.clone();
        let outcome = flood_fill(&mut surface, 4, 4, RED, FillPolicy::STRICT).unwrap();
        assert!(outcome.is_noop());
        assert_eq!(surface, once);
    }

    #[test]
    fn test_single_pixel_region() {
        let mut surface = ring(3, 3, 0, 0, 3);
        let outcome = flood_fill(&mut surface, 1, 1, RED, FillPolicy::STRICT).unwrap();
        assert_eq!(outcome.filled, 1);
        assert_eq!(surface.pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_tolerance_bounds_match() {
        let mut surface = RasterSurface::new(3, 1);
        surface.set_pixel(0, 0, [100, 100, 100, 255]);
        surface.set_pixel(1, 0, [110, 90, 100, 255]);
        surface.set_pixel(2, 0, [111, 100, 100, 255]);
        let outcome = flood_fill(&mut surface, 0, 0, RED, FillPolicy::STRICT).unwrap();
        assert_eq!(outcome.filled, 2);
        assert_eq!(surface.pixel(2, 0), Some([111, 100, 100, 255]));
    }

    #[test]
    fn test_lenient_tolerance_bounds_match() {
        let mut surface = RasterSurface::new(3, 1);
        surface.set_pixel(0, 0, [100, 100, 100, 255]);
        surface.set_pixel(1, 0, [100, 125, 75, 255]);
        surface.set_pixel(2, 0, [100, 100, 126, 255]);
        let outcome = flood_fill(&mut surface, 0, 0, RED, FillPolicy::LENIENT).unwrap();
        assert_eq!(outcome.filled, 2);
        assert_eq!(surface.pixel(1, 0), Some([255, 0, 0, 255]));
        assert_eq!(surface.pixel(2, 0), Some([100, 100, 126, 255]));
    }

    #[test]
    fn test_connectivity_controls_diagonal_leaks() {
        // Two cells touching only at a corner.
        let build = || {
            let mut surface = RasterSurface::new(2, 2);
            surface.set_pixel(1, 0, BLACK);
            surface.set_pixel(0, 1, BLACK);
            surface
        };

        let mut four = build();
        flood_fill(&mut four, 0, 0, RED, FillPolicy::STRICT).unwrap();
        assert_eq!(four.pixel(1, 1), Some([0, 0, 0, 0]));

        let mut eight = build();
        flood_fill(&mut eight, 0, 0, RED, FillPolicy::LENIENT).unwrap();
        assert_eq!(eight.pixel(1, 1), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_same_rgb_seed_is_noop() {
        let mut surface = RasterSurface::new(4, 4);
        let before = surface.clone();
        // Transparent pixels read as (0,0,0,0), so black fill matches the seed RGB.
        let outcome = flood_fill(&mut surface, 1, 1, Rgb::BLACK, FillPolicy::STRICT).unwrap();
        assert!(outcome.is_noop());
        assert_eq!(surface, before);
    }

    #[test]
    fn test_out_of_bounds_seed_rejected() {
        let mut surface = RasterSurface::new(4, 4);
        let before = surface.clone();
        assert!(matches!(
            flood_fill(&mut surface, 4, 0, RED, FillPolicy::STRICT),
            Err(FillError::SeedOutOfBounds { .. })
        ));
        assert!(flood_fill(&mut surface, -1, 2, RED, FillPolicy::STRICT).is_err());
        assert_eq!(surface, before);
    }

    #[test]
    fn test_only_connected_component_changes() {
        let mut surface = ring(20, 10, 0, 0, 8);
        // A second, separate blank pocket inside another ring.
        for i in 0..5 {
            surface.set_pixel(12 + i, 2, BLACK);
            surface.set_pixel(12 + i, 6, BLACK);
        }
        for i in 2..7 {
            surface.set_pixel(12, i, BLACK);
            surface.set_pixel(16, i, BLACK);
        }
        let before = surface.clone();
        flood_fill(&mut surface, 3, 3, RED, FillPolicy::STRICT).unwrap();

        for y in 0..10 {
            for x in 0..20 {
                let inside_first = (1..7).contains(&x) && (1..7).contains(&y);
                if !inside_first {
                    assert_eq!(surface.pixel(x, y), before.pixel(x, y), "pixel ({x}, {y})");
                }
            }
        }
        assert_eq!(surface.pixel(14, 4), Some([0, 0, 0, 0]));
    }
}
