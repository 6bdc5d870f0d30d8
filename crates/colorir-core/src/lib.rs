//! Colorir Core Library
//!
//! Platform-agnostic data structures and logic for the Colorir coloring book:
//! outline documents, the markup parser, the raster surface, flood fill,
//! tools and narration policy. Rasterization lives in `colorir-render`.

pub mod color;
pub mod config;
pub mod fill;
pub mod fit;
pub mod narration;
pub mod outline;
pub mod surface;
pub mod svg;
pub mod tools;

pub use color::{ColorError, PALETTE, PaletteEntry, Rgb, Thickness};
pub use config::{ColorirConfig, ConfigError};
pub use fill::{Connectivity, FillError, FillOutcome, FillPolicy, flood_fill};
pub use fit::{FIT_MARGIN_RATIO, FitTransform};
pub use narration::{Announcer, LogNarrator, Narrator};
pub use outline::{
    ImageSource, LibraryError, OutlineContent, OutlineDocument, OutlineId, OutlineLibrary,
};
pub use surface::{RasterSurface, SurfaceSnapshot};
pub use tools::{ToolAction, ToolKind, ToolManager};
