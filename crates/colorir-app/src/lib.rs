//! Colorir Application
//!
//! The drawing session tying outlines, tools, rasterization and narration
//! together, and the `colorir` command-line shell built on it.

mod session;

pub use session::{DrawingSession, INITIAL_OUTLINE, SessionError, SessionResult};
