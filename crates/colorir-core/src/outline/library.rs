//! In-memory outline library.

use super::{OutlineDocument, OutlineId, builtin_outlines};
use thiserror::Error;

/// Library errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LibraryError {
    #[error("Outline not found: {0}")]
    NotFound(OutlineId),
    #[error("Outline already exists: {0}")]
    Duplicate(OutlineId),
    #[error("Cannot remove {0}: the library must keep at least one outline")]
    LastOutline(OutlineId),
}

/// Result type for library operations.
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Ordered collection of outlines. Never empty once built from a non-empty
/// list: removing the last outline is refused.
#[derive(Debug, Clone)]
pub struct OutlineLibrary {
    outlines: Vec<OutlineDocument>,
}

impl Default for OutlineLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl OutlineLibrary {
    /// Library holding the five built-in outlines.
    pub fn builtin() -> Self {
        Self {
            outlines: builtin_outlines(),
        }
    }

    /// Library over an explicit list.
    pub fn from_outlines(outlines: Vec<OutlineDocument>) -> Self {
        Self { outlines }
    }

    pub fn len(&self) -> usize {
        self.outlines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlines.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &OutlineDocument> {
        self.outlines.iter()
    }

    pub fn first(&self) -> Option<&OutlineDocument> {
        self.outlines.first()
    }

    pub fn get(&self, id: &OutlineId) -> Option<&OutlineDocument> {
        self.outlines.iter().find(|o| &o.id == id)
    }

    pub fn contains(&self, id: &OutlineId) -> bool {
        self.get(id).is_some()
    }

    /// Append an outline. Ids must be unique.
    pub fn add(&mut self, outline: OutlineDocument) -> LibraryResult<&OutlineDocument> {
        if self.contains(&outline.id) {
            return Err(LibraryError::Duplicate(outline.id));
        }
        log::info!("Adding outline {} ({})", outline.id, outline.name);
        self.outlines.push(outline);
        Ok(&self.outlines[self.outlines.len() - 1])
    }

    /// Remove an outline, refusing to remove the last one.
    pub fn remove(&mut self, id: &OutlineId) -> LibraryResult<OutlineDocument> {
        let index = self
            .outlines
            .iter()
            .position(|o| &o.id == id)
            .ok_or_else(|| LibraryError::NotFound(id.clone()))?;
        if self.outlines.len() <= 1 {
            return Err(LibraryError::LastOutline(id.clone()));
        }
        log::info!("Removing outline {}", id);
        Ok(self.outlines.remove(index))
    }
}
