//! Outline documents: the templates a child colors over.

mod builtin;
mod library;

pub use builtin::builtin_outlines;
pub use library::{LibraryError, OutlineLibrary};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use uuid::Uuid;

/// Errors reading an outline's image reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageSourceError {
    #[error("Not a data URL")]
    NotDataUrl,
    #[error("Data URL is not base64 encoded")]
    NotBase64,
    #[error("Data URL holds {0}, not an image")]
    NotImage(String),
    #[error("Invalid base64 payload: {0}")]
    Base64(String),
}

/// Stable outline identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutlineId(String);

impl OutlineId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh id for an outline added at runtime, e.g. `custom-<uuid>`.
    pub fn generate(prefix: &str) -> Self {
        Self(format!("{}-{}", prefix, Uuid::new_v4()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OutlineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OutlineId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// A reference to a raster image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSource {
    /// A `data:<mime>;base64,<payload>` URL.
    DataUrl(String),
    /// Encoded image bytes (PNG, JPEG or WebP).
    Bytes(Vec<u8>),
}

impl ImageSource {
    /// The encoded image bytes.
    pub fn encoded_bytes(&self) -> Result<Vec<u8>, ImageSourceError> {
        match self {
            ImageSource::Bytes(bytes) => Ok(bytes.clone()),
            ImageSource::DataUrl(url) => {
                let rest = url.strip_prefix("data:").ok_or(ImageSourceError::NotDataUrl)?;
                let (header, payload) = rest.split_once(',').ok_or(ImageSourceError::NotDataUrl)?;
                let Some(mime) = header.strip_suffix(";base64") else {
                    return Err(ImageSourceError::NotBase64);
                };
                if !mime.starts_with("image/") {
                    return Err(ImageSourceError::NotImage(mime.to_string()));
                }
                BASE64
                    .decode(payload.trim())
                    .map_err(|e| ImageSourceError::Base64(e.to_string()))
            }
        }
    }
}

/// What an outline draws: vector markup or a raster image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutlineContent {
    Vector(String),
    Raster(ImageSource),
}

impl OutlineContent {
    /// Id prefix used for outlines of this kind added at runtime.
    pub fn id_prefix(&self) -> &'static str {
        match self {
            OutlineContent::Vector(_) => "custom",
            OutlineContent::Raster(_) => "image",
        }
    }
}

/// A named outline template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutlineDocument {
    pub id: OutlineId,
    /// Display and spoken label.
    pub name: String,
    pub content: OutlineContent,
}

impl OutlineDocument {
    pub fn new(id: impl Into<String>, name: impl Into<String>, content: OutlineContent) -> Self {
        Self {
            id: OutlineId::new(id),
            name: name.into(),
            content,
        }
    }

    /// Create a document with a freshly generated id.
    pub fn with_generated_id(name: impl Into<String>, content: OutlineContent) -> Self {
        Self {
            id: OutlineId::generate(content.id_prefix()),
            name: name.into(),
            content,
        }
    }
}
