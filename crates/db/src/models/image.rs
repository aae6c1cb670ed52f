//! Project image models.
//!
//! Images live in the `project_images` table keyed by `(project_id, position)`.
//! The payload is only loaded when an image is served or was just created;
//! listings use [`ImageMeta`].

use folio_core::error::CoreError;
use folio_core::types::DbId;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::base64_bytes;

/// A full image row, payload included.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectImage {
    #[serde(skip)]
    pub project_id: DbId,
    pub position: i32,
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    /// Byte length of `data`, checked at creation. Served as `Content-Length`.
    pub size: i64,
    pub filename: String,
}

/// An image row without its payload.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageMeta {
    #[serde(skip)]
    pub project_id: DbId,
    pub position: i32,
    pub content_type: Option<String>,
    pub size: i64,
    pub filename: String,
}

impl From<&ProjectImage> for ImageMeta {
    fn from(image: &ProjectImage) -> Self {
        Self {
            project_id: image.project_id,
            position: image.position,
            content_type: image.content_type.clone(),
            size: image.size,
            filename: image.filename.clone(),
        }
    }
}

/// DTO for one image embedded in a project creation request.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectImage {
    #[serde(with = "base64_bytes")]
    pub data: Vec<u8>,
    pub content_type: Option<String>,
    /// Defaults to the payload length when omitted; must equal it otherwise.
    pub size: Option<i64>,
    pub filename: String,
}

impl CreateProjectImage {
    /// The size to record: the caller's value if given, otherwise `data.len()`.
    pub fn recorded_size(&self) -> i64 {
        self.size.unwrap_or(self.data.len() as i64)
    }

    /// Refuse a declared size that disagrees with the payload length.
    ///
    /// The stored size becomes the served `Content-Length`, so it has to
    /// describe the bytes actually sent.
    pub fn check_size(&self) -> Result<(), CoreError> {
        match self.size {
            Some(size) if size != self.data.len() as i64 => Err(CoreError::Internal(format!(
                "Image \"{}\" declares size {size} but carries {} bytes",
                self.filename,
                self.data.len()
            ))),
            _ => Ok(()),
        }
    }
}
