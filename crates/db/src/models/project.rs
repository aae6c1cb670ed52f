//! Project entity model and DTOs.

use folio_core::error::CoreError;
use folio_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::image::{CreateProjectImage, ImageMeta, ProjectImage};

/// A project row from the `projects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: DbId,
    pub title: String,
    pub category: String,
    pub tools: Option<Vec<String>>,
    pub client: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A project together with its images in position order.
///
/// Serializes as the project's fields plus an `images` array.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectWithImages<I> {
    #[serde(flatten)]
    pub project: Project,
    pub images: Vec<I>,
}

/// Listing shape: image payloads are never loaded.
pub type ProjectSummary = ProjectWithImages<ImageMeta>;

/// Creation shape: every image with its payload.
pub type ProjectRecord = ProjectWithImages<ProjectImage>;

impl ProjectRecord {
    /// Drop image payloads, keeping everything else.
    pub fn summary(&self) -> ProjectSummary {
        ProjectWithImages {
            project: self.project.clone(),
            images: self.images.iter().map(ImageMeta::from).collect(),
        }
    }
}

/// DTO for creating a new project with its images.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProject {
    pub title: String,
    pub category: String,
    pub tools: Option<Vec<String>>,
    pub client: Option<String>,
    /// Stored in the given order; position `i` is the `i`-th element.
    #[serde(default)]
    pub images: Vec<CreateProjectImage>,
}

impl CreateProject {
    /// Every image's declared size must match its payload length.
    pub fn check_image_sizes(&self) -> Result<(), CoreError> {
        self.images.iter().try_for_each(CreateProjectImage::check_size)
    }
}
