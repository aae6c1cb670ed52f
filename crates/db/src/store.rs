//! Storage seam used by the HTTP handlers.
//!
//! Handlers only see [`ProjectStore`], so the production Postgres store and
//! in-memory test stores are interchangeable behind an `Arc<dyn ProjectStore>`.

use async_trait::async_trait;
use folio_core::project::ImageIndex;
use folio_core::types::DbId;

use crate::models::image::ProjectImage;
use crate::models::project::{CreateProject, ProjectRecord, ProjectSummary};
use crate::repositories::{ProjectImageRepo, ProjectRepo};
use crate::DbPool;

#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Confirm the backing store is reachable.
    async fn ping(&self) -> Result<(), sqlx::Error>;

    /// Every project with image metadata but no image payloads.
    async fn list_summaries(&self) -> Result<Vec<ProjectSummary>, sqlx::Error>;

    /// The image at `index` of project `project_id`, or `None` if either the
    /// project or the position does not exist.
    async fn find_image(
        &self,
        project_id: DbId,
        index: ImageIndex,
    ) -> Result<Option<ProjectImage>, sqlx::Error>;

    /// Atomically persist a project with all of its images.
    async fn create(&self, input: &CreateProject) -> Result<ProjectRecord, sqlx::Error>;
}

/// [`ProjectStore`] backed by PostgreSQL.
#[derive(Clone)]
pub struct PgProjectStore {
    pool: DbPool,
}

impl PgProjectStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectStore for PgProjectStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }

    async fn list_summaries(&self) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        ProjectRepo::list_summaries(&self.pool).await
    }

    async fn find_image(
        &self,
        project_id: DbId,
        index: ImageIndex,
    ) -> Result<Option<ProjectImage>, sqlx::Error> {
        // Positions are INTEGER; anything larger cannot exist.
        let Ok(position) = i32::try_from(index.position()) else {
            return Ok(None);
        };
        ProjectImageRepo::find_by_position(&self.pool, project_id, position).await
    }

    async fn create(&self, input: &CreateProject) -> Result<ProjectRecord, sqlx::Error> {
        ProjectRepo::create(&self.pool, input).await
    }
}
