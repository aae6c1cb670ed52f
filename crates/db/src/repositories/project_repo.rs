//! Repository for the `projects` table.

use std::collections::HashMap;

use folio_core::types::DbId;
use sqlx::PgPool;

use crate::models::image::ImageMeta;
use crate::models::project::{
    CreateProject, Project, ProjectRecord, ProjectSummary, ProjectWithImages,
};
use crate::repositories::ProjectImageRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, title, category, tools, client, created_at, updated_at";

/// Provides create and read operations for projects.
pub struct ProjectRepo;

impl ProjectRepo {
    /// Insert a project and all of its images in one transaction.
    ///
    /// Image `i` of the input is stored at position `i`. Either the project
    /// and every image are committed, or nothing is.
    pub async fn create(
        pool: &PgPool,
        input: &CreateProject,
    ) -> Result<ProjectRecord, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO projects (title, category, tools, client)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let project = sqlx::query_as::<_, Project>(&query)
            .bind(&input.title)
            .bind(&input.category)
            .bind(&input.tools)
            .bind(&input.client)
            .fetch_one(&mut *tx)
            .await?;

        let mut images = Vec::with_capacity(input.images.len());
        for (position, image) in input.images.iter().enumerate() {
            let position =
                i32::try_from(position).map_err(|e| sqlx::Error::Encode(Box::new(e)))?;
            let row = ProjectImageRepo::insert(&mut *tx, project.id, position, image).await?;
            images.push(row);
        }

        tx.commit().await?;

        tracing::debug!(
            project_id = project.id,
            image_count = images.len(),
            "Project created"
        );

        Ok(ProjectWithImages { project, images })
    }

    /// Find a project by its ID, without images.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects WHERE id = $1");
        sqlx::query_as::<_, Project>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all projects in insertion order, without images.
    pub async fn list(pool: &PgPool) -> Result<Vec<Project>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM projects ORDER BY id");
        sqlx::query_as::<_, Project>(&query).fetch_all(pool).await
    }

    /// List all projects with image metadata attached. Payloads are never read.
    pub async fn list_summaries(pool: &PgPool) -> Result<Vec<ProjectSummary>, sqlx::Error> {
        let projects = Self::list(pool).await?;

        let mut by_project: HashMap<DbId, Vec<ImageMeta>> = HashMap::new();
        for meta in ProjectImageRepo::list_meta(pool).await? {
            by_project.entry(meta.project_id).or_default().push(meta);
        }

        Ok(projects
            .into_iter()
            .map(|project| {
                let images = by_project.remove(&project.id).unwrap_or_default();
                ProjectWithImages { project, images }
            })
            .collect())
    }
}
