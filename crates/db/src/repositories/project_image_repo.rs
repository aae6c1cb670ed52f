//! Repository for the `project_images` table.

use folio_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::models::image::{CreateProjectImage, ImageMeta, ProjectImage};

const COLUMNS: &str = "project_id, position, data, content_type, size, filename";

const META_COLUMNS: &str = "project_id, position, content_type, size, filename";

/// Provides insert and lookup operations for project images.
pub struct ProjectImageRepo;

impl ProjectImageRepo {
    /// Insert one image at `position`. Runs on the caller's connection so it
    /// can take part in the project's creation transaction.
    pub async fn insert(
        conn: &mut PgConnection,
        project_id: DbId,
        position: i32,
        input: &CreateProjectImage,
    ) -> Result<ProjectImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO project_images (project_id, position, data, content_type, size, filename)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(position)
            .bind(&input.data)
            .bind(&input.content_type)
            .bind(input.recorded_size())
            .bind(&input.filename)
            .fetch_one(conn)
            .await
    }

    /// Fetch the image at `position` of a project, payload included.
    ///
    /// Returns `None` both when the project does not exist and when it has
    /// no image at that position.
    pub async fn find_by_position(
        pool: &PgPool,
        project_id: DbId,
        position: i32,
    ) -> Result<Option<ProjectImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM project_images WHERE project_id = $1 AND position = $2"
        );
        sqlx::query_as::<_, ProjectImage>(&query)
            .bind(project_id)
            .bind(position)
            .fetch_optional(pool)
            .await
    }

    /// Metadata of every stored image, grouped by project and in position order.
    pub async fn list_meta(pool: &PgPool) -> Result<Vec<ImageMeta>, sqlx::Error> {
        let query =
            format!("SELECT {META_COLUMNS} FROM project_images ORDER BY project_id, position");
        sqlx::query_as::<_, ImageMeta>(&query).fetch_all(pool).await
    }
}
