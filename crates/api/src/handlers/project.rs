//! Handlers for the `/projects` resource.

use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::Response;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::notice::NewProjectNotice;
use folio_core::project::{
    content_type_or_default, image_url, inline_disposition, parse_project_id, ImageIndex,
};
use folio_db::models::image::ProjectImage;
use folio_db::models::project::{CreateProject, ProjectRecord, ProjectSummary, ProjectWithImages};
use serde::Serialize;

use crate::config::NotifyFailurePolicy;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
}

/// A stored image, payload included, plus its public URL.
#[derive(Debug, Clone, Serialize)]
pub struct ImageWithUrl {
    #[serde(flatten)]
    pub image: ProjectImage,
    pub url: String,
}

pub type CreatedProject = ProjectWithImages<ImageWithUrl>;

#[derive(Debug, Serialize)]
pub struct CreatedProjectResponse {
    pub project: CreatedProject,
}

/// Attach the public URL of every image, in position order.
fn with_image_urls(record: ProjectRecord, base_url: &str) -> CreatedProject {
    let project_id = record.project.id;
    let images = record
        .images
        .into_iter()
        .enumerate()
        .map(|(position, image)| ImageWithUrl {
            url: image_url(base_url, project_id, ImageIndex::new(position)),
            image,
        })
        .collect();

    ProjectWithImages {
        project: record.project,
        images,
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/projects
///
/// Every project with image metadata; image payloads are left out.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<ProjectListResponse>> {
    let projects = state.store.list_summaries().await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// GET /api/projects/{project_id}/images/{image_index}
///
/// Serves the raw image bytes. An unknown project and an index that does not
/// address an image both answer 404. `Content-Length` is the stored size.
pub async fn get_image(
    State(state): State<AppState>,
    Path((project_id, image_index)): Path<(String, String)>,
) -> AppResult<Response> {
    let project_id = parse_project_id(&project_id)?;

    let image = match ImageIndex::parse(&image_index) {
        Some(index) => state.store.find_image(project_id, index).await?,
        None => None,
    };
    let image = image.ok_or(AppError::Core(CoreError::NotFound { entity: "Image" }))?;

    Response::builder()
        .status(StatusCode::OK)
        .header(
            header::CONTENT_TYPE,
            content_type_or_default(image.content_type.as_deref()),
        )
        .header(header::CONTENT_LENGTH, image.size.to_string())
        .header(header::CONTENT_DISPOSITION, inline_disposition(&image.filename))
        .body(Body::from(image.data))
        .map_err(|e| AppError::InternalError(e.to_string()))
}

/// POST /api/projects
///
/// Stores the project, announces it on the configured channel and answers
/// 201 with the stored project, payloads included, each image carrying its
/// public URL. A failed announcement does not undo the stored project; what
/// the caller sees then depends on [`NotifyFailurePolicy`].
///
/// A body that does not decode into a project, or whose images declare a
/// size other than their payload length, is refused like any other store
/// failure: 500 with nothing stored and nothing announced.
pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateProject>, JsonRejection>,
) -> AppResult<(StatusCode, Json<CreatedProjectResponse>)> {
    let Json(input) =
        payload.map_err(|rejection| AppError::InternalError(rejection.body_text()))?;
    input.check_image_sizes()?;

    let record = state.store.create(&input).await?;
    let project = with_image_urls(record, &state.config.public_base_url);
    let project_id = project.project.id;

    let notice = NewProjectNotice::new(
        &project.project.title,
        &project.project.category,
        project.project.tools.as_deref(),
        project.project.client.as_deref(),
        project.images.iter().map(|i| i.url.clone()).collect(),
    );

    if let Err(err) = state.notifier.notify(&notice).await {
        match state.config.notify_failure_policy {
            NotifyFailurePolicy::Strict => return Err(err.into()),
            NotifyFailurePolicy::BestEffort => {
                tracing::warn!(project_id, error = %err, "Project stored but notice delivery failed");
            }
        }
    }

    tracing::info!(project_id, images = project.images.len(), "Project created");
    Ok((StatusCode::CREATED, Json(CreatedProjectResponse { project })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_db::models::project::Project;

    #[test]
    fn image_urls_follow_position_order() {
        let now = chrono::Utc::now();
        let record = ProjectRecord {
            project: Project {
                id: 9,
                title: "T".into(),
                category: "C".into(),
                tools: None,
                client: None,
                created_at: now,
                updated_at: now,
            },
            images: (0..2)
                .map(|position| ProjectImage {
                    project_id: 9,
                    position,
                    data: vec![position as u8],
                    content_type: None,
                    size: 1,
                    filename: format!("{position}.jpg"),
                })
                .collect(),
        };

        let created = with_image_urls(record, "https://folio.test");
        assert_eq!(created.images[0].url, "https://folio.test/api/projects/9/images/0");
        assert_eq!(created.images[1].url, "https://folio.test/api/projects/9/images/1");

        let json = serde_json::to_value(&created).unwrap();
        assert_eq!(json["images"][1]["filename"], "1.jpg");
        assert_eq!(json["images"][1]["data"], "AQ==");
        assert_eq!(json["images"][1]["url"], "https://folio.test/api/projects/9/images/1");
    }
}
