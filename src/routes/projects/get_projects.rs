use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::Serialize;

use crate::{
    domain::{Project, ProjectAPIError, ProjectMember},
    AppState,
};

#[tracing::instrument(name = "Get projects route handler", skip_all)]
pub async fn get_projects(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<ProjectListItem>>), ProjectAPIError> {
    let store = state.project_store.read().await;

    let projects = store
        .get_projects()
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let mut items = Vec::with_capacity(projects.len());
    for project in projects {
        let members = store
            .get_project_members(&project.name)
            .await
            .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;
        items.push(ProjectListItem { project, members });
    }

    Ok((StatusCode::OK, Json(items)))
}

/// A project description with its role rows, already in the default
/// ordering (most recent semester first).
#[derive(Debug, PartialEq, Serialize)]
pub struct ProjectListItem {
    #[serde(flatten)]
    pub project: Project,
    pub members: Vec<ProjectMember>,
}
