use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{Project, ProjectAPIError, ProjectName},
    utils::{auth::get_claims, relations::sync_project_leaders},
    AppState,
};

/// Upserts the project description, then replaces its leader set.
/// Leader emails that match no member are skipped and echoed back so
/// the caller can fix the roster.
#[tracing::instrument(name = "Create project route handler", skip_all)]
pub async fn new_project(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<NewProjectRequest>,
) -> Result<(StatusCode, Json<NewProjectResponse>), ProjectAPIError> {
    get_claims(&jar)?;

    let project_name = ProjectName::parse(&request.name)?;
    let project = Project::new(
        project_name.clone(),
        request.description,
        request.logo,
        request.hours_a_week,
        request.github_link,
    );

    state
        .project_store
        .write()
        .await
        .upsert_project(&project)
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let leaders_not_found = sync_project_leaders(
        &state.member_store,
        &state.project_store,
        &project_name,
        &request.leaders,
    )
    .await?;

    let response = Json(NewProjectResponse {
        name: project_name.as_ref().to_owned(),
        leaders_not_found,
    });

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewProjectRequest {
    pub name: String,
    pub description: String,
    pub logo: String,
    pub hours_a_week: i32,
    pub github_link: Option<String>,
    #[serde(default)]
    pub leaders: Vec<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProjectResponse {
    pub name: String,
    pub leaders_not_found: Vec<String>,
}
