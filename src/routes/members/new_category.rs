use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{CategoryTitle, TeamAPIError},
    utils::auth::get_claims,
    AppState,
};

#[tracing::instrument(name = "Create member category route handler", skip_all)]
pub async fn new_category(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(request): Json<NewCategoryRequest>,
) -> Result<(StatusCode, Json<NewCategoryResponse>), TeamAPIError> {
    get_claims(&jar)?;

    let title = CategoryTitle::parse(request.title)?;

    // Get-or-create: posting an existing title succeeds without change.
    state
        .member_store
        .write()
        .await
        .create_category(&title)
        .await
        .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(NewCategoryResponse {
        title: title.as_ref().to_owned(),
    });

    Ok((StatusCode::CREATED, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct NewCategoryRequest {
    pub title: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct NewCategoryResponse {
    pub title: String,
}
