use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;

use crate::{
    domain::{CategoryTitle, TeamAPIError},
    AppState,
};

#[tracing::instrument(name = "Get member categories route handler", skip_all)]
pub async fn get_categories(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<Vec<CategoryTitle>>), TeamAPIError> {
    let categories = state
        .member_store
        .read()
        .await
        .list_categories()
        .await
        .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(categories)))
}
