use axum::{extract::State, http::StatusCode, Json};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;

use crate::{
    domain::{MemberApplication, TeamAPIError},
    utils::auth::get_claims,
    AppState,
};

#[tracing::instrument(name = "Get applications route handler", skip_all)]
pub async fn get_applications(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(StatusCode, Json<Vec<MemberApplication>>), TeamAPIError> {
    get_claims(&jar)?;

    let applications = state
        .application_store
        .read()
        .await
        .get_applications()
        .await
        .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(applications)))
}
