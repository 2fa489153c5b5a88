use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use color_eyre::eyre::eyre;
use serde::Deserialize;

use crate::{
    domain::{Member, TeamAPIError, ALL_MEMBERS_SENTINEL},
    AppState,
};

#[tracing::instrument(name = "Get members by type route handler", skip_all)]
pub async fn get_members_by_type(
    State(state): State<AppState>,
    Query(query): Query<MembersByTypeQuery>,
) -> Result<(StatusCode, Json<Vec<Member>>), TeamAPIError> {
    let store = state.member_store.read().await;

    let members = if query.member_type == ALL_MEMBERS_SENTINEL {
        store.get_all_members().await
    } else {
        store.get_members_by_category(&query.member_type).await
    }
    .map_err(|e| TeamAPIError::LookupError(eyre!(e)))?;

    Ok((StatusCode::OK, Json(members)))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct MembersByTypeQuery {
    pub member_type: String,
}
