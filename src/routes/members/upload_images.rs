use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::CookieJar;
use color_eyre::eyre::eyre;
use serde::Serialize;

use crate::{
    domain::{Member, MemberName, TeamAPIError},
    utils::auth::get_claims,
    AppState,
};

/// Matches each uploaded file to a member by filename: the name before
/// the final extension must equal the member's full name exactly.
/// Misses never fail the request; they are reported back instead.
#[tracing::instrument(name = "Upload member images route handler", skip_all)]
pub async fn upload_member_images(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ImageUploadResponse>), TeamAPIError> {
    get_claims(&jar)?;

    let mut updated_members = Vec::new();
    let mut members_not_found = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?
    {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };

        let stem = filename
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&filename)
            .to_owned();

        let candidate = match MemberName::parse(stem.clone()) {
            Ok(name) => {
                state
                    .member_store
                    .read()
                    .await
                    .find_member_by_name(&name)
                    .await
                    .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?
            }
            // A stem the name rules reject cannot belong to any member.
            Err(_) => None,
        };

        match candidate {
            Some(mut member) => {
                let image = format!("images/{}", filename);
                state
                    .member_store
                    .write()
                    .await
                    .set_member_image(member.order, &image)
                    .await
                    .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?;
                member.image = Some(image);
                updated_members.push(member);
            }
            None => {
                tracing::warn!(filename, "no member matches uploaded image");
                members_not_found.push(stem);
            }
        }
    }

    let response = Json(ImageUploadResponse {
        updated_members,
        members_not_found,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Serialize)]
pub struct ImageUploadResponse {
    pub updated_members: Vec<Member>,
    pub members_not_found: Vec<String>,
}
