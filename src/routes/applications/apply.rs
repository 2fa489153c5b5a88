use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{ApplicationFields, MemberApplication, TeamAPIError},
    AppState,
};

/// Open intake endpoint. Validation failures come back as a per-field
/// error map; the confirmation email is best effort and never masks a
/// successful write.
#[tracing::instrument(name = "Submit application route handler", skip_all)]
pub async fn apply(
    State(state): State<AppState>,
    Json(request): Json<ApplyRequest>,
) -> Result<(StatusCode, Json<ApplyResponse>), TeamAPIError> {
    let fields = ApplicationFields::parse(
        request.first_name.as_deref().unwrap_or_default(),
        request.last_name.as_deref().unwrap_or_default(),
        request.email.as_deref().unwrap_or_default(),
        request.phone_number.as_deref().unwrap_or_default(),
        request.about,
        request.projects_to_join.as_ref(),
        request.lead,
    )?;

    let application = MemberApplication::new(fields);

    state
        .application_store
        .write()
        .await
        .add_application(&application)
        .await
        .map_err(|e| TeamAPIError::UnexpectedError(eyre!(e)))?;

    let content = format!(
        "Hi {}, we have received your application and will get back to you soon.",
        application.first_name
    );
    let email_sent = match state
        .email_client
        .send_email(&application.email, "Application received", &content)
        .await
    {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!("failed to send confirmation email: {e:?}");
            false
        }
    };

    let response = Json(ApplyResponse {
        message: "Application sent in successfully".to_owned(),
        email_sent,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct ApplyRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub about: Option<String>,
    pub projects_to_join: Option<serde_json::Value>,
    pub lead: Option<bool>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct ApplyResponse {
    pub message: String,
    pub email_sent: bool,
}
