use axum::{extract::State, http::StatusCode, Json};
use color_eyre::eyre::eyre;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{
        refine_prompt, GeneratedImage, ImageSize, Prompt, ProjectAPIError,
    },
    AppState,
};

/// Two upstream round trips: classify the prompt, then generate one
/// image from the refined prompt. No retries; upstream failures map to
/// a gateway error. Every successful generation is recorded.
#[tracing::instrument(name = "Generate marketing image route handler", skip_all)]
pub async fn generate_marketing_image(
    State(state): State<AppState>,
    Json(request): Json<MarketingImageRequest>,
) -> Result<(StatusCode, Json<MarketingImageResponse>), ProjectAPIError> {
    let prompt = Prompt::parse(&request.prompt)?;
    let size = ImageSize::from_dimensions(request.width, request.height)?;

    let classification = state
        .image_client
        .classify_prompt(&prompt)
        .await
        .map_err(ProjectAPIError::UpstreamError)?;

    let refined_prompt = refine_prompt(&prompt, classification);

    let image_url = state
        .image_client
        .generate_image(&refined_prompt, size)
        .await
        .map_err(ProjectAPIError::UpstreamError)?;

    state
        .image_store
        .write()
        .await
        .record_image(&GeneratedImage::new(
            image_url.clone(),
            refined_prompt.clone(),
            size,
        ))
        .await
        .map_err(|e| ProjectAPIError::UnexpectedError(eyre!(e)))?;

    let response = Json(MarketingImageResponse {
        image_url,
        prompt: refined_prompt,
    });

    Ok((StatusCode::OK, response))
}

#[derive(Debug, PartialEq, Deserialize)]
pub struct MarketingImageRequest {
    pub prompt: String,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketingImageResponse {
    pub image_url: String,
    pub prompt: String,
}
