use color_eyre::eyre::Result;

use super::{ImageSize, Prompt, PromptClassification};

/// Seam to the external text-classification and image-generation API.
/// Each method is one synchronous round trip with no internal retry;
/// failures propagate to the caller.
#[async_trait::async_trait]
pub trait ImageGenClient {
    async fn classify_prompt(
        &self,
        prompt: &Prompt,
    ) -> Result<PromptClassification>;

    /// Returns the URL of the generated image.
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<String>;
}
