use color_eyre::eyre::{eyre, Result, WrapErr};
use reqwest::Client;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::domain::{
    ApiKeyPool, ImageGenClient, ImageSize, Prompt, PromptClassification,
};

/// Client for the OpenAI-compatible classification and image-generation
/// endpoints. Each outbound call takes the next key from the pool, so
/// rate-limit exposure is spread across every configured credential.
pub struct OpenAiImageClient {
    http_client: Client,
    base_url: String,
    key_pool: Mutex<ApiKeyPool>,
    text_model: String,
    image_model: String,
}

impl OpenAiImageClient {
    pub fn new(
        base_url: String,
        key_pool: ApiKeyPool,
        http_client: Client,
    ) -> Self {
        Self {
            http_client,
            base_url,
            key_pool: Mutex::new(key_pool),
            text_model: "gpt-3.5-turbo".to_owned(),
            image_model: "dall-e-3".to_owned(),
        }
    }

    async fn next_key(&self) -> String {
        self.key_pool
            .lock()
            .await
            .advance()
            .expose_secret()
            .to_owned()
    }
}

const CLASSIFY_INSTRUCTION: &str = "Classify the following marketing image \
request as exactly one of: Event, Recruitment, Announcement, General. \
Answer with the single word only.";

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Serialize)]
struct ImageGenerationRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    n: u8,
    size: &'a str,
}

#[derive(Deserialize)]
struct ImageGenerationResponse {
    data: Vec<ImageData>,
}

#[derive(Deserialize)]
struct ImageData {
    url: String,
}

#[async_trait::async_trait]
impl ImageGenClient for OpenAiImageClient {
    #[tracing::instrument(name = "Classifying prompt", skip_all)]
    async fn classify_prompt(
        &self,
        prompt: &Prompt,
    ) -> Result<PromptClassification> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let api_key = self.next_key().await;

        let request_body = ChatCompletionRequest {
            model: &self.text_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: CLASSIFY_INSTRUCTION,
                },
                ChatMessage {
                    role: "user",
                    content: prompt.as_ref(),
                },
            ],
        };

        let response: ChatCompletionResponse = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .wrap_err("classification request failed")?
            .error_for_status()
            .wrap_err("classification request was rejected")?
            .json()
            .await
            .wrap_err("failed to parse classification response")?;

        let label = response
            .choices
            .first()
            .map(|choice| choice.message.content.as_str())
            .ok_or_else(|| eyre!("classification response had no choices"))?;

        Ok(PromptClassification::from_label(label))
    }

    #[tracing::instrument(name = "Generating image", skip_all)]
    async fn generate_image(
        &self,
        prompt: &str,
        size: ImageSize,
    ) -> Result<String> {
        let url = format!("{}/v1/images/generations", self.base_url);
        let api_key = self.next_key().await;

        let request_body = ImageGenerationRequest {
            model: &self.image_model,
            prompt,
            n: 1,
            size: size.as_str(),
        };

        let response: ImageGenerationResponse = self
            .http_client
            .post(&url)
            .bearer_auth(api_key)
            .json(&request_body)
            .send()
            .await
            .wrap_err("image generation request failed")?
            .error_for_status()
            .wrap_err("image generation request was rejected")?
            .json()
            .await
            .wrap_err("failed to parse image generation response")?;

        response
            .data
            .into_iter()
            .next()
            .map(|image| image.url)
            .ok_or_else(|| eyre!("image generation response had no data"))
    }
}
