use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

pub const MAX_PROMPT_LENGTH: usize = 1000;

/// Characters that cannot appear in a filename, and therefore not in a
/// prompt (generated images are archived under the prompt text).
const FORBIDDEN_PROMPT_CHARS: [char; 9] =
    ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prompt(String);

impl Prompt {
    pub fn parse(prompt: &str) -> Result<Self, ValidationError> {
        if prompt.trim().is_empty() {
            return Err(ValidationError::new(
                "Prompt cannot be empty".to_string(),
            ));
        }
        if prompt.chars().count() > MAX_PROMPT_LENGTH {
            return Err(ValidationError::new(format!(
                "Max prompt length is {MAX_PROMPT_LENGTH} characters"
            )));
        }
        if prompt.contains(&FORBIDDEN_PROMPT_CHARS[..]) {
            return Err(ValidationError::new(
                "Prompt contains characters that are not filename safe"
                    .to_string(),
            ));
        }
        Ok(Self(prompt.to_owned()))
    }
}

impl AsRef<String> for Prompt {
    fn as_ref(&self) -> &String {
        &self.0
    }
}

/// The enumerated set of accepted output dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ImageSize {
    Square,
    Landscape,
    Portrait,
}

impl ImageSize {
    pub fn from_dimensions(
        width: u32,
        height: u32,
    ) -> Result<Self, ValidationError> {
        match (width, height) {
            (1024, 1024) => Ok(ImageSize::Square),
            (1792, 1024) => Ok(ImageSize::Landscape),
            (1024, 1792) => Ok(ImageSize::Portrait),
            _ => Err(ValidationError::new(format!(
                "Unsupported image dimensions: {width}x{height}"
            ))),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            ImageSize::Square | ImageSize::Portrait => 1024,
            ImageSize::Landscape => 1792,
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            ImageSize::Square | ImageSize::Landscape => 1024,
            ImageSize::Portrait => 1792,
        }
    }

    /// Wire format expected by the generation API, e.g. "1024x1024".
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Square => "1024x1024",
            ImageSize::Landscape => "1792x1024",
            ImageSize::Portrait => "1024x1792",
        }
    }
}

/// What kind of marketing material a prompt is asking for, as judged by
/// the upstream text classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PromptClassification {
    Event,
    Recruitment,
    Announcement,
    General,
}

impl PromptClassification {
    /// Classifier output is free text; anything unrecognized falls back
    /// to the general template.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "event" => PromptClassification::Event,
            "recruitment" => PromptClassification::Recruitment,
            "announcement" => PromptClassification::Announcement,
            _ => PromptClassification::General,
        }
    }
}

/// Expands the user prompt into the refined prompt actually sent to the
/// image API, based on its classification.
pub fn refine_prompt(
    prompt: &Prompt,
    classification: PromptClassification,
) -> String {
    let template = match classification {
        PromptClassification::Event => {
            "A vibrant poster for a student organization event: "
        }
        PromptClassification::Recruitment => {
            "An inviting recruitment banner for a student organization: "
        }
        PromptClassification::Announcement => {
            "A clean announcement graphic for a student organization: "
        }
        PromptClassification::General => {
            "A polished marketing illustration: "
        }
    };
    format!("{template}{}", prompt.as_ref())
}

/// Record of one successful generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedImage {
    pub image_url: String,
    pub prompt: String,
    pub width: u32,
    pub height: u32,
    pub date_of_generation: DateTime<Utc>,
}

impl GeneratedImage {
    pub fn new(image_url: String, prompt: String, size: ImageSize) -> Self {
        Self {
            image_url,
            prompt,
            width: size.width(),
            height: size.height(),
            date_of_generation: Utc::now(),
        }
    }
}
