use color_eyre::eyre::Result;

use crate::domain::{GeneratedImage, GeneratedImageStore};

/// In-memory archive of generated marketing images.
#[derive(Default)]
pub struct HashmapImageStore {
    images: Vec<GeneratedImage>,
}

#[async_trait::async_trait]
impl GeneratedImageStore for HashmapImageStore {
    async fn record_image(&mut self, image: &GeneratedImage) -> Result<()> {
        self.images.push(image.clone());
        Ok(())
    }

    async fn get_images(&self) -> Result<Vec<GeneratedImage>> {
        Ok(self.images.clone())
    }
}
