use chrono::{DateTime, Utc};
use color_eyre::eyre::{Result, WrapErr};
use sqlx::{PgPool, Row};

use crate::domain::{GeneratedImage, GeneratedImageStore};

pub struct PostgresGeneratedImageStore {
    pool: PgPool,
}

impl PostgresGeneratedImageStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl GeneratedImageStore for PostgresGeneratedImageStore {
    #[tracing::instrument(
        name = "Recording generated image in PostgreSQL",
        skip_all
    )]
    async fn record_image(&mut self, image: &GeneratedImage) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO generated_images
                (image_url, prompt, width, height, date_of_generation)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(&image.image_url)
        .bind(&image.prompt)
        .bind(image.width as i32)
        .bind(image.height as i32)
        .bind(image.date_of_generation)
        .execute(&self.pool)
        .await
        .wrap_err("failed to record generated image")?;

        Ok(())
    }

    #[tracing::instrument(
        name = "Getting generated images from PostgreSQL",
        skip_all
    )]
    async fn get_images(&self) -> Result<Vec<GeneratedImage>> {
        let rows = sqlx::query(
            r#"
            SELECT image_url, prompt, width, height, date_of_generation
            FROM generated_images
            ORDER BY date_of_generation
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .wrap_err("failed to fetch generated images")?;

        rows.into_iter()
            .map(|row| {
                let width: i32 = row.try_get("width")?;
                let height: i32 = row.try_get("height")?;
                let date_of_generation: DateTime<Utc> =
                    row.try_get("date_of_generation")?;
                Ok(GeneratedImage {
                    image_url: row.try_get("image_url")?,
                    prompt: row.try_get("prompt")?,
                    width: width as u32,
                    height: height as u32,
                    date_of_generation,
                })
            })
            .collect::<Result<Vec<_>, sqlx::Error>>()
            .wrap_err("failed to read generated image row")
    }
}
