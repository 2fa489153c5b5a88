pub mod data_stores;
pub mod openai_image_client;
pub mod postmark_email_client;
