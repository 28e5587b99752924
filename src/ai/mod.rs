//! AI service integration for image editing
//!
//! Sends an image and an edit instruction to Gemini and returns the edited
//! image payload. A mock implementation backs dry runs and tests.

pub mod gemini;
pub mod mock;

pub use gemini::{EditOutcome, GeminiHttpClient, GeminiImageEditor};
pub use mock::MockImageEditor;

use crate::models::ImageData;
use crate::{Error, Result};
use async_trait::async_trait;

#[async_trait]
pub trait ImageEditService: Send + Sync {
    /// Returns the base64 payload of the edited image.
    async fn edit_image(&self, image: &ImageData, prompt: &str) -> Result<String>;
}

/// Checks shared by every [`ImageEditService`] before any work is done.
pub(crate) fn validate_edit_request(image: &ImageData, prompt: &str) -> Result<()> {
    if prompt.is_empty() {
        return Err(Error::InvalidInput("Prompt cannot be empty.".to_string()));
    }
    if image.base64.is_empty() || image.mime_type.is_empty() {
        return Err(Error::InvalidInput("Invalid image data.".to_string()));
    }
    Ok(())
}
