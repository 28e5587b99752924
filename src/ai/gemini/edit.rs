use super::classify::{classify, EditOutcome};
use super::client::GeminiHttpClient;
use super::types::{EditRequest, GenerateContentResponse};
use crate::ai::{validate_edit_request, ImageEditService};
use crate::error::EditFailure;
use crate::models::ImageData;
use crate::{Error, Result};
use async_trait::async_trait;

/// Edits images through Gemini's `generateContent` endpoint.
pub struct GeminiImageEditor {
    http: GeminiHttpClient,
}

impl GeminiImageEditor {
    pub fn new(api_key: String, model: String) -> Self {
        Self::new_with_client(api_key, model, reqwest::Client::new())
    }

    pub fn new_with_client(api_key: String, model: String, client: reqwest::Client) -> Self {
        Self {
            http: GeminiHttpClient::new_with_client(api_key, model, client),
        }
    }

    pub fn from_http(http: GeminiHttpClient) -> Self {
        Self { http }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.http = self.http.with_base_url(base_url);
        self
    }

    pub fn model(&self) -> &str {
        self.http.model()
    }

    /// Sends the request and classifies the response without collapsing it
    /// into an error. Input validation still applies.
    pub async fn request_outcome(&self, image: &ImageData, prompt: &str) -> Result<EditOutcome> {
        validate_edit_request(image, prompt)?;

        let request = EditRequest::new(&image.mime_type, &image.base64, prompt);
        let response: GenerateContentResponse = self.http.generate_content(&request).await?;

        let outcome = classify(&response);
        tracing::debug!("Gemini edit outcome: {:?}", OutcomeKind(&outcome));
        Ok(outcome)
    }
}

/// Folds any non-edit error into the edit failure taxonomy so every failure
/// past validation carries the same prefix.
fn into_edit_error(err: Error) -> Error {
    match err {
        Error::Edit(failure) => Error::Edit(failure),
        Error::InvalidInput(message) => Error::InvalidInput(message),
        other => Error::Edit(EditFailure::Transport(other.to_string())),
    }
}

/// Debug view of an outcome that leaves out the image payload.
struct OutcomeKind<'a>(&'a EditOutcome);

impl std::fmt::Debug for OutcomeKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            EditOutcome::ImageFound { data, mime_type } => f
                .debug_struct("ImageFound")
                .field("mime_type", mime_type)
                .field("len", &data.len())
                .finish(),
            other => std::fmt::Debug::fmt(other, f),
        }
    }
}

#[async_trait]
impl ImageEditService for GeminiImageEditor {
    async fn edit_image(&self, image: &ImageData, prompt: &str) -> Result<String> {
        let result = match self.request_outcome(image, prompt).await {
            Ok(outcome) => outcome.into_result().map_err(Error::Edit),
            Err(err) => Err(into_edit_error(err)),
        };

        if let Err(e @ Error::Edit(_)) = &result {
            tracing::error!("Error calling Gemini API: {}", e);
        }
        result
    }
}
