//! Error handling and custom error types
//!
//! Provides unified error handling across the crate using thiserror. Failures
//! coming back from the image-editing API are grouped under [`EditFailure`] and
//! always surface with the same `Failed to edit image:` prefix.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{0}")]
    InvalidInput(String),

    #[error("File is not an image.")]
    NotAnImage,

    #[error("{0}")]
    EmptyImage(String),

    #[error("Failed to fetch image: {0}")]
    Fetch(String),

    #[error("Failed to edit image: {0}")]
    Edit(#[from] EditFailure),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Decode error: {0}")]
    Decode(String),
}

/// Reasons an edit request did not produce an image.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditFailure {
    #[error("Request was blocked: {reason}. {}", .message.as_deref().unwrap_or("Please adjust your prompt."))]
    PolicyBlocked {
        reason: String,
        message: Option<String>,
    },

    #[error("The model did not return a valid response. Please try again.")]
    NoResponse,

    #[error("Request was blocked for safety reasons in the '{}' category. Please modify your prompt.", .category.as_deref().unwrap_or("Unknown"))]
    SafetyBlocked { category: Option<String> },

    #[error("The AI couldn't complete the image edit. This can happen with complex or unclear requests. Please try rephrasing your prompt or using a different image.")]
    Incomplete,

    #[error("Image generation stopped unexpectedly. Reason: {0}")]
    AbnormalFinish(String),

    #[error("Model returned a text response instead of an image: \"{0}\"")]
    TextOnly(String),

    #[error("The model did not return any content. This might be due to an issue with the prompt or a temporary problem.")]
    NoContent,

    #[error("No image was generated in the response. The prompt may have been misunderstood or blocked.")]
    NoImage,

    #[error("{0}")]
    Transport(String),
}

pub type Result<T> = std::result::Result<T, Error>;
