//! Classification of `generateContent` responses for image edits.
//!
//! [`classify`] walks the response through a fixed, ordered series of checks
//! and stops at the first one that matches. Message formatting lives in
//! [`EditFailure`], so ordering can be tested without comparing strings.

use super::types::{GenerateContentResponse, HARM_CATEGORY_PREFIX};
use crate::error::EditFailure;

const FINISH_STOP: &str = "STOP";
const FINISH_MAX_TOKENS: &str = "MAX_TOKENS";
const FINISH_SAFETY: &str = "SAFETY";
const FINISH_OTHER: &str = "OTHER";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome {
    PolicyBlocked {
        reason: String,
        message: Option<String>,
    },
    NoCandidate,
    SafetyBlocked {
        category: Option<String>,
    },
    AbnormalFinish {
        reason: String,
    },
    TextOnly {
        text: String,
    },
    ImageFound {
        data: String,
        mime_type: String,
    },
    NoContent,
    NoImage,
}

impl EditOutcome {
    pub fn is_image(&self) -> bool {
        matches!(self, EditOutcome::ImageFound { .. })
    }

    /// Returns the untouched base64 payload, or the matching failure.
    pub fn into_result(self) -> Result<String, EditFailure> {
        match self {
            EditOutcome::ImageFound { data, .. } => Ok(data),
            EditOutcome::PolicyBlocked { reason, message } => {
                Err(EditFailure::PolicyBlocked { reason, message })
            }
            EditOutcome::NoCandidate => Err(EditFailure::NoResponse),
            EditOutcome::SafetyBlocked { category } => {
                Err(EditFailure::SafetyBlocked { category })
            }
            EditOutcome::AbnormalFinish { reason } if reason == FINISH_OTHER => {
                Err(EditFailure::Incomplete)
            }
            EditOutcome::AbnormalFinish { reason } => Err(EditFailure::AbnormalFinish(reason)),
            EditOutcome::TextOnly { text } => Err(EditFailure::TextOnly(text)),
            EditOutcome::NoContent => Err(EditFailure::NoContent),
            EditOutcome::NoImage => Err(EditFailure::NoImage),
        }
    }
}

/// Classifies a response using its own text parts as the fallback text.
pub fn classify(response: &GenerateContentResponse) -> EditOutcome {
    classify_with_text(response, response.text().as_deref())
}

/// Classifies a response against an explicit fallback text, the text quoted
/// back to the user when the model answered in words instead of pixels.
pub fn classify_with_text(
    response: &GenerateContentResponse,
    fallback_text: Option<&str>,
) -> EditOutcome {
    if let Some(feedback) = &response.prompt_feedback {
        if let Some(reason) = &feedback.block_reason {
            return EditOutcome::PolicyBlocked {
                reason: reason.clone(),
                message: feedback
                    .block_reason_message
                    .clone()
                    .filter(|m| !m.is_empty()),
            };
        }
    }

    let Some(candidate) = response.candidates.first() else {
        return EditOutcome::NoCandidate;
    };

    match candidate.finish_reason.as_deref() {
        Some(FINISH_SAFETY) => {
            let category = candidate
                .safety_ratings
                .iter()
                .find(|rating| rating.blocked)
                .and_then(|rating| rating.category.as_deref())
                .map(|category| {
                    category
                        .strip_prefix(HARM_CATEGORY_PREFIX)
                        .unwrap_or(category)
                        .to_string()
                })
                .filter(|category| !category.is_empty());
            return EditOutcome::SafetyBlocked { category };
        }
        // An empty reason is treated as no reason at all.
        Some(FINISH_STOP) | Some(FINISH_MAX_TOKENS) | Some("") | None => {}
        Some(reason) => {
            return EditOutcome::AbnormalFinish {
                reason: reason.to_string(),
            };
        }
    }

    let quoted_text = || {
        fallback_text
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
    };

    let parts = match &candidate.content {
        Some(content) if !content.parts.is_empty() => &content.parts,
        _ => {
            return match quoted_text() {
                Some(text) => EditOutcome::TextOnly { text },
                None => EditOutcome::NoContent,
            };
        }
    };

    if let Some(inline) = parts.iter().find_map(|part| part.as_inline_data()) {
        return EditOutcome::ImageFound {
            data: inline.data.clone(),
            mime_type: inline.mime_type.clone(),
        };
    }

    match quoted_text() {
        Some(text) => EditOutcome::TextOnly { text },
        None => EditOutcome::NoImage,
    }
}
